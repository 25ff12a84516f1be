//! CampusNet Storage Layer
//!
//! A path-addressed document store over SQLite, standing in for the managed
//! realtime database the mobile client talks to. Documents are JSON values
//! with a per-document version; writers commit one or more documents
//! atomically, optionally guarded by the version they observed, and
//! subscribers receive change notifications for the subtrees they watch.
//!
//! The typed modules (`relationships`, `posts`, `announcements`, ...) layer
//! the social domain's read/write paths over this store.
//!
//! # Examples
//!
//! ```no_run
//! use campusnet_store::DocumentDb;
//!
//! let db = DocumentDb::in_memory().unwrap();
//! // Store is ready for document operations
//! ```

#![warn(missing_docs)]

pub mod accounts;
pub mod announcements;
pub mod directory;
pub mod events;
pub mod posts;
pub mod profiles;
pub mod relationships;
pub mod watch;

pub use watch::{ChangeEvent, WatchHandle, WatchHub};

use campusnet_domain::path::PathError;
use campusnet_domain::TreePath;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Malformed document path
    #[error("{0}")]
    Path(#[from] PathError),

    /// Stored document does not match the expected shape
    #[error("Invalid data at {0}: {1}")]
    InvalidData(String, String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A guarded write observed a stale version
    #[error("Version conflict at {path} (found {found:?})")]
    Conflict {
        /// Path of the conflicting write
        path: String,
        /// Version found in the store, `None` when the document was absent
        found: Option<u64>,
    },

    /// Document not found where one is required
    #[error("Not found: {0}")]
    NotFound(String),

    /// Registration with an email that is already taken
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Login with an unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// A stored document: JSON payload plus its current version
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// JSON payload
    pub value: serde_json::Value,

    /// Version, starting at 1 on first write
    pub version: u64,
}

/// Precondition for one write inside a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGuard {
    /// Write unconditionally
    Any,

    /// The document must not exist yet
    Absent,

    /// The document must be at exactly this version
    At(u64),
}

/// One document write inside an atomic commit
#[derive(Debug, Clone)]
pub struct DocWrite {
    /// Target path
    pub path: TreePath,

    /// New payload
    pub value: serde_json::Value,

    /// Precondition; a mismatch aborts the whole commit
    pub guard: VersionGuard,
}

impl DocWrite {
    /// Unconditional write
    pub fn new(path: TreePath, value: serde_json::Value) -> Self {
        Self {
            path,
            value,
            guard: VersionGuard::Any,
        }
    }

    /// Guarded write
    pub fn guarded(path: TreePath, value: serde_json::Value, guard: VersionGuard) -> Self {
        Self { path, value, guard }
    }
}

/// SQLite-backed document store with watch support
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe; callers share a `DocumentDb`
/// behind a mutex. Watch registration and delivery are independently
/// synchronized and may outlive the borrow that created them.
pub struct DocumentDb {
    conn: Connection,
    hub: Arc<WatchHub>,
}

impl DocumentDb {
    /// Open (or create) a store at the given database path
    ///
    /// Use [`DocumentDb::in_memory`] for tests.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn,
            hub: Arc::new(WatchHub::new()),
        })
    }

    /// Open an in-memory store
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    /// Read a document; absent documents are `Ok(None)`, not an error
    pub fn get(&self, path: &TreePath) -> Result<Option<Document>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT value, version FROM documents WHERE path = ?1",
                params![path.to_string()],
                |row| {
                    let value: String = row.get(0)?;
                    let version: i64 = row.get(1)?;
                    Ok((value, version))
                },
            )
            .optional()?;

        match row {
            Some((raw, version)) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
                Ok(Some(Document {
                    value,
                    version: version as u64,
                }))
            }
            None => Ok(None),
        }
    }

    /// Create-or-overwrite a single document, returning its new version
    pub fn put(&mut self, path: &TreePath, value: serde_json::Value) -> Result<u64, StoreError> {
        let versions = self.commit(vec![DocWrite::new(path.clone(), value)])?;
        Ok(versions[0])
    }

    /// Apply a set of writes in one atomic transaction
    ///
    /// All guards are checked against the state inside the transaction; any
    /// mismatch rolls the whole commit back with [`StoreError::Conflict`].
    /// Watchers are notified only after the transaction commits, one event
    /// per write, in write order.
    pub fn commit(&mut self, writes: Vec<DocWrite>) -> Result<Vec<u64>, StoreError> {
        let tx = self.conn.transaction()?;
        let mut events = Vec::with_capacity(writes.len());
        let mut versions = Vec::with_capacity(writes.len());

        for write in &writes {
            let key = write.path.to_string();
            let current: Option<i64> = tx
                .query_row(
                    "SELECT version FROM documents WHERE path = ?1",
                    params![&key],
                    |row| row.get(0),
                )
                .optional()?;
            let current = current.map(|v| v as u64);

            let guard_ok = match write.guard {
                VersionGuard::Any => true,
                VersionGuard::Absent => current.is_none(),
                VersionGuard::At(expected) => current == Some(expected),
            };
            if !guard_ok {
                return Err(StoreError::Conflict {
                    path: key,
                    found: current,
                });
            }

            let next = current.unwrap_or(0) + 1;
            let raw = serde_json::to_string(&write.value)?;
            tx.execute(
                "INSERT INTO documents (path, value, version) VALUES (?1, ?2, ?3)
                 ON CONFLICT(path) DO UPDATE SET value = excluded.value, version = excluded.version",
                params![&key, &raw, next as i64],
            )?;

            versions.push(next);
            events.push(ChangeEvent {
                path: write.path.clone(),
                value: Some(write.value.clone()),
                version: next,
            });
        }

        tx.commit()?;
        for event in &events {
            self.hub.publish(event);
        }
        Ok(versions)
    }

    /// Delete a document, returning whether it existed
    ///
    /// Relationship cells are reverted to status 0 rather than removed; this
    /// exists for reference data and test cleanup.
    pub fn remove(&mut self, path: &TreePath) -> Result<bool, StoreError> {
        let current = self.get(path)?;
        let n = self.conn.execute(
            "DELETE FROM documents WHERE path = ?1",
            params![path.to_string()],
        )?;
        if let (true, Some(doc)) = (n > 0, current) {
            self.hub.publish(&ChangeEvent {
                path: path.clone(),
                value: None,
                version: doc.version,
            });
        }
        Ok(n > 0)
    }

    /// Direct children of a path: `(leaf segment, document)` pairs
    ///
    /// Interior nodes without a document of their own do not appear.
    pub fn children(&self, path: &TreePath) -> Result<Vec<(String, Document)>, StoreError> {
        let mut out = Vec::new();
        for (child_path, doc) in self.subtree(path)? {
            if child_path.depth() == path.depth() + 1 {
                out.push((child_path.leaf().to_string(), doc));
            }
        }
        Ok(out)
    }

    /// All documents under a path, in path order
    pub fn subtree(&self, path: &TreePath) -> Result<Vec<(TreePath, Document)>, StoreError> {
        // Byte-wise range scan: '/' is 0x2F, '0' is 0x30, so every descendant
        // path sorts in [prefix + "/", prefix + "0").
        let lower = format!("{}/", path);
        let upper = format!("{}0", path);

        let mut stmt = self.conn.prepare(
            "SELECT path, value, version FROM documents
             WHERE path >= ?1 AND path < ?2 ORDER BY path",
        )?;
        let rows = stmt.query_map(params![lower, upper], |row| {
            let path: String = row.get(0)?;
            let value: String = row.get(1)?;
            let version: i64 = row.get(2)?;
            Ok((path, value, version))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (raw_path, raw_value, version) = row?;
            let child_path = TreePath::parse(&raw_path)
                .map_err(|e| StoreError::InvalidData(raw_path.clone(), e.to_string()))?;
            let value = serde_json::from_str(&raw_value)
                .map_err(|e| StoreError::InvalidData(raw_path.clone(), e.to_string()))?;
            out.push((
                child_path,
                Document {
                    value,
                    version: version as u64,
                },
            ));
        }
        Ok(out)
    }

    /// Subscribe to changes under a prefix
    ///
    /// Events are delivered asynchronously in commit order. The handle
    /// unregisters the subscription when dropped.
    pub fn watch(&self, prefix: TreePath) -> (WatchHandle, UnboundedReceiver<ChangeEvent>) {
        self.hub.watch(prefix)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> TreePath {
        TreePath::parse(s).unwrap()
    }

    #[test]
    fn test_get_absent_is_none() {
        let db = DocumentDb::in_memory().unwrap();
        assert_eq!(db.get(&path("Profiles/u1")).unwrap(), None);
    }

    #[test]
    fn test_put_and_get() {
        let mut db = DocumentDb::in_memory().unwrap();
        let p = path("Profiles/u1");

        let v1 = db.put(&p, json!({"display_name": "An"})).unwrap();
        assert_eq!(v1, 1);

        let doc = db.get(&p).unwrap().unwrap();
        assert_eq!(doc.value, json!({"display_name": "An"}));
        assert_eq!(doc.version, 1);

        let v2 = db.put(&p, json!({"display_name": "Binh"})).unwrap();
        assert_eq!(v2, 2);
    }

    #[test]
    fn test_commit_is_atomic_on_conflict() {
        let mut db = DocumentDb::in_memory().unwrap();
        let a = path("Relationships/u1/u2");
        let b = path("Relationships/u2/u1");
        db.put(&a, json!({"status": 1})).unwrap();

        // Guard on the wrong version: neither write must land.
        let result = db.commit(vec![
            DocWrite::guarded(a.clone(), json!({"status": 0}), VersionGuard::At(9)),
            DocWrite::new(b.clone(), json!({"status": 0})),
        ]);
        assert!(matches!(result, Err(StoreError::Conflict { .. })));

        assert_eq!(db.get(&a).unwrap().unwrap().value, json!({"status": 1}));
        assert_eq!(db.get(&b).unwrap(), None);
    }

    #[test]
    fn test_absent_guard() {
        let mut db = DocumentDb::in_memory().unwrap();
        let p = path("Likes/Posts/u1/p1/u2");

        db.commit(vec![DocWrite::guarded(
            p.clone(),
            json!({"liked": true}),
            VersionGuard::Absent,
        )])
        .unwrap();

        let result = db.commit(vec![DocWrite::guarded(
            p.clone(),
            json!({"liked": true}),
            VersionGuard::Absent,
        )]);
        assert!(matches!(result, Err(StoreError::Conflict { found: Some(1), .. })));
    }

    #[test]
    fn test_children_and_subtree() {
        let mut db = DocumentDb::in_memory().unwrap();
        db.put(&path("Relationships/u1/u2"), json!({"status": 1}))
            .unwrap();
        db.put(&path("Relationships/u1/u3"), json!({"status": 3}))
            .unwrap();
        db.put(&path("Relationships/u10/u2"), json!({"status": 2}))
            .unwrap();

        // "u10" must not leak into "u1"'s subtree.
        let children = db.children(&path("Relationships/u1")).unwrap();
        let segments: Vec<_> = children.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(segments, vec!["u2", "u3"]);

        let all = db.subtree(&path("Relationships")).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_children_skip_deeper_descendants() {
        let mut db = DocumentDb::in_memory().unwrap();
        db.put(&path("Comments/u1/p1/c1"), json!({"content": "hi"}))
            .unwrap();

        let children = db.children(&path("Comments/u1")).unwrap();
        assert!(children.is_empty());

        let subtree = db.subtree(&path("Comments/u1")).unwrap();
        assert_eq!(subtree.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut db = DocumentDb::in_memory().unwrap();
        let p = path("Directory/Departments/cs");
        db.put(&p, json!({"name": "CS"})).unwrap();

        assert!(db.remove(&p).unwrap());
        assert!(!db.remove(&p).unwrap());
        assert_eq!(db.get(&p).unwrap(), None);
    }

    #[test]
    fn test_watch_delivery_and_raii() {
        let mut db = DocumentDb::in_memory().unwrap();
        let (handle, mut rx) = db.watch(path("Relationships/u1"));

        db.put(&path("Relationships/u1/u2"), json!({"status": 1}))
            .unwrap();
        db.put(&path("Relationships/u2/u1"), json!({"status": 2}))
            .unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.path, path("Relationships/u1/u2"));
        assert_eq!(event.value, Some(json!({"status": 1})));
        assert_eq!(event.version, 1);

        // The sibling subtree is not ours.
        assert!(rx.try_recv().is_err());

        // Dropping the handle unregisters the subscription.
        drop(handle);
        db.put(&path("Relationships/u1/u3"), json!({"status": 1}))
            .unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_commit_events_in_write_order() {
        let mut db = DocumentDb::in_memory().unwrap();
        let (_handle, mut rx) = db.watch(path("Relationships"));

        db.commit(vec![
            DocWrite::new(path("Relationships/u1/u2"), json!({"status": 1})),
            DocWrite::new(path("Relationships/u2/u1"), json!({"status": 2})),
        ])
        .unwrap();

        assert_eq!(rx.try_recv().unwrap().path, path("Relationships/u1/u2"));
        assert_eq!(rx.try_recv().unwrap().path, path("Relationships/u2/u1"));
    }
}
