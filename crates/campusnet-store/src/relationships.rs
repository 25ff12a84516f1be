//! Relationship graph operations over the cell pair protocol.
//!
//! Each user owns one cell per counterpart at `Relationships/{owner}/{other}`.
//! The original client wrote the two cells of a pair as independent point
//! writes; here both land in one guarded commit, so a pair can no longer be
//! torn by a crash between writes, and a concurrent toggle from either side
//! surfaces as [`StoreError::Conflict`] instead of corrupting state.

use crate::{DocWrite, DocumentDb, StoreError, VersionGuard};
use campusnet_domain::ids::UserId;
use campusnet_domain::relationship::{self, RelationshipCell, RelationshipCounts};
use campusnet_domain::traits::RelationshipStore;
use campusnet_domain::TreePath;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Path of one relationship cell
pub fn cell_path(owner: &UserId, other: &UserId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Relationships".to_string(),
        owner.to_string(),
        other.to_string(),
    ])?)
}

/// Typed view over the relationship subtree
pub struct RelationshipGraph<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> RelationshipGraph<'a> {
    /// Borrow the store for relationship operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Read one cell: status (0 when absent) and the observed version
    fn read_cell(
        &self,
        owner: &UserId,
        other: &UserId,
    ) -> Result<(u8, Option<u64>), StoreError> {
        let path = cell_path(owner, other)?;
        match self.db.get(&path)? {
            Some(doc) => {
                let cell: RelationshipCell = serde_json::from_value(doc.value)
                    .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
                Ok((cell.status, Some(doc.version)))
            }
            None => Ok((0, None)),
        }
    }

    /// All of the owner's cells as `(counterpart, status)` pairs
    ///
    /// Cells keyed by something that is not a user id are skipped rather
    /// than failing the whole listing.
    pub fn list_for(&self, owner: &UserId) -> Result<Vec<(UserId, u8)>, StoreError> {
        let base = TreePath::new(["Relationships".to_string(), owner.to_string()])?;
        let mut out = Vec::new();
        for (segment, doc) in self.db.children(&base)? {
            let Ok(other) = UserId::from_string(&segment) else {
                warn!(owner = %owner, segment, "skipping malformed relationship cell key");
                continue;
            };
            let cell: RelationshipCell = serde_json::from_value(doc.value).unwrap_or_default();
            out.push((other, cell.status));
        }
        Ok(out)
    }

    /// Friends-of-friends suggestions for the owner
    ///
    /// For every counterpart the owner has a cell for, collect that user's
    /// confirmed friends (status 3), excluding the owner and anyone the
    /// owner already has a cell for. De-duplicated, in discovery order.
    pub fn suggestions_for(&self, owner: &UserId) -> Result<Vec<UserId>, StoreError> {
        let mine = self.list_for(owner)?;
        let known: HashSet<UserId> = mine.iter().map(|(other, _)| *other).collect();

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for (counterpart, _) in &mine {
            for (candidate, status) in self.list_for(counterpart)? {
                if status != 3 || candidate == *owner || known.contains(&candidate) {
                    continue;
                }
                if seen.insert(candidate) {
                    suggestions.push(candidate);
                }
            }
        }
        Ok(suggestions)
    }
}

impl RelationshipStore for RelationshipGraph<'_> {
    type Error = StoreError;

    fn status_between(&self, owner: &UserId, other: &UserId) -> Result<(u8, u8), StoreError> {
        let (owner_status, _) = self.read_cell(owner, other)?;
        let (other_status, _) = self.read_cell(other, owner)?;
        Ok((owner_status, other_status))
    }

    fn toggle(&mut self, owner: &UserId, other: &UserId) -> Result<(u8, u8), StoreError> {
        let (owner_status, owner_version) = self.read_cell(owner, other)?;

        let Some((new_owner, new_other)) = relationship::transition(owner_status) else {
            if owner_status == 3 {
                // Unfriending is not offered; see the evaluator table.
                debug!(owner = %owner, other = %other, "toggle on friends pair is a no-op");
            } else {
                warn!(
                    owner = %owner,
                    other = %other,
                    status = owner_status,
                    "refusing toggle on out-of-range status"
                );
            }
            let (other_status, _) = self.read_cell(other, owner)?;
            return Ok((owner_status, other_status));
        };

        let guard = match owner_version {
            Some(version) => VersionGuard::At(version),
            None => VersionGuard::Absent,
        };
        self.db.commit(vec![
            DocWrite::guarded(
                cell_path(owner, other)?,
                serde_json::to_value(RelationshipCell::new(new_owner))?,
                guard,
            ),
            DocWrite::new(
                cell_path(other, owner)?,
                serde_json::to_value(RelationshipCell::new(new_other))?,
            ),
        ])?;

        Ok((new_owner.code(), new_other.code()))
    }

    fn counts_for(&self, owner: &UserId) -> Result<RelationshipCounts, StoreError> {
        let statuses = self.list_for(owner)?.into_iter().map(|(_, status)| status);
        Ok(RelationshipCounts::tally(statuses))
    }
}
