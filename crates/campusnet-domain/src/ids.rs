//! Entity identifiers based on UUIDv7.
//!
//! UUIDv7 gives chronologically sortable 128-bit ids with no coordination
//! between writers, which matters here because posts, comments, and replies
//! are created by independent clients and listed in creation order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user account
///
/// # Examples
///
/// ```
/// use campusnet_domain::UserId;
///
/// let id = UserId::new();
/// let parsed = UserId::from_string(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(uuid::Uuid);

impl UserId {
    /// Generate a new UUIDv7-based UserId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a UserId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid user id: {}", e))
    }

    /// Timestamp component in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        (self.0.as_u128() >> 80) as u64
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new UUIDv7-based id
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Parse from the string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| format!("Invalid id: {}", e))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a post
    PostId
);
entity_id!(
    /// Unique identifier for a comment on a post
    CommentId
);
entity_id!(
    /// Unique identifier for a reply within a comment thread
    ReplyId
);
entity_id!(
    /// Unique identifier for an announcement
    AnnouncementId
);
entity_id!(
    /// Unique identifier for a campus event
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::new();
        let s = id.to_string();

        // UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(s.len(), 36);
        assert_eq!(UserId::from_string(&s).unwrap(), id);
    }

    #[test]
    fn test_user_id_invalid_string() {
        assert!(UserId::from_string("not-a-uuid").is_err());
        assert!(UserId::from_string("").is_err());
    }

    #[test]
    fn test_ids_chronological() {
        let a = PostId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = PostId::new();

        assert!(a < b, "Earlier UUIDv7 should sort before later UUIDv7");
    }

    #[test]
    fn test_user_id_serde_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
