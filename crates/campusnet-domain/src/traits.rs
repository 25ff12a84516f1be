//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in the store crate.

use crate::ids::UserId;
use crate::relationship::RelationshipCounts;

/// Trait for reading and mutating the relationship cell pair of two users
///
/// Implemented by the infrastructure layer (campusnet-store).
pub trait RelationshipStore {
    /// Error type for store operations
    type Error;

    /// Read both cells of the (owner, other) pair; absent cells read as 0
    fn status_between(&self, owner: &UserId, other: &UserId) -> Result<(u8, u8), Self::Error>;

    /// Apply the toggle transition for the owner's current status and return
    /// the resulting pair
    fn toggle(&mut self, owner: &UserId, other: &UserId) -> Result<(u8, u8), Self::Error>;

    /// Tally follower/following/friend counts over the owner's cells
    fn counts_for(&self, owner: &UserId) -> Result<RelationshipCounts, Self::Error>;
}
