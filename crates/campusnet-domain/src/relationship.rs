//! Relationship status protocol.
//!
//! For any pair of users {A, B} the store holds two independent cells,
//! `Relationships/A/B` and `Relationships/B/A`, each a single integer status
//! from the owner's perspective. Follow, follow-back, and mutual-friend
//! semantics are derived entirely from this pair; there is no server-side
//! reconciliation step.
//!
//! The evaluator is total: cells are written by independent clients and a
//! reader must render *any* pair it finds, including combinations the
//! mutator can never produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a relationship cell, from the cell owner's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipStatus {
    /// No relationship
    None,

    /// Owner follows the other user (owner initiated)
    Following,

    /// The other user follows the owner
    FollowedBy,

    /// Confirmed in both directions
    Friends,
}

impl RelationshipStatus {
    /// Stored integer code
    pub fn code(self) -> u8 {
        match self {
            RelationshipStatus::None => 0,
            RelationshipStatus::Following => 1,
            RelationshipStatus::FollowedBy => 2,
            RelationshipStatus::Friends => 3,
        }
    }

    /// Decode a stored status code
    ///
    /// Returns `None` for codes outside 0..=3. Callers must not treat that as
    /// an error: corrupt cells are rendered raw, not rejected.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RelationshipStatus::None),
            1 => Some(RelationshipStatus::Following),
            2 => Some(RelationshipStatus::FollowedBy),
            3 => Some(RelationshipStatus::Friends),
            _ => None,
        }
    }

    /// Status name as used in list filters
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::None => "none",
            RelationshipStatus::Following => "following",
            RelationshipStatus::FollowedBy => "followed_by",
            RelationshipStatus::Friends => "friends",
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored payload of one relationship cell
///
/// A missing cell is read as status 0 by convention; cells are materialized
/// on first write and reverted to 0 rather than deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipCell {
    /// Raw status code (0..=3 when written by the mutator)
    pub status: u8,
}

impl RelationshipCell {
    /// Cell holding the given status
    pub fn new(status: RelationshipStatus) -> Self {
        Self {
            status: status.code(),
        }
    }
}

impl Default for RelationshipCell {
    fn default() -> Self {
        Self { status: 0 }
    }
}

/// Action the owner may take on the relationship they are viewing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipAction {
    /// Initiate a follow: owner → 1, other → 2
    Follow,

    /// Cancel a follow the owner initiated: both cells → 0
    Unfollow,

    /// Complete the mutual relationship: both cells → 3
    FollowBack,
}

/// Result of evaluating a cell pair: what to show, what may happen next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipView {
    /// Display label for the relationship button
    pub label: String,

    /// Allowed action, or `None` when the button is disabled
    pub action: Option<RelationshipAction>,
}

/// Evaluate a cell pair into a display label and allowed action
///
/// Exhaustive over the four combinations the mutator can produce; every other
/// pair (unreachable under normal operation, possible after a torn write or
/// corrupt data) renders the raw codes with the action disabled.
///
/// | owner | other | label         | action       |
/// |-------|-------|---------------|--------------|
/// | 0     | 0     | "Follow"      | `Follow`     |
/// | 1     | 2     | "Following"   | `Unfollow`   |
/// | 2     | 1     | "Follow back" | `FollowBack` |
/// | 3     | 3     | "Friends"     | disabled     |
pub fn evaluate(owner_status: u8, other_status: u8) -> RelationshipView {
    let (label, action) = match (owner_status, other_status) {
        (0, 0) => ("Follow".to_string(), Some(RelationshipAction::Follow)),
        (1, 2) => ("Following".to_string(), Some(RelationshipAction::Unfollow)),
        (2, 1) => (
            "Follow back".to_string(),
            Some(RelationshipAction::FollowBack),
        ),
        // Already friends. Unfriending is deliberately not offered here; the
        // mutator treats a toggle in this state as a no-op.
        (3, 3) => ("Friends".to_string(), None),
        (owner, other) => (format!("status {}/{}", owner, other), None),
    };
    RelationshipView { label, action }
}

/// Cell writes implied by a toggle, keyed on the owner's status alone
///
/// Returns `(new_owner_status, new_other_status)`, or `None` when the toggle
/// is a no-op (already friends, or an out-of-range code the mutator refuses
/// to touch).
pub fn transition(owner_status: u8) -> Option<(RelationshipStatus, RelationshipStatus)> {
    match owner_status {
        0 => Some((RelationshipStatus::Following, RelationshipStatus::FollowedBy)),
        1 => Some((RelationshipStatus::None, RelationshipStatus::None)),
        2 => Some((RelationshipStatus::Friends, RelationshipStatus::Friends)),
        _ => None,
    }
}

/// Aggregate follower/following/friend counts for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationshipCounts {
    /// Cells with status 1
    pub following: u32,

    /// Cells with status 2
    pub followers: u32,

    /// Cells with status 3
    pub friends: u32,
}

impl RelationshipCounts {
    /// Tally counts over a user's cell statuses
    ///
    /// Statuses 0 and out-of-range codes contribute to no bucket.
    pub fn tally<I: IntoIterator<Item = u8>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                1 => counts.following += 1,
                2 => counts.followers += 1,
                3 => counts.friends += 1,
                _ => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_roundtrip() {
        for code in 0..=3 {
            let status = RelationshipStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(RelationshipStatus::from_code(4), None);
        assert_eq!(RelationshipStatus::from_code(255), None);
    }

    #[test]
    fn test_evaluate_reachable_states() {
        let view = evaluate(0, 0);
        assert_eq!(view.label, "Follow");
        assert_eq!(view.action, Some(RelationshipAction::Follow));

        let view = evaluate(1, 2);
        assert_eq!(view.label, "Following");
        assert_eq!(view.action, Some(RelationshipAction::Unfollow));

        let view = evaluate(2, 1);
        assert_eq!(view.label, "Follow back");
        assert_eq!(view.action, Some(RelationshipAction::FollowBack));

        let view = evaluate(3, 3);
        assert_eq!(view.label, "Friends");
        assert_eq!(view.action, None);
    }

    #[test]
    fn test_evaluate_unreachable_states_disable_action() {
        // Every pair in {0..3}² outside the transition table renders raw
        // codes with the action disabled.
        for owner in 0..=3u8 {
            for other in 0..=3u8 {
                let reachable = matches!((owner, other), (0, 0) | (1, 2) | (2, 1) | (3, 3));
                let view = evaluate(owner, other);
                if !reachable {
                    assert_eq!(view.action, None, "({}, {})", owner, other);
                    assert_eq!(view.label, format!("status {}/{}", owner, other));
                }
            }
        }
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            transition(0),
            Some((RelationshipStatus::Following, RelationshipStatus::FollowedBy))
        );
        assert_eq!(
            transition(1),
            Some((RelationshipStatus::None, RelationshipStatus::None))
        );
        assert_eq!(
            transition(2),
            Some((RelationshipStatus::Friends, RelationshipStatus::Friends))
        );
        assert_eq!(transition(3), None);
        assert_eq!(transition(200), None);
    }

    #[test]
    fn test_counts_tally() {
        let counts = RelationshipCounts::tally([1, 1, 2, 3, 3]);
        assert_eq!(counts.following, 2);
        assert_eq!(counts.followers, 1);
        assert_eq!(counts.friends, 2);
    }

    #[test]
    fn test_counts_ignore_none_and_garbage() {
        let counts = RelationshipCounts::tally([0, 0, 7, 255, 1]);
        assert_eq!(counts.following, 1);
        assert_eq!(counts.followers, 0);
        assert_eq!(counts.friends, 0);
    }

    #[test]
    fn test_cell_serde_shape() {
        let cell = RelationshipCell::new(RelationshipStatus::Friends);
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json, serde_json::json!({ "status": 3 }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the evaluator is total over all raw code pairs
        #[test]
        fn test_evaluate_never_panics(owner: u8, other: u8) {
            let view = evaluate(owner, other);
            prop_assert!(!view.label.is_empty());
        }

        /// Property: an action is offered only for the four reachable pairs
        #[test]
        fn test_action_only_for_reachable_pairs(owner: u8, other: u8) {
            let view = evaluate(owner, other);
            let reachable = matches!((owner, other), (0, 0) | (1, 2) | (2, 1) | (3, 3));
            prop_assert_eq!(view.action.is_some(), reachable && (owner, other) != (3, 3));
        }

        /// Property: transitions never leave the 0..=3 status range
        #[test]
        fn test_transition_stays_in_range(owner: u8) {
            if let Some((new_owner, new_other)) = transition(owner) {
                prop_assert!(new_owner.code() <= 3);
                prop_assert!(new_other.code() <= 3);
            }
        }
    }
}
