//! User profile documents, stored at `Profiles/{userId}`.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A user's profile document
///
/// Registration writes a skeleton with an empty display name; the client is
/// expected to route such users through profile setup before the rest of the
/// app. `is_complete` is that routing predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: UserId,

    /// Display name; empty until profile setup completes
    #[serde(default)]
    pub display_name: String,

    /// Campus-issued student number
    #[serde(default)]
    pub student_number: String,

    /// Contact email (duplicated from the account for display)
    #[serde(default)]
    pub email: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: String,

    /// Free-text bio
    #[serde(default)]
    pub bio: String,

    /// Self-reported gender
    #[serde(default)]
    pub gender: String,

    /// Birthday, `YYYY-MM-DD`
    #[serde(default)]
    pub birthday: String,

    /// Department in the campus directory
    #[serde(default)]
    pub department_id: String,

    /// Major within the department
    #[serde(default)]
    pub major_id: String,

    /// Class within the major
    #[serde(default)]
    pub class_id: String,

    /// Presence flag
    #[serde(default)]
    pub online: bool,
}

impl Profile {
    /// Skeleton profile created at registration
    pub fn skeleton(user_id: UserId, email: String, student_number: String) -> Self {
        Self {
            user_id,
            display_name: String::new(),
            student_number,
            email,
            avatar_url: String::new(),
            bio: String::new(),
            gender: String::new(),
            birthday: String::new(),
            department_id: String::new(),
            major_id: String::new(),
            class_id: String::new(),
            online: false,
        }
    }

    /// Whether profile setup has been completed
    pub fn is_complete(&self) -> bool {
        !self.display_name.trim().is_empty()
    }

    /// Case-insensitive match against display name or student number
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.display_name.to_lowercase().contains(&query)
            || self.student_number.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_is_incomplete() {
        let profile = Profile::skeleton(UserId::new(), "a@campus.edu".into(), "20251234".into());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_whitespace_name_is_incomplete() {
        let mut profile = Profile::skeleton(UserId::new(), "a@campus.edu".into(), "1".into());
        profile.display_name = "   ".to_string();
        assert!(!profile.is_complete());

        profile.display_name = "An Nguyen".to_string();
        assert!(profile.is_complete());
    }

    #[test]
    fn test_matches_name_and_number() {
        let mut profile = Profile::skeleton(UserId::new(), "a@campus.edu".into(), "20251234".into());
        profile.display_name = "An Nguyen".to_string();

        assert!(profile.matches("nguyen"));
        assert!(profile.matches("2025"));
        assert!(profile.matches(""));
        assert!(!profile.matches("tran"));
    }
}
