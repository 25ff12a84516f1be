//! Campus announcements and per-user activity state.

use crate::ids::{AnnouncementId, UserId};
use serde::{Deserialize, Serialize};

/// An announcement document, stored at `Announcements/{announcer}/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Announcement id
    pub announcement_id: AnnouncementId,

    /// Announcing user
    pub announcer_id: UserId,

    /// Headline
    pub title: String,

    /// Body text
    pub content: String,

    /// Audience filter, e.g. a department or class id; empty for everyone
    #[serde(default)]
    pub audience: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,
}

/// Read marker, stored at `Activity/{user}/Reads/{announcement}`
///
/// Write-once: opening an announcement sets `read` to true and it stays true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadMark {
    /// Whether the user has opened the announcement
    pub read: bool,
}

/// Pin state, stored at `Activity/{user}/Pins/{announcement}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinMark {
    /// Whether the user has pinned the announcement
    pub pinned: bool,
}

/// A user's read/pin state for one announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityState {
    /// Read marker
    pub read: bool,

    /// Pin state
    pub pinned: bool,
}
