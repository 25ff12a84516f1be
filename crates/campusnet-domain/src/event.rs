//! Campus events, stored at `Events/{organizer}/{event}`.

use crate::ids::{EventId, UserId};
use serde::{Deserialize, Serialize};

/// An event document shown in the home carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event id
    pub event_id: EventId,

    /// Organizing user
    pub organizer_id: UserId,

    /// Event title
    pub title: String,

    /// Banner image URL
    #[serde(default)]
    pub image_url: String,

    /// Venue
    #[serde(default)]
    pub location: String,

    /// Start time, milliseconds since the Unix epoch
    pub starts_at: u64,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,
}
