//! Request and response types of the HTTP API.
//!
//! Shared between the server handlers and the client SDK so both sides
//! agree on the wire shapes.

use crate::announcement::{ActivityState, Announcement};
use crate::ids::UserId;
use crate::post::{CommentThread, Post};
use crate::relationship::{RelationshipCounts, RelationshipView};
use serde::{Deserialize, Serialize};

/// POST /auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Account email; must be unique
    pub email: String,

    /// Plaintext password, hashed server-side
    pub password: String,

    /// Campus-issued student number
    pub student_number: String,
}

/// POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Response to register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    /// Authenticated user
    pub user_id: UserId,

    /// False when the client should route to profile setup first
    pub profile_complete: bool,
}

/// PUT /profiles/me — all fields optional, absent fields keep current values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Free-text bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Self-reported gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Birthday, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,

    /// Department id from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,

    /// Major id from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_id: Option<String>,

    /// Class id from the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

/// One entry in GET /relationships
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipSummary {
    /// The counterpart user
    pub other_id: UserId,

    /// Counterpart's display name, when a profile exists
    #[serde(default)]
    pub display_name: String,

    /// Owner's cell status
    pub status: u8,

    /// Evaluated label and allowed action
    pub view: RelationshipView,
}

/// Response to POST /relationships/{other}/toggle and GET /relationships/{other}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipStateResponse {
    /// Caller's cell status after the operation
    pub owner_status: u8,

    /// Counterpart's cell status after the operation
    pub other_status: u8,

    /// Evaluated label and allowed action for the caller
    pub view: RelationshipView,
}

/// Response to GET /relationships/counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountsResponse {
    /// Tallied counts
    #[serde(flatten)]
    pub counts: RelationshipCounts,
}

/// POST /posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPostRequest {
    /// Body text
    pub content: String,

    /// Attached image URL
    #[serde(default)]
    pub image_url: String,
}

/// POST /posts/{author}/{post}/comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRequest {
    /// Body text
    pub content: String,
}

/// POST /posts/{author}/{post}/comments/{comment}/replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReplyRequest {
    /// Body text
    pub content: String,

    /// User the reply tags, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_user_id: Option<UserId>,
}

/// Response to the like-toggle endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeResponse {
    /// Whether the caller now likes the target
    pub liked: bool,

    /// Like count after the toggle
    pub like_count: u32,
}

/// One entry in GET /feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    /// The post
    pub post: Post,

    /// Author's display name, when a profile exists
    #[serde(default)]
    pub author_name: String,

    /// Number of comments on the post (replies not counted)
    pub comment_count: u32,

    /// Whether the caller likes the post
    pub liked_by_viewer: bool,
}

/// Response to GET /posts/{author}/{post}/thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    /// The post under discussion
    pub post: Post,

    /// Comments with nested replies, oldest first
    pub comments: Vec<CommentThread>,
}

/// POST /announcements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnouncementRequest {
    /// Headline
    pub title: String,

    /// Body text
    pub content: String,

    /// Audience filter; empty for everyone
    #[serde(default)]
    pub audience: String,
}

/// POST /events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEventRequest {
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
}

/// One entry in GET /announcements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementEntry {
    /// The announcement
    pub announcement: Announcement,

    /// Caller's read/pin state
    pub state: ActivityState,
}

/// Response to POST /announcements/{announcer}/{id}/pin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinResponse {
    /// Pin state after the toggle
    pub pinned: bool,
}
