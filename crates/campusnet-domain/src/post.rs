//! Posts, comments, and replies.
//!
//! Stored at `Posts/{author}/{post}`, `Comments/{author}/{post}/{comment}`,
//! and `Replies/{author}/{post}/{comment}/{reply}`. Like flags live under a
//! parallel `Likes/...` subtree keyed by the liking user; the counters here
//! are denormalized into the content documents and updated in the same
//! commit as the flag.

use crate::ids::{CommentId, PostId, ReplyId, UserId};
use serde::{Deserialize, Serialize};

/// A post document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post id (UUIDv7, creation-ordered)
    pub post_id: PostId,

    /// Author
    pub author_id: UserId,

    /// Body text
    pub content: String,

    /// Attached image URL, empty when none
    #[serde(default)]
    pub image_url: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,

    /// Denormalized like counter
    #[serde(default)]
    pub like_count: u32,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id
    pub comment_id: CommentId,

    /// Commenting user
    pub author_id: UserId,

    /// Body text
    pub content: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,

    /// Denormalized like counter
    #[serde(default)]
    pub like_count: u32,
}

/// A reply within a comment thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Reply id
    pub reply_id: ReplyId,

    /// Replying user
    pub author_id: UserId,

    /// User this reply tags, when replying to a specific person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_user_id: Option<UserId>,

    /// Body text
    pub content: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,

    /// Denormalized like counter
    #[serde(default)]
    pub like_count: u32,
}

/// Stored payload of a like flag document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LikeMark {
    /// Whether the user currently likes the target
    pub liked: bool,
}

/// A comment with its replies, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentThread {
    /// The comment itself
    pub comment: Comment,

    /// Replies under the comment
    pub replies: Vec<Reply>,
}
