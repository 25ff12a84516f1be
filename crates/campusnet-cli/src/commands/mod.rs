//! Command implementations.

pub mod auth;
pub mod events;
pub mod friends;
pub mod notify;
pub mod posts;
pub mod profile;

pub use self::auth::{execute_login, execute_register, execute_whoami};
pub use self::events::execute_events;
pub use self::friends::{
    execute_counts, execute_follow, execute_friends, execute_suggestions,
};
pub use self::notify::execute_notify;
pub use self::posts::{
    execute_comment, execute_feed, execute_like, execute_post, execute_reply, execute_thread,
};
pub use self::profile::{execute_profile, execute_search, execute_setup};

use crate::error::{CliError, Result};
use campusnet_domain::ids::{AnnouncementId, CommentId, PostId, UserId};

pub(crate) fn parse_user(raw: &str) -> Result<UserId> {
    UserId::from_string(raw).map_err(CliError::InvalidInput)
}

pub(crate) fn parse_post(raw: &str) -> Result<PostId> {
    PostId::from_string(raw).map_err(CliError::InvalidInput)
}

pub(crate) fn parse_comment(raw: &str) -> Result<CommentId> {
    CommentId::from_string(raw).map_err(CliError::InvalidInput)
}

pub(crate) fn parse_announcement(raw: &str) -> Result<AnnouncementId> {
    AnnouncementId::from_string(raw).map_err(CliError::InvalidInput)
}
