//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// CampusNet CLI - Interact with the campus social service.
#[derive(Debug, Parser)]
#[command(name = "campusnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Server URL (overrides the configured one)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// Relationship listing tabs, mirroring the original client.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FriendsTab {
    /// Confirmed friends (status 3)
    Friends,
    /// Incoming follow requests (status 2)
    Requests,
    /// Follows the user initiated (status 1)
    Sent,
}

impl FriendsTab {
    /// The status code this tab filters on
    pub fn status(self) -> u8 {
        match self {
            FriendsTab::Sent => 1,
            FriendsTab::Requests => 2,
            FriendsTab::Friends => 3,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new account
    Register(RegisterArgs),

    /// Log in to an existing account
    Login(LoginArgs),

    /// Show the logged-in user
    Whoami,

    /// Show a profile (your own without arguments)
    Profile(ProfileShowArgs),

    /// Complete or update your profile
    Setup(SetupArgs),

    /// Search users by name or student number
    Search(SearchArgs),

    /// Toggle the relationship with a user (follow / unfollow / follow back)
    Follow(FollowArgs),

    /// List relationships by tab
    Friends(FriendsArgs),

    /// Show follower/following/friend counts
    Counts,

    /// Suggest friends-of-friends to follow
    Suggestions,

    /// Show the home feed
    Feed,

    /// Publish a post
    Post(PostArgs),

    /// Show a post with its comment thread
    Thread(ThreadArgs),

    /// Comment on a post
    Comment(CommentArgs),

    /// Reply under a comment
    Reply(ReplyArgs),

    /// Toggle a like on a post
    Like(ThreadArgs),

    /// Announcements: list, read, pin
    #[command(subcommand)]
    Notify(NotifyCommand),

    /// List upcoming events
    Events,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Account email
    pub email: String,

    /// Password
    #[arg(short, long)]
    pub password: String,

    /// Student number
    #[arg(short = 'n', long)]
    pub student_number: String,
}

/// Arguments for the login command.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    /// Password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for showing a profile.
#[derive(Debug, Parser)]
pub struct ProfileShowArgs {
    /// User id; defaults to the logged-in user
    pub user: Option<String>,
}

/// Arguments for profile setup.
#[derive(Debug, Parser)]
pub struct SetupArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Avatar URL
    #[arg(long)]
    pub avatar: Option<String>,

    /// Bio
    #[arg(long)]
    pub bio: Option<String>,

    /// Gender
    #[arg(long)]
    pub gender: Option<String>,

    /// Birthday (YYYY-MM-DD)
    #[arg(long)]
    pub birthday: Option<String>,

    /// Department id
    #[arg(long)]
    pub department: Option<String>,

    /// Major id
    #[arg(long)]
    pub major: Option<String>,

    /// Class id
    #[arg(long)]
    pub class: Option<String>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Name or student number fragment
    pub query: String,
}

/// Arguments for the follow command.
#[derive(Debug, Parser)]
pub struct FollowArgs {
    /// The other user's id
    pub user: String,
}

/// Arguments for the friends listing.
#[derive(Debug, Parser)]
pub struct FriendsArgs {
    /// Which tab to show; all cells when omitted
    #[arg(short, long, value_enum)]
    pub tab: Option<FriendsTab>,
}

/// Arguments for publishing a post.
#[derive(Debug, Parser)]
pub struct PostArgs {
    /// Post body
    pub content: String,

    /// Attached image URL
    #[arg(long, default_value = "")]
    pub image: String,
}

/// Arguments addressing a post.
#[derive(Debug, Parser)]
pub struct ThreadArgs {
    /// Post author's user id
    pub author: String,

    /// Post id
    pub post: String,
}

/// Arguments for commenting on a post.
#[derive(Debug, Parser)]
pub struct CommentArgs {
    /// Post author's user id
    pub author: String,

    /// Post id
    pub post: String,

    /// Comment body
    pub content: String,
}

/// Arguments for replying under a comment.
#[derive(Debug, Parser)]
pub struct ReplyArgs {
    /// Post author's user id
    pub author: String,

    /// Post id
    pub post: String,

    /// Comment id
    pub comment: String,

    /// Reply body
    pub content: String,

    /// Tag a user in the reply
    #[arg(long)]
    pub tag: Option<String>,
}

/// Announcement subcommands.
#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// List all announcements with read/pin state
    List,

    /// Open an announcement (marks it read)
    Read(NotifyArgs),

    /// Toggle the pin on an announcement
    Pin(NotifyArgs),
}

/// Arguments addressing one announcement.
#[derive(Debug, Parser)]
pub struct NotifyArgs {
    /// Announcer's user id
    pub announcer: String,

    /// Announcement id
    pub id: String,
}
