//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use campusnet_domain::api::{AnnouncementEntry, FeedEntry, RelationshipSummary, ThreadResponse};
use campusnet_domain::relationship::RelationshipCounts;
use campusnet_domain::{Event, Profile};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of profiles.
    pub fn format_profiles(&self, profiles: &[Profile]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(profiles)?),
            OutputFormat::Quiet => Ok(profiles
                .iter()
                .map(|p| p.user_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if profiles.is_empty() {
                    return Ok(self.colorize("No users found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["User", "Name", "Number", "Bio"]);
                for profile in profiles {
                    builder.push_record([
                        &profile.user_id.to_string()[..8],
                        &profile.display_name,
                        &profile.student_number,
                        &profile.bio,
                    ]);
                }
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format a single profile.
    pub fn format_profile(&self, profile: &Profile) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(profile)?),
            OutputFormat::Quiet => Ok(profile.user_id.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["User", &profile.user_id.to_string()]);
                builder.push_record(["Name", &profile.display_name]);
                builder.push_record(["Number", &profile.student_number]);
                builder.push_record(["Email", &profile.email]);
                builder.push_record(["Bio", &profile.bio]);
                builder.push_record(["Department", &profile.department_id]);
                builder.push_record(["Major", &profile.major_id]);
                builder.push_record(["Class", &profile.class_id]);
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format relationship summaries.
    pub fn format_relationships(&self, summaries: &[RelationshipSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| s.other_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summaries.is_empty() {
                    return Ok(self.colorize("No relationships.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["User", "Name", "Status", "Button"]);
                for summary in summaries {
                    builder.push_record([
                        &summary.other_id.to_string()[..8],
                        &summary.display_name,
                        &summary.status.to_string(),
                        &summary.view.label,
                    ]);
                }
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format relationship counts.
    pub fn format_counts(&self, counts: &RelationshipCounts) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(counts)?),
            OutputFormat::Quiet => Ok(format!(
                "{} {} {}",
                counts.following, counts.followers, counts.friends
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Following", "Followers", "Friends"]);
                builder.push_record([
                    &counts.following.to_string(),
                    &counts.followers.to_string(),
                    &counts.friends.to_string(),
                ]);
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format the home feed.
    pub fn format_feed(&self, entries: &[FeedEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.post.post_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("The feed is empty.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Post", "Author", "Content", "Likes", "Comments", "Age"]);
                for entry in entries {
                    let liked = if entry.liked_by_viewer { "♥ " } else { "" };
                    builder.push_record([
                        &entry.post.post_id.to_string()[..8],
                        &entry.author_name,
                        &truncate(&entry.post.content, 40),
                        &format!("{}{}", liked, entry.post.like_count),
                        &entry.comment_count.to_string(),
                        &format_age(entry.post.created_at),
                    ]);
                }
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format a post with its comment thread.
    pub fn format_thread(&self, thread: &ThreadResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(thread)?),
            OutputFormat::Quiet => Ok(thread.post.post_id.to_string()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&format!(
                    "{} ({} likes, {})\n",
                    thread.post.content,
                    thread.post.like_count,
                    format_age(thread.post.created_at)
                ));
                for comment_thread in &thread.comments {
                    out.push_str(&format!(
                        "  [{}] {} ({} likes)\n",
                        &comment_thread.comment.comment_id.to_string()[..8],
                        comment_thread.comment.content,
                        comment_thread.comment.like_count
                    ));
                    for reply in &comment_thread.replies {
                        out.push_str(&format!(
                            "      [{}] {} ({} likes)\n",
                            &reply.reply_id.to_string()[..8],
                            reply.content,
                            reply.like_count
                        ));
                    }
                }
                if thread.comments.is_empty() {
                    out.push_str(&self.colorize("  No comments yet.", "yellow"));
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    /// Format announcements with read/pin state.
    pub fn format_announcements(&self, entries: &[AnnouncementEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.announcement.announcement_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No announcements.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Id", "Announcer", "Title", "State", "Age"]);
                for entry in entries {
                    let mut state = String::new();
                    state.push_str(if entry.state.read { "read" } else { "unread" });
                    if entry.state.pinned {
                        state.push_str(", pinned");
                    }
                    builder.push_record([
                        &entry.announcement.announcement_id.to_string()[..8],
                        &entry.announcement.announcer_id.to_string()[..8],
                        &entry.announcement.title,
                        &state,
                        &format_age(entry.announcement.created_at),
                    ]);
                }
                Ok(self.style_table(builder))
            }
        }
    }

    /// Format the events listing.
    pub fn format_events(&self, events: &[Event]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
            OutputFormat::Quiet => Ok(events
                .iter()
                .map(|e| e.event_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if events.is_empty() {
                    return Ok(self.colorize("No upcoming events.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Id", "Title", "Location"]);
                for event in events {
                    builder.push_record([
                        &event.event_id.to_string()[..8],
                        &event.title,
                        &event.location,
                    ]);
                }
                Ok(self.style_table(builder))
            }
        }
    }

    fn style_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{}…", truncated)
    }
}

/// Render an epoch-millisecond timestamp as a relative age.
pub fn format_age(created_at: u64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let elapsed_secs = now.saturating_sub(created_at) / 1000;

    if elapsed_secs < 60 {
        "just now".to_string()
    } else if elapsed_secs < 3600 {
        format!("{}m ago", elapsed_secs / 60)
    } else if elapsed_secs < 86_400 {
        format!("{}h ago", elapsed_secs / 3600)
    } else {
        format!("{}d ago", elapsed_secs / 86_400)
    }
}
