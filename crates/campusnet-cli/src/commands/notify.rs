//! Announcement commands: list, read, pin.

use super::{parse_announcement, parse_user};
use crate::cli::NotifyCommand;
use crate::error::Result;
use crate::output::Formatter;
use campusnet_sdk::CampusClient;

/// Execute a notify subcommand.
pub async fn execute_notify(
    command: NotifyCommand,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        NotifyCommand::List => {
            let entries = client.announcements().await?;
            println!("{}", formatter.format_announcements(&entries)?);
        }
        NotifyCommand::Read(args) => {
            let announcer = parse_user(&args.announcer)?;
            let id = parse_announcement(&args.id)?;

            // Opening the detail marks it read, as tapping the card did.
            client.mark_announcement_read(&announcer, &id).await?;
            let entry = client.announcement_detail(&announcer, &id).await?;

            println!("{}", entry.announcement.title);
            println!("{}", entry.announcement.content);
        }
        NotifyCommand::Pin(args) => {
            let announcer = parse_user(&args.announcer)?;
            let id = parse_announcement(&args.id)?;
            let pinned = client.toggle_announcement_pin(&announcer, &id).await?;

            let message = if pinned { "Pinned" } else { "Unpinned" };
            println!("{}", formatter.success(message));
        }
    }
    Ok(())
}
