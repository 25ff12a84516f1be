//! Relationship commands: follow toggle, listing, counts, suggestions.

use super::parse_user;
use crate::cli::{FollowArgs, FriendsArgs};
use crate::error::Result;
use crate::output::Formatter;
use campusnet_sdk::CampusClient;

/// Execute the follow command (toggles the relationship).
pub async fn execute_follow(
    args: FollowArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let other = parse_user(&args.user)?;
    let state = client.toggle_relationship(&other).await?;

    println!(
        "{}",
        formatter.success(&format!(
            "Relationship is now '{}' ({}/{})",
            state.view.label, state.owner_status, state.other_status
        ))
    );
    Ok(())
}

/// Execute the friends listing command.
pub async fn execute_friends(
    args: FriendsArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let status = args.tab.map(|tab| tab.status());
    let summaries = client.relationships(status).await?;
    println!("{}", formatter.format_relationships(&summaries)?);
    Ok(())
}

/// Execute the counts command.
pub async fn execute_counts(client: &mut CampusClient, formatter: &Formatter) -> Result<()> {
    let counts = client.counts().await?;
    println!("{}", formatter.format_counts(&counts)?);
    Ok(())
}

/// Execute the suggestions command.
pub async fn execute_suggestions(client: &mut CampusClient, formatter: &Formatter) -> Result<()> {
    let suggestions = client.suggestions().await?;
    println!("{}", formatter.format_relationships(&suggestions)?);
    Ok(())
}
