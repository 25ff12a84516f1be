//! Profile show, setup, and search.

use super::parse_user;
use crate::cli::{ProfileShowArgs, SearchArgs, SetupArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use campusnet_domain::api::ProfileUpdate;
use campusnet_sdk::CampusClient;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileShowArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let user = match args.user {
        Some(raw) => parse_user(&raw)?,
        None => client.user_id().ok_or(CliError::NotLoggedIn)?,
    };

    let profile = client.profile(&user).await?;
    println!("{}", formatter.format_profile(&profile)?);
    Ok(())
}

/// Execute the setup command.
pub async fn execute_setup(
    args: SetupArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let update = ProfileUpdate {
        display_name: args.name,
        avatar_url: args.avatar,
        bio: args.bio,
        gender: args.gender,
        birthday: args.birthday,
        department_id: args.department,
        major_id: args.major,
        class_id: args.class,
    };

    let profile = client.update_profile(&update).await?;
    println!("{}", formatter.success("Profile updated"));
    println!("{}", formatter.format_profile(&profile)?);
    Ok(())
}

/// Execute the search command.
pub async fn execute_search(
    args: SearchArgs,
    client: &mut CampusClient,
    formatter: &Formatter,
) -> Result<()> {
    let profiles = client.search_profiles(&args.query).await?;
    println!("{}", formatter.format_profiles(&profiles)?);
    Ok(())
}
