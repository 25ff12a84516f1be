//! Event listing.

use crate::error::Result;
use crate::output::Formatter;
use campusnet_sdk::CampusClient;

/// Execute the events command.
pub async fn execute_events(client: &mut CampusClient, formatter: &Formatter) -> Result<()> {
    let events = client.events().await?;
    println!("{}", formatter.format_events(&events)?);
    Ok(())
}
