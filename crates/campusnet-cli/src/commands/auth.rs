//! Register, login, and whoami.

use crate::cli::{LoginArgs, RegisterArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use campusnet_sdk::CampusClient;

/// Execute the register command.
pub async fn execute_register(
    args: RegisterArgs,
    client: &mut CampusClient,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    let session = client
        .register(&args.email, &args.password, &args.student_number)
        .await?;

    config.set_session(
        session.token.clone(),
        session.user_id.to_string(),
        args.email.clone(),
    );
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("Registered as {} ({})", args.email, session.user_id))
    );
    if !session.profile_complete {
        println!(
            "{}",
            formatter.info("Profile is incomplete - run 'campusnet setup --name \"...\"'")
        );
    }
    Ok(())
}

/// Execute the login command.
pub async fn execute_login(
    args: LoginArgs,
    client: &mut CampusClient,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    let session = client.login(&args.email, &args.password).await?;

    config.set_session(
        session.token.clone(),
        session.user_id.to_string(),
        args.email.clone(),
    );
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("Logged in as {}", args.email))
    );
    if !session.profile_complete {
        println!(
            "{}",
            formatter.info("Profile is incomplete - run 'campusnet setup --name \"...\"'")
        );
    }
    Ok(())
}

/// Execute the whoami command.
pub fn execute_whoami(config: &Config, formatter: &Formatter) -> Result<()> {
    match &config.session {
        Some(session) => {
            println!("{} ({})", session.email, session.user_id);
            Ok(())
        }
        None => {
            println!("{}", formatter.info("Not logged in"));
            Ok(())
        }
    }
}
