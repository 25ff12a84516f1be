//! CampusNet CLI - command-line client for the campus social service.

use campusnet_cli::{commands, repl, Cli, CliError, Command, Config, Formatter};
use campusnet_domain::ids::UserId;
use campusnet_sdk::CampusClient;
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> campusnet_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }

    // Determine output format and color
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let mut client = CampusClient::new(&config.server_url);

    match cli.command {
        Some(Command::Register(args)) => {
            commands::execute_register(args, &mut client, &mut config, &formatter).await?;
        }
        Some(Command::Login(args)) => {
            commands::execute_login(args, &mut client, &mut config, &formatter).await?;
        }
        Some(Command::Whoami) => {
            commands::execute_whoami(&config, &formatter)?;
        }
        None | Some(Command::Repl) => {
            restore_session(&mut client, &config)?;
            repl::run_repl(&mut client, &mut config, &formatter).await?;
        }
        Some(cmd) => {
            // Commands that require a session
            restore_session(&mut client, &config)?;

            match cmd {
                Command::Profile(args) => {
                    commands::execute_profile(args, &mut client, &formatter).await?;
                }
                Command::Setup(args) => {
                    commands::execute_setup(args, &mut client, &formatter).await?;
                }
                Command::Search(args) => {
                    commands::execute_search(args, &mut client, &formatter).await?;
                }
                Command::Follow(args) => {
                    commands::execute_follow(args, &mut client, &formatter).await?;
                }
                Command::Friends(args) => {
                    commands::execute_friends(args, &mut client, &formatter).await?;
                }
                Command::Counts => {
                    commands::execute_counts(&mut client, &formatter).await?;
                }
                Command::Suggestions => {
                    commands::execute_suggestions(&mut client, &formatter).await?;
                }
                Command::Feed => {
                    commands::execute_feed(&mut client, &formatter).await?;
                }
                Command::Post(args) => {
                    commands::execute_post(args, &mut client, &formatter).await?;
                }
                Command::Thread(args) => {
                    commands::execute_thread(args, &mut client, &formatter).await?;
                }
                Command::Comment(args) => {
                    commands::execute_comment(args, &mut client, &formatter).await?;
                }
                Command::Reply(args) => {
                    commands::execute_reply(args, &mut client, &formatter).await?;
                }
                Command::Like(args) => {
                    commands::execute_like(args, &mut client, &formatter).await?;
                }
                Command::Notify(subcommand) => {
                    commands::execute_notify(subcommand, &mut client, &formatter).await?;
                }
                Command::Events => {
                    commands::execute_events(&mut client, &formatter).await?;
                }
                _ => unreachable!(),
            }
        }
    }

    Ok(())
}

fn restore_session(client: &mut CampusClient, config: &Config) -> campusnet_cli::Result<()> {
    let session = config.session.as_ref().ok_or(CliError::NotLoggedIn)?;
    let user_id = UserId::from_string(&session.user_id).map_err(CliError::Config)?;
    client.restore_session(session.token.clone(), user_id);
    Ok(())
}
