//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use campusnet_sdk::CampusClient;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(
    client: &mut CampusClient,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("CampusNet REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = match &config.session {
            Some(session) => format!("{}> ", session.email),
            None => "campusnet (not logged in)> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                if matches!(line, "exit" | "quit" | "q") {
                    println!("{}", formatter.info("Goodbye!"));
                    break;
                }
                if matches!(line, "help" | "?") {
                    print_help();
                    continue;
                }

                if let Err(e) = dispatch(line, client, formatter).await {
                    eprintln!("{}", formatter.error(&e.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

async fn dispatch(line: &str, client: &mut CampusClient, formatter: &Formatter) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts[0] {
        "feed" => commands::execute_feed(client, formatter).await,
        "counts" => commands::execute_counts(client, formatter).await,
        "suggestions" => commands::execute_suggestions(client, formatter).await,
        "events" => commands::execute_events(client, formatter).await,
        "friends" => {
            let tab = match parts.get(1) {
                None => None,
                Some(&"friends") => Some(crate::cli::FriendsTab::Friends),
                Some(&"requests") => Some(crate::cli::FriendsTab::Requests),
                Some(&"sent") => Some(crate::cli::FriendsTab::Sent),
                Some(other) => {
                    return Err(CliError::InvalidInput(format!(
                        "Unknown tab '{}'. Use friends, requests, or sent.",
                        other
                    )))
                }
            };
            commands::execute_friends(crate::cli::FriendsArgs { tab }, client, formatter).await
        }
        "follow" => {
            let user = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: follow <user-id>".to_string()))?;
            commands::execute_follow(
                crate::cli::FollowArgs {
                    user: user.to_string(),
                },
                client,
                formatter,
            )
            .await
        }
        "search" => {
            if parts.len() < 2 {
                return Err(CliError::InvalidInput("Usage: search <query>".to_string()));
            }
            commands::execute_search(
                crate::cli::SearchArgs {
                    query: parts[1..].join(" "),
                },
                client,
                formatter,
            )
            .await
        }
        "post" => {
            if parts.len() < 2 {
                return Err(CliError::InvalidInput("Usage: post <content>".to_string()));
            }
            commands::execute_post(
                crate::cli::PostArgs {
                    content: parts[1..].join(" "),
                    image: String::new(),
                },
                client,
                formatter,
            )
            .await
        }
        "notify" => {
            commands::execute_notify(crate::cli::NotifyCommand::List, client, formatter).await
        }
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  feed                       Show the home feed");
    println!("  post <content>             Publish a post");
    println!("  friends [friends|requests|sent]");
    println!("                             List relationships by tab");
    println!("  follow <user-id>           Toggle a relationship");
    println!("  counts                     Show follower/following/friend counts");
    println!("  suggestions                Friends-of-friends to follow");
    println!("  search <query>             Search users");
    println!("  notify                     List announcements");
    println!("  events                     List upcoming events");
    println!("  help                       Show this help");
    println!("  exit                       Quit the REPL");
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".campusnet").join("history"))
}
