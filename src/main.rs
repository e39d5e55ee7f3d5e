//! berth CLI - A personal tracker for locally scaffolded projects.

use berth::action_log;
use berth::cli::{Cli, Commands, ConfigCommands};
use berth::commands::{self, Output};
use clap::Parser;
use std::path::Path;
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let data_dir = match cli.data_dir {
        Some(path) => path,
        None => match berth::default_data_dir() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    };

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    let start = Instant::now();
    let result = run_command(cli.command, &data_dir, json);
    let duration = start.elapsed().as_millis() as u64;

    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Best effort; logging never breaks the command itself
    action_log::log_action(&data_dir, &cmd_name, args_json, success, error, duration);

    if let Err(e) = result {
        if json {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

fn run_command(command: Option<Commands>, data_dir: &Path, json: bool) -> Result<(), berth::Error> {
    match command {
        Some(Commands::Init {
            name,
            kind,
            path,
            remote,
        }) => {
            let result = commands::init(data_dir, &name, kind, path, remote)?;
            output(&result, json);
        }
        // Default: show what berth is tracking
        Some(Commands::Status) | None => {
            let result = commands::status(data_dir)?;
            output(&result, json);
        }
        Some(Commands::Backup { name }) => {
            let result = commands::backup(data_dir, &name)?;
            output(&result, json);
        }
        Some(Commands::Remove { name }) => {
            let result = commands::remove(data_dir, &name)?;
            output(&result, json);
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                let result = commands::config_get(data_dir, &key)?;
                output(&result, json);
            }
            ConfigCommands::Set { key, value } => {
                let result = commands::config_set(data_dir, &key, &value)?;
                output(&result, json);
            }
            ConfigCommands::List => {
                let result = commands::config_list(data_dir)?;
                output(&result, json);
            }
        },
        Some(Commands::Log { limit }) => {
            let result = commands::log(data_dir, limit)?;
            output(&result, json);
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}

/// Build the (command name, arguments) pair recorded in the action log.
fn serialize_command(command: &Option<Commands>) -> (String, serde_json::Value) {
    match command {
        Some(Commands::Init {
            name,
            kind,
            path,
            remote,
        }) => (
            "init".to_string(),
            serde_json::json!({ "name": name, "type": kind, "path": path, "remote": remote }),
        ),

        Some(Commands::Status) | None => ("status".to_string(), serde_json::json!({})),

        Some(Commands::Backup { name }) => {
            ("backup".to_string(), serde_json::json!({ "name": name }))
        }

        Some(Commands::Remove { name }) => {
            ("remove".to_string(), serde_json::json!({ "name": name }))
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => {
                ("config get".to_string(), serde_json::json!({ "key": key }))
            }
            ConfigCommands::Set { key, value } => {
                // Keyed by the real config key so credential-looking keys
                // get their values redacted in the log
                let mut args = serde_json::Map::new();
                args.insert(key.clone(), serde_json::Value::String(value.clone()));
                ("config set".to_string(), serde_json::Value::Object(args))
            }
            ConfigCommands::List => ("config list".to_string(), serde_json::json!({})),
        },

        Some(Commands::Log { limit }) => ("log".to_string(), serde_json::json!({ "limit": limit })),
    }
}
