use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::application::services::{ConfigService, LogLevel};
use crate::presentation::commands::{self, CalculateRequest};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use propcheck_infrastructure::logging::{init_logger, LoggingOptions};

#[derive(Parser, Debug)]
#[command(name = "propcheck", author, version, about = "Prop-firm challenge consistency calculator", long_about = None)]
pub struct Cli {
    /// Where history, config and logs are kept [default: <data dir>/propcheck]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a daily P&L series and save it to history
    Calculate(CalculateArgs),
    /// Browse and manage saved sessions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Write a plain-text report for a saved session
    Report {
        id: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the report instead of writing a file
        #[arg(long, conflicts_with = "output")]
        print: bool,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Version, data and log directories
    Info,
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    #[arg(long)]
    pub account_size: Option<String>,
    /// Profit target in percent of the account size
    #[arg(long)]
    pub profit_target: Option<String>,
    /// Largest share of total profit one day may hold, in percent
    #[arg(long)]
    pub consistency_rule: Option<String>,
    /// One value per day, in order; "" marks a day not entered yet
    #[arg(long = "profit", allow_hyphen_values = true, num_args = 1..)]
    pub profits: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Saved sessions, newest first
    List,
    Show { id: String },
    /// Restore a session's inputs and results
    Load { id: String },
    Delete { id: String },
    Clear,
    Export { path: PathBuf },
    /// Merge sessions from an export file
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Show,
    SetLogLevel {
        level: String,
    },
    /// `sqlite` or `file`; takes effect on the next run
    SetBackend {
        backend: String,
    },
    /// Defaults for calculate when a parameter is omitted
    SetDefaults {
        #[arg(long)]
        account_size: String,
        #[arg(long)]
        profit_target: String,
        #[arg(long)]
        consistency_rule: String,
    },
}

/// What a command prints on success
enum Output {
    Json(serde_json::Value),
    Text(String),
}

fn json<T: Serialize>(value: T) -> Result<Output, CommandError> {
    Ok(Output::Json(serde_json::to_value(value)?))
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(Output::Json(value)) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Ok(Output::Text(text)) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(code = err.code, error = %err, "Command failed");
            match serde_json::to_string_pretty(&err) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<Output, CommandError> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config = Arc::new(ConfigService::new(&data_dir)?);
    init_logging(&data_dir, config.get_log_level());
    config.log_load_report();

    let state = AppState::new(data_dir, config)
        .await
        .map_err(|e| CommandError::infrastructure(format!("Startup failed: {}", e)))?;

    dispatch(&state, cli.command).await
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, CommandError> {
    match flag {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|dir| dir.join("propcheck"))
            .ok_or_else(|| {
                CommandError::infrastructure("Cannot determine data directory, pass --data-dir")
            }),
    }
}

fn init_logging(data_dir: &std::path::Path, level: LogLevel) {
    let log_dir = data_dir.join("logs");
    let options = LoggingOptions {
        level: level.as_str().to_string(),
        ..LoggingOptions::new(log_dir)
    };

    if let Err(e) = init_logger(options) {
        eprintln!("Failed to initialize file logging: {}", e);
        eprintln!("Falling back to console logging only");

        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str())),
            )
            .with_target(true)
            .with_line_number(true)
            .try_init();
    }
}

async fn dispatch(state: &AppState, command: Command) -> Result<Output, CommandError> {
    match command {
        Command::Calculate(args) => json(
            commands::calculate(
                state,
                CalculateRequest {
                    account_size: args.account_size,
                    profit_target: args.profit_target,
                    consistency_rule: args.consistency_rule,
                    profits: args.profits,
                },
            )
            .await?,
        ),
        Command::History { action } => match action {
            HistoryAction::List => json(commands::list_sessions(state).await?),
            HistoryAction::Show { id } => json(commands::get_session(state, id).await?),
            HistoryAction::Load { id } => json(commands::load_session(state, id).await?),
            HistoryAction::Delete { id } => json(serde_json::json!({
                "deleted": commands::delete_session(state, id).await?
            })),
            HistoryAction::Clear => {
                commands::clear_history(state).await?;
                json(serde_json::json!({ "cleared": true }))
            }
            HistoryAction::Export { path } => {
                let count = commands::export_history(state, path.clone()).await?;
                json(serde_json::json!({ "path": path, "exported": count }))
            }
            HistoryAction::Import { path } => json(serde_json::json!({
                "imported": commands::import_history(state, path).await?
            })),
        },
        Command::Report { id, output, print } => {
            if print {
                Ok(Output::Text(commands::render_session_report(state, id).await?))
            } else {
                let path = commands::export_session_report(state, id, output).await?;
                json(serde_json::json!({ "path": path }))
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Show => json(commands::get_config(state).await?),
            ConfigAction::SetLogLevel { level } => {
                commands::set_log_level(state, level).await?;
                json(serde_json::json!({ "logLevel": commands::get_log_level(state).await? }))
            }
            ConfigAction::SetBackend { backend } => {
                commands::set_storage_backend(state, backend).await?;
                json(commands::get_config(state).await?)
            }
            ConfigAction::SetDefaults {
                account_size,
                profit_target,
                consistency_rule,
            } => json(
                commands::set_default_challenge(
                    state,
                    account_size,
                    profit_target,
                    consistency_rule,
                )
                .await?,
            ),
        },
        Command::Info => json(commands::get_app_info(state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_arguments() {
        let cli = Cli::try_parse_from([
            "propcheck",
            "--data-dir",
            "/tmp/pc",
            "calculate",
            "--account-size",
            "50000",
            "--profit",
            "1200",
            "-300",
            "",
            "900",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pc")));
        match cli.command {
            Command::Calculate(args) => {
                assert_eq!(args.account_size.as_deref(), Some("50000"));
                assert_eq!(args.profit_target, None);
                assert_eq!(args.profits, vec!["1200", "-300", "", "900"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_history_subcommands() {
        let cli = Cli::try_parse_from(["propcheck", "history", "delete", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::Delete { ref id }
            } if id == "abc"
        ));
    }

    #[test]
    fn test_report_print_conflicts_with_output() {
        let result =
            Cli::try_parse_from(["propcheck", "report", "abc", "--print", "--output", "r.txt"]);
        assert!(result.is_err());
    }
}
