//! robodrive - actuation controller CLI
//!
//! Replays recorded driving sessions through the controller and manages its
//! configuration files.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::ConfigCommands;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "robodrive")]
#[command(about = "Robodrive actuation controller - replay sessions and manage configuration")]
#[command(version)]
#[command(long_about = "
robodrive runs the per-tick actuation controller (steering and pedal smoothing,
automatic gearbox, auto-reverse, clutch and stuck detection) outside the
simulator. Recorded frames can be replayed to inspect the commands the
controller produces, and configuration files can be checked before use.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON Lines recording through the controller
    Replay {
        /// Recording with one {"intention": ..., "vehicle": ...} object per line
        #[arg(short, long)]
        frames: PathBuf,

        /// Controller config file (.yaml, .yml or .json)
        #[arg(short, long, env = "ROBODRIVE_CONFIG")]
        config: Option<PathBuf>,

        /// Track name to announce before the race starts
        #[arg(short, long)]
        track: Option<String>,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("robodrive={log_level},robodrive_core={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay {
            frames,
            config,
            track,
        } => commands::replay::execute(frames, config.as_deref(), track.as_deref(), cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.json),
    }
}
