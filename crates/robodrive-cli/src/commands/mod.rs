//! Command implementations for the robodrive CLI

pub mod config;
pub mod replay;

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the default controller configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },

    /// Load and validate a configuration file
    Validate {
        /// Config file path (.yaml, .yml or .json)
        path: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}
