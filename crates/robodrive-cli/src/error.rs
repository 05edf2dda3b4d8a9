//! Error types for the robodrive CLI

use robodrive_core::{BusError, ConfigError};
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid frame on line {line}: {reason}")]
    InvalidFrame { line: usize, reason: String },

    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound(_) => 2,
            Self::InvalidConfig(_) | Self::InvalidFrame { .. } | Self::JsonError(_) | Self::YamlError(_) => 4,
            Self::Bus(_) => 5,
            Self::IoError(_) => 1,
        }
    }
}

/// Read a whole input file. Only a missing file is reported as `FileNotFound`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CliError::FileNotFound(path.display().to_string()),
        _ => CliError::IoError(err),
    })
}
