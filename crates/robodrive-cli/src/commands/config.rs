//! Configuration commands

use anyhow::Result;
use robodrive_core::ControllerConfig;
use std::path::Path;
use tracing::info;

use crate::commands::{ConfigCommands, ConfigFormat};
use crate::error::{CliError, read_input};
use crate::output;

/// Execute config command
pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => show_config(*format, json),
        ConfigCommands::Validate { path } => validate_config(path, json),
    }
}

/// Read a controller config, choosing the parser by file extension.
///
/// `.yaml` and `.yml` are parsed as YAML, anything else as JSON. The result
/// is validated before it is returned.
pub fn load_config(path: &Path) -> Result<ControllerConfig, CliError> {
    let content = read_input(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config: ControllerConfig = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    config.validate()?;

    info!(path = %path.display(), "Loaded controller config");
    Ok(config)
}

fn show_config(format: ConfigFormat, json: bool) -> Result<()> {
    let config = ControllerConfig::default();
    // --json wins over --format.
    if json || format == ConfigFormat::Json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", serde_yaml::to_string(&config)?);
    }
    Ok(())
}

fn validate_config(path: &Path, json: bool) -> Result<()> {
    load_config(path)?;
    output::print_success(&format!("Configuration {} is valid", path.display()), json);
    Ok(())
}
