//! Configuration CLI commands.
//!
//! Provides `config list` and `config path` for inspecting settings.

use std::path::Path;

use clap::Subcommand;
use pointmap::config::ConfigFile;

use super::common::{load_config, resolve_config_path};
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommands::List => {
            let config = load_config(config_path)?;
            for line in settings_lines(&config) {
                println!("{}", line);
            }
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", resolve_config_path(config_path).display());
            Ok(())
        }
    }
}

/// Effective settings grouped by section.
fn settings_lines(config: &ConfigFile) -> Vec<String> {
    let sections: [(&str, Vec<(&str, String)>); 4] = [
        (
            "map",
            vec![
                ("data_file", config.map.data_file.display().to_string()),
                ("style_url", config.map.style_url.clone()),
                ("center_lat", config.map.center_lat.to_string()),
                ("center_lon", config.map.center_lon.to_string()),
                ("zoom", config.map.zoom.to_string()),
                ("localize_labels", config.map.localize_labels.to_string()),
            ],
        ),
        (
            "viewport",
            vec![
                ("width", config.viewport.width.to_string()),
                ("height", config.viewport.height.to_string()),
            ],
        ),
        (
            "tap",
            vec![("touch_target", config.tap.touch_target.to_string())],
        ),
        (
            "logging",
            vec![
                ("directory", config.logging.directory.display().to_string()),
                ("file", config.logging.file.clone()),
            ],
        ),
    ];

    let mut lines = vec![
        "Configuration Settings".to_string(),
        "======================".to_string(),
    ];
    for (section, keys) in sections {
        lines.push(String::new());
        lines.push(format!("[{}]", section));
        for (key, value) in keys {
            lines.push(format!("  {} = {}", key, value));
        }
    }
    lines
}
