//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use pointmap::config::{config_file_path, ConfigFile};
use pointmap::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Path of the config file in use: `--config` if given, else the default.
pub fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Load the config file. A missing file yields defaults.
pub fn load_config(cli_path: Option<&Path>) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(&resolve_config_path(cli_path))?)
}

/// Start file and stderr logging as configured in `[logging]`.
pub fn start_logging(config: &ConfigFile) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

/// Data file to read: the command line argument takes precedence over
/// `[map] data_file`.
pub fn resolve_data_file(cli_file: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    cli_file.unwrap_or_else(|| config.map.data_file.clone())
}
