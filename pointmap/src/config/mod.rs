//! User configuration
//!
//! Settings are read from `~/.pointmap/config.ini` (INI format). Every key is
//! optional; anything missing falls back to the built-in defaults.
//!
//! ```ini
//! [map]
//! data_file = map.geojson
//! zoom = 10
//!
//! [tap]
//! touch_target = 44
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, LoggingSettings, MapSettings, TapSettings, ViewportSettings, DEFAULT_DATA_FILE,
    DEFAULT_LOG_DIR, DEFAULT_LOG_FILE, DEFAULT_STYLE_URL,
};
