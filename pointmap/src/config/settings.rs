//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::coord::{self, CoordError, GeoCoord};
use crate::headless::{self, Camera};
use crate::resolver::TOUCH_TARGET_SIZE;

/// Default bundled data file.
pub const DEFAULT_DATA_FILE: &str = "map.geojson";

/// Default base map style.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/streets-v10";

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "pointmap.log";

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Map and data settings
    pub map: MapSettings,
    /// Viewport settings for headless rendering
    pub viewport: ViewportSettings,
    /// Tap handling settings
    pub tap: TapSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Map configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// GeoJSON file with the point features
    pub data_file: PathBuf,
    /// Base map style URL. Handed to a map SDK binding; the headless
    /// renderer draws no base map.
    pub style_url: String,
    /// Initial camera latitude
    pub center_lat: f64,
    /// Initial camera longitude
    pub center_lon: f64,
    /// Initial zoom level
    pub zoom: f64,
    /// Show base map labels in the device language. Handed to a map SDK
    /// binding along with `style_url`.
    pub localize_labels: bool,
}

/// Viewport configuration, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
}

/// Tap configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TapSettings {
    /// Side of the square fallback region around a tap, in pixels
    pub touch_target: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapSettings {
                data_file: PathBuf::from(DEFAULT_DATA_FILE),
                style_url: DEFAULT_STYLE_URL.to_string(),
                center_lat: headless::DEFAULT_CENTER.lat,
                center_lon: headless::DEFAULT_CENTER.lon,
                zoom: headless::DEFAULT_ZOOM,
                localize_labels: true,
            },
            viewport: ViewportSettings {
                width: headless::DEFAULT_VIEWPORT_WIDTH,
                height: headless::DEFAULT_VIEWPORT_HEIGHT,
            },
            tap: TapSettings {
                touch_target: TOUCH_TARGET_SIZE,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIR),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}

impl ConfigFile {
    /// Initial camera described by the `[map]` and `[viewport]` sections.
    pub fn camera(&self) -> Result<Camera, CoordError> {
        coord::validate_zoom(self.map.zoom)?;
        Ok(Camera {
            center: GeoCoord::new(self.map.center_lat, self.map.center_lon)?,
            zoom: self.map.zoom,
            width: self.viewport.width,
            height: self.viewport.height,
        })
    }
}
