//! INI parsing for converting `Ini` into `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = non_empty(section, "data_file") {
            config.map.data_file = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "style_url") {
            config.map.style_url = v.to_string();
        }
        if let Some(v) = section.get("center_lat") {
            config.map.center_lat = parse_in_range("map", "center_lat", v, MIN_LAT, MAX_LAT)?;
        }
        if let Some(v) = section.get("center_lon") {
            config.map.center_lon = parse_in_range("map", "center_lon", v, MIN_LON, MAX_LON)?;
        }
        if let Some(v) = section.get("zoom") {
            config.map.zoom = parse_in_range("map", "zoom", v, MIN_ZOOM, MAX_ZOOM)?;
        }
        if let Some(v) = section.get("localize_labels") {
            config.map.localize_labels = parse_bool(v);
        }
    }

    // [viewport] section
    if let Some(section) = ini.section(Some("viewport")) {
        if let Some(v) = section.get("width") {
            config.viewport.width = parse_positive("viewport", "width", v)?;
        }
        if let Some(v) = section.get("height") {
            config.viewport.height = parse_positive("viewport", "height", v)?;
        }
    }

    // [tap] section
    if let Some(section) = ini.section(Some("tap")) {
        if let Some(v) = section.get("touch_target") {
            config.tap.touch_target = parse_positive("tap", "touch_target", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "directory") {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_in_range(
    section: &str,
    key: &str,
    value: &str,
    min: f64,
    max: f64,
) -> Result<f64, ConfigFileError> {
    let reason = || format!("must be a number between {} and {}", min, max);
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason()))?;
    if !(min..=max).contains(&parsed) {
        return Err(invalid(section, key, value, reason()));
    }
    Ok(parsed)
}

fn parse_positive(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(section, key, value, "must be a positive number")),
    }
}

pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_map_section_overrides() {
        let config = parse(
            "[map]\n\
             data_file = /tmp/points.geojson\n\
             style_url = mapbox://styles/mapbox/dark-v10\n\
             center_lat = 48.8566\n\
             center_lon = 2.3522\n\
             zoom = 12\n\
             localize_labels = no\n",
        )
        .unwrap();

        assert_eq!(config.map.data_file, PathBuf::from("/tmp/points.geojson"));
        assert_eq!(config.map.style_url, "mapbox://styles/mapbox/dark-v10");
        assert_eq!(config.map.center_lat, 48.8566);
        assert_eq!(config.map.center_lon, 2.3522);
        assert_eq!(config.map.zoom, 12.0);
        assert!(!config.map.localize_labels);
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = parse("[map]\ndata_file =\n[logging]\nfile =   \n").unwrap();
        assert_eq!(config.map.data_file, ConfigFile::default().map.data_file);
        assert_eq!(config.logging.file, ConfigFile::default().logging.file);
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let err = parse("[map]\ncenter_lat = 91\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, value, .. } => {
                assert_eq!(section, "map");
                assert_eq!(key, "center_lat");
                assert_eq!(value, "91");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_zoom_rejected() {
        assert!(matches!(
            parse("[map]\nzoom = far\n"),
            Err(ConfigFileError::InvalidValue { .. })
        ));
        assert!(parse("[map]\nzoom = 23\n").is_err());
    }

    #[test]
    fn test_touch_target_must_be_positive() {
        assert!(parse("[tap]\ntouch_target = 0\n").is_err());
        assert!(parse("[tap]\ntouch_target = -4\n").is_err());
        assert_eq!(
            parse("[tap]\ntouch_target = 32\n").unwrap().tap.touch_target,
            32.0
        );
    }

    #[test]
    fn test_viewport_section() {
        let config = parse("[viewport]\nwidth = 414\nheight = 896\n").unwrap();
        assert_eq!(config.viewport.width, 414.0);
        assert_eq!(config.viewport.height, 896.0);
        assert!(parse("[viewport]\nwidth = abc\n").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool(" Yes "));
        assert!(parse_bool("on"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("off"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/logs"), home.join("logs"));
        }
    }
}
