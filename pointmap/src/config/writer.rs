//! INI serialization for converting `ConfigFile` into the commented text
//! written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[map]
; GeoJSON FeatureCollection of named, colored points
data_file = {}
; Base map style
style_url = {}
; Initial camera position
center_lat = {}
center_lon = {}
; Initial zoom level (0-22)
zoom = {}
; Show base map labels in the device language (true/false)
localize_labels = {}

[viewport]
; Viewport size in logical pixels
width = {}
height = {}

[tap]
; Side of the square region searched around a tap that hits nothing, in pixels
touch_target = {}

[logging]
; Directory for log files
directory = {}
; Log file name
file = {}
"#,
        path_to_string(&config.map.data_file),
        config.map.style_url,
        config.map.center_lat,
        config.map.center_lon,
        config.map.zoom,
        config.map.localize_labels,
        config.viewport.width,
        config.viewport.height,
        config.tap.touch_target,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Convert a path to string, using `~` for the home directory.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_string_has_all_sections() {
        let content = to_config_string(&ConfigFile::default());
        for section in ["[map]", "[viewport]", "[tap]", "[logging]"] {
            assert!(content.contains(section), "missing {section}");
        }
        assert!(content.contains("data_file = map.geojson"));
        assert!(content.contains("touch_target = 44"));
        assert!(content.contains("localize_labels = true"));
    }

    #[test]
    fn test_home_paths_use_tilde() {
        if let Some(home) = dirs::home_dir() {
            let mut config = ConfigFile::default();
            config.logging.directory = home.join(".pointmap").join("logs");
            let content = to_config_string(&config);
            assert!(content.contains("directory = ~/.pointmap/logs"));
        }
    }
}
