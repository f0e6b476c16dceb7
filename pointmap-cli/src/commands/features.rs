//! `pointmap features`: list the features in a GeoJSON file.

use std::path::PathBuf;

use clap::Args;
use pointmap::config::ConfigFile;
use pointmap::feature::{self, FeatureCollection};

use super::common::resolve_data_file;
use crate::error::CliError;

/// Arguments for the features command.
#[derive(Debug, Args)]
pub struct FeaturesArgs {
    /// GeoJSON file (defaults to [map] data_file)
    pub file: Option<PathBuf>,
}

/// Run the features command.
pub fn run(args: FeaturesArgs, config: &ConfigFile) -> Result<(), CliError> {
    let path = resolve_data_file(args.file, config);
    let features = feature::load_from_path(&path)?;

    println!("{} feature(s) in {}", features.len(), path.display());
    for line in table(&features) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per feature, in file order.
fn table(features: &FeatureCollection) -> Vec<String> {
    features
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "{:>4}  {:<7}  {:>11.6}  {:>11.6}  {}",
                i,
                f.color().as_str(),
                f.lat(),
                f.lon(),
                f.name()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_features_in_order() {
        let features = feature::load(
            br#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"Kremlin","color":"orange"},
                 "geometry":{"type":"Point","coordinates":[37.617635,55.752023]}},
                {"type":"Feature","properties":{"name":"Arbat","color":"yellow"},
                 "geometry":{"type":"Point","coordinates":[37.591,55.7494]}}]}"#,
        )
        .unwrap();

        let lines = table(&features);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   0  orange"));
        assert!(lines[0].ends_with("Kremlin"));
        assert!(lines[0].contains("55.752023"));
        assert!(lines[1].ends_with("Arbat"));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let args = FeaturesArgs {
            file: Some(temp.path().join("missing.geojson")),
        };
        let result = run(args, &ConfigFile::default());
        assert!(matches!(result, Err(CliError::Load(_))));
    }
}
