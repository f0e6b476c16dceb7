//! PointMap CLI
//!
//! Headless front end to the PointMap library: inspect a feature file and
//! resolve taps against it without a map SDK.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::{load_config, start_logging};
use commands::config::ConfigCommands;
use commands::features::FeaturesArgs;
use commands::tap::TapArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "pointmap")]
#[command(version, about = "Inspect map point data and resolve taps", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.pointmap/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the features in a GeoJSON file
    Features(FeaturesArgs),

    /// Resolve a tap at a screen position
    Tap(TapArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { command } => commands::config::run(command, cli.config.as_deref()),
        Commands::Features(args) => {
            let config = load_config(cli.config.as_deref())?;
            let _guard = start_logging(&config)?;
            commands::features::run(args, &config)
        }
        Commands::Tap(args) => {
            let config = load_config(cli.config.as_deref())?;
            let _guard = start_logging(&config)?;
            commands::tap::run(args, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tap_command() {
        let cli = Cli::try_parse_from([
            "pointmap",
            "--config",
            "/tmp/c.ini",
            "tap",
            "points.geojson",
            "--x",
            "120",
            "--y",
            "-4",
            "--zoom",
            "14",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.ini")));
        match cli.command {
            Commands::Tap(args) => {
                assert_eq!(args.file, Some(PathBuf::from("points.geojson")));
                assert_eq!(args.x, 120.0);
                assert_eq!(args.y, -4.0);
                assert_eq!(args.zoom, Some(14.0));
                assert!(args.touch_target.is_none());
            }
            _ => panic!("expected tap command"),
        }
    }

    #[test]
    fn test_tap_requires_coordinates() {
        assert!(Cli::try_parse_from(["pointmap", "tap", "points.geojson", "--x", "1"]).is_err());
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["pointmap", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Path
            }
        ));
    }
}
