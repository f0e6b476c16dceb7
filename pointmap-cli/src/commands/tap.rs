//! `pointmap tap`: resolve a tap against a feature file.
//!
//! Runs a map session over the headless renderer with the configured camera
//! and prints the selected feature.

use std::path::PathBuf;

use clap::Args;
use pointmap::config::ConfigFile;
use pointmap::coord::{GeoCoord, ScreenPoint};
use pointmap::feature;
use pointmap::headless::{Camera, HeadlessRenderer};
use pointmap::renderer::RendererAdapter;
use pointmap::resolver::{SelectionMethod, TapQuery};
use pointmap::session::MapSession;
use tracing::info;

use super::common::resolve_data_file;
use crate::error::CliError;

/// Arguments for the tap command.
#[derive(Debug, Args)]
pub struct TapArgs {
    /// GeoJSON file (defaults to [map] data_file)
    pub file: Option<PathBuf>,

    /// Tap x position in logical pixels
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,

    /// Tap y position in logical pixels
    #[arg(long, allow_hyphen_values = true)]
    pub y: f64,

    /// Camera zoom level (defaults to [map] zoom)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Camera center latitude (defaults to [map] center_lat)
    #[arg(long, allow_hyphen_values = true)]
    pub center_lat: Option<f64>,

    /// Camera center longitude (defaults to [map] center_lon)
    #[arg(long, allow_hyphen_values = true)]
    pub center_lon: Option<f64>,

    /// Viewport width in logical pixels (defaults to [viewport] width)
    #[arg(long)]
    pub width: Option<f64>,

    /// Viewport height in logical pixels (defaults to [viewport] height)
    #[arg(long)]
    pub height: Option<f64>,

    /// Side of the fallback search square in pixels (defaults to [tap] touch_target)
    #[arg(long)]
    pub touch_target: Option<f64>,
}

/// Outcome of one tap, ready for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct TapReport {
    pub name: String,
    pub color: String,
    pub coordinate: GeoCoord,
    pub method: SelectionMethod,
}

impl TapReport {
    fn describe(&self) -> String {
        let how = match self.method {
            SelectionMethod::HitTest => "direct hit".to_string(),
            SelectionMethod::Proximity { distance_m } => {
                format!("nearest within touch target, {:.1} m from tap", distance_m)
            }
        };
        format!(
            "Selected: {} ({}) at {} [{}]",
            self.name, self.color, self.coordinate, how
        )
    }
}

/// Run the tap command.
pub fn run(args: TapArgs, config: &ConfigFile) -> Result<(), CliError> {
    match tap(args, config)? {
        Some(report) => println!("{}", report.describe()),
        None => println!("No selection"),
    }
    Ok(())
}

/// Load the data file, render it and resolve the tap.
fn tap(args: TapArgs, config: &ConfigFile) -> Result<Option<TapReport>, CliError> {
    let camera = camera_for(&args, config)?;
    let touch_target = positive(
        "touch target",
        args.touch_target.unwrap_or(config.tap.touch_target),
    )?;

    let path = resolve_data_file(args.file, config);
    let features = feature::load_from_path(&path)?;

    let renderer = HeadlessRenderer::new(camera)?;
    let mut session = MapSession::new(renderer).with_touch_target(touch_target);
    session.load_features(Ok(features));

    info!(
        style_url = %config.map.style_url,
        localize_labels = config.map.localize_labels,
        "Map session started"
    );

    let point = ScreenPoint::new(args.x, args.y);
    info!(x = point.x, y = point.y, zoom = camera.zoom, "Resolving tap");

    let report = session
        .resolve_tap(TapQuery::new(point).with_tolerance(touch_target))
        .map(|selection| TapReport {
            name: selection.feature.name().to_string(),
            color: selection.feature.color().to_string(),
            coordinate: selection.feature.coordinate(),
            method: selection.method,
        });

    if report.is_none() {
        let under_tap = session.renderer().screen_to_geo(point);
        info!(coordinate = %under_tap, "Nothing near tap");
    }

    Ok(report)
}

/// Camera from config with command line overrides applied.
fn camera_for(args: &TapArgs, config: &ConfigFile) -> Result<Camera, CliError> {
    let base = config.camera()?;
    let center = GeoCoord::new(
        args.center_lat.unwrap_or(base.center.lat),
        args.center_lon.unwrap_or(base.center.lon),
    )?;
    let camera = Camera {
        center,
        zoom: args.zoom.unwrap_or(base.zoom),
        width: positive("viewport width", args.width.unwrap_or(base.width))?,
        height: positive("viewport height", args.height.unwrap_or(base.height))?,
    };
    pointmap::coord::validate_zoom(camera.zoom)?;
    Ok(camera)
}

/// Same rule as positive numbers in config.ini.
fn positive(what: &str, value: f64) -> Result<f64, CliError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::Config(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}
