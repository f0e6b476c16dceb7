//! Circle layer styling handed to the renderer.
//!
//! Points are drawn as filled circles whose fill comes from a fixed palette
//! keyed by the feature's `color` attribute, whose radius grows with zoom
//! along a stop table, and which carry a white outline.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::feature::PointColor;

/// Identifier of the shape source holding the point features.
pub const SOURCE_ID: &str = "mapPoints";

/// Identifier of the circle layer drawing the point features.
pub const CIRCLE_LAYER_ID: &str = "mapPoints-circles";

/// Errors raised when building a style from custom values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("Radius stop table is empty")]
    EmptyStops,

    #[error("Radius stop {zoom} -> {radius} is not a finite, non-negative value")]
    InvalidStop { zoom: f64, radius: f64 },

    #[error("Interpolation base must be positive, got {0}")]
    InvalidBase(f64),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);
    pub const ORANGE: Rgba = Rgba::opaque(0xFF, 0x80, 0x00);
    pub const YELLOW: Rgba = Rgba::opaque(0xFF, 0xFF, 0x00);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Mapping from palette entry to fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: BTreeMap<PointColor, Rgba>,
}

impl ColorPalette {
    /// Fill color for a palette entry.
    pub fn color_for(&self, color: PointColor) -> Rgba {
        self.colors.get(&color).copied().unwrap_or(Rgba::BLACK)
    }

    /// Overrides one entry.
    pub fn with_color(mut self, color: PointColor, rgba: Rgba) -> Self {
        self.colors.insert(color, rgba);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointColor, Rgba)> + '_ {
        self.colors.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        let colors = BTreeMap::from([
            (PointColor::Black, Rgba::BLACK),
            (PointColor::Orange, Rgba::ORANGE),
            (PointColor::Yellow, Rgba::YELLOW),
        ]);
        Self { colors }
    }
}

/// Zoom-dependent value defined by a table of `(zoom, value)` stops.
///
/// Between stops the value is interpolated exponentially with `base`
/// (a base of 1 is linear). Outside the table the nearest stop is used.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomStops {
    stops: Vec<(f64, f64)>,
    base: f64,
}

impl ZoomStops {
    /// Builds a stop table. Stops are sorted by zoom.
    pub fn new(mut stops: Vec<(f64, f64)>, base: f64) -> Result<Self, StyleError> {
        if stops.is_empty() {
            return Err(StyleError::EmptyStops);
        }
        if !(base.is_finite() && base > 0.0) {
            return Err(StyleError::InvalidBase(base));
        }
        if let Some(&(zoom, radius)) = stops
            .iter()
            .find(|(z, r)| !z.is_finite() || !r.is_finite() || *r < 0.0)
        {
            return Err(StyleError::InvalidStop { zoom, radius });
        }

        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { stops, base })
    }

    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Evaluates the table at `zoom`.
    pub fn value_at(&self, zoom: f64) -> f64 {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if zoom.is_nan() || zoom <= first.0 {
            return first.1;
        }
        if zoom >= last.0 {
            return last.1;
        }

        // zoom is strictly inside the table, so a bracketing pair exists
        let upper = self
            .stops
            .iter()
            .position(|(z, _)| *z > zoom)
            .unwrap_or(self.stops.len() - 1);
        let (z0, v0) = self.stops[upper - 1];
        let (z1, v1) = self.stops[upper];

        let t = interpolation_factor(self.base, zoom - z0, z1 - z0);
        v0 + (v1 - v0) * t
    }
}

fn interpolation_factor(base: f64, progress: f64, span: f64) -> f64 {
    if span == 0.0 {
        return 0.0;
    }
    if (base - 1.0).abs() < f64::EPSILON {
        progress / span
    } else {
        (base.powf(progress) - 1.0) / (base.powf(span) - 1.0)
    }
}

/// Complete style of the point circle layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub source_id: String,
    pub layer_id: String,
    pub palette: ColorPalette,
    pub radius: ZoomStops,
    pub stroke_width: f64,
    pub stroke_color: Rgba,
}

impl CircleStyle {
    /// Circle radius in logical pixels at `zoom`.
    pub fn radius_at(&self, zoom: f64) -> f64 {
        self.radius.value_at(zoom)
    }

    /// Outer radius including the stroke, used for hit testing.
    pub fn outer_radius_at(&self, zoom: f64) -> f64 {
        self.radius_at(zoom) + self.stroke_width
    }

    pub fn fill_for(&self, color: PointColor) -> Rgba {
        self.palette.color_for(color)
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            source_id: SOURCE_ID.to_string(),
            layer_id: CIRCLE_LAYER_ID.to_string(),
            palette: ColorPalette::default(),
            radius: ZoomStops {
                stops: vec![(2.0, 5.0), (7.0, 8.0)],
                base: 1.0,
            },
            stroke_width: 2.0,
            stroke_color: Rgba::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let style = CircleStyle::default();
        assert_eq!(style.fill_for(PointColor::Black), Rgba::BLACK);
        assert_eq!(style.fill_for(PointColor::Orange).to_string(), "#FF8000");
        assert_eq!(style.fill_for(PointColor::Yellow).to_string(), "#FFFF00");
        assert_eq!(style.stroke_color, Rgba::WHITE);
        assert_eq!(style.stroke_width, 2.0);
    }

    #[test]
    fn test_default_ids() {
        let style = CircleStyle::default();
        assert_eq!(style.source_id, "mapPoints");
        assert_eq!(style.layer_id, "mapPoints-circles");
    }

    #[test]
    fn test_radius_clamped_outside_stops() {
        let style = CircleStyle::default();
        assert_eq!(style.radius_at(0.0), 5.0);
        assert_eq!(style.radius_at(2.0), 5.0);
        assert_eq!(style.radius_at(7.0), 8.0);
        assert_eq!(style.radius_at(16.0), 8.0);
    }

    #[test]
    fn test_radius_linear_between_stops() {
        let style = CircleStyle::default();
        assert!((style.radius_at(4.5) - 6.5).abs() < 1e-12);
        assert_eq!(style.outer_radius_at(16.0), 10.0);
    }

    #[test]
    fn test_exponential_base() {
        let stops = ZoomStops::new(vec![(0.0, 0.0), (2.0, 3.0)], 2.0).unwrap();
        // (2^1 - 1) / (2^2 - 1) = 1/3
        assert!((stops.value_at(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stops_are_sorted() {
        let stops = ZoomStops::new(vec![(7.0, 8.0), (2.0, 5.0)], 1.0).unwrap();
        assert_eq!(stops.stops(), &[(2.0, 5.0), (7.0, 8.0)]);
    }

    #[test]
    fn test_single_stop_is_constant() {
        let stops = ZoomStops::new(vec![(5.0, 4.0)], 1.0).unwrap();
        assert_eq!(stops.value_at(0.0), 4.0);
        assert_eq!(stops.value_at(10.0), 4.0);
    }

    #[test]
    fn test_nan_zoom_uses_first_stop() {
        let single = ZoomStops::new(vec![(5.0, 3.0)], 1.0).unwrap();
        assert_eq!(single.value_at(f64::NAN), 3.0);

        let radius = CircleStyle::default().radius;
        assert_eq!(radius.value_at(f64::NAN), 5.0);
    }

    #[test]
    fn test_invalid_stop_tables() {
        assert_eq!(ZoomStops::new(vec![], 1.0), Err(StyleError::EmptyStops));
        assert_eq!(
            ZoomStops::new(vec![(1.0, 1.0)], 0.0),
            Err(StyleError::InvalidBase(0.0))
        );
        assert!(matches!(
            ZoomStops::new(vec![(1.0, -2.0)], 1.0),
            Err(StyleError::InvalidStop { .. })
        ));
    }

    #[test]
    fn test_palette_override() {
        let palette = ColorPalette::default().with_color(PointColor::Black, Rgba::WHITE);
        assert_eq!(palette.color_for(PointColor::Black), Rgba::WHITE);
        assert_eq!(palette.iter().count(), 3);
    }

    #[test]
    fn test_rgba_display_with_alpha() {
        let color = Rgba {
            r: 1,
            g: 2,
            b: 3,
            a: 4,
        };
        assert_eq!(color.to_string(), "#01020304");
    }
}
