//! Coordinate types and projection
//!
//! Geographic coordinates, screen-space points and rectangles, and the
//! spherical Web Mercator conversions used by the headless renderer to place
//! features on screen.

mod types;

pub use types::{
    CoordError, GeoCoord, ScreenPoint, ScreenRect, MAX_LAT, MAX_LON, MAX_MERCATOR_LAT, MAX_ZOOM,
    MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Logical pixel size of one tile at integer zoom levels.
pub const TILE_SIZE: f64 = 512.0;

/// Width (and height) of the projected world in pixels at `zoom`.
#[inline]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2.0_f64.powf(zoom)
}

/// Projects a coordinate to world pixel coordinates at the given zoom.
///
/// The origin is the north-west corner of the world. Latitudes beyond the
/// Web Mercator limit are clamped.
///
/// # Returns
///
/// `(x, y)` in pixels, or an error if the zoom is out of range.
#[inline]
pub fn project(coord: &GeoCoord, zoom: f64) -> Result<(f64, f64), CoordError> {
    validate_zoom(zoom)?;
    Ok(to_world_px(coord, zoom))
}

/// Converts world pixel coordinates back to a geographic coordinate.
///
/// Longitude wraps around the antimeridian; `y` is clamped to the world.
#[inline]
pub fn unproject(x: f64, y: f64, zoom: f64) -> Result<GeoCoord, CoordError> {
    validate_zoom(zoom)?;
    Ok(from_world_px(x, y, zoom))
}

/// Checks that `zoom` is within the supported range.
pub fn validate_zoom(zoom: f64) -> Result<(), CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Projection for an already validated zoom.
pub(crate) fn to_world_px(coord: &GeoCoord, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);

    let x = (coord.lon + 180.0) / 360.0 * size;

    let lat_rad = lat * PI / 180.0;
    // the clamp latitude rounds a hair past the square world edge
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * size).clamp(0.0, size);

    (x, y)
}

/// Inverse projection for an already validated zoom.
pub(crate) fn from_world_px(x: f64, y: f64, zoom: f64) -> GeoCoord {
    let size = world_size(zoom);

    let mut lon = x / size * 360.0 - 180.0;
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    }

    let y = y.clamp(0.0, size) / size;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    GeoCoord { lat, lon }
}
