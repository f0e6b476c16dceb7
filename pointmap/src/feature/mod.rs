//! Feature store
//!
//! Decodes a GeoJSON feature collection of labeled points into an ordered,
//! read-only [`FeatureCollection`]. The collection is built once when the map
//! style is ready and shared with the renderer and the tap resolver.
//!
//! # Example
//!
//! ```
//! use pointmap::feature::{load, PointColor};
//!
//! let raw = br#"{"type":"FeatureCollection","features":[
//!     {"type":"Feature","properties":{"name":"A","color":"black"},
//!      "geometry":{"type":"Point","coordinates":[37.62,55.75]}}]}"#;
//!
//! let collection = load(raw).unwrap();
//! let a = collection.get(0).unwrap();
//! assert_eq!(a.name(), "A");
//! assert_eq!(a.color(), PointColor::Black);
//! assert_eq!((a.lat(), a.lon()), (55.75, 37.62));
//! ```

mod error;
mod geojson;
mod types;

pub use error::LoadError;
pub use geojson::{load, load_from_path, COLOR_PROPERTY, NAME_PROPERTY};
pub use types::{FeatureCollection, PointColor, PointFeature, UnknownColor};
