//! PointMap - named, colored points on a slippy map
//!
//! This library holds everything behind a single map screen except the
//! drawing itself:
//!
//! - [`feature`] decodes the bundled GeoJSON file into a read-only store
//! - [`style`] describes how points are drawn as a circle layer
//! - [`resolver`] turns a tap into a selected feature, first by exact hit
//!   test and then by proximity within a finger-sized region
//! - [`session`] wires the store, the resolver and the renderer together
//!   and reacts to renderer callbacks
//!
//! Drawing is delegated to a [`renderer::RendererAdapter`]. The
//! [`headless::HeadlessRenderer`] implements it in memory with Web Mercator
//! geometry and backs the `pointmap` command line tool.

pub mod config;
pub mod coord;
pub mod feature;
pub mod headless;
pub mod logging;
pub mod renderer;
pub mod resolver;
pub mod session;
pub mod style;
