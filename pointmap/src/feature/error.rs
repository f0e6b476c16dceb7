//! Feature store error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::CoordError;

/// Errors that can occur while loading a feature collection.
///
/// Any of these aborts the whole load; no partial collection is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file could not be read.
    #[error("Failed to read feature file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed or does not have the expected shape.
    #[error("Malformed feature collection: {0}")]
    Decode(String),

    /// A feature lacks a required property, or the property is empty.
    #[error("Feature {index} is missing required property '{property}'")]
    MissingProperty {
        index: usize,
        property: &'static str,
    },

    /// A feature's color is not part of the palette.
    #[error("Feature {index} has unknown color '{color}'")]
    UnknownColor { index: usize, color: String },

    /// A feature's coordinate is out of range.
    #[error("Feature {index} has an invalid coordinate: {source}")]
    InvalidCoordinate {
        index: usize,
        #[source]
        source: CoordError,
    },
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Decode(e.to_string())
    }
}
