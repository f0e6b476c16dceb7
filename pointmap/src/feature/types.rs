//! Feature store data types.

use std::fmt;
use std::str::FromStr;

use crate::coord::GeoCoord;

/// Display color of a point, drawn from a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointColor {
    Black,
    Orange,
    Yellow,
}

impl PointColor {
    /// All palette entries, in palette order.
    pub const ALL: [PointColor; 3] = [PointColor::Black, PointColor::Orange, PointColor::Yellow];

    /// The attribute value used in data files and style lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointColor::Black => "black",
            PointColor::Orange => "orange",
            PointColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for PointColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a color name is not part of the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl FromStr for PointColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(PointColor::Black),
            "orange" => Ok(PointColor::Orange),
            "yellow" => Ok(PointColor::Yellow),
            other => Err(UnknownColor(other.to_string())),
        }
    }
}

/// A named point location with a display color. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    name: String,
    color: PointColor,
    coordinate: GeoCoord,
}

impl PointFeature {
    pub(crate) fn new(name: String, color: PointColor, coordinate: GeoCoord) -> Self {
        Self {
            name,
            color,
            coordinate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PointColor {
        self.color
    }

    pub fn coordinate(&self) -> GeoCoord {
        self.coordinate
    }

    pub fn lat(&self) -> f64 {
        self.coordinate.lat
    }

    pub fn lon(&self) -> f64 {
        self.coordinate.lon
    }
}

/// Ordered, read-only list of features loaded from one data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<PointFeature>,
}

impl FeatureCollection {
    pub(crate) fn new(features: Vec<PointFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, PointFeature> {
        self.features.iter()
    }

    pub fn as_slice(&self) -> &[PointFeature] {
        &self.features
    }

    pub fn get(&self, index: usize) -> Option<&PointFeature> {
        self.features.get(index)
    }

    /// Looks a feature up by name. Names are assumed unique; the first match
    /// in file order wins when they are not.
    pub fn find_by_name(&self, name: &str) -> Option<&PointFeature> {
        self.features.iter().find(|f| f.name == name)
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a PointFeature;
    type IntoIter = std::slice::Iter<'a, PointFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
