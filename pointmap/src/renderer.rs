//! Renderer adapter abstraction
//!
//! The mapping SDK owns drawing, gestures and annotation display. This module
//! defines the narrow surface the rest of the crate needs from it, so the
//! tap resolver and the session can run against the real SDK binding, the
//! [`HeadlessRenderer`](crate::headless::HeadlessRenderer), or a test double.

use crate::coord::{GeoCoord, ScreenPoint, ScreenRect};
use crate::feature::FeatureCollection;
use crate::style::CircleStyle;

/// A rendered feature as reported back by a renderer query.
///
/// Carries the feature's `name` attribute and the coordinate it was drawn
/// at. When the renderer knows the feature's position in the rendered
/// collection it reports it as `index`; callers resolve by index then, and
/// by name only otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRef {
    pub name: String,
    pub coordinate: GeoCoord,
    /// Position in the collection passed to `render_points`.
    pub index: Option<usize>,
}

impl FeatureRef {
    pub fn new(name: impl Into<String>, coordinate: GeoCoord) -> Self {
        Self {
            name: name.into(),
            coordinate,
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Operations the map renderer provides.
///
/// All query results are in render order. Implementations are driven from a
/// single event loop and need not be thread-safe.
pub trait RendererAdapter {
    /// Features on the given layers whose drawn geometry contains `point`.
    fn hit_test(&self, point: ScreenPoint, layer_ids: &[&str]) -> Vec<FeatureRef>;

    /// Features on the given layers whose drawn position lies inside `rect`.
    fn features_in(&self, rect: ScreenRect, layer_ids: &[&str]) -> Vec<FeatureRef>;

    /// Converts a screen point to the geographic coordinate under it.
    fn screen_to_geo(&self, point: ScreenPoint) -> GeoCoord;

    /// Selects a feature and shows a callout with `label` at `coordinate`.
    fn select_feature(&mut self, coordinate: GeoCoord, label: &str);

    /// Dismisses the current selection, if any.
    fn clear_selection(&mut self);

    /// Adds the features to the map as a styled circle layer.
    fn render_points(&mut self, features: &FeatureCollection, style: &CircleStyle);
}

impl<R: RendererAdapter + ?Sized> RendererAdapter for Box<R> {
    fn hit_test(&self, point: ScreenPoint, layer_ids: &[&str]) -> Vec<FeatureRef> {
        (**self).hit_test(point, layer_ids)
    }

    fn features_in(&self, rect: ScreenRect, layer_ids: &[&str]) -> Vec<FeatureRef> {
        (**self).features_in(rect, layer_ids)
    }

    fn screen_to_geo(&self, point: ScreenPoint) -> GeoCoord {
        (**self).screen_to_geo(point)
    }

    fn select_feature(&mut self, coordinate: GeoCoord, label: &str) {
        (**self).select_feature(coordinate, label)
    }

    fn clear_selection(&mut self) {
        (**self).clear_selection()
    }

    fn render_points(&mut self, features: &FeatureCollection, style: &CircleStyle) {
        (**self).render_points(features, style)
    }
}
