//! Tap resolution
//!
//! Maps a screen tap to the feature the user most plausibly meant.
//!
//! # Algorithm
//!
//! ```text
//! tap ──► hit_test(point) ──non-empty──► first feature in render order
//!               │
//!             empty
//!               ▼
//!         features_in(44×44 square) ──empty──► none (clear selection)
//!               │
//!           candidates
//!               ▼
//!   great-circle distance to screen_to_geo(point), stable sort ──► closest
//! ```
//!
//! The exact hit test is authoritative: when it yields a feature the
//! proximity fallback is never queried. Equal distances keep render order.

use tracing::debug;

use crate::coord::{ScreenPoint, ScreenRect};
use crate::feature::{FeatureCollection, PointFeature};
use crate::renderer::{FeatureRef, RendererAdapter};
use crate::style::CIRCLE_LAYER_ID;

/// Side of the square tolerance region around a tap, in logical pixels.
///
/// Matches the platform's minimum touch target (44×44 pt, i.e. ±22 px).
pub const TOUCH_TARGET_SIZE: f64 = 44.0;

/// One user tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapQuery {
    pub screen_point: ScreenPoint,
    /// Side of the square fallback region in pixels.
    pub tolerance_px: f64,
}

impl TapQuery {
    /// A tap with the default touch-target tolerance.
    pub fn new(screen_point: ScreenPoint) -> Self {
        Self {
            screen_point,
            tolerance_px: TOUCH_TARGET_SIZE,
        }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(ScreenPoint::new(x, y))
    }

    pub fn with_tolerance(mut self, tolerance_px: f64) -> Self {
        self.tolerance_px = tolerance_px;
        self
    }

    /// The square fallback region centred on the tap.
    pub fn tolerance_region(&self) -> ScreenRect {
        ScreenRect::square_around(self.screen_point, self.tolerance_px)
    }
}

/// How a selection was made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMethod {
    /// The tap landed on the feature's drawn circle.
    HitTest,
    /// The feature was the nearest candidate in the tolerance region.
    Proximity {
        /// Great-circle distance from the tap to the feature, in meters.
        distance_m: f64,
    },
}

/// A resolved tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub feature: &'a PointFeature,
    pub method: SelectionMethod,
}

/// Resolves taps against one circle layer.
#[derive(Debug, Clone)]
pub struct TapResolver {
    layer_ids: Vec<String>,
}

impl Default for TapResolver {
    fn default() -> Self {
        Self::new(CIRCLE_LAYER_ID)
    }
}

impl TapResolver {
    pub fn new(layer_id: impl Into<String>) -> Self {
        Self {
            layer_ids: vec![layer_id.into()],
        }
    }

    pub fn layer_ids(&self) -> &[String] {
        &self.layer_ids
    }

    /// Resolves a tap and updates the renderer's selection.
    ///
    /// On a match the renderer is asked to select the store feature with its
    /// own name as label; otherwise the current selection is cleared.
    pub fn resolve<'a, R>(
        &self,
        query: &TapQuery,
        renderer: &mut R,
        features: &'a FeatureCollection,
    ) -> Option<Selection<'a>>
    where
        R: RendererAdapter + ?Sized,
    {
        let selection = self.find(query, &*renderer, features);

        match &selection {
            Some(selection) => {
                let feature = selection.feature;
                debug!(
                    name = feature.name(),
                    method = ?selection.method,
                    "Tap selected feature"
                );
                renderer.select_feature(feature.coordinate(), feature.name());
            }
            None => {
                debug!(x = query.screen_point.x, y = query.screen_point.y, "Tap missed");
                renderer.clear_selection();
            }
        }

        selection
    }

    /// Finds the intended feature without touching the renderer's selection.
    pub fn find<'a, R>(
        &self,
        query: &TapQuery,
        renderer: &R,
        features: &'a FeatureCollection,
    ) -> Option<Selection<'a>>
    where
        R: RendererAdapter + ?Sized,
    {
        let layers: Vec<&str> = self.layer_ids.iter().map(String::as_str).collect();

        let exact = renderer
            .hit_test(query.screen_point, &layers)
            .iter()
            .find_map(|hit| lookup(features, hit));
        if let Some(feature) = exact {
            return Some(Selection {
                feature,
                method: SelectionMethod::HitTest,
            });
        }

        let candidates = renderer.features_in(query.tolerance_region(), &layers);
        if candidates.is_empty() {
            return None;
        }

        let tap = renderer.screen_to_geo(query.screen_point);
        closest(&candidates, features, |candidate| {
            candidate.coordinate.distance_m(&tap)
        })
    }
}

/// Maps a rendered feature back to the store. An index must agree with the
/// name; refs without an index fall back to the first feature of that name.
fn lookup<'a>(
    features: &'a FeatureCollection,
    rendered: &FeatureRef,
) -> Option<&'a PointFeature> {
    match rendered.index {
        Some(index) => features.get(index).filter(|f| f.name() == rendered.name),
        None => features.find_by_name(&rendered.name),
    }
}

/// Picks the candidate with the smallest distance, computed once per
/// candidate. Ties keep render order.
fn closest<'a, F>(
    candidates: &[FeatureRef],
    features: &'a FeatureCollection,
    distance: F,
) -> Option<Selection<'a>>
where
    F: Fn(&FeatureRef) -> f64,
{
    let mut ranked: Vec<(f64, &PointFeature)> = candidates
        .iter()
        .filter_map(|candidate| {
            lookup(features, candidate).map(|feature| (distance(candidate), feature))
        })
        .collect();

    // sort_by is stable, so equal distances stay in render order
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked.into_iter().next().map(|(distance_m, feature)| Selection {
        feature,
        method: SelectionMethod::Proximity { distance_m },
    })
}
