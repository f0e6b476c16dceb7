//! Annotation views for selected features.
//!
//! The renderer asks for a view whenever it shows a callout. Point
//! annotations get a small transparent view instead of the default marker,
//! reused by identifier so repeated selections of the same spot do not
//! allocate new views.

use std::collections::HashMap;

use crate::coord::GeoCoord;
use crate::style::Rgba;

/// Side of the custom annotation view, in logical pixels.
pub const ANNOTATION_VIEW_SIZE: f64 = 18.0;

/// Kind of annotation the renderer is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// A point annotation created for a selected feature.
    Point,
    /// Anything else (user location, shapes); left to the renderer.
    Other,
}

/// An annotation shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub coordinate: GeoCoord,
    pub title: Option<String>,
}

impl Annotation {
    pub fn point(coordinate: GeoCoord, title: impl Into<String>) -> Self {
        Self {
            kind: AnnotationKind::Point,
            coordinate,
            title: Some(title.into()),
        }
    }
}

/// Description of the view to display for an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationView {
    pub reuse_identifier: String,
    pub width: f64,
    pub height: f64,
    /// `None` draws no background.
    pub background: Option<Rgba>,
}

/// Recycles annotation views by reuse identifier.
#[derive(Debug, Default)]
pub struct AnnotationViewPool {
    views: HashMap<String, AnnotationView>,
    created: usize,
}

impl AnnotationViewPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the view for `annotation`, or `None` to use the renderer's
    /// default view.
    pub fn view_for(&mut self, annotation: &Annotation) -> Option<AnnotationView> {
        if annotation.kind != AnnotationKind::Point {
            return None;
        }

        let reuse_identifier = reuse_identifier(annotation);
        if let Some(view) = self.views.get(&reuse_identifier) {
            return Some(view.clone());
        }

        let view = AnnotationView {
            reuse_identifier: reuse_identifier.clone(),
            width: ANNOTATION_VIEW_SIZE,
            height: ANNOTATION_VIEW_SIZE,
            background: None,
        };
        self.views.insert(reuse_identifier, view.clone());
        self.created += 1;
        Some(view)
    }

    /// Number of distinct views created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

/// Views are keyed by the annotation's longitude.
fn reuse_identifier(annotation: &Annotation) -> String {
    annotation.coordinate.lon.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord::new(lat, lon).unwrap()
    }

    #[test]
    fn test_point_annotation_gets_small_transparent_view() {
        let mut pool = AnnotationViewPool::new();
        let view = pool
            .view_for(&Annotation::point(at(55.75, 37.62), "A"))
            .unwrap();

        assert_eq!(view.reuse_identifier, "37.62");
        assert_eq!(view.width, 18.0);
        assert_eq!(view.height, 18.0);
        assert!(view.background.is_none());
    }

    #[test]
    fn test_views_are_reused_by_longitude() {
        let mut pool = AnnotationViewPool::new();
        pool.view_for(&Annotation::point(at(55.75, 37.62), "A"));
        pool.view_for(&Annotation::point(at(55.70, 37.62), "B"));
        pool.view_for(&Annotation::point(at(55.75, 37.61), "C"));

        assert_eq!(pool.created(), 2);
    }

    #[test]
    fn test_other_annotations_use_default_view() {
        let mut pool = AnnotationViewPool::new();
        let annotation = Annotation {
            kind: AnnotationKind::Other,
            coordinate: at(0.0, 0.0),
            title: None,
        };
        assert!(pool.view_for(&annotation).is_none());
        assert_eq!(pool.created(), 0);
    }
}
