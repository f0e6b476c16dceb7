//! Map session
//!
//! A [`MapSession`] owns the loaded features and the renderer for one map
//! screen and reacts to the renderer's callbacks through [`MapEvents`].
//!
//! # Lifecycle
//!
//! ```text
//! style ready ──► decode data file ──ok──► render_points
//!                        │
//!                       err ──► log, keep empty map
//!
//! tap ──► TapResolver ──► select_feature / clear_selection
//! ```
//!
//! # Example
//!
//! ```
//! use pointmap::headless::{Camera, HeadlessRenderer};
//! use pointmap::resolver::TapQuery;
//! use pointmap::session::{MapEvents, MapSession};
//!
//! let renderer = HeadlessRenderer::new(Camera::default()).unwrap();
//! let mut session = MapSession::new(renderer);
//!
//! session.on_style_ready(br#"{"type":"FeatureCollection","features":[]}"#);
//! assert!(session.on_tap(TapQuery::at(10.0, 10.0)).is_none());
//! ```

mod annotation;

pub use annotation::{
    Annotation, AnnotationKind, AnnotationView, AnnotationViewPool, ANNOTATION_VIEW_SIZE,
};

use std::path::Path;

use tracing::{error, info};

use crate::feature::{self, FeatureCollection, LoadError, PointFeature};
use crate::renderer::RendererAdapter;
use crate::resolver::{Selection, TapQuery, TapResolver};
use crate::style::CircleStyle;

/// Callbacks the map renderer delivers to its owner.
pub trait MapEvents {
    /// The map style finished loading; `raw` is the bundled feature file.
    fn on_style_ready(&mut self, raw: &[u8]);

    /// The user tapped the map. Returns the selected feature, if any.
    fn on_tap(&mut self, query: TapQuery) -> Option<&PointFeature>;

    /// The renderer needs a view for an annotation. `None` keeps the
    /// renderer's default.
    fn view_for_annotation(&mut self, annotation: &Annotation) -> Option<AnnotationView>;

    /// Whether tapping an annotation may show its callout.
    fn annotation_can_show_callout(&self, _annotation: &Annotation) -> bool {
        true
    }
}

/// State of one map screen.
pub struct MapSession<R: RendererAdapter> {
    renderer: R,
    features: FeatureCollection,
    style: CircleStyle,
    resolver: TapResolver,
    touch_target: f64,
    annotation_views: AnnotationViewPool,
}

impl<R: RendererAdapter> MapSession<R> {
    /// Creates a session with the default circle style and touch target.
    pub fn new(renderer: R) -> Self {
        let style = CircleStyle::default();
        let resolver = TapResolver::new(style.layer_id.clone());
        Self {
            renderer,
            features: FeatureCollection::default(),
            style,
            resolver,
            touch_target: crate::resolver::TOUCH_TARGET_SIZE,
            annotation_views: AnnotationViewPool::new(),
        }
    }

    /// Replaces the circle style. Taps resolve against the style's layer.
    pub fn with_style(mut self, style: CircleStyle) -> Self {
        self.resolver = TapResolver::new(style.layer_id.clone());
        self.style = style;
        self
    }

    /// Sets the side of the square fallback region used for taps.
    pub fn with_touch_target(mut self, touch_target: f64) -> Self {
        self.touch_target = touch_target;
        self
    }

    /// Installs a decoded collection and renders it. On a load error the
    /// store and the rendered layer are both emptied.
    pub fn load_features(&mut self, result: Result<FeatureCollection, LoadError>) {
        match result {
            Ok(features) => {
                info!(features = features.len(), "Feature collection ready");
                self.features = features;
                self.renderer.render_points(&self.features, &self.style);
            }
            Err(e) => {
                error!(error = %e, "Failed to load features, map stays empty");
                self.features = FeatureCollection::default();
                // drop circles from an earlier load so the map matches the store
                self.renderer.render_points(&self.features, &self.style);
            }
        }
    }

    /// Style-ready handler for a data file on disk.
    pub fn on_style_ready_from_path(&mut self, path: &Path) {
        self.load_features(feature::load_from_path(path));
    }

    /// Resolves a tap and updates the renderer's selection, reporting how
    /// the feature was found.
    pub fn resolve_tap(&mut self, query: TapQuery) -> Option<Selection<'_>> {
        self.resolver.resolve(&query, &mut self.renderer, &self.features)
    }

    /// Resolves a tap at `(x, y)` with the session's touch target.
    pub fn tap(&mut self, x: f64, y: f64) -> Option<&PointFeature> {
        let query = TapQuery::at(x, y).with_tolerance(self.touch_target);
        self.on_tap(query)
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn style(&self) -> &CircleStyle {
        &self.style
    }

    pub fn touch_target(&self) -> f64 {
        self.touch_target
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: RendererAdapter> MapEvents for MapSession<R> {
    fn on_style_ready(&mut self, raw: &[u8]) {
        self.load_features(feature::load(raw));
    }

    fn on_tap(&mut self, query: TapQuery) -> Option<&PointFeature> {
        self.resolve_tap(query).map(|selection| selection.feature)
    }

    fn view_for_annotation(&mut self, annotation: &Annotation) -> Option<AnnotationView> {
        self.annotation_views.view_for(annotation)
    }
}
