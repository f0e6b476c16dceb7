//! Headless renderer
//!
//! An in-process [`RendererAdapter`] that lays features out with spherical
//! Web Mercator under a fixed camera and answers queries the way the map
//! SDK does for a circle layer. Used by the CLI and by tests that need real
//! geometry instead of scripted answers.

use std::cell::Cell;

use crate::coord::{self, CoordError, GeoCoord, ScreenPoint, ScreenRect};
use crate::feature::FeatureCollection;
use crate::renderer::{FeatureRef, RendererAdapter};
use crate::style::{CircleStyle, Rgba};

/// Default viewport size in logical pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 375.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 667.0;

/// Initial camera center (Moscow).
pub const DEFAULT_CENTER: GeoCoord = GeoCoord {
    lat: 55.753960,
    lon: 37.620393,
};

/// Initial camera zoom.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Camera looking straight down at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: GeoCoord,
    pub zoom: f64,
    /// Viewport width in logical pixels.
    pub width: f64,
    /// Viewport height in logical pixels.
    pub height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// A feature as drawn by the headless renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCircle {
    pub name: String,
    pub coordinate: GeoCoord,
    pub fill: Rgba,
}

impl RenderedCircle {
    fn feature_ref(&self, index: usize) -> FeatureRef {
        FeatureRef::new(self.name.clone(), self.coordinate).with_index(index)
    }
}

/// The callout currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub coordinate: GeoCoord,
    pub label: String,
}

/// How often each renderer operation was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub hit_test: usize,
    pub features_in: usize,
    pub screen_to_geo: usize,
    pub select_feature: usize,
    pub clear_selection: usize,
    pub render_points: usize,
}

/// Renderer that keeps everything in memory.
#[derive(Debug)]
pub struct HeadlessRenderer {
    camera: Camera,
    /// World pixel position of the camera center.
    center_px: (f64, f64),
    layer_id: Option<String>,
    style: CircleStyle,
    circles: Vec<RenderedCircle>,
    callout: Option<Callout>,
    calls: Cell<CallCounts>,
}

impl HeadlessRenderer {
    /// Creates a renderer with no layers. Fails if the camera zoom is out of
    /// range.
    pub fn new(camera: Camera) -> Result<Self, CoordError> {
        coord::validate_zoom(camera.zoom)?;
        Ok(Self {
            center_px: coord::to_world_px(&camera.center, camera.zoom),
            camera,
            layer_id: None,
            style: CircleStyle::default(),
            circles: Vec::new(),
            callout: None,
            calls: Cell::new(CallCounts::default()),
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Moves the camera. Rendered circles follow.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), CoordError> {
        coord::validate_zoom(camera.zoom)?;
        self.center_px = coord::to_world_px(&camera.center, camera.zoom);
        self.camera = camera;
        Ok(())
    }

    /// Screen position of a coordinate under the current camera.
    pub fn geo_to_screen(&self, coordinate: &GeoCoord) -> ScreenPoint {
        let (x, y) = coord::to_world_px(coordinate, self.camera.zoom);
        ScreenPoint::new(
            x - self.center_px.0 + self.camera.width / 2.0,
            y - self.center_px.1 + self.camera.height / 2.0,
        )
    }

    pub fn circles(&self) -> &[RenderedCircle] {
        &self.circles
    }

    pub fn callout(&self) -> Option<&Callout> {
        self.callout.as_ref()
    }

    pub fn call_counts(&self) -> CallCounts {
        self.calls.get()
    }

    fn count(&self, bump: impl FnOnce(&mut CallCounts)) {
        let mut calls = self.calls.get();
        bump(&mut calls);
        self.calls.set(calls);
    }

    fn queries_layer(&self, layer_ids: &[&str]) -> bool {
        match &self.layer_id {
            Some(id) => layer_ids.iter().any(|l| *l == id.as_str()),
            None => false,
        }
    }

    /// On-screen circles with their render index.
    fn visible_circles<'a>(
        &'a self,
        layer_ids: &[&str],
    ) -> impl Iterator<Item = (usize, &'a RenderedCircle, ScreenPoint)> + 'a {
        let queried = self.queries_layer(layer_ids);
        let viewport = ScreenRect {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.camera.width,
            max_y: self.camera.height,
        };
        self.circles
            .iter()
            .enumerate()
            .filter(move |_| queried)
            .map(move |(index, circle)| (index, circle, self.geo_to_screen(&circle.coordinate)))
            .filter(move |(_, _, pos)| viewport.contains(*pos))
    }
}

impl RendererAdapter for HeadlessRenderer {
    fn hit_test(&self, point: ScreenPoint, layer_ids: &[&str]) -> Vec<FeatureRef> {
        self.count(|c| c.hit_test += 1);
        let radius = self.style.outer_radius_at(self.camera.zoom);
        self.visible_circles(layer_ids)
            .filter(|(_, _, pos)| pos.distance_to(&point) <= radius)
            .map(|(index, circle, _)| circle.feature_ref(index))
            .collect()
    }

    fn features_in(&self, rect: ScreenRect, layer_ids: &[&str]) -> Vec<FeatureRef> {
        self.count(|c| c.features_in += 1);
        self.visible_circles(layer_ids)
            .filter(|(_, _, pos)| rect.contains(*pos))
            .map(|(index, circle, _)| circle.feature_ref(index))
            .collect()
    }

    fn screen_to_geo(&self, point: ScreenPoint) -> GeoCoord {
        self.count(|c| c.screen_to_geo += 1);
        let x = self.center_px.0 + point.x - self.camera.width / 2.0;
        let y = self.center_px.1 + point.y - self.camera.height / 2.0;
        coord::from_world_px(x, y, self.camera.zoom)
    }

    fn select_feature(&mut self, coordinate: GeoCoord, label: &str) {
        self.count(|c| c.select_feature += 1);
        self.callout = Some(Callout {
            coordinate,
            label: label.to_string(),
        });
    }

    fn clear_selection(&mut self) {
        self.count(|c| c.clear_selection += 1);
        self.callout = None;
    }

    fn render_points(&mut self, features: &FeatureCollection, style: &CircleStyle) {
        self.count(|c| c.render_points += 1);
        self.layer_id = Some(style.layer_id.clone());
        self.style = style.clone();
        self.circles = features
            .iter()
            .map(|f| RenderedCircle {
                name: f.name().to_string(),
                coordinate: f.coordinate(),
                fill: style.fill_for(f.color()),
            })
            .collect();
    }
}
