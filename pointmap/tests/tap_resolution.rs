//! End-to-end tap resolution against the headless renderer.
//!
//! Features are placed at known pixel offsets from the viewport center, so
//! each test controls exactly which circles a tap lands on.

use pointmap::coord::{GeoCoord, ScreenPoint};
use pointmap::headless::{Camera, HeadlessRenderer};
use pointmap::renderer::RendererAdapter;
use pointmap::resolver::{SelectionMethod, TapQuery, TapResolver};
use pointmap::session::{MapEvents, MapSession};
use serde_json::json;

/// Zoom 15 keeps circles at their maximum radius (8 px + 2 px stroke).
fn camera() -> Camera {
    Camera {
        zoom: 15.0,
        ..Camera::default()
    }
}

fn center() -> ScreenPoint {
    let camera = camera();
    ScreenPoint::new(camera.width / 2.0, camera.height / 2.0)
}

/// Coordinate drawn `(dx, dy)` pixels away from the viewport center.
fn at_offset(dx: f64, dy: f64) -> GeoCoord {
    let probe = HeadlessRenderer::new(camera()).unwrap();
    let c = center();
    probe.screen_to_geo(ScreenPoint::new(c.x + dx, c.y + dy))
}

fn geojson(points: &[(&str, &str, GeoCoord)]) -> Vec<u8> {
    let features: Vec<_> = points
        .iter()
        .map(|(name, color, coord)| {
            json!({
                "type": "Feature",
                "properties": { "name": name, "color": color },
                "geometry": { "type": "Point", "coordinates": [coord.lon, coord.lat] }
            })
        })
        .collect();
    serde_json::to_vec(&json!({ "type": "FeatureCollection", "features": features })).unwrap()
}

fn session_with(points: &[(&str, &str, GeoCoord)]) -> MapSession<HeadlessRenderer> {
    let renderer = HeadlessRenderer::new(camera()).unwrap();
    let mut session = MapSession::new(renderer);
    session.on_style_ready(&geojson(points));
    session
}

fn assert_close(actual: GeoCoord, expected: GeoCoord) {
    assert!(
        (actual.lat - expected.lat).abs() < 1e-9 && (actual.lon - expected.lon).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn tap_center(session: &mut MapSession<HeadlessRenderer>) -> Option<String> {
    let c = center();
    session.tap(c.x, c.y).map(|f| f.name().to_string())
}

#[test]
fn test_nearest_candidate_wins_when_nothing_is_hit() {
    // Both outside the 10 px circle, both inside the 44 px square.
    let mut session = session_with(&[
        ("Far", "orange", at_offset(0.0, -20.0)),
        ("Near", "black", at_offset(14.0, 0.0)),
    ]);

    assert_eq!(tap_center(&mut session).as_deref(), Some("Near"));

    let callout = session.renderer().callout().unwrap();
    assert_eq!(callout.label, "Near");
    assert_eq!(session.renderer().call_counts().screen_to_geo, 1);
}

#[test]
fn test_exact_hit_skips_proximity_search() {
    let mut session = session_with(&[
        ("Hit", "yellow", at_offset(5.0, 0.0)),
        ("Nearby", "black", at_offset(-15.0, 0.0)),
    ]);

    assert_eq!(tap_center(&mut session).as_deref(), Some("Hit"));

    let counts = session.renderer().call_counts();
    assert_eq!(counts.hit_test, 1);
    assert_eq!(counts.features_in, 0);
    assert_eq!(counts.screen_to_geo, 0);
}

#[test]
fn test_overlapping_circles_select_first_in_render_order() {
    let spot = at_offset(2.0, 2.0);
    let mut session = session_with(&[("First", "black", spot), ("Second", "orange", spot)]);

    assert_eq!(tap_center(&mut session).as_deref(), Some("First"));
}

#[test]
fn test_duplicate_names_open_callout_on_tapped_circle() {
    let tapped = at_offset(0.0, 0.0);
    let mut session = session_with(&[
        ("Cafe", "black", at_offset(-60.0, -60.0)),
        ("Cafe", "orange", tapped),
    ]);

    let c = center();
    let selected = session.tap(c.x, c.y).map(|f| f.coordinate()).unwrap();
    assert_close(selected, tapped);

    let callout = session.renderer().callout().unwrap();
    assert_close(callout.coordinate, tapped);
    assert_eq!(callout.label, "Cafe");
}

#[test]
fn test_duplicate_names_nearest_by_proximity() {
    let near = at_offset(12.0, 0.0);
    let mut session = session_with(&[
        ("Cafe", "black", at_offset(-20.0, 0.0)),
        ("Cafe", "orange", near),
    ]);

    tap_center(&mut session);
    assert_close(session.renderer().callout().unwrap().coordinate, near);
}

#[test]
fn test_equidistant_candidates_keep_render_order() {
    let spot = at_offset(0.0, 16.0);
    let mut session = session_with(&[("Upper", "black", spot), ("Lower", "yellow", spot)]);

    assert_eq!(tap_center(&mut session).as_deref(), Some("Upper"));
}

#[test]
fn test_tap_outside_touch_target_clears_selection() {
    let mut session = session_with(&[("Outside", "black", at_offset(30.0, 0.0))]);

    // Select something first so the clear is observable.
    let c = center();
    assert!(session.tap(c.x + 30.0, c.y).is_some());
    assert!(session.renderer().callout().is_some());

    assert!(tap_center(&mut session).is_none());
    assert!(session.renderer().callout().is_none());
    assert_eq!(session.renderer().call_counts().clear_selection, 1);
}

#[test]
fn test_wider_touch_target_reaches_further() {
    let renderer = HeadlessRenderer::new(camera()).unwrap();
    let mut session = MapSession::new(renderer).with_touch_target(80.0);
    session.on_style_ready(&geojson(&[("Outside", "black", at_offset(30.0, 0.0))]));

    assert_eq!(tap_center(&mut session).as_deref(), Some("Outside"));
}

#[test]
fn test_find_reports_method_without_selecting() {
    let features = pointmap::feature::load(&geojson(&[
        ("Near", "black", at_offset(14.0, 0.0)),
    ]))
    .unwrap();
    let mut renderer = HeadlessRenderer::new(camera()).unwrap();
    renderer.render_points(&features, &Default::default());

    let selection = TapResolver::default()
        .find(&TapQuery::new(center()), &renderer, &features)
        .unwrap();

    assert_eq!(selection.feature.name(), "Near");
    match selection.method {
        SelectionMethod::Proximity { distance_m } => assert!(distance_m > 0.0),
        other => panic!("expected proximity selection, got {other:?}"),
    }
    assert!(renderer.callout().is_none());
}

#[test]
fn test_invalid_file_leaves_map_empty_and_taps_clear() {
    let renderer = HeadlessRenderer::new(camera()).unwrap();
    let mut session = MapSession::new(renderer);
    session.on_style_ready(br#"{"type":"FeatureCollection","features":[{"type":"Feature"}]}"#);

    assert!(session.features().is_empty());
    assert!(session.renderer().circles().is_empty());
    assert!(tap_center(&mut session).is_none());
}
