#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn camera_initial_leaves_margin() {
    let cam = Camera::initial();
    assert_eq!(cam.pan_x, 50.0);
    assert_eq!(cam.pan_y, 50.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world / world_to_screen ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(20.0, 10.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
    let world = cam.screen_to_world(Point::new(40.0, 50.0));
    assert!(point_approx_eq(world, Point::new(10.0, 20.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 50.0, pan_y: 30.0, zoom: 0.5 };
    let screen = cam.world_to_screen(Point::new(100.0, 40.0));
    assert!(point_approx_eq(screen, Point::new(100.0, 50.0)));
}

#[test]
fn round_trip_world_screen_world() {
    let cam = Camera { pan_x: -13.0, pan_y: 77.5, zoom: 1.7 };
    let world = Point::new(123.4, -56.7);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

// --- zoom_at ---

#[test]
fn zoom_at_keeps_anchor_world_point_fixed() {
    let anchors = [Point::new(0.0, 0.0), Point::new(320.0, 240.0), Point::new(-40.0, 900.0)];
    let zooms = [0.1, 0.37, 1.0, 2.5, 5.0];
    for anchor in anchors {
        for target in zooms {
            let mut cam = Camera { pan_x: 35.0, pan_y: -12.0, zoom: 1.3 };
            let before = cam.screen_to_world(anchor);
            cam.zoom_at(anchor, target);
            let after = cam.screen_to_world(anchor);
            assert!(point_approx_eq(before, after), "anchor {anchor:?} zoom {target}");
        }
    }
}

#[test]
fn zoom_at_clamps_to_max() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(10.0, 10.0), 50.0);
    assert_eq!(cam.zoom, 5.0);
}

#[test]
fn zoom_at_clamps_to_min() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(10.0, 10.0), 0.001);
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn zoom_at_clamped_still_preserves_anchor() {
    let mut cam = Camera { pan_x: 5.0, pan_y: 5.0, zoom: 4.8 };
    let anchor = Point::new(200.0, 100.0);
    let before = cam.screen_to_world(anchor);
    cam.zoom_at(anchor, 9.0);
    assert!(point_approx_eq(before, cam.screen_to_world(anchor)));
}

#[test]
fn zoom_at_limit_leaves_camera_untouched() {
    let mut cam = Camera { pan_x: 33.3, pan_y: -7.1, zoom: 5.0 };
    let before = cam;
    cam.zoom_at(Point::new(123.0, 45.0), 6.5);
    assert_eq!(cam, before);
}

#[test]
fn clamp_zoom_non_finite_is_one() {
    assert_eq!(clamp_zoom(f64::NAN), 1.0);
    assert_eq!(clamp_zoom(f64::INFINITY), 1.0);
}

// --- pan_by ---

#[test]
fn pan_by_adds_screen_delta() {
    let mut cam = Camera { pan_x: 10.0, pan_y: 20.0, zoom: 3.0 };
    cam.pan_by(5.0, -7.0);
    assert_eq!(cam.pan_x, 15.0);
    assert_eq!(cam.pan_y, 13.0);
    assert_eq!(cam.zoom, 3.0);
}

// --- snap ---

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap(74.0, 50.0), 50.0);
    assert_eq!(snap(76.0, 50.0), 100.0);
    assert_eq!(snap(-26.0, 50.0), -50.0);
    assert_eq!(snap(340.0, 50.0), 350.0);
}

#[test]
fn snap_zero_grid_is_identity() {
    assert_eq!(snap(73.25, 0.0), 73.25);
    assert_eq!(snap(-1.5, -10.0), -1.5);
}

#[test]
fn snap_is_idempotent() {
    for grid in [1.0, 7.5, 25.0, 50.0] {
        let mut v = -500.0;
        while v < 500.0 {
            let once = snap(v, grid);
            assert!(approx_eq(snap(once, grid), once), "v={v} grid={grid}");
            v += 3.3;
        }
    }
}
