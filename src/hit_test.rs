use std::sync::Arc;

use super::*;
use crate::doc::{Fixture, Room, Table, TableKind, Zone};
use crate::geometry::Rect;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn wide_fixture(id: &str) -> Fixture {
    Fixture { footprint: Footprint::Rect { w: 100.0, h: 60.0 }, ..Fixture::new_rect(id) }
}

fn table_at(id: &str, x: f64, y: f64) -> Table {
    Table { x, y, ..Table::new_of_kind(id, TableKind::Rect, 6) }
}

fn zone(id: &str) -> Zone {
    Zone::new(id, Rect::new(500.0, 500.0, 100.0, 100.0))
}

fn scene() -> Scene {
    Scene { room: Room { width: 1200.0, height: 800.0, grid: 50.0 }, ..Scene::default() }
}

fn hit(world: Point, scene: &Scene) -> Option<Hit> {
    hit_test(world, scene, &Camera::default())
}

// =============================================================
// Fixtures
// =============================================================

#[test]
fn fixture_handles_by_position() {
    let s = Scene { fixtures: Arc::new(vec![wide_fixture("f")]), ..scene() };
    assert_eq!(hit(pt(300.0, 260.0), &s), Some(Hit::FixtureHandle { id: "f".into(), handle: ResizeHandle::Corner }));
    assert_eq!(hit(pt(300.0, 230.0), &s), Some(Hit::FixtureHandle { id: "f".into(), handle: ResizeHandle::Right }));
    assert_eq!(hit(pt(250.0, 260.0), &s), Some(Hit::FixtureHandle { id: "f".into(), handle: ResizeHandle::Bottom }));
}

#[test]
fn fixture_body_hit_away_from_handles() {
    let s = Scene { fixtures: Arc::new(vec![wide_fixture("f")]), ..scene() };
    assert_eq!(hit(pt(220.0, 210.0), &s), Some(Hit::FixtureBody { id: "f".into() }));
}

#[test]
fn round_fixture_has_radius_handle() {
    let s = Scene { fixtures: Arc::new(vec![Fixture::new_round("f")]), ..scene() };
    assert_eq!(hit(pt(230.0, 200.0), &s), Some(Hit::FixtureHandle { id: "f".into(), handle: ResizeHandle::Radius }));
    assert_eq!(hit(pt(200.0, 200.0), &s), Some(Hit::FixtureBody { id: "f".into() }));
}

#[test]
fn locked_fixture_is_transparent() {
    let fixture = Fixture { locked: true, ..wide_fixture("f") };
    let s = Scene { fixtures: Arc::new(vec![fixture]), tables: Arc::new(vec![table_at("t", 200.0, 200.0)]), ..scene() };
    assert_eq!(hit(pt(220.0, 210.0), &s), Some(Hit::TableBody { id: "t".into() }));
    assert_eq!(hit(pt(300.0, 260.0), &s), Some(Hit::TableBody { id: "t".into() }));
}

#[test]
fn fixture_wins_over_zone_and_table() {
    let f = Fixture { x: 520.0, y: 520.0, ..wide_fixture("f") };
    let s = Scene {
        fixtures: Arc::new(vec![f]),
        no_go: Arc::new(vec![zone("z")]),
        tables: Arc::new(vec![table_at("t", 500.0, 500.0)]),
        ..scene()
    };
    assert_eq!(hit(pt(530.0, 530.0), &s), Some(Hit::FixtureBody { id: "f".into() }));
}

// =============================================================
// Zones
// =============================================================

#[test]
fn zone_handle_and_body() {
    let s = Scene { no_go: Arc::new(vec![zone("z")]), ..scene() };
    assert_eq!(
        hit(pt(600.0, 600.0), &s),
        Some(Hit::ZoneHandle { kind: ZoneKind::NoGo, id: "z".into(), handle: ResizeHandle::Corner })
    );
    assert_eq!(hit(pt(520.0, 520.0), &s), Some(Hit::ZoneBody { kind: ZoneKind::NoGo, id: "z".into() }));
}

#[test]
fn shape_restricted_zones_are_hit_with_their_kind() {
    let s = Scene { round_only_zones: Arc::new(vec![zone("r")]), ..scene() };
    assert_eq!(hit(pt(520.0, 520.0), &s), Some(Hit::ZoneBody { kind: ZoneKind::RoundOnly, id: "r".into() }));
    let s = Scene { rect_only_zones: Arc::new(vec![zone("t")]), ..scene() };
    assert_eq!(
        hit(pt(600.0, 550.0), &s),
        Some(Hit::ZoneHandle { kind: ZoneKind::RectOnly, id: "t".into(), handle: ResizeHandle::Right })
    );
}

#[test]
fn no_go_zone_sits_above_shape_restricted_zones() {
    let s = Scene {
        no_go: Arc::new(vec![zone("n")]),
        round_only_zones: Arc::new(vec![zone("r")]),
        rect_only_zones: Arc::new(vec![zone("t")]),
        ..scene()
    };
    assert_eq!(hit(pt(520.0, 520.0), &s), Some(Hit::ZoneBody { kind: ZoneKind::NoGo, id: "n".into() }));
    let s = Scene { no_go: Arc::new(vec![]), ..s };
    assert_eq!(hit(pt(520.0, 520.0), &s), Some(Hit::ZoneBody { kind: ZoneKind::RoundOnly, id: "r".into() }));
}

#[test]
fn zone_wins_over_table() {
    let s = Scene { no_go: Arc::new(vec![zone("z")]), tables: Arc::new(vec![table_at("t", 500.0, 500.0)]), ..scene() };
    assert_eq!(hit(pt(520.0, 520.0), &s), Some(Hit::ZoneBody { kind: ZoneKind::NoGo, id: "z".into() }));
}

// =============================================================
// Tables
// =============================================================

#[test]
fn topmost_table_wins() {
    let s = Scene { tables: Arc::new(vec![table_at("a", 100.0, 100.0), table_at("b", 150.0, 120.0)]), ..scene() };
    assert_eq!(hit(pt(160.0, 130.0), &s), Some(Hit::TableBody { id: "b".into() }));
    assert_eq!(hit(pt(110.0, 105.0), &s), Some(Hit::TableBody { id: "a".into() }));
}

#[test]
fn locked_table_is_transparent() {
    let locked = Table { locked: true, ..table_at("a", 100.0, 100.0) };
    let s = Scene { tables: Arc::new(vec![locked]), ..scene() };
    assert_eq!(hit(pt(110.0, 110.0), &s), None);
}

#[test]
fn round_table_hit_uses_circle() {
    let round = Table { x: 300.0, y: 300.0, ..Table::new_of_kind("r", TableKind::Round, 10) };
    let s = Scene { tables: Arc::new(vec![round]), ..scene() };
    assert_eq!(hit(pt(330.0, 330.0), &s), Some(Hit::TableBody { id: "r".into() }));
    // Inside the bounding box, outside the circle.
    assert_eq!(hit(pt(345.0, 345.0), &s), None);
}

// =============================================================
// Room
// =============================================================

#[test]
fn room_handles() {
    let s = scene();
    assert_eq!(hit(pt(1200.0, 800.0), &s), Some(Hit::RoomHandle(ResizeHandle::Corner)));
    assert_eq!(hit(pt(1200.0, 400.0), &s), Some(Hit::RoomHandle(ResizeHandle::Right)));
    assert_eq!(hit(pt(600.0, 800.0), &s), Some(Hit::RoomHandle(ResizeHandle::Bottom)));
    assert_eq!(hit(pt(700.0, 300.0), &s), None);
}

#[test]
fn hit_handle_accessor() {
    assert_eq!(Hit::RoomHandle(ResizeHandle::Right).handle(), Some(ResizeHandle::Right));
    assert_eq!(Hit::TableBody { id: "t".into() }.handle(), None);
}

// =============================================================
// Screen-space margin
// =============================================================

#[test]
fn handle_margin_is_constant_on_screen() {
    let s = Scene { fixtures: Arc::new(vec![wide_fixture("f")]), ..scene() };
    let near_corner = pt(305.0, 265.0);
    assert!(hit_test(near_corner, &s, &Camera::default()).is_some());
    let zoomed = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    assert_eq!(hit_test(near_corner, &s, &zoomed), None);
    let zoomed_out = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    assert_eq!(
        hit_test(pt(320.0, 280.0), &s, &zoomed_out),
        Some(Hit::FixtureHandle { id: "f".into(), handle: ResizeHandle::Corner })
    );
}
