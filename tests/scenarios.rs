//! End-to-end editing scenarios driven through the public pointer API.

use std::sync::Arc;

use floorplan::camera::Point;
use floorplan::collision::{scene_is_valid, table_collides};
use floorplan::doc::{Column, Room, Scene, Table, TableKind, Wall, Zone};
use floorplan::engine::{Action, EngineCore};
use floorplan::geometry::{Circle, Rect};
use floorplan::input::{Button, Modifiers};

fn editor(scene: Scene) -> EngineCore {
    let mut core = EngineCore::new();
    core.load_scene(scene);
    core.set_viewport(1280.0, 900.0, 1.0);
    core
}

fn room_1200x800(tables: Vec<Table>) -> Scene {
    Scene { room: Room { width: 1200.0, height: 800.0, grid: 50.0 }, tables: Arc::new(tables), ..Scene::default() }
}

fn rect_table(id: &str, x: f64, y: f64) -> Table {
    Table { x, y, ..Table::new_of_kind(id, TableKind::Rect, 6) }
}

fn round_table(id: &str, x: f64, y: f64) -> Table {
    Table { x, y, ..Table::new_of_kind(id, TableKind::Round, 10) }
}

/// Press at `from`, move through `path`, release. All points in world units.
fn drag(core: &mut EngineCore, from: (f64, f64), path: &[(f64, f64)]) -> Vec<Action> {
    let to_screen = |core: &EngineCore, (x, y): (f64, f64)| core.camera.world_to_screen(Point::new(x, y));
    let mut actions = core.on_pointer_down(to_screen(core, from), Button::Primary, Modifiers::default());
    for &p in path {
        let screen = to_screen(core, p);
        actions.extend(core.on_pointer_move(screen, Modifiers::default()));
    }
    actions.extend(core.on_pointer_up(Point::new(0.0, 0.0), Button::Primary, Modifiers::default()));
    actions
}

fn position(core: &EngineCore, id: &str) -> Option<(f64, f64)> {
    core.committed_scene().table(id).map(|t| (t.x, t.y))
}

#[test]
fn table_dragged_out_of_room_rolls_back() {
    let mut core = editor(room_1200x800(vec![rect_table("A", 100.0, 100.0)]));
    drag(&mut core, (110.0, 110.0), &[(1160.0, 110.0)]);
    assert_eq!(position(&core, "A"), Some((100.0, 100.0)));
}

#[test]
fn round_table_dropped_on_neighbour_rolls_back() {
    let mut core = editor(room_1200x800(vec![round_table("T1", 300.0, 300.0), round_table("T2", 500.0, 300.0)]));
    let actions = drag(&mut core, (500.0, 300.0), &[(340.0, 300.0)]);
    assert_eq!(position(&core, "T2"), Some((500.0, 300.0)));
    assert!(!actions.iter().any(|a| matches!(a, Action::SceneChanged(_))));
}

#[test]
fn rollback_goes_to_last_valid_point_on_path() {
    let mut core = editor(room_1200x800(vec![round_table("T1", 300.0, 300.0), round_table("T2", 500.0, 300.0)]));
    drag(&mut core, (500.0, 300.0), &[(550.0, 400.0), (450.0, 400.0), (340.0, 300.0)]);
    assert_eq!(position(&core, "T2"), Some((450.0, 400.0)));
}

#[test]
fn committed_scene_stays_collision_free() {
    let scene = Scene {
        walls: Arc::new(vec![Wall::new("w1", Rect::new(600.0, 0.0, 20.0, 300.0))]),
        columns: Arc::new(vec![Column::new("c1", Circle::new(900.0, 600.0, 25.0))]),
        no_go: Arc::new(vec![Zone::new("z1", Rect::new(0.0, 650.0, 300.0, 150.0))]),
        ..room_1200x800(vec![
            rect_table("A", 100.0, 100.0),
            rect_table("B", 300.0, 100.0),
            round_table("C", 800.0, 400.0),
            round_table("D", 300.0, 450.0),
        ])
    };
    let mut core = editor(scene);
    assert!(scene_is_valid(core.committed_scene()));

    let attempts: &[((f64, f64), &[(f64, f64)])] = &[
        ((110.0, 110.0), &[(300.0, 110.0), (610.0, 110.0)]),
        ((310.0, 110.0), &[(600.0, 200.0)]),
        ((800.0, 400.0), &[(900.0, 500.0), (900.0, 600.0)]),
        ((300.0, 450.0), &[(150.0, 700.0)]),
        ((300.0, 450.0), &[(700.0, 450.0)]),
        ((110.0, 110.0), &[(1100.0, 50.0)]),
    ];
    for (from, path) in attempts {
        drag(&mut core, *from, path);
        let committed = core.committed_scene();
        assert!(scene_is_valid(committed), "invalid scene after drag from {from:?}");
        for t in committed.tables.iter() {
            assert!(!table_collides(t, committed), "table {} collides", t.id);
        }
    }
}

#[test]
fn locked_table_survives_any_pointer_sequence() {
    let locked = Table { locked: true, ..rect_table("A", 100.0, 100.0) };
    let original = locked.clone();
    let mut core = editor(room_1200x800(vec![locked]));
    drag(&mut core, (110.0, 110.0), &[(400.0, 400.0)]);
    drag(&mut core, (220.0, 160.0), &[(500.0, 500.0)]);
    core.on_pointer_leave();
    assert_eq!(core.committed_scene().table("A"), Some(&original));
}

#[test]
fn zone_threshold() {
    let mut core = editor(room_1200x800(vec![]));
    core.config.show_grid = false;
    core.set_draw_no_go_mode(true);

    drag(&mut core, (400.0, 400.0), &[(409.0, 450.0)]);
    assert!(core.committed_scene().no_go.is_empty());

    drag(&mut core, (400.0, 400.0), &[(410.0, 410.0)]);
    assert_eq!(core.committed_scene().no_go.len(), 1);
}

#[test]
fn scene_round_trips_through_engine_json() {
    let json = r#"{
        "room": {"width": 1200, "height": 800, "grid": 50},
        "tables": [{"id": "A", "kind": "rect", "x": 100, "y": 100, "w": 120, "h": 60}],
        "no_go": null
    }"#;
    let mut core = EngineCore::new();
    core.load_scene_json(json).expect("scene parses");
    let actions = drag(&mut core, (110.0, 110.0), &[(310.0, 110.0)]);
    let Some(Action::SceneChanged(scene)) = actions.iter().find(|a| matches!(a, Action::SceneChanged(_))) else {
        panic!("expected a committed scene");
    };
    let out = serde_json::to_value(scene).expect("scene serializes");
    assert_eq!(out["tables"][0]["x"], 300.0);
    assert_eq!(out["tables"][0]["w"], 120.0);
    assert_eq!(out["no_go"], serde_json::json!([]));
}

fn committed(actions: &[Action]) -> Option<&Scene> {
    actions.iter().find_map(|a| match a {
        Action::SceneChanged(scene) => Some(scene),
        _ => None,
    })
}

#[test]
fn page_owned_fields_survive_a_drag() {
    let json = r#"{
        "version": 3,
        "room": {"width": 1200, "height": 800, "grid": 50},
        "tables": [
            {"id": "A", "kind": "rect", "x": 100, "y": 100, "w": 120, "h": 60, "rotation": 15, "capacity": 4.0},
            {"id": "B", "kind": "round", "x": 600, "y": 400, "r": 40, "zone": "terrace"}
        ],
        "walls": [{"id": "w1", "x": 1000, "y": 0, "w": 20, "h": 300, "material": "glass"}, {"id": "bad"}],
        "round_only_zones": [{"id": "zr_1", "x": 500, "y": 300, "w": 200, "h": 200, "note": "booths"}],
        "rect_only_zones": []
    }"#;
    let mut core = EngineCore::new();
    core.load_scene_json(json).expect("scene parses");
    assert_eq!(core.committed_scene().walls.len(), 1);

    let actions = drag(&mut core, (110.0, 110.0), &[(310.0, 110.0)]);
    let scene = committed(&actions).expect("expected a committed scene");
    let out = serde_json::to_value(scene).expect("scene serializes");
    assert_eq!(out["version"], 3);
    assert_eq!(out["tables"][0]["x"], 300.0);
    assert_eq!(out["tables"][0]["rotation"], 15);
    assert_eq!(out["tables"][0]["capacity"], 4);
    assert_eq!(out["tables"][1]["zone"], "terrace");
    assert_eq!(out["walls"][0]["material"], "glass");
    assert_eq!(out["round_only_zones"][0]["id"], "zr_1");
    assert_eq!(out["round_only_zones"][0]["note"], "booths");
    assert_eq!(out["rect_only_zones"], serde_json::json!([]));
}

#[test]
fn rect_table_may_sit_in_a_round_only_zone() {
    let scene = Scene {
        round_only_zones: Arc::new(vec![Zone::new("zr", Rect::new(0.0, 0.0, 600.0, 600.0))]),
        ..room_1200x800(vec![rect_table("A", 100.0, 100.0)])
    };
    let mut core = editor(scene);
    drag(&mut core, (110.0, 110.0), &[(310.0, 310.0)]);
    assert_eq!(position(&core, "A"), Some((300.0, 300.0)));
    assert!(scene_is_valid(core.committed_scene()));
}
