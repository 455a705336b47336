//! Rendering: turns the editor state into an ordered list of draw commands.
//!
//! This module decides what to draw, never when. It reads the scene, the
//! assignment overlay, the camera, the mode flags and the active gesture, and
//! returns plain [`DrawCommand`] values without touching any browser API.
//! [`crate::paint`] replays them onto a real canvas.
//!
//! Commands between [`DrawCommand::PushTransform`] and
//! [`DrawCommand::PopTransform`] are in world units. Everything else is in
//! CSS pixels. Line widths, handle sizes and font sizes inside the world
//! transform are divided by the zoom so they stay constant on screen.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point};
use crate::collision::{table_collides, zone_collides};
use crate::config::EditorConfig;
use crate::consts::{DEFAULT_GRID, ELEMENT_HANDLE_PX, ROOM_HANDLE_PX};
use crate::doc::{AssignmentMap, EntityId, Fixture, Footprint, Room, Scene, Table, TableKind, Zone, ZoneKind};
use crate::geometry::{Circle, Rect, Shape};
use crate::input::InputState;

pub const GRID_COLOR: &str = "rgba(180,180,200,0.4)";
pub const ROOM_COLOR: &str = "#222";
pub const WALL_COLOR: &str = "#999";
pub const COLUMN_COLOR: &str = "#666";
pub const ZONE_COLOR: &str = "#bbb";
pub const ROUND_ONLY_ZONE_COLOR: &str = "#6af";
pub const RECT_ONLY_ZONE_COLOR: &str = "#6c9";
pub const ZONE_HANDLE_COLOR: &str = "#555";
pub const ZONE_LABEL_COLOR: &str = "#333";
pub const DRAFT_FILL_COLOR: &str = "#c66";
pub const DRAFT_STROKE_COLOR: &str = "#c00";
pub const ROUND_ONLY_DRAFT_STROKE_COLOR: &str = "#06c";
pub const RECT_ONLY_DRAFT_STROKE_COLOR: &str = "#095";
pub const SELECTION_COLOR: &str = "#1E90FF";
pub const FIXTURE_COLOR: &str = "#8b8";
pub const FIXTURE_HANDLE_COLOR: &str = "#444";
pub const FIXTURE_LABEL_COLOR: &str = "#111";
pub const TABLE_FIXED_COLOR: &str = "#2c7";
pub const TABLE_RECT_COLOR: &str = "#39f";
pub const TABLE_OTHER_COLOR: &str = "#f93";
pub const TABLE_LOCKED_COLOR: &str = "#2a5";
pub const TABLE_OUTLINE_COLOR: &str = "#111";
pub const TABLE_TEXT_COLOR: &str = "#fff";
pub const ASSIGNMENT_TEXT_COLOR: &str = "#000";
/// Outline for tables in an invalid spot and zones covering a table.
pub const COLLISION_COLOR: &str = "#e00";

const DRAFT_ALPHA: f64 = 0.35;
const DRAFT_DASH_PX: f64 = 6.0;
/// Shape-restricted zones are tinted so tables stay readable on top.
const SHAPE_ZONE_ALPHA: f64 = 0.25;
/// Zone letter offset from the zone's top-left corner, in world units.
const ZONE_LABEL_INSET: f64 = 10.0;
const SELECTION_DASH_PX: f64 = 4.0;
/// Gap between a selected table and its selection box, in screen pixels.
const SELECTION_PAD_PX: f64 = 4.0;
const OUTLINE_PX: f64 = 2.0;
const LABEL_FONT_PX: f64 = 16.0;
const CAPACITY_FONT_PX: f64 = 14.0;
const SMALL_FONT_PX: f64 = 12.0;
/// Assignment text offset from the table's right edge and top, in world units.
const ASSIGNMENT_DX: f64 = 6.0;
const ASSIGNMENT_DY: f64 = 10.0;
/// Grid lines closer together than this on screen are skipped.
const MIN_GRID_STEP_PX: f64 = 4.0;

/// Horizontal text anchor. Text is always vertically centred on its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole viewport.
    Clear { width: f64, height: f64 },
    /// Straight stroked line.
    Line { from: Point, to: Point, stroke: &'static str, line_width: f64 },
    /// Enter world space for the given camera.
    PushTransform(Camera),
    /// Leave the innermost pushed transform.
    PopTransform,
    FillRect { rect: Rect, fill: &'static str, alpha: f64 },
    /// Stroked rectangle, optionally dashed with equal dash and gap lengths.
    StrokeRect { rect: Rect, stroke: &'static str, line_width: f64, dash: Option<f64> },
    FillCircle { circle: Circle, fill: &'static str },
    StrokeCircle { circle: Circle, stroke: &'static str, line_width: f64 },
    Text { at: Point, text: String, font_px: f64, fill: &'static str, align: TextAlign },
}

/// Everything `render` reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub scene: &'a Scene,
    pub assignments: &'a AssignmentMap,
    pub camera: &'a Camera,
    pub config: &'a EditorConfig,
    pub input: &'a InputState,
    /// Selected table ids.
    pub selection: &'a [EntityId],
    /// Viewport size in CSS pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// Build the full frame, bottom layer first.
#[must_use]
pub fn render(frame: &RenderInput<'_>) -> Vec<DrawCommand> {
    let mut out = vec![DrawCommand::Clear { width: frame.viewport_width, height: frame.viewport_height }];

    if frame.config.show_grid {
        grid_lines(&mut out, frame);
    }

    let scene = frame.scene;
    let zoom = frame.camera.zoom;
    out.push(DrawCommand::PushTransform(*frame.camera));

    room(&mut out, &scene.room, zoom);
    for wall in scene.walls.iter() {
        out.push(DrawCommand::FillRect { rect: wall.rect(), fill: WALL_COLOR, alpha: 1.0 });
    }
    for column in scene.columns.iter() {
        out.push(DrawCommand::FillCircle { circle: column.circle(), fill: COLUMN_COLOR });
    }
    for kind in ZoneKind::ALL.into_iter().rev() {
        for zone in scene.zones(kind).iter() {
            zone_cmds(&mut out, kind, zone, scene, frame.config.editable, zoom);
        }
    }
    if let Some((kind, draft)) = frame.input.draft_zone() {
        let (fill, stroke) = draft_colors(kind);
        out.push(DrawCommand::FillRect { rect: draft, fill, alpha: DRAFT_ALPHA });
        out.push(DrawCommand::StrokeRect {
            rect: draft,
            stroke,
            line_width: OUTLINE_PX / zoom,
            dash: Some(DRAFT_DASH_PX / zoom),
        });
    }
    for fixture in scene.fixtures.iter() {
        fixture_cmds(&mut out, fixture, frame.config.editable, zoom);
    }
    for table in scene.tables.iter() {
        table_cmds(&mut out, table, scene, frame.assignments, zoom);
        if frame.selection.contains(&table.id) {
            selection_box(&mut out, table, zoom);
        }
    }

    out.push(DrawCommand::PopTransform);
    out
}

// =============================================================
// Layers
// =============================================================

/// Screen-space grid, phase-aligned with the pan offset.
fn grid_lines(out: &mut Vec<DrawCommand>, frame: &RenderInput<'_>) {
    let grid = if frame.scene.room.grid > 0.0 { frame.scene.room.grid } else { DEFAULT_GRID };
    let step = grid * frame.camera.zoom;
    if !step.is_finite() || step < MIN_GRID_STEP_PX {
        return;
    }
    let (w, h) = (frame.viewport_width, frame.viewport_height);
    let ox = frame.camera.pan_x % step;
    let oy = frame.camera.pan_y % step;

    let mut x = 0.0;
    while x < w + step {
        out.push(grid_line(Point::new(ox + x, 0.0), Point::new(ox + x, h)));
        x += step;
    }
    let mut y = 0.0;
    while y < h + step {
        out.push(grid_line(Point::new(0.0, oy + y), Point::new(w, oy + y)));
        y += step;
    }
}

fn grid_line(from: Point, to: Point) -> DrawCommand {
    DrawCommand::Line { from, to, stroke: GRID_COLOR, line_width: 1.0 }
}

fn room(out: &mut Vec<DrawCommand>, room: &Room, zoom: f64) {
    let rect = room.rect();
    out.push(DrawCommand::StrokeRect { rect, stroke: ROOM_COLOR, line_width: OUTLINE_PX / zoom, dash: None });
    rect_handles(out, &rect, ROOM_HANDLE_PX / zoom, ROOM_COLOR);
}

fn zone_cmds(out: &mut Vec<DrawCommand>, kind: ZoneKind, zone: &Zone, scene: &Scene, editable: bool, zoom: f64) {
    let rect = zone.rect();
    match kind {
        ZoneKind::NoGo => out.push(DrawCommand::FillRect { rect, fill: ZONE_COLOR, alpha: 1.0 }),
        ZoneKind::RoundOnly | ZoneKind::RectOnly => {
            let (fill, letter) =
                if kind == ZoneKind::RoundOnly { (ROUND_ONLY_ZONE_COLOR, "R") } else { (RECT_ONLY_ZONE_COLOR, "T") };
            out.push(DrawCommand::FillRect { rect, fill, alpha: SHAPE_ZONE_ALPHA });
            out.push(DrawCommand::Text {
                at: Point::new(rect.x + ZONE_LABEL_INSET, rect.y + ZONE_LABEL_INSET),
                text: letter.to_string(),
                font_px: SMALL_FONT_PX / zoom,
                fill: ZONE_LABEL_COLOR,
                align: TextAlign::Left,
            });
        }
    }
    if zone_collides(kind, zone, scene) {
        out.push(DrawCommand::StrokeRect { rect, stroke: COLLISION_COLOR, line_width: OUTLINE_PX / zoom, dash: None });
    }
    if editable {
        rect_handles(out, &rect, ELEMENT_HANDLE_PX / zoom, ZONE_HANDLE_COLOR);
    }
}

fn draft_colors(kind: ZoneKind) -> (&'static str, &'static str) {
    match kind {
        ZoneKind::NoGo => (DRAFT_FILL_COLOR, DRAFT_STROKE_COLOR),
        ZoneKind::RoundOnly => (ROUND_ONLY_ZONE_COLOR, ROUND_ONLY_DRAFT_STROKE_COLOR),
        ZoneKind::RectOnly => (RECT_ONLY_ZONE_COLOR, RECT_ONLY_DRAFT_STROKE_COLOR),
    }
}

fn fixture_cmds(out: &mut Vec<DrawCommand>, fixture: &Fixture, editable: bool, zoom: f64) {
    let shape = fixture.shape();
    out.push(fill_shape(shape, FIXTURE_COLOR));
    if let Some(label) = fixture.label.as_deref().filter(|l| !l.is_empty()) {
        out.push(DrawCommand::Text {
            at: shape_center(shape),
            text: label.to_string(),
            font_px: SMALL_FONT_PX / zoom,
            fill: FIXTURE_LABEL_COLOR,
            align: TextAlign::Center,
        });
    }
    if editable && !fixture.locked {
        let size = ELEMENT_HANDLE_PX / zoom;
        match shape {
            Shape::Rect(r) => rect_handles(out, &r, size, FIXTURE_HANDLE_COLOR),
            Shape::Circle(c) => out.push(handle(Point::new(c.x + c.r, c.y), size, FIXTURE_HANDLE_COLOR)),
        }
    }
}

fn table_cmds(out: &mut Vec<DrawCommand>, table: &Table, scene: &Scene, assignments: &AssignmentMap, zoom: f64) {
    let shape = table.shape();
    let outline = if table_collides(table, scene) { COLLISION_COLOR } else { TABLE_OUTLINE_COLOR };
    let line_width = OUTLINE_PX / zoom;

    out.push(fill_shape(shape, table_color(table)));
    out.push(match shape {
        Shape::Rect(rect) => DrawCommand::StrokeRect { rect, stroke: outline, line_width, dash: None },
        Shape::Circle(circle) => DrawCommand::StrokeCircle { circle, stroke: outline, line_width },
    });

    let (text, font_px) = match table.label.as_deref().filter(|l| !l.is_empty()) {
        Some(label) => (label.to_string(), LABEL_FONT_PX),
        None => (table.effective_capacity().to_string(), CAPACITY_FONT_PX),
    };
    out.push(DrawCommand::Text {
        at: shape_center(shape),
        text,
        font_px: font_px / zoom,
        fill: TABLE_TEXT_COLOR,
        align: TextAlign::Center,
    });

    if let Some(a) = assignments.get(&table.id) {
        let right = match table.footprint {
            Footprint::Rect { w, .. } => table.x + w,
            Footprint::Round { r } => table.x + r,
        };
        out.push(DrawCommand::Text {
            at: Point::new(right + ASSIGNMENT_DX, table.y + ASSIGNMENT_DY),
            text: format!("{} ({})", a.guest_name, a.party_size),
            font_px: SMALL_FONT_PX / zoom,
            fill: ASSIGNMENT_TEXT_COLOR,
            align: TextAlign::Left,
        });
    }
}

/// Dashed box around a selected table's bounds.
fn selection_box(out: &mut Vec<DrawCommand>, table: &Table, zoom: f64) {
    let b = table.shape().bounds();
    let pad = SELECTION_PAD_PX / zoom;
    out.push(DrawCommand::StrokeRect {
        rect: Rect::new(b.x - pad, b.y - pad, b.w + 2.0 * pad, b.h + 2.0 * pad),
        stroke: SELECTION_COLOR,
        line_width: 1.0 / zoom,
        dash: Some(SELECTION_DASH_PX / zoom),
    });
}

/// Fill color by kind; locked tables override it.
#[must_use]
pub fn table_color(table: &Table) -> &'static str {
    if table.locked {
        return TABLE_LOCKED_COLOR;
    }
    match table.kind {
        TableKind::Fixed => TABLE_FIXED_COLOR,
        TableKind::Rect => TABLE_RECT_COLOR,
        TableKind::Round | TableKind::Sofa | TableKind::Standing => TABLE_OTHER_COLOR,
    }
}

// =============================================================
// Primitives
// =============================================================

fn fill_shape(shape: Shape, fill: &'static str) -> DrawCommand {
    match shape {
        Shape::Rect(rect) => DrawCommand::FillRect { rect, fill, alpha: 1.0 },
        Shape::Circle(circle) => DrawCommand::FillCircle { circle, fill },
    }
}

fn shape_center(shape: Shape) -> Point {
    match shape {
        Shape::Rect(r) => r.center(),
        Shape::Circle(c) => c.center(),
    }
}

/// Bottom-right corner, right-mid and bottom-mid handles.
fn rect_handles(out: &mut Vec<DrawCommand>, r: &Rect, size: f64, fill: &'static str) {
    out.push(handle(Point::new(r.right(), r.bottom()), size, fill));
    out.push(handle(Point::new(r.right(), r.y + r.h / 2.0), size, fill));
    out.push(handle(Point::new(r.x + r.w / 2.0, r.bottom()), size, fill));
}

fn handle(center: Point, size: f64, fill: &'static str) -> DrawCommand {
    DrawCommand::FillRect { rect: Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size), fill, alpha: 1.0 }
}
