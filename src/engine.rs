use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, clamp_zoom, snap};
use crate::collision::table_collides;
use crate::config::EditorConfig;
use crate::consts::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, MIN_RADIUS, MIN_SIZE, MIN_ZONE_SIZE, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};
use crate::doc::{AssignmentMap, EntityId, Fixture, Footprint, Room, Scene, Table, Zone, ZoneKind};
use crate::error::EditorError;
use crate::geometry::Rect;
use crate::hit::{Hit, hit_test};
use crate::input::{Button, Cursor, InputState, Modifiers, ResizeHandle, UiState, WheelDelta};
use crate::paint::paint;
use crate::render::{DrawCommand, RenderInput, render};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A gesture or command produced a new committed scene. The host persists it.
    SceneChanged(Scene),
    /// The view moved. The host may remember it per plan.
    ViewChanged(Camera),
    /// The user asked to rename a fixture. The host prompts and calls
    /// [`EngineCore::set_fixture_label`].
    EditLabelRequested { id: EntityId, current: String },
    /// The set of selected tables changed. Ids are in click order.
    SelectionChanged(Vec<EntityId>),
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    /// Working scene. Equals `committed` whenever no gesture is active.
    pub scene: Scene,
    committed: Scene,
    pub assignments: AssignmentMap,
    pub camera: Camera,
    pub config: EditorConfig,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            committed: Scene::default(),
            assignments: AssignmentMap::default(),
            camera: Camera::initial(),
            config: EditorConfig::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the scene with one handed in by the host. Any active gesture is
    /// dropped and selected tables that no longer exist are deselected.
    pub fn load_scene(&mut self, scene: Scene) -> Vec<Action> {
        if !self.input.is_idle() {
            tracing::debug!(gesture = self.input.name(), "scene replaced during gesture; gesture dropped");
        }
        self.input = InputState::Idle;
        self.committed = scene.clone();
        self.scene = scene;
        self.set_selection(self.ui.selected.clone())
    }

    /// Parse and load a scene.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SceneParse`] when the JSON is not a scene. The
    /// current scene is kept in that case.
    pub fn load_scene_json(&mut self, json: &str) -> Result<Vec<Action>, EditorError> {
        Ok(self.load_scene(Scene::from_json(json)?))
    }

    pub fn set_assignments(&mut self, assignments: AssignmentMap) {
        self.assignments = assignments;
    }

    /// Parse and set the assignment overlay.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::AssignmentsParse`] on malformed JSON.
    pub fn set_assignments_json(&mut self, json: &str) -> Result<(), EditorError> {
        self.set_assignments(AssignmentMap::from_json(json)?);
        Ok(())
    }

    /// Apply all mode flags at once. Draw flags are taken as given; when
    /// several are set, [`EditorConfig::draw_zone_kind`] decides which one draws.
    pub fn set_config(&mut self, config: EditorConfig) -> Vec<Action> {
        let mut actions = self.set_editable(config.editable);
        actions.extend(self.set_show_grid(config.show_grid));
        if config != self.config {
            self.config = config;
            actions.extend(self.discard_stale_draft());
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Parse and apply the mode flags.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ConfigParse`] on malformed JSON.
    pub fn set_config_json(&mut self, json: &str) -> Result<Vec<Action>, EditorError> {
        Ok(self.set_config(EditorConfig::from_json(json)?))
    }

    /// Switching to view-only ends the active gesture as a release would.
    pub fn set_editable(&mut self, editable: bool) -> Vec<Action> {
        if self.config.editable == editable {
            return Vec::new();
        }
        let mut actions = if editable { Vec::new() } else { self.end_gesture() };
        self.config.editable = editable;
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_show_grid(&mut self, show_grid: bool) -> Vec<Action> {
        if self.config.show_grid == show_grid {
            return Vec::new();
        }
        self.config.show_grid = show_grid;
        vec![Action::RenderNeeded]
    }

    /// Turn drawing of `kind` zones on or off. Turning one kind on turns the
    /// others off. A draft of a kind that no longer draws is discarded.
    pub fn set_draw_mode(&mut self, kind: ZoneKind, on: bool) -> Vec<Action> {
        if self.config.draws(kind) == on {
            return Vec::new();
        }
        if on {
            for other in ZoneKind::ALL {
                self.config.set_draws(other, false);
            }
        }
        self.config.set_draws(kind, on);
        tracing::debug!(kind = kind.as_str(), on, "draw mode changed");
        let mut actions = self.discard_stale_draft();
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_draw_no_go_mode(&mut self, on: bool) -> Vec<Action> {
        self.set_draw_mode(ZoneKind::NoGo, on)
    }

    pub fn set_draw_round_only_mode(&mut self, on: bool) -> Vec<Action> {
        self.set_draw_mode(ZoneKind::RoundOnly, on)
    }

    pub fn set_draw_rect_only_mode(&mut self, on: bool) -> Vec<Action> {
        self.set_draw_mode(ZoneKind::RectOnly, on)
    }

    /// Replace the table selection. Unknown and repeated ids are dropped.
    pub fn set_selection(&mut self, ids: Vec<EntityId>) -> Vec<Action> {
        let mut selected: Vec<EntityId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.scene.table(&id).is_some() && !selected.contains(&id) {
                selected.push(id);
            }
        }
        if selected == self.ui.selected {
            return Vec::new();
        }
        tracing::debug!(count = selected.len(), "selection changed");
        self.ui.selected = selected.clone();
        vec![Action::SelectionChanged(selected), Action::RenderNeeded]
    }

    pub fn set_pan_mode(&mut self, on: bool) {
        self.ui.pan_mode = on;
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Set a fixture's label and commit. Empty labels clear it.
    pub fn set_fixture_label(&mut self, id: &str, label: String) -> Vec<Action> {
        let Some(fixture) = self.scene.fixture(id) else {
            tracing::warn!(fixture = %id, "label for unknown fixture ignored");
            return Vec::new();
        };
        let label = Some(label).filter(|l| !l.is_empty());
        let renamed = Fixture { label, ..fixture.clone() };
        self.scene = self.scene.with_fixture(renamed);
        tracing::debug!(fixture = %id, "fixture renamed");
        let mut actions = self.commit();
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Input events ---

    /// Start a gesture. A primary click also updates the table selection,
    /// in view-only mode too.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let panning = button == Button::Middle || (button == Button::Primary && self.ui.pan_mode);
        let world = self.camera.screen_to_world(screen_pt);
        let hit = hit_test(world, &self.scene, &self.camera);
        let mut actions =
            if button == Button::Primary && !panning { self.select_at(world, hit.as_ref(), modifiers) } else { Vec::new() };
        if !self.config.editable {
            return actions;
        }

        if panning {
            self.input = InputState::Panning { last_screen: screen_pt };
            tracing::debug!("pan started");
            actions.extend(self.set_cursor(Cursor::Grabbing));
            actions.push(Action::RenderNeeded);
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        let Some(state) = self.gesture_for(world, hit) else {
            return actions;
        };
        let cursor = match &state {
            InputState::ResizingFixture { handle, .. }
            | InputState::ResizingZone { handle, .. }
            | InputState::ResizingRoom { handle } => handle.cursor(),
            InputState::DrawingZone { .. } => Cursor::Crosshair,
            _ => Cursor::Move,
        };
        tracing::debug!(gesture = state.name(), x = world.x, y = world.y, "gesture started");
        self.input = state;

        actions.extend(self.set_cursor(cursor));
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        if self.input.is_idle() {
            return self.hover(world);
        }
        let grid = self.snap_grid();
        let snapped = |p: Point| Point::new(snap(p.x, grid), snap(p.y, grid));

        let mut view_changed = false;
        match &mut self.input {
            InputState::Idle => {}
            InputState::DraggingTable { id, grab, last_valid, invalid, .. } => {
                if let Some(table) = self.scene.table(id) {
                    let pos = snapped(Point::new(world.x - grab.x, world.y - grab.y));
                    let moved = table.moved_to(pos);
                    let collides = table_collides(&moved, &self.scene);
                    *invalid = collides;
                    if !collides {
                        *last_valid = pos;
                    }
                    tracing::trace!(table = %id, x = pos.x, y = pos.y, invalid = collides, "table moved");
                    self.scene = self.scene.with_table(moved);
                }
            }
            InputState::DraggingFixture { id, grab } => {
                if let Some(fixture) = self.scene.fixture(id) {
                    let pos = snapped(Point::new(world.x - grab.x, world.y - grab.y));
                    let moved = Fixture { x: pos.x, y: pos.y, ..fixture.clone() };
                    tracing::trace!(fixture = %id, x = pos.x, y = pos.y, "fixture moved");
                    self.scene = self.scene.with_fixture(moved);
                }
            }
            InputState::ResizingFixture { id, handle } => {
                if let Some(fixture) = self.scene.fixture(id) {
                    let footprint = match fixture.footprint {
                        Footprint::Round { .. } => {
                            let r = (world.x - fixture.x).hypot(world.y - fixture.y);
                            Footprint::Round { r: snap(r, grid).max(MIN_RADIUS) }
                        }
                        Footprint::Rect { w, h } => {
                            let r = resized(Rect::new(fixture.x, fixture.y, w, h), *handle, world, grid);
                            Footprint::Rect { w: r.w, h: r.h }
                        }
                    };
                    tracing::trace!(fixture = %id, ?footprint, "fixture resized");
                    let next = Fixture { footprint, ..fixture.clone() };
                    self.scene = self.scene.with_fixture(next);
                }
            }
            InputState::DraggingZone { kind, id, grab } => {
                if let Some(zone) = self.scene.zone(*kind, id) {
                    let pos = snapped(Point::new(world.x - grab.x, world.y - grab.y));
                    let moved = zone.with_rect(Rect::new(pos.x, pos.y, zone.w, zone.h));
                    tracing::trace!(zone = %id, x = pos.x, y = pos.y, "zone moved");
                    self.scene = self.scene.with_zone(*kind, moved);
                }
            }
            InputState::ResizingZone { kind, id, handle } => {
                if let Some(zone) = self.scene.zone(*kind, id) {
                    let next = zone.with_rect(resized(zone.rect(), *handle, world, grid));
                    tracing::trace!(zone = %id, w = next.w, h = next.h, "zone resized");
                    self.scene = self.scene.with_zone(*kind, next);
                }
            }
            InputState::ResizingRoom { handle } => {
                let r = resized(self.scene.room.rect(), *handle, world, grid);
                tracing::trace!(width = r.w, height = r.h, "room resized");
                let room = Room { width: r.w, height: r.h, ..self.scene.room };
                self.scene = self.scene.with_room(room);
            }
            InputState::DrawingZone { start, draft, .. } => {
                *draft = Rect::from_corners(*start, snapped(world));
            }
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                view_changed = true;
            }
        }

        if view_changed {
            vec![Action::ViewChanged(self.camera), Action::RenderNeeded]
        } else {
            vec![Action::RenderNeeded]
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    /// The pointer left the canvas. Handled exactly like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// Toggle the lock of the table (checked first) or fixture under the
    /// pointer. With Alt or Shift held, a fixture is renamed instead.
    pub fn on_double_click(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if !self.config.editable || !self.input.is_idle() {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);

        if let Some(table) = self.scene.tables.iter().rev().find(|t| t.shape().contains(world)) {
            let toggled = Table { locked: !table.locked, ..table.clone() };
            tracing::info!(table = %toggled.id, locked = toggled.locked, "table lock toggled");
            self.scene = self.scene.with_table(toggled);
        } else if let Some(fixture) = self.scene.fixtures.iter().rev().find(|f| f.shape().contains(world)) {
            if modifiers.is_rename() {
                return vec![Action::EditLabelRequested {
                    id: fixture.id.clone(),
                    current: fixture.label.clone().unwrap_or_default(),
                }];
            }
            let toggled = Fixture { locked: !fixture.locked, ..fixture.clone() };
            tracing::info!(fixture = %toggled.id, locked = toggled.locked, "fixture lock toggled");
            self.scene = self.scene.with_fixture(toggled);
        } else {
            return Vec::new();
        }

        let mut actions = self.commit();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Zoom about the cursor: scrolling down zooms out, up zooms in.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if !delta.dy.is_finite() || delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        let mut next = self.camera;
        next.zoom_at(screen_pt, self.camera.zoom * factor);
        self.apply_view(next)
    }

    // --- View ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_about_center(BUTTON_ZOOM_IN)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_about_center(BUTTON_ZOOM_OUT)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.apply_view(Camera::initial())
    }

    /// Restore a remembered view. The zoom is clamped and a non-finite pan
    /// falls back to the initial offset.
    pub fn set_view(&mut self, camera: Camera) -> Vec<Action> {
        let initial = Camera::initial();
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        self.apply_view(Camera {
            pan_x: finite_or(camera.pan_x, initial.pan_x),
            pan_y: finite_or(camera.pan_y, initial.pan_y),
            zoom: clamp_zoom(camera.zoom),
        })
    }

    // --- Queries ---

    /// The last scene handed to the host.
    #[must_use]
    pub fn committed_scene(&self) -> &Scene {
        &self.committed
    }

    /// Selected table ids, in click order.
    #[must_use]
    pub fn selection(&self) -> &[EntityId] {
        &self.ui.selected
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Draw commands for the current state.
    #[must_use]
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        render(&RenderInput {
            scene: &self.scene,
            assignments: &self.assignments,
            camera: &self.camera,
            config: &self.config,
            input: &self.input,
            selection: &self.ui.selected,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        })
    }

    // --- Internals ---

    /// The gesture a primary pointer-down on `hit` at `world` starts, if any.
    fn gesture_for(&self, world: Point, hit: Option<Hit>) -> Option<InputState> {
        let grab_from = |origin: Point| Point::new(world.x - origin.x, world.y - origin.y);
        let state = match hit {
            Some(Hit::FixtureHandle { id, handle }) => InputState::ResizingFixture { id, handle },
            Some(Hit::FixtureBody { id }) => {
                let grab = grab_from(self.scene.fixture(&id)?.position());
                InputState::DraggingFixture { id, grab }
            }
            Some(Hit::ZoneHandle { kind, id, handle }) => InputState::ResizingZone { kind, id, handle },
            Some(Hit::ZoneBody { kind, id }) => {
                let zone = self.scene.zone(kind, &id)?;
                let grab = grab_from(Point::new(zone.x, zone.y));
                InputState::DraggingZone { kind, id, grab }
            }
            Some(Hit::TableBody { id }) => {
                let origin = self.scene.table(&id)?.position();
                InputState::DraggingTable { id, grab: grab_from(origin), origin, last_valid: origin, invalid: false }
            }
            Some(Hit::RoomHandle(handle)) => InputState::ResizingRoom { handle },
            None => {
                let kind = self.config.draw_zone_kind()?;
                if !self.scene.room.contains(world) {
                    return None;
                }
                let grid = self.snap_grid();
                let start = Point::new(snap(world.x, grid), snap(world.y, grid));
                InputState::DrawingZone { kind, start, draft: Rect::new(start.x, start.y, 0.0, 0.0) }
            }
        };
        Some(state)
    }

    /// Finish the active gesture: roll back an invalid table drop, commit a
    /// large enough zone draft, and report the new scene if it changed.
    fn end_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => return Vec::new(),
            InputState::DraggingTable { id, origin, last_valid, invalid, .. } => {
                if invalid {
                    if let Some(table) = self.scene.table(&id) {
                        let restored = table.moved_to(last_valid);
                        self.scene = self.scene.with_table(restored);
                    }
                    tracing::info!(table = %id, x = last_valid.x, y = last_valid.y, "invalid drop; table rolled back");
                } else {
                    tracing::debug!(table = %id, from_x = origin.x, from_y = origin.y, "table drag committed");
                }
            }
            InputState::DrawingZone { kind, draft, .. } => {
                if draft.w >= MIN_ZONE_SIZE && draft.h >= MIN_ZONE_SIZE {
                    let zone = Zone::from_rect(kind, draft);
                    tracing::info!(zone = %zone.id, kind = kind.as_str(), w = draft.w, h = draft.h, "zone created");
                    self.scene = self.scene.with_added_zone(kind, zone);
                } else {
                    tracing::debug!(w = draft.w, h = draft.h, "zone draft too small; discarded");
                }
            }
            other => tracing::debug!(gesture = other.name(), "gesture committed"),
        }

        let mut actions = self.commit();
        actions.extend(self.set_cursor(Cursor::Default));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Report the working scene to the host if it differs from the last committed one.
    fn commit(&mut self) -> Vec<Action> {
        if self.scene == self.committed {
            return Vec::new();
        }
        self.committed = self.scene.clone();
        vec![Action::SceneChanged(self.scene.clone())]
    }

    /// Idle cursor feedback for the element under the pointer.
    fn hover(&mut self, world: Point) -> Vec<Action> {
        if !self.config.editable {
            return self.set_cursor(Cursor::Default).into_iter().collect();
        }
        let hit = hit_test(world, &self.scene, &self.camera);
        // Room handles give way to draw and pan mode; element handles do not.
        let room_handle = matches!(hit, Some(Hit::RoomHandle(_)));
        let cursor = match hit.as_ref().and_then(Hit::handle) {
            Some(handle) if !room_handle => handle.cursor(),
            _ if self.config.draw_zone_kind().is_some() => Cursor::Crosshair,
            _ if self.ui.pan_mode => Cursor::Grab,
            Some(handle) => handle.cursor(),
            None => Cursor::Default,
        };
        self.set_cursor(cursor).into_iter().collect()
    }

    /// Update the selection for a primary click. A table under the pointer
    /// is selected, locked ones included. Clicking empty space clears the
    /// selection; clicking another element leaves it alone. Shift, Ctrl or
    /// Meta toggle the clicked table instead of replacing the selection.
    fn select_at(&mut self, world: Point, hit: Option<&Hit>, modifiers: Modifiers) -> Vec<Action> {
        let target = match hit {
            Some(Hit::TableBody { id }) => Some(id.clone()),
            None => self.scene.tables.iter().rev().find(|t| t.shape().contains(world)).map(|t| t.id.clone()),
            Some(_) => return Vec::new(),
        };
        let mut next = self.ui.selected.clone();
        match target {
            Some(id) if modifiers.is_additive() => match next.iter().position(|s| *s == id) {
                Some(i) => {
                    next.remove(i);
                }
                None => next.push(id),
            },
            Some(id) => next = vec![id],
            None if modifiers.is_additive() => {}
            None => next.clear(),
        }
        self.set_selection(next)
    }

    /// Drop a zone draft whose kind is no longer the one being drawn.
    fn discard_stale_draft(&mut self) -> Vec<Action> {
        match self.input.draft_zone() {
            Some((kind, _)) if self.config.draw_zone_kind() != Some(kind) => {
                tracing::debug!(kind = kind.as_str(), "draw mode changed; zone draft discarded");
                self.input = InputState::Idle;
                self.set_cursor(Cursor::Default).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Option<Action> {
        if self.ui.cursor == cursor {
            return None;
        }
        self.ui.cursor = cursor;
        Some(Action::SetCursor(cursor))
    }

    /// Grid spacing to snap to, or 0 when snapping is off.
    fn snap_grid(&self) -> f64 {
        if self.config.snaps(self.scene.room.grid) { self.scene.room.grid } else { 0.0 }
    }

    fn zoom_about_center(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        let mut next = self.camera;
        next.zoom_at(center, self.camera.zoom * factor);
        self.apply_view(next)
    }

    fn apply_view(&mut self, camera: Camera) -> Vec<Action> {
        if camera == self.camera {
            return Vec::new();
        }
        self.camera = camera;
        tracing::trace!(pan_x = camera.pan_x, pan_y = camera.pan_y, zoom = camera.zoom, "view changed");
        vec![Action::ViewChanged(camera), Action::RenderNeeded]
    }
}

/// `rect` with the edges moved by `handle` following `world`, each new side
/// snapped to `grid` and then held at the minimum size.
fn resized(rect: Rect, handle: ResizeHandle, world: Point, grid: f64) -> Rect {
    let mut next = rect;
    if handle.moves_right_edge() {
        next.w = snap(world.x - rect.x, grid).max(MIN_SIZE);
    }
    if handle.moves_bottom_edge() {
        next.h = snap(world.y - rect.y, grid).max(MIN_SIZE);
    }
    next
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_scene(&mut self, scene: Scene) -> Vec<Action> {
        self.core.load_scene(scene)
    }

    /// # Errors
    ///
    /// See [`EngineCore::load_scene_json`].
    pub fn load_scene_json(&mut self, json: &str) -> Result<Vec<Action>, EditorError> {
        self.core.load_scene_json(json)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_assignments_json`].
    pub fn set_assignments_json(&mut self, json: &str) -> Result<(), EditorError> {
        self.core.set_assignments_json(json)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_config_json`].
    pub fn set_config_json(&mut self, json: &str) -> Result<Vec<Action>, EditorError> {
        self.core.set_config_json(json)
    }

    pub fn set_pan_mode(&mut self, on: bool) {
        self.core.set_pan_mode(on);
    }

    pub fn set_fixture_label(&mut self, id: &str, label: String) -> Vec<Action> {
        self.core.set_fixture_label(id, label)
    }

    pub fn set_draw_mode(&mut self, kind: ZoneKind, on: bool) -> Vec<Action> {
        self.core.set_draw_mode(kind, on)
    }

    pub fn set_selection(&mut self, ids: Vec<EntityId>) -> Vec<Action> {
        self.core.set_selection(ids)
    }

    // --- Viewport ---

    /// Update viewport dimensions and size the backing store for the device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_double_click(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_double_click(screen_pt, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    // --- View ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    pub fn set_view(&mut self, camera: Camera) -> Vec<Action> {
        self.core.set_view(camera)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Canvas`] when the canvas has no 2D context or a
    /// drawing call fails.
    pub fn render(&self) -> Result<(), EditorError> {
        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|e| EditorError::Canvas(format!("{e:?}")))?
            .ok_or_else(|| EditorError::Canvas("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EditorError::Canvas("context is not 2d".into()))?;
        paint(&ctx, &self.core.draw_commands(), self.core.dpr).map_err(|e| EditorError::Canvas(format!("{e:?}")))
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn committed_scene(&self) -> &Scene {
        self.core.committed_scene()
    }

    #[must_use]
    pub fn selection(&self) -> &[EntityId] {
        self.core.selection()
    }
}
