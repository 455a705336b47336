//! Shared numeric constants for the floor-plan engine.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom multiplier for one wheel notch toward the user (content shrinks).
pub const WHEEL_ZOOM_OUT: f64 = 0.85;

/// Zoom multiplier for one wheel notch away from the user (content grows).
pub const WHEEL_ZOOM_IN: f64 = 1.15;

/// Toolbar zoom-in multiplier (+30%).
pub const BUTTON_ZOOM_IN: f64 = 1.3;

/// Toolbar zoom-out multiplier (−30%).
pub const BUTTON_ZOOM_OUT: f64 = 0.7;

/// Initial pan offset in screen pixels, leaving a margin around the room origin.
pub const DEFAULT_VIEW_OFFSET_PX: f64 = 50.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit margin in pixels for resize handles, independent of zoom.
pub const HANDLE_MARGIN_PX: f64 = 12.0;

/// Drawn size of room handles in screen pixels.
pub const ROOM_HANDLE_PX: f64 = 8.0;

/// Drawn size of zone and fixture handles in screen pixels.
pub const ELEMENT_HANDLE_PX: f64 = 6.0;

// ── Sizes (world units) ─────────────────────────────────────────

/// Minimum width/height after a resize.
pub const MIN_SIZE: f64 = 10.0;

/// Minimum radius after a round-fixture resize.
pub const MIN_RADIUS: f64 = 5.0;

/// A drafted no-go zone must reach this width and height to be kept.
pub const MIN_ZONE_SIZE: f64 = 10.0;

/// Room used when the scene carries none (or an unusable one).
pub const DEFAULT_ROOM_WIDTH: f64 = 1200.0;
pub const DEFAULT_ROOM_HEIGHT: f64 = 800.0;
pub const DEFAULT_GRID: f64 = 50.0;

/// Default rectangular table footprint.
pub const DEFAULT_TABLE_W: f64 = 120.0;
pub const DEFAULT_TABLE_H: f64 = 60.0;

/// Default sofa footprint.
pub const DEFAULT_SOFA_W: f64 = 180.0;
pub const DEFAULT_SOFA_H: f64 = 80.0;

/// Default round and standing table radii.
pub const DEFAULT_ROUND_R: f64 = 50.0;
pub const DEFAULT_STANDING_R: f64 = 40.0;

/// Default fixture footprints.
pub const DEFAULT_FIXTURE_W: f64 = 60.0;
pub const DEFAULT_FIXTURE_H: f64 = 20.0;
pub const DEFAULT_FIXTURE_R: f64 = 30.0;

/// Where newly added tables and fixtures land.
pub const NEW_TABLE_POS: f64 = 100.0;
pub const NEW_FIXTURE_POS: f64 = 200.0;
