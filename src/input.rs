//! Input model: modifier keys, mouse buttons, cursors and the gesture state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a
//! pointer event. `InputState` is the single active gesture tracked between
//! pointer-down and pointer-up (or pointer-leave), carrying all context needed
//! to compute the next scene and to roll back or discard on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{EntityId, ZoneKind};
use crate::geometry::Rect;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a double-click should rename rather than toggle the lock.
    #[must_use]
    pub fn is_rename(self) -> bool {
        self.alt || self.shift
    }

    /// Whether a click should toggle a table in the selection instead of
    /// replacing it.
    #[must_use]
    pub fn is_additive(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Which handle of a resizable element is grabbed.
///
/// Rectangles expose their right-mid, bottom-mid and bottom-right handles;
/// round fixtures a single radius handle on their right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Right,
    Bottom,
    Corner,
    Radius,
}

impl ResizeHandle {
    #[must_use]
    pub fn moves_right_edge(self) -> bool {
        matches!(self, Self::Right | Self::Corner)
    }

    #[must_use]
    pub fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::Bottom | Self::Corner)
    }

    /// Cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Corner => Cursor::ResizeDiagonal,
            Self::Right | Self::Radius => Cursor::ResizeHorizontal,
            Self::Bottom => Cursor::ResizeVertical,
        }
    }
}

/// Pointer cursor requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Grab,
    Grabbing,
    Crosshair,
    ResizeDiagonal,
    ResizeHorizontal,
    ResizeVertical,
}

impl Cursor {
    /// The CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Crosshair => "crosshair",
            Self::ResizeDiagonal => "nwse-resize",
            Self::ResizeHorizontal => "ew-resize",
            Self::ResizeVertical => "ns-resize",
        }
    }
}

/// Editor state that outlives single gestures.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Primary-button drags pan the view instead of editing.
    pub pan_mode: bool,
    /// Cursor last requested from the host.
    pub cursor: Cursor,
    /// Selected table ids, in click order.
    pub selected: Vec<EntityId>,
}

/// The gesture in progress. Exactly one is active at a time.
///
/// Drag variants carry the grab offset (pointer world position minus the
/// element position at pointer-down) so the grabbed point stays under the
/// cursor.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A table is being moved. Placement is validated on every move but only
    /// enforced on release.
    DraggingTable {
        id: EntityId,
        grab: Point,
        /// Table position at pointer-down.
        origin: Point,
        /// Most recent position along the drag that passed collision checks.
        last_valid: Point,
        /// Whether the current position fails collision checks.
        invalid: bool,
    },
    /// A fixture is being moved. No collision gating.
    DraggingFixture { id: EntityId, grab: Point },
    /// A fixture is being resized by one of its handles.
    ResizingFixture { id: EntityId, handle: ResizeHandle },
    /// A zone is being moved. No collision gating.
    DraggingZone { kind: ZoneKind, id: EntityId, grab: Point },
    /// A zone is being resized by one of its handles.
    ResizingZone { kind: ZoneKind, id: EntityId, handle: ResizeHandle },
    /// The room boundary is being resized.
    ResizingRoom { handle: ResizeHandle },
    /// A new zone is being drafted.
    DrawingZone {
        kind: ZoneKind,
        /// World-space point where the draft started, already snapped.
        start: Point,
        /// Current draft, normalized to non-negative size.
        draft: Rect,
    },
    /// The view is being panned.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The kind and rectangle of the zone draft being drawn, if any.
    #[must_use]
    pub fn draft_zone(&self) -> Option<(ZoneKind, Rect)> {
        match self {
            Self::DrawingZone { kind, draft, .. } => Some((*kind, *draft)),
            _ => None,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DraggingTable { .. } => "dragging_table",
            Self::DraggingFixture { .. } => "dragging_fixture",
            Self::ResizingFixture { .. } => "resizing_fixture",
            Self::DraggingZone { .. } => "dragging_zone",
            Self::ResizingZone { .. } => "resizing_zone",
            Self::ResizingRoom { .. } => "resizing_room",
            Self::DrawingZone { .. } => "drawing_zone",
            Self::Panning { .. } => "panning",
        }
    }
}
