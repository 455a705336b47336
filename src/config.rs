//! Editor props supplied by the embedding page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::doc::ZoneKind;
use crate::error::EditorError;

/// Mode flags that gate interaction and rendering.
///
/// Every field is optional on the wire:
/// - `editable`: default `true`; when false only the view can change
/// - `show_grid`: default `true`; draws the grid and enables snapping
/// - `draw_no_go_mode`, `draw_round_only_mode`, `draw_rect_only_mode`:
///   default `false`; empty-room drags draft a zone of that kind
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub editable: bool,
    pub show_grid: bool,
    pub draw_no_go_mode: bool,
    pub draw_round_only_mode: bool,
    pub draw_rect_only_mode: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editable: true,
            show_grid: true,
            draw_no_go_mode: false,
            draw_round_only_mode: false,
            draw_rect_only_mode: false,
        }
    }
}

impl EditorConfig {
    /// Parse props from JSON, defaulting missing fields.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ConfigParse`] on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::ConfigParse)
    }

    /// Whether pointer moves should be rounded to `grid`.
    #[must_use]
    pub fn snaps(&self, grid: f64) -> bool {
        self.show_grid && grid > 0.0
    }

    #[must_use]
    pub fn draws(&self, kind: ZoneKind) -> bool {
        match kind {
            ZoneKind::NoGo => self.draw_no_go_mode,
            ZoneKind::RoundOnly => self.draw_round_only_mode,
            ZoneKind::RectOnly => self.draw_rect_only_mode,
        }
    }

    pub fn set_draws(&mut self, kind: ZoneKind, on: bool) {
        match kind {
            ZoneKind::NoGo => self.draw_no_go_mode = on,
            ZoneKind::RoundOnly => self.draw_round_only_mode = on,
            ZoneKind::RectOnly => self.draw_rect_only_mode = on,
        }
    }

    /// The kind of zone an empty-room drag drafts. If the page set more than
    /// one flag, no-go wins over round-only, which wins over rect-only.
    #[must_use]
    pub fn draw_zone_kind(&self) -> Option<ZoneKind> {
        ZoneKind::ALL.into_iter().find(|k| self.draws(*k))
    }
}
