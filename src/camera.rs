#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEW_OFFSET_PX, MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the room.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = one world unit per pixel), kept within
/// [`MIN_ZOOM`, `MAX_ZOOM`] by every mutating method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// The view a freshly opened plan starts with.
    #[must_use]
    pub fn initial() -> Self {
        Self { pan_x: DEFAULT_VIEW_OFFSET_PX, pan_y: DEFAULT_VIEW_OFFSET_PX, zoom: 1.0 }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Set the zoom to `new_zoom` (clamped) while keeping the world point
    /// under `anchor` fixed on screen.
    /// A zoom that clamps to the current value leaves the camera untouched.
    pub fn zoom_at(&mut self, anchor: Point, new_zoom: f64) {
        let zoom = clamp_zoom(new_zoom);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let world = self.screen_to_world(anchor);
        self.zoom = zoom;
        self.pan_x = anchor.x - world.x * self.zoom;
        self.pan_y = anchor.y - world.y * self.zoom;
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }
}

/// Clamp a zoom factor into the supported range. Non-finite input maps to 1.0.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() { zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 }
}

/// Round `v` to the nearest multiple of `grid`. Identity when `grid` is not positive.
#[must_use]
pub fn snap(v: f64, grid: f64) -> f64 {
    if grid > 0.0 { (v / grid).round() * grid } else { v }
}
