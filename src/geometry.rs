//! Geometry kernel: the shape primitives of a floor plan and the pure
//! containment and intersection tests between them.
//!
//! All distance comparisons are done on squared distances. Boundaries are
//! inclusive: shapes that merely touch count as intersecting, and a point on
//! an edge is inside.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle spanning two corner points, in any drag direction.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The bounding box of the circle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x - self.r, self.y - self.r, self.r * 2.0, self.r * 2.0)
    }
}

/// Either primitive, for elements whose shape is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
}

impl Shape {
    /// Whether `p` lies inside or on the shape.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Rect(r) => point_in_rect(p, r),
            Self::Circle(c) => point_in_circle(p, c),
        }
    }

    /// Pairwise intersection, dispatching to the matching kernel test.
    #[must_use]
    pub fn intersects(&self, other: &Shape) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => rect_intersects_rect(a, b),
            (Self::Circle(c), Self::Rect(r)) | (Self::Rect(r), Self::Circle(c)) => circle_intersects_rect(c, r),
            (Self::Circle(a), Self::Circle(b)) => circle_intersects_circle(a, b),
        }
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::Circle(c) => c.bounds(),
        }
    }

    /// Whether the whole shape lies within `[0, width] × [0, height]`.
    #[must_use]
    pub fn within(&self, width: f64, height: f64) -> bool {
        let b = self.bounds();
        b.x >= 0.0 && b.y >= 0.0 && b.right() <= width && b.bottom() <= height
    }
}

#[must_use]
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    p.x >= r.x && p.y >= r.y && p.x <= r.right() && p.y <= r.bottom()
}

#[must_use]
pub fn point_in_circle(p: Point, c: &Circle) -> bool {
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    dx * dx + dy * dy <= c.r * c.r
}

/// Standard AABB overlap: true unless separated on either axis.
#[must_use]
pub fn rect_intersects_rect(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || b.right() < a.x || a.bottom() < b.y || b.bottom() < a.y)
}

/// Clamp the circle center into the rectangle to find the nearest point,
/// then compare against the radius.
#[must_use]
pub fn circle_intersects_rect(c: &Circle, r: &Rect) -> bool {
    let nx = r.x.max(c.x.min(r.right()));
    let ny = r.y.max(c.y.min(r.bottom()));
    let dx = c.x - nx;
    let dy = c.y - ny;
    dx * dx + dy * dy <= c.r * c.r
}

#[must_use]
pub fn circle_intersects_circle(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let rr = a.r + b.r;
    dx * dx + dy * dy <= rr * rr
}
