#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// A spread of rectangles: overlapping, touching, nested, far apart, degenerate.
fn sample_rects() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Rect::new(100.0, 0.0, 20.0, 20.0),
        Rect::new(10.0, 10.0, 5.0, 5.0),
        Rect::new(-50.0, -50.0, 40.0, 40.0),
        Rect::new(300.0, 300.0, 1.0, 1.0),
        Rect::new(50.0, 49.0, 0.0, 0.0),
        Rect::new(-10.0, 20.0, 500.0, 3.0),
    ]
}

fn sample_circles() -> Vec<Circle> {
    vec![
        Circle::new(0.0, 0.0, 10.0),
        Circle::new(20.0, 0.0, 10.0),
        Circle::new(300.0, 300.0, 50.0),
        Circle::new(340.0, 300.0, 50.0),
        Circle::new(500.0, 300.0, 50.0),
        Circle::new(-5.0, 7.0, 0.0),
    ]
}

// =============================================================
// Rect / Circle helpers
// =============================================================

#[test]
fn rect_from_corners_normalizes_direction() {
    let r = Rect::from_corners(pt(100.0, 80.0), pt(40.0, 20.0));
    assert_eq!(r, Rect::new(40.0, 20.0, 60.0, 60.0));
}

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), pt(25.0, 40.0));
}

#[test]
fn circle_bounds() {
    let c = Circle::new(50.0, 60.0, 10.0);
    assert_eq!(c.bounds(), Rect::new(40.0, 50.0, 20.0, 20.0));
}

// =============================================================
// Containment
// =============================================================

#[test]
fn point_in_rect_inside_edge_outside() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(point_in_rect(pt(5.0, 5.0), &r));
    assert!(point_in_rect(pt(10.0, 0.0), &r));
    assert!(!point_in_rect(pt(10.01, 5.0), &r));
    assert!(!point_in_rect(pt(5.0, -0.01), &r));
}

#[test]
fn point_in_circle_inside_edge_outside() {
    let c = Circle::new(0.0, 0.0, 5.0);
    assert!(point_in_circle(pt(3.0, 4.0), &c));
    assert!(point_in_circle(pt(0.0, 0.0), &c));
    assert!(!point_in_circle(pt(4.0, 4.0), &c));
}

// =============================================================
// rect_intersects_rect
// =============================================================

#[test]
fn rects_overlapping() {
    assert!(rect_intersects_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Rect::new(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn rects_touching_count_as_intersecting() {
    assert!(rect_intersects_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Rect::new(10.0, 0.0, 10.0, 10.0)));
}

#[test]
fn rects_separated_on_one_axis() {
    assert!(!rect_intersects_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Rect::new(11.0, 0.0, 10.0, 10.0)));
    assert!(!rect_intersects_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &Rect::new(0.0, 10.5, 10.0, 10.0)));
}

#[test]
fn rect_nested_inside_other() {
    assert!(rect_intersects_rect(&Rect::new(0.0, 0.0, 100.0, 100.0), &Rect::new(40.0, 40.0, 2.0, 2.0)));
}

#[test]
fn rect_intersection_is_symmetric() {
    let rects = sample_rects();
    for a in &rects {
        for b in &rects {
            assert_eq!(rect_intersects_rect(a, b), rect_intersects_rect(b, a), "{a:?} vs {b:?}");
        }
    }
}

// =============================================================
// circle_intersects_rect
// =============================================================

#[test]
fn circle_rect_center_inside() {
    assert!(circle_intersects_rect(&Circle::new(5.0, 5.0, 1.0), &Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn circle_rect_near_edge() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(circle_intersects_rect(&Circle::new(15.0, 5.0, 5.0), &r));
    assert!(!circle_intersects_rect(&Circle::new(15.1, 5.0, 5.0), &r));
}

#[test]
fn circle_rect_corner_uses_euclidean_distance() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    // Diagonal distance to corner (10,10) is ~5.66, larger than radius 5.
    assert!(!circle_intersects_rect(&Circle::new(14.0, 14.0, 5.0), &r));
    assert!(circle_intersects_rect(&Circle::new(13.0, 13.0, 5.0), &r));
}

// =============================================================
// circle_intersects_circle
// =============================================================

#[test]
fn circles_apart_and_overlapping() {
    let a = Circle::new(300.0, 300.0, 50.0);
    assert!(!circle_intersects_circle(&a, &Circle::new(500.0, 300.0, 50.0)));
    assert!(circle_intersects_circle(&a, &Circle::new(340.0, 300.0, 50.0)));
}

#[test]
fn circles_touching_count_as_intersecting() {
    assert!(circle_intersects_circle(&Circle::new(0.0, 0.0, 10.0), &Circle::new(20.0, 0.0, 10.0)));
}

#[test]
fn circle_intersection_is_symmetric() {
    let circles = sample_circles();
    for a in &circles {
        for b in &circles {
            assert_eq!(circle_intersects_circle(a, b), circle_intersects_circle(b, a), "{a:?} vs {b:?}");
        }
    }
}

// =============================================================
// Shape dispatch
// =============================================================

#[test]
fn shape_intersects_is_symmetric_across_kinds() {
    let mut shapes: Vec<Shape> = sample_rects().into_iter().map(Shape::Rect).collect();
    shapes.extend(sample_circles().into_iter().map(Shape::Circle));
    for a in &shapes {
        for b in &shapes {
            assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn shape_contains_dispatches() {
    assert!(Shape::Rect(Rect::new(0.0, 0.0, 4.0, 4.0)).contains(pt(4.0, 4.0)));
    assert!(!Shape::Circle(Circle::new(0.0, 0.0, 4.0)).contains(pt(4.0, 4.0)));
}

#[test]
fn shape_within_room() {
    assert!(Shape::Rect(Rect::new(0.0, 0.0, 1200.0, 800.0)).within(1200.0, 800.0));
    assert!(!Shape::Rect(Rect::new(1150.0, 100.0, 120.0, 60.0)).within(1200.0, 800.0));
    assert!(Shape::Circle(Circle::new(50.0, 50.0, 50.0)).within(1200.0, 800.0));
    assert!(!Shape::Circle(Circle::new(49.0, 400.0, 50.0)).within(1200.0, 800.0));
}
