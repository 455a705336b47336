#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_MARGIN_PX;
use crate::doc::{EntityId, Footprint, Scene, ZoneKind};
use crate::geometry::{Rect, point_in_rect};
use crate::input::ResizeHandle;

/// What a pointer-down landed on, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    FixtureHandle { id: EntityId, handle: ResizeHandle },
    FixtureBody { id: EntityId },
    ZoneHandle { kind: ZoneKind, id: EntityId, handle: ResizeHandle },
    ZoneBody { kind: ZoneKind, id: EntityId },
    TableBody { id: EntityId },
    RoomHandle(ResizeHandle),
}

impl Hit {
    /// The resize handle under the pointer, if the hit is one.
    #[must_use]
    pub fn handle(&self) -> Option<ResizeHandle> {
        match self {
            Self::FixtureHandle { handle, .. } | Self::ZoneHandle { handle, .. } => Some(*handle),
            Self::RoomHandle(handle) => Some(*handle),
            Self::FixtureBody { .. } | Self::ZoneBody { .. } | Self::TableBody { .. } => None,
        }
    }
}

/// Resolve what sits under a pointer, checking in this order:
/// fixture handles, fixture bodies, zone handles, zone bodies, table bodies,
/// room handles. Later elements are drawn on top, so each collection is
/// searched back to front. Locked tables and fixtures are skipped. No-go
/// zones sit above round-only zones, which sit above rect-only zones.
///
/// Handles are matched in screen space against a fixed pixel margin so they
/// stay the same size at any zoom.
#[must_use]
pub fn hit_test(world: Point, scene: &Scene, camera: &Camera) -> Option<Hit> {
    let screen = camera.world_to_screen(world);
    let near = |handle_world: Point| within_margin(camera.world_to_screen(handle_world), screen);

    for f in scene.fixtures.iter().rev().filter(|f| !f.locked) {
        let handle = match f.footprint {
            Footprint::Rect { w, h } => rect_handle_at(&Rect::new(f.x, f.y, w, h), &near),
            Footprint::Round { r } => near(Point::new(f.x + r, f.y)).then_some(ResizeHandle::Radius),
        };
        if let Some(handle) = handle {
            return Some(Hit::FixtureHandle { id: f.id.clone(), handle });
        }
    }
    if let Some(f) = scene.fixtures.iter().rev().find(|f| !f.locked && f.shape().contains(world)) {
        return Some(Hit::FixtureBody { id: f.id.clone() });
    }

    for kind in ZoneKind::ALL {
        for z in scene.zones(kind).iter().rev() {
            if let Some(handle) = rect_handle_at(&z.rect(), &near) {
                return Some(Hit::ZoneHandle { kind, id: z.id.clone(), handle });
            }
        }
    }
    for kind in ZoneKind::ALL {
        if let Some(z) = scene.zones(kind).iter().rev().find(|z| point_in_rect(world, &z.rect())) {
            return Some(Hit::ZoneBody { kind, id: z.id.clone() });
        }
    }

    if let Some(t) = scene.tables.iter().rev().find(|t| !t.locked && t.shape().contains(world)) {
        return Some(Hit::TableBody { id: t.id.clone() });
    }

    rect_handle_at(&scene.room.rect(), &near).map(Hit::RoomHandle)
}

/// The rectangle handle (corner first, then right-mid, then bottom-mid) accepted by `near`.
fn rect_handle_at(r: &Rect, near: &impl Fn(Point) -> bool) -> Option<ResizeHandle> {
    [
        (ResizeHandle::Corner, Point::new(r.right(), r.bottom())),
        (ResizeHandle::Right, Point::new(r.right(), r.y + r.h / 2.0)),
        (ResizeHandle::Bottom, Point::new(r.x + r.w / 2.0, r.bottom())),
    ]
    .into_iter()
    .find(|(_, p)| near(*p))
    .map(|(handle, _)| handle)
}

fn within_margin(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= HANDLE_MARGIN_PX && (a.y - b.y).abs() <= HANDLE_MARGIN_PX
}
