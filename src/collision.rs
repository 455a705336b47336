//! Placement validation.
//!
//! A table is invalid when it leaves the room or touches a wall, column,
//! no-go zone, fixture or any other table. The check is advisory while a
//! drag is in progress and enforced (by rollback) when the drag commits;
//! see [`crate::engine`].

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::doc::{Scene, Table, Zone, ZoneKind};
use crate::geometry::Shape;

/// Whether `table`, at its current position and size, is an invalid placement in `scene`.
///
/// The table is matched to its peers by id, so the scene may (and usually
/// does) contain an older copy of the same table.
#[must_use]
pub fn table_collides(table: &Table, scene: &Scene) -> bool {
    let shape = table.shape();

    if !shape.within(scene.room.width, scene.room.height) {
        return true;
    }
    if scene.walls.iter().any(|w| shape.intersects(&Shape::Rect(w.rect()))) {
        return true;
    }
    if scene.columns.iter().any(|c| shape.intersects(&Shape::Circle(c.circle()))) {
        return true;
    }
    if scene.no_go.iter().any(|z| shape.intersects(&Shape::Rect(z.rect()))) {
        return true;
    }
    if scene.fixtures.iter().any(|f| shape.intersects(&f.shape())) {
        return true;
    }
    scene
        .tables
        .iter()
        .filter(|other| other.id != table.id)
        .any(|other| shape.intersects(&other.shape()))
}

/// Every table in `scene` that is currently an invalid placement.
#[must_use]
pub fn invalid_tables(scene: &Scene) -> Vec<&Table> {
    scene.tables.iter().filter(|t| table_collides(t, scene)).collect()
}

/// Whether no table in `scene` is an invalid placement.
#[must_use]
pub fn scene_is_valid(scene: &Scene) -> bool {
    invalid_tables(scene).is_empty()
}

/// Advisory check for a zone of `kind`: true when it leaves the room or
/// covers a table the kind does not admit (any table, for a no-go zone).
///
/// Zones may overlap walls, columns, fixtures and other zones. The result
/// only drives visual feedback.
#[must_use]
pub fn zone_collides(kind: ZoneKind, zone: &Zone, scene: &Scene) -> bool {
    let shape = Shape::Rect(zone.rect());
    !shape.within(scene.room.width, scene.room.height)
        || scene.tables.iter().any(|t| !kind.admits(t) && shape.intersects(&t.shape()))
}
