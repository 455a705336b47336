//! Scene model: the room and everything placed in it.
//!
//! This module defines the data the embedding page hands to the editor
//! (`Scene`, its element types, and the read-only `AssignmentMap` overlay),
//! in the same JSON shape the page stores. Shapes that the page encodes as
//! optional `w`/`h` or `r` fields are decoded into a [`Footprint`] enum, with
//! per-kind defaults filling in anything malformed so every scene stays
//! renderable.
//!
//! Decoding is lenient. A malformed element is defaulted or skipped, never
//! fatal to the whole scene. Fields the editor does not model are kept in
//! `extra` maps and written back unchanged.
//!
//! Scenes are updated immutably. Each `with_*` method returns a new `Scene`
//! in which only the touched collection is rebuilt; the others are shared
//! with the original through their `Arc`, so the page can detect changes by
//! pointer comparison.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    DEFAULT_FIXTURE_H, DEFAULT_FIXTURE_R, DEFAULT_FIXTURE_W, DEFAULT_GRID, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH,
    DEFAULT_ROUND_R, DEFAULT_SOFA_H, DEFAULT_SOFA_W, DEFAULT_STANDING_R, DEFAULT_TABLE_H, DEFAULT_TABLE_W,
    NEW_FIXTURE_POS, NEW_TABLE_POS,
};
use crate::error::EditorError;
use crate::geometry::{Circle, Rect, Shape};

/// Identifier of a scene element, as assigned by the embedding page.
pub type EntityId = String;

/// Anything stored in a scene collection and addressed by id.
pub trait Entity {
    fn id(&self) -> &str;
}

// =============================================================
// Lenient wire decoding
// =============================================================

/// Fields the editor does not model. They are kept on decode and written
/// back on encode, so a committed scene carries everything the page stored.
pub type Extra = Map<String, Value>;

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// A finite number from a JSON number or a numeric string.
fn number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => None,
        },
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(de)?.as_ref().and_then(number))
}

/// Strings pass through and numbers become their decimal text.
fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(matches!(Option::<Value>::deserialize(de)?, Some(Value::Bool(true))))
}

/// Decode a scene collection element by element. A missing, null or
/// non-array value is empty. Elements that fail to decode are skipped.
fn lenient_list<'de, D, T>(de: D, collection: &'static str) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(de)? {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(_) => {
            tracing::warn!(collection, "scene collection is not a list; treated as empty");
            return Ok(Vec::new());
        }
    };
    let decoded = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(element) => Some(element),
            Err(error) => {
                tracing::warn!(collection, index, %error, "malformed scene element skipped");
                None
            }
        })
        .collect();
    Ok(decoded)
}

fn generated_id(prefix: &str) -> EntityId {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// The stated id, or a fresh one when it is missing or empty.
fn id_or_generated(raw: Option<String>, prefix: &str, what: &'static str) -> EntityId {
    match raw.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            let id = generated_id(prefix);
            tracing::warn!(element = what, id = %id, "element without id; generated one");
            id
        }
    }
}

// =============================================================
// Room
// =============================================================

/// The room boundary. Its origin is always (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<RawRoom>")]
pub struct Room {
    pub width: f64,
    pub height: f64,
    /// Grid spacing in world units; 0 disables snapping.
    pub grid: f64,
}

impl Default for Room {
    fn default() -> Self {
        Self { width: DEFAULT_ROOM_WIDTH, height: DEFAULT_ROOM_HEIGHT, grid: DEFAULT_GRID }
    }
}

impl Room {
    /// The room as a rectangle anchored at the origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Whether a world point lies inside the room.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        crate::geometry::point_in_rect(p, &self.rect())
    }
}

#[derive(Deserialize)]
struct RawRoom {
    #[serde(default, deserialize_with = "lenient_number")]
    width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    grid: Option<f64>,
}

impl From<Option<RawRoom>> for Room {
    fn from(raw: Option<RawRoom>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let room = Self {
            width: positive(raw.width).unwrap_or(DEFAULT_ROOM_WIDTH),
            height: positive(raw.height).unwrap_or(DEFAULT_ROOM_HEIGHT),
            grid: positive(raw.grid).unwrap_or(0.0),
        };
        if positive(raw.width).is_none() || positive(raw.height).is_none() {
            tracing::warn!(width = room.width, height = room.height, "room dimensions missing or invalid; using defaults");
        }
        room
    }
}

// =============================================================
// Footprint
// =============================================================

/// Shape of a table or fixture, relative to its `(x, y)` position.
///
/// A rectangle is anchored at its top-left corner; a round footprint at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    Rect { w: f64, h: f64 },
    Round { r: f64 },
}

impl Footprint {
    /// Place this footprint at `(x, y)`.
    #[must_use]
    pub fn at(self, x: f64, y: f64) -> Shape {
        match self {
            Self::Rect { w, h } => Shape::Rect(Rect::new(x, y, w, h)),
            Self::Round { r } => Shape::Circle(Circle::new(x, y, r)),
        }
    }

    #[must_use]
    pub fn is_round(self) -> bool {
        matches!(self, Self::Round { .. })
    }

    /// Decode the optional wire fields. A positive `r` wins; otherwise the
    /// footprint is rectangular with missing sides taken from `fallback`.
    /// Returns `None` when no dimension was given at all.
    fn decode(w: Option<f64>, h: Option<f64>, r: Option<f64>, fallback: Self) -> Option<Self> {
        if let Some(r) = positive(r) {
            return Some(Self::Round { r });
        }
        if positive(w).is_none() && positive(h).is_none() {
            return None;
        }
        let (dw, dh) = match fallback {
            Self::Rect { w, h } => (w, h),
            Self::Round { .. } => (DEFAULT_TABLE_W, DEFAULT_TABLE_H),
        };
        Some(Self::Rect { w: positive(w).unwrap_or(dw), h: positive(h).unwrap_or(dh) })
    }

    fn encode(self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match self {
            Self::Rect { w, h } => (Some(w), Some(h), None),
            Self::Round { r } => (None, None, Some(r)),
        }
    }
}

// =============================================================
// Tables
// =============================================================

/// Table category, which drives default footprint, capacity and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableKind {
    /// Permanently installed table.
    Fixed,
    /// Movable rectangular table.
    #[default]
    Rect,
    /// Movable round table.
    Round,
    Sofa,
    /// Standing (high) table.
    Standing,
}

impl TableKind {
    /// Parse the wire name. Unknown names fall back to `Rect`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "fixed" => Self::Fixed,
            "round" => Self::Round,
            "sofa" => Self::Sofa,
            "standing" => Self::Standing,
            _ => Self::Rect,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Rect => "rect",
            Self::Round => "round",
            Self::Sofa => "sofa",
            Self::Standing => "standing",
        }
    }

    /// Footprint used when a table of this kind carries no usable dimensions.
    #[must_use]
    pub fn default_footprint(self) -> Footprint {
        match self {
            Self::Round => Footprint::Round { r: DEFAULT_ROUND_R },
            Self::Standing => Footprint::Round { r: DEFAULT_STANDING_R },
            Self::Sofa => Footprint::Rect { w: DEFAULT_SOFA_W, h: DEFAULT_SOFA_H },
            Self::Fixed | Self::Rect => Footprint::Rect { w: DEFAULT_TABLE_W, h: DEFAULT_TABLE_H },
        }
    }

    /// Seats assumed when a table does not state its capacity.
    #[must_use]
    pub fn default_capacity(self) -> u32 {
        match self {
            Self::Rect => 6,
            Self::Round => 10,
            Self::Fixed => 4,
            Self::Sofa => 5,
            Self::Standing => 8,
        }
    }
}

/// A table placed in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTable", into = "RawTable")]
pub struct Table {
    pub id: EntityId,
    pub kind: TableKind,
    pub footprint: Footprint,
    /// Top-left corner for rectangular tables, center for round ones.
    pub x: f64,
    pub y: f64,
    pub capacity: Option<u32>,
    /// Locked tables never move or resize through pointer interaction.
    pub locked: bool,
    pub label: Option<String>,
    /// Page-owned fields such as `rotation`.
    pub extra: Extra,
}

impl Entity for Table {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Table {
    /// A new table of `kind` at the standard drop position, with the kind's
    /// default footprint.
    #[must_use]
    pub fn new_of_kind(id: impl Into<EntityId>, kind: TableKind, capacity: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            footprint: kind.default_footprint(),
            x: NEW_TABLE_POS,
            y: NEW_TABLE_POS,
            capacity: Some(capacity),
            locked: false,
            label: None,
            extra: Extra::new(),
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.footprint.at(self.x, self.y)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// A copy of this table moved to `p`.
    #[must_use]
    pub fn moved_to(&self, p: Point) -> Self {
        Self { x: p.x, y: p.y, ..self.clone() }
    }

    /// Seat count: the stated capacity, or a default for the kind.
    #[must_use]
    pub fn effective_capacity(&self) -> u32 {
        match self.capacity {
            Some(c) if c > 0 => c,
            _ if self.locked => TableKind::Fixed.default_capacity(),
            _ => self.kind.default_capacity(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawTable {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    w: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<Value>,
    #[serde(default, deserialize_with = "lenient_bool")]
    locked: bool,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    extra: Extra,
}

/// A seat count from the wire: any non-negative number, rounded. Other
/// values are dropped so the kind default applies.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seat_count(raw: Option<&Value>, table: &str) -> Option<u32> {
    let value = raw.filter(|v| !v.is_null())?;
    match number(value) {
        Some(n) if (0.0..=f64::from(u32::MAX)).contains(&n) => Some(n.round() as u32),
        _ => {
            tracing::warn!(table, %value, "table capacity is not a seat count; ignored");
            None
        }
    }
}

impl From<RawTable> for Table {
    fn from(raw: RawTable) -> Self {
        let id = id_or_generated(raw.id, "t", "table");
        let kind = raw.kind.as_deref().map_or(TableKind::Rect, TableKind::parse);
        let fallback = kind.default_footprint();
        let footprint = Footprint::decode(raw.w, raw.h, raw.r, fallback).unwrap_or_else(|| {
            tracing::warn!(table = %id, kind = kind.as_str(), "table has no dimensions; using default footprint");
            fallback
        });
        Self {
            capacity: seat_count(raw.capacity.as_ref(), &id),
            id,
            kind,
            footprint,
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
            locked: raw.locked,
            label: raw.label,
            extra: raw.extra,
        }
    }
}

impl From<Table> for RawTable {
    fn from(t: Table) -> Self {
        let (w, h, r) = t.footprint.encode();
        Self {
            id: Some(t.id),
            kind: Some(t.kind.as_str().to_string()),
            x: Some(t.x),
            y: Some(t.y),
            w,
            h,
            r,
            capacity: t.capacity.map(Value::from),
            locked: t.locked,
            label: t.label,
            extra: t.extra,
        }
    }
}

// =============================================================
// Static obstacles
// =============================================================

/// Wire form shared by walls and zones.
#[derive(Clone, Serialize, Deserialize)]
struct RawRect {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    w: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    h: Option<f64>,
    #[serde(flatten)]
    extra: Extra,
}

impl RawRect {
    /// The position defaults to the origin. Without a positive width and
    /// height there is nothing to place.
    fn rect(&self) -> Result<Rect, &'static str> {
        match (positive(self.w), positive(self.h)) {
            (Some(w), Some(h)) => Ok(Rect::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0), w, h)),
            _ => Err("missing or non-positive width or height"),
        }
    }

    fn encode(id: EntityId, rect: Rect, extra: Extra) -> Self {
        Self { id: Some(id), x: Some(rect.x), y: Some(rect.y), w: Some(rect.w), h: Some(rect.h), extra }
    }
}

/// Rectangular wall segment. Static.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRect", into = "RawRect")]
pub struct Wall {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub extra: Extra,
}

impl Wall {
    #[must_use]
    pub fn new(id: impl Into<EntityId>, rect: Rect) -> Self {
        Self { id: id.into(), x: rect.x, y: rect.y, w: rect.w, h: rect.h, extra: Extra::new() }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

impl TryFrom<RawRect> for Wall {
    type Error = &'static str;

    fn try_from(raw: RawRect) -> Result<Self, Self::Error> {
        let rect = raw.rect()?;
        Ok(Self { extra: raw.extra, ..Self::new(raw.id.unwrap_or_default(), rect) })
    }
}

impl From<Wall> for RawRect {
    fn from(w: Wall) -> Self {
        let rect = w.rect();
        Self::encode(w.id, rect, w.extra)
    }
}

/// Round structural column. Static.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircle", into = "RawCircle")]
pub struct Column {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub extra: Extra,
}

impl Column {
    #[must_use]
    pub fn new(id: impl Into<EntityId>, circle: Circle) -> Self {
        Self { id: id.into(), x: circle.x, y: circle.y, r: circle.r, extra: Extra::new() }
    }

    #[must_use]
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.r)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawCircle {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    r: Option<f64>,
    #[serde(flatten)]
    extra: Extra,
}

impl TryFrom<RawCircle> for Column {
    type Error = &'static str;

    fn try_from(raw: RawCircle) -> Result<Self, Self::Error> {
        let r = positive(raw.r).ok_or("missing or non-positive radius")?;
        let circle = Circle::new(raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0), r);
        Ok(Self { extra: raw.extra, ..Self::new(raw.id.unwrap_or_default(), circle) })
    }
}

impl From<Column> for RawCircle {
    fn from(c: Column) -> Self {
        Self { id: Some(c.id), x: Some(c.x), y: Some(c.y), r: Some(c.r), extra: c.extra }
    }
}

// =============================================================
// Zones
// =============================================================

/// What a zone restricts. The page stores each kind in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    /// No table may overlap it.
    NoGo,
    /// Reserved for round tables ("R" zone).
    RoundOnly,
    /// Reserved for rectangular tables ("T" zone).
    RectOnly,
}

impl ZoneKind {
    /// Every kind, topmost first.
    pub const ALL: [Self; 3] = [Self::NoGo, Self::RoundOnly, Self::RectOnly];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoGo => "no_go",
            Self::RoundOnly => "round_only",
            Self::RectOnly => "rect_only",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            Self::NoGo => "ng",
            Self::RoundOnly => "zr",
            Self::RectOnly => "zt",
        }
    }

    /// Whether `table` belongs on a zone of this kind.
    #[must_use]
    pub fn admits(self, table: &Table) -> bool {
        match self {
            Self::NoGo => false,
            Self::RoundOnly => table.footprint.is_round(),
            Self::RectOnly => !table.footprint.is_round(),
        }
    }
}

/// Rectangular area that restricts table placement. Only no-go zones are
/// enforced by the editor; the others are read by the assignment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRect", into = "RawRect")]
pub struct Zone {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub extra: Extra,
}

impl Entity for Zone {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Zone {
    #[must_use]
    pub fn new(id: impl Into<EntityId>, rect: Rect) -> Self {
        Self { id: id.into(), x: rect.x, y: rect.y, w: rect.w, h: rect.h, extra: Extra::new() }
    }

    /// A zone of `kind` covering `rect`, with a freshly generated id.
    #[must_use]
    pub fn from_rect(kind: ZoneKind, rect: Rect) -> Self {
        Self::new(generated_id(kind.id_prefix()), rect)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    #[must_use]
    pub fn with_rect(&self, rect: Rect) -> Self {
        Self { x: rect.x, y: rect.y, w: rect.w, h: rect.h, ..self.clone() }
    }
}

impl TryFrom<RawRect> for Zone {
    type Error = &'static str;

    fn try_from(raw: RawRect) -> Result<Self, Self::Error> {
        let rect = raw.rect()?;
        Ok(Self { extra: raw.extra, ..Self::new(raw.id.unwrap_or_default(), rect) })
    }
}

impl From<Zone> for RawRect {
    fn from(z: Zone) -> Self {
        let rect = z.rect();
        Self::encode(z.id, rect, z.extra)
    }
}

// =============================================================
// Fixtures
// =============================================================

/// Decorative or structural annotation (bar, plant, ...). Does not block
/// other fixtures or zones, but tables may not overlap it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFixture", into = "RawFixture")]
pub struct Fixture {
    pub id: EntityId,
    pub footprint: Footprint,
    pub x: f64,
    pub y: f64,
    pub locked: bool,
    pub label: Option<String>,
    pub extra: Extra,
}

impl Entity for Fixture {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Fixture {
    #[must_use]
    pub fn new_rect(id: impl Into<EntityId>) -> Self {
        Self::new(id.into(), Footprint::Rect { w: DEFAULT_FIXTURE_W, h: DEFAULT_FIXTURE_H })
    }

    #[must_use]
    pub fn new_round(id: impl Into<EntityId>) -> Self {
        Self::new(id.into(), Footprint::Round { r: DEFAULT_FIXTURE_R })
    }

    fn new(id: EntityId, footprint: Footprint) -> Self {
        Self { id, footprint, x: NEW_FIXTURE_POS, y: NEW_FIXTURE_POS, locked: false, label: None, extra: Extra::new() }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.footprint.at(self.x, self.y)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawFixture {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    w: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    r: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    locked: bool,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    extra: Extra,
}

impl From<RawFixture> for Fixture {
    fn from(raw: RawFixture) -> Self {
        let id = id_or_generated(raw.id, "fx", "fixture");
        let fallback = Footprint::Rect { w: DEFAULT_FIXTURE_W, h: DEFAULT_FIXTURE_H };
        let footprint = Footprint::decode(raw.w, raw.h, raw.r, fallback).unwrap_or_else(|| {
            tracing::warn!(fixture = %id, "fixture has no dimensions; using default footprint");
            fallback
        });
        Self {
            id,
            footprint,
            x: raw.x.unwrap_or(0.0),
            y: raw.y.unwrap_or(0.0),
            locked: raw.locked,
            label: raw.label,
            extra: raw.extra,
        }
    }
}

impl From<Fixture> for RawFixture {
    fn from(f: Fixture) -> Self {
        let (w, h, r) = f.footprint.encode();
        Self {
            id: Some(f.id),
            x: Some(f.x),
            y: Some(f.y),
            w,
            h,
            r,
            locked: f.locked,
            label: f.label,
            extra: f.extra,
        }
    }
}

// =============================================================
// Scene
// =============================================================

/// Everything on one floor plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub room: Room,
    #[serde(default, deserialize_with = "decode_tables")]
    pub tables: Arc<Vec<Table>>,
    #[serde(default, deserialize_with = "decode_walls")]
    pub walls: Arc<Vec<Wall>>,
    #[serde(default, deserialize_with = "decode_columns")]
    pub columns: Arc<Vec<Column>>,
    #[serde(default, deserialize_with = "decode_no_go")]
    pub no_go: Arc<Vec<Zone>>,
    #[serde(default, deserialize_with = "decode_round_only")]
    pub round_only_zones: Arc<Vec<Zone>>,
    #[serde(default, deserialize_with = "decode_rect_only")]
    pub rect_only_zones: Arc<Vec<Zone>>,
    #[serde(default, deserialize_with = "decode_fixtures")]
    pub fixtures: Arc<Vec<Fixture>>,
    /// Top-level fields the editor does not model.
    #[serde(flatten)]
    pub extra: Extra,
}

fn decode_tables<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Table>>, D::Error> {
    Ok(Arc::new(lenient_list(de, "tables")?))
}

fn decode_walls<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Wall>>, D::Error> {
    Ok(Arc::new(lenient_list(de, "walls")?))
}

fn decode_columns<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Column>>, D::Error> {
    Ok(Arc::new(lenient_list(de, "columns")?))
}

fn decode_fixtures<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Fixture>>, D::Error> {
    Ok(Arc::new(lenient_list(de, "fixtures")?))
}

fn decode_no_go<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Zone>>, D::Error> {
    decode_zones(de, ZoneKind::NoGo)
}

fn decode_round_only<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Zone>>, D::Error> {
    decode_zones(de, ZoneKind::RoundOnly)
}

fn decode_rect_only<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<Vec<Zone>>, D::Error> {
    decode_zones(de, ZoneKind::RectOnly)
}

/// Zones are addressed by id while dragged, so an id is generated for any
/// zone stored without one.
fn decode_zones<'de, D: Deserializer<'de>>(de: D, kind: ZoneKind) -> Result<Arc<Vec<Zone>>, D::Error> {
    let mut zones: Vec<Zone> = lenient_list(de, kind.as_str())?;
    for zone in zones.iter_mut().filter(|z| z.id.is_empty()) {
        zone.id = id_or_generated(None, kind.id_prefix(), kind.as_str());
    }
    Ok(Arc::new(zones))
}

impl Scene {
    /// Parse a scene from the page's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SceneParse`] when the text is not a JSON object.
    /// Malformed elements are defaulted or skipped rather than rejected.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::SceneParse)
    }

    #[must_use]
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn fixture(&self, id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    /// The collection holding zones of `kind`.
    #[must_use]
    pub fn zones(&self, kind: ZoneKind) -> &Arc<Vec<Zone>> {
        match kind {
            ZoneKind::NoGo => &self.no_go,
            ZoneKind::RoundOnly => &self.round_only_zones,
            ZoneKind::RectOnly => &self.rect_only_zones,
        }
    }

    fn zones_mut(&mut self, kind: ZoneKind) -> &mut Arc<Vec<Zone>> {
        match kind {
            ZoneKind::NoGo => &mut self.no_go,
            ZoneKind::RoundOnly => &mut self.round_only_zones,
            ZoneKind::RectOnly => &mut self.rect_only_zones,
        }
    }

    #[must_use]
    pub fn zone(&self, kind: ZoneKind, id: &str) -> Option<&Zone> {
        self.zones(kind).iter().find(|z| z.id == id)
    }

    /// Replace the table with the same id. Unknown ids leave the scene unchanged.
    #[must_use]
    pub fn with_table(&self, table: Table) -> Self {
        match replace_by_id(&self.tables, table) {
            Some(tables) => Self { tables, ..self.clone() },
            None => self.clone(),
        }
    }

    /// Replace the fixture with the same id. Unknown ids leave the scene unchanged.
    #[must_use]
    pub fn with_fixture(&self, fixture: Fixture) -> Self {
        match replace_by_id(&self.fixtures, fixture) {
            Some(fixtures) => Self { fixtures, ..self.clone() },
            None => self.clone(),
        }
    }

    /// Replace the zone of `kind` with the same id. Unknown ids leave the scene unchanged.
    #[must_use]
    pub fn with_zone(&self, kind: ZoneKind, zone: Zone) -> Self {
        let mut next = self.clone();
        if let Some(zones) = replace_by_id(self.zones(kind), zone) {
            *next.zones_mut(kind) = zones;
        }
        next
    }

    /// Append a new zone of `kind`.
    #[must_use]
    pub fn with_added_zone(&self, kind: ZoneKind, zone: Zone) -> Self {
        let mut zones = Vec::clone(self.zones(kind));
        zones.push(zone);
        let mut next = self.clone();
        *next.zones_mut(kind) = Arc::new(zones);
        next
    }

    #[must_use]
    pub fn with_room(&self, room: Room) -> Self {
        Self { room, ..self.clone() }
    }
}

/// Rebuild `list` with the element sharing `item`'s id replaced.
fn replace_by_id<T: Entity + Clone>(list: &Arc<Vec<T>>, item: T) -> Option<Arc<Vec<T>>> {
    let idx = list.iter().position(|e| e.id() == item.id())?;
    let mut next = Vec::clone(list);
    next[idx] = item;
    Some(Arc::new(next))
}

// =============================================================
// Assignments
// =============================================================

/// A reservation placed at a table by the auto-assignment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "res_id")]
    pub reservation_id: String,
    #[serde(rename = "name")]
    pub guest_name: String,
    #[serde(rename = "pax")]
    pub party_size: u32,
    /// Set when the service had to fall back to an undersized table.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub last_resort: bool,
}

/// Read-only overlay of table assignments, keyed by table id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentMap {
    #[serde(default)]
    pub tables: HashMap<EntityId, Assignment>,
}

impl AssignmentMap {
    /// Parse the overlay from the page's JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::AssignmentsParse`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::AssignmentsParse)
    }

    #[must_use]
    pub fn get(&self, table_id: &str) -> Option<&Assignment> {
        self.tables.get(table_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
