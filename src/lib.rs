//! Floor-plan editing engine for the restaurant back-of-house tool.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive part of the floor-plan page: translating raw pointer events
//! into scene mutations, maintaining the pan/zoom view, hit-testing and
//! collision-checking room elements, and producing draw commands for the
//! canvas. The embedding page owns the scene data, persists every
//! [`engine::Action::SceneChanged`] it receives, and hands new data back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scene model: room, tables, obstacles, zones, fixtures, assignments |
//! | [`geometry`] | Pure shape containment and intersection tests |
//! | [`camera`] | Pan/zoom camera, coordinate conversions, grid snapping |
//! | [`collision`] | Placement validation for tables and zones |
//! | [`hit`] | Hit-testing with handle/body precedence |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`config`] | Embedding props (`editable`, `show_grid`, zone draw modes) |
//! | [`render`] | Scene → draw command list |
//! | [`paint`] | Draw commands → `CanvasRenderingContext2d` |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod collision;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod paint;
pub mod render;
