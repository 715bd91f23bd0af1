//! Placement engine for draggable images on a resizable canvas surface.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the placement state for every image on the surface: where each image
//! sits, which images are mid-drag, and how positions and sizes rescale
//! proportionally when the surface changes size. The host JavaScript layer
//! is responsible only for loading image assets, wiring DOM events to the
//! engine, and positioning its overlay hit-target elements from
//! [`engine::Engine::snapshot_json`].
//!
//! Positions are tracked as anchor + pointer delta rather than accumulated
//! increments, so a long drag never drifts and a resize mid-drag continues
//! smoothly from the rescaled position.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`registry`] | Image entries, their position math, and the insertion-ordered store |
//! | [`drag`] | Active drag sessions |
//! | [`geom`] | Points, surface dimensions, validation, clamping |
//! | [`render`] | Scene rendering to the 2d context |

pub mod drag;
pub mod engine;
pub mod geom;
pub mod registry;
pub mod render;
