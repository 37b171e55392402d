//! DOM rendering module
//!
//! Mirrors the simulation onto absolutely positioned elements inside the
//! playfield. Elements are keyed by entity ID, so an entity and its element
//! always disappear together.

pub mod dom;
pub mod hud;

pub use dom::DomRenderer;
