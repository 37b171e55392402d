//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to held-key state)
//! - Time (display frame timestamps to frame deltas)
//!
//! Storage lives in `crate::persistence`.

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{KeyAction, KeyState};
