//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, impact_point, is_colliding};
pub use spawn::{sample_category, spawn_burst, spawn_floating_text, spawn_object, spawn_particles};
pub use state::{
    Category, FallingObject, FloatStyle, FloatingText, GameEvent, GameState, Particle,
    BONUS_COLOR, LIFE_COLOR, MALUS_COLOR,
};
pub use tick::{TickInput, TickOutcome, tick};
