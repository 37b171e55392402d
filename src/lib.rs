//! Catch the Object - a falling-object catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, per-tick update)
//! - `session`: Session lifecycle, session-scoped timers, best score
//! - `renderer`: DOM surface that mirrors simulation entities (web only)
//! - `platform`: Input mapping and frame clock
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `audio`: Sound cues for game events

pub mod audio;
pub mod best_score;
pub mod config;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use config::{GameConfig, RestartBehavior, Rules};
pub use session::{Session, SessionPhase, SessionSummary};
pub use settings::{DifficultyLevel, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: f32 = 16.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the frame clock
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Playfield defaults
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults - rides along the bottom of the playfield
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Player movement in px per tick
    pub const PLAYER_START_SPEED: f32 = 5.0;
    pub const PLAYER_SPEED_STEP: f32 = 0.25;
    pub const PLAYER_MAX_SPEED: f32 = 9.0;

    /// Falling objects
    pub const OBJECT_SIZE: f32 = 48.0;
    /// Objects start just above the visible top
    pub const SPAWN_Y: f32 = -10.0;
    /// Objects are dropped once this far below the playfield
    pub const EXIT_MARGIN: f32 = 40.0;
    /// Fall speed is (BASE + U(0, JITTER)) * difficulty px per tick
    pub const FALL_SPEED_BASE: f32 = 2.0;
    pub const FALL_SPEED_JITTER: f32 = 2.0;

    /// Scoring
    pub const BONUS_POINTS: u64 = 10;
    pub const DEFAULT_MAX_LIVES: u32 = 3;

    /// Spawn cadence at normal difficulty
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 1200.0;
    /// Difficulty ramp cadence and increment
    pub const DIFFICULTY_RAMP_MS: f32 = 45_000.0;
    pub const DIFFICULTY_STEP: f32 = 0.35;

    /// Particles
    pub const PARTICLE_BASE_LIFE_MS: f32 = 900.0;
    pub const PARTICLE_LIFE_JITTER_MS: f32 = 400.0;
    /// Downward velocity bias added each tick
    pub const PARTICLE_GRAVITY: f32 = 0.05;
    pub const BURST_MIN: usize = 8;
    pub const BURST_MAX: usize = 12;

    /// Floating text
    pub const FLOAT_LIFE_MS: f32 = 800.0;
    pub const FLOAT_RISE_PX: f32 = 40.0;
}
