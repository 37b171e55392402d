//! Game state and core simulation types
//!
//! Everything the update engine touches lives in [`GameState`], owned by the
//! session and passed by reference into the tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Falling object categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Worth points when caught
    Bonus,
    /// Costs a life when caught
    Malus,
    /// Restores a life when caught (up to the cap)
    Life,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bonus => "bonus",
            Category::Malus => "malus",
            Category::Life => "life",
        }
    }

    /// Particle color for a catch of this category
    pub fn burst_color(&self) -> &'static str {
        match self {
            Category::Bonus => BONUS_COLOR,
            Category::Malus => MALUS_COLOR,
            Category::Life => LIFE_COLOR,
        }
    }
}

pub const BONUS_COLOR: &str = "#fff9c8";
pub const MALUS_COLOR: &str = "#ffb3b3";
pub const LIFE_COLOR: &str = "#ffd79a";

/// An object falling toward the paddle
#[derive(Debug, Clone)]
pub struct FallingObject {
    pub id: u32,
    pub category: Category,
    /// Left edge, fixed at spawn
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl FallingObject {
    pub fn rect(&self, size: f32) -> Rect {
        Rect::new(self.x, self.y, size, size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ms
    pub life: f32,
    /// Life budget at spawn in ms
    pub max_life: f32,
    pub color: &'static str,
}

impl Particle {
    /// Opacity proportional to remaining life
    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Floating text styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatStyle {
    Gain,
    Loss,
    Life,
}

impl FloatStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            FloatStyle::Gain => "floatingText gain",
            FloatStyle::Loss => "floatingText loss",
            FloatStyle::Life => "floatingText life",
        }
    }
}

/// A short-lived label like "+10"
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    pub style: FloatStyle,
    /// Remaining life in ms
    pub life: f32,
}

impl FloatingText {
    /// Elapsed fraction of the life budget (0 at spawn, 1 at expiry)
    pub fn progress(&self) -> f32 {
        (1.0 - self.life / FLOAT_LIFE_MS).clamp(0.0, 1.0)
    }

    /// Upward drift in px
    pub fn rise_offset(&self) -> f32 {
        -self.progress() * FLOAT_RISE_PX
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }
}

/// Things that happened during a tick, drained by the frontend for sound
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An object was caught and had an effect
    Caught { category: Category, at: Vec2 },
    /// A bonus fell through and cost points
    BonusMissed { at: Vec2 },
    /// The ramp timer raised the difficulty
    DifficultyRaised { difficulty: f32 },
    /// Lives ran out
    GameOver { score: u64, best: u64, new_best: bool },
}

/// Complete session state for the simulation
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    pub score: u64,
    pub lives: u32,
    /// Fall speed multiplier, only ever increases within a session
    pub difficulty: f32,
    /// Player movement in px per tick
    pub player_speed: f32,
    /// Left edge of the paddle
    pub player_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub objects: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub floats: Vec<FloatingText>,
    /// Screen shake intensity (0-1, decays every tick)
    pub screen_shake: f32,
    /// Hit flash intensity (0-1, decays every tick)
    pub flash: f32,
    /// Pending events for the frontend
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player_x = config.centered_player_x();
        let lives = config.rules.max_lives;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            score: 0,
            lives,
            difficulty: 1.0,
            player_speed: PLAYER_START_SPEED,
            player_x,
            time_ticks: 0,
            objects: Vec::new(),
            particles: Vec::new(),
            floats: Vec::new(),
            screen_shake: 0.0,
            flash: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset to a fresh session, keeping the playfield and rules
    pub fn reset(&mut self, seed: u64) {
        let config = self.config.clone();
        *self = Self::new(config, seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Life cap for this session
    pub fn max_lives(&self) -> u32 {
        self.config.rules.max_lives
    }

    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.player_x,
            self.config.paddle_top(),
            self.config.paddle_width,
            self.config.paddle_height,
        )
    }

    /// Move the paddle, keeping it inside the playfield
    pub fn set_player_x(&mut self, x: f32) {
        self.player_x = self.config.clamp_player_x(x);
    }

    /// Apply a new playfield size (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.playfield_width = width.max(1.0);
        self.config.playfield_height = height.max(1.0);
        self.set_player_x(self.player_x);
    }

    /// Total live entities across all collections
    pub fn entity_count(&self) -> usize {
        self.objects.len() + self.particles.len() + self.floats.len()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
