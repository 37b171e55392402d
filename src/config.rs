//! Playfield geometry and rule set
//!
//! The game grew through several near-identical revisions that disagreed on a
//! few rules (life cap, missed-bonus penalty, restart flow). Those choices live
//! in [`Rules`] so every revision's behavior is selectable; the defaults are the
//! canonical set.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What the restart button does on the end-of-session summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartBehavior {
    /// Go back to the start screen and wait for the player
    #[default]
    StartScreen,
    /// Begin a new session right away with the last difficulty
    Immediate,
}

/// Gameplay rules that varied between revisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Lives at session start and cap for life pickups
    pub max_lives: u32,
    /// Letting a bonus fall through costs points (clamped at zero)
    pub miss_penalty: bool,
    pub restart: RestartBehavior,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_lives: DEFAULT_MAX_LIVES,
            miss_penalty: false,
            restart: RestartBehavior::StartScreen,
        }
    }
}

impl Rules {
    /// Rules of the first revision: missing a bonus costs points
    pub fn classic() -> Self {
        Self {
            miss_penalty: true,
            ..Self::default()
        }
    }

    /// Rule set with a custom life cap (revisions used 3 to 6)
    pub fn with_max_lives(max_lives: u32) -> Self {
        Self {
            max_lives: max_lives.max(1),
            ..Self::default()
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub object_size: f32,
    pub base_spawn_interval_ms: f32,
    pub difficulty_ramp_ms: f32,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            object_size: OBJECT_SIZE,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            difficulty_ramp_ms: DIFFICULTY_RAMP_MS,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Rules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Rightmost paddle position for the current playfield
    pub fn max_player_x(&self) -> f32 {
        (self.playfield_width - self.paddle_width).max(0.0)
    }

    /// Paddle position centered in the playfield
    pub fn centered_player_x(&self) -> f32 {
        self.max_player_x() / 2.0
    }

    /// Clamp paddle X to playfield bounds
    pub fn clamp_player_x(&self, x: f32) -> f32 {
        x.clamp(0.0, self.max_player_x())
    }

    /// Top edge of the paddle
    pub fn paddle_top(&self) -> f32 {
        self.playfield_height - self.paddle_height - PADDLE_BOTTOM_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_player_x() {
        let config = GameConfig::new();
        assert_eq!(config.clamp_player_x(-20.0), 0.0);
        assert_eq!(config.clamp_player_x(10_000.0), 500.0);
        assert_eq!(config.clamp_player_x(123.0), 123.0);
    }

    #[test]
    fn test_narrow_playfield_pins_player_to_zero() {
        let config = GameConfig {
            playfield_width: 40.0,
            ..GameConfig::default()
        };
        assert_eq!(config.max_player_x(), 0.0);
        assert_eq!(config.clamp_player_x(15.0), 0.0);
    }

    #[test]
    fn test_rule_presets() {
        assert!(!Rules::default().miss_penalty);
        assert!(Rules::classic().miss_penalty);
        assert_eq!(Rules::with_max_lives(6).max_lives, 6);
        assert_eq!(Rules::with_max_lives(0).max_lives, 1);
    }
}
