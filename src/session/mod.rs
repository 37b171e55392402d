//! Session lifecycle
//!
//! Owns the simulation state, the session-scoped timers and the best score.
//! Idle -> Running -> Ended -> (Idle | Running) depending on the restart rule.

pub mod timer;

pub use timer::IntervalTimer;

use crate::best_score::BestScore;
use crate::config::{GameConfig, RestartBehavior};
use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::settings::DifficultyLevel;
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, spawn_object, tick};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Start screen shown, no timers running
    Idle,
    /// Frame loop and timers active
    Running,
    /// Summary shown, timers cleared
    Ended,
}

/// End-of-session numbers for the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub best: u64,
    pub new_best: bool,
}

/// A player's run of sessions against one store
pub struct Session {
    state: GameState,
    phase: SessionPhase,
    level: DifficultyLevel,
    best: BestScore,
    store: Box<dyn KeyValueStore>,
    spawn_timer: IntervalTimer,
    ramp_timer: IntervalTimer,
    /// Unsimulated frame time in ms
    accumulator: f32,
    summary: Option<SessionSummary>,
    base_seed: u64,
    sessions_started: u64,
}

impl Session {
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        let best = BestScore::load(store.as_ref());
        let spawn_period = config.base_spawn_interval_ms;
        let ramp_period = config.difficulty_ramp_ms;
        Self {
            state: GameState::new(config, seed),
            phase: SessionPhase::Idle,
            level: DifficultyLevel::default(),
            best,
            store,
            spawn_timer: IntervalTimer::new(spawn_period),
            ramp_timer: IntervalTimer::new(ramp_period),
            accumulator: 0.0,
            summary: None,
            base_seed: seed,
            sessions_started: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    /// Summary of the last finished session
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    /// Difficulty of the current (or last) session
    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn spawn_timer(&self) -> &IntervalTimer {
        &self.spawn_timer
    }

    pub fn ramp_timer(&self) -> &IntervalTimer {
        &self.ramp_timer
    }

    /// Start a new session
    ///
    /// Returns false if a session is already running.
    pub fn start_game(&mut self, level: DifficultyLevel) -> bool {
        if self.is_running() {
            return false;
        }

        let seed = self
            .base_seed
            .wrapping_add(self.sessions_started.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.sessions_started += 1;

        self.state.reset(seed);
        self.level = level;
        self.summary = None;
        self.accumulator = 0.0;

        let spawn_ms = level.spawn_interval_ms(self.state.config.base_spawn_interval_ms);
        self.spawn_timer.start(spawn_ms);
        self.ramp_timer.start(self.state.config.difficulty_ramp_ms);
        self.phase = SessionPhase::Running;

        log::info!(
            "Session started ({}, spawn every {:.0} ms, seed {})",
            level.as_str(),
            spawn_ms,
            seed
        );
        true
    }

    /// Run one fixed tick: timers first, then the update engine
    pub fn step(&mut self, input: &TickInput) {
        if !self.is_running() {
            return;
        }

        for _ in 0..self.spawn_timer.advance(TICK_MS) {
            spawn_object(&mut self.state);
        }
        for _ in 0..self.ramp_timer.advance(TICK_MS) {
            self.ramp_difficulty();
        }

        if tick(&mut self.state, input) == TickOutcome::GameOver {
            self.game_over();
        }
    }

    /// Feed one display frame's worth of time
    ///
    /// Returns the number of ticks simulated.
    pub fn advance(&mut self, frame_ms: f64, input: &TickInput) -> u32 {
        if !self.is_running() {
            return 0;
        }
        self.accumulator += frame_ms.clamp(0.0, MAX_FRAME_MS) as f32;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS && self.is_running() {
            self.step(input);
            self.accumulator -= TICK_MS;
            substeps += 1;
        }
        substeps
    }

    /// Objects fall faster and the paddle speeds up
    fn ramp_difficulty(&mut self) {
        self.state.difficulty += DIFFICULTY_STEP;
        self.state.player_speed = (self.state.player_speed + PLAYER_SPEED_STEP).min(PLAYER_MAX_SPEED);
        self.state.events.push(GameEvent::DifficultyRaised {
            difficulty: self.state.difficulty,
        });
        log::debug!(
            "Difficulty raised to {:.2} (player speed {:.2})",
            self.state.difficulty,
            self.state.player_speed
        );
    }

    /// End the running session
    ///
    /// Cancels the timers, persists a new best and records the summary.
    /// Does nothing unless a session is running.
    pub fn game_over(&mut self) {
        if !self.is_running() {
            return;
        }
        self.spawn_timer.cancel();
        self.ramp_timer.cancel();
        self.accumulator = 0.0;

        let score = self.state.score;
        let new_best = self.best.record(score);
        if new_best {
            if let Err(e) = self.best.save(self.store.as_mut()) {
                log::warn!("Could not persist best score: {}", e);
            }
        }

        let summary = SessionSummary {
            score,
            best: self.best.value(),
            new_best,
        };
        self.summary = Some(summary);
        self.state.events.push(GameEvent::GameOver {
            score,
            best: summary.best,
            new_best,
        });
        self.phase = SessionPhase::Ended;

        log::info!(
            "Game over - score {}, best {}{}",
            score,
            summary.best,
            if new_best { " (new best!)" } else { "" }
        );
    }

    /// Leave the summary screen according to the restart rule
    pub fn restart(&mut self) {
        if self.phase != SessionPhase::Ended {
            return;
        }
        match self.state.config.rules.restart {
            RestartBehavior::StartScreen => {
                self.phase = SessionPhase::Idle;
                log::info!("Back to start screen");
            }
            RestartBehavior::Immediate => {
                self.phase = SessionPhase::Idle;
                self.start_game(self.level);
            }
        }
    }

    /// Apply a new playfield size (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Hand pending events to the frontend
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
