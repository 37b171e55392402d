//! Entity spawning: falling objects, particle bursts, floating text
//!
//! All randomness is drawn from the state's seeded RNG.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use rand::Rng;

use super::state::{Category, FallingObject, FloatStyle, FloatingText, GameState, Particle};
use crate::consts::*;

/// Cumulative category thresholds: 60% bonus, 35% malus, 5% life
const BONUS_THRESHOLD: f32 = 0.60;
const MALUS_THRESHOLD: f32 = 0.95;

/// Draw a falling object category
pub fn sample_category<R: Rng>(rng: &mut R) -> Category {
    let roll: f32 = rng.random();
    if roll < BONUS_THRESHOLD {
        Category::Bonus
    } else if roll < MALUS_THRESHOLD {
        Category::Malus
    } else {
        Category::Life
    }
}

/// Drop one new object from just above the top edge
///
/// Returns the new object's ID.
pub fn spawn_object(state: &mut GameState) -> u32 {
    let category = sample_category(&mut state.rng);
    // Degenerate playfields still get a 1px spawn band
    let span = (state.config.playfield_width - state.config.object_size).max(1.0);
    let x = state.rng.random::<f32>() * span;
    let speed = (FALL_SPEED_BASE + state.rng.random::<f32>() * FALL_SPEED_JITTER) * state.difficulty;

    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        category,
        x,
        y: SPAWN_Y,
        speed,
    });
    log::debug!(
        "Spawned {} #{} at x={:.0} speed={:.2}",
        category.as_str(),
        id,
        x,
        speed
    );
    id
}

/// Emit `count` particles from `point`, fanning out over a half circle
pub fn spawn_particles(state: &mut GameState, point: Vec2, color: &'static str, count: usize) {
    for _ in 0..count {
        let angle = state.rng.random::<f32>() * PI - FRAC_PI_2;
        let speed = 1.0 + state.rng.random::<f32>();
        let life = PARTICLE_BASE_LIFE_MS + state.rng.random::<f32>() * PARTICLE_LIFE_JITTER_MS;

        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos: point,
            // Upward bias, gravity pulls them back down
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.0),
            life,
            max_life: life,
            color,
        });
    }
}

/// Particle burst with a randomized size
pub fn spawn_burst(state: &mut GameState, point: Vec2, color: &'static str) {
    let count = state.rng.random_range(BURST_MIN..=BURST_MAX);
    spawn_particles(state, point, color, count);
}

/// Emit one transient label at `point`
pub fn spawn_floating_text(state: &mut GameState, point: Vec2, text: &str, style: FloatStyle) {
    let id = state.next_entity_id();
    state.floats.push(FloatingText {
        id,
        pos: point,
        text: text.to_string(),
        style,
        life: FLOAT_LIFE_MS,
    });
}
