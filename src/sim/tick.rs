//! Fixed timestep simulation tick
//!
//! Core update engine that advances the playfield by one 16 ms step.

use glam::Vec2;

use super::collision::{impact_point, is_colliding};
use super::spawn::{spawn_burst, spawn_floating_text};
use super::state::{Category, FloatStyle, GameEvent, GameState, MALUS_COLOR};
use crate::consts::*;

/// Held-key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left key held
    pub left: bool,
    /// Move-right key held
    pub right: bool,
}

/// What the session should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Lives ran out this tick (or earlier)
    GameOver,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.time_ticks += 1;

    // Player movement comes before anything else in the tick
    let mut x = state.player_x;
    if input.left {
        x -= state.player_speed;
    }
    if input.right {
        x += state.player_speed;
    }
    state.set_player_x(x);

    update_objects(state);
    update_particles(state);
    update_floats(state);

    // Decay screen shake
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }
    state.flash *= 0.85;
    if state.flash < 0.01 {
        state.flash = 0.0;
    }

    if state.lives == 0 {
        TickOutcome::GameOver
    } else {
        TickOutcome::Continue
    }
}

/// Move falling objects, resolve catches and floor exits
fn update_objects(state: &mut GameState) {
    let player = state.player_rect();
    let size = state.config.object_size;
    let floor = state.config.playfield_height + EXIT_MARGIN;

    // Reverse walk so removals don't disturb unvisited indices
    let mut i = state.objects.len();
    while i > 0 {
        i -= 1;

        let obj = &mut state.objects[i];
        obj.y += obj.speed;
        let rect = obj.rect(size);

        if is_colliding(&rect, &player) {
            let obj = state.objects.remove(i);
            resolve_catch(state, obj.category, impact_point(&rect, &player));
            continue;
        }

        if state.objects[i].y > floor {
            let obj = state.objects.remove(i);
            if obj.category == Category::Bonus && state.config.rules.miss_penalty {
                let at = Vec2::new(obj.x, state.config.playfield_height - EXIT_MARGIN);
                state.score = state.score.saturating_sub(BONUS_POINTS);
                spawn_floating_text(state, at, &format!("-{BONUS_POINTS}"), FloatStyle::Loss);
                spawn_burst(state, at, MALUS_COLOR);
                state.events.push(GameEvent::BonusMissed { at });
            }
        }
    }
}

/// Apply the effect of catching an object of the given category
fn resolve_catch(state: &mut GameState, category: Category, at: Vec2) {
    match category {
        Category::Bonus => {
            state.score += BONUS_POINTS;
            spawn_floating_text(state, at, &format!("+{BONUS_POINTS}"), FloatStyle::Gain);
        }
        Category::Malus => {
            state.lives = state.lives.saturating_sub(1);
            spawn_floating_text(state, at, "-1 Life", FloatStyle::Loss);
            state.screen_shake = (state.screen_shake + 0.6).min(1.0);
            state.flash = 1.0;
        }
        Category::Life => {
            if state.lives >= state.max_lives() {
                // Already at the cap: the pickup is simply consumed
                return;
            }
            state.lives += 1;
            spawn_floating_text(state, at, "+1 Life", FloatStyle::Life);
        }
    }
    spawn_burst(state, at, category.burst_color());
    state.events.push(GameEvent::Caught { category, at });
}

fn update_particles(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.life -= TICK_MS;
        if p.life > 0.0 {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
        }
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn update_floats(state: &mut GameState) {
    for f in state.floats.iter_mut() {
        f.life -= TICK_MS;
    }
    state.floats.retain(|f| f.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Rules};
    use crate::sim::state::FallingObject;

    fn state_with(rules: Rules) -> GameState {
        GameState::new(GameConfig::with_rules(rules), 12345)
    }

    /// Place an object so it overlaps the paddle after one tick of movement
    fn drop_on_player(state: &mut GameState, category: Category) -> u32 {
        let id = state.next_entity_id();
        let x = state.player_x + state.config.paddle_width / 2.0 - state.config.object_size / 2.0;
        let y = state.config.paddle_top() - state.config.object_size + 5.0;
        state.objects.push(FallingObject {
            id,
            category,
            x,
            y,
            speed: 2.0,
        });
        id
    }

    #[test]
    fn test_bonus_catch_scores_ten() {
        let mut state = state_with(Rules::default());
        drop_on_player(&mut state, Category::Bonus);

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(state.score, 10);
        assert!(state.objects.is_empty());
        assert_eq!(state.floats.len(), 1);
        assert_eq!(state.floats[0].text, "+10");
        assert!(!state.particles.is_empty());
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::Caught {
                category: Category::Bonus,
                ..
            }]
        ));
    }

    #[test]
    fn test_malus_costs_a_life_and_shakes() {
        let mut state = state_with(Rules::default());
        drop_on_player(&mut state, Category::Malus);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.floats[0].text, "-1 Life");
        assert!(state.screen_shake > 0.0);
        assert!(state.flash > 0.0);
    }

    #[test]
    fn test_last_malus_ends_game() {
        let mut state = state_with(Rules::default());
        state.lives = 1;
        drop_on_player(&mut state, Category::Malus);

        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::GameOver);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_life_pickup_below_cap() {
        let mut state = state_with(Rules::default());
        state.lives = 1;
        drop_on_player(&mut state, Category::Life);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.floats[0].text, "+1 Life");
    }

    #[test]
    fn test_life_pickup_at_cap_is_a_no_op() {
        let mut state = state_with(Rules::default());
        assert_eq!(state.lives, state.max_lives());
        drop_on_player(&mut state, Category::Life);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, state.max_lives());
        assert!(state.objects.is_empty());
        assert!(state.floats.iter().all(|f| f.text != "+1 Life"));
        assert!(state.particles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_higher_life_cap() {
        let mut state = state_with(Rules::with_max_lives(6));
        assert_eq!(state.lives, 6);
        state.lives = 5;
        drop_on_player(&mut state, Category::Life);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 6);
    }

    #[test]
    fn test_object_past_floor_is_removed() {
        let mut state = state_with(Rules::default());
        let floor = state.config.playfield_height + EXIT_MARGIN;
        state.objects.push(FallingObject {
            id: 99,
            category: Category::Malus,
            x: 0.0,
            y: floor - 1.0,
            speed: 2.0,
        });
        // Keep the paddle away from the object's column
        state.set_player_x(state.config.max_player_x());

        tick(&mut state, &TickInput::default());

        assert!(state.objects.is_empty());
        assert_eq!(state.lives, state.max_lives());
    }

    #[test]
    fn test_object_exactly_at_floor_stays() {
        let mut state = state_with(Rules::default());
        let floor = state.config.playfield_height + EXIT_MARGIN;
        state.objects.push(FallingObject {
            id: 99,
            category: Category::Bonus,
            x: 0.0,
            y: floor - 2.0,
            speed: 2.0,
        });
        state.set_player_x(state.config.max_player_x());

        tick(&mut state, &TickInput::default());

        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_missed_bonus_without_penalty() {
        let mut state = state_with(Rules::default());
        state.score = 30;
        state.set_player_x(state.config.max_player_x());
        state.objects.push(FallingObject {
            id: 1,
            category: Category::Bonus,
            x: 0.0,
            y: 1_000.0,
            speed: 2.0,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 30);
        assert!(state.floats.is_empty());
    }

    #[test]
    fn test_missed_bonus_penalty_clamps_at_zero() {
        let mut state = state_with(Rules::classic());
        state.score = 5;
        state.set_player_x(state.config.max_player_x());
        state.objects.push(FallingObject {
            id: 1,
            category: Category::Bonus,
            x: 0.0,
            y: 1_000.0,
            speed: 2.0,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 0);
        assert_eq!(state.floats[0].text, "-10");
        assert!(matches!(state.events[0], GameEvent::BonusMissed { .. }));
    }

    #[test]
    fn test_player_movement_is_clamped() {
        let mut state = state_with(Rules::default());
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &right);
        }
        assert_eq!(state.player_x, state.config.max_player_x());

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.player_x, state.config.max_player_x() - state.player_speed);

        for _ in 0..500 {
            tick(&mut state, &left);
        }
        assert_eq!(state.player_x, 0.0);
    }

    #[test]
    fn test_both_keys_cancel_out() {
        let mut state = state_with(Rules::default());
        let start = state.player_x;
        tick(
            &mut state,
            &TickInput {
                left: true,
                right: true,
            },
        );
        assert_eq!(state.player_x, start);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = state_with(Rules::default());
        crate::sim::spawn::spawn_particles(&mut state, Vec2::new(50.0, 50.0), "#fff", 10);
        let start_y: Vec<f32> = state.particles.iter().map(|p| p.vel.y).collect();

        tick(&mut state, &TickInput::default());
        for (p, vy) in state.particles.iter().zip(start_y) {
            assert!((p.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-5);
        }

        // Longest possible life is 1300 ms
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_floating_text_expires_after_budget() {
        let mut state = state_with(Rules::default());
        crate::sim::spawn::spawn_floating_text(
            &mut state,
            Vec2::ZERO,
            "+10",
            FloatStyle::Gain,
        );
        // 800 / 16 = 50 ticks
        for _ in 0..49 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.floats.len(), 1);
        tick(&mut state, &TickInput::default());
        assert!(state.floats.is_empty());
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut state = state_with(Rules::default());
        state.screen_shake = 1.0;
        state.flash = 1.0;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.screen_shake, 0.0);
        assert_eq!(state.flash, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state_with(Rules::default());
        let mut state2 = state_with(Rules::default());

        for i in 0..300 {
            if i % 40 == 0 {
                crate::sim::spawn::spawn_object(&mut state1);
                crate::sim::spawn::spawn_object(&mut state2);
            }
            let input = TickInput {
                left: i % 3 == 0,
                right: i % 5 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.objects.len(), state2.objects.len());
        assert!((state1.player_x - state2.player_x).abs() < 0.0001);
    }
}
