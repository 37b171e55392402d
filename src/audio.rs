//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Every failure (no AudioContext, autoplay blocked, node errors) is swallowed:
//! the game just plays without sound.

use crate::sim::{Category, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bonus caught
    Bonus,
    /// Malus caught
    Malus,
    /// Life pickup caught
    Life,
    /// Bonus fell through (penalty rule)
    Miss,
    /// Difficulty ramp
    LevelUp,
    /// Game over
    GameOver,
    /// Game over with a new best score
    HighScore,
}

/// Sound cue for a game event
pub fn cue_for(event: &GameEvent) -> SoundEffect {
    match event {
        GameEvent::Caught { category, .. } => match category {
            Category::Bonus => SoundEffect::Bonus,
            Category::Malus => SoundEffect::Malus,
            Category::Life => SoundEffect::Life,
        },
        GameEvent::BonusMissed { .. } => SoundEffect::Miss,
        GameEvent::DifficultyRaised { .. } => SoundEffect::LevelUp,
        GameEvent::GameOver { new_best: true, .. } => SoundEffect::HighScore,
        GameEvent::GameOver { .. } => SoundEffect::GameOver,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set volume (0.0 - 1.0), 0 mutes
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Bonus => self.play_bonus(ctx, vol),
                SoundEffect::Malus => self.play_malus(ctx, vol),
                SoundEffect::Life => self.play_arpeggio(ctx, vol, &[600.0, 800.0, 1000.0], 0.08),
                SoundEffect::Miss => self.play_miss(ctx, vol),
                SoundEffect::LevelUp => self.play_arpeggio(ctx, vol, &[400.0, 600.0], 0.1),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::HighScore => {
                    self.play_arpeggio(ctx, vol, &[500.0, 600.0, 700.0, 800.0, 1000.0], 0.08)
                }
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Bonus - bright blip
        fn play_bonus(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1320.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Malus - low buzz with a thump
        fn play_malus(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(160.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(60.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        /// Miss - soft descending tap
        fn play_miss(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(150.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Rising notes, one after another
        fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], spacing: f64) {
            for (i, freq) in freqs.iter().enumerate() {
                let delay = i as f64 * spacing;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_catch_cues() {
        let caught = |category| GameEvent::Caught {
            category,
            at: Vec2::ZERO,
        };
        assert_eq!(cue_for(&caught(Category::Bonus)), SoundEffect::Bonus);
        assert_eq!(cue_for(&caught(Category::Malus)), SoundEffect::Malus);
        assert_eq!(cue_for(&caught(Category::Life)), SoundEffect::Life);
    }

    #[test]
    fn test_game_over_cues() {
        let over = |new_best| GameEvent::GameOver {
            score: 10,
            best: 10,
            new_best,
        };
        assert_eq!(cue_for(&over(true)), SoundEffect::HighScore);
        assert_eq!(cue_for(&over(false)), SoundEffect::GameOver);
    }
}
