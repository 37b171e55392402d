//! Frame clock
//!
//! Turns `requestAnimationFrame` timestamps into clamped frame deltas for the
//! session's fixed-timestep accumulator.

use crate::consts::{MAX_FRAME_MS, TICK_MS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta in ms since the previous frame
    ///
    /// The first frame yields one tick. Backwards jumps yield zero and long
    /// stalls (hidden tab) are clamped.
    pub fn frame(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => TICK_MS as f64,
        };
        self.last_time = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (after a pause or a new session)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(5_000.0), 16.0);
        assert_eq!(clock.frame(5_016.5), 16.5);
    }

    #[test]
    fn test_stalls_are_clamped() {
        let mut clock = FrameClock::new();
        clock.frame(0.0);
        assert_eq!(clock.frame(10_000.0), MAX_FRAME_MS);
        assert_eq!(clock.frame(9_000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.frame(100.0);
        clock.reset();
        assert_eq!(clock.frame(900.0), 16.0);
    }
}
