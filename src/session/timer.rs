//! Cancellable interval timers driven by simulated time
//!
//! Stand-ins for `setInterval`: the session advances them by the tick length,
//! so they only run while their owner says so and tests can drive them
//! directly.

/// A repeating timer measured in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period_ms: f32,
    elapsed_ms: f32,
    active: bool,
}

impl IntervalTimer {
    /// Create a stopped timer
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            elapsed_ms: 0.0,
            active: false,
        }
    }

    /// (Re)start from zero with a new period
    pub fn start(&mut self, period_ms: f32) {
        self.period_ms = period_ms.max(1.0);
        self.elapsed_ms = 0.0;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Advance by `dt_ms` and return how many periods elapsed
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let mut fires = 0;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            fires += 1;
        }
        fires
    }
}
