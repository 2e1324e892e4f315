//! Frame clock producing millisecond deltas

use std::time::Instant;

/// Longest frame delta handed to systems, in milliseconds
const MAX_FRAME_MS: f32 = 250.0;

/// Tracks elapsed frame time in milliseconds
pub struct FrameClock {
    /// Total elapsed time in milliseconds
    pub total_ms: f64,
    /// Time since last frame in milliseconds
    pub delta_ms: f32,
    /// Number of ticks so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_ms: 0.0,
            delta_ms: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from wall time. Call once per frame; returns the new delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_ms = 0.0;
            self.frame += 1;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f32() * 1000.0;
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by a fixed amount. Used by headless hosts and tests.
    pub fn advance(&mut self, ms: f32) -> f32 {
        // Clamp to avoid a catch-up spiral after a stall
        self.delta_ms = ms.clamp(0.0, MAX_FRAME_MS);
        self.total_ms += self.delta_ms as f64;
        self.frame += 1;
        self.delta_ms
    }
}
