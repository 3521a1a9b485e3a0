//! Frame timing
//!
//! The host reports raw frame deltas; the clock clamps them and keeps a
//! monotonic timestamp used for cooldowns.

use serde::{Deserialize, Serialize};

use super::input::InputSnapshot;
use crate::consts::MAX_FRAME_DELTA;

/// One host frame: delta seconds, monotonic time and input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub dt: f32,
    pub now: f64,
    pub input: InputSnapshot,
}

impl Frame {
    pub fn new(dt: f32, now: f64, input: InputSnapshot) -> Self {
        Self { dt, now, input }
    }
}

/// Monotonic simulation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    now: f64,
    max_delta: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl Clock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            now: 0.0,
            max_delta,
        }
    }

    /// Seconds since the clock started
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance by a raw host delta, returning the frame to simulate
    ///
    /// Negative or NaN deltas count as zero; long stalls are clamped to `max_delta`.
    pub fn advance(&mut self, raw_dt: f32, input: InputSnapshot) -> Frame {
        let dt = if raw_dt.is_finite() && raw_dt > 0.0 {
            raw_dt.min(self.max_delta)
        } else {
            0.0
        };
        self.now += dt as f64;
        Frame::new(dt, self.now, input)
    }
}
