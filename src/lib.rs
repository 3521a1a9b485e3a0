//! Escape Arcade - four mini-games chained into a prison-break campaign
//!
//! Core modules:
//! - `sim`: Deterministic simulation primitives (collision, RNG, level capability set)
//! - `games`: The four mini-games (maze, shooter, flappy, platformer)
//! - `campaign`: Global screen state machine sequencing the games
//! - `renderer`: Retained per-frame draw command buffer for the host
//! - `platform`: Input snapshot and clock adapter
//! - `settings`: Host configuration

pub mod campaign;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use campaign::{Campaign, Screen};
pub use platform::{Clock, Frame, InputSnapshot};
pub use renderer::{DrawCommand, DrawList};
pub use settings::{Settings, SettingsError};
pub use sim::{GameRng, Level, MiniGame, Outcome, Rect};

/// Game configuration constants
pub mod consts {
    /// Logical canvas (origin top-left, y grows down)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Host tick cadence
    pub const TARGET_TPS: u32 = 60;
    /// Nominal frame time at the target cadence
    pub const SIM_DT: f32 = 1.0 / TARGET_TPS as f32;
    /// Longest frame the host may report before clamping
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Keep a value within `[min, max]`
///
/// Unlike `f32::clamp` this never panics when `min > max`; the lower bound wins.
#[inline]
pub fn clamp_to(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
