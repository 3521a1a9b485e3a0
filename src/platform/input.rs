//! Per-frame input snapshot
//!
//! Level-held keys are true for every frame the key is down. Edge events are
//! true only on the frame the press happened; the host clears them after one tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything the games read from the keyboard and mouse in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    // === Level-held ===
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub space: bool,

    // === Edge events ===
    pub space_pressed: bool,
    pub enter_pressed: bool,
    /// Left mouse button went down this frame
    pub mouse_pressed: bool,

    /// Cursor position in canvas coordinates
    pub mouse_pos: Vec2,
}

impl InputSnapshot {
    /// A left click at the given canvas position
    pub fn click(x: f32, y: f32) -> Self {
        Self {
            mouse_pressed: true,
            mouse_pos: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// SPACE held and pressed this frame
    pub fn tap_space() -> Self {
        Self {
            space: true,
            space_pressed: true,
            ..Default::default()
        }
    }

    /// ENTER pressed this frame
    pub fn enter() -> Self {
        Self {
            enter_pressed: true,
            ..Default::default()
        }
    }

    /// Left mouse press position, if the button went down this frame
    pub fn click_position(&self) -> Option<Vec2> {
        self.mouse_pressed.then_some(self.mouse_pos)
    }

    /// Drop edge events after they have been consumed by one tick
    pub fn clear_edges(&mut self) {
        self.space_pressed = false;
        self.enter_pressed = false;
        self.mouse_pressed = false;
    }

    /// Horizontal axis from arrow keys (-1, 0 or +1)
    pub fn axis_x(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Vertical axis from arrow keys (-1 up, +1 down)
    pub fn axis_y(&self) -> f32 {
        (self.down as i8 - self.up as i8) as f32
    }
}
