//! Colors for game elements

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled to `alpha` (0-1)
    pub fn fade(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            a: (255.0 * alpha).round() as u8,
            ..self
        }
    }
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const RAYWHITE: Color = Color::rgb(245, 245, 245);
pub const LIGHTGRAY: Color = Color::rgb(200, 200, 200);
pub const GRAY: Color = Color::rgb(130, 130, 130);
pub const DARKGRAY: Color = Color::rgb(80, 80, 80);
pub const RED: Color = Color::rgb(230, 41, 55);
pub const GOLD: Color = Color::rgb(255, 203, 0);
pub const YELLOW: Color = Color::rgb(253, 249, 0);
pub const GREEN: Color = Color::rgb(0, 228, 48);
pub const LIME: Color = Color::rgb(0, 158, 47);
pub const DARKGREEN: Color = Color::rgb(0, 117, 44);
pub const SKYBLUE: Color = Color::rgb(102, 191, 255);
pub const BLUE: Color = Color::rgb(0, 121, 241);
pub const DARKBLUE: Color = Color::rgb(0, 82, 172);
pub const PURPLE: Color = Color::rgb(200, 122, 255);
pub const BROWN: Color = Color::rgb(127, 106, 79);
pub const DARKBROWN: Color = Color::rgb(76, 63, 47);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade() {
        assert_eq!(BLACK.fade(0.8).a, 204);
        assert_eq!(WHITE.fade(2.0).a, 255);
        assert_eq!(RED.fade(0.0), Color::rgba(230, 41, 55, 0));
    }
}
