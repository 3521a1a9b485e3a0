//! Draw commands and the per-frame list that carries them to the host

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::colors::Color;
use crate::sim::Rect;

/// Horizontal text alignment relative to the given x
///
/// Text measurement belongs to the host, so centering is resolved there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// A single drawing primitive in canvas coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: Color },
    Rect { rect: Rect, color: Color },
    RectLines { rect: Rect, thickness: f32, color: Color },
    /// `roundness` is the corner radius as a fraction of the shorter side
    RoundedRect { rect: Rect, roundness: f32, segments: u32, color: Color },
    RoundedRectLines { rect: Rect, roundness: f32, segments: u32, thickness: f32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    CircleLines { center: Vec2, radius: f32, color: Color },
    Ellipse { center: Vec2, radii: Vec2, color: Color },
    EllipseLines { center: Vec2, radii: Vec2, color: Color },
    /// Counter-clockwise vertices
    Triangle { a: Vec2, b: Vec2, c: Vec2, color: Color },
    /// `pos.y` is the top of the text line
    Text { text: String, pos: Vec2, size: f32, color: Color, anchor: TextAnchor },
}

/// Ordered list of primitives for one frame (painter's order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// All text strings in draw order (handy for assertions and debug dumps)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear_background(&mut self, color: Color) {
        self.push(DrawCommand::Clear { color });
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Rect { rect, color });
    }

    pub fn rect_lines(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.push(DrawCommand::RectLines {
            rect,
            thickness,
            color,
        });
    }

    pub fn rounded_rect(&mut self, rect: Rect, roundness: f32, segments: u32, color: Color) {
        self.push(DrawCommand::RoundedRect {
            rect,
            roundness,
            segments,
            color,
        });
    }

    pub fn rounded_rect_lines(
        &mut self,
        rect: Rect,
        roundness: f32,
        segments: u32,
        thickness: f32,
        color: Color,
    ) {
        self.push(DrawCommand::RoundedRectLines {
            rect,
            roundness,
            segments,
            thickness,
            color,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn circle_lines(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::CircleLines {
            center,
            radius,
            color,
        });
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.push(DrawCommand::Ellipse {
            center,
            radii,
            color,
        });
    }

    pub fn ellipse_lines(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.push(DrawCommand::EllipseLines {
            center,
            radii,
            color,
        });
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.push(DrawCommand::Triangle { a, b, c, color });
    }

    /// Left-aligned text with its top-left corner at `(x, y)`
    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.text_anchored(text, x, y, size, color, TextAnchor::Left);
    }

    /// Text horizontally centered on `x`
    pub fn text_centered(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        self.text_anchored(text, x, y, size, color, TextAnchor::Center);
    }

    pub fn text_anchored(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    ) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(x, y),
            size,
            color,
            anchor,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors::{RED, WHITE};

    #[test]
    fn test_draw_list_order_and_reset() {
        let mut list = DrawList::new();
        list.rect(Rect::new(0.0, 0.0, 10.0, 10.0), RED);
        list.text_centered("hello", 640.0, 10.0, 20.0, WHITE);
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::Rect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["hello"]);
        match &list.commands()[1] {
            DrawCommand::Text { anchor, .. } => assert_eq!(*anchor, TextAnchor::Center),
            other => panic!("unexpected command {other:?}"),
        }

        list.reset();
        assert!(list.is_empty());
    }
}
