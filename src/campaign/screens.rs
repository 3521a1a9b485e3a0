//! Title, transition and end screens drawn by the campaign between levels

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::colors::*;
use crate::renderer::{DrawList, TextAnchor};
use crate::sim::Rect;

pub const ESCAPE_BUTTON: Rect = Rect::new(490.0, 410.0, 300.0, 70.0);
pub const SUFFER_BUTTON: Rect = Rect::new(490.0, 510.0, 300.0, 70.0);
pub const CONFIRM_BUTTON: Rect = Rect::new(540.0, 540.0, 200.0, 50.0);

pub const TOAST_TEXT: &str = "NO LOSER YOU NEED TO ESCAPE";
/// How long the SUFFER toast stays up (seconds)
pub const TOAST_SECONDS: f32 = 2.0;

const TITLE_TEXT: &str =
    "You are in prison for kidnapping a qurbani ka bakra,\n \n \n \n \n \n \n \n       you should";

/// Timed message on the title screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    visible: bool,
    timer: f32,
}

impl Toast {
    pub fn show(&mut self) {
        self.visible = true;
        self.timer = 0.0;
    }

    pub fn clear(&mut self) {
        self.visible = false;
        self.timer = 0.0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The frame that showed the toast is ticked too, so its `dt` counts
    /// toward `TOAST_SECONDS`.
    pub fn tick(&mut self, dt: f32) {
        if !self.visible {
            return;
        }
        self.timer += dt;
        if self.timer >= TOAST_SECONDS {
            self.visible = false;
        }
    }
}

fn button(out: &mut DrawList, rect: Rect, fill: Color, label: &str, size: f32, text: Color) {
    out.rect(rect, fill);
    let center = rect.center();
    out.text_centered(label, center.x, center.y - size / 2.0, size, text);
}

pub fn draw_title(toast: &Toast, out: &mut DrawList) {
    let cx = SCREEN_WIDTH / 2.0;
    out.text_centered(TITLE_TEXT, cx, SCREEN_HEIGHT / 2.0 - 150.0, 30.0, WHITE);

    button(out, ESCAPE_BUTTON, GREEN, "ESCAPE", 40.0, BLACK);
    button(out, SUFFER_BUTTON, RED, "SUFFER", 40.0, BLACK);

    if toast.is_visible() {
        out.text_centered(TOAST_TEXT, cx, SCREEN_HEIGHT / 2.0 + 280.0, 30.0, YELLOW);
    }
}

/// Overlay announcing the next level and how to play it
pub fn draw_transition(name: &str, instructions: &str, out: &mut DrawList) {
    let cx = SCREEN_WIDTH / 2.0;
    out.rect(
        Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
        BLACK.fade(0.8),
    );

    // "Next Level: " and the name share one line, split at the center
    let title_y = SCREEN_HEIGHT / 4.0;
    out.text_anchored("Next Level: ", cx, title_y, 40.0, RAYWHITE, TextAnchor::Right);
    out.text_anchored(name, cx, title_y, 40.0, GOLD, TextAnchor::Left);

    out.text_centered("How to Play:", cx, SCREEN_HEIGHT / 2.0 - 50.0, 30.0, RAYWHITE);
    out.text_centered(instructions, cx, SCREEN_HEIGHT / 2.0, 25.0, LIGHTGRAY);

    out.rect(CONFIRM_BUTTON, DARKGREEN);
    out.rect_lines(CONFIRM_BUTTON, 3.0, GREEN);
    let c = CONFIRM_BUTTON.center();
    out.text_centered("Ready!", c.x, c.y - 15.0, 30.0, RAYWHITE);
}

pub fn draw_lost(out: &mut DrawList) {
    let cx = SCREEN_WIDTH / 2.0;
    let cy = SCREEN_HEIGHT / 2.0;
    out.text_centered("loser you got caught.", cx, cy - 50.0, 60.0, RED);
    out.text_centered("Press ENTER to bribe & Try Again", cx, cy + 20.0, 30.0, WHITE);
}

pub fn draw_won(out: &mut DrawList) {
    let cx = SCREEN_WIDTH / 2.0;
    let cy = SCREEN_HEIGHT / 2.0;
    out.text_centered("CONGRATULATIONS!", cx, cy - 80.0, 50.0, GOLD);
    out.text_centered("You Escaped prison!", cx, cy - 20.0, 40.0, LIME);
    out.text_centered("Press ENTER to kidnap a bakra again!", cx, cy + 50.0, 30.0, WHITE);
}
