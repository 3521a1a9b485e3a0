//! Obstacle course level: run and jump across fixed platforms, collect every
//! coin, then reach the exit door

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Frame;
use crate::renderer::DrawList;
use crate::renderer::colors::*;
use crate::sim::{MiniGame, Outcome, Rect};

pub const PLAYER_SIZE: f32 = 40.0;
pub const RUN_SPEED: f32 = 200.0;
pub const JUMP_SPEED: f32 = 400.0;
pub const GRAVITY: f32 = 800.0;
pub const COIN_SIZE: f32 = 20.0;

const GROUND_HEIGHT: f32 = 50.0;
/// Obstacles at least this tall never carry a coin
const PLATFORM_MAX_HEIGHT: f32 = 50.0;

/// Platform layout as (x, distance above the bottom edge, width, height)
const PLATFORMS: [(f32, f32, f32, f32); 13] = [
    (150.0, 150.0, 100.0, 20.0),
    (300.0, 250.0, 90.0, 20.0),
    (450.0, 350.0, 80.0, 20.0),
    (550.0, 300.0, 60.0, 20.0),
    (700.0, 300.0, 60.0, 20.0),
    (800.0, 400.0, 50.0, 20.0),
    (900.0, 500.0, 50.0, 20.0),
    (800.0, 600.0, 50.0, 20.0),
    (950.0, 550.0, 60.0, 20.0),
    (1100.0, 450.0, 70.0, 20.0),
    (1150.0, 300.0, 50.0, 20.0),
    (SCREEN_WIDTH - 150.0, 100.0, 100.0, 20.0),
    (1000.0, 200.0, 80.0, 20.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourseScreen {
    #[default]
    Gameplay,
    Ending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub has_jumped: bool,
}

impl Default for Runner {
    fn default() -> Self {
        let start = PlatformerGame::start_point();
        Self {
            rect: Rect::new(start.x, start.y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            on_ground: false,
            has_jumped: false,
        }
    }
}

impl Runner {
    /// Input and integration; returns the rect before the move
    fn advance(&mut self, frame: &Frame) -> Rect {
        let input = &frame.input;
        self.vel.y += GRAVITY * frame.dt;

        // LEFT wins when both are held
        self.vel.x = if input.left {
            -RUN_SPEED
        } else if input.right {
            RUN_SPEED
        } else {
            0.0
        };

        if input.space_pressed && self.on_ground {
            self.vel.y = -JUMP_SPEED;
            self.on_ground = false;
            self.has_jumped = true;
        }

        let prev = self.rect;
        self.rect = self.rect.translated(self.vel * frame.dt);

        let max_x = SCREEN_WIDTH - self.rect.w;
        if self.rect.x < 0.0 {
            self.rect.x = 0.0;
            self.vel.x = 0.0;
        } else if self.rect.x > max_x {
            self.rect.x = max_x;
            self.vel.x = 0.0;
        }

        self.on_ground = false;
        prev
    }

    /// Push the runner out of `obstacle` along the side it came from
    fn resolve(&mut self, prev: &Rect, obstacle: &Rect) {
        if !self.rect.overlaps(obstacle) {
            return;
        }
        if self.vel.y > 0.0 && prev.bottom() <= obstacle.y {
            self.rect.y = obstacle.y - self.rect.h;
            self.vel.y = 0.0;
            self.on_ground = true;
            self.has_jumped = false;
        } else if self.vel.y < 0.0 && prev.y >= obstacle.bottom() {
            self.rect.y = obstacle.bottom();
            self.vel.y = 0.0;
        } else if self.vel.x > 0.0 && prev.right() <= obstacle.x {
            self.rect.x = obstacle.x - self.rect.w;
            self.vel.x = 0.0;
        } else if self.vel.x < 0.0 && prev.x >= obstacle.right() {
            self.rect.x = obstacle.right();
            self.vel.x = 0.0;
        }
    }

    fn draw(&self, out: &mut DrawList) {
        let r = self.rect;
        out.rounded_rect(r, 0.5, 8, PURPLE);
        out.rect(
            Rect::new(r.x - r.w * 0.2, r.y + r.h * 0.1, r.w * 0.2, r.h * 0.6),
            PURPLE.fade(0.8),
        );
        let visor = r.sub(0.2, 0.2, 0.6, 0.3);
        out.rounded_rect(visor, 0.5, 8, SKYBLUE);
        out.rounded_rect_lines(visor, 0.5, 8, 2.0, DARKBLUE);
    }
}

/// Obstacle course level state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformerGame {
    player: Runner,
    /// Ground band first, then platforms
    obstacles: Vec<Rect>,
    coins: Vec<Rect>,
    door: Rect,
    collected: usize,
    total_coins: usize,
    screen: CourseScreen,
    finished: bool,
    won: bool,
}

impl Default for PlatformerGame {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformerGame {
    pub fn new() -> Self {
        Self {
            player: Runner::default(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            door: Self::door_rect(),
            collected: 0,
            total_coins: 0,
            screen: CourseScreen::Gameplay,
            finished: false,
            won: false,
        }
    }

    pub fn start_point() -> Vec2 {
        Vec2::new(100.0, SCREEN_HEIGHT - PLAYER_SIZE - GROUND_HEIGHT)
    }

    pub fn door_rect() -> Rect {
        Rect::new(SCREEN_WIDTH - 100.0, 50.0, 50.0, 80.0)
    }

    pub fn player(&self) -> &Runner {
        &self.player
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn coins(&self) -> &[Rect] {
        &self.coins
    }

    pub fn door(&self) -> Rect {
        self.door
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn total_coins(&self) -> usize {
        self.total_coins
    }

    pub fn screen(&self) -> CourseScreen {
        self.screen
    }

    /// End the level with the given result
    pub(crate) fn finish(&mut self, won: bool) {
        self.screen = CourseScreen::Ending;
        self.finished = true;
        self.won = won;
    }

    fn build_course(&mut self) {
        self.obstacles.clear();
        self.obstacles.push(Rect::new(
            0.0,
            SCREEN_HEIGHT - GROUND_HEIGHT,
            SCREEN_WIDTH,
            GROUND_HEIGHT,
        ));
        self.obstacles.extend(
            PLATFORMS
                .iter()
                .map(|&(x, above, w, h)| Rect::new(x, SCREEN_HEIGHT - above, w, h)),
        );

        self.coins = self
            .obstacles
            .iter()
            .filter(|o| o.h < PLATFORM_MAX_HEIGHT && o.y < SCREEN_HEIGHT - GROUND_HEIGHT)
            .map(|o| {
                Rect::new(
                    o.x + o.w / 2.0 - COIN_SIZE / 2.0,
                    o.y - COIN_SIZE - 10.0,
                    COIN_SIZE,
                    COIN_SIZE,
                )
            })
            .collect();
        self.total_coins = self.coins.len();
        self.collected = 0;
    }

    fn play(&mut self, frame: &Frame) {
        let prev = self.player.advance(frame);
        for obstacle in &self.obstacles {
            self.player.resolve(&prev, obstacle);
        }

        let before = self.coins.len();
        let player = self.player.rect;
        self.coins.retain(|coin| !coin.overlaps(&player));
        let picked = before - self.coins.len();
        if picked > 0 {
            self.collected += picked;
            log::debug!("Coins {}/{}", self.collected, self.total_coins);
        }

        if self.player.rect.y > SCREEN_HEIGHT {
            log::debug!("Runner fell off the course");
            self.finish(false);
        }

        if self.player.rect.overlaps(&self.door) && self.collected == self.total_coins {
            self.finish(true);
        }
    }

    fn draw_coin(coin: &Rect, out: &mut DrawList) {
        let center = coin.center();
        let radius = coin.w / 2.0;
        out.circle(center, radius, YELLOW);
        out.circle_lines(center, radius, DARKGRAY);
        let size = coin.w * 0.6;
        out.text_centered("$", center.x, center.y - size / 2.0, size, BROWN);
    }

    fn draw_door(&self, out: &mut DrawList) {
        let d = self.door;
        out.rect(d, BROWN);
        out.rect_lines(d, 3.0, BLACK);
        for panel in [d.sub(0.1, 0.1, 0.8, 0.4), d.sub(0.1, 0.55, 0.8, 0.35)] {
            out.rect(panel, DARKBROWN);
            out.rect_lines(panel, 2.0, BLACK);
        }
        out.text("EXIT", d.x + 5.0, d.y - 20.0, 15.0, WHITE);
    }
}

impl MiniGame for PlatformerGame {
    fn name(&self) -> &'static str {
        "Obstacle Course Level"
    }

    fn instructions(&self) -> &'static str {
        "Use LEFT/RIGHT arrows to move. \n \n Press SPACE to jump. \n \n Collect all coins and reach the EXIT door to win!"
    }

    fn load(&mut self) {
        self.player = Runner::default();
        self.door = Self::door_rect();
        self.build_course();
        self.screen = CourseScreen::Gameplay;
        self.finished = false;
        self.won = false;
    }

    fn unload(&mut self) {
        self.obstacles.clear();
        self.coins.clear();
    }

    fn tick(&mut self, frame: &Frame) {
        match self.screen {
            CourseScreen::Gameplay => self.play(frame),
            CourseScreen::Ending => {}
        }
    }

    fn draw(&self, out: &mut DrawList) {
        match self.screen {
            CourseScreen::Gameplay => {
                for obstacle in &self.obstacles {
                    out.rect(*obstacle, BLUE);
                }
                for coin in &self.coins {
                    Self::draw_coin(coin, out);
                }
                self.player.draw(out);
                self.draw_door(out);

                let start = Self::start_point();
                out.circle(start + Vec2::splat(PLAYER_SIZE / 2.0), 10.0, GREEN);
                out.text("START", start.x, start.y - 20.0, 15.0, GREEN);
                out.text(
                    format!("Coins: {}/{}", self.collected, self.total_coins),
                    10.0,
                    10.0,
                    20.0,
                    WHITE,
                );
            }
            CourseScreen::Ending => {
                let cx = SCREEN_WIDTH / 2.0;
                let y = SCREEN_HEIGHT / 3.0;
                if self.won {
                    out.text_centered("LEVEL COMPLETE!", cx, y, 50.0, GOLD);
                    out.text_centered(
                        format!("Collected: {}/{} Coins", self.collected, self.total_coins),
                        cx,
                        y + 60.0,
                        30.0,
                        WHITE,
                    );
                } else {
                    out.text_centered("GAME OVER!", cx, y, 60.0, RED);
                }
            }
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.finished {
            None
        } else if self.won {
            Some(Outcome::Won)
        } else {
            Some(Outcome::Lost)
        }
    }
}
