//! Space Invaders level: a marching formation, bullets, lives and score
//!
//! The formation moves in discrete steps on its own clock; bullets move a fixed
//! distance per tick. Invader fire is a per-frame Bernoulli trial scaled by `dt`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Frame;
use crate::renderer::DrawList;
use crate::renderer::colors::*;
use crate::sim::{GameRng, MiniGame, Outcome, Rect};

// Formation layout
pub const INVADER_ROWS: usize = 2;
pub const INVADER_COLS: usize = 8;
pub const INVADER_SPACING: Vec2 = Vec2::new(50.0, 40.0);
pub const INVADER_ORIGIN: Vec2 = Vec2::new(50.0, 100.0);
pub const INVADER_SIZE: f32 = 30.0;

// Formation movement
pub const STEP_INTERVAL: f32 = 0.8;
pub const STEP_DISTANCE: f32 = 10.0;
pub const DESCENT: f32 = 20.0;
pub const EDGE_MARGIN: f32 = 20.0;
/// Expected shots per second per live invader
pub const INVADER_FIRE_RATE: f32 = 0.15;

// Player
pub const PLAYER_SIZE: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const START_LIVES: u32 = 5;
pub const FIRE_COOLDOWN: f64 = 0.5;

// Bullets
pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const BULLET_SPEED: f32 = 3.0;

pub const POINTS_PER_INVADER: u32 = 100;

/// Who fired a bullet (decides direction and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Invader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub active: bool,
    pub owner: BulletOwner,
}

impl Bullet {
    /// Bullet centered horizontally on `x`, top edge at `y`
    fn new(x: f32, y: f32, owner: BulletOwner) -> Self {
        Self {
            rect: Rect::new(x - BULLET_WIDTH / 2.0, y, BULLET_WIDTH, BULLET_HEIGHT),
            active: true,
            owner,
        }
    }

    fn update(&mut self) {
        if !self.active {
            return;
        }
        match self.owner {
            BulletOwner::Player => self.rect.y -= BULLET_SPEED,
            BulletOwner::Invader => self.rect.y += BULLET_SPEED,
        }
        if self.rect.y < 0.0 || self.rect.y > SCREEN_HEIGHT {
            self.active = false;
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub rect: Rect,
    pub lives: u32,
    /// Timestamp of the last shot (seconds)
    pub last_shot: f64,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                SCREEN_HEIGHT - 70.0,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            lives: START_LIVES,
            last_shot: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invader {
    pub rect: Rect,
    pub active: bool,
}

/// Space Invaders level state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterGame {
    player: Ship,
    invaders: Vec<Invader>,
    player_bullets: Vec<Bullet>,
    invader_bullets: Vec<Bullet>,
    score: u32,
    /// +1 marching right, -1 marching left
    direction: f32,
    step_timer: f32,
    pub(crate) won: bool,
    pub(crate) lost: bool,
    rng: GameRng,
}

impl ShooterGame {
    pub fn new(rng: GameRng) -> Self {
        Self {
            player: Ship::default(),
            invaders: Vec::new(),
            player_bullets: Vec::new(),
            invader_bullets: Vec::new(),
            score: 0,
            direction: 1.0,
            step_timer: 0.0,
            won: false,
            lost: false,
            rng,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn player(&self) -> &Ship {
        &self.player
    }

    pub fn invaders(&self) -> &[Invader] {
        &self.invaders
    }

    pub fn player_bullets(&self) -> &[Bullet] {
        &self.player_bullets
    }

    pub fn invader_bullets(&self) -> &[Bullet] {
        &self.invader_bullets
    }

    pub fn live_invaders(&self) -> usize {
        self.invaders.iter().filter(|i| i.active).count()
    }

    fn spawn_formation(&mut self) {
        self.invaders.clear();
        for row in 0..INVADER_ROWS {
            for col in 0..INVADER_COLS {
                let pos = INVADER_ORIGIN + INVADER_SPACING * Vec2::new(col as f32, row as f32);
                self.invaders.push(Invader {
                    rect: Rect::new(pos.x, pos.y, INVADER_SIZE, INVADER_SIZE),
                    active: true,
                });
            }
        }
    }

    fn update_player(&mut self, frame: &Frame) {
        let input = &frame.input;
        let max_x = SCREEN_WIDTH - self.player.rect.w;
        self.player.rect.x =
            (self.player.rect.x + input.axis_x() * PLAYER_SPEED).clamp(0.0, max_x);

        if input.space && frame.now - self.player.last_shot >= FIRE_COOLDOWN {
            let muzzle = self.player.rect.x + self.player.rect.w / 2.0;
            self.player_bullets
                .push(Bullet::new(muzzle, self.player.rect.y, BulletOwner::Player));
            self.player.last_shot = frame.now;
        }
    }

    fn update_bullets(&mut self) {
        for bullet in self
            .player_bullets
            .iter_mut()
            .chain(self.invader_bullets.iter_mut())
        {
            bullet.update();
        }
        self.player_bullets.retain(|b| b.active);
        self.invader_bullets.retain(|b| b.active);
    }

    /// One discrete formation step: maybe flip and descend, then shift
    fn step_formation(&mut self) {
        let live = || self.invaders.iter().filter(|i| i.active);
        let Some(min_x) = live().map(|i| i.rect.x).reduce(f32::min) else {
            return;
        };
        let max_x = live().map(|i| i.rect.right()).fold(0.0, f32::max);

        let mut descend = false;
        if self.direction > 0.0 && max_x >= SCREEN_WIDTH - EDGE_MARGIN {
            self.direction = -1.0;
            descend = true;
        } else if self.direction < 0.0 && min_x <= EDGE_MARGIN {
            self.direction = 1.0;
            descend = true;
        }

        let player_top = self.player.rect.y;
        for invader in self.invaders.iter_mut().filter(|i| i.active) {
            invader.rect.x += self.direction * STEP_DISTANCE;
            if descend {
                invader.rect.y += DESCENT;
                if invader.rect.bottom() >= player_top {
                    self.lost = true;
                }
            }
        }

        if descend {
            log::debug!(
                "Formation turned (dir {}), lowest edge {}",
                self.direction,
                self.invaders
                    .iter()
                    .filter(|i| i.active)
                    .map(|i| i.rect.bottom())
                    .fold(0.0, f32::max)
            );
        }
    }

    fn invaders_fire(&mut self, dt: f32) {
        let p = INVADER_FIRE_RATE * dt;
        for invader in self.invaders.iter().filter(|i| i.active) {
            if self.rng.chance(p) {
                let r = &invader.rect;
                self.invader_bullets.push(Bullet::new(
                    r.x + r.w / 2.0,
                    r.bottom(),
                    BulletOwner::Invader,
                ));
            }
        }
    }

    fn resolve_hits(&mut self) {
        for bullet in self.player_bullets.iter_mut().filter(|b| b.active) {
            let target = self
                .invaders
                .iter_mut()
                .find(|i| i.active && i.rect.overlaps(&bullet.rect));
            if let Some(invader) = target {
                bullet.active = false;
                invader.active = false;
                self.score += POINTS_PER_INVADER;
            }
        }

        for bullet in self.invader_bullets.iter_mut().filter(|b| b.active) {
            if self.player.lives == 0 {
                break;
            }
            if bullet.rect.overlaps(&self.player.rect) {
                bullet.active = false;
                self.player.lives -= 1;
                log::debug!("Ship hit, {} lives left", self.player.lives);
                if self.player.lives == 0 {
                    self.lost = true;
                }
            }
        }
    }

    fn draw_ship(&self, out: &mut DrawList) {
        let r = self.player.rect;
        out.triangle(
            Vec2::new(r.x + r.w / 2.0, r.y),
            Vec2::new(r.x, r.bottom()),
            Vec2::new(r.right(), r.bottom()),
            DARKBLUE,
        );
        for (i, stripe) in [0.2, 0.4, 0.6, 0.8].into_iter().enumerate() {
            let color = if i % 2 == 0 { WHITE } else { BLACK };
            out.rect(r.sub(0.0, stripe, 1.0, 0.1), color);
        }
        out.rect(r.sub(0.25, 0.5, 0.5, 0.5), BLUE);
    }

    fn draw_invader(invader: &Invader, out: &mut DrawList) {
        let r = invader.rect;
        out.rect(r.sub(0.0, 0.1, 1.0, 0.9), RED);
        out.circle(Vec2::new(r.x + r.w / 2.0, r.y + r.h * 0.1), r.w / 2.0, RED);
        out.circle(Vec2::new(r.x + r.w / 2.0, r.bottom()), r.w / 2.0, RED);

        let window = r.sub(0.2, 0.2, 0.6, 0.4);
        out.rect(window, SKYBLUE);
        out.rect_lines(window, 1.0, DARKBLUE);

        out.rect(Rect::new(r.x + r.w * 0.15, r.y - 10.0, r.w * 0.7, 15.0), BLUE);
        out.rect(Rect::new(r.x + r.w * 0.05, r.y - 5.0, r.w * 0.9, 5.0), DARKBLUE);
        out.rect(Rect::new(r.x + r.w / 2.0 - 3.0, r.y - 7.0, 6.0, 6.0), YELLOW);
    }
}

impl MiniGame for ShooterGame {
    fn name(&self) -> &'static str {
        "Space Invaders Level"
    }

    fn instructions(&self) -> &'static str {
        "Use LEFT/RIGHT arrows to move. \n \n Press SPACE to shoot. Destroy all invaders before\n \n  they reach the bottom or \n \n you run out of lives!"
    }

    fn load(&mut self) {
        self.player = Ship::default();
        self.score = 0;
        self.won = false;
        self.lost = false;
        self.direction = 1.0;
        self.step_timer = 0.0;
        self.player_bullets.clear();
        self.invader_bullets.clear();
        self.spawn_formation();
    }

    fn unload(&mut self) {
        self.player_bullets.clear();
        self.invader_bullets.clear();
        self.invaders.clear();
    }

    fn tick(&mut self, frame: &Frame) {
        if self.won || self.lost {
            return;
        }

        self.update_player(frame);
        self.update_bullets();

        self.step_timer += frame.dt;
        if self.step_timer >= STEP_INTERVAL {
            self.step_timer = 0.0;
            self.step_formation();
        }

        self.invaders_fire(frame.dt);
        self.resolve_hits();

        if self.invaders.iter().all(|i| !i.active) {
            self.won = true;
            log::debug!("Formation destroyed, score {}", self.score);
        }
    }

    fn draw(&self, out: &mut DrawList) {
        self.draw_ship(out);
        for invader in self.invaders.iter().filter(|i| i.active) {
            Self::draw_invader(invader, out);
        }
        for bullet in self.player_bullets.iter().filter(|b| b.active) {
            out.rect(bullet.rect, YELLOW);
        }
        for bullet in self.invader_bullets.iter().filter(|b| b.active) {
            out.rect(bullet.rect, RED);
        }

        out.text(format!("SCORE: {:04}", self.score), 10.0, 10.0, 20.0, WHITE);
        out.text(
            format!("LIVES: {}", self.player.lives),
            SCREEN_WIDTH - 100.0,
            10.0,
            20.0,
            WHITE,
        );

        let mid_y = SCREEN_HEIGHT / 2.0 - 20.0;
        if self.lost {
            out.text_centered("GAME OVER!", SCREEN_WIDTH / 2.0, mid_y, 40.0, RED);
        } else if self.won {
            out.text_centered("LEVEL COMPLETE!", SCREEN_WIDTH / 2.0, mid_y, 40.0, GOLD);
        }
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.won {
            Some(Outcome::Won)
        } else if self.lost {
            Some(Outcome::Lost)
        } else {
            None
        }
    }
}
