//! Flappy level: a gravity-bound bird threading scrolling pipe pairs
//!
//! A hit costs health and restarts the run with fresh pipes; the score
//! survives retries. Ten pipes cleared wins the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Frame;
use crate::renderer::DrawList;
use crate::renderer::colors::*;
use crate::sim::{GameRng, MiniGame, Outcome, Rect, circle_rect_overlap};

pub const PIPE_WIDTH: f32 = 80.0;
pub const PIPE_GAP: f32 = 150.0;
pub const PIPE_SPEED: f32 = 100.0;
/// Minimum horizontal distance between consecutive pipe spawns
pub const PIPE_SPACING: f32 = 250.0;

pub const BIRD_RADIUS: f32 = 20.0;
pub const JUMP_VELOCITY: f32 = -250.0;
pub const GRAVITY: f32 = 700.0;

pub const WIN_SCORE: u32 = 10;
pub const MAX_HEALTH: f32 = 100.0;
pub const DAMAGE_PER_HIT: f32 = 25.0;

const FONT_SIZE: f32 = 40.0;
const GROUND_HEIGHT: f32 = 20.0;

/// Internal flow of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlappyScreen {
    #[default]
    Menu,
    Playing,
    Over,
    Win,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vy: f32,
    pub health: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Bird::spawn_point(),
            vy: 0.0,
            health: MAX_HEALTH,
        }
    }
}

impl Bird {
    pub fn spawn_point() -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 4.0, SCREEN_HEIGHT / 2.0)
    }

    /// Vertical range the bird's center is kept inside
    pub fn bounds() -> (f32, f32) {
        (BIRD_RADIUS * 1.5, SCREEN_HEIGHT - BIRD_RADIUS * 1.5)
    }

    fn fall(&mut self, dt: f32) {
        self.vy += GRAVITY * dt;
        self.pos.y += self.vy * dt;

        let (min_y, max_y) = Self::bounds();
        if self.pos.y < min_y {
            self.pos.y = min_y;
            self.vy = 0.0;
        }
        if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vy = 0.0;
        }
    }

    fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    fn draw(&self, out: &mut DrawList) {
        let r = BIRD_RADIUS;
        let body = Vec2::new(r * 2.0, r * 2.5);
        let leg = Vec2::new(r * 0.7, r * 0.8);
        let visor = Vec2::new(r * 1.2, r * 0.8);
        let p = self.pos;

        out.rounded_rect(
            Rect::new(p.x - body.x / 2.0, p.y - body.y / 2.0, body.x, body.y),
            0.5,
            8,
            PURPLE,
        );
        let leg_y = p.y + body.y / 2.0 - leg.y;
        out.rounded_rect(
            Rect::new(p.x - body.x / 2.0 + r * 0.2, leg_y, leg.x, leg.y),
            0.5,
            8,
            PURPLE,
        );
        out.rounded_rect(
            Rect::new(p.x + body.x / 2.0 - leg.x - r * 0.2, leg_y, leg.x, leg.y),
            0.5,
            8,
            PURPLE,
        );

        let visor_center = Vec2::new(p.x, p.y - body.y / 2.0 + visor.y / 2.0 + r * 0.3);
        out.ellipse(visor_center, visor / 2.0, SKYBLUE);
        out.ellipse_lines(visor_center, visor / 2.0, DARKBLUE);
    }
}

/// A top/bottom pipe pair around one gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub top: Rect,
    pub bottom: Rect,
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_y: f32) -> Self {
        let half = PIPE_GAP / 2.0;
        Self {
            top: Rect::new(x, 0.0, PIPE_WIDTH, gap_y - half),
            bottom: Rect::new(x, gap_y + half, PIPE_WIDTH, SCREEN_HEIGHT - (gap_y + half)),
            scored: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.top.x
    }

    /// Vertical center of the opening
    pub fn gap_center(&self) -> f32 {
        (self.top.bottom() + self.bottom.y) / 2.0
    }

    fn scroll(&mut self, dt: f32) {
        self.top.x -= PIPE_SPEED * dt;
        self.bottom.x -= PIPE_SPEED * dt;
    }

    fn hits(&self, center: Vec2, radius: f32) -> bool {
        circle_rect_overlap(center, radius, &self.top)
            || circle_rect_overlap(center, radius, &self.bottom)
    }

    fn draw(&self, out: &mut DrawList) {
        out.rect(self.top, GREEN);
        out.rect(self.bottom, GREEN);
        out.rect_lines(self.top, 2.0, DARKGREEN);
        out.rect_lines(self.bottom, 2.0, DARKBROWN);
    }
}

/// Flappy level state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlappyGame {
    bird: Bird,
    pipes: Vec<Pipe>,
    score: u32,
    screen: FlappyScreen,
    /// Pipes spawned since load, retries included
    pipes_spawned: u32,
    finished: bool,
    won: bool,
    rng: GameRng,
}

impl FlappyGame {
    pub fn new(rng: GameRng) -> Self {
        Self {
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            screen: FlappyScreen::Menu,
            pipes_spawned: 0,
            finished: false,
            won: false,
            rng,
        }
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn screen(&self) -> FlappyScreen {
        self.screen
    }

    pub fn pipes_spawned(&self) -> u32 {
        self.pipes_spawned
    }

    /// End the level with the given result
    pub(crate) fn finish(&mut self, won: bool) {
        self.screen = if won {
            FlappyScreen::Win
        } else {
            FlappyScreen::Over
        };
        self.finished = true;
        self.won = won;
    }

    fn random_gap(&mut self) -> f32 {
        self.rng
            .uniform_int(PIPE_GAP as i32, (SCREEN_HEIGHT - PIPE_GAP) as i32) as f32
    }

    fn spawn_pipe(&mut self, x: f32) {
        let gap = self.random_gap();
        self.pipes.push(Pipe::new(x, gap));
        self.pipes_spawned += 1;
    }

    /// Two fresh pipes just off the right edge
    fn seed_pipes(&mut self) {
        self.pipes.clear();
        self.spawn_pipe(SCREEN_WIDTH);
        self.spawn_pipe(SCREEN_WIDTH + PIPE_SPACING);
    }

    fn play(&mut self, frame: &Frame) {
        let dt = frame.dt;
        self.bird.fall(dt);

        let bird_pos = self.bird.pos;
        let mut collided = false;
        for pipe in &mut self.pipes {
            pipe.scroll(dt);
            collided |= pipe.hits(bird_pos, BIRD_RADIUS);

            if !pipe.scored && pipe.top.right() < bird_pos.x - BIRD_RADIUS {
                pipe.scored = true;
                self.score += 1;
            }
        }

        if bird_pos.y + BIRD_RADIUS >= SCREEN_HEIGHT || bird_pos.y - BIRD_RADIUS <= 0.0 {
            collided = true;
        }

        if collided {
            self.bird.take_damage(DAMAGE_PER_HIT);
            log::debug!("Bird hit, health {}", self.bird.health);
            if self.bird.health <= 0.0 {
                self.finish(false);
            } else {
                self.bird.pos = Bird::spawn_point();
                self.bird.vy = 0.0;
                self.seed_pipes();
            }
        }

        if self.pipes.first().is_some_and(|p| p.top.right() < 0.0) {
            self.pipes.remove(0);
        }

        let next_x = match self.pipes.last() {
            Some(last) if last.x() < SCREEN_WIDTH - PIPE_SPACING => Some(last.x() + PIPE_SPACING),
            Some(_) => None,
            None => Some(SCREEN_WIDTH),
        };
        if let Some(x) = next_x {
            self.spawn_pipe(x);
        }

        if self.score >= WIN_SCORE {
            self.finish(true);
        }

        if frame.input.space_pressed {
            self.bird.vy = JUMP_VELOCITY;
        }
    }

    fn draw_hud(&self, out: &mut DrawList) {
        out.text(format!("Score: {:02}", self.score), 10.0, 10.0, FONT_SIZE, WHITE);

        let bar = Rect::new(SCREEN_WIDTH - 110.0, 10.0, 100.0, 20.0);
        out.rect(bar, DARKGRAY);
        out.rect(
            Rect::new(bar.x, bar.y, self.bird.health / MAX_HEALTH * bar.w, bar.h),
            RED,
        );
        out.rect_lines(bar, 1.0, WHITE);
        out.text(
            format!("Health: {:.0}", self.bird.health),
            bar.x,
            bar.bottom() + 5.0,
            20.0,
            WHITE,
        );

        let ground = Rect::new(0.0, SCREEN_HEIGHT - GROUND_HEIGHT, SCREEN_WIDTH, GROUND_HEIGHT);
        out.rect(ground, BROWN);
        out.rect_lines(ground, 1.0, DARKBROWN);
    }

    fn draw_overlay(&self, out: &mut DrawList) {
        let cx = SCREEN_WIDTH / 2.0;
        let title_y = SCREEN_HEIGHT / 4.0;
        let big = FONT_SIZE * 1.5;
        let final_score = || format!("Final Score: {:02}", self.score);

        match self.screen {
            FlappyScreen::Menu => {
                out.text_centered("FLAPPY", cx, title_y, big, WHITE);
                out.text_centered("Press SPACE to Start", cx, SCREEN_HEIGHT / 2.0, FONT_SIZE, GRAY);
            }
            FlappyScreen::Over => {
                out.text_centered("GAME OVER!", cx, title_y, big, RED);
                out.text_centered(final_score(), cx, SCREEN_HEIGHT / 2.0 - FONT_SIZE / 2.0, FONT_SIZE, WHITE);
            }
            FlappyScreen::Win => {
                out.text_centered("LEVEL COMPLETE!", cx, title_y, big, GOLD);
                out.text_centered(final_score(), cx, SCREEN_HEIGHT / 2.0 - FONT_SIZE / 2.0, FONT_SIZE, WHITE);
            }
            FlappyScreen::Playing => {}
        }
    }
}

impl MiniGame for FlappyGame {
    fn name(&self) -> &'static str {
        "Flappy Level"
    }

    fn instructions(&self) -> &'static str {
        "Press SPACE to make your character flap.\n \n Avoid hitting the pipes and the ground. \n \nGet a score of 10 to win."
    }

    fn load(&mut self) {
        self.bird = Bird::default();
        self.score = 0;
        self.pipes_spawned = 0;
        self.finished = false;
        self.won = false;
        self.seed_pipes();
        self.screen = FlappyScreen::Menu;
    }

    fn unload(&mut self) {
        self.pipes.clear();
    }

    fn tick(&mut self, frame: &Frame) {
        match self.screen {
            FlappyScreen::Menu => {
                if frame.input.space_pressed {
                    self.screen = FlappyScreen::Playing;
                }
            }
            FlappyScreen::Playing => self.play(frame),
            FlappyScreen::Over | FlappyScreen::Win => {}
        }
    }

    fn draw(&self, out: &mut DrawList) {
        for pipe in &self.pipes {
            pipe.draw(out);
        }
        self.bird.draw(out);
        self.draw_hud(out);
        self.draw_overlay(out);
    }

    fn outcome(&self) -> Option<Outcome> {
        match (self.finished, self.won) {
            (false, _) => None,
            (true, true) => Some(Outcome::Won),
            (true, false) => Some(Outcome::Lost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::InputSnapshot;
    use proptest::prelude::*;

    fn idle() -> Frame {
        Frame::new(SIM_DT, 0.0, InputSnapshot::default())
    }

    fn flap() -> Frame {
        Frame::new(SIM_DT, 0.0, InputSnapshot::tap_space())
    }

    fn playing(seed: u64) -> FlappyGame {
        let mut game = FlappyGame::new(GameRng::new(seed));
        game.load();
        game.tick(&flap());
        assert_eq!(game.screen(), FlappyScreen::Playing);
        game
    }

    /// Flap toward the next gap, leaning slightly toward the one after it
    fn autopilot(game: &FlappyGame) -> Frame {
        if game.screen() != FlappyScreen::Playing {
            return flap();
        }
        let bird = game.bird().pos;
        let mut ahead = game
            .pipes()
            .iter()
            .filter(|p| p.top.right() >= bird.x - BIRD_RADIUS);
        let target = match (ahead.next(), ahead.next()) {
            (Some(a), Some(b)) => {
                a.gap_center() + (b.gap_center() - a.gap_center()).clamp(-25.0, 25.0)
            }
            (Some(a), None) => a.gap_center(),
            _ => SCREEN_HEIGHT / 2.0,
        };
        if bird.y > target + 20.0 { flap() } else { idle() }
    }

    #[test]
    fn test_load_seeds_two_pipes_in_menu() {
        let mut game = FlappyGame::new(GameRng::new(1));
        game.load();
        assert_eq!(game.screen(), FlappyScreen::Menu);
        assert_eq!(game.pipes().len(), 2);
        assert_eq!(game.pipes()[0].x(), SCREEN_WIDTH);
        assert_eq!(game.pipes()[1].x(), SCREEN_WIDTH + PIPE_SPACING);
        for pipe in game.pipes() {
            let gap = pipe.gap_center();
            assert!((PIPE_GAP..=SCREEN_HEIGHT - PIPE_GAP).contains(&gap));
            assert_eq!(pipe.bottom.y - pipe.top.bottom(), PIPE_GAP);
        }
        assert_eq!(game.bird().pos, Bird::spawn_point());
    }

    #[test]
    fn test_menu_ignores_everything_but_space() {
        let mut game = FlappyGame::new(GameRng::new(2));
        game.load();
        let before = game.clone();
        for _ in 0..30 {
            game.tick(&idle());
        }
        assert_eq!(game, before);

        // Starting does not jump on the same press
        game.tick(&flap());
        assert_eq!(game.screen(), FlappyScreen::Playing);
        assert_eq!(game.bird().vy, 0.0);
    }

    #[test]
    fn test_gravity_and_jump_order() {
        let mut game = playing(3);
        game.tick(&idle());
        let vy = GRAVITY * SIM_DT;
        assert!((game.bird().vy - vy).abs() < 1e-4);

        game.tick(&flap());
        assert_eq!(game.bird().vy, JUMP_VELOCITY);
    }

    #[test]
    fn test_bird_clamped_at_bottom() {
        let mut game = playing(4);
        game.pipes.clear();
        game.pipes.push(Pipe::new(5000.0, 360.0));
        for _ in 0..120 {
            game.tick(&idle());
        }
        let (_, max_y) = Bird::bounds();
        assert_eq!(game.bird().pos.y, max_y);
        assert_eq!(game.bird().vy, 0.0);
        assert_eq!(game.bird().health, MAX_HEALTH);
    }

    #[test]
    fn test_pipe_scores_once() {
        let mut game = playing(5);
        game.pipes.clear();
        game.pipes.push(Pipe::new(219.0, 360.0));
        game.bird.pos.y = 360.0;
        game.tick(&flap());
        assert_eq!(game.score(), 1);
        assert!(game.pipes()[0].scored);
        game.tick(&idle());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_retry_keeps_score() {
        let mut game = playing(6);
        game.score = 3;
        // Park a pipe whose top half swallows the bird
        game.pipes[0] = Pipe::new(game.bird().pos.x - 40.0, 570.0);
        game.tick(&idle());

        assert_eq!(game.score(), 3);
        assert_eq!(game.bird().health, 75.0);
        assert_eq!(game.bird().pos, Bird::spawn_point());
        assert_eq!(game.bird().vy, 0.0);
        assert_eq!(game.pipes().len(), 2);
        assert_eq!(game.pipes()[0].x(), SCREEN_WIDTH);
        assert_eq!(game.pipes()[1].x(), SCREEN_WIDTH + PIPE_SPACING);
        assert_eq!(game.screen(), FlappyScreen::Playing);
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_fourth_hit_is_game_over() {
        let mut game = playing(7);
        for hit in 1..=4 {
            game.pipes[0] = Pipe::new(game.bird().pos.x - 40.0, 570.0);
            game.tick(&idle());
            assert_eq!(game.bird().health, MAX_HEALTH - DAMAGE_PER_HIT * hit as f32);
        }
        assert_eq!(game.screen(), FlappyScreen::Over);
        assert_eq!(game.outcome(), Some(Outcome::Lost));

        let frozen = game.clone();
        game.tick(&flap());
        assert_eq!(game, frozen);
    }

    #[test]
    fn test_offscreen_pipe_dropped_and_replaced() {
        let mut game = playing(8);
        game.pipes.clear();
        game.pipes.push(Pipe::new(-79.0, 360.0));
        game.pipes[0].scored = true;
        game.pipes.push(Pipe::new(1000.0, 360.0));
        game.bird.pos.y = 360.0;
        game.tick(&flap());

        assert_eq!(game.pipes().len(), 2);
        let x = 1000.0 - PIPE_SPEED * SIM_DT;
        assert!((game.pipes()[0].x() - x).abs() < 1e-3);
        assert!((game.pipes()[1].x() - (x + PIPE_SPACING)).abs() < 1e-3);
    }

    #[test]
    fn test_autopilot_wins() {
        let mut game = FlappyGame::new(GameRng::new(42));
        game.load();
        for _ in 0..5000 {
            if game.is_complete() {
                break;
            }
            let frame = autopilot(&game);
            game.tick(&frame);
        }
        assert_eq!(game.screen(), FlappyScreen::Win);
        assert!(game.score() >= WIN_SCORE);
        assert!(game.did_win());
    }

    proptest! {
        #[test]
        fn prop_health_and_score_bounds(
            seed in any::<u64>(),
            taps in proptest::collection::vec(any::<bool>(), 1..800),
        ) {
            let mut game = playing(seed);
            let (min_y, max_y) = Bird::bounds();
            for tap in taps {
                let before = game.score();
                game.tick(&if tap { flap() } else { idle() });

                let health = game.bird().health;
                prop_assert!((0.0..=MAX_HEALTH).contains(&health));
                prop_assert!(game.score() <= game.pipes_spawned());
                prop_assert!(game.score() - before <= 1);
                if game.screen() == FlappyScreen::Playing {
                    prop_assert!((min_y..=max_y).contains(&game.bird().pos.y));
                }
                prop_assert!(game.pipes().windows(2).all(|w| w[0].x() < w[1].x()));
            }
        }
    }
}
