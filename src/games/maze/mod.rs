//! Maze level: carve a maze, collect every coin, reach the exit
//!
//! Movement is axis-separated: the X step and the Y step are each rejected if
//! the moved player box would overlap a wall, so diagonals cannot cut corners.

pub mod grid;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use grid::{Cell, CellPos, MazeDims, MazeGrid};

use crate::clamp_to;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Frame;
use crate::renderer::{Color, DrawList};
use crate::sim::{GameRng, MiniGame, Outcome, Rect};

/// Base grid the cell pitch is derived from
pub const BASE_COLS: usize = 35;
pub const BASE_ROWS: usize = 21;

/// Player step per tick while an arrow key is held
pub const PLAYER_SPEED: f32 = 3.0;
/// Chance that a free path cell spawns a coin
pub const COIN_SPAWN_CHANCE: f32 = 0.3;
/// Sizes relative to the cell pitch
pub const PLAYER_SCALE: f32 = 0.6;
pub const COIN_SCALE: f32 = 0.3;

const WALL_COLOR: Color = Color::rgb(128, 0, 128);
const PATH_COLOR: Color = Color::rgb(0, 0, 0);
const PLAYER_COLOR: Color = Color::rgb(255, 215, 0);
const PLAYER_EYE_COLOR: Color = Color::rgb(0, 0, 0);
const COIN_COLOR: Color = Color::rgb(255, 193, 7);
const START_COLOR: Color = Color::rgb(0, 0, 0);
const END_COLOR: Color = Color::rgb(50, 205, 50);
const TEXT_COLOR: Color = Color::rgb(245, 245, 245);

/// Maze level state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeGame {
    dims: MazeDims,
    grid: MazeGrid,
    start: CellPos,
    end: CellPos,
    /// Top-left corner of the player box
    player: Vec2,
    player_size: f32,
    /// Centers of coins still on the board
    coins: Vec<Vec2>,
    coin_size: f32,
    total_coins: usize,
    collected: usize,
    pub(crate) won: bool,
    rng: GameRng,
}

impl MazeGame {
    pub fn new(rng: GameRng) -> Self {
        let dims = MazeDims::fit(SCREEN_WIDTH, SCREEN_HEIGHT, BASE_COLS, BASE_ROWS);
        Self {
            dims,
            grid: MazeGrid::default(),
            start: (1, 1),
            end: (dims.rows - 2, dims.cols - 2),
            player: Vec2::ZERO,
            player_size: dims.cell_size * PLAYER_SCALE,
            coins: Vec::new(),
            coin_size: dims.cell_size * COIN_SCALE,
            total_coins: 0,
            collected: 0,
            won: false,
            rng,
        }
    }

    /// Carve a fresh maze (also usable as a preview before `load`)
    pub fn generate(&mut self) {
        let mut grid = MazeGrid::filled(self.dims.cols, self.dims.rows);
        grid.carve(self.start, &mut self.rng);
        self.grid = grid;
        log::debug!(
            "Maze generated: {}x{} cells, {}px pitch",
            self.dims.cols,
            self.dims.rows,
            self.dims.cell_size
        );
    }

    /// Put the player on the start cell and scatter coins over free path cells
    fn reset_player_and_coins(&mut self) {
        let cell = self.dims.cell_size;
        let inset = (cell - self.player_size) / 2.0;
        self.player = Vec2::new(
            self.start.1 as f32 * cell + inset,
            self.start.0 as f32 * cell + inset,
        );
        self.won = false;

        self.coins.clear();
        self.collected = 0;
        for (pos, kind) in self.grid.iter() {
            let free = kind == Cell::Path && pos != self.start && pos != self.end;
            if free && self.rng.chance(COIN_SPAWN_CHANCE) {
                self.coins.push(self.dims.cell_rect(pos).center());
            }
        }
        self.total_coins = self.coins.len();
        log::debug!("Maze coins placed: {}", self.total_coins);
    }

    pub fn dims(&self) -> MazeDims {
        self.dims
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn start_cell(&self) -> CellPos {
        self.start
    }

    pub fn end_cell(&self) -> CellPos {
        self.end
    }

    pub fn player_rect(&self) -> Rect {
        Rect::new(self.player.x, self.player.y, self.player_size, self.player_size)
    }

    pub fn coins(&self) -> &[Vec2] {
        &self.coins
    }

    pub fn coin_size(&self) -> f32 {
        self.coin_size
    }

    pub fn total_coins(&self) -> usize {
        self.total_coins
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    fn blocked(&self, delta: Vec2) -> bool {
        let moved = self.player_rect().translated(delta);
        self.grid.rect_hits_wall(&moved, self.dims.cell_size)
    }

    fn exit_rect(&self) -> Rect {
        self.dims.cell_rect(self.end)
    }
}

impl MiniGame for MazeGame {
    fn name(&self) -> &'static str {
        "Maze Level"
    }

    fn instructions(&self) -> &'static str {
        "Navigate the maze using ARROW keys. \n \n Collect all coins and reach the green exit to win."
    }

    fn load(&mut self) {
        if self.grid.is_empty() {
            self.generate();
        }
        self.reset_player_and_coins();
    }

    fn unload(&mut self) {
        self.grid = MazeGrid::default();
        self.coins.clear();
    }

    fn tick(&mut self, frame: &Frame) {
        if self.won {
            return;
        }

        let dx = frame.input.axis_x() * PLAYER_SPEED;
        let dy = frame.input.axis_y() * PLAYER_SPEED;

        if dx != 0.0 && !self.blocked(Vec2::new(dx, 0.0)) {
            self.player.x += dx;
        }
        if dy != 0.0 && !self.blocked(Vec2::new(0.0, dy)) {
            self.player.y += dy;
        }

        self.player.x = clamp_to(self.player.x, 0.0, SCREEN_WIDTH - self.player_size);
        self.player.y = clamp_to(self.player.y, 0.0, SCREEN_HEIGHT - self.player_size);

        let player = self.player_rect();
        let coin_size = self.coin_size;
        let before = self.coins.len();
        self.coins
            .retain(|&center| !player.overlaps(&Rect::centered(center, coin_size)));
        self.collected += before - self.coins.len();

        if player.overlaps(&self.exit_rect()) && self.collected == self.total_coins {
            self.won = true;
            log::debug!("Maze exit reached with {} coins", self.collected);
        }
    }

    fn draw(&self, out: &mut DrawList) {
        for (pos, cell) in self.grid.iter() {
            let color = match cell {
                Cell::Wall => WALL_COLOR,
                Cell::Path => PATH_COLOR,
            };
            out.rect(self.dims.cell_rect(pos), color);
        }

        out.rect(self.dims.cell_rect(self.start), START_COLOR);
        out.rect(self.exit_rect(), END_COLOR);

        for &coin in &self.coins {
            out.circle(coin, self.coin_size / 2.0, COIN_COLOR);
        }

        // Player: a round face with two eyes
        let size = self.player_size;
        let center = self.player + Vec2::splat(size / 2.0);
        out.circle(center, size / 2.0, PLAYER_COLOR);
        for side in [-1.0, 1.0] {
            let eye = center + Vec2::new(side * size * 0.18, -size * 0.15);
            out.circle(eye, size * 0.09, PLAYER_EYE_COLOR);
        }

        out.text(
            format!("Coins: {}/{}", self.collected, self.total_coins),
            10.0,
            10.0,
            20.0,
            TEXT_COLOR,
        );
    }

    fn outcome(&self) -> Option<Outcome> {
        self.won.then_some(Outcome::Won)
    }
}
