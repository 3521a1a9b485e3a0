//! Maze grid and recursive-backtracker carving

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::{GameRng, Rect};

/// One square of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Path,
}

/// Target cells two steps away: up, right, down, left
const CARVE_STEPS: [(i32, i32); 4] = [(-2, 0), (0, 2), (2, 0), (0, -2)];

/// Row/column grid index
pub type CellPos = (usize, usize);

/// Grid size and cell pitch derived from the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeDims {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
}

impl MazeDims {
    /// Fit a base grid onto the canvas, then grow it to fill the screen
    ///
    /// The cell pitch comes from the base grid; the final counts are the largest
    /// odd numbers of cells that fit, never below 3.
    pub fn fit(screen_w: f32, screen_h: f32, base_cols: usize, base_rows: usize) -> Self {
        let base_cols = make_odd_up(base_cols);
        let base_rows = make_odd_up(base_rows);

        let cell_size = (screen_w / base_cols as f32)
            .min(screen_h / base_rows as f32)
            .floor()
            .max(1.0);

        let cols = make_odd_down((screen_w / cell_size) as usize).max(3);
        let rows = make_odd_down((screen_h / cell_size) as usize).max(3);

        Self {
            cols,
            rows,
            cell_size,
        }
    }

    /// Canvas rectangle of a cell
    pub fn cell_rect(&self, (row, col): CellPos) -> Rect {
        Rect::new(
            col as f32 * self.cell_size,
            row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }
}

fn make_odd_up(n: usize) -> usize {
    if n % 2 == 0 { n + 1 } else { n }
}

fn make_odd_down(n: usize) -> usize {
    match n {
        0 => 1,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Row-major wall/path grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MazeGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// A grid where every cell is a wall
    pub fn filled(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Wall; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(row, col)`; anything outside the grid reads as wall
    pub fn get(&self, (row, col): CellPos) -> Cell {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            Cell::Wall
        }
    }

    pub fn is_wall(&self, pos: CellPos) -> bool {
        self.get(pos) == Cell::Wall
    }

    fn set(&mut self, (row, col): CellPos, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = cell;
        }
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Carve a spanning tree of odd cells with a recursive backtracker
    ///
    /// Runs on an explicit stack. Each visited cell shuffles the four
    /// directions once on entry and tries them in order, so the RNG is drawn in
    /// exactly the order a recursive walk would draw it.
    pub fn carve(&mut self, start: CellPos, rng: &mut GameRng) {
        struct Visit {
            row: i32,
            col: i32,
            dirs: [usize; 4],
            next: usize,
        }

        fn enter(grid: &mut MazeGrid, rng: &mut GameRng, row: i32, col: i32) -> Visit {
            grid.set((row as usize, col as usize), Cell::Path);
            let mut dirs = [0, 1, 2, 3];
            rng.shuffle(&mut dirs);
            Visit {
                row,
                col,
                dirs,
                next: 0,
            }
        }

        let mut stack = vec![enter(self, rng, start.0 as i32, start.1 as i32)];

        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let (dr, dc) = CARVE_STEPS[top.dirs[top.next]];
            top.next += 1;

            let (row, col) = (top.row, top.col);
            let (next_row, next_col) = (row + dr, col + dc);
            if self.in_bounds(next_row, next_col)
                && self.is_wall((next_row as usize, next_col as usize))
            {
                let between = ((row + dr / 2) as usize, (col + dc / 2) as usize);
                self.set(between, Cell::Path);
                let visit = enter(self, rng, next_row, next_col);
                stack.push(visit);
            }
        }
    }

    /// Path cells adjacent to `pos` (4-neighbourhood)
    pub fn path_neighbors(&self, (row, col): CellPos) -> impl Iterator<Item = CellPos> + '_ {
        [(-1i32, 0i32), (0, 1), (1, 0), (0, -1)]
            .into_iter()
            .filter_map(move |(dr, dc)| {
                let (r, c) = (row as i32 + dr, col as i32 + dc);
                self.in_bounds(r, c).then_some((r as usize, c as usize))
            })
            .filter(move |&p| !self.is_wall(p))
    }

    /// Shortest 4-neighbour path between two path cells (inclusive), if any
    pub fn shortest_path(&self, from: CellPos, to: CellPos) -> Option<Vec<CellPos>> {
        if self.is_wall(from) || self.is_wall(to) {
            return None;
        }
        let mut parent: Vec<Option<CellPos>> = vec![None; self.cells.len()];
        let mut seen = vec![false; self.cells.len()];
        let index = |(r, c): CellPos| r * self.cols + c;

        let mut queue = VecDeque::from([from]);
        seen[index(from)] = true;
        while let Some(cur) = queue.pop_front() {
            if cur == to {
                let mut path = vec![cur];
                let mut at = cur;
                while let Some(prev) = parent[index(at)] {
                    path.push(prev);
                    at = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.path_neighbors(cur) {
                if !seen[index(next)] {
                    seen[index(next)] = true;
                    parent[index(next)] = Some(cur);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Whether a rectangle (canvas space) overlaps any wall cell it covers
    pub fn rect_hits_wall(&self, rect: &Rect, cell_size: f32) -> bool {
        if self.is_empty() {
            return false;
        }
        let max_col = (self.cols - 1) as i32;
        let max_row = (self.rows - 1) as i32;
        let span = |lo: f32, len: f32, max: i32| {
            let first = ((lo / cell_size).floor() as i32).clamp(0, max);
            // Any positive overlap with a cell counts, so the end is rounded up
            let last = (((lo + len) / cell_size).ceil() as i32 - 1).clamp(0, max);
            first..=last
        };

        for row in span(rect.y, rect.h, max_row) {
            for col in span(rect.x, rect.w, max_col) {
                let pos = (row as usize, col as usize);
                if self.is_wall(pos) {
                    let wall = Rect::new(
                        col as f32 * cell_size,
                        row as f32 * cell_size,
                        cell_size,
                        cell_size,
                    );
                    if rect.overlaps(&wall) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Iterate all cells with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / self.cols, i % self.cols), cell))
    }
}
