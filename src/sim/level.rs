//! The capability set shared by every mini-game
//!
//! A level is loaded, ticked and drawn until it reports an `Outcome`, then
//! unloaded. The campaign holds levels as the closed `Level` variant so the
//! whole run stays `Clone + Serialize` for snapshots.

use serde::{Deserialize, Serialize};

use crate::games::{FlappyGame, MazeGame, PlatformerGame, ShooterGame};
use crate::platform::Frame;
use crate::renderer::DrawList;

/// Terminal report of a finished level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Lifecycle and per-frame hooks of one mini-game
pub trait MiniGame {
    /// Display name shown on the transition screen
    fn name(&self) -> &'static str;

    /// How-to-play text shown on the transition screen
    fn instructions(&self) -> &'static str;

    /// Build the level's state; must be paired with one `unload`
    fn load(&mut self);

    /// Release the level's state
    fn unload(&mut self);

    /// Advance one host frame
    fn tick(&mut self, frame: &Frame);

    /// Emit this frame's draw commands
    fn draw(&self, out: &mut DrawList);

    /// `Some` once the level is finished
    fn outcome(&self) -> Option<Outcome>;

    fn is_complete(&self) -> bool {
        self.outcome().is_some()
    }

    fn did_win(&self) -> bool {
        self.outcome() == Some(Outcome::Won)
    }
}

/// One queued or active campaign level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Level {
    Maze(MazeGame),
    Shooter(ShooterGame),
    Flappy(FlappyGame),
    Platformer(PlatformerGame),
}

impl Level {
    pub fn as_game(&self) -> &dyn MiniGame {
        match self {
            Level::Maze(g) => g,
            Level::Shooter(g) => g,
            Level::Flappy(g) => g,
            Level::Platformer(g) => g,
        }
    }

    pub fn as_game_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            Level::Maze(g) => g,
            Level::Shooter(g) => g,
            Level::Flappy(g) => g,
            Level::Platformer(g) => g,
        }
    }

    /// Force a terminal outcome (campaign tests skip gameplay with this)
    #[cfg(test)]
    pub(crate) fn force_outcome(&mut self, outcome: Outcome) {
        let won = outcome == Outcome::Won;
        match self {
            Level::Maze(g) => g.won = won,
            Level::Shooter(g) => {
                g.won = won;
                g.lost = !won;
            }
            Level::Flappy(g) => g.finish(won),
            Level::Platformer(g) => g.finish(won),
        }
    }
}

impl MiniGame for Level {
    fn name(&self) -> &'static str {
        self.as_game().name()
    }

    fn instructions(&self) -> &'static str {
        self.as_game().instructions()
    }

    fn load(&mut self) {
        self.as_game_mut().load();
    }

    fn unload(&mut self) {
        self.as_game_mut().unload();
    }

    fn tick(&mut self, frame: &Frame) {
        self.as_game_mut().tick(frame);
    }

    fn draw(&self, out: &mut DrawList) {
        self.as_game().draw(out);
    }

    fn outcome(&self) -> Option<Outcome> {
        self.as_game().outcome()
    }
}
