//! Deterministic simulation primitives
//!
//! Shared by every mini-game. This module must stay pure and deterministic:
//! - Frame delta and timestamp come from the host, never from a system clock
//! - Seeded RNG only, passed in explicitly
//! - No rendering or platform dependencies beyond the draw command buffer

pub mod collision;
pub mod level;
pub mod rng;

pub use collision::{Rect, circle_rect_overlap, point_in_rect, rects_overlap};
pub use level::{Level, MiniGame, Outcome};
pub use rng::GameRng;
