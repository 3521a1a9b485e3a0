//! Retained draw command buffer
//!
//! The simulation never touches a graphics API. Each frame the campaign fills a
//! `DrawList` with primitives in painter's order and the host replays it.

pub mod colors;
pub mod commands;

pub use colors::Color;
pub use commands::{DrawCommand, DrawList, TextAnchor};
