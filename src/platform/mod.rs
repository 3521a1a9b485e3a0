//! Platform abstraction layer
//!
//! The host owns the window and devices; each frame it hands the simulation:
//! - a level/edge input snapshot
//! - the frame delta and a monotonic timestamp

pub mod input;
pub mod time;

pub use input::InputSnapshot;
pub use time::{Clock, Frame};
