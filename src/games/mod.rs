//! The four mini-games, in campaign order

pub mod flappy;
pub mod maze;
pub mod platformer;
pub mod shooter;

pub use flappy::FlappyGame;
pub use maze::MazeGame;
pub use platformer::PlatformerGame;
pub use shooter::ShooterGame;
