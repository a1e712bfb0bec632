/// Main configuration module.
/// 
/// Re-exports the game configuration (board sizes, quiz timings, clock budget).
pub mod game;

pub use game::GameConfig;
