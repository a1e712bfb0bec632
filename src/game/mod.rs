//! Game rules.
//!
//! Board ownership, the turn engine, the determinant quiz, the round clock and
//! their composition into [`state::GameState`].

pub mod types;
pub mod matrix;
pub mod board;
pub mod turn;
pub mod quiz;
pub mod clock;
pub mod state;
pub mod render;

pub use types::*;
pub use state::{GameState, Snapshot};
