//! Determinant quiz painting game.
//!
//! Two players take turns claiming cells of a square board. Every claim is
//! gated by a 2x2 determinant quiz; a correct answer may turn into an ink bomb
//! that paints a 2x2 block. The round ends when the board is full or the
//! clock runs out.

pub mod config;
pub mod game;
pub mod session;
