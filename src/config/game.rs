//! Game configuration constants.
//! 
//! This module defines the main gameplay parameters such as the clock budget,
//! quiz feedback delays, the bomb probability and the board dimensions.
use std::time::Duration;

/// Length of a round in seconds.
pub const TIME_BUDGET_SECS: u64 = 240; // Four minutes per round.

/// Delay (in milliseconds) between a correct answer and the paint being applied.
pub const CORRECT_ANSWER_DELAY_MS: u64 = 1000;

/// Delay (in milliseconds) between a wrong answer and the turn being passed.
pub const WRONG_ANSWER_DELAY_MS: u64 = 1500;

/// Probability that a correct answer triggers an ink bomb (2x2 paint).
pub const BOMB_PROBABILITY: f64 = 0.30;

/// Board dimension used when a session starts.
pub const DEFAULT_GRID_SIZE: usize = 6;

/// Board dimensions a player may resize to.
pub const ALLOWED_GRID_SIZES: [usize; 5] = [4, 5, 6, 7, 8];

/// Tunable gameplay parameters, defaulting to the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub grid_size: usize,
    pub allowed_grid_sizes: Vec<usize>,
    pub time_budget_secs: u64,
    pub bomb_probability: f64,
    pub correct_answer_delay: Duration,
    pub wrong_answer_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            allowed_grid_sizes: ALLOWED_GRID_SIZES.to_vec(),
            time_budget_secs: TIME_BUDGET_SECS,
            bomb_probability: BOMB_PROBABILITY,
            correct_answer_delay: Duration::from_millis(CORRECT_ANSWER_DELAY_MS),
            wrong_answer_delay: Duration::from_millis(WRONG_ANSWER_DELAY_MS),
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl GameConfig {
    pub fn is_allowed_size(&self, size: usize) -> bool {
        self.allowed_grid_sizes.contains(&size)
    }
}
