//! Round countdown.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Still counting; seconds left.
    Running(u64),
    /// This tick reached zero.
    Expired,
    /// Already stopped, nothing happened.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    budget: u64,
    remaining: u64,
    stopped: bool,
}

impl GameClock {
    pub fn new(budget: u64) -> Self {
        GameClock { budget, remaining: budget, stopped: false }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Count one second down. Reaching zero stops the clock.
    pub fn tick(&mut self) -> ClockTick {
        if self.stopped {
            return ClockTick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stopped = true;
            ClockTick::Expired
        } else {
            ClockTick::Running(self.remaining)
        }
    }

    /// Freeze the clock (the game ended some other way).
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn reset(&mut self) {
        self.remaining = self.budget;
        self.stopped = false;
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
