use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::A => "Blue",
            Player::B => "Red",
        }
    }

    /// Two-letter tag drawn on owned cells.
    pub fn short(self) -> &'static str {
        match self {
            Player::A => "BL",
            Player::B => "RD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Neutral,
    Owned(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Neutral => None,
            Cell::Owned(player) => Some(player),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub a: usize,
    pub b: usize,
}

impl Score {
    pub fn get(&self, player: Player) -> usize {
        match player {
            Player::A => self.a,
            Player::B => self.b,
        }
    }

    pub(crate) fn get_mut(&mut self, player: Player) -> &mut usize {
        match player {
            Player::A => &mut self.a,
            Player::B => &mut self.b,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b
    }

    /// Draw on equal scores, otherwise the higher scorer wins.
    pub fn leader(&self) -> Winner {
        if self.a == self.b {
            Winner::Draw
        } else if self.a > self.b {
            Winner::Player(Player::A)
        } else {
            Winner::Player(Player::B)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(Player),
    Draw,
}

/// Reasons a command is ignored. The state is never touched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error("a quiz is already open")]
    QuizOpen,
    #[error("no quiz is open")]
    NoOpenQuiz,
    #[error("an answer was already submitted for this quiz")]
    AnswerAlreadySubmitted,
    #[error("cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("unsupported board size {0}")]
    InvalidGridSize(usize),
}
