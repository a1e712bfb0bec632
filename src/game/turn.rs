//! Turn engine.
//!
//! Tracks whose turn it is and resolves the round, either when the board
//! fills up or when the clock runs out. Only the first resolution counts.

use log::info;
use serde::{Serialize, Deserialize};

use crate::game::board::BoardState;
use crate::game::types::{Player, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Active(Player),
    GameOver(Winner),
}

/// Result of closing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Flipped(Player),
    GameOver(Winner),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    phase: TurnPhase,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnEngine {
    pub fn new() -> Self {
        TurnEngine { phase: TurnPhase::Active(Player::A) }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The player to move, or None once the game is over.
    pub fn active(&self) -> Option<Player> {
        match self.phase {
            TurnPhase::Active(player) => Some(player),
            TurnPhase::GameOver(_) => None,
        }
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            TurnPhase::Active(_) => None,
            TurnPhase::GameOver(winner) => Some(winner),
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Close the current move. A full board ends the game on the final
    /// scores, otherwise the other player becomes active.
    /// Returns None if the game was already over.
    pub fn end_turn(&mut self, board: &BoardState) -> Option<TurnOutcome> {
        let TurnPhase::Active(player) = self.phase else {
            return None;
        };

        if board.is_full() {
            let winner = board.score().leader();
            info!("[TurnEngine] Board full ({} cells), winner: {:?}", board.total(), winner);
            self.phase = TurnPhase::GameOver(winner);
            Some(TurnOutcome::GameOver(winner))
        } else {
            let next = player.other();
            self.phase = TurnPhase::Active(next);
            Some(TurnOutcome::Flipped(next))
        }
    }

    /// End the game on the current scores regardless of board fill.
    pub fn resolve_by_timeout(&mut self, board: &BoardState) -> Option<Winner> {
        if self.is_over() {
            return None;
        }
        let winner = board.score().leader();
        info!("[TurnEngine] Time is up, winner: {:?}", winner);
        self.phase = TurnPhase::GameOver(winner);
        Some(winner)
    }

    pub fn reset(&mut self) {
        self.phase = TurnPhase::Active(Player::A);
    }
}
