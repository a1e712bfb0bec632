//! Game state of one session.
//!
//! Composes the board, the turn engine, the quiz gate, the clock and the
//! matrix generator, and applies every rule of the game synchronously. Time
//! (the quiz feedback delay and the clock tick) is driven from outside; see
//! `session::controller`.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::game::board::BoardState;
use crate::game::clock::{ClockTick, GameClock};
use crate::game::matrix::{Challenge, Matrix2, MatrixGenerator};
use crate::game::quiz::{PendingQuiz, QuizAnswer, QuizGate, Verdict};
use crate::game::turn::{TurnEngine, TurnOutcome};
use crate::game::types::{Cell, GameError, Player, Position, Score, Winner};

/// What a committed verdict did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub player: Player,
    pub pos: Position,
    pub verdict: Verdict,
    /// Cells whose owner changed.
    pub changed: usize,
    pub turn: TurnOutcome,
}

/// Open quiz as shown to players. The determinant stays hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizView {
    pub pos: Position,
    pub matrix: Matrix2,
    pub message: Option<String>,
}

/// Read-only view of the whole game, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round_id: Uuid,
    pub size: usize,
    pub cells: Vec<Cell>,
    pub score: Score,
    pub painted: usize,
    pub total: usize,
    pub turn: Option<Player>,
    pub time_remaining: u64,
    pub winner: Option<Winner>,
    pub quiz: Option<QuizView>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: BoardState,
    turn: TurnEngine,
    quiz: QuizGate,
    clock: GameClock,
    generator: MatrixGenerator,
    rng: StdRng,
    round_id: Uuid,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::with_rng(config, rng)
    }

    /// Build a state drawing from the given RNG (seeded RNGs make games reproducible).
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        GameState {
            board: BoardState::new(config.grid_size),
            turn: TurnEngine::new(),
            quiz: QuizGate::new(),
            clock: GameClock::new(config.time_budget_secs),
            generator: MatrixGenerator::new(),
            rng,
            round_id: Uuid::new_v4(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn turn(&self) -> Option<Player> {
        self.turn.active()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.turn.winner()
    }

    pub fn time_remaining(&self) -> u64 {
        self.clock.remaining()
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.quiz.challenge()
    }

    pub fn pending_quiz(&self) -> Option<&PendingQuiz> {
        self.quiz.pending()
    }

    /// Identifies the current round; changes on every reset or resize.
    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    /// Open a quiz for the clicked cell.
    pub fn click(&mut self, row: usize, col: usize) -> Result<Challenge, GameError> {
        if self.turn.is_over() {
            return Err(GameError::GameOver);
        }
        if self.quiz.is_open() {
            return Err(GameError::QuizOpen);
        }
        if self.board.index_of(row, col).is_none() {
            return Err(GameError::OutOfBounds { row, col, size: self.board.size() });
        }
        self.quiz.open(Position { row, col }, &mut self.generator, &mut self.rng)
    }

    /// Grade an answer for the open quiz. Nothing is painted until
    /// [`GameState::commit_pending`] runs.
    pub fn submit(&mut self, answer: QuizAnswer) -> Result<Verdict, GameError> {
        if self.turn.is_over() {
            return Err(GameError::GameOver);
        }
        self.quiz.submit(answer, self.config.bomb_probability, &mut self.rng)
    }

    /// Apply the answered quiz to the board and close the move.
    /// Returns None if there is nothing to commit or the game already ended,
    /// in which case a leftover quiz is discarded.
    pub fn commit_pending(&mut self) -> Option<CommitOutcome> {
        let Some(player) = self.turn.active() else {
            if self.quiz.is_open() {
                debug!("[GameState] Discarding quiz left over after game end");
                self.quiz.cancel();
            }
            return None;
        };
        let (pos, verdict) = self.quiz.take_resolved()?;

        let changed = match verdict {
            Verdict::Wrong { .. } => 0,
            Verdict::Correct => {
                let idx = self.board.index_of(pos.row, pos.col)?;
                usize::from(self.board.paint(idx, player))
            }
            Verdict::Bomb => self.board.paint_block(pos.row, pos.col, player),
        };

        let turn = self.turn.end_turn(&self.board)?;
        if let TurnOutcome::GameOver(_) = turn {
            self.clock.stop();
        }
        debug!(
            "[GameState] {:?} at {:?} by {}: {} cell(s) changed, {:?}",
            verdict, pos, player.name(), changed, turn
        );
        Some(CommitOutcome { player, pos, verdict, changed, turn })
    }

    /// Count the clock down one second; expiry ends the game on the current scores.
    pub fn tick(&mut self) -> ClockTick {
        if self.turn.is_over() {
            self.clock.stop();
            return ClockTick::Stopped;
        }
        let tick = self.clock.tick();
        if tick == ClockTick::Expired {
            self.turn.resolve_by_timeout(&self.board);
            self.quiz.cancel();
        }
        tick
    }

    /// Start a new round at the current size.
    pub fn reset(&mut self) {
        let size = self.board.size();
        self.start_round(size);
    }

    /// Start a new round on a board of another size.
    pub fn resize(&mut self, size: usize) -> Result<(), GameError> {
        if !self.config.is_allowed_size(size) {
            return Err(GameError::InvalidGridSize(size));
        }
        self.start_round(size);
        Ok(())
    }

    fn start_round(&mut self, size: usize) {
        self.board.reset(size);
        self.turn.reset();
        self.quiz.cancel();
        self.clock.reset();
        self.generator.reset();
        self.round_id = Uuid::new_v4();
        info!("[GameState] New round {} on a {}x{} board", self.round_id, size, size);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            round_id: self.round_id,
            size: self.board.size(),
            cells: self.board.cells().to_vec(),
            score: self.board.score(),
            painted: self.board.painted(),
            total: self.board.total(),
            turn: self.turn.active(),
            time_remaining: self.clock.remaining(),
            winner: self.turn.winner(),
            quiz: self.quiz.pending().map(|p| QuizView {
                pos: p.pos,
                matrix: p.challenge.matrix,
                message: p.message(),
            }),
        }
    }
}
