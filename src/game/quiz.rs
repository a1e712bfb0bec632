//! Quiz gate.
//!
//! Every paint attempt is held back behind a determinant challenge. A click
//! opens the quiz, a single answer produces a [`Verdict`], and the verdict is
//! committed to the board later (after its feedback delay) by the owner of the
//! gate through [`QuizGate::take_resolved`].

use std::time::Duration;

use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::game::matrix::{Challenge, MatrixGenerator};
use crate::game::types::{GameError, Position};

/// A submitted answer. Anything that does not parse as an integer is kept as
/// `Invalid` and is always graded wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizAnswer {
    Value(i64),
    Invalid,
}

impl QuizAnswer {
    pub fn parse(input: &str) -> QuizAnswer {
        input.trim().parse::<i64>().map(QuizAnswer::Value).unwrap_or(QuizAnswer::Invalid)
    }

    pub fn matches(self, determinant: i32) -> bool {
        matches!(self, QuizAnswer::Value(v) if v == i64::from(determinant))
    }
}

impl From<i64> for QuizAnswer {
    fn from(value: i64) -> Self {
        QuizAnswer::Value(value)
    }
}

impl From<&str> for QuizAnswer {
    fn from(input: &str) -> Self {
        QuizAnswer::parse(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Wrong answer: no paint, the turn passes.
    Wrong { determinant: i32 },
    /// Correct answer: paint the clicked cell.
    Correct,
    /// Correct answer with the ink bomb: paint the 2x2 block from the clicked cell.
    Bomb,
}

impl Verdict {
    pub fn message(&self) -> String {
        match self {
            Verdict::Wrong { determinant } => {
                format!("Wrong answer! Correct determinant: {}", determinant)
            }
            Verdict::Correct => "Correct answer!".to_string(),
            Verdict::Bomb => "INK BOMB!!!".to_string(),
        }
    }

    /// How long the feedback message stays up before the verdict is committed.
    pub fn delay(&self, config: &GameConfig) -> Duration {
        match self {
            Verdict::Wrong { .. } => config.wrong_answer_delay,
            Verdict::Correct | Verdict::Bomb => config.correct_answer_delay,
        }
    }
}

/// The open quiz: the clicked cell, its challenge and, once answered, the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuiz {
    pub pos: Position,
    pub challenge: Challenge,
    pub verdict: Option<Verdict>,
}

impl PendingQuiz {
    pub fn message(&self) -> Option<String> {
        self.verdict.map(|v| v.message())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuizGate {
    pending: Option<PendingQuiz>,
}

impl QuizGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingQuiz> {
        self.pending.as_ref()
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.pending.as_ref().map(|p| &p.challenge)
    }

    /// Record the click and draw a fresh challenge for it.
    pub fn open<R: Rng>(
        &mut self,
        pos: Position,
        generator: &mut MatrixGenerator,
        rng: &mut R,
    ) -> Result<Challenge, GameError> {
        if self.pending.is_some() {
            return Err(GameError::QuizOpen);
        }
        let challenge = generator.generate(rng);
        debug!("[QuizGate] Quiz opened at {:?}: {:?}", pos, challenge.matrix);
        self.pending = Some(PendingQuiz { pos, challenge, verdict: None });
        Ok(challenge)
    }

    /// Grade the answer. Correct answers roll for the bomb with `bomb_probability`.
    pub fn submit<R: Rng>(
        &mut self,
        answer: QuizAnswer,
        bomb_probability: f64,
        rng: &mut R,
    ) -> Result<Verdict, GameError> {
        let pending = self.pending.as_mut().ok_or(GameError::NoOpenQuiz)?;
        if pending.verdict.is_some() {
            return Err(GameError::AnswerAlreadySubmitted);
        }

        let determinant = pending.challenge.determinant;
        let verdict = if answer.matches(determinant) {
            let roll: f64 = rng.random();
            if roll < bomb_probability { Verdict::Bomb } else { Verdict::Correct }
        } else {
            Verdict::Wrong { determinant }
        };
        debug!("[QuizGate] Answer {:?} for det={} -> {:?}", answer, determinant, verdict);
        pending.verdict = Some(verdict);
        Ok(verdict)
    }

    /// Close the quiz if it has a verdict, handing back the click and the verdict.
    pub fn take_resolved(&mut self) -> Option<(Position, Verdict)> {
        let verdict = self.pending.as_ref()?.verdict?;
        self.pending.take().map(|p| (p.pos, verdict))
    }

    /// Drop the open quiz, answered or not.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
