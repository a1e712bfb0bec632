use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::matrix::Matrix2;
use crate::game::quiz::{QuizAnswer, Verdict};
use crate::game::state::Snapshot;
use crate::game::types::GameError;

/// A player clicked a cell. Opens a quiz and returns its matrix.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<Matrix2, GameError>")]
pub struct CellClick {
    pub row: usize,
    pub col: usize,
}

/// Answer for the open quiz. The verdict is committed after its feedback delay.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<Verdict, GameError>")]
pub struct QuizSubmit {
    pub answer: QuizAnswer,
}

/// Change the board dimension and start a new round.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<(), GameError>")]
pub struct Resize {
    pub size: usize,
}

/// Start a new round at the current dimension.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct Reset;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Snapshot")]
pub struct GetSnapshot;

/// Register a recipient for [`SnapshotUpdate`]s. It gets the current snapshot right away.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub recipient: Recipient<SnapshotUpdate>,
}

/// Pushed to subscribers after every state change.
#[derive(Message, Clone, Serialize, Deserialize, Debug)]
#[rtype(result = "()")]
pub struct SnapshotUpdate {
    pub snapshot: Snapshot,
}
