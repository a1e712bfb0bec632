//! Text rendering of a snapshot for the terminal front-end.

use crate::game::clock::format_time;
use crate::game::state::Snapshot;
use crate::game::types::{Cell, Player, Winner};

/// Draw the board, one row per line, with column and row indices.
pub fn render_grid(snapshot: &Snapshot) -> String {
    let mut out = String::from("   ");
    for col in 0..snapshot.size {
        out.push_str(&format!(" {:<2}", col));
    }
    out.push('\n');

    for (row, cells) in snapshot.cells.chunks(snapshot.size.max(1)).enumerate() {
        out.push_str(&format!("{:>2} ", row));
        for cell in cells {
            let symbol = match cell {
                Cell::Neutral => "··",
                Cell::Owned(player) => player.short(),
            };
            out.push(' ');
            out.push_str(symbol);
        }
        out.push('\n');
    }
    out
}

/// Status panel: turn, progress, clock and score.
pub fn render_status(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    if let Some(player) = snapshot.turn {
        out.push_str(&format!("Turn: {}\n", player.name()));
    }
    out.push_str(&format!("Progress: {} / {}\n", snapshot.painted, snapshot.total));
    out.push_str(&format!("Time: {}\n", format_time(snapshot.time_remaining)));
    out.push_str(&format!(
        "Score: {} {} - {} {}\n",
        Player::A.name(),
        snapshot.score.a,
        snapshot.score.b,
        Player::B.name()
    ));
    if let Some(winner) = snapshot.winner {
        let result = match winner {
            Winner::Draw => "Draw!".to_string(),
            Winner::Player(player) => format!("{} wins!", player.name()),
        };
        out.push_str(&format!("Game over: {}\n", result));
    }
    out
}

/// Quiz prompt, if a quiz is open.
pub fn render_quiz(snapshot: &Snapshot) -> Option<String> {
    let quiz = snapshot.quiz.as_ref()?;
    let [[a, b], [c, d]] = quiz.matrix.0;
    let mut out = format!(
        "Solve the 2x2 determinant for cell ({}, {}): [[{}, {}], [{}, {}]]",
        quiz.pos.row, quiz.pos.col, a, b, c, d
    );
    if let Some(message) = &quiz.message {
        out.push_str(&format!("\n{}", message));
    }
    Some(out)
}

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = render_grid(snapshot);
    out.push_str(&render_status(snapshot));
    if let Some(quiz) = render_quiz(snapshot) {
        out.push_str(&quiz);
        out.push('\n');
    }
    out
}
