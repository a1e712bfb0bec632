//! Terminal front-end.
//!
//! Reads commands from stdin, forwards them to the [`GameController`] and
//! prints the snapshots it pushes back.

use actix::prelude::*;
use log::error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::game::quiz::QuizAnswer;
use crate::game::render::render;
use crate::game::state::Snapshot;
use crate::session::controller::GameController;
use crate::session::messages::{CellClick, GetSnapshot, QuizSubmit, Reset, Resize, SnapshotUpdate};

/// Seconds between clock-only redraws.
const CLOCK_REDRAW_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Click { row: usize, col: usize },
    Answer(QuizAnswer),
    Resize(usize),
    Reset,
    State,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. While a quiz is open a bare value is taken as the
    /// answer, numeric or not.
    pub fn parse(line: &str, quiz_open: bool) -> Result<Command, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err("empty command".to_string()),
            ["q" | "quit" | "exit"] => Ok(Command::Quit),
            ["reset" | "restart"] => Ok(Command::Reset),
            ["state"] => Ok(Command::State),
            ["help" | "?"] => Ok(Command::Help),
            ["size", n] => n
                .parse()
                .map(Command::Resize)
                .map_err(|_| format!("invalid size '{}'", n)),
            ["=" | "answer", rest @ ..] => Ok(Command::Answer(QuizAnswer::parse(&rest.join(" ")))),
            [row, col] if !quiz_open => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => Ok(Command::Click { row, col }),
                _ => Err(format!("unknown command '{}'", line.trim())),
            },
            _ if quiz_open => Ok(Command::Answer(QuizAnswer::parse(line))),
            _ => Err(format!("unknown command '{}'", line.trim())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <row> <col>     click a cell (opens a determinant quiz)
  = <n>           answer the open quiz (a bare number works too)
  size <4..8>     resize the board and start over
  reset           start over on the same board
  state           print the game state as JSON
  quit            leave";

/// Prints snapshots as they arrive. Clock-only changes are redrawn every
/// [`CLOCK_REDRAW_SECS`] seconds.
#[derive(Default)]
pub struct TerminalView {
    last: Option<Snapshot>,
}

impl Actor for TerminalView {
    type Context = Context<Self>;
}

impl TerminalView {
    fn should_draw(&self, snapshot: &Snapshot) -> bool {
        let Some(last) = &self.last else {
            return true;
        };
        let clock_only = Snapshot { time_remaining: last.time_remaining, ..snapshot.clone() } == *last;
        !clock_only || snapshot.time_remaining % CLOCK_REDRAW_SECS == 0
    }
}

impl Handler<SnapshotUpdate> for TerminalView {
    type Result = ();

    fn handle(&mut self, msg: SnapshotUpdate, _: &mut Context<Self>) -> Self::Result {
        if self.should_draw(&msg.snapshot) {
            println!("\n{}", render(&msg.snapshot));
        }
        self.last = Some(msg.snapshot);
    }
}

/// Read stdin until EOF or `quit`, driving the controller.
pub async fn run(controller: Addr<GameController>) -> std::io::Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let snapshot = match controller.send(GetSnapshot).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("[Terminal] Controller unreachable: {}", err);
                break;
            }
        };

        let command = match Command::parse(&line, snapshot.quiz.is_some()) {
            Ok(command) => command,
            Err(err) => {
                println!("{} (type 'help')", err);
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                Ok(Ok(()))
            }
            Command::State => {
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(err) => println!("failed to serialize state: {}", err),
                }
                Ok(Ok(()))
            }
            Command::Click { row, col } => controller
                .send(CellClick { row, col })
                .await
                .map(|res| res.map(|_| ())),
            Command::Answer(answer) => controller
                .send(QuizSubmit { answer })
                .await
                .map(|res| res.map(|_| ())),
            Command::Resize(size) => controller.send(Resize { size }).await,
            Command::Reset => controller.send(Reset).await.map(Ok),
        };

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => println!("ignored: {}", err),
            Err(err) => {
                error!("[Terminal] Controller unreachable: {}", err);
                break;
            }
        }
    }
    Ok(())
}
