//! Main entry point for the terminal game.
//!
//! Initializes the actor system, starts the game controller and drives it
//! from stdin until the player quits.

use actix::Actor;
use matrix_paint::config::GameConfig;
use matrix_paint::game::GameState;
use matrix_paint::session::GameController;
use matrix_paint::session::messages::Subscribe;
use matrix_paint::session::terminal::{self, TerminalView};

#[actix::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Start the controller actor (owns the game state, quiz delays and clock).
    let controller = GameController::new(GameState::new(GameConfig::default())).start();

    // Render every snapshot the controller publishes.
    let view = TerminalView::default().start();
    controller.do_send(Subscribe { recipient: view.recipient() });

    terminal::run(controller).await
}
