pub mod game;
pub mod session;

pub use game::{feedback_message, GuessAction, GuessGame};
pub use session::{Feedback, GuessError, Session, Snapshot, Status};

use crate::config::GameConfig;
use crate::core::engine::Engine;
use anyhow::Result;
use ratatui::DefaultTerminal;

/// Game runner for the number guessing game
pub async fn run_game(config: &GameConfig, terminal: DefaultTerminal) -> Result<Snapshot> {
    let game = GuessGame::new();
    let session = Session::new(config);
    let engine = Engine::new(game, session);
    let session = engine.run(terminal).await?;
    Ok(session.snapshot())
}
