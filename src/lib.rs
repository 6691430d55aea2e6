pub mod core {
	pub mod engine;
	pub mod game;
}

pub mod cli;
pub mod config;
pub mod games;
pub mod logging;
pub mod script;

// Re-export for convenience
pub use crate::config::GameConfig;
pub use crate::core::game::{Context, Game};
pub use crate::games::guess::{Feedback, Session, Status};
