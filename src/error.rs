//! Error taxonomy for loading and driving a run

use thiserror::Error;

/// Errors surfaced by the game core
///
/// Per-tick edge cases (no upcoming row, no tiles) never produce an error;
/// they degrade to no-ops inside the tick.
#[derive(Debug, Error)]
pub enum GameError {
    /// Malformed question record or out-of-range setting
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Question bank has no entries and no default loader
    #[error("question bank is empty and has no default loader")]
    EmptyBank,
    /// Restart requested while the run is still going
    #[error("restart requested while the run is still in progress")]
    InvalidRestart,
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
