//! Phrasal Runner - an endless vertical-scrolling quiz runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, rows, contacts, game state)
//! - `quiz`: Question catalog
//! - `settings`: Data-driven game tuning
//! - `error`: Error taxonomy

pub mod error;
pub mod quiz;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use quiz::{Question, QuestionBank};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Upper bound on a single frame's dt to avoid tunneling through rows
    pub const MAX_FRAME_DT: f32 = 0.1;
}
