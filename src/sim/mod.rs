//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Single writer, one step per frame
//! - Stable iteration order (by spawn / entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clearance;
pub mod collision;
pub mod rows;
pub mod scroll;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use clearance::{RowClearance, on_correct_answer, on_wrong_answer, row_key};
pub use collision::{Aabb, detect_contacts};
pub use rows::{LANES, RowTracker, SpawnedRow, build_row, ensure_rows_ahead, lane_permutation, spawn_row};
pub use scroll::{apply_slow_modifiers, current_speed, screen_delta_to_world};
pub use state::{
    FrameSnapshot, GameEvent, GamePhase, GameState, Player, Row, RowId, RunState, Tile, TileId,
};
pub use tick::{TickInput, restart, tick};
