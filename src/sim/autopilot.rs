//! Demo autopilot
//!
//! Steers toward the correct tile of the next row. Used by the headless
//! driver for attract-mode runs and soak testing.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Deliberately pick a wrong tile on every n-th row id
    pub blunder_every: Option<u32>,
}

impl Autopilot {
    pub fn new(blunder_every: Option<u32>) -> Self {
        Self { blunder_every }
    }

    /// Build this tick's input from the current state
    pub fn input(&self, state: &GameState, dt: f32) -> TickInput {
        if state.phase == GamePhase::GameOver {
            return TickInput {
                restart_requested: true,
                ..Default::default()
            };
        }

        let player = state.player.pos;
        let Some(row) = state.tracker.nearest_upcoming_row(player.y) else {
            return TickInput::default();
        };

        let blunder = self
            .blunder_every
            .is_some_and(|n| n > 0 && row.id.is_multiple_of(n));
        let target = row
            .tile_ids
            .iter()
            .filter_map(|&id| state.tracker.tile(id))
            .find(|t| t.is_correct != blunder)
            .map(|t| t.pos.x);

        let Some(target_x) = target else {
            return TickInput::default();
        };

        let diff = target_x - player.x;
        let step = state.settings.move_speed * dt;
        if diff.abs() <= step {
            TickInput {
                pointer_delta: Some(diff),
                ..Default::default()
            }
        } else {
            TickInput {
                horizontal_axis: diff.signum() as i8,
                ..Default::default()
            }
        }
    }
}
