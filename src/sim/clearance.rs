//! Answer resolution
//!
//! A correct answer makes the whole row the player is crossing passable.
//! The row is found by y proximity: the tracked tile nearest the player
//! gives the row y, and every tile within the cluster threshold of it is
//! switched off. Rows are keyed by their quantized y so the same row is
//! never processed twice.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, RowId};

/// Outcome of a successful clearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowClearance {
    /// Row owning the tile nearest to the player
    pub row_id: RowId,
    /// Quantized y used as the dedupe key
    pub row_key: i32,
    pub row_y: f32,
    /// Tiles whose collision was switched off by this clearance
    pub tiles_deactivated: usize,
}

/// Fixed-point key for a row y (hundredths, rounded)
#[inline]
pub fn row_key(y: f32) -> i32 {
    (y * 100.0).round() as i32
}

/// Clear the row the player is crossing at `player_y`
///
/// Returns `None` when there are no tiles or the row was already cleared.
pub fn on_correct_answer(state: &mut GameState, player_y: f32) -> Option<RowClearance> {
    let (row_id, row_y) = state
        .tracker
        .nearest_tile_to(player_y)
        .map(|t| (t.row_id, t.pos.y))?;

    let key = row_key(row_y);
    if !state.run.cleared_row_keys.insert(key) {
        return None;
    }

    let threshold = state.settings.row_cluster_threshold();
    let tiles_deactivated = state.tracker.deactivate_cluster(row_y, threshold);
    if state.tracker.mark_cleared(row_id) {
        state.events.push(GameEvent::RowCleared { row_id });
    }
    log::debug!("Cleared row {row_id} at y={row_y:.2} ({tiles_deactivated} tiles)");

    Some(RowClearance {
        row_id,
        row_key: key,
        row_y,
        tiles_deactivated,
    })
}

/// End the run; no-op once already over
pub fn on_wrong_answer(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.player.alive = false;
    state.player.vel = Vec2::ZERO;
    let score = state.score();
    state.events.push(GameEvent::GameOver { score });
    log::info!("Game over at y={:.2}, score {score}", state.player.pos.y);
}
