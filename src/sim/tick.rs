//! Per-frame simulation tick
//!
//! Order within a running tick: speed → player motion → camera → spawn
//! ahead → score → cull → contacts. Spawning after the camera update keeps
//! the lookahead measured from the post-move view; culling after spawning
//! means a fresh row is never culled on the tick it appears.

use super::clearance::{on_correct_answer, on_wrong_answer};
use super::collision::{Aabb, detect_contacts};
use super::rows::ensure_rows_ahead;
use super::scroll::{advance_player, apply_drag, apply_slow_modifiers, current_speed, step_lateral};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DT;
use crate::error::{GameError, Result};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Keyboard lateral axis: -1, 0 or 1
    pub horizontal_axis: i8,
    /// Pointer drag since last tick, in world units
    pub pointer_delta: Option<f32>,
    /// Hold-to-slow pressed
    pub hold_slow: bool,
    /// Restart pressed (only honored after game over)
    pub restart_requested: bool,
}

/// Start a new run after game over
///
/// Fails with [`GameError::InvalidRestart`] while the run is still going.
pub fn restart(state: &mut GameState) -> Result<()> {
    if state.phase == GamePhase::Running {
        return Err(GameError::InvalidRestart);
    }
    state.events.push(GameEvent::Restarted);
    state.reset_run()?;
    log::info!("Run restarted");
    Ok(())
}

/// Advance the game state by `dt` seconds
///
/// `dt` is clamped to `[0, MAX_FRAME_DT]` so a long frame cannot carry the
/// player past a row without a contact check.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<()> {
    let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_DT) };

    if input.restart_requested {
        match restart(state) {
            Ok(()) => return Ok(()),
            Err(GameError::InvalidRestart) => log::debug!("Ignoring restart while running"),
            Err(e) => return Err(e),
        }
    }

    if state.phase == GamePhase::GameOver {
        return Ok(());
    }

    state.run.elapsed += dt;

    // Forward scroll with assists
    let to_next_row = state.tracker.distance_to_next_row(state.player.pos.y);
    let ramped = current_speed(state.run.elapsed, &state.settings);
    let speed = apply_slow_modifiers(ramped, to_next_row, input.hold_slow, &state.settings);
    state.speed = speed;
    advance_player(&mut state.player, speed, dt);

    // Lateral: keyboard first, then pointer drag
    let mut x = step_lateral(state.player.pos.x, input.horizontal_axis, dt, &state.settings);
    if let Some(delta) = input.pointer_delta {
        x = apply_drag(x, delta, &state.settings);
    }
    state.player.pos.x = x;

    state.camera_y = state.settings.camera_y_for(state.player.pos.y);

    ensure_rows_ahead(state)?;

    if state.player.pos.y > state.run.max_y {
        let before = state.score();
        state.run.max_y = state.player.pos.y;
        let score = state.score();
        if score > before {
            state.events.push(GameEvent::ScoreChanged { score });
        }
    }

    let camera_bottom = state.camera_bottom();
    state
        .tracker
        .cull_behind_camera(camera_bottom, &state.settings, &mut state.events);

    resolve_contacts(state);
    Ok(())
}

/// Check tile contacts and apply their answers
fn resolve_contacts(state: &mut GameState) {
    let player_box = Aabb::new(state.player.pos, state.settings.player_size);
    let tile_size = state.settings.option_size;
    let contacts = detect_contacts(player_box, state.tracker.tiles_mut(), tile_size);

    for tile_id in contacts {
        // A clearance earlier in this loop may have switched the tile off
        let Some(tile) = state.tracker.tile(tile_id).filter(|t| t.active) else {
            continue;
        };
        if tile.is_correct {
            let player_y = state.player.pos.y;
            on_correct_answer(state, player_y);
        } else {
            on_wrong_answer(state);
            break;
        }
    }
}
