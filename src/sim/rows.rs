//! Row spawning, lookup and culling
//!
//! Rows are generated ahead of the camera and retired once they fall behind
//! it. Row bookkeeping and tiles are culled independently: tiles linger a
//! bit longer than the row records that drive the HUD label and auto-slow.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{GameEvent, GameState, Row, RowId, Tile, TileId};
use crate::error::Result;
use crate::quiz::{CHOICE_COUNT, Question};
use crate::settings::Settings;

/// Lane identifiers, left to right
pub const LANES: [i8; CHOICE_COUNT] = [-1, 0, 1];

/// A freshly generated row with its tiles
#[derive(Debug, Clone)]
pub struct SpawnedRow {
    pub row: Row,
    pub tiles: [Tile; CHOICE_COUNT],
}

/// Uniform random lane order, drawn fresh for every row
pub fn lane_permutation<R: Rng>(rng: &mut R) -> [i8; CHOICE_COUNT] {
    let mut lanes = LANES;
    lanes.shuffle(rng);
    lanes
}

/// Build a row placing `question.choices[i]` in lane `lanes[i]`
///
/// Correctness follows the choice index, not the lane, so the correct lane
/// changes from row to row.
pub fn build_row(
    question: Rc<Question>,
    spawn_y: f32,
    lanes: [i8; CHOICE_COUNT],
    row_id: RowId,
    tile_ids: [TileId; CHOICE_COUNT],
    settings: &Settings,
) -> SpawnedRow {
    let tiles = std::array::from_fn(|i| Tile {
        id: tile_ids[i],
        row_id,
        lane: lanes[i],
        pos: Vec2::new(settings.lane_x(lanes[i]), spawn_y),
        is_correct: i == question.correct_index,
        label: question.choices[i].clone(),
        active: true,
        passed: false,
        touching: false,
    });
    SpawnedRow {
        row: Row {
            id: row_id,
            spawn_y,
            question,
            tile_ids,
            cleared: false,
        },
        tiles,
    }
}

/// Generate a row for `question` at `spawn_y` with a fresh lane shuffle
pub fn spawn_row<R: Rng>(
    question: Rc<Question>,
    spawn_y: f32,
    row_id: RowId,
    tile_ids: [TileId; CHOICE_COUNT],
    settings: &Settings,
    rng: &mut R,
) -> SpawnedRow {
    let lanes = lane_permutation(rng);
    build_row(question, spawn_y, lanes, row_id, tile_ids, settings)
}

/// Live rows and tiles, ordered by spawn
#[derive(Debug, Clone, Default)]
pub struct RowTracker {
    rows: Vec<Row>,
    tiles: Vec<Tile>,
}

impl RowTracker {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, spawned: SpawnedRow) {
        self.rows.push(spawned.row);
        self.tiles.extend(spawned.tiles);
    }

    /// Drop every row and tile
    pub fn clear(&mut self) {
        self.rows.clear();
        self.tiles.clear();
    }

    /// Highest spawn y currently tracked
    pub fn furthest_spawn_y(&self) -> Option<f32> {
        self.rows.iter().map(|r| r.spawn_y).reduce(f32::max)
    }

    /// Row at or above `player_y` closest to the player
    pub fn nearest_upcoming_row(&self, player_y: f32) -> Option<&Row> {
        self.rows
            .iter()
            .filter(|r| r.spawn_y >= player_y)
            .min_by(|a, b| a.spawn_y.total_cmp(&b.spawn_y))
    }

    /// Distance from the player up to the next row, if any
    pub fn distance_to_next_row(&self, player_y: f32) -> Option<f32> {
        self.nearest_upcoming_row(player_y).map(|r| r.spawn_y - player_y)
    }

    /// Tracked tile whose y is closest to `y`
    pub fn nearest_tile_to(&self, y: f32) -> Option<&Tile> {
        self.tiles
            .iter()
            .min_by(|a, b| (a.pos.y - y).abs().total_cmp(&(b.pos.y - y).abs()))
    }

    /// Disable collision on every tile within `threshold` of `ref_y`
    ///
    /// Returns how many tiles were switched off by this call.
    pub fn deactivate_cluster(&mut self, ref_y: f32, threshold: f32) -> usize {
        let mut count = 0;
        for tile in self.tiles.iter_mut() {
            if (tile.pos.y - ref_y).abs() <= threshold {
                if tile.active {
                    count += 1;
                }
                tile.active = false;
                tile.passed = true;
            }
        }
        count
    }

    /// Flag a row as cleared; false if unknown or already cleared
    pub fn mark_cleared(&mut self, row_id: RowId) -> bool {
        match self.rows.iter_mut().find(|r| r.id == row_id) {
            Some(row) if !row.cleared => {
                row.cleared = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Remove rows and tiles that fell behind `camera_bottom`
    ///
    /// A row or tile exactly at its cutoff is kept.
    pub fn cull_behind_camera(
        &mut self,
        camera_bottom: f32,
        settings: &Settings,
        events: &mut Vec<GameEvent>,
    ) -> (usize, usize) {
        let tile_cut = camera_bottom - settings.tile_cull_margin;
        let before = self.tiles.len();
        self.tiles.retain(|t| {
            let keep = t.pos.y >= tile_cut;
            if !keep {
                events.push(GameEvent::TileCulled { tile_id: t.id });
            }
            keep
        });
        let tiles_culled = before - self.tiles.len();

        let row_cut = camera_bottom - settings.row_cull_margin;
        let before = self.rows.len();
        self.rows.retain(|r| {
            let keep = r.spawn_y >= row_cut;
            if !keep {
                events.push(GameEvent::RowCulled { row_id: r.id });
            }
            keep
        });
        let rows_culled = before - self.rows.len();

        if rows_culled + tiles_culled > 0 {
            log::debug!("Culled {rows_culled} rows, {tiles_culled} tiles below y={camera_bottom:.2}");
        }
        (rows_culled, tiles_culled)
    }
}

/// Draw a question and place a new row at the spawn cursor
pub fn spawn_next_row(state: &mut GameState) -> Result<RowId> {
    let question = state.bank.random(&mut state.rng)?;
    let row_id = state.next_entity_id();
    let tile_ids = [
        state.next_entity_id(),
        state.next_entity_id(),
        state.next_entity_id(),
    ];
    let spawn_y = state.run.next_spawn_y;
    let spawned = spawn_row(question, spawn_y, row_id, tile_ids, &state.settings, &mut state.rng);

    log::debug!("Row {row_id} '{}' at y={spawn_y:.2}", spawned.row.question.prompt);
    state.events.push(GameEvent::RowSpawned {
        row_id,
        spawn_y,
        prompt: spawned.row.question.prompt.clone(),
    });
    state.tracker.insert(spawned);
    state.run.next_spawn_y += state.settings.spawn_gap_y;
    Ok(row_id)
}

/// Spawn rows until the cursor is past the camera top plus lookahead
pub fn ensure_rows_ahead(state: &mut GameState) -> Result<usize> {
    let horizon = state.camera_top() + state.settings.spawn_lookahead_margin;
    let mut spawned = 0;
    while state.run.next_spawn_y < horizon {
        spawn_next_row(state)?;
        spawned += 1;
    }
    Ok(spawned)
}
