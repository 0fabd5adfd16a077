//! Game state and core simulation types
//!
//! Everything a run needs lives in one [`GameState`] context. Initialization
//! and restart share the same reset path.

use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::rows::{RowTracker, ensure_rows_ahead, spawn_next_row};
use crate::error::Result;
use crate::quiz::{CHOICE_COUNT, Question, QuestionBank};
use crate::settings::Settings;

pub type RowId = u32;
pub type TileId = u32;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Scrolling, spawning and answering
    Running,
    /// Wrong answer taken; only restart is accepted
    GameOver,
}

/// The player avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            alive: true,
        }
    }
}

/// A single answer option at a lane/row intersection
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub row_id: RowId,
    /// -1, 0 or 1
    pub lane: i8,
    pub pos: Vec2,
    pub is_correct: bool,
    pub label: String,
    /// Collision enabled
    pub active: bool,
    /// Faded look after the row was cleared (cosmetic only)
    pub passed: bool,
    /// Overlapping the player as of the last contact check
    pub touching: bool,
}

/// One spawned question row
#[derive(Debug, Clone)]
pub struct Row {
    pub id: RowId,
    pub spawn_y: f32,
    pub question: Rc<Question>,
    pub tile_ids: [TileId; CHOICE_COUNT],
    pub cleared: bool,
}

/// Per-run bookkeeping, reset on restart
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Seconds since the run started (speed ramp origin)
    pub elapsed: f32,
    /// Highest player y this run
    pub max_y: f32,
    /// Where the next row will be placed
    pub next_spawn_y: f32,
    /// Quantized y of rows already cleared
    pub cleared_row_keys: HashSet<i32>,
}

impl RunState {
    /// Score shown to the player
    pub fn score(&self) -> u64 {
        (self.max_y * 10.0).floor().max(0.0) as u64
    }
}

/// Discrete notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    RowSpawned { row_id: RowId, spawn_y: f32, prompt: String },
    RowCleared { row_id: RowId },
    TileCulled { tile_id: TileId },
    RowCulled { row_id: RowId },
    ScoreChanged { score: u64 },
    GameOver { score: u64 },
    Restarted,
}

/// Per-tick view of the run for the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub player_pos: Vec2,
    pub camera_y: f32,
    pub score: u64,
    pub speed: f32,
    /// Prompt of the nearest row at or above the player
    pub upcoming_prompt: Option<String>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub bank: QuestionBank,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub camera_y: f32,
    /// Scroll speed applied on the last tick
    pub speed: f32,
    pub run: RunState,
    pub tracker: RowTracker,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New run using the built-in question catalog
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_bank(settings, QuestionBank::default())
    }

    /// New run with a caller-supplied question bank
    pub fn with_bank(settings: Settings, bank: QuestionBank) -> Result<Self> {
        settings.validate()?;
        let rng = Pcg32::seed_from_u64(settings.seed);
        let mut state = Self {
            settings,
            bank,
            rng,
            phase: GamePhase::Running,
            player: Player::default(),
            camera_y: 0.0,
            speed: 0.0,
            run: RunState::default(),
            tracker: RowTracker::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_run()?;
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put player, camera, rows and run bookkeeping back to a fresh start
    pub fn reset_run(&mut self) -> Result<()> {
        self.phase = GamePhase::Running;
        self.player = Player::default();
        self.camera_y = self.settings.camera_y_for(self.player.pos.y);
        self.speed = self.settings.base_scroll_speed;
        self.tracker.clear();

        self.run = RunState {
            next_spawn_y: self.camera_y + self.settings.spawn_start_y,
            ..RunState::default()
        };

        for _ in 0..self.settings.initial_rows {
            spawn_next_row(self)?;
        }
        ensure_rows_ahead(self)?;
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.run.score()
    }

    /// Top edge of the visible world
    pub fn camera_top(&self) -> f32 {
        self.camera_y + self.settings.half_view_height
    }

    /// Bottom edge of the visible world
    pub fn camera_bottom(&self) -> f32 {
        self.camera_y - self.settings.half_view_height
    }

    pub fn frame(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            player_pos: self.player.pos,
            camera_y: self.camera_y,
            score: self.score(),
            speed: self.speed,
            upcoming_prompt: self
                .tracker
                .nearest_upcoming_row(self.player.pos.y)
                .map(|row| row.question.prompt.clone()),
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_seeds_rows() {
        let state = GameState::new(Settings::default()).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert!(state.tracker.rows().len() >= 6);
        assert_eq!(state.tracker.tiles().len(), state.tracker.rows().len() * CHOICE_COUNT);

        // First row sits spawn_start_y above the initial camera
        let first = &state.tracker.rows()[0];
        assert!((first.spawn_y - (3.6 + 8.0)).abs() < 1e-4);
    }

    #[test]
    fn test_rows_spaced_by_gap() {
        let state = GameState::new(Settings::default()).unwrap();
        for pair in state.tracker.rows().windows(2) {
            assert!((pair[1].spawn_y - pair[0].spawn_y - 8.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_score_floor() {
        let run = RunState {
            max_y: 1.29,
            ..RunState::default()
        };
        assert_eq!(run.score(), 12);
    }

    #[test]
    fn test_frame_reports_upcoming_prompt() {
        let state = GameState::new(Settings::default()).unwrap();
        let frame = state.frame();
        let first = &state.tracker.rows()[0];
        assert_eq!(frame.upcoming_prompt.as_deref(), Some(first.question.prompt.as_str()));
        assert_eq!(frame.score, 0);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            spawn_gap_y: 0.0,
            ..Settings::default()
        };
        assert!(GameState::new(settings).is_err());
    }
}
