//! Gameplay settings
//!
//! Every tunable of the scroller lives here. Loaded from JSON with
//! `#[serde(default)]` so a partial file only overrides what it names.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Game settings (speed ramp, assists, spawning, camera framing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Speed / difficulty ===
    /// Scroll speed at the start of a run (units/s)
    pub base_scroll_speed: f32,
    /// Scroll speed once fully ramped
    pub max_scroll_speed: f32,
    /// Seconds to ramp from base to max
    pub time_to_max_speed: f32,
    /// Lateral keyboard speed (units/s)
    pub move_speed: f32,
    /// Horizontal movement bound (player x in [-w, w])
    pub lane_half_width: f32,

    // === Assists ===
    /// Slow down automatically when the next row is close
    pub auto_slow_near_row: bool,
    /// Distance to the next row within which auto-slow kicks in
    pub slow_window_y: f32,
    pub slow_multiplier: f32,
    /// Allow the hold-to-slow input
    pub hold_slow_enabled: bool,
    pub hold_slow_multiplier: f32,

    // === Spawning ===
    /// First row distance above the camera center
    pub spawn_start_y: f32,
    /// Vertical gap between rows
    pub spawn_gap_y: f32,
    /// Rows must exist up to this far above the camera top
    pub spawn_lookahead_margin: f32,
    /// Rows spawned up front on start/restart
    pub initial_rows: u32,
    /// Row bookkeeping is dropped this far below the camera bottom
    pub row_cull_margin: f32,
    /// Tiles are dropped this far below the camera bottom
    pub tile_cull_margin: f32,

    // === Sizes ===
    /// Answer tile size (width, height)
    pub option_size: Vec2,
    /// Player hitbox size
    pub player_size: Vec2,

    // === Camera ===
    /// Half of the visible world height (orthographic size)
    pub half_view_height: f32,
    /// Fraction of screen height where the player sits (0 = bottom)
    pub player_screen_y: f32,
    pub camera_y_offset: f32,

    /// Run seed for the question draw and lane shuffles
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_scroll_speed: 3.0,
            max_scroll_speed: 7.0,
            time_to_max_speed: 120.0,
            move_speed: 9.0,
            lane_half_width: 2.5,

            auto_slow_near_row: true,
            slow_window_y: 4.0,
            slow_multiplier: 0.55,
            hold_slow_enabled: true,
            hold_slow_multiplier: 0.4,

            spawn_start_y: 8.0,
            spawn_gap_y: 8.0,
            spawn_lookahead_margin: 30.0,
            initial_rows: 6,
            row_cull_margin: 5.0,
            tile_cull_margin: 20.0,

            option_size: Vec2::new(2.4, 1.2),
            player_size: Vec2::new(0.9, 1.2),

            half_view_height: 6.0,
            player_screen_y: 0.2,
            camera_y_offset: 0.0,

            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("base_scroll_speed", self.base_scroll_speed),
            ("max_scroll_speed", self.max_scroll_speed),
            ("move_speed", self.move_speed),
            ("lane_half_width", self.lane_half_width),
            ("spawn_gap_y", self.spawn_gap_y),
            ("half_view_height", self.half_view_height),
            ("option_size.x", self.option_size.x),
            ("option_size.y", self.option_size.y),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                log::warn!("Rejected setting {name} = {value}");
                return Err(GameError::config(format!("{name} must be positive, got {value}")));
            }
        }

        let multipliers = [
            ("slow_multiplier", self.slow_multiplier),
            ("hold_slow_multiplier", self.hold_slow_multiplier),
        ];
        for (name, value) in multipliers {
            if !(value > 0.0 && value <= 1.0) {
                log::warn!("Rejected setting {name} = {value}");
                return Err(GameError::config(format!("{name} must be in (0, 1], got {value}")));
            }
        }

        if !(self.player_screen_y > 0.0 && self.player_screen_y < 1.0) {
            return Err(GameError::config(format!(
                "player_screen_y must be in (0, 1), got {}",
                self.player_screen_y
            )));
        }
        if self.tile_cull_margin < 0.0 || self.row_cull_margin < 0.0 {
            return Err(GameError::config("cull margins must not be negative"));
        }
        Ok(())
    }

    /// Y distance within which tiles count as the same row
    pub fn row_cluster_threshold(&self) -> f32 {
        (self.option_size.y * 0.65).max(0.5)
    }

    /// World x of a lane (-1, 0, 1)
    #[inline]
    pub fn lane_x(&self, lane: i8) -> f32 {
        lane as f32 * self.lane_half_width * 0.8
    }

    /// Camera y that keeps the player at `player_screen_y` of the view
    #[inline]
    pub fn camera_y_for(&self, player_y: f32) -> f32 {
        player_y - (self.player_screen_y * 2.0 - 1.0) * self.half_view_height - self.camera_y_offset
    }
}
