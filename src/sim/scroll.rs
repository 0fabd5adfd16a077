//! Scroll speed ramp, assists, lateral motion and camera follow

use glam::Vec2;

use super::state::Player;
use crate::settings::Settings;

/// Ramped scroll speed before any assist modifiers
///
/// Linear from `base_scroll_speed` to `max_scroll_speed` over
/// `time_to_max_speed` seconds, clamped at both ends.
pub fn current_speed(elapsed: f32, settings: &Settings) -> f32 {
    let t = (elapsed / settings.time_to_max_speed.max(0.01)).clamp(0.0, 1.0);
    settings.base_scroll_speed + (settings.max_scroll_speed - settings.base_scroll_speed) * t
}

/// Apply auto-slow and hold-slow; both compose multiplicatively
pub fn apply_slow_modifiers(
    speed: f32,
    distance_to_next_row: Option<f32>,
    hold_slow: bool,
    settings: &Settings,
) -> f32 {
    let mut speed = speed;
    if settings.auto_slow_near_row
        && distance_to_next_row.is_some_and(|dy| (0.0..=settings.slow_window_y).contains(&dy))
    {
        speed *= settings.slow_multiplier;
    }
    if settings.hold_slow_enabled && hold_slow {
        speed *= settings.hold_slow_multiplier;
    }
    speed
}

/// Keyboard-axis lateral step, clamped to the lane bounds
pub fn step_lateral(x: f32, axis: i8, dt: f32, settings: &Settings) -> f32 {
    if axis == 0 {
        return x;
    }
    let axis = axis.signum() as f32;
    (x + axis * settings.move_speed * dt).clamp(-settings.lane_half_width, settings.lane_half_width)
}

/// Pointer drag: shift x by a world-space delta, clamped to the lane bounds
pub fn apply_drag(x: f32, delta: f32, settings: &Settings) -> f32 {
    (x + delta).clamp(-settings.lane_half_width, settings.lane_half_width)
}

/// Convert a horizontal pointer delta in screen pixels to world units
///
/// The view is `2 * half_view_height` world units tall, so one pixel spans
/// that height divided by the screen height.
pub fn screen_delta_to_world(delta_px: f32, screen_height_px: f32, settings: &Settings) -> f32 {
    if screen_height_px <= 0.0 {
        return 0.0;
    }
    delta_px * settings.half_view_height * 2.0 / screen_height_px
}

/// Move the player forward at `speed` for `dt` seconds
pub fn advance_player(player: &mut Player, speed: f32, dt: f32) {
    player.vel = Vec2::new(0.0, speed);
    player.pos.y += speed * dt;
}
