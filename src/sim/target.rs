//! Target color rotation
//!
//! The target changes on a fixed wall-clock cadence, never in response to
//! taps or spawns.

use super::state::{GameEvent, GameState};
use crate::palette::{Color, PALETTE, get_color_by_id, random_color_except};
use crate::settings::EngineConfig;

/// Pick a palette color different from the current target
pub fn select_target_color(state: &mut GameState) -> &'static Color {
    let next = random_color_except(&mut state.rng, state.target_color);
    // random_color_except only yields palette ids
    get_color_by_id(next).unwrap_or(&PALETTE[0])
}

/// True once the current target has been shown for a full rotation period
pub fn should_rotate_target(state: &GameState, now_ms: u64, config: &EngineConfig) -> bool {
    now_ms.saturating_sub(state.target_changed_at_ms) >= config.dots.target_rotation_ms
}

/// Switch to a new target color and record when it happened
pub fn rotate_target(state: &mut GameState, now_ms: u64) -> &'static Color {
    let color = select_target_color(state);
    state.target_color = color.id;
    state.target_changed_at_ms = now_ms;
    state.push_event(GameEvent::TargetChanged { target: color.id });
    log::debug!("Target color -> {}", color.name);
    color
}
