//! Dot lifecycle: spawning, expiry and removal
//!
//! Expiry is neutral. A dot that times out never touches score, combo or
//! the tap counters; only explicit taps do.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{get_dot_lifespan, get_max_dots_on_screen, get_spawn_interval};
use super::state::{Dot, GameEvent, GameState};
use crate::palette::{ColorId, random_color};
use crate::settings::EngineConfig;

/// True when the spawn interval has elapsed and the cap leaves room
///
/// A session with no spawns yet is always due.
pub fn should_spawn_dot(state: &GameState, now_ms: u64, config: &EngineConfig) -> bool {
    let level = state.difficulty_level;
    if state.dots.len() >= get_max_dots_on_screen(level, &config.difficulty) {
        return false;
    }
    match state.last_spawn_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= get_spawn_interval(level, &config.difficulty),
    }
}

/// Create a dot, append it to the live set and return a copy
pub fn spawn_dot(state: &mut GameState, now_ms: u64, config: &EngineConfig) -> Dot {
    let color_id = pick_spawn_color(state, config);
    let size = pick_size(state, config);
    let pos = pick_position(state, size, config);

    let dot = Dot {
        id: state.next_dot_id(),
        color_id,
        pos,
        size,
        spawn_time_ms: now_ms,
        lifespan_ms: get_dot_lifespan(state.difficulty_level, &config.difficulty),
    };

    log::debug!(
        "Spawned dot {} color={:?} at ({:.2}, {:.2}) lifespan={}ms",
        dot.id,
        dot.color_id,
        dot.pos.x,
        dot.pos.y,
        dot.lifespan_ms
    );

    state.dots.push(dot.clone());
    state.last_spawn_ms = Some(now_ms);
    state.push_event(GameEvent::DotSpawned {
        dot_id: dot.id,
        color_id: dot.color_id,
    });
    dot
}

/// Remove one dot by id, returning it if it was live
pub fn remove_dot(state: &mut GameState, dot_id: u32) -> Option<Dot> {
    let index = state.dots.iter().position(|d| d.id == dot_id)?;
    // `remove` (not `swap_remove`) keeps spawn order
    Some(state.dots.remove(index))
}

/// Purge every dot whose lifespan has run out; returns how many were removed
pub fn remove_expired_dots(state: &mut GameState, now_ms: u64) -> usize {
    let mut expired = Vec::new();
    state.dots.retain(|d| {
        if d.is_expired(now_ms) {
            expired.push(d.id);
            false
        } else {
            true
        }
    });

    for &dot_id in &expired {
        state.push_event(GameEvent::DotExpired { dot_id });
    }
    if !expired.is_empty() {
        log::debug!("Expired {} dot(s): {:?}", expired.len(), expired);
    }
    expired.len()
}

/// Color for a new dot
///
/// With no target-colored dot on screen (e.g. right after a rotation) the
/// target is forced with probability `target_spawn_bias`; otherwise colors
/// are uniform over the palette.
fn pick_spawn_color(state: &mut GameState, config: &EngineConfig) -> ColorId {
    let bias = config.dots.target_spawn_bias.clamp(0.0, 1.0);
    if !state.has_target_dot() && state.rng.random_bool(bias) {
        return state.target_color;
    }
    random_color(&mut state.rng)
}

fn pick_size(state: &mut GameState, config: &EngineConfig) -> f32 {
    let (min, max) = (config.dots.size_min, config.dots.size_max);
    if max > min {
        state.rng.random_range(min..=max)
    } else {
        min
    }
}

/// Random in-bounds center, trying to avoid overlapping live dots
fn pick_position(state: &mut GameState, size: f32, config: &EngineConfig) -> Vec2 {
    let half = (size / 2.0).min(0.5);
    let attempts = config.dots.placement_attempts.max(1);

    let mut candidate = Vec2::splat(0.5);
    for _ in 0..attempts {
        candidate = Vec2::new(
            state.rng.random_range(half..=1.0 - half),
            state.rng.random_range(half..=1.0 - half),
        );
        let overlaps = state
            .dots
            .iter()
            .any(|d| d.pos.distance(candidate) < (d.size + size) / 2.0);
        if !overlaps {
            return candidate;
        }
    }
    candidate
}
