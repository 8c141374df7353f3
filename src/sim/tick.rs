//! Fixed-cadence simulation tick
//!
//! Advances a running session to `now_ms`. Per-tick order is fixed:
//! expiry, target rotation, spawn check, then time/difficulty bookkeeping,
//! so the on-screen cap is always checked against the post-expiry set.

use super::difficulty::calculate_difficulty_level;
use super::dots::{remove_expired_dots, should_spawn_dot, spawn_dot};
use super::state::{EndReason, GameEvent, GameMode, GamePhase, GameResult, GameState};
use super::target::{rotate_target, should_rotate_target};
use crate::rewards::calculate_xp;
use crate::settings::EngineConfig;

/// Advance the session by one tick at `now_ms`
///
/// Returns the frozen result on the tick that ends a warm-up. Does nothing
/// unless the session is running.
pub fn tick(state: &mut GameState, now_ms: u64, config: &EngineConfig) -> Option<GameResult> {
    if state.phase != GamePhase::Running {
        return None;
    }

    let raw_elapsed = now_ms.saturating_sub(state.started_at_ms);
    let countdown_done =
        state.mode == GameMode::Warmup && raw_elapsed >= config.warmup_duration_ms;

    remove_expired_dots(state, now_ms);

    if should_rotate_target(state, now_ms, config) {
        rotate_target(state, now_ms);
    }

    // No new dots once the countdown has run out
    if !countdown_done && should_spawn_dot(state, now_ms, config) {
        spawn_dot(state, now_ms, config);
    }

    update_clock(state, raw_elapsed, config);
    update_difficulty(state, config);

    if countdown_done {
        return Some(finish(state, EndReason::TimeUp, config));
    }
    None
}

/// Freeze the session into a result and mark it ended
///
/// Callers must check the session is running first.
pub(crate) fn finish(
    state: &mut GameState,
    reason: EndReason,
    config: &EngineConfig,
) -> GameResult {
    state.update_high_water_marks();
    let xp = calculate_xp(state.mode, state.score, &config.rewards);
    let result = state.freeze(xp);
    state.phase = GamePhase::Ended;
    state.push_event(GameEvent::SessionEnded { reason });
    log::info!(
        "Session ended ({:?}): mode={} score={} correct={} wrong={} combo={} level={} xp={}",
        reason,
        result.mode.as_str(),
        result.score,
        result.correct_taps,
        result.wrong_taps,
        result.max_combo,
        result.max_difficulty,
        result.xp_awarded
    );
    result
}

/// Bring elapsed/remaining time and difficulty up to `now_ms` without
/// touching dots (used when the host stops a session between ticks)
pub(crate) fn sync_time(state: &mut GameState, now_ms: u64, config: &EngineConfig) {
    let raw_elapsed = now_ms.saturating_sub(state.started_at_ms);
    update_clock(state, raw_elapsed, config);
    update_difficulty(state, config);
}

fn update_clock(state: &mut GameState, raw_elapsed: u64, config: &EngineConfig) {
    match state.mode {
        GameMode::Warmup => {
            let elapsed = raw_elapsed.min(config.warmup_duration_ms);
            state.elapsed_ms = state.elapsed_ms.max(elapsed);
            state.time_remaining_ms = config.warmup_duration_ms - state.elapsed_ms;
        }
        GameMode::Challenge => {
            state.elapsed_ms = state.elapsed_ms.max(raw_elapsed);
            state.time_remaining_ms = 0;
        }
    }
}

fn update_difficulty(state: &mut GameState, config: &EngineConfig) {
    let level = calculate_difficulty_level(state.mode, state.elapsed_ms, &config.difficulty);
    if level > state.difficulty_level {
        state.difficulty_level = level;
        state.push_event(GameEvent::LevelUp { level });
        log::info!("Difficulty level {} at {:.1}s", level, state.elapsed_secs());
    }
    state.update_high_water_marks();
}
