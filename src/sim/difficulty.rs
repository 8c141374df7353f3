//! Difficulty curve
//!
//! A single integer level drives spawn cadence, dot lifespan and the
//! on-screen cap. Every curve saturates so arbitrarily high levels stay
//! playable.

use super::state::GameMode;
use crate::settings::DifficultyConfig;

/// Level for `elapsed_ms` of play
///
/// Challenge climbs one level per `level_duration_ms` survived; warm-up is
/// pinned at 0 for its whole duration.
pub fn calculate_difficulty_level(
    mode: GameMode,
    elapsed_ms: u64,
    config: &DifficultyConfig,
) -> u32 {
    match mode {
        GameMode::Warmup => 0,
        GameMode::Challenge => {
            let level = elapsed_ms / config.level_duration_ms.max(1);
            level.min(u32::MAX as u64) as u32
        }
    }
}

/// Minimum time between spawns at `level`
pub fn get_spawn_interval(level: u32, config: &DifficultyConfig) -> u64 {
    config.spawn_interval.at(level)
}

/// How long a dot spawned at `level` stays tappable
pub fn get_dot_lifespan(level: u32, config: &DifficultyConfig) -> u64 {
    config.dot_lifespan.at(level)
}

/// Concurrent dot cap at `level`
pub fn get_max_dots_on_screen(level: u32, config: &DifficultyConfig) -> usize {
    let extra = (level / config.max_dots_level_step.max(1)) as usize;
    config
        .max_dots_base
        .saturating_add(extra)
        .min(config.max_dots_cap)
}
