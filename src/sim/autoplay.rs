//! Simple bot that plays a session
//!
//! Used by the demo binary and by tests that need a realistic stream of
//! taps. It reacts to the oldest target-colored dot once that dot has been
//! visible for `reaction_ms`, and fumbles onto another dot with probability
//! `1 - accuracy`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameState;
use crate::palette::ColorId;

/// A tap the bot wants to make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapIntent {
    pub dot_id: u32,
    pub color_id: ColorId,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Chance of tapping the intended target dot (0-1)
    pub accuracy: f64,
    /// How long a dot must be on screen before the bot reacts
    pub reaction_ms: u64,
    rng: Pcg32,
}

impl AutoPlayer {
    pub fn new(accuracy: f64, reaction_ms: u64, seed: u64) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction_ms,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Decide what to tap at `now_ms`, if anything
    pub fn choose_tap(&mut self, state: &GameState, now_ms: u64) -> Option<TapIntent> {
        if !state.is_running() {
            return None;
        }

        let noticed = |spawn: u64| now_ms.saturating_sub(spawn) >= self.reaction_ms;
        let target = state
            .dots
            .iter()
            .find(|d| d.color_id == state.target_color && noticed(d.spawn_time_ms))?;

        if !self.rng.random_bool(self.accuracy) {
            let distractors: Vec<_> = state
                .dots
                .iter()
                .filter(|d| d.color_id != state.target_color)
                .collect();
            if !distractors.is_empty() {
                let slip = distractors[self.rng.random_range(0..distractors.len())];
                return Some(TapIntent {
                    dot_id: slip.id,
                    color_id: slip.color_id,
                });
            }
        }

        Some(TapIntent {
            dot_id: target.id,
            color_id: target.color_id,
        })
    }
}
