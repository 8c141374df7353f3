//! Tap scoring and combo tracking
//!
//! A correct tap grows the combo and scores `base * (1 + combo * step)` using
//! the combo *before* the tap. A wrong tap resets the combo and scores
//! nothing; it never ends the session. Score has no ceiling.

use serde::{Deserialize, Serialize};

use super::state::{Dot, GameEvent, GameState};
use crate::settings::ScoringConfig;

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum TapOutcome {
    Correct { points: u64, combo: u32 },
    Wrong { lost_combo: u32 },
}

impl TapOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, TapOutcome::Correct { .. })
    }
}

/// Points for a correct tap at the given (pre-tap) combo and level
pub fn calculate_tap_score(combo: u32, difficulty_level: u32, config: &ScoringConfig) -> u64 {
    let base = config.base_tap_score as u64
        + config.level_score_bonus as u64 * difficulty_level as u64;
    let multiplier = 1.0 + combo as f64 * config.combo_multiplier_step;
    (base as f64 * multiplier).round() as u64
}

/// Apply the scoring rules for a tap on `dot`
///
/// Does not remove the dot; the caller owns the dot lifecycle.
pub fn apply_tap(state: &mut GameState, dot: &Dot, config: &ScoringConfig) -> TapOutcome {
    let outcome = if dot.color_id == state.target_color {
        let points = calculate_tap_score(state.combo, state.difficulty_level, config);
        state.combo += 1;
        state.correct_taps += 1;
        state.score = state.score.saturating_add(points);
        state.push_event(GameEvent::CorrectTap {
            dot_id: dot.id,
            points,
            combo: state.combo,
        });
        TapOutcome::Correct {
            points,
            combo: state.combo,
        }
    } else {
        let lost_combo = state.combo;
        state.combo = 0;
        state.wrong_taps += 1;
        state.push_event(GameEvent::WrongTap {
            dot_id: dot.id,
            lost_combo,
        });
        TapOutcome::Wrong { lost_combo }
    };

    state.update_high_water_marks();
    outcome
}
