//! Session result to XP conversion and result-screen text
//!
//! Storing or displaying XP is the host's business; this module only
//! computes the number and the strings.

use crate::settings::RewardConfig;
use crate::sim::{GameMode, GameResult};

/// Flat warm-up award, independent of performance
pub fn calculate_warmup_xp(config: &RewardConfig) -> u32 {
    config.warmup_xp
}

/// Saturating challenge award: `cap * (1 - e^(-score/scale))`, never above `cap`
pub fn calculate_challenge_xp(score: u64, config: &RewardConfig) -> u32 {
    let cap = config.challenge_xp_cap;
    let scale = config.challenge_xp_scale.max(f64::MIN_POSITIVE);
    let fraction = 1.0 - (-(score as f64) / scale).exp();
    let xp = (cap as f64 * fraction).floor();
    (xp.max(0.0) as u32).min(cap)
}

pub fn calculate_xp(mode: GameMode, score: u64, config: &RewardConfig) -> u32 {
    match mode {
        GameMode::Warmup => calculate_warmup_xp(config),
        GameMode::Challenge => calculate_challenge_xp(score, config),
    }
}

/// Thousands-separated score ("12,345")
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `m:ss` for durations under an hour, `h:mm:ss` beyond
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Result-screen encouragement, picked from the shape of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    WarmupStarted,
    WarmupSharp,
    WarmupSteady,
    ChallengeFirstSteps,
    ChallengeStreak,
    ChallengePrecise,
    ChallengeEndurance,
    ChallengeSteady,
}

impl Feedback {
    pub fn classify(result: &GameResult) -> Self {
        let accuracy = result.accuracy();
        match result.mode {
            GameMode::Warmup => {
                if result.total_taps() == 0 {
                    Feedback::WarmupStarted
                } else if accuracy >= 0.9 {
                    Feedback::WarmupSharp
                } else {
                    Feedback::WarmupSteady
                }
            }
            GameMode::Challenge => {
                if result.correct_taps == 0 {
                    Feedback::ChallengeFirstSteps
                } else if result.max_combo >= 20 {
                    Feedback::ChallengeStreak
                } else if accuracy >= 0.8 && result.correct_taps >= 10 {
                    Feedback::ChallengePrecise
                } else if result.max_difficulty >= 5 {
                    Feedback::ChallengeEndurance
                } else {
                    Feedback::ChallengeSteady
                }
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::WarmupStarted => "Nice warm-up! Every session builds your focus.",
            Feedback::WarmupSharp => "Sharp focus! Your warm-up was spot on.",
            Feedback::WarmupSteady => "Great warm-up! You're getting in the zone.",
            Feedback::ChallengeFirstSteps => {
                "Thanks for playing! Every round sharpens your attention."
            }
            Feedback::ChallengeStreak => "Incredible streak! Your focus is on fire.",
            Feedback::ChallengePrecise => "Excellent precision! Keep that momentum going.",
            Feedback::ChallengeEndurance => {
                "Impressive endurance! You kept up as the pace picked up."
            }
            Feedback::ChallengeSteady => "Good effort! Your focus grows with every round.",
        }
    }
}

pub fn generate_feedback_message(result: &GameResult) -> &'static str {
    Feedback::classify(result).message()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(mode: GameMode, correct: u32, wrong: u32) -> GameResult {
        GameResult {
            mode,
            score: 0,
            correct_taps: correct,
            wrong_taps: wrong,
            duration_ms: 60_000,
            max_combo: 0,
            max_difficulty: 0,
            xp_awarded: 0,
        }
    }

    #[test]
    fn test_warmup_xp_is_flat() {
        let config = RewardConfig::default();
        assert_eq!(calculate_warmup_xp(&config), 20);
        assert_eq!(calculate_xp(GameMode::Warmup, 0, &config), 20);
        assert_eq!(calculate_xp(GameMode::Warmup, 1_000_000, &config), 20);
    }

    #[test]
    fn test_challenge_xp_bounded_and_monotonic() {
        let config = RewardConfig::default();
        assert_eq!(calculate_challenge_xp(0, &config), 0);
        let mut prev = 0;
        for score in (0..50_000).step_by(37) {
            let xp = calculate_challenge_xp(score, &config);
            assert!(xp >= prev);
            assert!(xp <= 50);
            prev = xp;
        }
        assert_eq!(calculate_challenge_xp(u64::MAX, &config), 50);
    }

    #[test]
    fn test_challenge_xp_diminishing_returns() {
        let config = RewardConfig::default();
        let early = calculate_challenge_xp(1000, &config) - calculate_challenge_xp(0, &config);
        let late = calculate_challenge_xp(6000, &config) - calculate_challenge_xp(5000, &config);
        assert!(early > late);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5_400), "0:05");
        assert_eq!(format_duration(60_000), "1:00");
        assert_eq!(format_duration(125_000), "2:05");
        assert_eq!(format_duration(3_725_000), "1:02:05");
    }

    #[test]
    fn test_feedback_selection() {
        assert_eq!(
            Feedback::classify(&result(GameMode::Warmup, 0, 0)),
            Feedback::WarmupStarted
        );
        assert_eq!(
            Feedback::classify(&result(GameMode::Warmup, 19, 1)),
            Feedback::WarmupSharp
        );
        assert_eq!(
            Feedback::classify(&result(GameMode::Warmup, 5, 5)),
            Feedback::WarmupSteady
        );
        assert_eq!(
            Feedback::classify(&result(GameMode::Challenge, 0, 3)),
            Feedback::ChallengeFirstSteps
        );

        let mut streak = result(GameMode::Challenge, 30, 2);
        streak.max_combo = 25;
        assert_eq!(Feedback::classify(&streak), Feedback::ChallengeStreak);

        assert_eq!(
            Feedback::classify(&result(GameMode::Challenge, 12, 1)),
            Feedback::ChallengePrecise
        );

        let mut endurance = result(GameMode::Challenge, 6, 6);
        endurance.max_difficulty = 7;
        assert_eq!(Feedback::classify(&endurance), Feedback::ChallengeEndurance);

        assert_eq!(
            Feedback::classify(&result(GameMode::Challenge, 3, 3)),
            Feedback::ChallengeSteady
        );
    }

    #[test]
    fn test_feedback_is_never_empty() {
        let r = result(GameMode::Challenge, 1, 9);
        assert!(!generate_feedback_message(&r).is_empty());
    }
}
