//! Session-wide invariants checked against bot-driven play

use focus_tap::EngineConfig;
use focus_tap::rewards::calculate_challenge_xp;
use focus_tap::settings::RewardConfig;
use focus_tap::sim::{
    AutoPlayer, Clock, FocusTapSession, GameMode, GamePhase, ManualClock, TapOutcome,
    get_max_dots_on_screen,
};
use proptest::prelude::*;

/// Play `ticks` ticks, checking invariants after every tick and tap
fn play_and_check(mode: GameMode, seed: u64, accuracy: f64, reaction_ms: u64, ticks: u32) {
    let config = EngineConfig::default();
    let clock = ManualClock::new(1_000);
    let mut session = FocusTapSession::new(config.clone(), clock.clone(), seed);
    let mut bot = AutoPlayer::new(accuracy, reaction_ms, seed.rotate_left(17));
    session.start_game(mode);

    let mut last_score = 0;
    let mut last_level = 0;
    let mut seen_max_combo = 0;
    let mut seen_max_level = 0;

    for _ in 0..ticks {
        let ended = session.pump();
        let now = clock.now_ms();

        if let Some(intent) = bot.choose_tap(session.state(), now) {
            let combo_before = session.state().combo;
            match session.handle_dot_tap(intent.dot_id, intent.color_id) {
                Some(TapOutcome::Correct { combo, .. }) => {
                    assert_eq!(combo, combo_before + 1);
                    assert_eq!(session.state().combo, combo_before + 1);
                }
                Some(TapOutcome::Wrong { lost_combo }) => {
                    assert_eq!(lost_combo, combo_before);
                    assert_eq!(session.state().combo, 0);
                }
                None => unreachable!("bot only taps live dots of a running session"),
            }
            assert!(session.state().find_dot(intent.dot_id).is_none());
        }

        let state = session.state();
        assert!(state.score >= last_score);
        assert!(state.difficulty_level >= last_level);
        seen_max_combo = seen_max_combo.max(state.combo);
        seen_max_level = seen_max_level.max(state.difficulty_level);
        assert_eq!(state.max_combo, seen_max_combo);
        assert_eq!(state.max_difficulty, seen_max_level);
        assert!(
            state.dots.len() <= get_max_dots_on_screen(state.difficulty_level, &config.difficulty)
        );
        for dot in &state.dots {
            let life = dot.life_percentage(now);
            assert!((0.0..=1.0).contains(&life));
        }
        let mut ids: Vec<u32> = state.dots.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.dots.len());

        last_score = state.score;
        last_level = state.difficulty_level;

        if let Some(result) = ended {
            assert_eq!(mode, GameMode::Warmup);
            assert_eq!(result.xp_awarded, 20);
            assert_eq!(state.phase, GamePhase::Ended);
            return;
        }
        clock.advance(config.tick_interval_ms);
    }

    let result = session.end_game();
    if mode == GameMode::Challenge {
        let result = result.expect("challenge only ends on request");
        assert!(result.xp_awarded <= 50);
        assert_eq!(result.max_combo, seen_max_combo);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn challenge_invariants_hold(
        seed in any::<u64>(),
        accuracy in 0.0f64..=1.0,
        reaction_ms in 0u64..1500,
    ) {
        play_and_check(GameMode::Challenge, seed, accuracy, reaction_ms, 1_200);
    }

    #[test]
    fn warmup_invariants_hold(
        seed in any::<u64>(),
        accuracy in 0.0f64..=1.0,
        reaction_ms in 0u64..1500,
    ) {
        play_and_check(GameMode::Warmup, seed, accuracy, reaction_ms, 700);
    }

    #[test]
    fn challenge_xp_is_bounded_and_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let config = RewardConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let xp_lo = calculate_challenge_xp(lo, &config);
        let xp_hi = calculate_challenge_xp(hi, &config);
        prop_assert!(xp_hi <= 50);
        prop_assert!(xp_lo <= xp_hi);
    }
}

#[test]
fn warmup_xp_ignores_performance() {
    for accuracy in [0.0, 0.5, 1.0] {
        let clock = ManualClock::new(0);
        let mut session = FocusTapSession::new(EngineConfig::default(), clock.clone(), 7);
        let mut bot = AutoPlayer::new(accuracy, 200, 7);
        session.start_game(GameMode::Warmup);
        let result = loop {
            if let Some(result) = session.pump() {
                break result;
            }
            if let Some(intent) = bot.choose_tap(session.state(), clock.now_ms()) {
                session.handle_dot_tap(intent.dot_id, intent.color_id);
            }
            clock.advance(100);
        };
        assert_eq!(result.xp_awarded, 20);
        assert_eq!(result.duration_ms, 60_000);
    }
}
