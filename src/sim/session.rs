//! Session controller
//!
//! Owns one `GameState`, the tick schedule that drives it and the clock the
//! schedule reads. State machine:
//!
//! ```text
//! Idle -> Running -> Ended
//! ```
//!
//! `start_game` may be called in any phase and always builds a fresh state.
//! Nothing moves the session from `Ended` back to `Running`.
//!
//! ## Usage
//!
//! ```
//! use focus_tap::{EngineConfig, FocusTapSession, GameMode, ManualClock};
//!
//! let clock = ManualClock::new(0);
//! let mut session = FocusTapSession::new(EngineConfig::default(), clock.clone(), 42);
//! session.start_game(GameMode::Warmup);
//! // In the host loop:
//! clock.advance(100);
//! session.pump();
//! ```

use super::clock::{Clock, MonotonicClock, TickSchedule};
use super::dots::remove_dot;
use super::scoring::{TapOutcome, apply_tap};
use super::state::{EndReason, GameEvent, GameMode, GamePhase, GameResult, GameState};
use super::tick::{finish, sync_time, tick};
use crate::palette::{ColorId, random_color};
use crate::settings::EngineConfig;

/// Golden-ratio hash step for deriving per-session seeds
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// One player's Focus Tap sessions, played back to back
#[derive(Debug)]
pub struct FocusTapSession<C: Clock = MonotonicClock> {
    config: EngineConfig,
    clock: C,
    base_seed: u64,
    sessions_started: u64,
    state: GameState,
    /// `None` whenever the session is not running
    schedule: Option<TickSchedule>,
    result: Option<GameResult>,
}

impl FocusTapSession<MonotonicClock> {
    /// Session driven by real time
    pub fn realtime(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, MonotonicClock::new(), seed)
    }
}

impl<C: Clock> FocusTapSession<C> {
    pub fn new(config: EngineConfig, clock: C, seed: u64) -> Self {
        Self {
            config,
            clock,
            base_seed: seed,
            sessions_started: 0,
            state: GameState::idle(),
            schedule: None,
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state for a renderer on another frame
    ///
    /// Pending events stay queued here; see `drain_events`.
    pub fn snapshot(&self) -> GameState {
        self.state.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether a tick schedule is live
    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Result of the most recently finished session
    pub fn last_result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Take all pending events, oldest first
    ///
    /// The queue is bounded; a host that never drains it only loses the
    /// oldest events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new session from a clean slate
    ///
    /// Any running session is discarded without a result and its schedule
    /// cancelled.
    pub fn start_game(&mut self, mode: GameMode) -> &GameState {
        if self.state.is_running() {
            log::warn!(
                "Restarting while a {} session is running; discarding it",
                self.state.mode.as_str()
            );
        }
        self.schedule = None;

        let now = self.clock.now_ms();
        let seed = self
            .base_seed
            .wrapping_add(self.sessions_started.wrapping_mul(SEED_STEP));
        self.sessions_started += 1;

        let mut state = GameState::new(mode, seed, now, ColorId(0));
        state.target_color = random_color(&mut state.rng);
        state.time_remaining_ms = match mode {
            GameMode::Warmup => self.config.warmup_duration_ms,
            GameMode::Challenge => 0,
        };
        state.phase = GamePhase::Running;
        state.push_event(GameEvent::SessionStarted {
            mode,
            target: state.target_color,
        });

        log::info!(
            "Started {} session (seed={}, target={})",
            mode.as_str(),
            seed,
            state.target().map(|c| c.name).unwrap_or("?")
        );

        self.state = state;
        self.result = None;
        self.schedule = Some(TickSchedule::new(
            now,
            self.config.tick_interval_ms,
            self.config.max_catchup_ticks,
        ));
        &self.state
    }

    /// Score a tap on `dot_id`
    ///
    /// Ticks already due are run first, so a tap that arrives after the
    /// warm-up ran out or after the dot's lifespan is ignored (returns
    /// `None`). The dot's own color decides correctness; `color_id` is what
    /// the host believes it drew and is only checked for consistency.
    pub fn handle_dot_tap(&mut self, dot_id: u32, color_id: ColorId) -> Option<TapOutcome> {
        self.pump();
        if !self.state.is_running() {
            log::debug!("Ignoring tap on dot {} while {:?}", dot_id, self.state.phase);
            return None;
        }
        let Some(dot) = self.state.find_dot(dot_id).cloned() else {
            log::debug!("Ignoring tap on missing dot {}", dot_id);
            return None;
        };
        if dot.is_expired(self.clock.now_ms()) {
            log::debug!("Ignoring tap on expired dot {}", dot_id);
            return None;
        }
        if dot.color_id != color_id {
            log::debug!(
                "Tap on dot {} reported color {:?}, dot is {:?}",
                dot_id,
                color_id,
                dot.color_id
            );
        }

        let outcome = apply_tap(&mut self.state, &dot, &self.config.scoring);
        remove_dot(&mut self.state, dot_id);
        log::debug!("Tap on dot {} -> {:?} (score={})", dot_id, outcome, self.state.score);
        Some(outcome)
    }

    /// Stop the running session and freeze its result
    ///
    /// Returns `None` when nothing is running, including a second call after
    /// the session already ended; the stored result is never touched then.
    pub fn end_game(&mut self) -> Option<GameResult> {
        if !self.state.is_running() {
            return None;
        }
        self.schedule = None;
        let now = self.clock.now_ms();
        sync_time(&mut self.state, now, &self.config);
        let result = finish(&mut self.state, EndReason::Stopped, &self.config);
        self.result = Some(result.clone());
        Some(result)
    }

    /// Run every tick due by the clock's current reading
    ///
    /// Returns the result if a warm-up ran out during these ticks.
    pub fn pump(&mut self) -> Option<GameResult> {
        let now = self.clock.now_ms();
        self.advance_to(now)
    }

    /// Run every tick due by `now_ms` (a reading from this session's clock)
    pub fn advance_to(&mut self, now_ms: u64) -> Option<GameResult> {
        let due = self.schedule.as_mut()?.due(now_ms);
        for at in due {
            if let Some(result) = tick(&mut self.state, at, &self.config) {
                self.schedule = None;
                self.result = Some(result.clone());
                return Some(result);
            }
        }
        None
    }
}
