//! Game state and core simulation types
//!
//! Everything a renderer needs to draw one frame lives in `GameState`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PENDING_EVENTS;
use crate::palette::{Color, ColorId, get_color_by_id};

/// Session lifecycle: `Idle -> Running -> Ended`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Ticks advance and taps are accepted
    Running,
    /// Terminal; the result is frozen
    Ended,
}

/// Which flavor of session is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Fixed-length, level pinned at 0, flat XP
    #[default]
    Warmup,
    /// Open-ended survival, difficulty ramps with time
    Challenge,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Warmup => "warmup",
            GameMode::Challenge => "challenge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "warmup" | "warm-up" => Some(GameMode::Warmup),
            "challenge" => Some(GameMode::Challenge),
            _ => None,
        }
    }
}

/// A tappable dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// Unique within a session
    pub id: u32,
    pub color_id: ColorId,
    /// Center, normalized to the unit square
    pub pos: Vec2,
    /// Diameter, as a fraction of field width
    pub size: f32,
    pub spawn_time_ms: u64,
    pub lifespan_ms: u64,
}

impl Dot {
    /// Remaining life in [0, 1], for fade-out only
    pub fn life_percentage(&self, now_ms: u64) -> f32 {
        if self.lifespan_ms == 0 {
            return 0.0;
        }
        let age = now_ms.saturating_sub(self.spawn_time_ms) as f64;
        (1.0 - age / self.lifespan_ms as f64).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawn_time_ms) >= self.lifespan_ms
    }

    pub fn color(&self) -> Option<&'static Color> {
        get_color_by_id(self.color_id)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Warm-up countdown reached zero
    TimeUp,
    /// Host called `end_game`
    Stopped,
}

/// Notifications for audio/animation collaborators, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    SessionStarted { mode: GameMode, target: ColorId },
    DotSpawned { dot_id: u32, color_id: ColorId },
    DotExpired { dot_id: u32 },
    TargetChanged { target: ColorId },
    CorrectTap { dot_id: u32, points: u64, combo: u32 },
    WrongTap { dot_id: u32, lost_combo: u32 },
    LevelUp { level: u32 },
    SessionEnded { reason: EndReason },
}

/// Frozen summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub mode: GameMode,
    pub score: u64,
    pub correct_taps: u32,
    pub wrong_taps: u32,
    pub duration_ms: u64,
    pub max_combo: u32,
    pub max_difficulty: u32,
    pub xp_awarded: u32,
}

impl GameResult {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    pub fn total_taps(&self) -> u32 {
        self.correct_taps + self.wrong_taps
    }

    /// Correct taps over all taps (0 when nothing was tapped)
    pub fn accuracy(&self) -> f64 {
        match self.total_taps() {
            0 => 0.0,
            total => self.correct_taps as f64 / total as f64,
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Session seed for reproducibility
    pub seed: u64,
    /// Live dots in spawn order
    pub dots: Vec<Dot>,
    pub target_color: ColorId,
    pub score: u64,
    pub combo: u32,
    pub correct_taps: u32,
    pub wrong_taps: u32,
    pub difficulty_level: u32,
    /// Warm-up countdown (0 in challenge)
    pub time_remaining_ms: u64,
    pub elapsed_ms: u64,
    pub max_combo: u32,
    pub max_difficulty: u32,
    /// Clock reading when the session started
    pub started_at_ms: u64,
    /// Clock reading of the latest spawn (`None` until the first dot)
    pub last_spawn_ms: Option<u64>,
    pub target_changed_at_ms: u64,
    pub rng: Pcg32,
    /// Pending notifications, oldest first (not part of the gameplay snapshot)
    ///
    /// Holds at most `MAX_PENDING_EVENTS`; once full, the oldest is dropped.
    #[serde(skip)]
    pub events: VecDeque<GameEvent>,
    /// Events dropped since the queue was last drained
    #[serde(skip)]
    dropped_events: u64,
    /// Next dot ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::idle()
    }
}

impl GameState {
    /// State before any session has started
    pub fn idle() -> Self {
        Self::new(GameMode::Warmup, 0, 0, ColorId(0))
    }

    /// Fresh state for a session starting at `now_ms`; phase is still `Idle`
    pub fn new(mode: GameMode, seed: u64, now_ms: u64, target_color: ColorId) -> Self {
        Self {
            phase: GamePhase::Idle,
            mode,
            seed,
            dots: Vec::new(),
            target_color,
            score: 0,
            combo: 0,
            correct_taps: 0,
            wrong_taps: 0,
            difficulty_level: 0,
            time_remaining_ms: 0,
            elapsed_ms: 0,
            max_combo: 0,
            max_difficulty: 0,
            started_at_ms: now_ms,
            last_spawn_ms: None,
            target_changed_at_ms: now_ms,
            rng: Pcg32::seed_from_u64(seed),
            events: VecDeque::new(),
            dropped_events: 0,
            next_id: 1,
        }
    }

    /// Allocate a new dot ID
    pub fn next_dot_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn target(&self) -> Option<&'static Color> {
        get_color_by_id(self.target_color)
    }

    pub fn find_dot(&self, dot_id: u32) -> Option<&Dot> {
        self.dots.iter().find(|d| d.id == dot_id)
    }

    pub fn has_target_dot(&self) -> bool {
        self.dots.iter().any(|d| d.color_id == self.target_color)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    pub fn time_remaining_secs(&self) -> f64 {
        self.time_remaining_ms as f64 / 1000.0
    }

    /// Raise the combo/difficulty high-water marks to the live values
    pub fn update_high_water_marks(&mut self) {
        self.max_combo = self.max_combo.max(self.combo);
        self.max_difficulty = self.max_difficulty.max(self.difficulty_level);
    }

    /// Freeze the counters into a result (XP is filled in by the caller)
    pub fn freeze(&self, xp_awarded: u32) -> GameResult {
        GameResult {
            mode: self.mode,
            score: self.score,
            correct_taps: self.correct_taps,
            wrong_taps: self.wrong_taps,
            duration_ms: self.elapsed_ms,
            max_combo: self.max_combo,
            max_difficulty: self.max_difficulty,
            xp_awarded,
        }
    }

    /// Copy of the gameplay fields, leaving the event queue behind
    pub fn snapshot(&self) -> Self {
        Self {
            dots: self.dots.clone(),
            rng: self.rng.clone(),
            events: VecDeque::new(),
            dropped_events: 0,
            ..*self
        }
    }

    /// Events dropped because nobody drained the queue in time
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
            if self.dropped_events == 0 {
                log::warn!(
                    "Event queue full ({} pending); dropping oldest until drained",
                    MAX_PENDING_EVENTS
                );
            }
            self.dropped_events += 1;
        }
        self.events.push_back(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        if self.dropped_events > 0 {
            log::debug!("Draining events; {} were dropped", self.dropped_events);
            self.dropped_events = 0;
        }
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(spawn: u64, lifespan: u64) -> Dot {
        Dot {
            id: 1,
            color_id: ColorId(0),
            pos: Vec2::splat(0.5),
            size: 0.1,
            spawn_time_ms: spawn,
            lifespan_ms: lifespan,
        }
    }

    #[test]
    fn test_life_percentage_clamped() {
        let d = dot(1000, 2000);
        assert_eq!(d.life_percentage(1000), 1.0);
        assert!((d.life_percentage(2000) - 0.5).abs() < 1e-6);
        assert_eq!(d.life_percentage(3000), 0.0);
        assert_eq!(d.life_percentage(10_000), 0.0);
        // Clock reading before spawn never exceeds 1
        assert_eq!(d.life_percentage(0), 1.0);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let d = dot(1000, 2000);
        assert!(!d.is_expired(2999));
        assert!(d.is_expired(3000));
    }

    #[test]
    fn test_dot_ids_are_unique() {
        let mut state = GameState::new(GameMode::Challenge, 1, 0, ColorId(0));
        let a = state.next_dot_id();
        let b = state.next_dot_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_high_water_marks_never_drop() {
        let mut state = GameState::new(GameMode::Challenge, 1, 0, ColorId(0));
        state.combo = 4;
        state.difficulty_level = 2;
        state.update_high_water_marks();
        state.combo = 0;
        state.update_high_water_marks();
        assert_eq!(state.max_combo, 4);
        assert_eq!(state.max_difficulty, 2);
    }

    #[test]
    fn test_accuracy_without_taps_is_zero() {
        let state = GameState::new(GameMode::Warmup, 1, 0, ColorId(0));
        let result = state.freeze(20);
        assert_eq!(result.accuracy(), 0.0);
        assert_eq!(result.total_taps(), 0);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(GameMode::from_str("Warm-Up"), Some(GameMode::Warmup));
        assert_eq!(GameMode::from_str("challenge"), Some(GameMode::Challenge));
        assert_eq!(GameMode::from_str("zen"), None);
        assert_eq!(GameMode::Challenge.as_str(), "challenge");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&GameEvent::LevelUp { level: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"LevelUp","level":3}"#);
    }

    #[test]
    fn test_event_queue_drops_oldest_when_full() {
        let mut state = GameState::new(GameMode::Challenge, 1, 0, ColorId(0));
        let total = MAX_PENDING_EVENTS as u32 + 10;
        for dot_id in 0..total {
            state.push_event(GameEvent::DotExpired { dot_id });
        }
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(state.dropped_events(), 10);
        assert_eq!(state.events.front(), Some(&GameEvent::DotExpired { dot_id: 10 }));
        assert_eq!(
            state.events.back(),
            Some(&GameEvent::DotExpired { dot_id: total - 1 })
        );

        let drained = state.take_events();
        assert_eq!(drained.len(), MAX_PENDING_EVENTS);
        assert!(state.events.is_empty());
        assert_eq!(state.dropped_events(), 0);
    }

    #[test]
    fn test_snapshot_leaves_events_behind() {
        let mut state = GameState::new(GameMode::Challenge, 9, 500, ColorId(2));
        state.score = 120;
        state.combo = 3;
        state.next_dot_id();
        state.push_event(GameEvent::LevelUp { level: 1 });

        let mut copy = state.snapshot();
        assert!(copy.events.is_empty());
        assert_eq!(state.events.len(), 1);
        assert_eq!(copy.score, 120);
        assert_eq!(copy.combo, 3);
        assert_eq!(copy.target_color, ColorId(2));
        assert_eq!(copy.started_at_ms, 500);
        assert_eq!(copy.next_dot_id(), state.next_dot_id());
    }
}
