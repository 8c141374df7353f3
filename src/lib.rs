//! Focus Tap - a tick-driven attention mini-game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (dots, difficulty, scoring, session state machine)
//! - `palette`: Fixed set of tappable colors
//! - `rewards`: Session result to XP conversion and feedback text
//! - `settings`: Data-driven engine tuning
//! - `error`: Configuration errors
//!
//! Rendering, audio, persistence and the surrounding screens are host concerns.
//! The host feeds the engine a monotonic clock and tap input, and reads back
//! `GameState` snapshots, `GameEvent`s and a final `GameResult`.

pub mod error;
pub mod palette;
pub mod rewards;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Result};
pub use palette::{Color, ColorId, PALETTE};
pub use settings::EngineConfig;
pub use sim::{
    FocusTapSession, GameEvent, GameMode, GamePhase, GameResult, GameState, ManualClock,
    MonotonicClock,
};

/// Engine configuration constants (defaults for `EngineConfig`)
pub mod consts {
    /// Fixed tick cadence (~10 Hz is plenty for tap timing)
    pub const TICK_MS: u64 = 100;
    /// Maximum ticks replayed in one pump before the backlog is dropped
    pub const MAX_CATCHUP_TICKS: u32 = 8;
    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Warm-up countdown length
    pub const WARMUP_DURATION_MS: u64 = 60_000;
    /// Challenge survival time per difficulty level
    pub const LEVEL_DURATION_MS: u64 = 10_000;

    /// Points for a correct tap at level 0 with no combo
    pub const BASE_TAP_SCORE: u32 = 10;
    /// Extra base points per difficulty level
    pub const LEVEL_SCORE_BONUS: u32 = 2;
    /// Multiplier added per combo point
    pub const COMBO_MULTIPLIER_STEP: f64 = 0.1;

    /// Spawn interval curve (ms)
    pub const SPAWN_INTERVAL_BASE_MS: u64 = 1200;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 100;
    pub const SPAWN_INTERVAL_MIN_MS: u64 = 400;

    /// Dot lifespan curve (ms)
    pub const DOT_LIFESPAN_BASE_MS: u64 = 3000;
    pub const DOT_LIFESPAN_STEP_MS: u64 = 200;
    pub const DOT_LIFESPAN_MIN_MS: u64 = 1200;

    /// On-screen cap curve: +1 dot every `MAX_DOTS_LEVEL_STEP` levels
    pub const MAX_DOTS_BASE: usize = 3;
    pub const MAX_DOTS_LEVEL_STEP: u32 = 2;
    pub const MAX_DOTS_CAP: usize = 8;

    /// Target color rotation cadence
    pub const TARGET_ROTATION_MS: u64 = 5000;
    /// Chance a new dot takes the target color when none is on screen
    pub const TARGET_SPAWN_BIAS: f64 = 0.5;

    /// Dot diameter range, as a fraction of the play field width
    pub const DOT_SIZE_MIN: f32 = 0.10;
    pub const DOT_SIZE_MAX: f32 = 0.16;
    /// Candidate placements tried before accepting an overlap
    pub const PLACEMENT_ATTEMPTS: u32 = 8;

    /// Rewards
    pub const WARMUP_XP: u32 = 20;
    pub const CHALLENGE_XP_CAP: u32 = 50;
    /// Score at which challenge XP reaches ~63% of the cap
    pub const CHALLENGE_XP_SCALE: f64 = 1500.0;
}
