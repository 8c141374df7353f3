//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `now_ms` arguments or a `Clock`
//! - Seeded RNG only
//! - Stable iteration order (dots kept in spawn order)
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod clock;
pub mod difficulty;
pub mod dots;
pub mod scoring;
pub mod session;
pub mod state;
pub mod target;
pub mod tick;

pub use autoplay::{AutoPlayer, TapIntent};
pub use clock::{Clock, ManualClock, MonotonicClock, TickSchedule};
pub use difficulty::{
    calculate_difficulty_level, get_dot_lifespan, get_max_dots_on_screen, get_spawn_interval,
};
pub use dots::{remove_dot, remove_expired_dots, should_spawn_dot, spawn_dot};
pub use scoring::{TapOutcome, apply_tap, calculate_tap_score};
pub use session::FocusTapSession;
pub use state::{Dot, EndReason, GameEvent, GameMode, GamePhase, GameResult, GameState};
pub use target::{rotate_target, select_target_color, should_rotate_target};
pub use tick::tick;
