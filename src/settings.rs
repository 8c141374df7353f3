//! Engine tuning
//!
//! Owned by the host and handed to the session at construction. Every field
//! has a default from `crate::consts`, so a JSON file only needs the values it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Linear curve `max(min, base - step * level)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayCurve {
    pub base_ms: u64,
    pub step_ms: u64,
    pub min_ms: u64,
}

impl DecayCurve {
    /// Value at `level`, floored at `min_ms`
    pub fn at(&self, level: u32) -> u64 {
        self.base_ms
            .saturating_sub(self.step_ms.saturating_mul(level as u64))
            .max(self.min_ms)
    }

    /// First level at which the curve sits on its floor
    pub fn saturation_level(&self) -> u32 {
        if self.step_ms == 0 {
            return 0;
        }
        let span = self.base_ms.saturating_sub(self.min_ms);
        span.div_ceil(self.step_ms).min(u32::MAX as u64) as u32
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        if self.step_ms == 0 {
            return Err(ConfigError::invalid(field, "step_ms must be positive"));
        }
        if self.min_ms == 0 {
            return Err(ConfigError::invalid(field, "min_ms must be positive"));
        }
        if self.min_ms > self.base_ms {
            return Err(ConfigError::invalid(
                field,
                format!("min_ms ({}) exceeds base_ms ({})", self.min_ms, self.base_ms),
            ));
        }
        Ok(())
    }
}

/// Difficulty progression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Challenge survival time per level
    pub level_duration_ms: u64,
    pub spawn_interval: DecayCurve,
    pub dot_lifespan: DecayCurve,
    pub max_dots_base: usize,
    /// Levels per extra on-screen dot
    pub max_dots_level_step: u32,
    pub max_dots_cap: usize,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            level_duration_ms: LEVEL_DURATION_MS,
            spawn_interval: DecayCurve {
                base_ms: SPAWN_INTERVAL_BASE_MS,
                step_ms: SPAWN_INTERVAL_STEP_MS,
                min_ms: SPAWN_INTERVAL_MIN_MS,
            },
            dot_lifespan: DecayCurve {
                base_ms: DOT_LIFESPAN_BASE_MS,
                step_ms: DOT_LIFESPAN_STEP_MS,
                min_ms: DOT_LIFESPAN_MIN_MS,
            },
            max_dots_base: MAX_DOTS_BASE,
            max_dots_level_step: MAX_DOTS_LEVEL_STEP,
            max_dots_cap: MAX_DOTS_CAP,
        }
    }
}

/// Tap scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_tap_score: u32,
    pub level_score_bonus: u32,
    pub combo_multiplier_step: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_tap_score: BASE_TAP_SCORE,
            level_score_bonus: LEVEL_SCORE_BONUS,
            combo_multiplier_step: COMBO_MULTIPLIER_STEP,
        }
    }
}

/// Dot spawning and target rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    pub target_rotation_ms: u64,
    /// Chance a new dot takes the target color when none is on screen
    pub target_spawn_bias: f64,
    /// Diameter range, fraction of field width
    pub size_min: f32,
    pub size_max: f32,
    pub placement_attempts: u32,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            target_rotation_ms: TARGET_ROTATION_MS,
            target_spawn_bias: TARGET_SPAWN_BIAS,
            size_min: DOT_SIZE_MIN,
            size_max: DOT_SIZE_MAX,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

/// XP conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub warmup_xp: u32,
    pub challenge_xp_cap: u32,
    pub challenge_xp_scale: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            warmup_xp: WARMUP_XP,
            challenge_xp_cap: CHALLENGE_XP_CAP,
            challenge_xp_scale: CHALLENGE_XP_SCALE,
        }
    }
}

/// Complete engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_interval_ms: u64,
    pub max_catchup_ticks: u32,
    pub warmup_duration_ms: u64,
    pub difficulty: DifficultyConfig,
    pub scoring: ScoringConfig,
    pub dots: DotConfig,
    pub rewards: RewardConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_MS,
            max_catchup_ticks: MAX_CATCHUP_TICKS,
            warmup_duration_ms: WARMUP_DURATION_MS,
            difficulty: DifficultyConfig::default(),
            scoring: ScoringConfig::default(),
            dots: DotConfig::default(),
            rewards: RewardConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning that would stall the scheduler or break the curve contracts
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("tick_interval_ms", "must be positive"));
        }
        if self.max_catchup_ticks == 0 {
            return Err(ConfigError::invalid("max_catchup_ticks", "must be positive"));
        }
        if self.warmup_duration_ms == 0 {
            return Err(ConfigError::invalid("warmup_duration_ms", "must be positive"));
        }

        let d = &self.difficulty;
        if d.level_duration_ms == 0 {
            return Err(ConfigError::invalid(
                "difficulty.level_duration_ms",
                "must be positive",
            ));
        }
        d.spawn_interval.validate("difficulty.spawn_interval")?;
        d.dot_lifespan.validate("difficulty.dot_lifespan")?;
        if d.max_dots_base == 0 {
            return Err(ConfigError::invalid("difficulty.max_dots_base", "must be positive"));
        }
        if d.max_dots_level_step == 0 {
            return Err(ConfigError::invalid(
                "difficulty.max_dots_level_step",
                "must be positive",
            ));
        }
        if d.max_dots_cap < d.max_dots_base {
            return Err(ConfigError::invalid(
                "difficulty.max_dots_cap",
                format!("cap ({}) below base ({})", d.max_dots_cap, d.max_dots_base),
            ));
        }

        let s = &self.scoring;
        if s.base_tap_score == 0 {
            return Err(ConfigError::invalid("scoring.base_tap_score", "must be positive"));
        }
        if !s.combo_multiplier_step.is_finite() || s.combo_multiplier_step < 0.0 {
            return Err(ConfigError::invalid(
                "scoring.combo_multiplier_step",
                "must be a finite, non-negative number",
            ));
        }

        let dots = &self.dots;
        if dots.target_rotation_ms == 0 {
            return Err(ConfigError::invalid("dots.target_rotation_ms", "must be positive"));
        }
        if !(0.0..=1.0).contains(&dots.target_spawn_bias) {
            return Err(ConfigError::invalid(
                "dots.target_spawn_bias",
                "must be within [0, 1]",
            ));
        }
        if !(dots.size_min > 0.0 && dots.size_min <= dots.size_max && dots.size_max < 1.0) {
            return Err(ConfigError::invalid(
                "dots.size_min",
                "size range must satisfy 0 < size_min <= size_max < 1",
            ));
        }
        if dots.placement_attempts == 0 {
            return Err(ConfigError::invalid("dots.placement_attempts", "must be positive"));
        }

        let r = &self.rewards;
        if !(r.challenge_xp_scale.is_finite() && r.challenge_xp_scale > 0.0) {
            return Err(ConfigError::invalid(
                "rewards.challenge_xp_scale",
                "must be a finite, positive number",
            ));
        }

        Ok(())
    }
}
