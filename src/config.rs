// ABOUTME: Engine configuration with all decay, heat, and cache tuning constants
// ABOUTME: Every magic number lives here so collaborators construct the engine explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Engine Configuration
//!
//! Named constants for the load/heat model and the overall-scope cache.
//! The half-life and freshness window are coupled in practice (a short
//! half-life with a long freshness window reads oddly on the model), so both
//! are configured here together rather than hard-coded in their modules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Load decay half-life shared by all muscle groups (hours)
pub const DEFAULT_HALF_LIFE_HOURS: f64 = 36.0;

/// Window after training during which the freshness bump applies (hours)
pub const DEFAULT_FRESHNESS_WINDOW_HOURS: f64 = 18.0;

/// Maximum heat contribution of the freshness bump
pub const DEFAULT_FRESHNESS_BUMP: f64 = 0.25;

/// Effective load above which a recent session flags overtraining
pub const DEFAULT_OVERDO_LOAD_THRESHOLD: f64 = 0.80;

/// Recency window for the soft overtraining rule (hours)
pub const DEFAULT_OVERDO_RECENT_HOURS: f64 = 24.0;

/// Effective load above which overtraining flags regardless of recency
pub const DEFAULT_OVERDO_HARD_THRESHOLD: f64 = 0.92;

/// Days without training after which a group counts as neglected
pub const DEFAULT_NEGLECT_AFTER_DAYS: f64 = 8.0;

/// Lower clamp for per-group sensitivity multipliers
pub const DEFAULT_SENSITIVITY_FLOOR: f64 = 0.05;

/// Upper clamp for per-group sensitivity multipliers
pub const DEFAULT_SENSITIVITY_CEILING: f64 = 1.5;

/// Heat below which a balance suggestion is generated
pub const DEFAULT_LOW_HEAT_THRESHOLD: f64 = 0.18;

/// Maximum number of coaching recommendations returned per pass
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 6;

/// Overall-scope cache staleness window
pub const DEFAULT_CACHE_STALE_AFTER: Duration = Duration::from_secs(120);

/// Sessions fetched per history page during an overall rebuild
pub const DEFAULT_SESSIONS_PER_PAGE: u32 = 5;

/// Maximum sessions accumulated during an overall rebuild
pub const DEFAULT_MAX_SESSIONS: u32 = 40;

/// Overall-scope event cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a built overall cache stays fresh
    pub stale_after: Duration,
    /// Sessions requested per page from the event source
    pub sessions_per_page: u32,
    /// Cap on sessions walked before the rebuild stops (bounded recent window)
    pub max_sessions: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_CACHE_STALE_AFTER,
            sessions_per_page: DEFAULT_SESSIONS_PER_PAGE,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Load decay half-life in hours, shared by all groups
    pub half_life_hours: f64,
    /// Freshness bump window in hours after the last training
    pub freshness_window_hours: f64,
    /// Maximum heat added by the freshness bump
    pub freshness_bump: f64,
    /// Soft overtraining threshold on effective load
    pub overdo_load_threshold: f64,
    /// Recency window in hours for the soft overtraining rule
    pub overdo_recent_hours: f64,
    /// Hard overtraining threshold on effective load
    pub overdo_hard_threshold: f64,
    /// Days without training before a group counts as neglected
    pub neglect_after_days: f64,
    /// Lower clamp for sensitivity multipliers
    pub sensitivity_floor: f64,
    /// Upper clamp for sensitivity multipliers
    pub sensitivity_ceiling: f64,
    /// Heat threshold below which a balance suggestion fires
    pub low_heat_threshold: f64,
    /// Cap on recommendations returned per pass
    pub max_recommendations: usize,
    /// Overall-scope cache settings
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            half_life_hours: DEFAULT_HALF_LIFE_HOURS,
            freshness_window_hours: DEFAULT_FRESHNESS_WINDOW_HOURS,
            freshness_bump: DEFAULT_FRESHNESS_BUMP,
            overdo_load_threshold: DEFAULT_OVERDO_LOAD_THRESHOLD,
            overdo_recent_hours: DEFAULT_OVERDO_RECENT_HOURS,
            overdo_hard_threshold: DEFAULT_OVERDO_HARD_THRESHOLD,
            neglect_after_days: DEFAULT_NEGLECT_AFTER_DAYS,
            sensitivity_floor: DEFAULT_SENSITIVITY_FLOOR,
            sensitivity_ceiling: DEFAULT_SENSITIVITY_CEILING,
            low_heat_threshold: DEFAULT_LOW_HEAT_THRESHOLD,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration invariants
    ///
    /// # Errors
    ///
    /// Returns `AppError` with `ConfigInvalid` if any constant is outside its
    /// usable range (non-positive half-life, inverted sensitivity clamps,
    /// zero page size).
    pub fn validate(&self) -> AppResult<()> {
        if self.half_life_hours <= 0.0 || !self.half_life_hours.is_finite() {
            return Err(AppError::config_invalid("half_life_hours must be positive"));
        }
        if self.freshness_window_hours < 0.0 {
            return Err(AppError::config_invalid(
                "freshness_window_hours must not be negative",
            ));
        }
        if self.sensitivity_floor <= 0.0 || self.sensitivity_floor > self.sensitivity_ceiling {
            return Err(AppError::config_invalid(
                "sensitivity clamps must satisfy 0 < floor <= ceiling",
            ));
        }
        if self.cache.sessions_per_page == 0 {
            return Err(AppError::config_invalid(
                "cache.sessions_per_page must be at least 1",
            ));
        }
        Ok(())
    }
}
