// ABOUTME: Exponential half-life decay for accumulated training load
// ABOUTME: Pure function shared by the aggregator and any load projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Load Decay
//!
//! Single fixed-half-life exponential decay curve:
//! `multiplier = 0.5 ^ (elapsed_hours / half_life_hours)`.
//!
//! Events dated in the future are treated as elapsed zero (full strength),
//! never as an error.

use chrono::Duration;

const MS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Convert a chrono duration to fractional hours, flooring at zero
#[must_use]
pub fn elapsed_hours(elapsed: Duration) -> f64 {
    let ms = elapsed.num_milliseconds().max(0);
    ms as f64 / MS_PER_HOUR
}

/// Decay multiplier in `(0, 1]` for the given elapsed time
///
/// `half_life_hours` must be positive (enforced by `EngineConfig::validate`).
#[must_use]
pub fn decay_multiplier(elapsed: Duration, half_life_hours: f64) -> f64 {
    0.5_f64.powf(elapsed_hours(elapsed) / half_life_hours)
}
