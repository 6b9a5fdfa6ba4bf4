// ABOUTME: Sensitivity overlay converting raw group load into heat, overdo, and neglect signals
// ABOUTME: Per-group calibration multipliers applied at read time, never mutating load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sensitivity Overlay
//!
//! Presentation-facing projection over `GroupState`. Sensitivity scales the
//! effective load (and therefore the overtraining flag) but not the
//! freshness bump, so "just trained" feedback behaves the same regardless of
//! calibration.

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::decay::elapsed_hours;
use crate::models::{GroupState, HeatSample, SensitivityMap};

const HOURS_PER_DAY: f64 = 24.0;

/// Per-group sensitivity calibration applied on top of aggregated load
#[derive(Debug, Clone)]
pub struct SensitivityOverlay {
    map: SensitivityMap,
    config: EngineConfig,
}

impl SensitivityOverlay {
    /// Create an overlay with an empty sensitivity map
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            map: SensitivityMap::new(),
            config,
        }
    }

    /// Replace the sensitivity map, dropping blank keys and non-finite values
    pub fn set_map(&mut self, raw: SensitivityMap) {
        self.map = raw
            .into_iter()
            .filter_map(|(group_id, value)| {
                let group_id = group_id.trim();
                if group_id.is_empty() || !value.is_finite() {
                    return None;
                }
                Some((group_id.to_owned(), value))
            })
            .collect();
    }

    /// Set one sensitivity value for every group in `groups`
    pub fn set_for_groups<I, S>(&mut self, groups: I, value: f64)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !value.is_finite() {
            return;
        }
        for group in groups {
            let group_id = group.as_ref().trim();
            if group_id.is_empty() {
                continue;
            }
            self.map.insert(group_id.to_owned(), value);
        }
    }

    /// Current sensitivity map (raw stored values, unclamped)
    #[must_use]
    pub const fn map(&self) -> &SensitivityMap {
        &self.map
    }

    /// Clear all calibration entries
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Clamped sensitivity multiplier for one group (1.0 when unset)
    #[must_use]
    pub fn sensitivity_for(&self, group_id: &str) -> f64 {
        self.map.get(group_id).copied().unwrap_or(1.0).clamp(
            self.config.sensitivity_floor,
            self.config.sensitivity_ceiling,
        )
    }

    /// Compute the presentation heat sample for one group at `now`
    ///
    /// A group absent from the snapshot reads as zero load, never trained.
    #[must_use]
    pub fn heat(&self, state: Option<&GroupState>, group_id: &str, now: DateTime<Utc>) -> HeatSample {
        let load = state.map_or(0.0, |s| s.load);
        let sensitivity = self.sensitivity_for(group_id);
        let effective_load = (load * sensitivity).clamp(0.0, 1.0);

        let hours_since = hours_since_trained(state, now);
        let freshness = if hours_since < self.config.freshness_window_hours {
            1.0 - hours_since / self.config.freshness_window_hours
        } else {
            0.0
        };

        let heat = (effective_load + self.config.freshness_bump * freshness).clamp(0.0, 1.0);
        let overdo = (effective_load > self.config.overdo_load_threshold
            && hours_since < self.config.overdo_recent_hours)
            || effective_load > self.config.overdo_hard_threshold;

        HeatSample {
            heat,
            overdo,
            load,
            sensitivity,
        }
    }

    /// Whether a group counts as neglected at `now`
    ///
    /// Never-trained groups are neglected, as are groups untrained for the
    /// configured number of days.
    #[must_use]
    pub fn is_neglected(&self, state: Option<&GroupState>, now: DateTime<Utc>) -> bool {
        let hours_since = hours_since_trained(state, now);
        hours_since >= self.config.neglect_after_days * HOURS_PER_DAY
    }
}

/// Hours since the group's last contributing event, `+inf` when never trained
fn hours_since_trained(state: Option<&GroupState>, now: DateTime<Utc>) -> f64 {
    state
        .and_then(|s| s.last_trained_at)
        .map_or(f64::INFINITY, |trained_at| elapsed_hours(now - trained_at))
}
