// ABOUTME: Folds timestamped stimulus events into per-group load snapshots
// ABOUTME: Full rebuild every pass; saturating accumulation with half-life decay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Load Aggregator
//!
//! Rebuilds the complete `GroupStateMap` from scratch on every pass. The
//! event list carries no ordering guarantee; accumulation is commutative
//! apart from the per-addition saturation clamp, and the clamp only engages
//! at full load where ordering no longer matters for consumers.
//!
//! Malformed events are skipped at the finest granularity (per field, per
//! event). One bad event must never blank the whole muscle-state view.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::decay::decay_multiplier;
use crate::models::{GroupState, GroupStateMap, GroupWeights, StimulusEvent};

/// Rebuilds per-group state from an in-scope event list
#[derive(Debug, Clone)]
pub struct LoadAggregator {
    half_life_hours: f64,
}

impl LoadAggregator {
    /// Create an aggregator with the given decay half-life in hours
    #[must_use]
    pub const fn new(half_life_hours: f64) -> Self {
        Self { half_life_hours }
    }

    /// Rebuild the full group state from `events` as of `now`
    ///
    /// `fallback_weights` supplies group weights keyed by exercise id for
    /// legacy events that carry none inline; events without either source of
    /// weights contribute nothing. Groups never touched by any event are
    /// absent from the result.
    #[must_use]
    pub fn rebuild(
        &self,
        events: &[StimulusEvent],
        fallback_weights: &HashMap<String, GroupWeights>,
        now: DateTime<Utc>,
    ) -> GroupStateMap {
        let mut state = GroupStateMap::new();
        let mut skipped = 0_usize;

        for event in events {
            let Some(occurred_at) = event.occurred_at_utc() else {
                skipped += 1;
                continue;
            };
            if !(event.stimulus > 0.0) {
                continue;
            }

            let weights: &GroupWeights = if event.group_weights.is_empty() {
                match fallback_weights.get(&event.exercise_id) {
                    Some(weights) => weights,
                    None => {
                        skipped += 1;
                        continue;
                    }
                }
            } else {
                &event.group_weights
            };

            // Future-dated events decay at elapsed zero, full strength.
            let decay = decay_multiplier(now - occurred_at, self.half_life_hours);

            for (group_id, &weight) in weights {
                let group_id = group_id.trim();
                if group_id.is_empty() || !weight.is_finite() || weight <= 0.0 {
                    continue;
                }
                let contribution = event.stimulus * weight * decay;
                if !(contribution > 0.0) {
                    continue;
                }

                let entry = state
                    .entry(group_id.to_owned())
                    .or_insert_with(GroupState::default);
                entry.load = (entry.load + contribution).clamp(0.0, 1.0);
                entry.last_trained_at = Some(match entry.last_trained_at {
                    Some(current) => current.max(occurred_at),
                    None => occurred_at,
                });
            }
        }

        if skipped > 0 {
            debug!(
                skipped,
                total = events.len(),
                "skipped events without parseable timestamp or usable weights"
            );
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(id: &str, weights: &[(&str, f64)], stimulus: f64, occurred_at: String) -> StimulusEvent {
        StimulusEvent {
            id: id.to_owned(),
            exercise_id: format!("ex_{id}"),
            exercise_name: None,
            reps: None,
            load_lbs: None,
            group_weights: weights
                .iter()
                .map(|(g, w)| ((*g).to_owned(), *w))
                .collect(),
            stimulus,
            occurred_at,
        }
    }

    #[test]
    fn test_single_fresh_event_full_load() {
        let now = Utc::now();
        let aggregator = LoadAggregator::new(36.0);
        let events = vec![event("1", &[("chest", 1.0)], 1.0, now.to_rfc3339())];

        let state = aggregator.rebuild(&events, &HashMap::new(), now);
        let chest = state.get("chest").unwrap();
        assert!((chest.load - 1.0).abs() < 1e-9);
        assert_eq!(chest.last_trained_at, Some(now));
    }

    #[test]
    fn test_zero_stimulus_contributes_nothing() {
        let now = Utc::now();
        let aggregator = LoadAggregator::new(36.0);
        let events = vec![event("1", &[("chest", 1.0)], 0.0, now.to_rfc3339())];

        let state = aggregator.rebuild(&events, &HashMap::new(), now);
        assert!(state.is_empty());
    }

    #[test]
    fn test_negative_and_nan_weights_skipped() {
        let now = Utc::now();
        let aggregator = LoadAggregator::new(36.0);
        let events = vec![event(
            "1",
            &[("chest", -0.5), ("lats", f64::NAN), ("quads", 0.4)],
            1.0,
            now.to_rfc3339(),
        )];

        let state = aggregator.rebuild(&events, &HashMap::new(), now);
        assert_eq!(state.len(), 1);
        assert!(state.contains_key("quads"));
    }

    #[test]
    fn test_fallback_weights_by_exercise_id() {
        let now = Utc::now();
        let aggregator = LoadAggregator::new(36.0);
        let mut fallback = HashMap::new();
        fallback.insert(
            "ex_1".to_owned(),
            [("glutes".to_owned(), 0.8)].into_iter().collect(),
        );
        let events = vec![event("1", &[], 1.0, now.to_rfc3339())];

        let state = aggregator.rebuild(&events, &fallback, now);
        assert!((state.get("glutes").unwrap().load - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_no_weights_no_fallback_skipped() {
        let now = Utc::now();
        let aggregator = LoadAggregator::new(36.0);
        let events = vec![event("1", &[], 2.0, now.to_rfc3339())];

        let state = aggregator.rebuild(&events, &HashMap::new(), now);
        assert!(state.is_empty());
    }

    #[test]
    fn test_last_trained_is_most_recent_contributor() {
        let now = Utc::now();
        let older = now - Duration::hours(10);
        let aggregator = LoadAggregator::new(36.0);
        let events = vec![
            event("1", &[("chest", 0.3)], 1.0, older.to_rfc3339()),
            event("2", &[("chest", 0.3)], 1.0, now.to_rfc3339()),
        ];

        let state = aggregator.rebuild(&events, &HashMap::new(), now);
        assert_eq!(state.get("chest").unwrap().last_trained_at, Some(now));
    }
}
