// ABOUTME: Coaching recommendation generator ranking groups by urgency
// ABOUTME: One bucket per group (warn, nudge, balance), prioritized and capped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Generator
//!
//! Walks every known group, classifies it into at most one bucket (first
//! match wins: overtrained, neglected, under-volumed), then sorts by bucket
//! priority and truncates. Groups producing no message are simply absent
//! from the output.

use chrono::{DateTime, Utc};

use crate::classifier::group_label;
use crate::config::EngineConfig;
use crate::models::{GroupStateMap, Recommendation, RecommendationKind};
use crate::overlay::SensitivityOverlay;

/// Generates prioritized coaching messages from group heat signals
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    low_heat_threshold: f64,
    max_recommendations: usize,
}

impl RecommendationEngine {
    /// Create a generator from engine configuration
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            low_heat_threshold: config.low_heat_threshold,
            max_recommendations: config.max_recommendations,
        }
    }

    /// Generate at most `max_recommendations` messages for `group_ids` at `now`
    #[must_use]
    pub fn generate(
        &self,
        group_ids: &[&str],
        states: &GroupStateMap,
        overlay: &SensitivityOverlay,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let mut items: Vec<Recommendation> = Vec::new();

        for &group_id in group_ids {
            let state = states.get(group_id);
            let sample = overlay.heat(state, group_id, now);
            let display = group_label(group_id).unwrap_or(group_id);

            if sample.overdo {
                items.push(Recommendation {
                    group_id: group_id.to_owned(),
                    kind: RecommendationKind::Warn,
                    message: format!(
                        "{display}: ease off, this group needs recovery before more volume."
                    ),
                });
                continue;
            }

            if overlay.is_neglected(state, now) {
                items.push(Recommendation {
                    group_id: group_id.to_owned(),
                    kind: RecommendationKind::Nudge,
                    message: format!("{display}: neglected. Add 2-4 sets this week."),
                });
                continue;
            }

            if sample.heat < self.low_heat_threshold {
                items.push(Recommendation {
                    group_id: group_id.to_owned(),
                    kind: RecommendationKind::Balance,
                    message: format!("{display}: light. Consider adding a little volume."),
                });
            }
        }

        // Stable sort keeps group declaration order within a bucket.
        items.sort_by_key(|item| item.kind.priority());
        items.truncate(self.max_recommendations);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupState;
    use chrono::Duration;

    fn setup() -> (RecommendationEngine, SensitivityOverlay) {
        let config = EngineConfig::default();
        (
            RecommendationEngine::new(&config),
            SensitivityOverlay::new(config),
        )
    }

    fn state(load: f64, hours_ago: i64, now: DateTime<Utc>) -> GroupState {
        GroupState {
            load,
            last_trained_at: Some(now - Duration::hours(hours_ago)),
        }
    }

    #[test]
    fn test_overdo_outranks_neglect_and_balance() {
        let now = Utc::now();
        let (engine, overlay) = setup();
        let mut states = GroupStateMap::new();
        states.insert("chest".to_owned(), state(0.95, 2, now));
        states.insert("lats".to_owned(), state(0.5, 12, now));
        // quads untouched: neglected

        let recs = engine.generate(&["lats", "quads", "chest"], &states, &overlay, now);
        assert_eq!(recs[0].kind, RecommendationKind::Warn);
        assert_eq!(recs[0].group_id, "chest");
        assert_eq!(recs[1].kind, RecommendationKind::Nudge);
        assert_eq!(recs[1].group_id, "quads");
    }

    #[test]
    fn test_healthy_group_produces_no_message() {
        let now = Utc::now();
        let (engine, overlay) = setup();
        let mut states = GroupStateMap::new();
        states.insert("chest".to_owned(), state(0.5, 30, now));

        let recs = engine.generate(&["chest"], &states, &overlay, now);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_truncated_to_configured_cap() {
        let now = Utc::now();
        let (engine, overlay) = setup();
        let states = GroupStateMap::new();
        let group_ids: Vec<&str> = crate::classifier::known_group_ids();

        // Every known group is untrained, hence neglected.
        let recs = engine.generate(&group_ids, &states, &overlay, now);
        assert_eq!(recs.len(), 6);
        assert!(recs.iter().all(|r| r.kind == RecommendationKind::Nudge));
    }

    #[test]
    fn test_low_heat_balance_bucket() {
        let now = Utc::now();
        let (engine, overlay) = setup();
        let mut states = GroupStateMap::new();
        states.insert("calves".to_owned(), state(0.05, 48, now));

        let recs = engine.generate(&["calves"], &states, &overlay, now);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Balance);
        assert!(recs[0].message.contains("Calves"));
    }
}
