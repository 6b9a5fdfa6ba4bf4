// ABOUTME: Core data types for stimulus events, per-group state, and heat samples
// ABOUTME: Includes lenient timestamp parsing matching the event source's SQL datetimes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Shared types flowing between the event source, the aggregator, and the
//! presentation overlay. Events keep their timestamp as the raw source
//! string; parsing is lenient and an unparseable timestamp causes the event
//! to be skipped during aggregation rather than erroring the rebuild.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from muscle-group id to a targeting weight in `(0, 1]`
pub type GroupWeights = HashMap<String, f64>;

/// Mapping from muscle-group id to a user-calibrated sensitivity multiplier
pub type SensitivityMap = HashMap<String, f64>;

/// Derived per-group training state, keyed by group id
pub type GroupStateMap = HashMap<String, GroupState>;

/// One completed unit of training exposure (one logged set)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulusEvent {
    /// Opaque identifier, unique within its source scope
    pub id: String,
    /// Exercise identifier, used for fallback group-weight lookup
    pub exercise_id: String,
    /// Display name of the exercise (passthrough for the session editor)
    #[serde(default)]
    pub exercise_name: Option<String>,
    /// Repetitions performed (passthrough, not used by the engine)
    #[serde(default)]
    pub reps: Option<u32>,
    /// External load in pounds (passthrough, not used by the engine)
    #[serde(default)]
    pub load_lbs: Option<f64>,
    /// Muscle-group targeting weights; empty means "resolve by exercise id"
    #[serde(default)]
    pub group_weights: GroupWeights,
    /// Raw training intensity of this unit, expected in `[0, 5]`
    pub stimulus: f64,
    /// Raw source timestamp (RFC 3339 or SQL `YYYY-MM-DD HH:MM:SS`)
    pub occurred_at: String,
}

impl StimulusEvent {
    /// Parse the event timestamp, returning `None` when unparseable
    #[must_use]
    pub fn occurred_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_event_timestamp(&self.occurred_at)
    }
}

/// Parse a source timestamp leniently
///
/// Accepts RFC 3339 and the SQL `YYYY-MM-DD HH:MM:SS` form the persistence
/// layer emits; naive datetimes are treated as UTC. Returns `None` for
/// anything else so callers can skip the event.
#[must_use]
pub fn parse_event_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Accumulated decayed training state for one muscle group
///
/// Always rebuilt from scratch from the in-scope event list; never mutated
/// incrementally, so it cannot drift from source events.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GroupState {
    /// Accumulated decayed stimulus, saturating in `[0, 1]`
    pub load: f64,
    /// Timestamp of the most recent contributing event
    pub last_trained_at: Option<DateTime<Utc>>,
}

/// Which event population feeds the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatScope {
    /// Events restricted to the in-progress session; always fresh, no caching
    Live,
    /// Bounded recent history (at most N most-recent sessions, age-capped)
    Overall,
}

/// Presentation-facing heat sample for one group
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatSample {
    /// Visualization intensity in `[0, 1]`
    pub heat: f64,
    /// Overtraining flag
    pub overdo: bool,
    /// Underlying accumulated load before sensitivity scaling
    pub load: f64,
    /// Clamped sensitivity multiplier that was applied
    pub sensitivity: f64,
}

/// Priority bucket of a coaching recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Overtraining warning, highest priority
    Warn,
    /// Neglected group nudge
    Nudge,
    /// Low-volume balance suggestion, lowest priority
    Balance,
}

impl RecommendationKind {
    /// Sort key: lower sorts first
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Warn => 0,
            Self::Nudge => 1,
            Self::Balance => 2,
        }
    }
}

/// One prioritized coaching message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Muscle group the message refers to
    pub group_id: String,
    /// Priority bucket
    pub kind: RecommendationKind,
    /// Human-readable coaching message
    pub message: String,
}
