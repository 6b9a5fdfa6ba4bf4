// ABOUTME: End-to-end load and heat scenarios across aggregator and overlay
// ABOUTME: Covers decay identities, saturation, determinism, and overtraining flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use myoheat::aggregator::LoadAggregator;
use myoheat::config::EngineConfig;
use myoheat::models::{GroupStateMap, StimulusEvent};
use myoheat::overlay::SensitivityOverlay;
use std::collections::HashMap;

fn chest_event(id: &str, stimulus: f64, occurred_at: DateTime<Utc>) -> StimulusEvent {
    StimulusEvent {
        id: id.to_owned(),
        exercise_id: "bench_press".to_owned(),
        exercise_name: Some("Bench Press".to_owned()),
        reps: Some(8),
        load_lbs: Some(185.0),
        group_weights: [("chest".to_owned(), 1.0)].into_iter().collect(),
        stimulus,
        occurred_at: occurred_at.to_rfc3339(),
    }
}

fn rebuild(events: &[StimulusEvent], now: DateTime<Utc>) -> GroupStateMap {
    LoadAggregator::new(36.0).rebuild(events, &HashMap::new(), now)
}

#[test]
fn test_fresh_event_reaches_full_load_heat_and_overdo() {
    let now = Utc::now();
    let state = rebuild(&[chest_event("1", 1.0, now)], now);

    let chest = state.get("chest").unwrap();
    assert!((chest.load - 1.0).abs() < 1e-9);

    let overlay = SensitivityOverlay::new(EngineConfig::default());
    let sample = overlay.heat(state.get("chest"), "chest", now);
    assert!((sample.heat - 1.0).abs() < 1e-9);
    assert!(sample.overdo, "effective load above hard threshold");
}

#[test]
fn test_event_aged_one_half_life_halves_load() {
    let now = Utc::now();
    let state = rebuild(&[chest_event("1", 1.0, now - Duration::hours(36))], now);
    assert!((state.get("chest").unwrap().load - 0.5).abs() < 1e-6);
}

#[test]
fn test_load_saturates_under_pathological_magnitudes() {
    let now = Utc::now();
    let events: Vec<StimulusEvent> = (0..50)
        .map(|i| chest_event(&i.to_string(), 5.0, now))
        .collect();
    let state = rebuild(&events, now);
    let load = state.get("chest").unwrap().load;
    assert!(load <= 1.0);
    assert!((load - 1.0).abs() < 1e-9);
}

#[test]
fn test_rebuild_is_deterministic() {
    let now = Utc::now();
    let events: Vec<StimulusEvent> = (0..20)
        .map(|i| chest_event(&i.to_string(), 0.3, now - Duration::hours(i * 7)))
        .collect();

    let first = rebuild(&events, now);
    let second = rebuild(&events, now);
    assert_eq!(first.len(), second.len());
    for (group_id, state) in &first {
        let other = second.get(group_id).unwrap();
        assert!((state.load - other.load).abs() < f64::EPSILON);
        assert_eq!(state.last_trained_at, other.last_trained_at);
    }
}

#[test]
fn test_future_event_contributes_undecayed() {
    let now = Utc::now();
    let state = rebuild(&[chest_event("1", 0.6, now + Duration::hours(5))], now);
    assert!((state.get("chest").unwrap().load - 0.6).abs() < 1e-9);
}

#[test]
fn test_unparseable_timestamp_skipped_others_survive() {
    let now = Utc::now();
    let mut bad = chest_event("1", 1.0, now);
    bad.occurred_at = "not a timestamp".to_owned();
    let good = chest_event("2", 0.4, now);

    let state = rebuild(&[bad, good], now);
    assert!((state.get("chest").unwrap().load - 0.4).abs() < 1e-9);
}

#[test]
fn test_never_trained_group_absent_and_neglected() {
    let now = Utc::now();
    let state = rebuild(&[chest_event("1", 1.0, now)], now);
    assert!(!state.contains_key("lats"));

    let overlay = SensitivityOverlay::new(EngineConfig::default());
    assert!(overlay.is_neglected(state.get("lats"), now));
}

#[test]
fn test_weighted_event_splits_across_groups() {
    let now = Utc::now();
    let mut event = chest_event("1", 1.0, now);
    event.group_weights = [
        ("chest".to_owned(), 0.7),
        ("front_delts".to_owned(), 0.2),
        ("triceps".to_owned(), 0.3),
    ]
    .into_iter()
    .collect();

    let state = rebuild(&[event], now);
    assert!((state.get("chest").unwrap().load - 0.7).abs() < 1e-9);
    assert!((state.get("front_delts").unwrap().load - 0.2).abs() < 1e-9);
    assert!((state.get("triceps").unwrap().load - 0.3).abs() < 1e-9);
}

#[test]
fn test_old_load_plus_fresh_bump_composes() {
    let now = Utc::now();
    // Trained 9 hours ago with a modest stimulus: decayed load plus half bump
    let state = rebuild(&[chest_event("1", 0.4, now - Duration::hours(9))], now);
    let chest = state.get("chest").unwrap();

    let overlay = SensitivityOverlay::new(EngineConfig::default());
    let sample = overlay.heat(state.get("chest"), "chest", now);
    let expected = (chest.load + 0.25 * 0.5).clamp(0.0, 1.0);
    assert!((sample.heat - expected).abs() < 1e-9);
    assert!(!sample.overdo);
}
