// ABOUTME: Criterion benchmarks for the aggregation and classification hot paths
// ABOUTME: Measures full snapshot rebuilds and mesh label classification throughput
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the load aggregator and the anatomical
//! classifier, the two paths hit on every render-loop refresh and mesh load.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use myoheat::aggregator::LoadAggregator;
use myoheat::classifier::Classifier;
use myoheat::models::StimulusEvent;
use std::collections::HashMap;

const GROUP_ROTATION: &[&str] = &[
    "chest", "lats", "quads", "hamstrings", "glutes", "shoulders", "biceps", "triceps",
];

fn generate_events(count: usize) -> Vec<StimulusEvent> {
    let base = Utc::now();
    (0..count)
        .map(|index| {
            let group = GROUP_ROTATION[index % GROUP_ROTATION.len()];
            let occurred_at = base - Duration::hours((index % 96) as i64);
            StimulusEvent {
                id: format!("bench_{index}"),
                exercise_id: format!("exercise_{}", index % 12),
                exercise_name: None,
                reps: Some(8 + (index % 6) as u32),
                load_lbs: Some(95.0 + (index % 40) as f64 * 5.0),
                group_weights: [(group.to_owned(), 0.4 + (index % 6) as f64 * 0.1)]
                    .into_iter()
                    .collect(),
                stimulus: 0.2 + (index % 5) as f64 * 0.15,
                occurred_at: occurred_at.to_rfc3339(),
            }
        })
        .collect()
}

fn bench_aggregator_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregator_rebuild");
    let aggregator = LoadAggregator::new(36.0);
    let fallback = HashMap::new();

    for size in [50_usize, 500, 2000] {
        let events = generate_events(size);
        let now = Utc::now();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| aggregator.rebuild(black_box(events), &fallback, now));
        });
    }
    group.finish();
}

fn bench_classifier(c: &mut Criterion) {
    let labels = [
        "Pectoralis_major_muscle_L",
        "TricepsBrachiiLongHead",
        "Superficial_Fascia_Trunk",
        "Palmaris_Brevis_L",
        "Deltoid_muscle_R",
        "Gluteus_maximus_muscle_L",
        "Femur_R",
        "Rectus_abdominis_muscle",
    ];
    let classifier = Classifier::default();

    c.bench_function("classify_mesh_labels", |b| {
        b.iter(|| {
            for label in &labels {
                black_box(classifier.classify(black_box(label)));
            }
        });
    });
}

criterion_group!(benches, bench_aggregator_rebuild, bench_classifier);
criterion_main!(benches);
