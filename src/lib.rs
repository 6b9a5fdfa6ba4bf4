// ABOUTME: Library entry point for the myoheat muscle load estimation engine
// ABOUTME: Exposes decay aggregation, scoped caching, classification, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Myoheat
//!
//! Muscle load estimation and classification engine for anatomical training
//! visualization. Converts a history of timestamped exercise events into
//! per-muscle-group, time-decayed load signals, then projects those into
//! visualization heat, overtraining flags, and prioritized coaching
//! recommendations.
//!
//! ## Architecture
//!
//! - **Classifier**: pure mapping from raw anatomical mesh labels to
//!   semantic muscle-group sets
//! - **Aggregator**: full rebuild of per-group state from in-scope events
//!   through a fixed half-life decay curve
//! - **Scoped cache**: live scope is always whatever the session editor
//!   last pushed; overall scope is a bounded, staleness-windowed history
//! - **Overlay**: per-group sensitivity calibration, heat, overdo, neglect
//! - **Recommendations**: priority-ordered coaching messages
//!
//! The engine is rebuilt from source events on demand and persists nothing
//! itself; the worst failure mode is a cold muscle state, never a crash.
//!
//! ## Example
//!
//! ```rust,no_run
//! use myoheat::config::EngineConfig;
//! use myoheat::engine::HeatEngine;
//! use myoheat::source::EventSource;
//! use std::sync::Arc;
//!
//! # async fn example(source: Arc<dyn EventSource>) -> myoheat::errors::AppResult<()> {
//! let engine = HeatEngine::new(EngineConfig::default(), source)?;
//! engine.load_sensitivity().await?;
//! let state = engine.rebuild_now().await?;
//! for (group_id, group) in &state {
//!     println!("{group_id}: load {:.2}", group.load);
//! }
//! # Ok(())
//! # }
//! ```

/// Event-list to per-group load aggregation
pub mod aggregator;

/// Overall-scope event cache state machine
pub mod cache;

/// Anatomical label classification
pub mod classifier;

/// Engine configuration constants
pub mod config;

/// Exponential half-life load decay
pub mod decay;

/// Composed engine instance
pub mod engine;

/// Unified error handling
pub mod errors;

/// Core data types
pub mod models;

/// Sensitivity overlay: heat, overdo, neglect
pub mod overlay;

/// Coaching recommendation generation
pub mod recommendations;

/// Injected collaborator traits (event source, clock)
pub mod source;

pub use classifier::{Classification, Classifier, ClassifierConfig};
pub use config::EngineConfig;
pub use engine::HeatEngine;
pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{
    GroupState, GroupStateMap, HeatSample, HeatScope, Recommendation, RecommendationKind,
    SensitivityMap, StimulusEvent,
};
pub use source::{Clock, EventPage, EventSource, SystemClock};
