// ABOUTME: Collaborator traits injected into the engine: event source and clock
// ABOUTME: Implemented by the persistence layer; mocked in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Engine Collaborators
//!
//! The engine never reaches for ambient state: history paging, sensitivity
//! persistence and the current time all arrive through these traits, so the
//! whole engine is testable with fixed clocks and scripted sources.

use chrono::{DateTime, Utc};

use crate::errors::AppResult;
use crate::models::{GroupWeights, SensitivityMap, StimulusEvent};

/// One page of historical stimulus events, newest-first
#[derive(Debug, Clone)]
pub struct EventPage {
    /// Events in this page
    pub events: Vec<StimulusEvent>,
    /// Total pages available at the requested page size
    pub total_pages: u32,
}

/// Persistence collaborator supplying events, fallback weights and sensitivity
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch one page of history, newest-first with stable paging
    ///
    /// `per_page` is the number of sessions batched into one page. Used only
    /// by the overall-scope rebuild.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the source is unreachable; the engine keeps
    /// its cached events and surfaces the error to the caller.
    async fn fetch_events_page(&self, page: u32, per_page: u32) -> AppResult<EventPage>;

    /// Fallback group-weight lookup for events that carry none inline
    ///
    /// # Errors
    ///
    /// Returns `AppError` on source failure; `Ok(None)` when the exercise is
    /// unknown (the event then contributes nothing).
    async fn resolve_group_weights(&self, exercise_id: &str) -> AppResult<Option<GroupWeights>>;

    /// Read the persisted per-group sensitivity map
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the source is unreachable.
    async fn fetch_sensitivity_map(&self) -> AppResult<SensitivityMap>;

    /// Persist the sensitivity map
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the source is unreachable.
    async fn save_sensitivity_map(&self, map: &SensitivityMap) -> AppResult<()>;
}

/// Time provider injected into the engine
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
