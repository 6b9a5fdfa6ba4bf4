// ABOUTME: Overall-scope event cache state machine with a pure staleness predicate
// ABOUTME: Holds the bounded recent-history event window between rebuilds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scoped Event Cache
//!
//! Only the overall scope is cached; the live scope is whatever the session
//! editor last pushed. The cache is a plain state machine so staleness can
//! be tested without any fetch I/O: `should_rebuild` is pure in
//! `(built_at, stale_after, now)`.
//!
//! Fetch failures never clear the cache; stale events are retained and the
//! engine keeps operating in a degraded mode.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::StimulusEvent;

/// Cached overall-scope events with their build time
#[derive(Debug, Clone)]
pub struct ScopeCache {
    events: Vec<StimulusEvent>,
    built_at: Option<DateTime<Utc>>,
    stale_after: Duration,
}

impl ScopeCache {
    /// Create an empty cache with the given staleness window
    #[must_use]
    pub const fn new(stale_after: Duration) -> Self {
        Self {
            events: Vec::new(),
            built_at: None,
            stale_after,
        }
    }

    /// Whether a rebuild is due at `now`
    ///
    /// True when the cache was never built, was invalidated, or has aged past
    /// its staleness window. A clock that moved backwards counts as fresh.
    #[must_use]
    pub fn should_rebuild(&self, now: DateTime<Utc>) -> bool {
        let Some(built_at) = self.built_at else {
            return true;
        };
        if self.events.is_empty() {
            return true;
        }
        match (now - built_at).to_std() {
            Ok(age) => age > self.stale_after,
            Err(_) => false,
        }
    }

    /// Replace the cached events after a successful source walk
    pub fn store(&mut self, events: Vec<StimulusEvent>, now: DateTime<Utc>) {
        self.events = events;
        self.built_at = Some(now);
    }

    /// Drop the cache contents, forcing the next rebuild to refetch
    pub fn invalidate(&mut self) {
        self.events.clear();
        self.built_at = None;
    }

    /// Cached events backing the current overall snapshot
    #[must_use]
    pub fn events(&self) -> &[StimulusEvent] {
        &self.events
    }

    /// When the cache was last built, if ever
    #[must_use]
    pub const fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }
}
