// ABOUTME: HeatEngine instance composing scopes, cache, aggregator, overlay, and recommendations
// ABOUTME: Cheaply clonable handle; all collaborators injected, no ambient singletons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Heat Engine
//!
//! The composed engine instance. Holds the live and overall scopes, the
//! overall-scope event cache, the aggregated snapshot and the sensitivity
//! overlay, and rebuilds on demand against the injected `EventSource`.
//!
//! The overall cache mutex is held across the history walk, so concurrent
//! `rebuild_now` callers coalesce: the second caller re-checks staleness
//! after the first finishes and reads the freshly built cache instead of
//! issuing duplicate fetches. There is no cancellation; a rebuild that goes
//! stale mid-fetch completes and overwrites.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::aggregator::LoadAggregator;
use crate::cache::ScopeCache;
use crate::classifier::known_group_ids;
use crate::config::EngineConfig;
use crate::errors::AppResult;
use crate::models::{
    GroupStateMap, GroupWeights, HeatSample, HeatScope, Recommendation, SensitivityMap,
    StimulusEvent,
};
use crate::overlay::SensitivityOverlay;
use crate::recommendations::RecommendationEngine;
use crate::source::{Clock, EventSource, SystemClock};

/// Mutable engine state: scopes, events backing the snapshot, and the snapshot
#[derive(Debug)]
struct EngineState {
    scope: HeatScope,
    live_events: Vec<StimulusEvent>,
    current_events: Vec<StimulusEvent>,
    fallback_weights: HashMap<String, GroupWeights>,
    snapshot: GroupStateMap,
}

impl EngineState {
    fn new() -> Self {
        Self {
            scope: HeatScope::Overall,
            live_events: Vec::new(),
            current_events: Vec::new(),
            fallback_weights: HashMap::new(),
            snapshot: GroupStateMap::new(),
        }
    }
}

struct Inner {
    config: EngineConfig,
    source: Arc<dyn EventSource>,
    clock: Arc<dyn Clock>,
    aggregator: LoadAggregator,
    recommender: RecommendationEngine,
    state: RwLock<EngineState>,
    overall: Mutex<ScopeCache>,
    overlay: RwLock<SensitivityOverlay>,
}

/// Muscle load estimation engine
///
/// Clonable handle over shared state; readers see immutable snapshots
/// between rebuilds.
#[derive(Clone)]
pub struct HeatEngine {
    inner: Arc<Inner>,
}

impl HeatEngine {
    /// Create an engine with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the configuration is invalid.
    pub fn with_clock(
        config: EngineConfig,
        source: Arc<dyn EventSource>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        config.validate()?;
        let aggregator = LoadAggregator::new(config.half_life_hours);
        let recommender = RecommendationEngine::new(&config);
        let overlay = SensitivityOverlay::new(config.clone());
        let overall = ScopeCache::new(config.cache.stale_after);
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                source,
                clock,
                aggregator,
                recommender,
                state: RwLock::new(EngineState::new()),
                overall: Mutex::new(overall),
                overlay: RwLock::new(overlay),
            }),
        })
    }

    /// Create an engine backed by the system clock
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the configuration is invalid.
    pub fn new(config: EngineConfig, source: Arc<dyn EventSource>) -> AppResult<Self> {
        Self::with_clock(config, source, Arc::new(SystemClock))
    }

    /// Currently active scope
    pub async fn scope(&self) -> HeatScope {
        self.inner.state.read().await.scope
    }

    /// Switch the active scope
    ///
    /// Does not invalidate either scope's data; it only changes which event
    /// population feeds the next rebuild.
    pub async fn set_scope(&self, scope: HeatScope) {
        self.inner.state.write().await.scope = scope;
    }

    /// Replace the live-session event list
    ///
    /// When live mode is active the snapshot is rebuilt immediately so a
    /// following read is never stale.
    pub async fn push_live_events(&self, events: Vec<StimulusEvent>) {
        let now = self.inner.clock.now();
        let mut guard = self.inner.state.write().await;
        let state = &mut *guard;
        state.live_events = events;
        if state.scope == HeatScope::Live {
            state.current_events = state.live_events.clone();
            state.snapshot =
                self.inner
                    .aggregator
                    .rebuild(&state.current_events, &state.fallback_weights, now);
        }
    }

    /// Merge entries into the fallback exercise-to-weights table
    pub async fn set_exercise_weights(&self, weights: HashMap<String, GroupWeights>) {
        self.inner
            .state
            .write()
            .await
            .fallback_weights
            .extend(weights);
    }

    /// Drop the overall-scope cache, forcing the next rebuild to refetch
    pub async fn invalidate_overall_cache(&self) {
        self.inner.overall.lock().await.invalidate();
    }

    /// Rebuild the snapshot for the active scope and return it
    ///
    /// Live scope aggregates the pushed session sets synchronously. Overall
    /// scope serves from cache while fresh and otherwise walks the event
    /// source newest-first up to the configured session cap.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the event source fails during an overall
    /// walk. The previously cached events are retained and remain usable.
    pub async fn rebuild_now(&self) -> AppResult<GroupStateMap> {
        let scope = self.scope().await;
        let events = match scope {
            HeatScope::Live => self.inner.state.read().await.live_events.clone(),
            HeatScope::Overall => self.overall_events().await?,
        };
        self.resolve_missing_weights(&events).await;

        let now = self.inner.clock.now();
        let mut guard = self.inner.state.write().await;
        let state = &mut *guard;
        state.current_events = events;
        state.snapshot =
            self.inner
                .aggregator
                .rebuild(&state.current_events, &state.fallback_weights, now);
        Ok(state.snapshot.clone())
    }

    /// Cheap re-aggregation of the already-held event list at the current time
    ///
    /// No I/O: lets the render loop refresh decay between fetches.
    pub async fn tick(&self) -> GroupStateMap {
        let now = self.inner.clock.now();
        let mut guard = self.inner.state.write().await;
        let state = &mut *guard;
        state.snapshot =
            self.inner
                .aggregator
                .rebuild(&state.current_events, &state.fallback_weights, now);
        state.snapshot.clone()
    }

    /// Current read-only snapshot of per-group state
    pub async fn group_state(&self) -> GroupStateMap {
        self.inner.state.read().await.snapshot.clone()
    }

    /// Presentation heat sample for one group at the current time
    pub async fn heat(&self, group_id: &str) -> HeatSample {
        let now = self.inner.clock.now();
        let state = self.inner.state.read().await;
        let overlay = self.inner.overlay.read().await;
        overlay.heat(state.snapshot.get(group_id), group_id, now)
    }

    /// Whether a group counts as neglected at the current time
    pub async fn is_neglected(&self, group_id: &str) -> bool {
        let now = self.inner.clock.now();
        let state = self.inner.state.read().await;
        let overlay = self.inner.overlay.read().await;
        overlay.is_neglected(state.snapshot.get(group_id), now)
    }

    /// Prioritized coaching recommendations across all known groups
    pub async fn recommendations(&self) -> Vec<Recommendation> {
        let now = self.inner.clock.now();
        let group_ids = known_group_ids();
        let state = self.inner.state.read().await;
        let overlay = self.inner.overlay.read().await;
        self.inner
            .recommender
            .generate(&group_ids, &state.snapshot, &overlay, now)
    }

    /// Fetch the persisted sensitivity map and install it in the overlay
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the source is unreachable; the overlay keeps
    /// its current map.
    pub async fn load_sensitivity(&self) -> AppResult<SensitivityMap> {
        let raw = self.inner.source.fetch_sensitivity_map().await?;
        let mut overlay = self.inner.overlay.write().await;
        overlay.set_map(raw);
        Ok(overlay.map().clone())
    }

    /// Persist the overlay's current sensitivity map
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the source is unreachable.
    pub async fn save_sensitivity(&self) -> AppResult<()> {
        let map = self.inner.overlay.read().await.map().clone();
        self.inner.source.save_sensitivity_map(&map).await
    }

    /// Replace the sensitivity map (sanitized on ingest)
    pub async fn set_sensitivity_map(&self, map: SensitivityMap) {
        self.inner.overlay.write().await.set_map(map);
    }

    /// Set one sensitivity value for each group in `groups`
    pub async fn set_sensitivity_for_groups(&self, groups: &[String], value: f64) {
        self.inner
            .overlay
            .write()
            .await
            .set_for_groups(groups, value);
    }

    /// Current sensitivity map
    pub async fn sensitivity_map(&self) -> SensitivityMap {
        self.inner.overlay.read().await.map().clone()
    }

    /// Reset all local engine state after an account data reset
    ///
    /// Returns to overall scope with empty events, caches, snapshot and
    /// sensitivity; the next rebuild refetches from the source.
    pub async fn clear_local_state(&self) {
        {
            let mut state = self.inner.state.write().await;
            *state = EngineState::new();
        }
        self.inner.overall.lock().await.invalidate();
        self.inner.overlay.write().await.clear();
    }

    /// Events for the overall scope, from cache when fresh
    ///
    /// The cache mutex is held across the walk, which both serializes
    /// rebuilds and coalesces concurrent callers onto one fetch.
    async fn overall_events(&self) -> AppResult<Vec<StimulusEvent>> {
        let mut cache = self.inner.overall.lock().await;
        let now = self.inner.clock.now();
        if cache.should_rebuild(now) {
            debug!("overall cache stale, walking history");
            let events = self.walk_history().await?;
            cache.store(events.clone(), self.inner.clock.now());
            Ok(events)
        } else {
            debug!(events = cache.events().len(), "overall cache hit");
            Ok(cache.events().to_vec())
        }
    }

    /// Walk history pages newest-first up to the configured session cap
    async fn walk_history(&self) -> AppResult<Vec<StimulusEvent>> {
        let per_page = self.inner.config.cache.sessions_per_page;
        let max_pages = self.inner.config.cache.max_sessions.div_ceil(per_page);
        let mut events = Vec::new();
        let mut page = 1_u32;
        loop {
            let batch = self.inner.source.fetch_events_page(page, per_page).await?;
            if batch.events.is_empty() {
                break;
            }
            events.extend(batch.events);
            if page >= batch.total_pages || page >= max_pages {
                break;
            }
            page += 1;
        }
        debug!(pages = page, events = events.len(), "walked overall history");
        Ok(events)
    }

    /// Resolve fallback weights for events that carry none inline
    ///
    /// Best-effort: lookup failures are logged and the event simply
    /// contributes nothing, matching the skip policy for malformed input.
    async fn resolve_missing_weights(&self, events: &[StimulusEvent]) {
        let unresolved: Vec<String> = {
            let state = self.inner.state.read().await;
            let mut ids: Vec<String> = events
                .iter()
                .filter(|event| event.group_weights.is_empty())
                .map(|event| event.exercise_id.clone())
                .filter(|id| !state.fallback_weights.contains_key(id))
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        if unresolved.is_empty() {
            return;
        }

        let mut resolved: HashMap<String, GroupWeights> = HashMap::new();
        for exercise_id in unresolved {
            match self.inner.source.resolve_group_weights(&exercise_id).await {
                Ok(Some(weights)) => {
                    resolved.insert(exercise_id, weights);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(%exercise_id, error = %err, "fallback weight lookup failed");
                }
            }
        }
        if !resolved.is_empty() {
            self.inner
                .state
                .write()
                .await
                .fallback_weights
                .extend(resolved);
        }
    }
}
