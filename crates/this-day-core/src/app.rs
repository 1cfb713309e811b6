//! Application state as an explicit, replace-on-update record.
//!
//! [`AppState`] owns the form input, filters, sort order, the last fetched
//! batch, and the filtered/sorted view over it. Every transition consumes
//! the state and returns the next one; nothing is mutated behind the
//! caller's back.
//!
//! # Search lifecycle
//!
//! ```text
//! query() ──▶ begin_search(query) ──▶ (state, RequestId)
//!                                        │
//!              fetch + enrich (async) ◀──┘
//!                     │
//!      complete_search(id, events) | fail_search(id, error)
//! ```
//!
//! Each search gets a fresh, increasing [`RequestId`]. A completion or
//! failure carrying an id other than the latest issued is stale and is
//! dropped, so a slow response can never overwrite a newer one.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::filter::{self, FilterSet, SortKey};
use crate::models::EnrichedEvent;
use crate::query::SearchQuery;
use crate::source::Origin;
use crate::store::PersistedUIState;

/// Tag of an issued search. Strictly increasing per [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Where the search flow currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// No search issued yet.
    #[default]
    Idle,
    Loading {
        request: RequestId,
        query: SearchQuery,
    },
    Failed {
        query: SearchQuery,
        error: SearchError,
    },
    Loaded {
        query: SearchQuery,
        origin: Origin,
    },
}

/// The whole UI-facing state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    ui: PersistedUIState,
    last_issued: u64,
    phase: Phase,
    batch: Vec<EnrichedEvent>,
    visible: Vec<EnrichedEvent>,
}

impl AppState {
    /// Start from a previously persisted UI state.
    pub fn from_persisted(ui: PersistedUIState) -> Self {
        Self {
            ui,
            ..Self::default()
        }
    }

    /// The part of the state that should be written to storage.
    pub fn persisted(&self) -> PersistedUIState {
        self.ui.clone()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn filters(&self) -> &FilterSet {
        &self.ui.filters
    }

    pub fn sort(&self) -> SortKey {
        self.ui.sort
    }

    pub fn filters_collapsed(&self) -> bool {
        self.ui.filters_collapsed
    }

    /// Every event of the last successful fetch, unfiltered.
    pub fn batch(&self) -> &[EnrichedEvent] {
        &self.batch
    }

    /// The filtered, sorted view over [`batch`](Self::batch).
    pub fn visible(&self) -> &[EnrichedEvent] {
        &self.visible
    }

    /// Set the form's date fields.
    pub fn with_date(mut self, day: Option<u8>, month: Option<u8>, year: Option<i64>) -> Self {
        self.ui.day = day;
        self.ui.month = month;
        self.ui.year = year;
        self
    }

    /// Validate the form's date fields.
    pub fn query(&self) -> Result<SearchQuery, SearchError> {
        SearchQuery::new(self.ui.day, self.ui.month, self.ui.year)
    }

    /// Issue a new search. Any search still in flight becomes stale.
    pub fn begin_search(mut self, query: SearchQuery) -> (Self, RequestId) {
        self.last_issued += 1;
        let request = RequestId(self.last_issued);
        self.phase = Phase::Loading { request, query };
        (self, request)
    }

    /// Accept the enriched batch for `request`, replacing the previous one.
    pub fn complete_search(
        mut self,
        request: RequestId,
        events: Vec<EnrichedEvent>,
        origin: Origin,
    ) -> Self {
        let Some(query) = self.pending_query(request) else {
            tracing::debug!(request = request.get(), "dropping stale search result");
            return self;
        };
        self.batch = events;
        self.phase = Phase::Loaded { query, origin };
        self.refresh()
    }

    /// Record a failure for `request`. The previous batch is discarded.
    pub fn fail_search(mut self, request: RequestId, error: SearchError) -> Self {
        let Some(query) = self.pending_query(request) else {
            tracing::debug!(request = request.get(), "dropping stale search failure");
            return self;
        };
        self.batch.clear();
        self.visible.clear();
        self.phase = Phase::Failed { query, error };
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.ui.filters = filters.normalized();
        self.refresh()
    }

    pub fn clear_filters(self) -> Self {
        self.with_filters(FilterSet::default())
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.ui.sort = sort;
        self.refresh()
    }

    pub fn toggle_filters(mut self) -> Self {
        self.ui.filters_collapsed = !self.ui.filters_collapsed;
        self
    }

    /// The query of the in-flight search, if `request` is that search.
    fn pending_query(&self, request: RequestId) -> Option<SearchQuery> {
        match &self.phase {
            Phase::Loading { request: r, query } if *r == request => Some(*query),
            _ => None,
        }
    }

    fn refresh(mut self) -> Self {
        self.visible = filter::apply(&self.batch, &self.ui.filters, self.ui.sort);
        self
    }
}
