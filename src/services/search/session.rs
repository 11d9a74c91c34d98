//! Search session state machine.
//!
//! Timers and network calls live outside this type. The session only hands out
//! epoch-tagged tickets and decides, when a ticket comes back, whether it is still
//! current. That keeps the acceptance rule testable without any clock.

use serde::Serialize;

use crate::{
    error::AppError,
    models::{CatalogId, CatalogRecord, MediaKind, NavigationTarget, ResultItem},
};

/// Trimmed queries shorter than this never reach the catalog
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Debouncing,
    Loading,
    Ready,
    Error,
}

/// Proof that a debounce timer was armed for a particular edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub epoch: u64,
}

/// A catalog search the caller must now perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIssue {
    pub epoch: u64,
    pub query: String,
}

/// What happened to a response handed back to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Committed,
    Failed,
    /// Issued before the latest request, or the session is closed
    Discarded,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultRow {
    #[serde(flatten)]
    pub item: ResultItem,
    pub poster_url: Option<String>,
}

/// Render-ready view of a session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<ResultRow>,
    pub error: Option<String>,
    /// A finished search for a real query that matched nothing
    pub no_results: bool,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    query_text: String,
    debounce_epoch: u64,
    request_epoch: u64,
    status: SearchStatus,
    results: Vec<ResultItem>,
    error: Option<String>,
    closed: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            query_text: String::new(),
            debounce_epoch: 0,
            request_epoch: 0,
            status: SearchStatus::Idle,
            results: Vec::new(),
            error: None,
            closed: false,
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn debounce_epoch(&self) -> u64 {
        self.debounce_epoch
    }

    pub fn request_epoch(&self) -> u64 {
        self.request_epoch
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Records a keystroke. Any ticket handed out earlier stops being current.
    ///
    /// A closed session ignores the edit and hands back a ticket that never fires.
    pub fn set_query_text(&mut self, text: impl Into<String>) -> DebounceTicket {
        if !self.closed {
            self.query_text = text.into();
            self.debounce_epoch += 1;
            self.status = SearchStatus::Debouncing;
        }

        DebounceTicket {
            epoch: self.debounce_epoch,
        }
    }

    /// The debounce timer for `ticket` fired
    ///
    /// Returns the search to issue, or `None` when the ticket is stale, the session is
    /// closed, or the query is too short (which resets results).
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<SearchIssue> {
        if self.closed || ticket.epoch != self.debounce_epoch {
            return None;
        }

        let query = self.query_text.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.status = SearchStatus::Idle;
            self.results.clear();
            self.error = None;
            return None;
        }

        let query = query.to_string();
        self.request_epoch += 1;
        self.status = SearchStatus::Loading;
        self.error = None;

        Some(SearchIssue {
            epoch: self.request_epoch,
            query,
        })
    }

    /// A catalog response tagged with `epoch` arrived
    ///
    /// Only the most recently issued request may commit, regardless of arrival order.
    pub fn accept_response(
        &mut self,
        epoch: u64,
        response: Result<Vec<CatalogRecord>, AppError>,
    ) -> ResponseOutcome {
        if self.closed || epoch != self.request_epoch {
            return ResponseOutcome::Discarded;
        }

        match response {
            Ok(records) => {
                self.results = records
                    .into_iter()
                    .filter_map(CatalogRecord::into_result_item)
                    .collect();
                self.status = SearchStatus::Ready;
                self.error = None;
                ResponseOutcome::Committed
            }
            Err(e) => {
                // Results from the last good search stay in place
                self.status = SearchStatus::Error;
                self.error = Some(e.user_message());
                ResponseOutcome::Failed
            }
        }
    }

    /// The user picked a result: the surface closes and the query is cleared
    pub fn select_result(&mut self, media_kind: MediaKind, id: CatalogId) -> NavigationTarget {
        self.query_text.clear();
        self.close();
        NavigationTarget::detail_page(media_kind, id)
    }

    /// Finds a currently displayed result
    pub fn find_result(&self, media_kind: MediaKind, id: CatalogId) -> Option<&ResultItem> {
        self.results
            .iter()
            .find(|item| item.media_kind == media_kind && item.id == id)
    }

    /// After this, timers and responses still in flight are no-ops
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let results: Vec<ResultRow> = self
            .results
            .iter()
            .map(|item| ResultRow {
                poster_url: item.poster_url(),
                item: item.clone(),
            })
            .collect();

        SearchSnapshot {
            query: self.query_text.clone(),
            status: self.status,
            no_results: self.status == SearchStatus::Ready
                && results.is_empty()
                && self.query_text.trim().chars().count() >= MIN_QUERY_CHARS,
            results,
            error: self.error.clone(),
        }
    }
}
