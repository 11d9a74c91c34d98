use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::Mutex, task::JoinHandle};

use super::session::{DebounceTicket, ResponseOutcome, SearchIssue, SearchSession, SearchSnapshot};
use crate::{
    error::{AppError, AppResult},
    models::{CatalogId, MediaKind, NavigationTarget},
    services::catalog::CatalogClient,
};

/// Quiet period after the last keystroke before a search is issued
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Session plus the timer armed for its current debounce epoch
///
/// Kept under one lock so a ticket and its timer are always swapped in together.
struct SearchState {
    session: SearchSession,
    pending_timer: Option<JoinHandle<()>>,
}

impl SearchState {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending_timer.take() {
            timer.abort();
        }
    }
}

/// Drives one search session: arms debounce timers and issues catalog requests
///
/// Only the latest timer is kept; older ones are aborted. Requests are never aborted,
/// a late response is dropped by the session's epoch check instead.
pub struct SearchController {
    state: Arc<Mutex<SearchState>>,
    catalog: Arc<dyn CatalogClient>,
    debounce: Duration,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self::with_debounce(catalog, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(catalog: Arc<dyn CatalogClient>, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SearchState {
                session: SearchSession::new(),
                pending_timer: None,
            })),
            catalog,
            debounce,
        }
    }

    /// Records a keystroke and (re)arms the debounce timer
    pub async fn set_query_text(&self, text: impl Into<String>) -> SearchSnapshot {
        let mut state = self.state.lock().await;
        if state.session.is_closed() {
            return state.session.snapshot();
        }

        let ticket = state.session.set_query_text(text);
        let timer = tokio::spawn(Self::run_debounce(
            self.state.clone(),
            self.catalog.clone(),
            self.debounce,
            ticket,
        ));

        if let Some(previous) = state.pending_timer.replace(timer) {
            previous.abort();
        }

        state.session.snapshot()
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        self.state.lock().await.session.snapshot()
    }

    /// Picks one of the displayed results and ends the session
    pub async fn select_result(
        &self,
        media_kind: MediaKind,
        id: CatalogId,
    ) -> AppResult<NavigationTarget> {
        let target = {
            let mut state = self.state.lock().await;
            if state.session.find_result(media_kind, id).is_none() {
                return Err(AppError::NotFound(format!(
                    "{} {} is not among the current results",
                    media_kind, id
                )));
            }
            state.cancel_timer();
            state.session.select_result(media_kind, id)
        };

        tracing::info!(media_kind = %media_kind, id, path = %target.path, "Search result selected");

        Ok(target)
    }

    /// Ends the session. Outstanding timers and requests become no-ops.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.session.close();
        state.cancel_timer();
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.session.is_closed()
    }

    async fn run_debounce(
        state: Arc<Mutex<SearchState>>,
        catalog: Arc<dyn CatalogClient>,
        debounce: Duration,
        ticket: DebounceTicket,
    ) {
        tokio::time::sleep(debounce).await;

        let issue = state.lock().await.session.debounce_elapsed(ticket);
        let Some(issue) = issue else {
            tracing::debug!(debounce_epoch = ticket.epoch, "Debounce fired without a search");
            return;
        };

        tracing::debug!(
            request_epoch = issue.epoch,
            query = %issue.query,
            catalog = catalog.name(),
            "Issuing catalog search"
        );

        // Detached from the timer so that re-arming the timer never cancels a request
        tokio::spawn(Self::run_request(state, catalog, issue));
    }

    async fn run_request(
        state: Arc<Mutex<SearchState>>,
        catalog: Arc<dyn CatalogClient>,
        issue: SearchIssue,
    ) {
        let response = catalog.search_multi(&issue.query).await;
        if let Err(e) = &response {
            tracing::warn!(error = %e, request_epoch = issue.epoch, "Catalog search failed");
        }

        let outcome = state
            .lock()
            .await
            .session
            .accept_response(issue.epoch, response);
        match outcome {
            ResponseOutcome::Committed => {
                tracing::debug!(request_epoch = issue.epoch, "Search results committed")
            }
            ResponseOutcome::Failed => {}
            ResponseOutcome::Discarded => tracing::debug!(
                request_epoch = issue.epoch,
                query = %issue.query,
                "Discarded stale search response"
            ),
        }
    }
}
