//! Single active search session.
//!
//! `SearchSession` owns the published `SessionState`, supersedes stale
//! searches through a `CancelToken`, and suppresses repeated identical
//! submissions by remembering the last accepted `SearchSignature`.
#![allow(clippy::future_not_send)]

mod state;

use std::sync::Arc;

use cinesearch_api::omdb::LocalOmdbApi;
use tokio::sync::{Mutex, watch};
use tracing::{debug, instrument, warn};

pub use state::{SessionAction, SessionState, SessionStatus, reduce};

use crate::aggregator::fetch_logical_page;
use crate::cancel::CancelToken;
use crate::criteria::{SearchCriteria, SearchSignature, is_valid_query};
use crate::error::SearchError;

/// What a `submit_search` or `fetch_detail` call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results were published.
    Published,
    /// An error message was published.
    Failed,
    /// Same criteria as the last accepted search; nothing happened.
    Duplicate,
    /// A newer request or `clear_results` took over; nothing was published.
    Superseded,
    /// The query failed validation before any upstream call.
    Rejected,
}

/// Bookkeeping for the request that currently owns the session.
#[derive(Debug, Default)]
struct InFlight {
    token: Option<CancelToken>,
    last_signature: Option<SearchSignature>,
}

/// Search session controller.
#[derive(Debug)]
pub struct SearchSession<A> {
    api: Arc<A>,
    state: watch::Sender<SessionState>,
    in_flight: Mutex<InFlight>,
}

impl<A> SearchSession<A>
where
    A: LocalOmdbApi + Send + Sync,
{
    /// Creates an idle session over `api`.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            api,
            state,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    /// Returns a clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Runs one logical-page search and publishes its outcome.
    ///
    /// Invalid queries publish `InvalidQuery` without touching the upstream.
    /// Criteria identical to the last accepted search are ignored. Any
    /// in-flight search is cancelled; its result is never published.
    #[instrument(skip_all, fields(query = %criteria.query, page = criteria.page))]
    pub async fn submit_search(&self, criteria: SearchCriteria) -> SubmitOutcome {
        if !is_valid_query(&criteria.query) {
            debug!("query rejected before upstream call");
            self.dispatch(SessionAction::SearchFailed(
                SearchError::InvalidQuery.to_string(),
            ));
            return SubmitOutcome::Rejected;
        }

        let token = CancelToken::new();
        {
            let mut in_flight = self.in_flight.lock().await;
            let signature = criteria.signature();
            if in_flight.last_signature.as_ref() == Some(&signature) {
                debug!("duplicate search ignored");
                return SubmitOutcome::Duplicate;
            }
            in_flight.last_signature = Some(signature);
            if let Some(previous) = in_flight.token.replace(token.clone()) {
                previous.cancel();
            }
            self.dispatch(SessionAction::SetLoading(true));
        }

        let result = fetch_logical_page(self.api.as_ref(), &criteria, &token).await;

        let in_flight = self.in_flight.lock().await;
        if token.is_cancelled() {
            debug!("search superseded, result dropped");
            return SubmitOutcome::Superseded;
        }
        let outcome = match result {
            Ok(page) => {
                debug!(items = page.items.len(), total = page.total_count, "search published");
                self.dispatch(SessionAction::SetResults {
                    items: page.items,
                    total_count: page.total_count,
                });
                self.dispatch(SessionAction::SetCriteria(criteria));
                SubmitOutcome::Published
            }
            Err(SearchError::Cancelled) => SubmitOutcome::Superseded,
            Err(e) => {
                warn!(error = %e, "search failed");
                self.dispatch(SessionAction::SearchFailed(e.to_string()));
                SubmitOutcome::Failed
            }
        };
        drop(in_flight);
        outcome
    }

    /// Looks up one title and publishes it into the detail slot.
    ///
    /// `loading` is cleared afterwards whatever the outcome.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn fetch_detail(&self, id: &str) -> SubmitOutcome {
        self.dispatch(SessionAction::SetLoading(true));
        let outcome = match self.api.detail(id).await {
            Ok(record) => {
                self.dispatch(SessionAction::SetDetail(Some(Box::new(record))));
                SubmitOutcome::Published
            }
            Err(e) => {
                warn!(error = %e, "detail lookup failed");
                self.dispatch(SessionAction::SetDetail(None));
                self.dispatch(SessionAction::SetError(Some(e.to_string())));
                SubmitOutcome::Failed
            }
        };
        self.dispatch(SessionAction::SetLoading(false));
        outcome
    }

    /// Cancels in-flight work, drops results and forgets the last signature.
    pub async fn clear_results(&self) {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(token) = in_flight.token.take() {
            token.cancel();
        }
        in_flight.last_signature = None;
        self.dispatch(SessionAction::ClearResults);
    }

    /// Clears the detail slot only.
    pub fn clear_detail(&self) {
        self.dispatch(SessionAction::SetDetail(None));
    }

    /// Cancels in-flight work and restores the initial state.
    pub async fn reset(&self) {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(token) = in_flight.token.take() {
            token.cancel();
        }
        in_flight.last_signature = None;
        self.dispatch(SessionAction::Reset);
    }

    fn dispatch(&self, action: SessionAction) {
        debug!(action = action.name(), "dispatch");
        self.state.send_modify(|state| reduce(state, action));
    }
}
