//! Search session state and its transition function.

use cinesearch_api::omdb::{DetailRecord, SearchResultItem};

use crate::criteria::SearchCriteria;
use crate::limits::page_count;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Nothing requested yet, or results were cleared.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request published a result.
    Success,
    /// The last request published an error.
    Error,
}

/// Read-only view published to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SessionState {
    /// Current phase.
    pub status: SessionStatus,
    /// Criteria of the last published search.
    pub criteria: SearchCriteria,
    /// Items of the current logical page.
    pub items: Vec<SearchResultItem>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// User-facing message of the last failure.
    pub error: Option<String>,
    /// Selected title, if any.
    pub detail: Option<Box<DetailRecord>>,
    /// Capped total result count.
    pub total_count: u32,
}

impl SessionState {
    /// Number of logical pages the current total spans.
    #[must_use]
    pub const fn page_count(&self) -> u32 {
        page_count(self.total_count)
    }
}

/// State transition requests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SessionAction {
    /// Starts (`true`) or ends (`false`) a request.
    SetLoading(bool),
    /// Sets or clears the error message.
    SetError(Option<String>),
    /// Publishes a logical page.
    SetResults {
        /// Page items.
        items: Vec<SearchResultItem>,
        /// Capped total count.
        total_count: u32,
    },
    /// Publishes a failed search: results are dropped, only the error remains.
    SearchFailed(String),
    /// Records the criteria of the published search.
    SetCriteria(SearchCriteria),
    /// Sets or clears the detail slot.
    SetDetail(Option<Box<DetailRecord>>),
    /// Drops results and error.
    ClearResults,
    /// Restores the initial state.
    Reset,
}

impl SessionAction {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetLoading(_) => "SetLoading",
            Self::SetError(_) => "SetError",
            Self::SetResults { .. } => "SetResults",
            Self::SearchFailed(_) => "SearchFailed",
            Self::SetCriteria(_) => "SetCriteria",
            Self::SetDetail(_) => "SetDetail",
            Self::ClearResults => "ClearResults",
            Self::Reset => "Reset",
        }
    }
}

/// Applies `action` to `state`.
pub fn reduce(state: &mut SessionState, action: SessionAction) {
    match action {
        SessionAction::SetLoading(true) => {
            state.loading = true;
            state.error = None;
            state.status = SessionStatus::Loading;
        }
        SessionAction::SetLoading(false) => {
            state.loading = false;
            if state.error.is_some() {
                state.status = SessionStatus::Error;
            } else if state.status == SessionStatus::Loading {
                state.status = SessionStatus::Success;
            }
        }
        SessionAction::SetError(Some(message)) => {
            state.error = Some(message);
            state.loading = false;
            state.status = SessionStatus::Error;
        }
        SessionAction::SetError(None) => {
            state.error = None;
            if state.status == SessionStatus::Error {
                state.status = SessionStatus::Idle;
            }
        }
        SessionAction::SetResults { items, total_count } => {
            state.items = items;
            state.total_count = total_count;
            state.loading = false;
            state.error = None;
            state.status = SessionStatus::Success;
        }
        SessionAction::SearchFailed(message) => {
            state.items.clear();
            state.total_count = 0;
            state.error = Some(message);
            state.loading = false;
            state.status = SessionStatus::Error;
        }
        SessionAction::SetCriteria(criteria) => {
            state.criteria = criteria;
        }
        SessionAction::SetDetail(detail) => {
            state.detail = detail;
        }
        SessionAction::ClearResults => {
            state.items.clear();
            state.total_count = 0;
            state.error = None;
            state.loading = false;
            state.status = SessionStatus::Idle;
        }
        SessionAction::Reset => {
            *state = SessionState::default();
        }
    }
}
