//! Search engine for cinesearch.
//!
//! Normalises the upstream's fixed 10-item pages into larger logical pages
//! and coordinates a single active search session on top of them.

/// Logical page aggregation over upstream pages.
pub mod aggregator;
/// Cooperative cancellation of in-flight searches.
pub mod cancel;
/// Search criteria and duplicate-detection signatures.
pub mod criteria;
/// Engine error taxonomy.
pub mod error;
/// Fixed paging limits.
pub mod limits;
/// Search session controller and its state.
pub mod session;

#[cfg(test)]
mod test_support;

pub use aggregator::{LogicalPage, fetch_logical_page};
pub use cancel::CancelToken;
pub use criteria::{SearchCriteria, SearchSignature, is_valid_query};
pub use error::SearchError;
#[allow(clippy::module_name_repetitions)]
pub use session::{SearchSession, SessionAction, SessionState, SessionStatus, SubmitOutcome};
