//! Engine error taxonomy.

use cinesearch_api::omdb::UpstreamError;

/// Failure of a logical-page search.
///
/// `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Query shorter than two characters; the upstream is never contacted.
    #[error("Please enter at least 2 characters to search")]
    InvalidQuery,

    /// Logical page 0.
    #[error("Page numbers start at 1 (got {page}).")]
    InvalidPage {
        /// Requested page.
        page: u32,
    },

    /// Logical page beyond the configured maximum.
    #[error("Search limited to {max} pages. Try a more specific search.")]
    PageLimitExceeded {
        /// Highest page that may be requested.
        max: u32,
    },

    /// Failure reported by the upstream client.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A newer request superseded this one.
    #[error("search was superseded by a newer request")]
    Cancelled,
}
