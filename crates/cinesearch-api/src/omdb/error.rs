//! Upstream error taxonomy.
//!
//! `Display` output is the user-facing message; transport details are
//! logged where the error is classified.

/// Failure of a single upstream call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The search matched nothing.
    #[error("No results found for \"{query}\". Check the spelling or try different search terms.")]
    NotFound {
        /// Query that produced no results.
        query: String,
    },

    /// The query is too broad for the upstream to answer.
    #[error(
        "Too many results for \"{query}\". Try to be more specific in your search \
         (e.g., add year, director, etc.) or navigate through pages to explore all results."
    )]
    TooManyResults {
        /// Query that was too broad.
        query: String,
    },

    /// Detail lookup for an identifier the upstream no longer knows.
    #[error(
        "This movie or series is no longer available in the database. \
         Try searching for a different version or check the title."
    )]
    TitleUnavailable {
        /// Requested identifier.
        id: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout. Please check your internet connection.")]
    Timeout,

    /// The upstream host could not be reached at all.
    #[error("No internet connection. Please verify your connection and try again.")]
    NetworkUnavailable,

    /// A network-level failure without an HTTP status.
    #[error("Connection error. Please check your internet and try again.")]
    Connection,

    /// HTTP 401.
    #[error("Authentication error with the API. Please check your configuration.")]
    Auth,

    /// HTTP 5xx.
    #[error("Server is experiencing issues. Please try again in a few moments.")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// Any other non-success HTTP status.
    #[error("Connection error. Please check your internet and try again.")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Upstream error text that maps to no other kind, or an undecodable payload.
    #[error("{0}")]
    Upstream(String),
}

impl UpstreamError {
    /// Whether the failure is worth retrying.
    ///
    /// Every failure without an HTTP status is retried, as is 5xx.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::NetworkUnavailable | Self::Connection | Self::Server { .. }
        )
    }

    /// Classifies a transport error returned by `reqwest`.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::NetworkUnavailable
        } else if let Some(status) = err.status() {
            Self::from_status(status)
        } else {
            Self::Connection
        }
    }

    /// Classifies a non-success HTTP status.
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Self::Auth
        } else if status.is_server_error() {
            Self::Server {
                status: status.as_u16(),
            }
        } else {
            Self::Rejected {
                status: status.as_u16(),
            }
        }
    }

    /// Interprets the `Error` text of a failed search payload.
    pub(crate) fn from_search_message(query: &str, message: Option<&str>) -> Self {
        let message = message.unwrap_or("No results found");
        let lowered = message.to_lowercase();
        if lowered.contains("too many results") {
            Self::TooManyResults {
                query: String::from(query),
            }
        } else if lowered.contains("not found") {
            Self::NotFound {
                query: String::from(query),
            }
        } else {
            Self::Upstream(String::from(message))
        }
    }

    /// Interprets the `Error` text of a failed detail payload.
    pub(crate) fn from_detail_message(id: &str, message: Option<&str>) -> Self {
        let message = message.unwrap_or("Movie details not found");
        if message.to_lowercase().contains("not found") {
            Self::TitleUnavailable { id: String::from(id) }
        } else {
            Self::Upstream(String::from(message))
        }
    }
}
