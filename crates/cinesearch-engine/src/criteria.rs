//! Search criteria and duplicate-detection signatures.

use cinesearch_api::omdb::TypeFilter;

use crate::limits::MIN_QUERY_LEN;

/// Returns `true` when `query` has at least two characters after trimming.
#[must_use]
pub fn is_valid_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// What the caller asked for: query, type filter and logical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Trimmed search text.
    pub query: String,
    /// Media type filter.
    pub type_filter: TypeFilter,
    /// 1-based logical page.
    pub page: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            type_filter: TypeFilter::All,
            page: 1,
        }
    }
}

impl SearchCriteria {
    /// Creates criteria, trimming surrounding whitespace from `query`.
    pub fn new(query: impl AsRef<str>, type_filter: TypeFilter, page: u32) -> Self {
        Self {
            query: String::from(query.as_ref().trim()),
            type_filter,
            page,
        }
    }

    /// Signature used to suppress duplicate submissions.
    #[must_use]
    pub fn signature(&self) -> SearchSignature {
        SearchSignature {
            query: self.query.clone(),
            type_filter: self.type_filter,
            page: self.page,
        }
    }
}

/// The `(query, type filter, logical page)` tuple of an accepted search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchSignature {
    query: String,
    type_filter: TypeFilter,
    page: u32,
}
