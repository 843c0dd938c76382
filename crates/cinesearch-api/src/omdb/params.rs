//! OMDb request parameter types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Media type filter applied to a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    /// No filter; the `type` parameter is omitted.
    #[default]
    All,
    /// Movies only.
    Movie,
    /// Series only.
    Series,
}

impl TypeFilter {
    /// Returns the canonical token (`all`, `movie`, `series`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Returns the value sent as the upstream `type` parameter, if any.
    #[must_use]
    pub const fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Movie | Self::Series => Some(self.as_str()),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type filter token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type filter '{0}' (expected all, movie or series)")]
pub struct ParseTypeFilterError(String);

impl FromStr for TypeFilter {
    type Err = ParseTypeFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            _ => Err(ParseTypeFilterError(String::from(s))),
        }
    }
}

/// Parameters for a single upstream search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search text (`s` parameter).
    pub query: String,
    /// Media type filter (`type` parameter).
    pub type_filter: TypeFilter,
    /// 1-based upstream page (`page` parameter, 10 items per page).
    pub page: u32,
}

impl SearchParams {
    /// Creates new search params for the first upstream page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            type_filter: TypeFilter::All,
            page: 1,
        }
    }

    /// Sets the media type filter.
    #[must_use]
    pub const fn type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    /// Sets the upstream page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Query pairs sent upstream (without the API key).
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("s", self.query.clone()), ("page", self.page.to_string())];
        if let Some(kind) = self.type_filter.query_value() {
            query.push(("type", String::from(kind)));
        }
        query
    }

    /// Cache key for this request.
    ///
    /// `type` is always part of the key, so `all` and a filtered search never
    /// share an entry.
    pub(crate) fn cache_key(&self) -> String {
        cache_key([
            ("s", self.query.clone()),
            ("type", String::from(self.type_filter.as_str())),
            ("page", self.page.to_string()),
        ])
    }
}

/// Builds a canonical cache key: parameters sorted by name, joined as
/// `name=value&...`.
pub(crate) fn cache_key<I>(params: I) -> String
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    params
        .into_iter()
        .collect::<BTreeMap<_, _>>()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
