//! OMDb API response types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value OMDb uses for absent fields.
const NOT_AVAILABLE: &str = "N/A";

/// Label shown for absent runtime/rating values.
const NOT_AVAILABLE_LABEL: &str = "Not available";

/// Sentinel rendered in place of a missing poster URL.
pub const NO_IMAGE: &str = "no-image";

// --- Envelope ---

/// Fields common to every OMDb payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbEnvelope {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    /// Error text when `response` is `"False"`.
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbEnvelope {
    /// Whether the payload reports success.
    pub(crate) fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

// --- Search ---

/// Raw search payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    /// Result page.
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchResultItem>,
    /// Total result count as a decimal string.
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
}

impl OmdbSearchResponse {
    /// Parses `totalResults`, treating missing or non-numeric values as 0.
    pub(crate) fn total_count(&self) -> u32 {
        self.total_results
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// Kind of title returned by the upstream database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    /// Feature film.
    Movie,
    /// TV series.
    Series,
    /// Single episode of a series.
    Episode,
    /// Any value the client does not know about.
    Other(String),
}

impl MediaType {
    /// Human-readable label (`Movie`, `Series`, `Episode`).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
            Self::Episode => "Episode",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for MediaType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "movie" => Self::Movie,
            "series" => Self::Series,
            "episode" => Self::Episode,
            _ => Self::Other(raw),
        }
    }
}

impl From<MediaType> for String {
    fn from(kind: MediaType) -> Self {
        match kind {
            MediaType::Movie => Self::from("movie"),
            MediaType::Series => Self::from("series"),
            MediaType::Episode => Self::from("episode"),
            MediaType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Poster image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Poster {
    /// Absolute image URL.
    Url(String),
    /// Upstream reported no poster (`N/A` or empty).
    #[default]
    Missing,
}

impl Poster {
    /// Returns the URL when a poster exists.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Missing => None,
        }
    }
}

impl From<String> for Poster {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            Self::Missing
        } else {
            Self::Url(raw)
        }
    }
}

impl From<Poster> for String {
    fn from(poster: Poster) -> Self {
        match poster {
            Poster::Url(url) => url,
            Poster::Missing => Self::from(NO_IMAGE),
        }
    }
}

impl fmt::Display for Poster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url().unwrap_or(NO_IMAGE))
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Externally assigned identifier (IMDb ID).
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, or year span for series (e.g. `2008–2013`).
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Media type.
    #[serde(rename = "Type")]
    pub media_type: MediaType,
    /// Poster image.
    #[serde(rename = "Poster", default)]
    pub poster: Poster,
}

/// One upstream search page (10 items at most).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPage {
    /// Items in upstream order.
    pub items: Vec<SearchResultItem>,
    /// Total result count reported by the upstream.
    pub total_count: u32,
    /// 1-based upstream page index this page was fetched from.
    pub page_index: u32,
}

// --- Detail ---

/// A third-party rating entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating source (e.g. `Rotten Tomatoes`).
    #[serde(rename = "Source")]
    pub source: String,
    /// Rating value as displayed by the source.
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full record for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailRecord {
    /// IMDb ID.
    #[serde(rename = "imdbID")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year or year span.
    #[serde(default)]
    pub year: String,
    /// Content rating (e.g. `PG-13`).
    #[serde(default)]
    pub rated: String,
    /// Release date (e.g. `16 Jul 2010`).
    #[serde(default)]
    pub released: String,
    /// Runtime (e.g. `148 min`).
    #[serde(default)]
    pub runtime: String,
    /// Comma-separated genres.
    #[serde(default)]
    pub genre: String,
    /// Director(s).
    #[serde(default)]
    pub director: String,
    /// Writer(s).
    #[serde(default)]
    pub writer: String,
    /// Main cast.
    #[serde(default)]
    pub actors: String,
    /// Plot summary.
    #[serde(default)]
    pub plot: String,
    /// Language(s).
    #[serde(default)]
    pub language: String,
    /// Country of origin.
    #[serde(default)]
    pub country: String,
    /// Awards summary.
    #[serde(default)]
    pub awards: String,
    /// Poster image.
    #[serde(default)]
    pub poster: Poster,
    /// Third-party ratings.
    #[serde(default)]
    pub ratings: Vec<Rating>,
    /// Metascore.
    #[serde(default)]
    pub metascore: String,
    /// IMDb rating.
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    /// IMDb vote count.
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    /// Media type.
    #[serde(rename = "Type")]
    pub media_type: MediaType,
    /// DVD release date.
    #[serde(rename = "DVD", default)]
    pub dvd: String,
    /// Box office gross.
    #[serde(default)]
    pub box_office: String,
    /// Production company.
    #[serde(default)]
    pub production: String,
    /// Official website.
    #[serde(default)]
    pub website: String,
}

/// Replaces OMDb's `N/A` (or an empty value) with a readable label.
fn label_or_unavailable(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        NOT_AVAILABLE_LABEL
    } else {
        trimmed
    }
}

impl DetailRecord {
    /// Runtime, or `Not available`.
    #[must_use]
    pub fn runtime_label(&self) -> &str {
        label_or_unavailable(&self.runtime)
    }

    /// IMDb rating, or `Not available`.
    #[must_use]
    pub fn imdb_rating_label(&self) -> &str {
        label_or_unavailable(&self.imdb_rating)
    }

    /// Parses `released` (`16 Jul 2010`).
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.released.trim(), "%d %b %Y").ok()
    }

    /// Splits the comma-separated genre list.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty() && *g != NOT_AVAILABLE)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_search_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_batman_page1.json");

        // Act
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.search.len(), 10);
        assert_eq!(response.total_count(), 582);
        let first = &response.search[0];
        assert_eq!(first.id, "tt0372784");
        assert_eq!(first.title, "Batman Begins");
        assert_eq!(first.media_type, MediaType::Movie);
        assert!(first.poster.url().is_some());
    }

    #[test]
    fn test_parse_search_error_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_too_many.json");

        // Act
        let envelope: OmdbEnvelope = serde_json::from_str(json).unwrap();
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!envelope.is_success());
        assert_eq!(envelope.error.as_deref(), Some("Too many results."));
        assert!(response.search.is_empty());
        assert_eq!(response.total_count(), 0);
    }

    #[test]
    fn test_total_count_tolerates_garbage() {
        // Arrange
        let response = OmdbSearchResponse {
            search: Vec::new(),
            total_results: Some(String::from("lots")),
        };

        // Act & Assert
        assert_eq!(response.total_count(), 0);
    }

    #[test]
    fn test_poster_not_available_is_missing() {
        // Arrange & Act
        let poster = Poster::from(String::from("N/A"));

        // Assert
        assert_eq!(poster, Poster::Missing);
        assert_eq!(poster.to_string(), NO_IMAGE);
    }

    #[test]
    fn test_media_type_unknown_value_is_kept() {
        // Arrange & Act
        let kind = MediaType::from(String::from("game"));

        // Assert
        assert_eq!(kind, MediaType::Other(String::from("game")));
        assert_eq!(kind.label(), "game");
    }

    #[test]
    fn test_media_type_labels() {
        // Arrange & Act & Assert
        assert_eq!(MediaType::Movie.to_string(), "Movie");
        assert_eq!(MediaType::Series.to_string(), "Series");
        assert_eq!(MediaType::Episode.to_string(), "Episode");
    }

    #[test]
    fn test_parse_detail_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/detail_tt0372784.json");

        // Act
        let detail: DetailRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(detail.id, "tt0372784");
        assert_eq!(detail.title, "Batman Begins");
        assert_eq!(detail.media_type, MediaType::Movie);
        assert_eq!(detail.ratings.len(), 3);
        assert_eq!(detail.ratings[0].source, "Internet Movie Database");
        assert_eq!(detail.runtime_label(), "140 min");
        assert_eq!(
            detail.released_on(),
            NaiveDate::from_ymd_opt(2005, 6, 15)
        );
        assert_eq!(detail.genres(), vec!["Action", "Crime", "Drama"]);
    }

    #[test]
    fn test_detail_labels_for_missing_values() {
        // Arrange
        let json = r#"{"Title":"Short","imdbID":"tt0000001","Type":"movie","Runtime":"N/A","imdbRating":"","Released":"N/A","Response":"True"}"#;

        // Act
        let detail: DetailRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(detail.runtime_label(), "Not available");
        assert_eq!(detail.imdb_rating_label(), "Not available");
        assert!(detail.released_on().is_none());
        assert_eq!(detail.poster, Poster::Missing);
        assert!(detail.genres().is_empty());
    }
}
