//! OMDb API client module.
//!
//! Handles search and detail requests against the OMDb endpoint,
//! with per-request timeout, transient-failure retry and an
//! in-memory response cache.

mod api;
mod cache;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
pub use cache::ResponseCache;
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
pub use error::UpstreamError;
pub use params::{ParseTypeFilterError, SearchParams, TypeFilter};
pub use types::{DetailRecord, MediaType, Poster, Rating, SearchResultItem, UpstreamPage};
