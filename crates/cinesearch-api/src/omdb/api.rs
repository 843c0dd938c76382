//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::UpstreamError;
use super::params::SearchParams;
use super::types::{DetailRecord, UpstreamPage};

/// OMDb API trait.
///
/// Abstracts upstream calls for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Fetches one upstream search page.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`TooManyResults` for the upstream sentinel errors,
    /// or a transport kind when the request fails after retries.
    async fn search(&self, params: &SearchParams) -> Result<UpstreamPage, UpstreamError>;

    /// Fetches the full record for one title.
    ///
    /// # Errors
    ///
    /// Returns `TitleUnavailable` when the upstream does not know `id`,
    /// or a transport kind when the request fails after retries.
    async fn detail(&self, id: &str) -> Result<DetailRecord, UpstreamError>;
}
