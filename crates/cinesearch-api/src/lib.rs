//! API client library for cinesearch.
//!
//! Provides a cached, retrying client for the OMDb title database.

/// OMDb API client.
pub mod omdb;
