//! Scripted upstream used by the aggregator and session tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use cinesearch_api::omdb::{
    DetailRecord, LocalOmdbApi, MediaType, Poster, SearchParams, SearchResultItem, UpstreamError,
    UpstreamPage,
};

/// Builds a search hit with the given id.
pub fn item(id: &str) -> SearchResultItem {
    SearchResultItem {
        id: String::from(id),
        title: format!("Title {id}"),
        year: String::from("2005"),
        media_type: MediaType::Movie,
        poster: Poster::Missing,
    }
}

/// Builds `count` hits whose ids start with `prefix`.
pub fn items(prefix: &str, count: usize) -> Vec<SearchResultItem> {
    (0..count).map(|i| item(&format!("{prefix}{i:02}"))).collect()
}

/// Builds a minimal detail record.
pub fn detail_record(id: &str) -> DetailRecord {
    let json = format!(r#"{{"Title":"Batman Begins","imdbID":"{id}","Type":"movie","Response":"True"}}"#);
    serde_json::from_str(&json).unwrap()
}

/// Upstream whose responses are scripted per upstream page index.
///
/// Pages without a script answer with an empty page.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    pages: HashMap<u32, Result<UpstreamPage, UpstreamError>>,
    detail: Option<Result<DetailRecord, UpstreamError>>,
    search_calls: Mutex<Vec<SearchParams>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful upstream page.
    pub fn page(mut self, index: u32, items: Vec<SearchResultItem>, total_count: u32) -> Self {
        self.pages.insert(
            index,
            Ok(UpstreamPage {
                items,
                total_count,
                page_index: index,
            }),
        );
        self
    }

    /// Scripts `count` consecutive full pages starting at 1.
    pub fn full_pages(mut self, count: u32, total_count: u32) -> Self {
        for index in 1..=count {
            self = self.page(index, items(&format!("tt{index:02}"), 10), total_count);
        }
        self
    }

    /// Scripts a failing upstream page.
    pub fn failing(mut self, index: u32, err: UpstreamError) -> Self {
        self.pages.insert(index, Err(err));
        self
    }

    /// Scripts the detail response.
    pub fn detail(mut self, result: Result<DetailRecord, UpstreamError>) -> Self {
        self.detail = Some(result);
        self
    }

    /// Search parameters received so far, in order.
    pub fn searches(&self) -> Vec<SearchParams> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Upstream page indices requested so far, in order.
    pub fn pages_requested(&self) -> Vec<u32> {
        self.searches().iter().map(|p| p.page).collect()
    }

    /// Number of search calls made so far.
    pub fn search_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    /// Number of detail calls made so far.
    pub fn detail_count(&self) -> usize {
        self.detail_calls.lock().unwrap().len()
    }
}

impl LocalOmdbApi for ScriptedApi {
    async fn search(&self, params: &SearchParams) -> Result<UpstreamPage, UpstreamError> {
        self.search_calls.lock().unwrap().push(params.clone());
        self.pages.get(&params.page).cloned().unwrap_or_else(|| {
            Ok(UpstreamPage {
                items: Vec::new(),
                total_count: 0,
                page_index: params.page,
            })
        })
    }

    async fn detail(&self, id: &str) -> Result<DetailRecord, UpstreamError> {
        self.detail_calls.lock().unwrap().push(String::from(id));
        self.detail.clone().unwrap_or_else(|| {
            Err(UpstreamError::TitleUnavailable {
                id: String::from(id),
            })
        })
    }
}
