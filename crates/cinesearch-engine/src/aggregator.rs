//! Logical page aggregation.
//!
//! Assembles one fixed-size logical page from several sequential upstream
//! pages, within an attempt budget and a result cap.

use std::collections::HashSet;

use cinesearch_api::omdb::{LocalOmdbApi, SearchParams, SearchResultItem};
use tracing::instrument;

use crate::cancel::CancelToken;
use crate::criteria::SearchCriteria;
use crate::error::SearchError;
use crate::limits::{
    FAN_OUT_ATTEMPT_BUDGET, LOGICAL_PAGE_SIZE, MAX_LOGICAL_PAGES, MAX_TOTAL_RESULTS,
    UPSTREAM_PAGE_SIZE, first_upstream_page, page_count,
};

/// One logical page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalPage {
    /// At most `LOGICAL_PAGE_SIZE` items, upstream order, no repeated ids.
    pub items: Vec<SearchResultItem>,
    /// Upstream total from the first call, capped at `MAX_TOTAL_RESULTS`.
    pub total_count: u32,
}

impl LogicalPage {
    /// Number of logical pages the total count spans.
    #[must_use]
    pub const fn page_count(&self) -> u32 {
        page_count(self.total_count)
    }
}

/// Fetches one logical page.
///
/// Calls the upstream sequentially from `first_upstream_page(criteria.page)`
/// until 12 items are gathered, a page comes back empty, the attempt budget
/// runs out, or a call fails. A failure on the first call is returned; a
/// later failure keeps what was gathered. The total count is taken from the
/// first call only.
///
/// # Errors
///
/// - `InvalidPage` for page 0, `PageLimitExceeded` beyond page 3.
/// - `Upstream` when the first upstream call fails.
/// - `Cancelled` when `cancel` fires between upstream calls.
#[instrument(skip_all, fields(query = %criteria.query, page = criteria.page))]
pub async fn fetch_logical_page(
    api: &(impl LocalOmdbApi + Sync),
    criteria: &SearchCriteria,
    cancel: &CancelToken,
) -> Result<LogicalPage, SearchError> {
    if criteria.page == 0 {
        return Err(SearchError::InvalidPage { page: 0 });
    }
    if criteria.page > MAX_LOGICAL_PAGES {
        return Err(SearchError::PageLimitExceeded {
            max: MAX_LOGICAL_PAGES,
        });
    }

    let mut upstream_page = first_upstream_page(criteria.page);
    let mut items: Vec<SearchResultItem> =
        Vec::with_capacity(LOGICAL_PAGE_SIZE.saturating_add(UPSTREAM_PAGE_SIZE));
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut first_total: Option<u32> = None;
    let mut calls: u32 = 0;

    while items.len() < LOGICAL_PAGE_SIZE && calls < FAN_OUT_ATTEMPT_BUDGET {
        if cancel.is_cancelled() {
            tracing::debug!(upstream_page, "search cancelled, stopping fan-out");
            return Err(SearchError::Cancelled);
        }

        let params = SearchParams::new(criteria.query.clone())
            .type_filter(criteria.type_filter)
            .page(upstream_page);
        let result = api.search(&params).await;
        calls = calls.saturating_add(1);

        let page = match result {
            Ok(page) => page,
            Err(err) if calls == 1 => return Err(err.into()),
            Err(err) => {
                tracing::warn!(
                    upstream_page,
                    gathered = items.len(),
                    error = ?err,
                    "upstream call failed mid fan-out, keeping gathered items"
                );
                break;
            }
        };

        let total = *first_total.get_or_insert(page.total_count);
        let fetched = page.items.len();

        tracing::debug!(
            upstream_page,
            fetched,
            total,
            accumulated = items.len(),
            "upstream page fetched"
        );

        if fetched == 0 {
            break;
        }

        let before = items.len();
        for item in page.items {
            if seen_ids.insert(item.id.clone()) {
                items.push(item);
            }
        }
        let skipped = fetched.saturating_sub(items.len().saturating_sub(before));
        if skipped > 0 {
            tracing::debug!(upstream_page, skipped, "duplicates removed");
        }

        upstream_page = upstream_page.saturating_add(1);
    }

    items.truncate(LOGICAL_PAGE_SIZE);
    let total_count = first_total.unwrap_or(0).min(MAX_TOTAL_RESULTS);

    tracing::info!(
        items = items.len(),
        total_count,
        calls,
        "logical page assembled"
    );

    Ok(LogicalPage { items, total_count })
}
