//! Fixed paging limits.
//!
//! The upstream serves 10 items per page; callers see 12-item logical pages,
//! at most 3 of them.

/// Items per logical page.
pub const LOGICAL_PAGE_SIZE: usize = 12;

/// Highest logical page that may be requested.
pub const MAX_LOGICAL_PAGES: u32 = 3;

/// Upper bound on the reported total result count.
pub const MAX_TOTAL_RESULTS: u32 = 36;

/// Items per upstream page.
pub const UPSTREAM_PAGE_SIZE: usize = 10;

/// Upstream pages reserved for each logical page.
pub const UPSTREAM_PAGES_PER_LOGICAL_PAGE: u32 = 2;

/// Upstream calls allowed while assembling one logical page.
pub const FAN_OUT_ATTEMPT_BUDGET: u32 = 5;

/// Minimum query length, in characters, after trimming.
pub const MIN_QUERY_LEN: usize = 2;

/// First upstream page index for a 1-based logical page.
#[must_use]
pub const fn first_upstream_page(logical_page: u32) -> u32 {
    logical_page
        .saturating_sub(1)
        .saturating_mul(UPSTREAM_PAGES_PER_LOGICAL_PAGE)
        .saturating_add(1)
}

/// Number of logical pages needed to show `total_count` results.
#[must_use]
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub const fn page_count(total_count: u32) -> u32 {
    let pages = total_count.div_ceil(LOGICAL_PAGE_SIZE as u32);
    if pages > MAX_LOGICAL_PAGES {
        MAX_LOGICAL_PAGES
    } else {
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_upstream_page() {
        // Arrange & Act & Assert
        assert_eq!(first_upstream_page(1), 1);
        assert_eq!(first_upstream_page(2), 3);
        assert_eq!(first_upstream_page(3), 5);
    }

    #[test]
    fn test_page_count() {
        // Arrange & Act & Assert
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(12), 1);
        assert_eq!(page_count(13), 2);
        assert_eq!(page_count(36), 3);
        assert_eq!(page_count(582), 3);
    }
}
