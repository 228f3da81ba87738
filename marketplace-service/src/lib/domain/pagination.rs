//! Page-based pagination shared by every list operation.
//!
//! A [`PageRequest`] is validated once at the boundary; repositories read
//! `offset()`/`limit()` from it and services wrap results in a [`Page`],
//! whose [`PageMeta`] always satisfies:
//!
//! - `total_pages = ceil(total_items / page_size)`
//! - `has_next_page = page < total_pages`
//! - `has_previous_page = page > 1`
//!
//! Out-of-range requests are rejected rather than clamped.

use serde::Serialize;
use thiserror::Error;

use crate::domain::errors::ErrorKey;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Error for malformed page requests
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page must be between 1 and the last addressable page, got {0}")]
    InvalidPage(i64),

    #[error("Page size must be between 1 and {max}, got {actual}")]
    InvalidPageSize { max: i64, actual: i64 },
}

impl PageError {
    pub fn key(&self) -> ErrorKey {
        match self {
            PageError::InvalidPage(_) => ErrorKey::PageIsInvalid,
            PageError::InvalidPageSize { .. } => ErrorKey::PageSizeIsInvalid,
        }
    }
}

/// Convert a 1-based page number into a row offset.
///
/// # Errors
/// * `InvalidPage` - `page` is below 1, or so large the offset overflows `i64`
/// * `InvalidPageSize` - `page_size` is outside `1..=MAX_PAGE_SIZE`
pub fn compute_offset(page: i64, page_size: i64) -> Result<i64, PageError> {
    if page < 1 {
        return Err(PageError::InvalidPage(page));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(PageError::InvalidPageSize {
            max: MAX_PAGE_SIZE,
            actual: page_size,
        });
    }

    (page - 1)
        .checked_mul(page_size)
        .ok_or(PageError::InvalidPage(page))
}

/// Free-text filter applied as a case-insensitive substring match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Build a search term; blank input means "no filter".
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when any of `fields` contains the term, ignoring case.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        let needle = self.0.to_lowercase();
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// `ILIKE` pattern with `%`, `_` and `\` escaped so they match literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Validated page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
    offset: i64,
    search: Option<SearchTerm>,
}

impl PageRequest {
    /// Validate a page request.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `page_size` - Items per page
    /// * `search` - Optional free-text filter; blank means none
    ///
    /// # Errors
    /// * `InvalidPage` / `InvalidPageSize` - See [`compute_offset`]
    pub fn new(page: i64, page_size: i64, search: Option<String>) -> Result<Self, PageError> {
        let offset = compute_offset(page, page_size)?;
        Ok(Self {
            page,
            page_size,
            offset,
            search: search.and_then(SearchTerm::new),
        })
    }

    /// Build a request from optional parts, using the defaults for missing ones.
    pub fn from_parts(
        page: Option<i64>,
        page_size: Option<i64>,
        search: Option<String>,
    ) -> Result<Self, PageError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            search,
        )
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn search(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
            search: None,
        }
    }
}

/// Metadata describing where a page sits in the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub items_on_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    pub fn build(item_count: usize, total_items: u64, request: &PageRequest) -> Self {
        let total_pages = total_items.div_ceil(request.page_size as u64);
        let page = request.page as u64;

        Self {
            page: request.page,
            page_size: request.page_size,
            items_on_page: item_count as u64,
            total_items,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: page < total_pages,
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: &PageRequest) -> Self {
        let meta = PageMeta::build(items.len(), total_items, request);
        Self { items, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_offset() {
        assert_eq!(compute_offset(1, 10), Ok(0));
        assert_eq!(compute_offset(2, 10), Ok(10));
        assert_eq!(compute_offset(5, 25), Ok(100));
    }

    #[test]
    fn test_compute_offset_rejects_out_of_range() {
        assert_eq!(compute_offset(0, 10), Err(PageError::InvalidPage(0)));
        assert_eq!(compute_offset(-3, 10), Err(PageError::InvalidPage(-3)));
        assert_eq!(
            compute_offset(1, 0),
            Err(PageError::InvalidPageSize { max: 100, actual: 0 })
        );
        assert_eq!(
            compute_offset(1, 101),
            Err(PageError::InvalidPageSize {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_offset_past_i64_is_rejected() {
        let page = 100_000_000_000_000_000;
        assert_eq!(compute_offset(page, 100), Err(PageError::InvalidPage(page)));
        assert_eq!(
            PageRequest::new(i64::MAX, 1, None).map(|r| r.offset()),
            Ok(i64::MAX - 1)
        );
        assert_eq!(
            PageRequest::new(page, 100, None),
            Err(PageError::InvalidPage(page))
        );
    }

    #[test]
    fn test_from_parts_defaults() {
        let request = PageRequest::from_parts(None, None, None).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 10);
        assert_eq!(request.offset(), 0);
        assert!(request.search().is_none());
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let request = PageRequest::new(1, 10, Some("   ".to_string())).unwrap();
        assert!(request.search().is_none());

        let request = PageRequest::new(1, 10, Some(" note ".to_string())).unwrap();
        assert_eq!(request.search().map(SearchTerm::as_str), Some("note"));
    }

    #[test]
    fn test_meta_invariants_hold_across_ranges() {
        for total_items in 0..=23u64 {
            for page_size in 1..=7i64 {
                for page in 1..=6i64 {
                    let request = PageRequest::new(page, page_size, None).unwrap();
                    let meta = PageMeta::build(0, total_items, &request);

                    let expected_pages = (total_items + page_size as u64 - 1) / page_size as u64;
                    assert_eq!(meta.total_pages, expected_pages);
                    assert_eq!(meta.has_next_page, (page as u64) < expected_pages);
                    assert_eq!(meta.has_previous_page, page > 1);
                }
            }
        }
    }

    #[test]
    fn test_meta_for_middle_page() {
        let request = PageRequest::new(2, 10, None).unwrap();
        let meta = PageMeta::build(10, 35, &request);

        assert_eq!(meta.items_on_page, 10);
        assert_eq!(meta.total_items, 35);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_previous_page);
        assert!(meta.has_next_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let request = PageRequest::default();
        let meta = PageMeta::build(1, 1, &request);
        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["itemsOnPage"], 1);
        assert_eq!(value["totalItems"], 1);
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["hasPreviousPage"], false);
        assert_eq!(value["hasNextPage"], false);
    }

    #[test]
    fn test_search_matches_any_field_ignoring_case() {
        let term = SearchTerm::new("GALAXY").unwrap();

        assert!(term.matches_any(["Samsung Galaxy Note 10", ""]));
        assert!(term.matches_any(["Phone", "the galaxy line"]));
        assert!(!term.matches_any(["iPhone", "Apple"]));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let term = SearchTerm::new(r"50%_off\now").unwrap();
        assert_eq!(term.like_pattern(), r"%50\%\_off\\now%");
    }

    #[test]
    fn test_page_map_keeps_meta() {
        let request = PageRequest::default();
        let page = Page::new(vec![1, 2, 3], 3, &request).map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.meta.items_on_page, 3);
    }
}
