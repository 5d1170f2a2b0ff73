//! Page-number pagination shared by every listing endpoint.
//!
//! A [`PageRequest`] is validated once at the edge; after that both the
//! in-memory engine ([`paginate`]) and the SQL-backed repositories (via
//! [`PageRequest::offset`] / [`PageRequest::limit`] and [`Page::from_slice`])
//! produce the same [`PaginationMetadata`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Version of the [`PaginationMetadata`] wire schema carried in the
/// `X-Pagination` header. Bump when fields change meaning or are removed.
pub const PAGINATION_SCHEMA_VERSION: u32 = 1;

/// A validated request for one page: `page_number >= 1`, `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, DomainError> {
        Self::with_max_page_size(page_number, page_size, MAX_PAGE_SIZE)
    }

    /// Validate the raw parameters. Out-of-range values are rejected, never clamped.
    pub fn with_max_page_size(
        page_number: i64,
        page_size: i64,
        max_page_size: u64,
    ) -> Result<Self, DomainError> {
        if page_number < 1 {
            return Err(DomainError::Validation(format!(
                "pageNumber must be greater than or equal to 1 (got {page_number})"
            )));
        }
        if page_size < 1 {
            return Err(DomainError::Validation(format!(
                "pageSize must be greater than or equal to 1 (got {page_size})"
            )));
        }
        if page_size as u64 > max_page_size {
            return Err(DomainError::Validation(format!(
                "pageSize must not exceed {max_page_size} (got {page_size})"
            )));
        }

        Ok(Self {
            page_number: page_number as u64,
            page_size: page_size as u64,
        })
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items preceding this page in the ordered source.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER as u64,
            page_size: DEFAULT_PAGE_SIZE as u64,
        }
    }
}

/// Position metadata of a page, serialized into the `X-Pagination` header.
///
/// ```json
/// {"pageCurrent":1,"pageSize":10,"totalCount":25,"hasPreviousPage":false,"hasNextPage":true}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// 1-based index of the returned page
    pub page_current: u64,
    /// Maximum number of items per page
    pub page_size: u64,
    /// Number of items in the whole (filtered) collection
    pub total_count: u64,
    /// `true` iff `pageCurrent > 1`
    pub has_previous_page: bool,
    /// `true` iff `pageCurrent * pageSize < totalCount`
    pub has_next_page: bool,
}

impl PaginationMetadata {
    pub fn new(request: PageRequest, total_count: u64) -> Self {
        let page_current = request.page_number();
        let page_size = request.page_size();

        Self {
            page_current,
            page_size,
            total_count,
            has_previous_page: page_current > 1,
            has_next_page: page_current.saturating_mul(page_size) < total_count,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }
}

/// One slice of an ordered collection together with its position metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    metadata: PaginationMetadata,
}

impl<T> Page<T> {
    /// Wrap items that the store already cut to `request`'s window.
    pub fn from_slice(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        debug_assert!(items.len() as u64 <= request.page_size());
        Self {
            items,
            metadata: PaginationMetadata::new(request, total_count),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::from_slice(Vec::new(), 0, request)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn metadata(&self) -> &PaginationMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, PaginationMetadata) {
        (self.items, self.metadata)
    }

    /// Project every item, keeping the metadata untouched.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}

/// Cut `request`'s page out of an already ordered source.
///
/// A page that lies past the end of `source` is returned empty with
/// `has_next_page = false`; it is not an error.
pub fn paginate<T: Clone>(source: &[T], request: PageRequest) -> Page<T> {
    let total_count = source.len() as u64;
    let start = usize::try_from(request.offset())
        .unwrap_or(usize::MAX)
        .min(source.len());
    let end = usize::try_from(request.limit())
        .map(|limit| start.saturating_add(limit))
        .unwrap_or(usize::MAX)
        .min(source.len());

    Page::from_slice(source[start..end].to_vec(), total_count, request)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn req(page_number: i64, page_size: i64) -> PageRequest {
        PageRequest::new(page_number, page_size).unwrap()
    }

    fn source(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_of_twenty_five() {
        let page = paginate(&source(25), req(1, 10));
        assert_eq!(page.items(), &source(10)[..]);
        let meta = page.metadata();
        assert_eq!(meta.page_current, 1);
        assert_eq!(meta.page_size, 10);
        assert_eq!(meta.total_count, 25);
        assert!(!meta.has_previous_page);
        assert!(meta.has_next_page);
    }

    #[test]
    fn last_partial_page_of_twenty_five() {
        let page = paginate(&source(25), req(3, 10));
        assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
        assert!(page.metadata().has_previous_page);
        assert!(!page.metadata().has_next_page);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let page = paginate(&source(25), req(4, 10));
        assert!(page.is_empty());
        assert_eq!(page.metadata().total_count, 25);
        assert!(page.metadata().has_previous_page);
        assert!(!page.metadata().has_next_page);
    }

    #[test]
    fn empty_source_yields_empty_first_page() {
        let page = paginate::<u32>(&[], req(1, 10));
        assert!(page.is_empty());
        assert_eq!(page.metadata().total_count, 0);
        assert!(!page.metadata().has_previous_page);
        assert!(!page.metadata().has_next_page);
    }

    #[test]
    fn exact_multiple_has_no_next_page() {
        let page = paginate(&source(20), req(2, 10));
        assert_eq!(page.len(), 10);
        assert!(!page.metadata().has_next_page);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = paginate(&source(5), req(i64::MAX, 100));
        assert!(page.is_empty());
        assert!(!page.metadata().has_next_page);
        assert!(page.metadata().has_previous_page);
    }

    #[test]
    fn rejects_page_number_below_one() {
        let err = PageRequest::new(0, 10).unwrap_err();
        assert!(matches!(&err, DomainError::Validation(msg) if msg.contains("pageNumber")));
    }

    #[test]
    fn rejects_page_size_below_one() {
        let err = PageRequest::new(1, -3).unwrap_err();
        assert!(matches!(&err, DomainError::Validation(msg) if msg.contains("pageSize")));
    }

    #[test]
    fn rejects_page_size_above_max() {
        assert!(PageRequest::with_max_page_size(1, 51, 50).is_err());
        assert!(PageRequest::with_max_page_size(1, 50, 50).is_ok());
    }

    #[test]
    fn offset_and_limit() {
        let r = req(3, 20);
        assert_eq!(r.offset(), 40);
        assert_eq!(r.limit(), 20);
        assert_eq!(PageRequest::default(), req(1, 10));
    }

    #[test]
    fn map_keeps_metadata() {
        let page = paginate(&source(25), req(2, 10));
        let meta = *page.metadata();
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items()[0], "11");
        assert_eq!(*mapped.metadata(), meta);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationMetadata::new(req(1, 10), 25).total_pages(), 3);
        assert_eq!(PaginationMetadata::new(req(1, 10), 0).total_pages(), 0);
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let meta = PaginationMetadata::new(req(1, 10), 25);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageCurrent": 1,
                "pageSize": 10,
                "totalCount": 25,
                "hasPreviousPage": false,
                "hasNextPage": true
            })
        );
    }

    proptest! {
        #[test]
        fn pages_reconstruct_source(items in proptest::collection::vec(any::<u16>(), 0..200), size in 1i64..40) {
            let pages = (items.len() as i64 + size - 1) / size;
            let mut rebuilt = Vec::new();
            for n in 1..=pages {
                rebuilt.extend_from_slice(paginate(&items, req(n, size)).items());
            }
            prop_assert_eq!(rebuilt, items);
        }

        #[test]
        fn metadata_flags_follow_formula(len in 0usize..300, number in 1i64..50, size in 1i64..50) {
            let items = vec![0u8; len];
            let page = paginate(&items, req(number, size));
            let meta = page.metadata();
            prop_assert_eq!(meta.has_previous_page, number > 1);
            prop_assert_eq!(meta.has_next_page, (number * size) < len as i64);
            prop_assert!(page.len() as i64 <= size);
            if (number - 1) * size >= len as i64 {
                prop_assert!(page.is_empty());
                prop_assert!(!meta.has_next_page);
            }
        }

        #[test]
        fn repeated_calls_are_identical(items in proptest::collection::vec(any::<i32>(), 0..100), number in 1i64..10, size in 1i64..20) {
            prop_assert_eq!(paginate(&items, req(number, size)), paginate(&items, req(number, size)));
        }
    }
}
