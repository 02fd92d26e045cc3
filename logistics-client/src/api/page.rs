//! Server-computed result pages.

use serde::{Deserialize, Serialize};

/// One window of a server-sorted, server-filtered collection.
///
/// Content order is page-local. A page is never edited in place: every
/// successful fetch replaces it wholesale. Unknown Spring paging fields
/// (`pageable`, `sort`, `numberOfElements`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// The page shown before anything has loaded.
    pub fn empty(size: u32) -> Self {
        Self::from_parts(Vec::new(), 0, size, 0)
    }

    /// Build a page, deriving the page count and flags.
    ///
    /// An index at or beyond the page count is valid and yields an
    /// empty-content page.
    pub fn from_parts(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = total_pages_for(total_elements, size);
        Self {
            empty: content.is_empty(),
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }

}

/// `ceil(total_elements / page_size)`; zero when the page size is zero.
pub fn total_pages_for(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_spring_page() {
        let json = r#"{
            "content": [1, 2],
            "pageable": {"pageNumber": 0, "pageSize": 2, "offset": 0, "paged": true, "unpaged": false,
                         "sort": {"empty": true, "sorted": false, "unsorted": true}},
            "totalPages": 3,
            "totalElements": 5,
            "last": false,
            "size": 2,
            "number": 0,
            "sort": {"empty": true, "sorted": false, "unsorted": true},
            "first": true,
            "numberOfElements": 2,
            "empty": false
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 5);
        assert!(page.first);
        assert!(!page.last);
    }

    #[test]
    fn empty_page() {
        let page: Page<u32> = Page::empty(10);
        assert!(page.empty);
        assert!(page.first);
        assert!(page.last);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.size, 10);
    }

    #[test]
    fn page_count_math() {
        assert_eq!(total_pages_for(0, 10), 0);
        assert_eq!(total_pages_for(1, 10), 1);
        assert_eq!(total_pages_for(10, 10), 1);
        assert_eq!(total_pages_for(11, 10), 2);
        assert_eq!(total_pages_for(5, 0), 0);
    }

    #[test]
    fn index_past_end_is_empty_not_error() {
        let page: Page<u32> = Page::from_parts(vec![], 7, 10, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.empty);
        assert!(page.last);
        assert!(!page.first);
    }
}
