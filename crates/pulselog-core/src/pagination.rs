//! Pagination bounds calculation.

use serde::Serialize;

use crate::defaults::PAGE_SIZE;

/// Resolved page bounds for a paginated listing.
///
/// `page` is clamped to >= 1 but never clamped against `total_pages`: a page
/// past the end simply yields an empty row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub page: i64,
    pub page_size: i64,
    pub offset: i64,
    pub total_rows: i64,
    pub total_pages: i64,
}

/// Compute page bounds from an untrusted page parameter. Pure, total.
///
/// Unparseable or sub-1 input floors to page 1.
pub fn paginate(page_raw: Option<&str>, total_rows: i64) -> PageDescriptor {
    let page = page_raw
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let total_rows = total_rows.max(0);
    let total_pages = ((total_rows + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    PageDescriptor {
        page,
        page_size: PAGE_SIZE,
        offset: (page - 1) * PAGE_SIZE,
        total_rows,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_defaults_to_first() {
        let page = paginate(None, 45);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_zero_page_floors_to_first() {
        let page = paginate(Some("0"), 45);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_negative_page_floors_to_first() {
        let page = paginate(Some("-3"), 45);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_unparseable_page_floors_to_first() {
        let page = paginate(Some("abc"), 45);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_third_page_of_45_rows() {
        let page = paginate(Some("3"), 45);
        assert_eq!(page.page, 3);
        assert_eq!(page.offset, 40);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_page_beyond_last_is_not_clamped() {
        let page = paginate(Some("10"), 45);
        assert_eq!(page.page, 10);
        assert_eq!(page.offset, 180);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_zero_rows_still_has_one_page() {
        let page = paginate(None, 0);
        assert_eq!(page.total_rows, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let page = paginate(Some("2"), 40);
        assert_eq!(page.offset, 20);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_whitespace_around_page_number() {
        let page = paginate(Some(" 2 "), 45);
        assert_eq!(page.page, 2);
        assert_eq!(page.offset, 20);
    }
}
