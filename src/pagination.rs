use crate::constants::ITEMS_PER_PAGE;

/// Parse a 1-based page number from a URL parameter.
///
/// Missing, non-numeric, zero and negative values all map to page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Row offset of a 1-based page
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(ITEMS_PER_PAGE)
}

/// Number of pages needed for `count` rows
pub fn total_pages(count: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    (count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 6);
        assert_eq!(page_offset(10), 54);
        assert_eq!(page_offset(0), 0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(6), 1);
        assert_eq!(total_pages(7), 2);
        assert_eq!(total_pages(15), 3);
    }

    #[test]
    fn test_second_page_of_fifteen_rows() {
        // 15 matches, page 2 covers rows 7..=12
        let offset = page_offset(2);
        let rows: Vec<i64> = (1..=15).skip(offset as usize).take(ITEMS_PER_PAGE as usize).collect();
        assert_eq!(total_pages(15), 3);
        assert_eq!(rows, vec![7, 8, 9, 10, 11, 12]);
    }
}
