//! List queries: search, filters, sorting and pagination.

use serde::{Deserialize, Serialize};

/// Query-string parameters shared by every list endpoint. Each endpoint
/// reads only the filters that apply to it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub warehouse: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice out one 1-based page. Page 0 is read as page 1; pages past the end
/// are empty.
#[must_use]
pub fn paginate<T>(rows: Vec<T>, page: Option<usize>, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.unwrap_or(1).max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(page_size);

    let items = rows
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page { items, page, page_size, total, total_pages }
}

/// Case-insensitive substring match against any of `fields`. An absent or
/// blank needle matches everything.
#[must_use]
pub fn matches_search(needle: Option<&str>, fields: &[&str]) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Exact filter where absent, blank or `all` means no filter.
#[must_use]
pub fn matches_filter(filter: Option<&str>, value: &str) -> bool {
    match filter.map(str::trim) {
        None | Some("" | "all") => true,
        Some(f) => f.eq_ignore_ascii_case(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_splits_into_pages() {
        let rows: Vec<u32> = (1..=25).collect();
        let first = paginate(rows.clone(), Some(1), 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);

        let last = paginate(rows, Some(3), 10);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let page = paginate(vec![1, 2, 3], Some(9), 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 9);
    }

    #[test]
    fn paginate_treats_page_zero_as_first() {
        let page = paginate(vec![1, 2, 3], Some(0), 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn paginate_empty_has_no_pages() {
        let page = paginate(Vec::<u8>::new(), None, 10);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        assert!(matches_search(Some("lond"), &["Warehouse 1", "London"]));
        assert!(matches_search(Some("WAREHOUSE"), &["Warehouse 1", "Leeds"]));
        assert!(!matches_search(Some("glasgow"), &["Warehouse 1", "Leeds"]));
        assert!(matches_search(None, &["anything"]));
        assert!(matches_search(Some("   "), &["anything"]));
    }

    #[test]
    fn filter_all_matches_everything() {
        assert!(matches_filter(Some("all"), "Books"));
        assert!(matches_filter(None, "Books"));
        assert!(matches_filter(Some("books"), "Books"));
        assert!(!matches_filter(Some("Clothing"), "Books"));
    }
}
