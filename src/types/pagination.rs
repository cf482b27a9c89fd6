//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::InvoiceView;

/// Pagination query parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Offset of the first item of the page; `None` if it does not fit in a `u64`
    pub fn offset(&self) -> Option<u64> {
        self.page.saturating_sub(1).checked_mul(self.limit())
    }

    /// Zero-based index of the page, or `None` when the page starts past
    /// the last of `total` items.
    pub fn page_index(&self, total: u64) -> Option<u64> {
        self.offset()
            .filter(|offset| *offset < total)
            .map(|_| self.page.saturating_sub(1))
    }

    /// Get limit clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query string of the invoice listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceQuery {
    /// Matches customer name, customer email or status
    #[serde(default)]
    pub query: String,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl Default for InvoiceQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl InvoiceQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.per_page)
    }

    /// Cache key of the view this query renders for `path`.
    ///
    /// The default listing uses the bare path; other queries use a
    /// normalised query string so equivalent requests share one entry.
    pub fn view_key(&self, path: &str) -> String {
        let query = self.query.trim();
        let params = self.pagination();
        if query.is_empty() && params == PaginationParams::default() {
            return path.to_string();
        }
        format!(
            "{}?query={}&page={}&per_page={}",
            path,
            urlencoding::encode(query),
            params.page,
            params.limit()
        )
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(InvoicePage = Paginated<InvoiceView>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PaginationParams::new(1, 0).limit(), 1);
        assert_eq!(PaginationParams::new(1, 10_000).limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationParams::new(3, 6).offset(), Some(12));
        assert_eq!(PaginationParams::new(0, 6).offset(), Some(0));
        assert_eq!(PaginationParams::new(u64::MAX, 6).offset(), None);
    }

    #[test]
    fn test_page_index_stops_at_last_page() {
        assert_eq!(PaginationParams::new(1, 6).page_index(13), Some(0));
        assert_eq!(PaginationParams::new(3, 6).page_index(13), Some(2));
        assert_eq!(PaginationParams::new(4, 6).page_index(13), None);
        assert_eq!(PaginationParams::new(1, 6).page_index(0), None);
    }

    #[test]
    fn test_huge_page_has_no_index() {
        let params = InvoiceQuery {
            query: String::new(),
            page: u64::MAX,
            per_page: 6,
        }
        .pagination();
        assert_eq!(params.page_index(u64::MAX), None);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 6, 13);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[test]
    fn test_default_query_uses_bare_path() {
        assert_eq!(
            InvoiceQuery::default().view_key("/dashboard/invoices"),
            "/dashboard/invoices"
        );
    }

    #[test]
    fn test_search_query_is_normalised_into_key() {
        let query = InvoiceQuery {
            query: " Amy B ".into(),
            page: 2,
            per_page: 6,
        };
        assert_eq!(
            query.view_key("/dashboard/invoices"),
            "/dashboard/invoices?query=Amy%20B&page=2&per_page=6"
        );
    }
}
