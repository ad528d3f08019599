use serde::Serialize;

use super::error::FilterError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 20;

/// A validated (page, per_page) pair.
///
/// `page` has no lower bound: page 0 or below yields a negative offset that
/// the store is left to reject. `per_page` has no upper bound but must be
/// positive, so the page count is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Result<Self, FilterError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);

        if per_page <= 0 {
            return Err(FilterError::InvalidPerPage(format!(
                "per_page must be greater than zero, got {}",
                per_page
            )));
        }

        // Offset must be representable.
        page.checked_sub(1)
            .and_then(|p| p.checked_mul(per_page))
            .ok_or_else(|| FilterError::InvalidPage(format!("page {} is out of range", page)))?;

        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// `(page - 1) * per_page`; checked at construction.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// `ceil(total_items / per_page)`, written so it cannot overflow.
    pub fn pages(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            0
        } else {
            (total_items - 1) / self.per_page + 1
        }
    }

    pub fn into_result<T>(self, items: Vec<T>, total_items: i64) -> PageResult<T> {
        PageResult {
            items,
            total_items,
            pages: self.pages(total_items),
            current_page: self.page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub pages: i64,
    /// Echo of the requested page; not checked against `pages`.
    pub current_page: i64,
}
