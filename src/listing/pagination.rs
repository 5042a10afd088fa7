//! Page index and rows-per-page.

use crate::error::{KometroError, Result};
use serde::Serialize;

/// Allowed rows-per-page values.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Zero-based pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: usize,
    rows_per_page: usize,
    /// Total matching documents reported by the server
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            total: 0,
        }
    }
}

/// Check a rows-per-page value against [`ROWS_PER_PAGE_OPTIONS`].
pub fn validate_rows_per_page(rows: usize) -> Result<usize> {
    if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
        Ok(rows)
    } else {
        Err(KometroError::validation(format!(
            "rows per page must be one of {ROWS_PER_PAGE_OPTIONS:?}, got {rows}"
        )))
    }
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Result<Self> {
        Ok(Self {
            rows_per_page: validate_rows_per_page(rows_per_page)?,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change rows-per-page and go back to the first page.
    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<()> {
        self.rows_per_page = validate_rows_per_page(rows)?;
        self.page = 0;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Number of pages for the current total; at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        let total = usize::try_from(self.total).unwrap_or(usize::MAX);
        total.div_ceil(self.rows_per_page).max(1)
    }

    #[must_use]
    pub fn last_page(&self) -> usize {
        self.page_count() - 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// One-based `(first, last)` row numbers shown on this page, `None` if empty.
    #[must_use]
    pub fn row_range(&self, rows_on_page: usize) -> Option<(usize, usize)> {
        if rows_on_page == 0 {
            return None;
        }
        let first = self.page * self.rows_per_page + 1;
        Some((first, first + rows_on_page - 1))
    }
}
