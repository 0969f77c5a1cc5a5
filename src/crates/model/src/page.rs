use serde::{Deserialize, Serialize};

/// A 0-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Row offset of the page, or `None` when it does not fit a signed 64-bit OFFSET.
    pub fn checked_offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

/// A bounded slice of an ordered result set plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total.div_ceil(request.size)
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total,
            total_pages,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
