//! Page-number pagination with a Laravel-compatible envelope.

use serde::Serialize;

/// Page size for the admin order listing.
pub const ADMIN_ORDERS_PER_PAGE: i64 = 10;

/// A resolved page request. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Clamp a caller-supplied page number; anything below 1 becomes 1.
    pub fn new(page: Option<i64>, per_page: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.max(1),
        }
    }

    /// Row offset for `LIMIT/OFFSET` queries.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the paging metadata clients navigate with.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T: Serialize> {
    pub current_page: i64,
    pub data: Vec<T>,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    /// 1-based index of the first item on this page, `None` when empty.
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, page: PageRequest, total: i64) -> Self {
        let last_page = ((total + page.per_page - 1) / page.per_page).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let first = page.offset() + 1;
            (Some(first), Some(first + data.len() as i64 - 1))
        };
        Self {
            current_page: page.page,
            data,
            per_page: page.per_page,
            total,
            last_page,
            from,
            to,
        }
    }
}
