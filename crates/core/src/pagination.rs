//! Pagination helpers for the public listing endpoints.
//!
//! List responses carry a [`PageMeta`] block including `pages`, the
//! sequence of page links the site renders under a grid of cards:
//! first and last page, the current page with its neighbours, and `"..."`
//! where pages are skipped.

use serde::{Serialize, Serializer};

/// Default page size for listing endpoints (a 3x4 card grid).
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Maximum page size a client may request.
pub const MAX_PER_PAGE: i64 = 100;

/// Up to this many pages every page number is listed.
const MAX_PAGES_WITHOUT_ELLIPSIS: i64 = 7;

/// Pages shown on each side of the current page.
const SIBLINGS: i64 = 1;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn from_params(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: clamp_limit(per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

// ---------------------------------------------------------------------------
// Page number sequence
// ---------------------------------------------------------------------------

/// One entry in the page link sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(i64),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_i64(*n),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Build the page link sequence for `current` out of `total_pages`.
///
/// `current` is clamped into range. A gap of a single page is filled with
/// that page rather than an ellipsis.
pub fn page_numbers(current: i64, total_pages: i64) -> Vec<PageItem> {
    if total_pages <= 0 {
        return Vec::new();
    }
    if total_pages <= MAX_PAGES_WITHOUT_ELLIPSIS {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let start = (current - SIBLINGS).max(2);
    let end = (current + SIBLINGS).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];

    match start {
        2 => {}
        3 => items.push(PageItem::Page(2)),
        _ => items.push(PageItem::Ellipsis),
    }

    items.extend((start..=end).map(PageItem::Page));

    let gap = total_pages - 1 - end;
    match gap {
        0 => {}
        1 => items.push(PageItem::Page(total_pages - 1)),
        _ => items.push(PageItem::Ellipsis),
    }

    items.push(PageItem::Page(total_pages));
    items
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    pub pages: Vec<PageItem>,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total_pages = total_pages(total, request.per_page);
        Self {
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages,
            pages: page_numbers(request.page, total_pages),
        }
    }
}
