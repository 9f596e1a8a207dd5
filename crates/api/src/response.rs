//! Shared response envelope types for API handlers.
//!
//! All list and action responses use a `{ "data": ... }` envelope. Paged
//! lists add a `meta` block with the page link sequence.

use realty_core::pagination::PageMeta;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "meta": { page, per_page, total, total_pages, pages } }`.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
