use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Raw `limit`/`offset` query parameters
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    /// Clamp into a valid page: limit to [1, 100], offset to >= 0
    pub fn clamp(&self) -> PageRequest {
        PageRequest {
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Page window handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

/// One page of records plus the total matching the query
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, returned: usize, total: i64) -> Self {
        Self {
            total,
            limit: request.limit,
            offset: request.offset,
            has_more: request.offset + (returned as i64) < total,
        }
    }
}
