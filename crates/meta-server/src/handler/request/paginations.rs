//! Offset pagination query.

use meta_postgres::types::{DEFAULT_LIMIT, OffsetPagination};
use serde::{Deserialize, Serialize};

/// `?limit=&offset=` query string; out-of-range values are clamped.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PaginationQuery> for OffsetPagination {
    fn from(query: PaginationQuery) -> Self {
        OffsetPagination::new(
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.offset.unwrap_or_default(),
        )
    }
}
