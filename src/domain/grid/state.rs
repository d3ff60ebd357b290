use std::collections::BTreeMap;

use super::sort::SortKey;

/// Validated grid parameters of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    /// 1-based page number
    pub page: u64,
    /// Rows per page, always within the configured bounds
    pub per_page: u64,
    /// Sanitized search text, empty when no search applies
    pub search: String,
    /// Submitted filter values for configured filterables only
    pub filters: BTreeMap<String, String>,
    /// Requested ordering for configured sortables only, primary key first
    pub sorts: Vec<SortKey>,
}

impl GridState {
    /// Rows to skip, capped at `i64::MAX` since SQL backends bind offsets
    /// as signed 64-bit integers.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }
}
