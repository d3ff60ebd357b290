/// Paginated result wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Convert every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let result = PaginatedResult::new(vec![1, 2, 3], 51, 1, 25);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let result: PaginatedResult<i32> = PaginatedResult::new(vec![], 0, 1, 25);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let result = PaginatedResult::new(vec![1, 2], 12, 2, 5).map(|n| n * 10);
        assert_eq!(result.items, vec![10, 20]);
        assert_eq!(result.total, 12);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 5);
        assert_eq!(result.total_pages, 3);
    }
}
