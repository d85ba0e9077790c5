use serde::{Deserialize, Serialize};

/// One page of a paginated catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Keep at most `n` results (the details page shows a fixed number of each section)
    pub fn truncated(mut self, n: usize) -> Self {
        self.results.truncate(n);
        self
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}
