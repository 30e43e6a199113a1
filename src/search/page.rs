use serde::{Serialize, Deserialize};
use crate::core::types::Post;

/// How the `total` field of a [`SearchPage`] is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TotalMode {
    /// Scan every chunk. `total` is exact and does not depend on the
    /// page/per_page window.
    Exact,
    /// Stop scanning once the requested page is full. `total` is a lower
    /// bound (matches seen before the scan stopped) and the page is marked
    /// `total_is_lower_bound`.
    AtLeast,
}

impl Default for TotalMode {
    fn default() -> Self {
        TotalMode::Exact
    }
}

/// A paginated search over the dataset's searchable fields
/// (title, description, tags). Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub page: usize,
    pub per_page: usize,
    pub total_mode: TotalMode,
}

impl SearchRequest {
    pub fn new(query: &str, page: usize, per_page: usize) -> Self {
        SearchRequest {
            query: query.to_string(),
            page,
            per_page,
            total_mode: TotalMode::Exact,
        }
    }

    pub fn with_total_mode(mut self, mode: TotalMode) -> Self {
        self.total_mode = mode;
        self
    }

    /// Number of matches preceding the requested page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.per_page
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<Post>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    /// True when an `AtLeast` scan stopped early, making `total` an
    /// undercount of the true match total
    pub total_is_lower_bound: bool,
}

impl SearchPage {
    pub fn empty(page: usize, per_page: usize) -> Self {
        SearchPage {
            results: Vec::new(),
            total: 0,
            page,
            per_page,
            total_is_lower_bound: false,
        }
    }
}
