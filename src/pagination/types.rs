//! Pagination types and traits

use crate::error::Result;
use async_trait::async_trait;

/// One page of a paginated resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// 1-based page index
    pub index: u32,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Items on this page, in server order
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(index: u32, total_pages: u32, items: Vec<T>) -> Self {
        Self {
            index,
            total_items: items.len() as u64,
            total_pages,
            items,
        }
    }

    /// Set the total item count
    #[must_use]
    pub fn with_total_items(mut self, total_items: u64) -> Self {
        self.total_items = total_items;
        self
    }
}

/// Retrieves single pages of a resource
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type carried by each page
    type Item: Send;

    /// Check anything that must hold before the first request is sent
    ///
    /// Runs once per [`super::fetch_all`] call, before page 1 and before any
    /// concurrency slot is taken.
    fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Fetch the page with the given 1-based index
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>>;
}
