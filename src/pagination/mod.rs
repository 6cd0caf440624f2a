//! Pagination module
//!
//! Fetches every page of a page-numbered resource with a bounded number of
//! requests in flight.
//!
//! # Overview
//!
//! Page 1 is fetched first and reports the total page count. Pages 2..N are
//! then requested concurrently, each admitted through a counting semaphore,
//! and their items are merged back in page order regardless of which request
//! finished first.

mod fetcher;
mod types;

pub use fetcher::fetch_all;
pub use types::{Page, PageFetcher};

#[cfg(test)]
mod tests;
