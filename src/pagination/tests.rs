//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Instrumented fake fetcher
// ============================================================================

/// Serves `total_pages` pages of `per_page` numbered items each, recording
/// every call and the peak number of calls in flight.
struct FakeFetcher {
    total_pages: u32,
    per_page: u32,
    delays: HashMap<u32, Duration>,
    failing: HashSet<u32>,
    claimed_total_items: Option<u64>,
    secret: Option<String>,
    calls: Mutex<Vec<u32>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeFetcher {
    fn new(total_pages: u32, per_page: u32) -> Self {
        Self {
            total_pages,
            per_page,
            delays: HashMap::new(),
            failing: HashSet::new(),
            claimed_total_items: None,
            secret: Some("secret".to_string()),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    fn delay(mut self, page: u32, millis: u64) -> Self {
        self.delays.insert(page, Duration::from_millis(millis));
        self
    }

    fn delay_all(mut self, millis: u64) -> Self {
        for page in 1..=self.total_pages {
            self.delays.insert(page, Duration::from_millis(millis));
        }
        self
    }

    fn fail_on(mut self, page: u32) -> Self {
        self.failing.insert(page);
        self
    }

    fn claim_total_items(mut self, total_items: u64) -> Self {
        self.claimed_total_items = Some(total_items);
        self
    }

    fn without_secret(mut self) -> Self {
        self.secret = None;
        self
    }

    fn calls(&self) -> Vec<u32> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }

    fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn items_for(&self, page: u32) -> Vec<u32> {
        (0..self.per_page).map(|i| page * 100 + i).collect()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    type Item = u32;

    fn preflight(&self) -> Result<()> {
        self.secret.as_ref().map(|_| ()).ok_or(Error::SecretMissing)
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<u32>> {
        self.calls.lock().unwrap().push(page);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&page) {
            return Err(Error::http_status(500, "Internal Server Error", ""));
        }
        let total_items = self
            .claimed_total_items
            .unwrap_or(u64::from(self.total_pages) * u64::from(self.per_page));
        Ok(Page::new(page, self.total_pages, self.items_for(page)).with_total_items(total_items))
    }
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_new() {
    let page = Page::new(2, 3, vec!["a", "b"]);
    assert_eq!(page.index, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 2);

    let last = Page::new(3, 3, vec!["c"]).with_total_items(5);
    assert_eq!(last.total_items, 5);
}

// ============================================================================
// fetch_all Tests
// ============================================================================

#[tokio::test]
async fn test_single_page_returns_items_unchanged() {
    let fetcher = FakeFetcher::new(1, 3);

    let items = fetch_all(&fetcher, 4).await.unwrap();

    assert_eq!(items, vec![100, 101, 102]);
    assert_eq!(fetcher.calls(), vec![1]);
    assert_eq!(fetcher.peak(), 1);
}

#[tokio::test]
async fn test_zero_total_pages_treated_as_single_page() {
    let fetcher = FakeFetcher::new(0, 0);

    let items = fetch_all(&fetcher, 4).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_concurrency_never_exceeds_limit() {
    let fetcher = FakeFetcher::new(5, 2).delay_all(20);

    let items = fetch_all(&fetcher, 2).await.unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(fetcher.calls(), vec![1, 2, 3, 4, 5]);
    assert!(fetcher.peak() <= 2, "peak in flight was {}", fetcher.peak());
    assert_eq!(fetcher.peak(), 2);
}

#[tokio::test]
async fn test_limit_of_one_serializes_requests() {
    let fetcher = FakeFetcher::new(4, 1).delay_all(5);

    let items = fetch_all(&fetcher, 1).await.unwrap();

    assert_eq!(items, vec![100, 200, 300, 400]);
    assert_eq!(fetcher.peak(), 1);
}

#[tokio::test]
async fn test_limit_larger_than_page_count() {
    let fetcher = FakeFetcher::new(3, 1).delay_all(10);

    let items = fetch_all(&fetcher, 16).await.unwrap();

    assert_eq!(items, vec![100, 200, 300]);
    assert_eq!(fetcher.peak(), 2);
}

#[tokio::test]
async fn test_merge_follows_page_order_not_completion_order() {
    // Page 3 finishes first, then page 2; page 1 was already done
    let fetcher = FakeFetcher::new(3, 2).delay(2, 60).delay(3, 5);

    let items = fetch_all(&fetcher, 3).await.unwrap();

    assert_eq!(items, vec![100, 101, 200, 201, 300, 301]);
}

#[tokio::test]
async fn test_first_page_failure_stops_everything() {
    let fetcher = FakeFetcher::new(5, 1).fail_on(1);

    let err = fetch_all(&fetcher, 2).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_middle_page_failure_fails_whole_fetch() {
    let fetcher = FakeFetcher::new(5, 1).delay_all(5).fail_on(3);

    let result = tokio::time::timeout(Duration::from_secs(5), fetch_all(&fetcher, 2))
        .await
        .expect("fetch_all should not deadlock");

    assert!(result.is_err());
    // Siblings are allowed to finish
    assert_eq!(fetcher.calls(), vec![1, 2, 3, 4, 5]);
    assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_multiple_failures_surface_one_error() {
    let fetcher = FakeFetcher::new(6, 1).fail_on(2).fail_on(4).fail_on(6);

    let err = fetch_all(&fetcher, 3).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_zero_concurrency_rejected_before_any_call() {
    let fetcher = FakeFetcher::new(3, 1);

    let err = fetch_all(&fetcher, 0).await.unwrap_err();

    assert!(matches!(err, Error::InvalidConfigValue { .. }));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_preflight_failure_makes_no_calls() {
    let fetcher = FakeFetcher::new(3, 1).without_secret();

    let err = fetch_all(&fetcher, 2).await.unwrap_err();

    assert!(matches!(err, Error::SecretMissing));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_page_count_beyond_item_count_rejected() {
    let fetcher = FakeFetcher::new(u32::MAX, 2).claim_total_items(40);

    let err = fetch_all(&fetcher, 4).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_many_pages_without_items_rejected() {
    let fetcher = FakeFetcher::new(3, 0).claim_total_items(0);

    let err = fetch_all(&fetcher, 2).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
    assert_eq!(fetcher.calls(), vec![1]);
}

#[test]
fn test_fetch_all_outside_tokio_test_macro() {
    let fetcher = FakeFetcher::new(2, 1);
    let items = tokio_test::block_on(fetch_all(&fetcher, 1));
    tokio_test::assert_ok!(&items);
    assert_eq!(items.unwrap(), vec![100, 200]);
}
