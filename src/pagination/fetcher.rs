//! Bounded-concurrency fetch of every page

use super::types::PageFetcher;
use crate::error::{Error, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::debug;

/// Fetch all pages and return their items in page order
///
/// Page 1 is fetched alone. If it reports more than one page, pages 2..N are
/// requested concurrently with at most `concurrency_limit` calls to
/// [`PageFetcher::fetch_page`] outstanding at any moment.
///
/// Items are merged by page index, not completion order. If any page fails,
/// the remaining requests still run to completion, their results are
/// discarded, and the first error observed is returned.
pub async fn fetch_all<F>(fetcher: &F, concurrency_limit: usize) -> Result<Vec<F::Item>>
where
    F: PageFetcher + ?Sized,
{
    if concurrency_limit == 0 {
        return Err(Error::invalid_value(
            "concurrency_limit",
            "must be at least 1",
        ));
    }

    fetcher.preflight()?;

    let first = fetcher.fetch_page(1).await?;
    let total_pages = first.total_pages;
    if total_pages <= 1 {
        return Ok(first.items);
    }
    // Each page holds at least one item
    if u64::from(total_pages) > first.total_items {
        return Err(Error::decode(format!(
            "page 1 reports {total_pages} pages for {} items",
            first.total_items
        )));
    }

    debug!(
        total_pages,
        total_items = first.total_items,
        concurrency_limit,
        "Fetching remaining pages"
    );

    // One slot per page; slot i holds page i + 1
    let mut slots: Vec<Option<Vec<F::Item>>> = Vec::with_capacity(total_pages as usize);
    slots.push(Some(first.items));
    slots.resize_with(total_pages as usize, || None);

    let gate = Semaphore::new(concurrency_limit);
    let mut pending: FuturesUnordered<_> = (2..=total_pages)
        .map(|index| {
            let gate = &gate;
            async move {
                let result = async {
                    let _permit = gate
                        .acquire()
                        .await
                        .map_err(|e| Error::Other(format!("page admission closed: {e}")))?;
                    fetcher.fetch_page(index).await
                }
                .await;
                (index, result)
            }
        })
        .collect();

    let mut first_error = None;
    while let Some((index, result)) = pending.next().await {
        match result {
            Ok(page) if first_error.is_none() => {
                slots[(index - 1) as usize] = Some(page.items);
            }
            Ok(_) => {}
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    debug!(total_pages, "All pages fetched");

    Ok(slots.into_iter().flatten().flatten().collect())
}
