//! # ConvertKit client
//!
//! An async client for the ConvertKit v3 API.
//!
//! ## Features
//!
//! - **Subscriber Listing**: Every page of the subscriber list, fetched with a
//!   bounded number of concurrent requests and merged in page order
//! - **Filters**: Date range, sort order, cancellation and e-mail filters
//! - **Tagging**: Tag a subscriber, creating it if it does not exist
//! - **Explicit Configuration**: Endpoint, key, secret and concurrency resolved
//!   once from code or `CONVERTKIT_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use convertkit::{Client, ClientConfig, SubscriberQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .key("api_key")
//!         .secret("api_secret")
//!         .concurrent_requests(4)
//!         .build()?;
//!     let client = Client::new(config)?;
//!
//!     let query = SubscriberQuery::new().since(convertkit::parse_date("yesterday")?);
//!     for subscriber in client.subscribers(&query).await? {
//!         println!("{}", subscriber.email_address);
//!     }
//!
//!     client.tag_subscriber("someone@example.com", 42).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                       Client                         │
//! │  subscribers()  total_subscribers()  tag_subscriber()│
//! └──────────────────────────────────────────────────────┘
//!                │                         │
//! ┌──────────────┴─────────┐   ┌───────────┴───────────┐
//! │       Pagination       │   │         HTTP          │
//! │ fetch_all + semaphore  │──▶│ GET/POST, status, JSON│
//! └────────────────────────┘   └───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Request and response types
pub mod types;

/// HTTP client
pub mod http;

/// Bounded-concurrency pagination
pub mod pagination;

/// ConvertKit API client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{fetch_all, Page, PageFetcher};
pub use types::{
    parse_date, Subscriber, SubscriberPage, SubscriberQuery, Subscription, SubscriptionRequest,
    SubscriptionSubscriber,
};
