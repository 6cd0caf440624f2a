//! HTTP client module
//!
//! Thin JSON-over-HTTP layer used by the API client.
//!
//! # Features
//!
//! - **URL Building**: Paths are joined onto a configured base URL
//! - **Status Checking**: Any non-2xx response becomes [`crate::Error::HttpStatus`]
//! - **JSON Decoding**: Bodies that don't match the expected shape become [`crate::Error::Decode`]
//!
//! Requests are sent exactly once; there is no retry or rate limiting here.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
