//! Error types for the ConvertKit client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Nothing in the crate retries; every error surfaces to the immediate caller.

use thiserror::Error;

/// The main error type for the ConvertKit client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Precondition Errors
    // ============================================================================
    #[error("ConvertKit API key missing")]
    KeyMissing,

    #[error("ConvertKit API secret missing")]
    SecretMissing,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {status} {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Invalid request: {message}")]
    Validation { message: String },

    #[error("Invalid date '{input}': {message}")]
    InvalidDate { input: String, message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a transport error, dropping the request URL
    ///
    /// Request URLs carry the API secret as a query parameter and must not
    /// reach error messages.
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the ConvertKit client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
