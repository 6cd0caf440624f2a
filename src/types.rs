//! ConvertKit request and response types
//!
//! Wire shapes for the subscriber list and tag subscription endpoints, plus
//! the query and request types callers build.

use crate::error::{Error, Result};
use crate::pagination::Page;
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Date format used by the API's `from`/`to` filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Subscribers
// ============================================================================

/// A ConvertKit subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: u64,
    #[serde(default)]
    pub first_name: Option<String>,
    pub email_address: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    /// Custom fields; unset fields come back as `null`
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
}

/// One page of `GET /v3/subscribers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberPage {
    pub total_subscribers: u64,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
}

impl From<SubscriberPage> for Page<Subscriber> {
    fn from(page: SubscriberPage) -> Self {
        Page {
            index: page.page,
            total_items: page.total_subscribers,
            total_pages: page.total_pages,
            items: page.subscribers,
        }
    }
}

/// Filters for listing subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberQuery {
    /// Only subscribers created on or after this date
    pub since: Option<NaiveDate>,
    /// Only subscribers created on or before this date
    pub until: Option<NaiveDate>,
    /// Newest first
    pub reverse: bool,
    /// Sort on cancellation date, which restricts results to cancelled subscribers
    pub cancelled: bool,
    /// Exact e-mail address match
    pub email_address: Option<String>,
}

impl SubscriberQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower date bound
    #[must_use]
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Set the upper date bound
    #[must_use]
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Sort newest first
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sort on cancellation date
    #[must_use]
    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Restrict to a single e-mail address
    #[must_use]
    pub fn email_address(mut self, email: impl Into<String>) -> Self {
        self.email_address = Some(email.into());
        self
    }

    /// Query parameters for this filter, in a stable order
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(since) = self.since {
            params.push(("from".to_string(), since.format(DATE_FORMAT).to_string()));
        }
        if let Some(until) = self.until {
            params.push(("to".to_string(), until.format(DATE_FORMAT).to_string()));
        }
        if self.reverse {
            params.push(("sort_order".to_string(), "desc".to_string()));
        }
        if self.cancelled {
            params.push(("sort_field".to_string(), "cancelled_at".to_string()));
        }
        if let Some(email) = &self.email_address {
            params.push(("email_address".to_string(), email.clone()));
        }
        params
    }
}

/// Parse a filter date: `YYYY-MM-DD` or `yesterday`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_date_relative_to(input, Local::now().date_naive())
}

/// Parse a filter date, resolving `yesterday` against `today`
pub fn parse_date_relative_to(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("yesterday") {
        return Ok(today - Duration::days(1));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| Error::invalid_date(input, format!("expected YYYY-MM-DD or 'yesterday' ({e})")))
}

// ============================================================================
// Tag subscriptions
// ============================================================================

/// A subscriber's association with a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    pub subscribable_id: u64,
    pub subscribable_type: String,
    pub subscriber: SubscriptionSubscriber,
}

/// The subscriber embedded in a [`Subscription`]; the API may return only its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSubscriber {
    pub id: u64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: HashMap<String, Option<String>>,
}

/// Envelope of `POST /v3/tags/{id}/subscribe`
#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionResponse {
    pub subscription: Subscription,
}

/// Parameters for tagging a subscriber
///
/// `email` and at least one tag are required. `fields` keys must name custom
/// fields that already exist in the account; this call cannot create them.
/// `api_key` falls back to the client's key when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    tags: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl SubscriptionRequest {
    /// Create a request for an e-mail address with no tags yet
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Add a tag unless it is already present
    pub fn add_tag(&mut self, tag_id: u64) {
        if !self.tags.contains(&tag_id) {
            self.tags.push(tag_id);
        }
    }

    /// Builder form of [`Self::add_tag`]
    #[must_use]
    pub fn with_tag(mut self, tag_id: u64) -> Self {
        self.add_tag(tag_id);
        self
    }

    /// Set the first name
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set a custom field value
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the API key for this request only
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Tags in insertion order, without duplicates
    pub fn tags(&self) -> &[u64] {
        &self.tags
    }
}
