//! ConvertKit API client
//!
//! Wraps the HTTP layer with the v3 endpoints: listing subscribers across all
//! pages, reading the subscriber total, and tagging subscribers.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{fetch_all, Page, PageFetcher};
use crate::types::{
    Subscriber, SubscriberPage, SubscriberQuery, Subscription, SubscriptionRequest,
    SubscriptionResponse,
};
use async_trait::async_trait;
use tracing::debug;

const SUBSCRIBERS_PATH: &str = "/v3/subscribers";

/// Client for the ConvertKit v3 API
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    config: ClientConfig,
}

impl Client {
    /// Create a client from a resolved configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .base_url(&config.endpoint)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            http: HttpClient::with_config(http_config)?,
            config,
        })
    }

    /// Create a client configured from the `CONVERTKIT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// All subscribers matching `query`, in the order the API returns them
    ///
    /// Pages after the first are fetched concurrently, at most
    /// `concurrent_requests` at a time. Requires the API secret.
    pub async fn subscribers(&self, query: &SubscriberQuery) -> Result<Vec<Subscriber>> {
        let pages = SubscriberPages {
            client: self,
            query,
        };
        let subscribers = fetch_all(&pages, self.config.concurrent_requests).await?;
        debug!(count = subscribers.len(), "Fetched subscribers");
        Ok(subscribers)
    }

    /// A single page of subscribers
    pub async fn subscriber_page(
        &self,
        page: u32,
        query: &SubscriberQuery,
    ) -> Result<SubscriberPage> {
        let secret = self.config.require_secret()?;

        debug!(page, "Fetching subscriber page");
        let request = RequestConfig::new()
            .query("api_secret", secret)
            .query("page", page.to_string())
            .queries(query.to_params());

        self.http
            .get_json_with_config(SUBSCRIBERS_PATH, request)
            .await
    }

    /// Number of subscribers in the account
    pub async fn total_subscribers(&self) -> Result<u64> {
        let page = self.subscriber_page(1, &SubscriberQuery::default()).await?;
        Ok(page.total_subscribers)
    }

    /// Add a tag to a subscriber, creating the subscriber if it doesn't exist
    pub async fn tag_subscriber(&self, email: &str, tag_id: u64) -> Result<Subscription> {
        self.create_tag_subscription(SubscriptionRequest::new(email).with_tag(tag_id))
            .await
    }

    /// Tag a subscriber with full control over the optional request fields
    ///
    /// The request is sent to the first tag's endpoint. Fails before sending
    /// if the request has no tags, or if neither the request nor the client
    /// carries an API key.
    pub async fn create_tag_subscription(
        &self,
        mut request: SubscriptionRequest,
    ) -> Result<Subscription> {
        let Some(&tag_id) = request.tags().first() else {
            return Err(Error::validation(
                "must specify at least one tag to create a subscription",
            ));
        };

        if request.api_key.is_none() {
            request.api_key = Some(self.config.require_key()?.to_string());
        }

        debug!(tag_id, tags = request.tags().len(), "Creating tag subscription");
        let response: SubscriptionResponse = self
            .http
            .post_json(&format!("/v3/tags/{tag_id}/subscribe"), &request)
            .await?;

        Ok(response.subscription)
    }
}

/// Page source for [`Client::subscribers`]
struct SubscriberPages<'a> {
    client: &'a Client,
    query: &'a SubscriberQuery,
}

#[async_trait]
impl<'a> PageFetcher for SubscriberPages<'a> {
    type Item = Subscriber;

    fn preflight(&self) -> Result<()> {
        self.client.config.require_secret().map(|_| ())
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<Subscriber>> {
        let page = self.client.subscriber_page(page, self.query).await?;
        Ok(page.into())
    }
}
