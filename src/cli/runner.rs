//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::types::{parse_date, SubscriberQuery, SubscriptionRequest};
use serde::Serialize;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.client_config()?)?;

        match &self.cli.command {
            Commands::Subscribers {
                since,
                until,
                reverse,
                cancelled,
                email,
            } => {
                let query = build_query(
                    since.as_deref(),
                    until.as_deref(),
                    *reverse,
                    *cancelled,
                    email.as_deref(),
                )?;
                self.subscribers(&client, &query).await
            }
            Commands::Total => self.total(&client).await,
            Commands::Tag {
                email,
                tags,
                first_name,
                fields,
            } => {
                let request =
                    build_subscription_request(email, tags, first_name.as_deref(), fields)?;
                self.tag(&client, request).await
            }
        }
    }

    /// Environment configuration with command-line overrides applied
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.apply_overrides(ClientConfig::from_env()?)
    }

    fn apply_overrides(&self, mut config: ClientConfig) -> Result<ClientConfig> {
        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(key) = &self.cli.key {
            config.key = Some(key.clone());
        }
        if let Some(secret) = &self.cli.secret {
            config.secret = Some(secret.clone());
        }
        if let Some(limit) = self.cli.concurrency {
            config.concurrent_requests = limit;
        }
        config.validate()?;
        Ok(config)
    }

    async fn subscribers(&self, client: &Client, query: &SubscriberQuery) -> Result<()> {
        let subscribers = client.subscribers(query).await?;
        match self.cli.format {
            OutputFormat::Json => {
                for subscriber in &subscribers {
                    println!("{}", serde_json::to_string(subscriber)?);
                }
            }
            OutputFormat::Pretty => self.emit(&subscribers)?,
        }
        if self.cli.verbose {
            eprintln!("{} subscribers", subscribers.len());
        }
        Ok(())
    }

    async fn total(&self, client: &Client) -> Result<()> {
        let total = client.total_subscribers().await?;
        self.emit(&serde_json::json!({ "total_subscribers": total }))
    }

    async fn tag(&self, client: &Client, request: SubscriptionRequest) -> Result<()> {
        let subscription = client.create_tag_subscription(request).await?;
        self.emit(&subscription)
    }

    fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let out = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{out}");
        Ok(())
    }
}

/// Build a subscriber query from raw command-line values
pub fn build_query(
    since: Option<&str>,
    until: Option<&str>,
    reverse: bool,
    cancelled: bool,
    email: Option<&str>,
) -> Result<SubscriberQuery> {
    let mut query = SubscriberQuery::new();
    if let Some(raw) = since {
        query.since = Some(parse_date(raw).context("--since")?);
    }
    if let Some(raw) = until {
        query.until = Some(parse_date(raw).context("--until")?);
    }
    query.reverse = reverse;
    query.cancelled = cancelled;
    query.email_address = email.map(str::to_string);
    Ok(query)
}

/// Build a tag subscription request from raw command-line values
pub fn build_subscription_request(
    email: &str,
    tags: &[u64],
    first_name: Option<&str>,
    fields: &[String],
) -> Result<SubscriptionRequest> {
    let mut request = SubscriptionRequest::new(email);
    for &tag in tags {
        request.add_tag(tag);
    }
    if let Some(name) = first_name {
        request.first_name = Some(name.to_string());
    }
    for raw in fields {
        let (name, value) = parse_field(raw)?;
        request.fields.insert(name, value);
    }
    Ok(request)
}

/// Parse a `name=value` custom field argument
pub fn parse_field(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::validation(format!(
            "field '{raw}' must be written as name=value"
        ))),
    }
}
