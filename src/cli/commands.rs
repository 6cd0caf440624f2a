//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// ConvertKit API command-line client
#[derive(Parser, Debug)]
#[command(name = "convertkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API endpoint (overrides CONVERTKIT_API_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API key (overrides CONVERTKIT_API_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// API secret (overrides CONVERTKIT_API_SECRET)
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Maximum page requests in flight (overrides CONVERTKIT_CONCURRENT_REQUESTS)
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List subscribers
    Subscribers {
        /// Created on or after this date (YYYY-MM-DD or "yesterday")
        #[arg(long)]
        since: Option<String>,

        /// Created on or before this date (YYYY-MM-DD or "yesterday")
        #[arg(long)]
        until: Option<String>,

        /// Newest first
        #[arg(long)]
        reverse: bool,

        /// Sort on cancellation date
        #[arg(long)]
        cancelled: bool,

        /// Only the subscriber with this e-mail address
        #[arg(long)]
        email: Option<String>,
    },

    /// Show the total number of subscribers
    Total,

    /// Tag a subscriber, creating it if it does not exist
    Tag {
        /// Subscriber e-mail address
        #[arg(long)]
        email: String,

        /// Tag id (repeatable)
        #[arg(long = "tag", required = true)]
        tags: Vec<u64>,

        /// Subscriber first name
        #[arg(long)]
        first_name: Option<String>,

        /// Custom field as name=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
