//! CLI module
//!
//! Command-line interface for the ConvertKit client.
//!
//! # Commands
//!
//! - `subscribers` - List every subscriber matching the filters
//! - `total` - Print the subscriber count
//! - `tag` - Tag a subscriber, creating it if needed

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
