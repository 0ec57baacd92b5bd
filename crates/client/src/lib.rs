//! Client code for wikifit.
//!
//! This crate provides the shared Wikimedia HTTP client, one adapter per
//! registered source, and the aggregator that fans a query out across them.

pub mod aggregate;
pub mod sources;
pub mod wikimedia;

pub use aggregate::{Aggregator, AggregatorPolicy};
pub use sources::{SourceAdapter, SourceOptions, default_adapters};
pub use wikimedia::{SourceError, WikimediaClient, WikimediaConfig};
