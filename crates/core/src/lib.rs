//! Core types and shared functionality for wikifit.
//!
//! This crate provides:
//! - Domain model for multi-source Wikimedia lookups
//! - In-memory TTL cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod model;

pub use cache::{Cached, TtlCache, cached};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use model::{
    AggregateResult, Entity, ErrorKind, Extract, ImageDescriptor, Payload, Query, Source, SourceResult, Summary,
    TextSnippet,
};
