//! MCP tool implementations.
//!
//! This module contains all tools exposed by the wikifit server.

pub mod lookup;
pub mod search_all;
pub mod sources;

pub use lookup::LookupParams;
pub use search_all::SearchAllParams;

use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;
use wikifit_core::Error;

/// Wrap `output` as pretty-printed JSON text content.
fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(|e| Error::Internal(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
