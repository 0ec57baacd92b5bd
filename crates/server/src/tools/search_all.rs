//! wikimedia_search_all tool implementation.
//!
//! Runs one query against every registered source.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikifit_client::Aggregator;
use wikifit_core::Query;

use super::json_result;

/// Input parameters for wikimedia_search_all tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchAllParams {
    /// Search term (required, at most 300 characters).
    pub query: String,
}

/// Implementation of the wikimedia_search_all tool.
///
/// The output maps every source name to its result; sources that failed
/// carry a `failure` status instead of failing the call.
pub async fn search_all_impl(aggregator: &Aggregator, params: SearchAllParams) -> Result<CallToolResult, McpError> {
    let query = Query::new(&params.query)?;
    let output = aggregator.search_all(&query).await;
    json_result(&output)
}
