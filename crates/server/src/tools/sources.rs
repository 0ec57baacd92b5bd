//! wikimedia_sources tool implementation.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikifit_client::{Aggregator, WikimediaConfig};
use wikifit_core::Source;

use super::json_result;

/// Output structure for wikimedia_sources tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourcesOutput {
    /// Registered sources in run order.
    pub sources: Vec<SourceInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceInfo {
    pub name: Source,
    /// Base URL requests for this source go to.
    pub base_url: String,
}

/// Implementation of the wikimedia_sources tool.
pub fn sources_impl(aggregator: &Aggregator, wikimedia: &WikimediaConfig) -> Result<CallToolResult, McpError> {
    let sources = aggregator
        .sources()
        .map(|name| SourceInfo { name, base_url: wikimedia.base_url(name) })
        .collect();

    json_result(&SourcesOutput { sources })
}
