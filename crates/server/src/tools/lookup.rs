//! wikimedia_lookup tool implementation.
//!
//! Looks a term up in one named source.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikifit_client::{Aggregator, SourceOptions};
use wikifit_core::{Query, Source};

use super::json_result;

/// Input parameters for wikimedia_lookup tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LookupParams {
    /// Search term (required, at most 300 characters).
    pub query: String,

    /// Source name: wikipedia, wiktionary, wikiquote, wikibooks, commons,
    /// wikisource, wikiversity, wikispecies or wikidata.
    pub source: String,

    /// Maximum results for list sources such as commons and wikisource (1-50).
    #[serde(default)]
    pub limit: Option<u8>,

    /// Sentence cap for extract sources (1-10).
    #[serde(default)]
    pub sentences: Option<u8>,
}

/// Implementation of the wikimedia_lookup tool.
pub async fn lookup_impl(aggregator: &Aggregator, params: LookupParams) -> Result<CallToolResult, McpError> {
    let query = Query::new(&params.query)?;
    let source: Source = params.source.parse()?;

    let options = SourceOptions { limit: params.limit, sentences: params.sentences };
    options.validate()?;

    let output = aggregator.lookup(source, &query, &options).await?;
    json_result(&output)
}
