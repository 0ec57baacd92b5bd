//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::lookup::{LookupParams, lookup_impl};
use crate::tools::search_all::{SearchAllParams, search_all_impl};
use crate::tools::sources::sources_impl;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use wikifit_client::{Aggregator, WikimediaConfig};
use wikifit_core::{AppConfig, Error};

/// The main MCP server handler for wikifit.
#[derive(Clone)]
pub struct WikifitServer {
    tool_router: ToolRouter<Self>,
    aggregator: Aggregator,
    wikimedia: WikimediaConfig,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl WikifitServer {
    /// Create a server handler over every Wikimedia source.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let wikimedia = WikimediaConfig::from_app_config(config)?;
        let aggregator = Aggregator::from_config(config)?;
        Ok(Self { tool_router: Self::tool_router(), aggregator, wikimedia })
    }

    /// Look a term up in every Wikimedia source.
    #[tool(
        description = "Look a health or fitness term up in Wikipedia, Wiktionary, Wikiquote, Wikibooks, Commons, Wikisource, Wikiversity, Wikispecies and Wikidata. Returns one result per source; sources without an entry report a failure kind instead of failing the call."
    )]
    async fn wikimedia_search_all(&self, params: Parameters<SearchAllParams>) -> Result<CallToolResult, McpError> {
        search_all_impl(&self.aggregator, params.0).await
    }

    /// Look a term up in a single source.
    #[tool(
        description = "Look a term up in one Wikimedia source. Optional limit caps list results (commons, wikisource) and sentences caps extract length."
    )]
    async fn wikimedia_lookup(&self, params: Parameters<LookupParams>) -> Result<CallToolResult, McpError> {
        lookup_impl(&self.aggregator, params.0).await
    }

    /// List the registered sources.
    #[tool(description = "List the registered Wikimedia sources and the base URL each one queries.")]
    async fn wikimedia_sources(&self) -> Result<CallToolResult, McpError> {
        sources_impl(&self.aggregator, &self.wikimedia)
    }
}

impl ServerHandler for WikifitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "wikifit".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
