//! Wikisource full-text search.

use wikifit_core::{Payload, Query, Source, SourceResult, TextSnippet};

use super::html::to_plain_text;
use super::{SourceAdapter, SourceOptions, report};
use crate::wikimedia::response::{QueryResponse, SearchQuery};
use crate::wikimedia::{SourceError, WikimediaClient};

/// Default number of search hits.
const DEFAULT_LIMIT: u8 = 3;

pub struct WikisourceAdapter {
    client: WikimediaClient,
}

impl WikisourceAdapter {
    pub fn new(client: WikimediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &Query, options: &SourceOptions) -> Result<Payload, SourceError> {
        let limit = options.limit.unwrap_or(DEFAULT_LIMIT);

        let response: QueryResponse<SearchQuery> = self
            .client
            .action_api(
                Source::Wikisource,
                &[
                    ("action", "query".to_string()),
                    ("list", "search".to_string()),
                    ("srsearch", query.as_str().to_string()),
                    ("srlimit", limit.to_string()),
                ],
            )
            .await?;

        into_texts(query, response.query)
    }
}

fn into_texts(query: &Query, result: SearchQuery) -> Result<Payload, SourceError> {
    if result.search.is_empty() {
        return Err(SourceError::NotFound(format!("no texts mention '{}'", query)));
    }

    let texts = result
        .search
        .into_iter()
        .map(|hit| TextSnippet { snippet: to_plain_text(&hit.snippet), title: hit.title })
        .collect();

    Ok(Payload::Texts(texts))
}

#[async_trait::async_trait]
impl SourceAdapter for WikisourceAdapter {
    fn source(&self) -> Source {
        Source::Wikisource
    }

    async fn fetch(&self, query: &Query, options: &SourceOptions) -> SourceResult {
        report(Source::Wikisource, query, self.lookup(query, options).await)
    }
}
