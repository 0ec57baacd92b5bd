//! Wikipedia page summaries via the REST API.

use wikifit_core::{Payload, Query, Source, SourceResult, Summary};

use super::{SourceAdapter, SourceOptions, report};
use crate::wikimedia::response::PageSummary;
use crate::wikimedia::{SourceError, WikimediaClient};

/// `GET /api/rest_v1/page/summary/{title}`.
pub struct WikipediaAdapter {
    client: WikimediaClient,
}

impl WikipediaAdapter {
    pub fn new(client: WikimediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &Query) -> Result<Payload, SourceError> {
        let title = query.as_title();
        let url = self.client.endpoint(Source::Wikipedia, &["api", "rest_v1", "page", "summary", &title])?;

        let page: PageSummary = self.client.get_json(url, &[]).await?;
        into_summary(query, page)
    }
}

fn into_summary(query: &Query, page: PageSummary) -> Result<Payload, SourceError> {
    let extract = page.extract.trim();
    if extract.is_empty() {
        let reason = if page.is_disambiguation() {
            format!("'{}' refers to multiple topics", query)
        } else {
            format!("'{}' has no summary", page.title)
        };
        return Err(SourceError::NotFound(reason));
    }

    Ok(Payload::Summary(Summary {
        extract: extract.to_string(),
        description: page.description.clone().filter(|d| !d.is_empty()),
        page_url: page.page_url(),
        thumbnail_url: page.thumbnail.as_ref().map(|t| t.source.clone()),
        title: page.title,
    }))
}

#[async_trait::async_trait]
impl SourceAdapter for WikipediaAdapter {
    fn source(&self) -> Source {
        Source::Wikipedia
    }

    async fn fetch(&self, query: &Query, _options: &SourceOptions) -> SourceResult {
        report(Source::Wikipedia, query, self.lookup(query).await)
    }
}
