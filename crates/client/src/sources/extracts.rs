//! Plain-text page extracts (`prop=extracts`) for the text-centric projects.

use wikifit_core::{Extract, Payload, Query, Source, SourceResult};

use super::{SourceAdapter, SourceOptions, report};
use crate::wikimedia::response::{ExtractQuery, QueryResponse};
use crate::wikimedia::{SourceError, WikimediaClient};

/// Extract lookup against one project's action API.
///
/// Wiktionary, Wikiquote, Wikibooks, Wikiversity and Wikispecies differ
/// only in host and sentence cap.
pub struct ExtractAdapter {
    client: WikimediaClient,
    source: Source,
    default_sentences: Option<u8>,
    plain_sections: bool,
}

impl ExtractAdapter {
    pub fn new(client: WikimediaClient, source: Source, default_sentences: Option<u8>) -> Self {
        Self { client, source, default_sentences, plain_sections: false }
    }

    pub fn wiktionary(client: WikimediaClient) -> Self {
        Self { plain_sections: true, ..Self::new(client, Source::Wiktionary, Some(5)) }
    }

    pub fn wikiquote(client: WikimediaClient) -> Self {
        Self::new(client, Source::Wikiquote, Some(5))
    }

    pub fn wikibooks(client: WikimediaClient) -> Self {
        Self::new(client, Source::Wikibooks, Some(10))
    }

    pub fn wikiversity(client: WikimediaClient) -> Self {
        Self::new(client, Source::Wikiversity, Some(5))
    }

    /// Species pages are short; no sentence cap.
    pub fn wikispecies(client: WikimediaClient) -> Self {
        Self::new(client, Source::Wikispecies, None)
    }

    fn params(&self, query: &Query, options: &SourceOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("prop", "extracts".to_string()),
            ("explaintext", "1".to_string()),
            ("redirects", "1".to_string()),
            ("titles", query.as_str().to_string()),
        ];

        if let Some(sentences) = options.sentences.or(self.default_sentences) {
            params.push(("exsentences", sentences.to_string()));
        }

        if self.plain_sections {
            params.push(("exsectionformat", "plain".to_string()));
        }

        params
    }

    async fn lookup(&self, query: &Query, options: &SourceOptions) -> Result<Payload, SourceError> {
        let response: QueryResponse<ExtractQuery> =
            self.client.action_api(self.source, &self.params(query, options)).await?;

        first_extract(self.source, query, response.query)
    }
}

fn first_extract(source: Source, query: &Query, result: ExtractQuery) -> Result<Payload, SourceError> {
    result
        .pages
        .iter()
        .find_map(|page| page.text().map(|text| Extract { title: page.title.clone(), text: text.to_string() }))
        .map(Payload::Extract)
        .ok_or_else(|| SourceError::NotFound(format!("no {} page for '{}'", source, query)))
}

#[async_trait::async_trait]
impl SourceAdapter for ExtractAdapter {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch(&self, query: &Query, options: &SourceOptions) -> SourceResult {
        report(self.source, query, self.lookup(query, options).await)
    }
}
