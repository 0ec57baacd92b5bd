//! Wikimedia Commons media search.
//!
//! Two requests: a File-namespace search for the term, then `imageinfo` for
//! the hits to resolve thumbnail URLs and descriptions.

use wikifit_core::{ImageDescriptor, Payload, Query, Source, SourceResult};

use super::html::to_plain_text;
use super::{SourceAdapter, SourceOptions, report};
use crate::wikimedia::response::{ImageInfoQuery, QueryResponse, SearchQuery};
use crate::wikimedia::{SourceError, WikimediaClient};

/// Default number of images.
const DEFAULT_LIMIT: u8 = 5;

/// Thumbnail width in pixels.
const THUMB_WIDTH: &str = "300";

/// File namespace id.
const FILE_NAMESPACE: &str = "6";

pub struct CommonsAdapter {
    client: WikimediaClient,
}

impl CommonsAdapter {
    pub fn new(client: WikimediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &Query, options: &SourceOptions) -> Result<Payload, SourceError> {
        let limit = options.limit.unwrap_or(DEFAULT_LIMIT);

        let search: QueryResponse<SearchQuery> = self
            .client
            .action_api(
                Source::Commons,
                &[
                    ("action", "query".to_string()),
                    ("list", "search".to_string()),
                    ("srsearch", query.as_str().to_string()),
                    ("srnamespace", FILE_NAMESPACE.to_string()),
                    ("srlimit", limit.to_string()),
                ],
            )
            .await?;

        let titles: Vec<String> = search.query.search.into_iter().map(|hit| hit.title).collect();
        if titles.is_empty() {
            return Err(SourceError::NotFound(format!("no media files for '{}'", query)));
        }

        let info: QueryResponse<ImageInfoQuery> = self
            .client
            .action_api(
                Source::Commons,
                &[
                    ("action", "query".to_string()),
                    ("titles", titles.join("|")),
                    ("prop", "imageinfo".to_string()),
                    ("iiprop", "url|extmetadata".to_string()),
                    ("iiurlwidth", THUMB_WIDTH.to_string()),
                ],
            )
            .await?;

        let images = collect_images(&titles, info.query);
        if images.is_empty() {
            return Err(SourceError::NotFound(format!("no usable images for '{}'", query)));
        }

        Ok(Payload::Images(images))
    }
}

/// Descriptors in search-rank order; files without a URL are dropped.
fn collect_images(ranked_titles: &[String], info: ImageInfoQuery) -> Vec<ImageDescriptor> {
    let mut pages: Vec<_> = info.pages.into_iter().filter(|page| !page.missing).collect();
    pages.sort_by_key(|page| {
        ranked_titles
            .iter()
            .position(|title| *title == page.title)
            .unwrap_or(usize::MAX)
    });

    pages
        .into_iter()
        .filter_map(|page| {
            let info = page.imageinfo.first()?;
            let url = info.best_url()?.to_string();
            let description = info.description_html().map(to_plain_text).unwrap_or_default();
            let title = page.title.strip_prefix("File:").unwrap_or(&page.title).to_string();

            Some(ImageDescriptor { title, url, description })
        })
        .collect()
}

#[async_trait::async_trait]
impl SourceAdapter for CommonsAdapter {
    fn source(&self) -> Source {
        Source::Commons
    }

    async fn fetch(&self, query: &Query, options: &SourceOptions) -> SourceResult {
        report(Source::Commons, query, self.lookup(query, options).await)
    }
}
