//! Wikidata item lookup.
//!
//! Searches for the best-matching item, then loads its label, description
//! and a fixed set of health-related statements.

use std::collections::BTreeMap;

use wikifit_core::{Entity, Payload, Query, Source, SourceResult};

use super::{SourceAdapter, SourceOptions, report};
use crate::wikimedia::response::{EntityDocument, EntitySearch, RawEntity};
use crate::wikimedia::{SourceError, WikimediaClient};

/// Health-related properties and the names they are reported under.
pub const HEALTH_PROPERTIES: [(&str, &str); 5] = [
    ("P2175", "medical condition treated"),
    ("P2176", "drug used for treatment"),
    ("P780", "symptoms"),
    ("P1050", "medical condition"),
    ("P1995", "health specialty"),
];

pub struct WikidataAdapter {
    client: WikimediaClient,
}

impl WikidataAdapter {
    pub fn new(client: WikimediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &Query) -> Result<Payload, SourceError> {
        let language = self.client.language().to_string();

        let search: EntitySearch = self
            .client
            .action_api(
                Source::Wikidata,
                &[
                    ("action", "wbsearchentities".to_string()),
                    ("search", query.as_str().to_string()),
                    ("language", language.clone()),
                    ("uselang", language.clone()),
                    ("type", "item".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let Some(hit) = search.search.into_iter().next() else {
            return Err(SourceError::NotFound(format!("no Wikidata item for '{}'", query)));
        };

        let mut document: EntityDocument = self
            .client
            .action_api(
                Source::Wikidata,
                &[
                    ("action", "wbgetentities".to_string()),
                    ("ids", hit.id.clone()),
                    ("languages", language.clone()),
                    ("props", "labels|descriptions|claims".to_string()),
                ],
            )
            .await?;

        let raw = document
            .entities
            .remove(&hit.id)
            .ok_or_else(|| SourceError::Parse(format!("entity {} absent from response", hit.id)))?;

        into_entity(hit.id, &language, raw).map(Payload::Entity)
    }
}

fn into_entity(id: String, language: &str, raw: RawEntity) -> Result<Entity, SourceError> {
    if raw.is_missing() {
        return Err(SourceError::NotFound(format!("entity {} does not exist", id)));
    }

    let label = raw
        .labels
        .get(language)
        .map(|v| v.value.clone())
        .unwrap_or_else(|| id.clone());
    let description = raw
        .descriptions
        .get(language)
        .map(|v| v.value.clone())
        .unwrap_or_default();

    let mut properties = BTreeMap::new();
    for (property, name) in HEALTH_PROPERTIES {
        let values: Vec<String> = raw
            .claims
            .get(property)
            .into_iter()
            .flatten()
            .filter_map(|claim| claim.mainsnak.item_id())
            .map(str::to_string)
            .collect();

        if !values.is_empty() {
            properties.insert(name.to_string(), values);
        }
    }

    Ok(Entity { id, label, description, properties })
}

#[async_trait::async_trait]
impl SourceAdapter for WikidataAdapter {
    fn source(&self) -> Source {
        Source::Wikidata
    }

    async fn fetch(&self, query: &Query, _options: &SourceOptions) -> SourceResult {
        report(Source::Wikidata, query, self.lookup(query).await)
    }
}
