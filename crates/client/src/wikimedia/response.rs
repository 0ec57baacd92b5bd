//! Upstream response records.
//!
//! Only the fields this crate reads are modelled. Required fields are plain
//! types so a document missing them fails to parse instead of yielding
//! empty data. Action API records assume `formatversion=2`.

use std::collections::HashMap;

use serde::Deserialize;

/// REST `page/summary` document.
#[derive(Debug, Deserialize)]
pub struct PageSummary {
    #[serde(rename = "type", default)]
    pub page_type: String,
    pub title: String,
    pub extract: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
pub struct PageUrls {
    pub page: String,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

impl PageSummary {
    pub fn is_disambiguation(&self) -> bool {
        self.page_type == "disambiguation"
    }

    pub fn page_url(&self) -> Option<String> {
        self.content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .map(|desktop| desktop.page.clone())
    }
}

/// `action=query` envelope.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<Q> {
    pub query: Q,
}

/// `prop=extracts` result.
#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    #[serde(default)]
    pub pages: Vec<ExtractPage>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractPage {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub extract: Option<String>,
}

impl ExtractPage {
    /// Non-empty extract of an existing page.
    pub fn text(&self) -> Option<&str> {
        if self.missing || self.invalid {
            return None;
        }
        self.extract.as_deref().map(str::trim).filter(|text| !text.is_empty())
    }
}

/// `list=search` result.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// `prop=imageinfo` result.
#[derive(Debug, Deserialize)]
pub struct ImageInfoQuery {
    #[serde(default)]
    pub pages: Vec<ImagePage>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePage {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub thumburl: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub extmetadata: ExtMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtMetadata {
    #[serde(rename = "ImageDescription", default)]
    pub image_description: Option<MetadataValue>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataValue {
    pub value: serde_json::Value,
}

impl ImageInfo {
    /// Thumbnail if rendered, else the original file.
    pub fn best_url(&self) -> Option<&str> {
        self.thumburl
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Raw (HTML) description, if it is a string.
    pub fn description_html(&self) -> Option<&str> {
        self.extmetadata
            .image_description
            .as_ref()
            .and_then(|d| d.value.as_str())
    }
}

/// `wbsearchentities` result.
#[derive(Debug, Deserialize)]
pub struct EntitySearch {
    pub search: Vec<EntityHit>,
}

#[derive(Debug, Deserialize)]
pub struct EntityHit {
    pub id: String,
}

/// `wbgetentities` result.
#[derive(Debug, Deserialize)]
pub struct EntityDocument {
    pub entities: HashMap<String, RawEntity>,
}

#[derive(Debug, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
    #[serde(default)]
    pub labels: HashMap<String, LanguageValue>,
    #[serde(default)]
    pub descriptions: HashMap<String, LanguageValue>,
    #[serde(default)]
    pub claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct Claim {
    pub mainsnak: Snak,
}

#[derive(Debug, Deserialize)]
pub struct Snak {
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default)]
    pub datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
pub struct DataValue {
    pub value: serde_json::Value,
}

impl Snak {
    /// Referenced item id for `wikibase-item` snaks.
    pub fn item_id(&self) -> Option<&str> {
        if self.datatype.as_deref() != Some("wikibase-item") {
            return None;
        }
        self.datavalue.as_ref()?.value.get("id")?.as_str()
    }
}

impl RawEntity {
    pub fn is_missing(&self) -> bool {
        self.missing.is_some()
    }
}
