//! Normalized per-source records.
//!
//! Every adapter maps its upstream JSON into one of these shapes; raw
//! upstream documents never leave the client crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized payload of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Encyclopedia page summary (Wikipedia).
    Summary(Summary),
    /// Plain-text page extract (Wiktionary, Wikiquote, Wikibooks, Wikiversity, Wikispecies).
    Extract(Extract),
    /// Media files (Commons).
    Images(Vec<ImageDescriptor>),
    /// Search hits over source texts (Wikisource).
    Texts(Vec<TextSnippet>),
    /// Structured item data (Wikidata).
    Entity(Entity),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub extract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extract {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// File name without the `File:` namespace prefix.
    pub title: String,
    /// Thumbnail URL, or the original file URL when no thumbnail exists.
    pub url: String,
    /// Plain-text description (HTML stripped), possibly empty.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSnippet {
    pub title: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Item id, e.g. `Q12345`.
    pub id: String,
    pub label: String,
    pub description: String,
    /// Health-related property name -> referenced item ids.
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
}

impl Payload {
    /// Short name of the payload shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Summary(_) => "summary",
            Payload::Extract(_) => "extract",
            Payload::Images(_) => "images",
            Payload::Texts(_) => "texts",
            Payload::Entity(_) => "entity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization_shape() {
        let payload = Payload::Images(vec![ImageDescriptor {
            title: "Meditation.jpg".into(),
            url: "https://upload.wikimedia.org/meditation.jpg".into(),
            description: "A person meditating".into(),
        }]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "images");
        assert_eq!(json["data"][0]["title"], "Meditation.jpg");
        assert_eq!(payload.kind(), "images");
    }

    #[test]
    fn test_summary_skips_absent_fields() {
        let payload = Payload::Summary(Summary {
            title: "Yoga".into(),
            extract: "Yoga is a group of practices.".into(),
            description: None,
            page_url: None,
            thumbnail_url: None,
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["data"].get("description").is_none());
        assert_eq!(json["data"]["extract"], "Yoga is a group of practices.");
    }
}
