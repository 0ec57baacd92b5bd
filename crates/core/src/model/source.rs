//! Registered Wikimedia sources.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// One external Wikimedia project queried for a term.
///
/// Variant order is the registration order: aggregation runs sources in
/// this order and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Wikipedia,
    Wiktionary,
    Wikiquote,
    Wikibooks,
    Commons,
    Wikisource,
    Wikiversity,
    Wikispecies,
    Wikidata,
}

impl Source {
    /// Every registered source, in registration order.
    pub const ALL: [Source; 9] = [
        Source::Wikipedia,
        Source::Wiktionary,
        Source::Wikiquote,
        Source::Wikibooks,
        Source::Commons,
        Source::Wikisource,
        Source::Wikiversity,
        Source::Wikispecies,
        Source::Wikidata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Wikipedia => "wikipedia",
            Source::Wiktionary => "wiktionary",
            Source::Wikiquote => "wikiquote",
            Source::Wikibooks => "wikibooks",
            Source::Commons => "commons",
            Source::Wikisource => "wikisource",
            Source::Wikiversity => "wikiversity",
            Source::Wikispecies => "wikispecies",
            Source::Wikidata => "wikidata",
        }
    }

    /// Default host for this source.
    ///
    /// Language-edition projects are resolved against `language`; Commons,
    /// Wikispecies and Wikidata are single multilingual sites.
    pub fn default_base_url(&self, language: &str) -> String {
        match self {
            Source::Commons => "https://commons.wikimedia.org".to_string(),
            Source::Wikispecies => "https://species.wikimedia.org".to_string(),
            Source::Wikidata => "https://www.wikidata.org".to_string(),
            other => format!("https://{}.{}.org", language, other.as_str()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Source::ALL
            .into_iter()
            .find(|source| source.as_str() == name)
            .ok_or_else(|| Error::UnknownSource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        assert_eq!(Source::ALL.len(), 9);
        assert_eq!(Source::ALL[0], Source::Wikipedia);
        assert_eq!(Source::ALL[8], Source::Wikidata);
        let mut sorted = Source::ALL;
        sorted.sort();
        assert_eq!(sorted, Source::ALL);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("commons".parse::<Source>().unwrap(), Source::Commons);
        assert_eq!(" WikiData ".parse::<Source>().unwrap(), Source::Wikidata);
        assert!(matches!("wikinews".parse::<Source>(), Err(Error::UnknownSource(_))));
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for source in Source::ALL {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(Source::Wikipedia.default_base_url("en"), "https://en.wikipedia.org");
        assert_eq!(Source::Wiktionary.default_base_url("de"), "https://de.wiktionary.org");
        assert_eq!(Source::Commons.default_base_url("de"), "https://commons.wikimedia.org");
        assert_eq!(Source::Wikispecies.default_base_url("en"), "https://species.wikimedia.org");
        assert_eq!(Source::Wikidata.default_base_url("fr"), "https://www.wikidata.org");
    }
}
