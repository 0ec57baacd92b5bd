//! User search term.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Maximum query length in characters.
pub const MAX_QUERY_CHARS: usize = 300;

/// A validated, trimmed search term.
///
/// Only surrounding whitespace is removed. Case and inner spacing are kept,
/// so "Vitamin D" and "vitamin d" are different queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(String);

impl Query {
    /// Trim and validate a raw search term.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, Error> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        let chars = trimmed.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(Error::InvalidInput(format!("query too long: {} chars (max {})", chars, MAX_QUERY_CHARS)));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Page-title form used by title-addressed endpoints (spaces become underscores).
    pub fn as_title(&self) -> String {
        self.0.replace(' ', "_")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Query {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Query::new(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let query = Query::new("  meditation \n").unwrap();
        assert_eq!(query.as_str(), "meditation");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Query::new(""), Err(Error::InvalidInput(_))));
        assert!(matches!(Query::new("   \t"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(Query::new("a".repeat(MAX_QUERY_CHARS)).is_ok());
        assert!(Query::new("a".repeat(MAX_QUERY_CHARS + 1)).is_err());
    }

    #[test]
    fn test_preserves_case() {
        let upper = Query::new("Vitamin D").unwrap();
        let lower = Query::new("vitamin d").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_title_form() {
        let query = Query::new("Vitamin D deficiency").unwrap();
        assert_eq!(query.as_title(), "Vitamin_D_deficiency");
        assert_eq!(query.as_str(), "Vitamin D deficiency");
    }

    #[test]
    fn test_deserialize_validates() {
        let query: Query = serde_json::from_str("\" yoga \"").unwrap();
        assert_eq!(query.as_str(), "yoga");
        assert!(serde_json::from_str::<Query>("\"  \"").is_err());
    }
}
