// src/models/page.rs - Pure data structures
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::utils::id_generator;

/// A stored unit of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Free-form title, the only thing a page holds
    pub title: String,
}

impl Page {
    #[cfg(test)]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Short opaque key a page is stored under
///
/// Only the generator mints new ids; parsing exists so request paths can be
/// turned back into keys for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Mints a fresh random id
    pub fn generate() -> Self {
        Self(id_generator::generate_short_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if id_generator::is_valid_short_id(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("'{}' is not a page id", s))
        }
    }
}

// DTO returned when a page is created
#[derive(Debug, Serialize)]
pub struct CreatedPageDto {
    pub id: String,
}

impl From<&PageId> for CreatedPageDto {
    fn from(id: &PageId) -> Self {
        CreatedPageDto {
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_json_shape() {
        let page = Page::new("Hello");
        assert_eq!(serde_json::to_string(&page).unwrap(), r#"{"title":"Hello"}"#);

        let decoded: Page = serde_json::from_str(r#"{"title": "Hello"}"#).unwrap();
        assert_eq!(decoded, page);
    }

    #[test]
    fn test_page_requires_title() {
        assert!(serde_json::from_str::<Page>("{}").is_err());
        assert!(serde_json::from_str::<Page>(r#"{"title": 7}"#).is_err());
        assert!(serde_json::from_str::<Page>("").is_err());
    }

    #[test]
    fn test_page_ignores_unknown_fields() {
        let decoded: Page = serde_json::from_str(r#"{"title": "a", "body": "b"}"#).unwrap();
        assert_eq!(decoded, Page::new("a"));
    }

    #[test]
    fn test_generated_page_id_parses_back() {
        let id = PageId::generate();
        assert_eq!(id.as_str().parse::<PageId>(), Ok(id.clone()));
    }

    #[test]
    fn test_page_id_rejects_malformed_tokens() {
        assert!("zzzzz".parse::<PageId>().is_ok());
        assert!("".parse::<PageId>().is_err());
        assert!("hello".parse::<PageId>().is_err()); // 'e' and 'o' are excluded
        assert!("zzzzzz".parse::<PageId>().is_err());
    }

    #[test]
    fn test_created_page_dto() {
        let id: PageId = "bcd12".parse().unwrap();
        let dto = CreatedPageDto::from(&id);
        assert_eq!(serde_json::to_string(&dto).unwrap(), r#"{"id":"bcd12"}"#);
    }
}
