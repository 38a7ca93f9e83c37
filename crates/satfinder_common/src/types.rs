//! Core data model: languages, titles, summaries, catalog records and the merged result

use crate::claims::ClaimValue;
use crate::error::SatError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encyclopedia language tag ("ko", "en", "zh-min-nan")
///
/// Substituted into endpoint host names, so only `[a-z0-9-]` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lang(String);

impl Lang {
    pub fn new(tag: impl Into<String>) -> Result<Self, SatError> {
        let tag = tag.into();
        let valid = !tag.is_empty()
            && !tag.starts_with('-')
            && !tag.ends_with('-')
            && tag
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(Self(tag))
        } else {
            Err(SatError::InvalidLanguage(tag))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Site-link key in the entity store ("kowiki", "zh_min_nanwiki")
    pub fn site_key(&self) -> String {
        format!("{}wiki", self.0.replace('-', "_"))
    }
}

impl TryFrom<String> for Lang {
    type Error = SatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Lang::new(value)
    }
}

impl From<Lang> for String {
    fn from(lang: Lang) -> Self {
        lang.0
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two languages a lookup reconciles.
///
/// `local` is preferred for human-readable summaries; `international` is
/// preferred for catalog names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePair {
    pub local: Lang,
    pub international: Lang,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            local: Lang("ko".to_string()),
            international: Lang("en".to_string()),
        }
    }
}

/// Entity store identifier (e.g. "Q2513")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short article summary from the encyclopedia REST endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl SummaryRecord {
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.title) && blank(&self.description) && blank(&self.extract)
    }
}

/// Three-line orbital element set (name line + two element lines)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl CatalogRecord {
    /// Build from the first three non-blank lines of `text`.
    ///
    /// Returns `None` when fewer than three non-blank lines are present.
    pub fn from_text(text: &str) -> Option<Self> {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.trim().is_empty());

        let name = lines.next()?.trim().to_string();
        let line1 = lines.next()?.to_string();
        let line2 = lines.next()?.to_string();

        Some(Self { name, line1, line2 })
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.name, &self.line1, &self.line2]
    }
}

/// Which article produced the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub lang: Lang,
    pub title: String,
}

/// Merged fact sheet for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub query: String,
    pub summary: SummaryRecord,
    pub summary_source: SourceRef,
    pub entity_id: Option<EntityId>,
    pub launch_date: Option<ClaimValue>,
    pub cospar_id: Option<ClaimValue>,
    pub norad_id: Option<ClaimValue>,
    pub catalog: Option<CatalogRecord>,
    /// Catalog candidate string that matched
    pub catalog_match: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_validation() {
        assert!(Lang::new("ko").is_ok());
        assert!(Lang::new("zh-min-nan").is_ok());
        assert!(Lang::new("").is_err());
        assert!(Lang::new("EN").is_err());
        assert!(Lang::new("en.evil.com/").is_err());
        assert!(Lang::new("-en").is_err());
    }

    #[test]
    fn test_site_key() {
        assert_eq!(Lang::new("ko").unwrap().site_key(), "kowiki");
        assert_eq!(Lang::new("zh-min-nan").unwrap().site_key(), "zh_min_nanwiki");
    }

    #[test]
    fn test_lang_deserialize_rejects_invalid() {
        let ok: Result<Lang, _> = serde_json::from_str("\"en\"");
        assert!(ok.is_ok());
        let bad: Result<Lang, _> = serde_json::from_str("\"e n\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_summary_is_empty() {
        assert!(SummaryRecord::default().is_empty());
        let blank = SummaryRecord {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_empty());
        let titled = SummaryRecord {
            title: Some("Hubble Space Telescope".to_string()),
            ..Default::default()
        };
        assert!(!titled.is_empty());
    }

    #[test]
    fn test_catalog_record_skips_blank_lines() {
        let text = "\nHST                     \r\n\n1 20580U 90037B   24100.50000000  .00001234  00000-0  56789-4 0  9991\n2 20580  28.4690 123.4567 0002500 100.0000 260.0000 15.10000000123456\n";
        let record = CatalogRecord::from_text(text).unwrap();
        assert_eq!(record.name, "HST");
        assert!(record.line1.starts_with("1 20580U"));
        assert!(record.line2.starts_with("2 20580"));
    }

    #[test]
    fn test_catalog_record_requires_three_lines() {
        assert!(CatalogRecord::from_text("").is_none());
        assert!(CatalogRecord::from_text("HST\n1 20580U 90037B").is_none());
    }

    #[test]
    fn test_catalog_record_keeps_first_three_only() {
        let text = "A\n1 a\n2 a\nB\n1 b\n2 b\n";
        let record = CatalogRecord::from_text(text).unwrap();
        assert_eq!(record.lines(), ["A", "1 a", "2 a"]);
    }
}
