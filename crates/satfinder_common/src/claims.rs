//! Entity records and claim extraction
//!
//! Claims are kept as the raw JSON the entity store returns; values are read
//! lazily by property code. Missing or malformed nested fields read as absent.

use crate::types::{EntityId, Lang};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Launch date
pub const PROP_LAUNCH_DATE: &str = "P619";
/// COSPAR international designator
pub const PROP_COSPAR_ID: &str = "P247";
/// NORAD satellite catalog number
pub const PROP_NORAD_ID: &str = "P593";

/// Typed value of a single claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ClaimValue {
    /// Raw store time, e.g. "+1990-04-24T00:00:00Z"
    Time(String),
    Text(String),
}

impl ClaimValue {
    pub fn raw(&self) -> &str {
        match self {
            ClaimValue::Time(raw) | ClaimValue::Text(raw) => raw,
        }
    }

    /// Human-readable form. Times render as a calendar date.
    pub fn display(&self) -> String {
        match self {
            ClaimValue::Text(text) => text.clone(),
            ClaimValue::Time(raw) => display_time(raw),
        }
    }
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Store times carry a sign and may use 00 for unknown month/day
/// ("+1990-04-00T00:00:00Z"), which chrono rejects.
fn display_time(raw: &str) -> String {
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);

    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(unsigned) {
        return parsed.date_naive().format("%Y-%m-%d").to_string();
    }

    unsigned
        .split('T')
        .next()
        .unwrap_or(unsigned)
        .to_string()
}

/// Read the first value of `property` from a claims mapping.
///
/// Path: `claims[property][0].mainsnak.datavalue.value`, holding either a
/// string or a `{ "time": ... }` mapping.
pub fn claim_value(claims: &Map<String, Value>, property: &str) -> Option<ClaimValue> {
    let value = claims
        .get(property)?
        .as_array()?
        .first()?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?;

    match value {
        Value::String(text) if !text.is_empty() => Some(ClaimValue::Text(text.clone())),
        Value::Object(map) => map
            .get("time")
            .and_then(Value::as_str)
            .filter(|time| !time.is_empty())
            .map(|time| ClaimValue::Time(time.to_string())),
        _ => None,
    }
}

/// Full entity: claims plus cross-language site links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    pub id: Option<EntityId>,
    pub claims: Map<String, Value>,
    /// Site key ("enwiki") -> article title
    pub sitelinks: BTreeMap<String, String>,
}

impl EntityRecord {
    /// Build from one entity object of the store's JSON export
    pub fn from_json(entity: &Value) -> Option<Self> {
        let object = entity.as_object()?;
        if object.is_empty() {
            return None;
        }

        let id = object
            .get("id")
            .and_then(Value::as_str)
            .map(|id| EntityId(id.to_string()));

        let claims = object
            .get("claims")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let sitelinks = object
            .get("sitelinks")
            .and_then(Value::as_object)
            .map(|links| {
                links
                    .iter()
                    .filter_map(|(site, link)| {
                        let title = link.get("title")?.as_str()?;
                        Some((site.clone(), title.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { id, claims, sitelinks })
    }

    pub fn claim(&self, property: &str) -> Option<ClaimValue> {
        claim_value(&self.claims, property)
    }

    /// Canonical article title for `lang`, if the entity links one
    pub fn title_for(&self, lang: &Lang) -> Option<&str> {
        self.sitelinks
            .get(&lang.site_key())
            .map(String::as_str)
            .filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hubble() -> Value {
        json!({
            "id": "Q2513",
            "claims": {
                "P619": [{
                    "mainsnak": {
                        "datavalue": {
                            "value": { "time": "+1990-04-24T00:00:00Z", "precision": 11 },
                            "type": "time"
                        }
                    }
                }],
                "P247": [{
                    "mainsnak": { "datavalue": { "value": "1990-037B", "type": "string" } }
                }],
                "P593": [{
                    "mainsnak": { "snaktype": "somevalue" }
                }]
            },
            "sitelinks": {
                "enwiki": { "site": "enwiki", "title": "Hubble Space Telescope" },
                "kowiki": { "site": "kowiki", "title": "허블 우주 망원경" }
            }
        })
    }

    #[test]
    fn test_time_claim() {
        let entity = EntityRecord::from_json(&hubble()).unwrap();
        let launch = entity.claim(PROP_LAUNCH_DATE).unwrap();
        assert_eq!(launch, ClaimValue::Time("+1990-04-24T00:00:00Z".to_string()));
        assert_eq!(launch.display(), "1990-04-24");
    }

    #[test]
    fn test_string_claim() {
        let entity = EntityRecord::from_json(&hubble()).unwrap();
        assert_eq!(
            entity.claim(PROP_COSPAR_ID),
            Some(ClaimValue::Text("1990-037B".to_string()))
        );
    }

    #[test]
    fn test_missing_property_is_absent() {
        let entity = EntityRecord::from_json(&hubble()).unwrap();
        assert_eq!(entity.claim("P9999"), None);
        assert_eq!(claim_value(&Map::new(), PROP_LAUNCH_DATE), None);
    }

    #[test]
    fn test_missing_nested_fields_are_absent() {
        // P593 has a mainsnak without datavalue
        let entity = EntityRecord::from_json(&hubble()).unwrap();
        assert_eq!(entity.claim(PROP_NORAD_ID), None);

        let claims = json!({
            "P1": [],
            "P2": "not a list",
            "P3": [{}],
            "P4": [{ "mainsnak": { "datavalue": { "value": "" } } }],
            "P5": [{ "mainsnak": { "datavalue": { "value": { "amount": "+5" } } } }],
            "P6": [{ "mainsnak": { "datavalue": { "value": 42 } } }]
        });
        let claims = claims.as_object().unwrap();
        for prop in ["P1", "P2", "P3", "P4", "P5", "P6"] {
            assert_eq!(claim_value(claims, prop), None, "{} should be absent", prop);
        }
    }

    #[test]
    fn test_partial_precision_time() {
        let month_only = ClaimValue::Time("+1990-04-00T00:00:00Z".to_string());
        assert_eq!(month_only.display(), "1990-04-00");
    }

    #[test]
    fn test_sitelink_titles() {
        let entity = EntityRecord::from_json(&hubble()).unwrap();
        let ko = Lang::new("ko").unwrap();
        let fr = Lang::new("fr").unwrap();
        assert_eq!(entity.title_for(&ko), Some("허블 우주 망원경"));
        assert_eq!(entity.title_for(&fr), None);
        assert_eq!(entity.id, Some(EntityId("Q2513".to_string())));
    }

    #[test]
    fn test_empty_entity_is_absent() {
        assert!(EntityRecord::from_json(&json!({})).is_none());
        assert!(EntityRecord::from_json(&json!("Q1")).is_none());
    }
}
