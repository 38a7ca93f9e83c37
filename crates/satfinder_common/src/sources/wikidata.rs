//! Entity store client - fetches `Special:EntityData/{id}.json`

use super::{send, soft, EntityStore, FetchError};
use crate::claims::EntityRecord;
use crate::config::SatConfig;
use crate::memo::{MemoCache, MemoKey};
use crate::types::EntityId;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct WikidataClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    cache: MemoCache<Option<EntityRecord>>,
}

impl WikidataClient {
    pub fn new(http: Client, config: &SatConfig) -> Self {
        Self {
            http,
            base_url: config.endpoints.entity_data.clone(),
            timeout: config.http.fetch_timeout(),
            cache: MemoCache::new(config.cache.capacity, config.cache.ttl()),
        }
    }

    fn fetch_entity(&self, id: &EntityId) -> Result<Option<EntityRecord>, FetchError> {
        let url = format!("{}{}.json", self.base_url, urlencoding::encode(id.as_str()));
        let response = send(self.http.get(&url).timeout(self.timeout))?;

        if response.status() != StatusCode::OK {
            debug!("Entity data {} returned HTTP {}", url, response.status());
            return Ok(None);
        }

        let body = response.json::<Value>()?;
        Ok(parse_entity_response(&body, id))
    }
}

impl EntityStore for WikidataClient {
    fn entity(&self, id: &EntityId) -> Option<EntityRecord> {
        let key = MemoKey::new("entity_data", [id.as_str()]);
        let result = self.cache.get_or_try_fetch(key, || self.fetch_entity(id));
        soft("Entity fetch", id.as_str(), result)
    }
}

/// Pick `entities.{id}` out of an export body.
///
/// A merged identifier is served under its target's key; when the map holds
/// exactly one entity under another key, that entity is the answer.
pub fn parse_entity_response(body: &Value, id: &EntityId) -> Option<EntityRecord> {
    let entities = body.get("entities")?.as_object()?;

    let entity = match entities.get(id.as_str()) {
        Some(entity) => entity,
        None if entities.len() == 1 => {
            let (target, entity) = entities.iter().next()?;
            debug!("Entity {} redirects to {}", id, target);
            entity
        }
        None => return None,
    };

    EntityRecord::from_json(entity)
}
