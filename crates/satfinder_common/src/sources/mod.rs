//! Data source adapters
//!
//! Three seams the reconciler depends on: the encyclopedia (search, summary,
//! page properties), the entity store, and the orbital catalog. HTTP
//! implementations fail soft: any transport, status or parse problem comes
//! back as `None`.

pub mod celestrak;
pub mod wikidata;
pub mod wikipedia;

pub use celestrak::CelestrakClient;
pub use wikidata::WikidataClient;
pub use wikipedia::WikipediaClient;

use crate::claims::EntityRecord;
use crate::config::{HttpConfig, SatConfig};
use crate::error::SatError;
use crate::types::{CatalogRecord, EntityId, Lang, SummaryRecord};
use reqwest::blocking::{Client, RequestBuilder, Response};
use tracing::warn;

/// Encyclopedia search, summary and page-properties lookups
pub trait Encyclopedia: Send + Sync {
    /// Top-ranked article title for `query`
    fn search_title(&self, query: &str, lang: &Lang) -> Option<String>;

    /// Short summary of the article `title`
    fn summary(&self, title: &str, lang: &Lang) -> Option<SummaryRecord>;

    /// Entity identifier linked to the article `title`
    fn entity_id(&self, title: &str, lang: &Lang) -> Option<EntityId>;
}

/// Structured-knowledge entity store
pub trait EntityStore: Send + Sync {
    fn entity(&self, id: &EntityId) -> Option<EntityRecord>;
}

/// Orbital-elements catalog
pub trait Catalog: Send + Sync {
    fn lookup(&self, name: &str) -> Option<CatalogRecord>;
}

/// Adapter-internal failure. Never crosses the trait boundary.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Build the shared blocking client with the identifying User-Agent
pub(crate) fn build_http_client(http: &HttpConfig) -> Result<Client, SatError> {
    Client::builder()
        .user_agent(http.user_agent.as_str())
        .build()
        .map_err(|e| SatError::Http(e.to_string()))
}

pub(crate) fn send(request: RequestBuilder) -> Result<Response, FetchError> {
    Ok(request.send()?)
}

/// Substitute `{lang}` in an endpoint template
pub(crate) fn endpoint_for(template: &str, lang: &Lang) -> String {
    template.replace("{lang}", lang.as_str())
}

/// Collapse a fetch result to the soft-failure contract
pub(crate) fn soft<V>(op: &str, subject: &str, result: Result<Option<V>, FetchError>) -> Option<V> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{} failed for '{}': {}", op, subject, e);
            None
        }
    }
}

/// HTTP-backed implementations of all three sources, built from one config
pub struct HttpSources {
    pub encyclopedia: WikipediaClient,
    pub entities: WikidataClient,
    pub catalog: CelestrakClient,
}

impl HttpSources {
    pub fn from_config(config: &SatConfig) -> Result<Self, SatError> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            encyclopedia: WikipediaClient::new(client.clone(), config),
            entities: WikidataClient::new(client.clone(), config),
            catalog: CelestrakClient::new(client, config),
        })
    }
}
