//! Encyclopedia client - search, REST summary and page properties
//!
//! Search and page-properties go through the MediaWiki action API; summaries
//! come from the REST endpoint with the title appended to the path.

use super::{endpoint_for, send, soft, Encyclopedia, FetchError};
use crate::config::SatConfig;
use crate::memo::{MemoCache, MemoKey};
use crate::types::{EntityId, Lang, SummaryRecord};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct WikipediaClient {
    http: Client,
    api_template: String,
    summary_template: String,
    timeout: Duration,
    search_cache: MemoCache<Option<String>>,
    summary_cache: MemoCache<Option<SummaryRecord>>,
    pageprops_cache: MemoCache<Option<EntityId>>,
}

impl WikipediaClient {
    pub fn new(http: Client, config: &SatConfig) -> Self {
        let ttl = config.cache.ttl();
        let capacity = config.cache.capacity;

        Self {
            http,
            api_template: config.endpoints.wiki_api.clone(),
            summary_template: config.endpoints.wiki_summary.clone(),
            timeout: config.http.query_timeout(),
            search_cache: MemoCache::new(capacity, ttl),
            summary_cache: MemoCache::new(capacity, ttl),
            pageprops_cache: MemoCache::new(capacity, ttl),
        }
    }

    /// GET the action API and decode JSON; non-200 reads as no result
    fn query_api(&self, lang: &Lang, params: &[(&str, &str)]) -> Result<Option<Value>, FetchError> {
        let url = endpoint_for(&self.api_template, lang);
        let response = send(self.http.get(&url).query(params).timeout(self.timeout))?;

        if response.status() != StatusCode::OK {
            debug!("Action API {} returned HTTP {}", url, response.status());
            return Ok(None);
        }

        Ok(Some(response.json::<Value>()?))
    }

    fn fetch_search(&self, query: &str, lang: &Lang) -> Result<Option<String>, FetchError> {
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("format", "json"),
            ("srlimit", "1"),
            ("srprop", ""),
        ];
        Ok(self
            .query_api(lang, &params)?
            .and_then(|body| parse_search_title(&body)))
    }

    fn fetch_summary(&self, title: &str, lang: &Lang) -> Result<Option<SummaryRecord>, FetchError> {
        let url = format!(
            "{}{}",
            endpoint_for(&self.summary_template, lang),
            urlencoding::encode(title)
        );
        let response = send(self.http.get(&url).timeout(self.timeout))?;

        if response.status() != StatusCode::OK {
            debug!("Summary {} returned HTTP {}", url, response.status());
            return Ok(None);
        }

        let body = response.json::<Value>()?;
        Ok(parse_summary(&body))
    }

    fn fetch_pageprops(&self, title: &str, lang: &Lang) -> Result<Option<EntityId>, FetchError> {
        let params = [
            ("action", "query"),
            ("prop", "pageprops"),
            ("titles", title),
            ("format", "json"),
        ];
        Ok(self
            .query_api(lang, &params)?
            .and_then(|body| parse_wikibase_item(&body)))
    }
}

impl Encyclopedia for WikipediaClient {
    fn search_title(&self, query: &str, lang: &Lang) -> Option<String> {
        let key = MemoKey::new("wiki_search", [query, lang.as_str()]);
        let result = self
            .search_cache
            .get_or_try_fetch(key, || self.fetch_search(query, lang));
        soft("Wiki search", query, result)
    }

    fn summary(&self, title: &str, lang: &Lang) -> Option<SummaryRecord> {
        let key = MemoKey::new("wiki_summary", [title, lang.as_str()]);
        let result = self
            .summary_cache
            .get_or_try_fetch(key, || self.fetch_summary(title, lang));
        soft("Wiki summary", title, result)
    }

    fn entity_id(&self, title: &str, lang: &Lang) -> Option<EntityId> {
        let key = MemoKey::new("wiki_pageprops", [title, lang.as_str()]);
        let result = self
            .pageprops_cache
            .get_or_try_fetch(key, || self.fetch_pageprops(title, lang));
        soft("Page properties", title, result)
    }
}

/// `query.search[0].title`
pub fn parse_search_title(body: &Value) -> Option<String> {
    body.get("query")?
        .get("search")?
        .as_array()?
        .first()?
        .get("title")?
        .as_str()
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// First `query.pages.*.pageprops.wikibase_item`
pub fn parse_wikibase_item(body: &Value) -> Option<EntityId> {
    body.get("query")?
        .get("pages")?
        .as_object()?
        .values()
        .find_map(|page| {
            page.get("pageprops")?
                .get("wikibase_item")?
                .as_str()
                .filter(|id| !id.is_empty())
                .map(|id| EntityId(id.to_string()))
        })
}

/// Summary fields of a REST summary body; `None` when all are missing
pub fn parse_summary(body: &Value) -> Option<SummaryRecord> {
    let record: SummaryRecord = serde_json::from_value(body.clone()).ok()?;
    (!record.is_empty()).then_some(record)
}
