//! Orbital catalog client - TLE lookup by name or catalog number

use super::{send, soft, Catalog, FetchError};
use crate::config::SatConfig;
use crate::memo::{MemoCache, MemoKey};
use crate::types::CatalogRecord;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Marker the catalog returns instead of element sets
const NO_DATA_MARKER: &str = "No GP data";

pub struct CelestrakClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    cache: MemoCache<Option<CatalogRecord>>,
}

impl CelestrakClient {
    pub fn new(http: Client, config: &SatConfig) -> Self {
        Self {
            http,
            base_url: config.endpoints.catalog.clone(),
            timeout: config.http.fetch_timeout(),
            cache: MemoCache::new(config.cache.capacity, config.cache.ttl()),
        }
    }

    fn fetch_tle(&self, name: &str) -> Result<Option<CatalogRecord>, FetchError> {
        let (selector, value) = catalog_selector(name);
        let params = [(selector, value), ("FORMAT", "TLE")];
        let response = send(
            self.http
                .get(&self.base_url)
                .query(&params)
                .timeout(self.timeout),
        )?;

        let status = response.status();
        let text = response.text()?;
        Ok(parse_catalog_response(status, &text))
    }
}

impl Catalog for CelestrakClient {
    fn lookup(&self, name: &str) -> Option<CatalogRecord> {
        let key = MemoKey::new("catalog_tle", [name]);
        let result = self.cache.get_or_try_fetch(key, || self.fetch_tle(name));
        soft("Catalog lookup", name, result)
    }
}

/// Query parameter for `name`: all-digit input is a catalog number
pub fn catalog_selector(name: &str) -> (&'static str, &str) {
    let trimmed = name.trim();
    if !trimmed.is_empty() && trimmed.len() <= 9 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        ("CATNR", trimmed)
    } else {
        ("NAME", name)
    }
}

/// First three non-blank lines, unless the status or body signals no data
pub fn parse_catalog_response(status: StatusCode, text: &str) -> Option<CatalogRecord> {
    if status != StatusCode::OK {
        debug!("Catalog returned HTTP {}", status);
        return None;
    }
    if text.contains(NO_DATA_MARKER) {
        return None;
    }
    CatalogRecord::from_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HST_TLE: &str = "HST                     \r\n\
1 20580U 90037B   24100.50000000  .00001234  00000-0  56789-4 0  9991\r\n\
2 20580  28.4690 123.4567 0002500 100.0000 260.0000 15.10000000123456\r\n";

    #[test]
    fn test_catalog_selector() {
        assert_eq!(catalog_selector("20580"), ("CATNR", "20580"));
        assert_eq!(catalog_selector(" 25544 "), ("CATNR", "25544"));
        assert_eq!(catalog_selector("NOAA 19"), ("NAME", "NOAA 19"));
        assert_eq!(catalog_selector("Sentinel-2A"), ("NAME", "Sentinel-2A"));
        assert_eq!(catalog_selector("1234567890"), ("NAME", "1234567890"));
    }

    #[test]
    fn test_parse_catalog_response() {
        let record = parse_catalog_response(StatusCode::OK, HST_TLE).unwrap();
        assert_eq!(record.name, "HST");
        assert!(record.line1.starts_with("1 20580U"));
        assert!(record.line2.starts_with("2 20580"));
    }

    #[test]
    fn test_parse_catalog_no_data() {
        assert!(parse_catalog_response(StatusCode::OK, "No GP data found").is_none());
        assert!(parse_catalog_response(StatusCode::OK, "   \n\n").is_none());
        assert!(parse_catalog_response(StatusCode::NOT_FOUND, HST_TLE).is_none());
    }
}
