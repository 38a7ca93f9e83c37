//! SatFinder Configuration
//!
//! Config file: $SATFINDER_CONFIG, ~/.config/satfinder/config.toml or
//! /etc/satfinder/config.toml. Every field is optional.

use crate::types::LanguagePair;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP client settings shared by all adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Identifying User-Agent sent with every request
    pub user_agent: String,

    /// Timeout for search, summary and page-properties calls
    pub query_timeout_secs: u64,

    /// Timeout for entity and catalog calls
    pub fetch_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "SatFinder/1.1 (contact: student@example.com)".to_string(),
            query_timeout_secs: 15,
            fetch_timeout_secs: 20,
        }
    }
}

impl HttpConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Response memoization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    /// Entries kept per adapter operation
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            capacity: 512,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Service base URLs. `{lang}` is replaced with the language tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub wiki_api: String,
    pub wiki_summary: String,
    pub entity_data: String,
    pub catalog: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            wiki_api: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            wiki_summary: "https://{lang}.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            entity_data: "https://www.wikidata.org/wiki/Special:EntityData/".to_string(),
            catalog: "https://celestrak.org/NORAD/elements/gp.php".to_string(),
        }
    }
}

/// Lookup behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Query the catalog with the raw input before trying resolved titles
    pub exact_first: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { exact_first: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Main SatFinder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SatConfig {
    pub languages: LanguagePair,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub endpoints: EndpointConfig,
    pub lookup: LookupConfig,
    pub output: OutputConfig,
}

impl SatConfig {
    /// User config path: <config dir>/satfinder/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("satfinder").join("config.toml"))
    }

    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/satfinder/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. $SATFINDER_CONFIG (must exist)
    /// 3. User config
    /// 4. System config
    /// 5. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var("SATFINDER_CONFIG") {
            return Self::load_from_path(Path::new(&path));
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from_path(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from_path(&system_path);
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
