//! Layered configuration loading for quotewall.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUOTEWALL_*` prefix, `__` as separator)
//! 2. `quotewall.toml` in the working directory
//! 3. User-level `config.toml` in the platform config directory
//! 4. Built-in defaults
//!
//! Figment maps `QUOTEWALL_HISTORY__CAPACITY` to `history.capacity`,
//! `QUOTEWALL_ENDPOINT__URL` to `endpoint.url`, and so on.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use tracing::instrument;

const ENV_PREFIX: &str = "QUOTEWALL_";
const LOCAL_CONFIG_FILE: &str = "quotewall.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// The remote scraping endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    /// Request timeout, also forwarded as the remote navigation timeout.
    pub timeout_ms: u64,
    pub wait_until: String,
    pub viewport: Viewport,
}
impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "https://api.devnova.icu/api/tools/puppeteer".to_string(),
            timeout_ms: 30_000,
            wait_until: "networkidle2".to_string(),
            viewport: Viewport::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}
impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// The site quotes are scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub first_page: u32,
    pub last_page: u32,
    /// Page selector used at startup: `"random"` or a page number.
    pub page: String,
    /// How long the remote renderer waits before extracting.
    pub wait_time_ms: u64,
}
impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com".to_string(),
            first_page: 1,
            last_page: 10,
            page: "1".to_string(),
            wait_time_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub freshness_hours: u64,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self { freshness_hours: 24 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    /// Move a repeated quote to the front instead of keeping both entries.
    pub dedup_on_repeat: bool,
}
impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 15,
            dedup_on_repeat: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted state; the platform data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub read_only: bool,
}

impl Config {
    /// Load and validate configuration from every source.
    #[instrument]
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extract and validate configuration from a prepared [`Figment`].
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().map_err(|e| exn::Exn::from(ErrorKind::Load(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain. Public so callers can merge extra providers
    /// on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = Self::user_config_path()
            && path.exists()
        {
            tracing::debug!(path = %path.display(), "Merging user configuration file");
            figment = figment.merge(Toml::file(path));
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            tracing::debug!(path = %local.display(), "Merging local configuration file");
            figment = figment.merge(Toml::file(local));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values the widget cannot run with.
    ///
    /// `source.page` is parsed and range-checked where it is turned into a
    /// page selector, not here.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| exn::Exn::from(ErrorKind::Invalid { field, reason });
        if self.endpoint.url.trim().is_empty() {
            return Err(invalid("endpoint.url", "must not be empty"));
        }
        if self.source.base_url.trim().is_empty() {
            return Err(invalid("source.base_url", "must not be empty"));
        }
        if self.source.first_page == 0 {
            return Err(invalid("source.first_page", "pages start at 1"));
        }
        if self.source.first_page > self.source.last_page {
            return Err(invalid("source.last_page", "must not be before source.first_page"));
        }
        if self.endpoint.timeout_ms == 0 {
            return Err(invalid("endpoint.timeout_ms", "must be at least one millisecond"));
        }
        if self.cache.freshness_hours == 0 {
            return Err(invalid("cache.freshness_hours", "must be at least one hour"));
        }
        if self.history.capacity == 0 {
            return Err(invalid("history.capacity", "must hold at least one entry"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.endpoint.timeout_ms)
    }

    pub fn wait_time(&self) -> Duration {
        Duration::from_millis(self.source.wait_time_ms)
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.cache.freshness_hours.saturating_mul(60 * 60))
    }

    pub fn page_range(&self) -> RangeInclusive<u32> {
        self.source.first_page..=self.source.last_page
    }

    /// Directory persisted state lives in: the configured one, otherwise the
    /// platform data directory (if the platform has one).
    pub fn storage_directory(&self) -> Option<PathBuf> {
        self.storage
            .directory
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    fn user_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("icu", "DevNova", "quotewall")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.endpoint.url, "https://api.devnova.icu/api/tools/puppeteer");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.wait_time(), Duration::from_secs(1));
        assert_eq!(config.freshness(), Duration::from_secs(24 * 3600));
        assert_eq!(config.page_range(), 1..=10);
        assert_eq!(config.history.capacity, 15);
        assert!(config.history.dedup_on_repeat);
        assert!(!config.storage.read_only);
    }

    #[test]
    fn test_loads_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[cache]
freshness_hours = 6

[history]
capacity = 10
dedup_on_repeat = false

[source]
page = "random"
"#,
            )?;
            let config = Config::from_figment(defaults().merge(Toml::file(LOCAL_CONFIG_FILE))).unwrap();
            assert_eq!(config.freshness(), Duration::from_secs(6 * 3600));
            assert_eq!(config.history.capacity, 10);
            assert!(!config.history.dedup_on_repeat);
            assert_eq!(config.source.page, "random");
            // Untouched sections keep their defaults.
            assert_eq!(config.source.base_url, "https://quotes.toscrape.com");
            assert_eq!(config.endpoint.viewport, Viewport { width: 1920, height: 1080 });
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_FILE, "[history]\ncapacity = 10\n")?;
            jail.set_env("QUOTEWALL_HISTORY__CAPACITY", "12");
            jail.set_env("QUOTEWALL_STORAGE__READ_ONLY", "true");
            jail.set_env("QUOTEWALL_STORAGE__DIRECTORY", "/var/lib/quotewall");
            let config = Config::load().unwrap();
            assert_eq!(config.history.capacity, 12);
            assert!(config.storage.read_only);
            assert_eq!(config.storage_directory(), Some(PathBuf::from("/var/lib/quotewall")));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_value_is_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("QUOTEWALL_HISTORY__CAPACITY", "lots");
            let err = Config::load().unwrap_err();
            assert!(matches!(&*err, ErrorKind::Load(_)));
            Ok(())
        });
    }

    #[rstest]
    #[case::no_history(|c: &mut Config| c.history.capacity = 0, "history.capacity")]
    #[case::no_freshness(|c: &mut Config| c.cache.freshness_hours = 0, "cache.freshness_hours")]
    #[case::page_zero(|c: &mut Config| c.source.first_page = 0, "source.first_page")]
    #[case::backwards_range(|c: &mut Config| c.source.first_page = 11, "source.last_page")]
    #[case::no_timeout(|c: &mut Config| c.endpoint.timeout_ms = 0, "endpoint.timeout_ms")]
    #[case::blank_endpoint(|c: &mut Config| c.endpoint.url = " ".to_string(), "endpoint.url")]
    #[case::blank_source(|c: &mut Config| c.source.base_url = String::new(), "source.base_url")]
    fn test_invalid_values_rejected(#[case] change: fn(&mut Config), #[case] expected: &str) {
        let mut config = Config::default();
        change(&mut config);
        let err = config.validate().unwrap_err();
        match &*err {
            ErrorKind::Invalid { field, .. } => assert_eq!(*field, expected),
            other => panic!("expected an invalid value error, got {other}"),
        }
    }

    #[test]
    fn test_huge_freshness_saturates() {
        let mut config = Config::default();
        config.cache.freshness_hours = u64::MAX;
        config.validate().unwrap();
        assert_eq!(config.freshness(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validation_runs_on_load() {
        Jail::expect_with(|jail| {
            jail.set_env("QUOTEWALL_HISTORY__CAPACITY", "0");
            let err = Config::load().unwrap_err();
            assert!(matches!(&*err, ErrorKind::Invalid { field: "history.capacity", .. }));
            Ok(())
        });
    }
}
