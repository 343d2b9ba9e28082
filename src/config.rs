use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::query::intraday::DEFAULT_MOVERS_SORT;
use crate::query::scanner::DEFAULT_SCAN_SORT;
use crate::query::DEFAULT_PAGE_LIMIT;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub intraday: IntradayConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub page_limit: u32,
    pub default_sort: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            default_sort: DEFAULT_SCAN_SORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntradayConfig {
    pub page_limit: u32,
    pub default_sort: String,
}

impl Default for IntradayConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            default_sort: DEFAULT_MOVERS_SORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchlistConfig {
    pub local_path: PathBuf,
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            local_path: PathBuf::from("data/watchlist.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load `config/default.toml` (or `GAP_DESK_CONFIG`), then apply `.env` and
    /// environment overrides. A missing file yields the built-in defaults.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("GAP_DESK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("GAP_DESK_API_URL") {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }
        if let Ok(path) = std::env::var("GAP_DESK_LOCAL_WATCHLIST") {
            if !path.trim().is_empty() {
                config.watchlist.local_path = PathBuf::from(path.trim());
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("invalid config toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url '{}' is not a valid URL", self.api.base_url))?;
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be > 0");
        }
        if self.scanner.page_limit == 0 {
            bail!("scanner.page_limit must be > 0");
        }
        if self.intraday.page_limit == 0 {
            bail!("intraday.page_limit must be > 0");
        }
        if self.scanner.default_sort.trim().is_empty()
            || self.intraday.default_sort.trim().is_empty()
        {
            bail!("default_sort must not be empty");
        }
        Ok(())
    }
}
