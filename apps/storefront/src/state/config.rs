//! # Storefront Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`storefront.toml`, or the path given with `--config`)
//! 3. Defaults (this file)
//!
//! ## Example File
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 10
//! cache_ttl_secs = 60
//!
//! [storage]
//! database_path = "/var/lib/storefront/storefront.db"
//!
//! [summary]
//! tax_rate_bps = 900
//! free_shipping_threshold_cents = 5000
//! shipping_fee_cents = 199
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use storefront_catalog::{DEFAULT_CACHE_TTL, DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT};
use storefront_core::summary::{
    DEFAULT_TAX_RATE, FREE_SHIPPING_THRESHOLD_CENTS, SHIPPING_FEE_CENTS,
};
use storefront_core::{Money, SummaryPolicy, TaxRate};

/// File name of the config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// File name of the SQLite database inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "storefront.db";

pub const ENV_CATALOG_URL: &str = "STOREFRONT_CATALOG_URL";
pub const ENV_DB_PATH: &str = "STOREFRONT_DB_PATH";
/// Tax rate as a percentage, e.g. `9` or `8.25`.
pub const ENV_TAX_RATE: &str = "STOREFRONT_TAX_RATE";
pub const ENV_CACHE_TTL_SECS: &str = "STOREFRONT_CACHE_TTL_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No home directory to derive default paths from.
    #[error("Could not determine the {0} directory")]
    NoProjectDir(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the catalog API (http or https).
    pub base_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// How long catalog answers are reused.
    pub cache_ttl_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file. Unset means the platform data directory.
    pub database_path: Option<PathBuf>,
}

/// `[summary]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Sales tax in basis points (900 = 9%).
    pub tax_rate_bps: u32,

    /// Subtotal at which shipping becomes free.
    pub free_shipping_threshold_cents: i64,

    /// Shipping fee under the threshold.
    pub shipping_fee_cents: i64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        SummarySettings {
            tax_rate_bps: DEFAULT_TAX_RATE.bps(),
            free_shipping_threshold_cents: FREE_SHIPPING_THRESHOLD_CENTS,
            shipping_fee_cents: SHIPPING_FEE_CENTS,
        }
    }
}

// =============================================================================
// StorefrontConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub summary: SummarySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() || explicit {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.catalog.base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "catalog.base_url '{}' is not a URL: {}",
                self.catalog.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "catalog.base_url must start with http:// or https://, got: {}",
                self.catalog.base_url
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.summary.free_shipping_threshold_cents < 0 || self.summary.shipping_fee_cents < 0 {
            return Err(ConfigError::Invalid(
                "summary amounts must not be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    ///
    /// Values that don't parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CATALOG_URL) {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(rate) = lookup(ENV_TAX_RATE) {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    self.summary.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(value = %rate, "Ignoring invalid {}", ENV_TAX_RATE),
            }
        }

        if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS) {
            match ttl.trim().parse::<u64>() {
                Ok(secs) => self.catalog.cache_ttl_secs = secs,
                Err(_) => warn!(value = %ttl, "Ignoring invalid {}", ENV_CACHE_TTL_SECS),
            }
        }

        if let Some(timeout) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid {}", ENV_HTTP_TIMEOUT_SECS),
            }
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "storefront", "storefront")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Where the SQLite file lives.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
    /// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
    /// - **Linux**: `~/.local/share/storefront/storefront.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or(ConfigError::NoProjectDir("data"))
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog.cache_ttl_secs)
    }

    /// Checkout rates for [`storefront_core::OrderSummary`].
    pub fn summary_policy(&self) -> SummaryPolicy {
        SummaryPolicy {
            tax_rate: TaxRate::from_bps(self.summary.tax_rate_bps),
            free_shipping_threshold: Money::from_cents(self.summary.free_shipping_threshold_cents),
            shipping_fee: Money::from_cents(self.summary.shipping_fee_cents),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog.base_url, "https://fakestoreapi.com");
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.summary_policy(), SummaryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "http://localhost:3000"

            [summary]
            tax_rate_bps = 825
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.base_url, "http://localhost:3000");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.summary.tax_rate_bps, 825);
        assert_eq!(config.summary.shipping_fee_cents, 199);
        assert_eq!(config.storage.database_path, None);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CATALOG_URL, "http://127.0.0.1:9000"),
            (ENV_DB_PATH, "/tmp/cart.db"),
            (ENV_TAX_RATE, "8.25"),
            (ENV_CACHE_TTL_SECS, "0"),
            (ENV_HTTP_TIMEOUT_SECS, "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.base_url, "http://127.0.0.1:9000");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/cart.db")
        );
        assert_eq!(config.summary.tax_rate_bps, 825);
        assert_eq!(config.catalog.cache_ttl_secs, 0);
        // unparsable value leaves the default
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();
        config.catalog.base_url = "ftp://catalog".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StorefrontConfig::default();
        config.catalog.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.summary.shipping_fee_cents = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = StorefrontConfig::default();
        config.summary.tax_rate_bps = 700;
        config.storage.database_path = Some(dir.path().join("cart.db"));
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StorefrontConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
