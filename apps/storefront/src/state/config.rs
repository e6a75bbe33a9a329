//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_PROJECT_ID=abc123                                       │
//! │     STOREFRONT_CATALOG_FILE=./products.json                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     production dataset, CDN on, "Rs." currency                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [content]
//! project_id = "abc123"
//! dataset = "production"
//! api_version = "2024-01-01"
//! use_cdn = true
//! timeout_secs = 10
//! # catalog_file = "./products.json"   # offline catalog instead of the CMS
//!
//! [storage]
//! # data_dir = "/var/lib/storefront"
//!
//! [display]
//! currency_symbol = "Rs."
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after the session starts, so no lock.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storefront_content::{
    ContentConfig, ContentProvider, FixtureProvider, ImageUrlBuilder, SanityClient,
};
use storefront_core::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No content source configured: set content.project_id or content.catalog_file")]
    NoContentSource,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where products come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// CMS project id.
    pub project_id: Option<String>,

    /// CMS dataset.
    pub dataset: String,

    /// Dated CMS API version.
    pub api_version: String,

    /// Query the CDN edge instead of the live API.
    pub use_cdn: bool,

    /// Read token for private datasets.
    pub token: Option<String>,

    /// Request timeout (seconds).
    pub timeout_secs: u64,

    /// JSON file of product records. Takes precedence over the CMS.
    pub catalog_file: Option<PathBuf>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        ContentSettings {
            project_id: None,
            dataset: storefront_content::config::DEFAULT_DATASET.to_string(),
            api_version: storefront_content::config::DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            token: None,
            timeout_secs: storefront_content::config::DEFAULT_TIMEOUT.as_secs(),
            catalog_file: None,
        }
    }
}

/// Where the cart is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data directory. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
}

/// How values are shown to the shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Prefix for rendered prices.
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: "Rs.".to_string(),
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    pub content: ContentSettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
}

impl ConfigState {
    /// Loads configuration: defaults, then the TOML file, then environment
    /// overrides, then validation.
    ///
    /// ## Arguments
    /// * `config_path` - Explicit file; `None` uses the platform default.
    ///   A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::load`], with overrides read through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.content.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "content.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.content.catalog_file.is_none() {
            if let Some(config) = self.content_config() {
                config
                    .validate()
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            }
        }

        if self.display.currency_symbol.chars().count() > 8 {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must be at most 8 characters".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("STOREFRONT_PROJECT_ID") {
            debug!(project_id = %id, "Overriding project id from environment");
            self.content.project_id = Some(id);
        }

        if let Some(dataset) = lookup("STOREFRONT_DATASET") {
            self.content.dataset = dataset;
        }

        if let Some(version) = lookup("STOREFRONT_API_VERSION") {
            self.content.api_version = version;
        }

        if let Some(use_cdn) = lookup("STOREFRONT_USE_CDN") {
            match parse_bool(&use_cdn) {
                Some(value) => self.content.use_cdn = value,
                None => warn!(value = %use_cdn, "Ignoring unparseable STOREFRONT_USE_CDN"),
            }
        }

        if let Some(token) = lookup("STOREFRONT_TOKEN") {
            self.content.token = Some(token);
        }

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(file) = lookup("STOREFRONT_CATALOG_FILE") {
            debug!(catalog_file = %file, "Overriding catalog file from environment");
            self.content.catalog_file = Some(PathBuf::from(file));
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Default config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory the local store opens.
    ///
    /// ## Resolution
    /// 1. `storage.data_dir`
    /// 2. Platform data directory
    /// 3. `./.storefront`
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".storefront"))
    }

    /// CMS client settings, if a project is configured.
    pub fn content_config(&self) -> Option<ContentConfig> {
        let project_id = self.content.project_id.as_deref()?;

        let mut config = ContentConfig::new(project_id)
            .dataset(self.content.dataset.clone())
            .api_version(self.content.api_version.clone())
            .use_cdn(self.content.use_cdn)
            .timeout(Duration::from_secs(self.content.timeout_secs));
        if let Some(token) = &self.content.token {
            config = config.token(token.clone());
        }
        Some(config)
    }

    /// Picks the Content Provider: the catalog file if set, else the CMS.
    pub fn build_provider(&self) -> ConfigResult<Arc<dyn ContentProvider>> {
        if let Some(file) = &self.content.catalog_file {
            info!(path = %file.display(), "Using catalog file");
            return Ok(Arc::new(FixtureProvider::new(file.clone())));
        }

        let config = self.content_config().ok_or(ConfigError::NoContentSource)?;
        let client = SanityClient::new(config).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Arc::new(client))
    }

    /// Image URL builder for the configured CMS project.
    pub fn image_builder(&self) -> Option<ImageUrlBuilder> {
        self.content_config()
            .map(|config| ImageUrlBuilder::from_config(&config))
    }

    /// Formats money for display.
    ///
    /// Whole amounts drop the minor part; thousands are comma-grouped.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_major(1500)), "Rs.1,500");
    /// assert_eq!(config.format_money(Money::from_minor(24990)), "Rs.249.90");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let whole = group_thousands(amount.major().unsigned_abs());

        if amount.minor_part() == 0 {
            format!("{}{}{}", sign, self.display.currency_symbol, whole)
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                self.display.currency_symbol,
                whole,
                amount.minor_part().abs()
            )
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "storefront", "storefront")
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
