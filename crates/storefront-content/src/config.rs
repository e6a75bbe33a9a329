//! # Content Configuration
//!
//! Where the CMS lives and how to talk to it.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use storefront_content::ContentConfig;
//!
//! let config = ContentConfig::new("abc123")
//!     .dataset("staging")
//!     .use_cdn(false)
//!     .timeout(Duration::from_secs(5));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.api_host(), "abc123.api.sanity.io");
//! ```

use std::time::Duration;

use crate::error::{ContentError, ContentResult};

/// Default dataset name.
pub const DEFAULT_DATASET: &str = "production";

/// Default dated API version.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// CMS connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    /// CMS project id (subdomain of the API host).
    pub project_id: String,

    /// Dataset queried.
    /// Default: "production"
    pub dataset: String,

    /// Dated API version, `YYYY-MM-DD`.
    pub api_version: String,

    /// Query the edge cache instead of the live API.
    /// Default: true
    pub use_cdn: bool,

    /// Read token for private datasets.
    pub token: Option<String>,

    /// Whole-request timeout.
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl ContentConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        ContentConfig {
            project_id: project_id.into(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn use_cdn(mut self, use_cdn: bool) -> Self {
        self.use_cdn = use_cdn;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host serving queries for this project.
    pub fn api_host(&self) -> String {
        let service = if self.use_cdn { "apicdn" } else { "api" };
        format!("{}.{}.sanity.io", self.project_id, service)
    }

    /// Validates the configuration.
    ///
    /// ## Checks
    /// - Project id: non-empty, lowercase alphanumeric
    /// - Dataset: non-empty, lowercase alphanumeric, `_` or `-`
    /// - API version: `YYYY-MM-DD`
    /// - Timeout: non-zero
    pub fn validate(&self) -> ContentResult<()> {
        let project_ok = !self.project_id.is_empty()
            && self
                .project_id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !project_ok {
            return Err(ContentError::invalid_config(format!(
                "project id '{}' must be lowercase letters and digits",
                self.project_id
            )));
        }

        let dataset_ok = !self.dataset.is_empty()
            && self
                .dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !dataset_ok {
            return Err(ContentError::invalid_config(format!(
                "dataset '{}' must be lowercase letters, digits, '_' or '-'",
                self.dataset
            )));
        }

        if !is_dated_version(&self.api_version) {
            return Err(ContentError::invalid_config(format!(
                "api version '{}' must look like YYYY-MM-DD",
                self.api_version
            )));
        }

        if self.timeout.is_zero() {
            return Err(ContentError::invalid_config("timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn is_dated_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('-').collect();
    matches!(parts.as_slice(), [y, m, d]
        if y.len() == 4 && m.len() == 2 && d.len() == 2
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::new("abc123");
        assert_eq!(config.dataset, "production");
        assert!(config.use_cdn);
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_api_host() {
        assert_eq!(ContentConfig::new("p1").api_host(), "p1.apicdn.sanity.io");
        assert_eq!(
            ContentConfig::new("p1").use_cdn(false).api_host(),
            "p1.api.sanity.io"
        );
    }

    #[test]
    fn test_validate() {
        assert!(ContentConfig::new("abc123").validate().is_ok());
        assert!(ContentConfig::new("").validate().is_err());
        assert!(ContentConfig::new("ABC").validate().is_err());
        assert!(ContentConfig::new("abc").dataset("").validate().is_err());
        assert!(ContentConfig::new("abc").api_version("latest").validate().is_err());
        assert!(ContentConfig::new("abc").api_version("2024-1-01").validate().is_err());
        assert!(ContentConfig::new("abc")
            .timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
