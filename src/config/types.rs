//! Configuration types.

use crate::api::{AdminClientConfig, Endpoints};
use crate::listing::StatusTable;
use crate::review::StageThresholds;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and overridden by CLI
/// arguments and environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Admin API connection
    pub api: ApiConfig,
    /// Critical-analysis review staging
    pub review: ReviewConfig,
    /// Status code → label and color
    pub statuses: StatusTable,
    /// Documents listing
    pub listing: ListingConfig,
    /// Saved export files
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Admin API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API token; prefer the KOMETRO_API_TOKEN environment variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Authorization scheme placed before the token
    pub auth_scheme: String,
    /// Endpoint paths relative to the base URL
    pub endpoints: Endpoints,
}

impl ApiConfig {
    /// Settings for [`crate::api::AdminClient`].
    #[must_use]
    pub fn to_client_config(&self) -> AdminClientConfig {
        AdminClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            token: self.token.clone(),
            auth_scheme: self.auth_scheme.clone(),
            endpoints: self.endpoints.clone(),
        }
    }
}

/// Review staging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReviewConfig {
    /// Month thresholds for the critical-analysis badge
    pub critical_analysis: StageThresholds,
}

/// Documents listing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows per page: 5, 10, 25, 50 or 100
    pub rows_per_page: usize,
}

/// Saved export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for saved exports (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// File name prefix, followed by a timestamp
    pub file_prefix: String,
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for layering CLI overrides onto a config.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    pub fn token(mut self, token: Option<String>) -> Self {
        self.config.api.token = token;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .base_url("https://kometro.example.com/api")
            .token(Some("t0k".to_string()))
            .build();
        assert_eq!(config.api.base_url, "https://kometro.example.com/api");
        assert_eq!(config.listing.rows_per_page, 10);

        let client = config.api.to_client_config();
        assert_eq!(client.token.as_deref(), Some("t0k"));
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("listing:\n  rows_per_page: 50\n").unwrap();
        assert_eq!(config.listing.rows_per_page, 50);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.export.file_prefix, "documentos");
    }
}
