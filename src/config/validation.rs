//! Configuration validation.

use super::types::{ApiConfig, AppConfig, ExportConfig, ListingConfig};
use crate::listing::ROWS_PER_PAGE_OPTIONS;

// ============================================================================
// Configuration Error
// ============================================================================

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the field
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Thresholds are validated on construction and deserialization
        let mut errors = Vec::new();
        errors.extend(self.api.validate());
        errors.extend(self.listing.validate());
        errors.extend(self.export.validate());
        errors
    }
}

impl Validatable for ApiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "api.base_url",
                format!("Base URL must start with http:// or https://, got '{}'", self.base_url),
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new("api.timeout_secs", "Timeout must be at least 1 second"));
        }

        let endpoints = [
            ("api.endpoints.documents", &self.endpoints.documents),
            ("api.endpoints.export", &self.endpoints.export),
            ("api.endpoints.delete", &self.endpoints.delete),
        ];
        for (field, path) in endpoints {
            if path.trim().is_empty() {
                errors.push(ConfigError::new(field, "Endpoint path must not be empty"));
            }
        }

        errors
    }
}

impl Validatable for ListingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if ROWS_PER_PAGE_OPTIONS.contains(&self.rows_per_page) {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "listing.rows_per_page",
                format!(
                    "Invalid rows per page {}. Valid options: {ROWS_PER_PAGE_OPTIONS:?}",
                    self.rows_per_page
                ),
            )]
        }
    }
}

impl Validatable for ExportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.file_prefix.trim().is_empty() {
            errors.push(ConfigError::new("export.file_prefix", "Prefix must not be empty"));
        } else if self.file_prefix.contains(['/', '\\']) {
            errors.push(ConfigError::new(
                "export.file_prefix",
                "Prefix must not contain path separators",
            ));
        }

        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                errors.push(ConfigError::new(
                    "export.output_dir",
                    format!("Not a directory: {}", dir.display()),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_api_config_validation() {
        let config = ApiConfig {
            base_url: "kometro.local".to_string(),
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "api.base_url");
        assert_eq!(errors[1].field, "api.timeout_secs");
    }

    #[test]
    fn test_listing_config_validation() {
        assert!(!ListingConfig { rows_per_page: 7 }.is_valid());
        assert!(ListingConfig { rows_per_page: 100 }.is_valid());
    }

    #[test]
    fn test_export_prefix_validation() {
        let config = ExportConfig {
            file_prefix: "../docs".to_string(),
            ..ExportConfig::default()
        };
        assert_eq!(config.validate()[0].field, "export.file_prefix");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("listing.rows_per_page", "bad");
        assert_eq!(err.to_string(), "listing.rows_per_page: bad");
    }
}
