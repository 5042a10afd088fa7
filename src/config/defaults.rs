//! Default values for the configuration.

use super::types::{ApiConfig, ExportConfig, ListingConfig};
use crate::api::Endpoints;
use crate::listing::DEFAULT_ROWS_PER_PAGE;

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Authorization scheme placed before the token.
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

/// File name prefix of saved exports.
pub const DEFAULT_EXPORT_PREFIX: &str = "documentos";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}
