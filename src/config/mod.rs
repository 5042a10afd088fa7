//! Configuration.
//!
//! # Configuration File
//!
//! Place a `.kometro.yaml` file in the working directory or
//! `~/.config/kometro/`:
//!
//! ```yaml
//! api:
//!   base_url: https://kometro.example.com/api
//! listing:
//!   rows_per_page: 25
//! review:
//!   critical_analysis:
//!     thresholds:
//!       - max_months: 6
//!         color: success
//!       - max_months: 12
//!         color: warning
//!     overdue_color: error
//! ```
//!
//! ```rust
//! use kometro_docs::config::load_or_default;
//!
//! # fn main() -> Result<(), kometro_docs::config::ConfigFileError> {
//! let (config, _loaded_from) = load_or_default(None)?;
//! assert!(config.listing.rows_per_page > 0);
//! # Ok(())
//! # }
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_AUTH_SCHEME, DEFAULT_BASE_URL, DEFAULT_EXPORT_PREFIX, DEFAULT_TIMEOUT_SECS,
};
pub use types::{
    ApiConfig, AppConfig, AppConfigBuilder, ExportConfig, ListingConfig, ReviewConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// JSON Schema of the config file format, for editor validation and
/// autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
