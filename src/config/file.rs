//! Configuration file loading and discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".kometro.yaml",
    ".kometro.yml",
    "kometro.yaml",
    "kometro.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "kometro";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/kometro/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = user_config_dir().and_then(|dir| find_config_in_dir(&dir)) {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// `~/.config/kometro` (platform equivalent).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error, including rejected threshold tables
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for crate::error::KometroError {
    fn from(err: ConfigFileError) -> Self {
        Self::config(err.to_string())
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from an explicit or discovered file, or return the defaults
/// when no file exists.
///
/// An explicit path must exist. A file that is found but fails to parse is an
/// error, never silently replaced by the defaults.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config_file(None) {
            Some(path) => path,
            None => return Ok((AppConfig::default(), None)),
        },
    };
    let config = load_config_file(&path)?;
    Ok((config, Some(path)))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one. Fields of `other` that differ from
    /// the defaults take precedence.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.api.base_url != defaults.api.base_url {
            self.api.base_url.clone_from(&other.api.base_url);
        }
        if other.api.timeout_secs != defaults.api.timeout_secs {
            self.api.timeout_secs = other.api.timeout_secs;
        }
        if other.api.token.is_some() {
            self.api.token.clone_from(&other.api.token);
        }
        if other.api.auth_scheme != defaults.api.auth_scheme {
            self.api.auth_scheme.clone_from(&other.api.auth_scheme);
        }
        if other.api.endpoints != defaults.api.endpoints {
            self.api.endpoints = other.api.endpoints.clone();
        }

        if other.review != defaults.review {
            self.review = other.review.clone();
        }
        if other.statuses != defaults.statuses {
            self.statuses = other.statuses.clone();
        }

        if other.listing.rows_per_page != defaults.listing.rows_per_page {
            self.listing.rows_per_page = other.listing.rows_per_page;
        }

        if other.export.output_dir.is_some() {
            self.export.output_dir.clone_from(&other.export.output_dir);
        }
        if other.export.file_prefix != defaults.export.file_prefix {
            self.export.file_prefix.clone_from(&other.export.file_prefix);
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Kometro documents configuration
# Place this file at .kometro.yaml in the working directory or ~/.config/kometro/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Kometro documents configuration
# ================================
#
# Place this file at:
#   - .kometro.yaml in the working directory
#   - ~/.config/kometro/kometro.yaml for global config
#
# CLI arguments and KOMETRO_API_URL / KOMETRO_API_TOKEN override file settings.

# Admin API connection
api:
  base_url: http://localhost:8000/api
  timeout_secs: 30
  # Prefer the KOMETRO_API_TOKEN environment variable
  # token: your-token
  auth_scheme: Token
  endpoints:
    documents: /documentos/
    export: /documentos/exportar/
    delete: /documentos/excluir/

# Critical-analysis badge: first threshold with elapsed months <= max_months
# wins; overdue_color applies past the last one.
# Colors: default, primary, secondary, info, success, warning, error
review:
  critical_analysis:
    thresholds:
      - max_months: 6
        color: success
      - max_months: 9
        color: info
      - max_months: 12
        color: warning
    overdue_color: error

# Status code -> label and color
statuses:
  elaboracao:
    label: Drafting
    color: info
  revisao:
    label: In review
    color: warning
  aprovacao:
    label: Awaiting approval
    color: secondary
  disponivel:
    label: Available
    color: success
  obsoleto:
    label: Obsolete
    color: error

# Documents listing
listing:
  # One of 5, 10, 25, 50, 100
  rows_per_page: 10

# Saved exports
export:
  # output_dir: ./exports
  file_prefix: documentos
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelColor;
    use crate::review::{StageThreshold, StageThresholds};
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".kometro.yaml");
        std::fs::write(&config_path, "listing:\n  rows_per_page: 25\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
api:
  base_url: https://kometro.example.com/api
review:
  critical_analysis:
    thresholds:
      - max_months: 12
        color: success
    overdue_color: error
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.api.base_url, "https://kometro.example.com/api");
        assert_eq!(config.review.critical_analysis.steps().len(), 1);
        assert_eq!(config.listing.rows_per_page, 10);
    }

    #[test]
    fn test_load_rejects_unordered_thresholds() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
review:
  critical_analysis:
    thresholds:
      - max_months: 9
        color: success
      - max_months: 6
        color: warning
    overdue_color: error
";
        std::fs::write(&config_path, yaml).unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/kometro.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.api.token = Some("from-file".to_string());

        let thresholds = StageThresholds::new(
            vec![StageThreshold::new(3, LabelColor::Success)],
            LabelColor::Error,
        )
        .unwrap();
        let mut overrides = AppConfig::builder()
            .base_url("https://other.example.com")
            .build();
        overrides.listing.rows_per_page = 50;
        overrides.review.critical_analysis = thresholds.clone();

        base.merge(&overrides);

        assert_eq!(base.api.base_url, "https://other.example.com");
        assert_eq!(base.api.token.as_deref(), Some("from-file"));
        assert_eq!(base.listing.rows_per_page, 50);
        assert_eq!(base.review.critical_analysis, thresholds);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config.review, AppConfig::default().review);
        assert_eq!(config.api, AppConfig::default().api);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("api:"));
        assert!(example.contains("rows_per_page"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        std::fs::write(&config_path, "listing:\n  rows_per_page: 5\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.yaml");

        let result = load_or_default(Some(&missing));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_keeps_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        let yaml = r"
review:
  critical_analysis:
    thresholds:
      - max_months: 12
        color: warning
      - max_months: 6
        color: success
    overdue_color: error
";
        std::fs::write(&config_path, yaml).unwrap();

        let result = load_or_default(Some(&config_path));
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_from_file_with_overrides() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        let yaml = "api:\n  base_url: https://file.example.com\n  token: from-file\nlisting:\n  rows_per_page: 25\n";
        std::fs::write(&config_path, yaml).unwrap();

        let overrides = AppConfig::builder()
            .base_url("https://cli.example.com")
            .token(Some("from-cli".to_string()))
            .build();
        let (config, loaded_from) =
            AppConfig::from_file_with_overrides(Some(&config_path), &overrides).unwrap();

        assert_eq!(loaded_from, Some(config_path.clone()));
        assert_eq!(config.api.base_url, "https://cli.example.com");
        assert_eq!(config.api.token.as_deref(), Some("from-cli"));
        assert_eq!(config.listing.rows_per_page, 25);

        // No token on the command line keeps the file's token
        let (config, _) =
            AppConfig::from_file_with_overrides(Some(&config_path), &AppConfig::default())
                .unwrap();
        assert_eq!(config.api.base_url, "https://file.example.com");
        assert_eq!(config.api.token.as_deref(), Some("from-file"));
    }
}
