//! Unified error types for kometro-docs.
//!
//! Remote-call failures are caught by the view-models and turned into status
//! messages; these types carry enough context for that message and for logs.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for kometro-docs operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KometroError {
    /// Errors talking to the admin API
    #[error("API request failed: {context}")]
    Api {
        context: String,
        #[source]
        source: ApiErrorKind,
    },

    /// Errors requesting or handling an export artifact
    #[error("Export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// Errors from bulk delete and create actions
    #[error("Bulk action failed: {context}")]
    BulkAction {
        context: String,
        #[source]
        source: BulkActionErrorKind,
    },

    /// Errors decoding local input (JSON fixtures, CSV artifacts, dates)
    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Transport-level failure kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("HTTP support not compiled in (enable the `http` feature)")]
    Unavailable,
}

/// Export failure kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("No documents selected")]
    EmptySelection,

    #[error("{0}")]
    Request(#[from] ApiErrorKind),

    #[error("No export artifact available")]
    NoArtifact,

    #[error("Export view is no longer mounted")]
    Unmounted,
}

/// Bulk delete / create failure kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BulkActionErrorKind {
    #[error("No documents selected")]
    EmptySelection,

    #[error("{0}")]
    Request(#[from] ApiErrorKind),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for kometro-docs operations
pub type Result<T> = std::result::Result<T, KometroError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl KometroError {
    /// Create an API error with context
    pub fn api(context: impl Into<String>, source: ApiErrorKind) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create a bulk action error with context
    pub fn bulk_action(context: impl Into<String>, source: BulkActionErrorKind) -> Self {
        Self::BulkAction {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error came from the remote side (network or status).
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::Export {
                    source: ExportErrorKind::Request(_),
                    ..
                }
                | Self::BulkAction {
                    source: BulkActionErrorKind::Request(_),
                    ..
                }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for KometroError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for KometroError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse("JSON", err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to the existing one, so a failure read from
/// the logs shows the path through the code: `"export: POST /documentos/exportar/: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<KometroError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: KometroError, new_ctx: &str) -> KometroError {
    match err {
        KometroError::Api {
            context: existing,
            source,
        } => KometroError::Api {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KometroError::Export {
            context: existing,
            source,
        } => KometroError::Export {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KometroError::BulkAction {
            context: existing,
            source,
        } => KometroError::BulkAction {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KometroError::Parse {
            context: existing,
            message,
        } => KometroError::Parse {
            context: chain_context(new_ctx, &existing),
            message,
        },
        KometroError::Io {
            path,
            message,
            source,
        } => KometroError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        KometroError::Config(msg) => KometroError::Config(chain_context(new_ctx, &msg)),
        KometroError::Validation(msg) => KometroError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing was there yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KometroError::api(
            "POST /documentos/exportar/",
            ApiErrorKind::Status {
                status: 500,
                body: "boom".to_string(),
            },
        );
        let display = err.to_string();
        assert!(display.contains("/documentos/exportar/"), "{display}");

        let err = KometroError::export("export", ExportErrorKind::EmptySelection);
        assert!(err.to_string().contains("Export failed"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = KometroError::io("/tmp/documentos.csv", io_err);
        assert!(err.to_string().contains("/tmp/documentos.csv"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(KometroError::api(
                "base",
                ApiErrorKind::NetworkError("refused".to_string()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle").context("outer")
        }

        match outer() {
            Err(KometroError::Api { context, .. }) => {
                assert_eq!(context, "outer: middle: base");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_is_lazy() {
        let mut called = false;
        let ok: Result<i32> = Ok(1);
        let _ = ok.with_context(|| {
            called = true;
            "unused"
        });
        assert!(!called);
    }

    #[test]
    fn test_is_remote() {
        let remote = KometroError::export(
            "export",
            ExportErrorKind::Request(ApiErrorKind::NetworkError("down".to_string())),
        );
        assert!(remote.is_remote());
        let local = KometroError::export("export", ExportErrorKind::EmptySelection);
        assert!(!local.is_remote());
    }
}
