//! HTTP client for the admin API.

use super::traits::{DocumentSource, DocumentStore, ExportTransport};
use super::types::{DocumentQuery, ExportRequest, SelectionPayload};
use crate::error::{ApiErrorKind, KometroError, Result};
use crate::model::{DocumentId, DocumentPage, NewDocument};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint paths, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Endpoints {
    /// Listing (GET) and creation (POST)
    pub documents: String,
    /// Export (POST, selection body)
    pub export: String,
    /// Bulk delete (POST, selection body)
    pub delete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            documents: "/documentos/".to_string(),
            export: "/documentos/exportar/".to_string(),
            delete: "/documentos/excluir/".to_string(),
        }
    }
}

/// Admin client configuration.
#[derive(Debug, Clone)]
pub struct AdminClientConfig {
    /// Base URL, e.g. `https://kometro.example.com/api`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Token sent as `Authorization: {auth_scheme} {token}`
    pub token: Option<String>,
    pub auth_scheme: String,
    pub endpoints: Endpoints,
}

impl Default for AdminClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            auth_scheme: "Token".to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl AdminClientConfig {
    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("{} {t}", self.auth_scheme))
    }
}

// ============================================================================
// reqwest implementation
// ============================================================================

#[cfg(feature = "http")]
mod http {
    use super::{AdminClientConfig, ApiErrorKind, KometroError, Result};
    use reqwest::blocking::{Client, RequestBuilder, Response};

    /// Helper to convert reqwest errors to API errors
    pub(super) fn network_error(context: &str, err: reqwest::Error) -> KometroError {
        KometroError::api(context, ApiErrorKind::NetworkError(err.to_string()))
    }

    pub(super) fn build(config: &AdminClientConfig) -> Result<Client> {
        Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", e))
    }

    pub(super) fn with_auth(config: &AdminClientConfig, request: RequestBuilder) -> RequestBuilder {
        match config.authorization() {
            Some(value) => request.header(reqwest::header::AUTHORIZATION, value),
            None => request,
        }
    }

    /// Send and turn any non-success status into an error carrying the body.
    pub(super) fn send(context: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(|e| network_error(context, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::debug!("{context} returned {}", status.as_u16());
            return Err(KometroError::api(
                context,
                ApiErrorKind::Status {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        Ok(response)
    }
}

/// Blocking client for the admin API.
#[derive(Debug)]
pub struct AdminClient {
    #[cfg(feature = "http")]
    client: reqwest::blocking::Client,
    config: AdminClientConfig,
}

impl AdminClient {
    /// Create a new client.
    #[cfg(feature = "http")]
    pub fn new(config: AdminClientConfig) -> Result<Self> {
        let client = http::build(&config)?;
        Ok(Self { client, config })
    }

    /// Create a new client. Every request fails without the `http` feature.
    #[cfg(not(feature = "http"))]
    pub fn new(config: AdminClientConfig) -> Result<Self> {
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &AdminClientConfig {
        &self.config
    }
}

#[cfg(feature = "http")]
impl DocumentSource for AdminClient {
    fn fetch_page(&self, query: &DocumentQuery) -> Result<DocumentPage> {
        let url = self.config.url(&self.config.endpoints.documents);
        let context = format!("GET {}", self.config.endpoints.documents);
        tracing::debug!("Fetching documents page {} ({} rows)", query.page, query.page_size);

        let request = self.client.get(&url).query(&query.query_pairs());
        let response = http::send(&context, http::with_auth(&self.config, request))?;

        response.json().map_err(|e| {
            KometroError::api(context, ApiErrorKind::InvalidResponse(e.to_string()))
        })
    }
}

#[cfg(feature = "http")]
impl DocumentStore for AdminClient {
    fn delete_documents(&self, ids: &[DocumentId]) -> Result<()> {
        let url = self.config.url(&self.config.endpoints.delete);
        let context = format!("POST {}", self.config.endpoints.delete);
        tracing::debug!("Deleting {} documents", ids.len());

        let body = SelectionPayload::new(ids.to_vec());
        let request = self.client.post(&url).json(&body);
        http::send(&context, http::with_auth(&self.config, request))?;
        Ok(())
    }

    fn create_document(&self, document: &NewDocument) -> Result<()> {
        let url = self.config.url(&self.config.endpoints.documents);
        let context = format!("POST {}", self.config.endpoints.documents);
        tracing::debug!("Creating document {}", document.code);

        let request = self.client.post(&url).json(document);
        http::send(&context, http::with_auth(&self.config, request))?;
        Ok(())
    }
}

#[cfg(feature = "http")]
impl ExportTransport for AdminClient {
    fn request_export(&self, request: &ExportRequest) -> Result<String> {
        let url = self.config.url(&self.config.endpoints.export);
        let context = format!("POST {}", self.config.endpoints.export);
        tracing::debug!("Requesting export of {} documents", request.selected.len());

        let builder = self.client.post(&url).json(request);
        let response = http::send(&context, http::with_auth(&self.config, builder))?;

        response
            .text()
            .map_err(|e| KometroError::api(context, ApiErrorKind::InvalidResponse(e.to_string())))
    }
}

// ============================================================================
// Fallback without HTTP support
// ============================================================================

#[cfg(not(feature = "http"))]
fn unavailable<T>(context: &str) -> Result<T> {
    Err(KometroError::api(context, ApiErrorKind::Unavailable))
}

#[cfg(not(feature = "http"))]
impl DocumentSource for AdminClient {
    fn fetch_page(&self, _query: &DocumentQuery) -> Result<DocumentPage> {
        unavailable(&self.config.endpoints.documents)
    }
}

#[cfg(not(feature = "http"))]
impl DocumentStore for AdminClient {
    fn delete_documents(&self, _ids: &[DocumentId]) -> Result<()> {
        unavailable(&self.config.endpoints.delete)
    }

    fn create_document(&self, _document: &NewDocument) -> Result<()> {
        unavailable(&self.config.endpoints.documents)
    }
}

#[cfg(not(feature = "http"))]
impl ExportTransport for AdminClient {
    fn request_export(&self, _request: &ExportRequest) -> Result<String> {
        unavailable(&self.config.endpoints.export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = AdminClientConfig::default();
        assert_eq!(config.endpoints.export, "/documentos/exportar/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.authorization().is_none());
    }

    #[test]
    fn test_url_joining() {
        let config = AdminClientConfig {
            base_url: "https://kometro.example.com/api/".to_string(),
            ..AdminClientConfig::default()
        };
        assert_eq!(
            config.url("/documentos/"),
            "https://kometro.example.com/api/documentos/"
        );
        assert_eq!(
            config.url("documentos/excluir/"),
            "https://kometro.example.com/api/documentos/excluir/"
        );
    }

    #[test]
    fn test_authorization_header_value() {
        let config = AdminClientConfig {
            token: Some("abc123".to_string()),
            ..AdminClientConfig::default()
        };
        assert_eq!(config.authorization().as_deref(), Some("Token abc123"));
    }

    #[test]
    fn test_client_creation() {
        assert!(AdminClient::new(AdminClientConfig::default()).is_ok());
    }
}
