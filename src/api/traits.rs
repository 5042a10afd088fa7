//! Transport seams between the view-models and the server.

use super::types::{DocumentQuery, ExportRequest};
use crate::error::Result;
use crate::model::{DocumentId, DocumentPage, NewDocument};

/// Fetches pages of documents.
pub trait DocumentSource {
    fn fetch_page(&self, query: &DocumentQuery) -> Result<DocumentPage>;
}

/// Mutates documents on the server.
pub trait DocumentStore {
    /// Delete every document in `ids` in one request.
    fn delete_documents(&self, ids: &[DocumentId]) -> Result<()>;

    fn create_document(&self, document: &NewDocument) -> Result<()>;
}

/// Requests a server-rendered export.
pub trait ExportTransport {
    /// Returns the artifact body on a success status.
    fn request_export(&self, request: &ExportRequest) -> Result<String>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn fetch_page(&self, query: &DocumentQuery) -> Result<DocumentPage> {
        (**self).fetch_page(query)
    }
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn delete_documents(&self, ids: &[DocumentId]) -> Result<()> {
        (**self).delete_documents(ids)
    }

    fn create_document(&self, document: &NewDocument) -> Result<()> {
        (**self).create_document(document)
    }
}

impl<T: ExportTransport + ?Sized> ExportTransport for &T {
    fn request_export(&self, request: &ExportRequest) -> Result<String> {
        (**self).request_export(request)
    }
}
