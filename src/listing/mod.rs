//! Documents page view-model.
//!
//! Holds the page currently shown, its pagination and filters, the selection
//! and the export coordinator. Remote failures are recorded in the status
//! message and returned; nothing here panics or aborts on a server error.

mod pagination;
mod rows;
mod status;

pub use pagination::{
    validate_rows_per_page, Pagination, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS,
};
pub use rows::{DocumentRow, StatusStyle, StatusTable};
pub use status::{StatusLevel, StatusMessage};

use crate::api::{DocumentFilter, DocumentQuery, DocumentSource, DocumentStore, ExportTransport};
use crate::error::{BulkActionErrorKind, KometroError, Result};
use crate::export::{ExportArtifact, ExportCoordinator};
use crate::model::{Document, DocumentId, DocumentPage, NewDocument};
use crate::review::CriticalAnalysisClassifier;
use crate::selection::{HeaderState, SelectionSet};

/// Message shown when the loaded page has no documents.
pub const EMPTY_MESSAGE: &str = "No documents registered yet";

/// The documents page.
pub struct DocumentListing<'a> {
    source: &'a dyn DocumentSource,
    store: &'a dyn DocumentStore,
    export: ExportCoordinator<&'a dyn ExportTransport>,
    classifier: CriticalAnalysisClassifier,
    statuses: StatusTable,
    pagination: Pagination,
    filter: DocumentFilter,
    page: Option<DocumentPage>,
    selection: SelectionSet,
    status: StatusMessage,
}

impl<'a> DocumentListing<'a> {
    /// Create a listing backed by `client` with the default status table and
    /// rows-per-page.
    pub fn new<C>(client: &'a C, classifier: CriticalAnalysisClassifier) -> Self
    where
        C: DocumentSource + DocumentStore + ExportTransport,
    {
        Self {
            source: client,
            store: client,
            export: ExportCoordinator::new(client as &dyn ExportTransport),
            classifier,
            statuses: StatusTable::default(),
            pagination: Pagination::default(),
            filter: DocumentFilter::default(),
            page: None,
            selection: SelectionSet::new(),
            status: StatusMessage::new(),
        }
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusTable) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn with_rows_per_page(mut self, rows: usize) -> Result<Self> {
        self.pagination.set_rows_per_page(rows)?;
        Ok(self)
    }

    // ========================================================================
    // Loading and pagination
    // ========================================================================

    /// Query for the current page and filters.
    #[must_use]
    pub fn query(&self) -> DocumentQuery {
        DocumentQuery::new(self.pagination.page(), self.pagination.rows_per_page())
            .with_filter(self.filter.clone())
    }

    /// Fetch the current page. The selection is pruned to the new page's ids.
    pub fn load(&mut self) -> Result<&DocumentPage> {
        let query = self.query();
        let page = match self.source.fetch_page(&query) {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!("Failed to load documents: {err}");
                self.status.error(format!("Failed to load documents: {err}"));
                return Err(err);
            }
        };

        let pruned = self.selection.retain_page(&page.ids());
        if pruned > 0 {
            tracing::debug!("Dropped {pruned} selected ids not on page {}", query.page);
        }

        self.pagination.set_total(page.count);
        Ok(self.page.insert(page))
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    /// Change rows-per-page; goes back to the first page.
    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<()> {
        self.pagination.set_rows_per_page(rows)
    }

    #[must_use]
    pub const fn filter(&self) -> &DocumentFilter {
        &self.filter
    }

    /// Replace the filters; goes back to the first page.
    pub fn set_filter(&mut self, filter: DocumentFilter) {
        self.filter = filter;
        self.pagination.reset();
    }

    #[must_use]
    pub const fn page(&self) -> Option<&DocumentPage> {
        self.page.as_ref()
    }

    /// Ids on the loaded page, empty before the first load.
    #[must_use]
    pub fn page_ids(&self) -> Vec<DocumentId> {
        self.page.as_ref().map(DocumentPage::ids).unwrap_or_default()
    }

    /// True once a page has loaded and it has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page.as_ref().is_some_and(DocumentPage::is_empty)
    }

    /// Empty-state text, when the loaded page is empty.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Header checkbox: checked selects every row of the loaded page,
    /// unchecked clears the selection.
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selection.select_all(self.page_ids());
        } else {
            self.selection.clear();
        }
    }

    /// Toggle one row. Ids not on the loaded page are ignored.
    pub fn toggle(&mut self, id: DocumentId) -> bool {
        if !self.page_ids().contains(&id) {
            tracing::debug!("Ignoring toggle of id {id} not on the loaded page");
            return self.selection.is_selected(id);
        }
        self.selection.toggle(id)
    }

    #[must_use]
    pub fn is_selected(&self, id: DocumentId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    #[must_use]
    pub fn header_state(&self) -> HeaderState {
        self.selection.header_state(self.page_ids().len())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Whether the export action is enabled.
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Export the selection. The previous artifact survives a failure.
    pub fn export(&mut self) -> Result<&ExportArtifact> {
        match self.export.request_export(&self.selection) {
            Ok(artifact) => {
                self.status
                    .success(format!("Export ready ({} documents)", artifact.selection().len()));
                Ok(artifact)
            }
            Err(err) => {
                self.status.error(format!("Export failed: {err}"));
                Err(err)
            }
        }
    }

    #[must_use]
    pub const fn artifact(&self) -> Option<&ExportArtifact> {
        self.export.artifact()
    }

    pub fn take_artifact(&mut self) -> Option<ExportArtifact> {
        self.export.take_artifact()
    }

    /// The view is going away: drop the artifact and ignore late completions.
    pub fn unmount(&mut self) {
        self.export.unmount();
    }

    #[must_use]
    pub const fn export_coordinator(&self) -> &ExportCoordinator<&'a dyn ExportTransport> {
        &self.export
    }

    pub fn export_coordinator_mut(&mut self) -> &mut ExportCoordinator<&'a dyn ExportTransport> {
        &mut self.export
    }

    // ========================================================================
    // Bulk delete and create
    // ========================================================================

    /// Delete every selected document.
    ///
    /// On success the selection is cleared and the page reloaded; on failure
    /// the selection is left untouched.
    pub fn delete_selected(&mut self) -> Result<usize> {
        if self.selection.is_empty() {
            return Err(KometroError::bulk_action(
                "delete",
                BulkActionErrorKind::EmptySelection,
            ));
        }

        let ids = self.selection.ids();
        if let Err(err) = self.store.delete_documents(&ids) {
            tracing::warn!("Failed to delete {} documents: {err}", ids.len());
            self.status
                .error(format!("Failed to delete {} documents: {err}", ids.len()));
            return Err(into_bulk_error(err));
        }

        tracing::info!("Deleted {} documents", ids.len());
        self.selection.clear();
        self.status.success(format!("Deleted {} documents", ids.len()));
        self.reload_after_change();
        Ok(ids.len())
    }

    /// Create a document. Required fields are checked before any request.
    pub fn create(&mut self, document: &NewDocument) -> Result<()> {
        let missing = document.missing_fields();
        if !missing.is_empty() {
            let err = KometroError::validation(format!("missing {}", missing.join(", ")));
            self.status.error(err.to_string());
            return Err(err);
        }

        if let Err(err) = self.store.create_document(document) {
            tracing::warn!("Failed to create document {}: {err}", document.code);
            self.status.error(format!("Failed to create document: {err}"));
            return Err(into_bulk_error(err));
        }

        tracing::info!("Created document {}", document.code);
        self.status.success(format!("Document {} created", document.code));
        self.reload_after_change();
        Ok(())
    }

    /// Reload after a mutation, stepping back when the current page emptied.
    fn reload_after_change(&mut self) {
        if self.load().is_err() {
            return;
        }
        if self.is_empty() && self.pagination.page() > 0 {
            let last = self.pagination.last_page().min(self.pagination.page() - 1);
            self.pagination.set_page(last);
            // Failure already recorded in the status message
            let _ = self.load();
        }
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Display rows of the loaded page.
    #[must_use]
    pub fn rows(&self) -> Vec<DocumentRow> {
        self.page
            .as_ref()
            .map(|page| {
                page.results
                    .iter()
                    .map(|doc| {
                        DocumentRow::build(
                            doc,
                            self.selection.is_selected(doc.id),
                            &self.statuses,
                            &self.classifier,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Route opened when a row is activated.
    #[must_use]
    pub fn navigation_target(document: &Document) -> String {
        document.navigation_target()
    }

    /// Route for a document on the loaded page.
    #[must_use]
    pub fn navigation_target_for(&self, id: DocumentId) -> Option<String> {
        self.page
            .as_ref()
            .and_then(|page| page.get(id))
            .map(Document::navigation_target)
    }

    #[must_use]
    pub const fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    #[must_use]
    pub const fn classifier(&self) -> &CriticalAnalysisClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusMessage {
        &mut self.status
    }
}

fn into_bulk_error(err: KometroError) -> KometroError {
    match err {
        KometroError::Api { context, source } => {
            KometroError::bulk_action(context, BulkActionErrorKind::Request(source))
        }
        other => other,
    }
}
