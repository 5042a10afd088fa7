//! Export request coordination.
//!
//! A request carries the selected ids to the export endpoint; a success status
//! stores the body as the current artifact, anything else leaves the previous
//! artifact in place. Completions are guarded by a ticket so a late response
//! never lands after a newer request or after the owning view is gone.

use super::preview::CsvPreview;
use crate::api::{ExportRequest, ExportTransport};
use crate::error::{ExportErrorKind, KometroError, Result};
use crate::model::DocumentId;
use crate::selection::SelectionSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Content returned by the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    content: String,
    selection: Vec<DocumentId>,
}

impl ExportArtifact {
    #[must_use]
    pub fn new(content: impl Into<String>, selection: Vec<DocumentId>) -> Self {
        Self {
            content: content.into(),
            selection,
        }
    }

    /// Raw artifact body, exactly as received.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Ids the artifact was requested for.
    #[must_use]
    pub fn selection(&self) -> &[DocumentId] {
        &self.selection
    }

    pub fn preview(&self) -> Result<CsvPreview> {
        CsvPreview::parse(&self.content)
    }

    /// Write the artifact to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.content).map_err(|e| KometroError::io(path, e))
    }

    /// Write the artifact into `dir` under a timestamped name and return the path.
    pub fn save_to(&self, dir: &Path, prefix: &str) -> Result<PathBuf> {
        let path = dir.join(export_filename(prefix));
        self.write_to(&path)?;
        tracing::info!("Saved export to {}", path.display());
        Ok(path)
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.csv` for the current local time.
#[must_use]
pub fn export_filename(prefix: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("{prefix}_{timestamp}.csv")
}

/// Handle for one in-flight export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTicket {
    generation: u64,
    selection: Vec<DocumentId>,
}

impl ExportTicket {
    #[must_use]
    pub fn selection(&self) -> &[DocumentId] {
        &self.selection
    }

    /// Request body for this ticket.
    #[must_use]
    pub fn request(&self) -> ExportRequest {
        ExportRequest::new(self.selection.clone())
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The artifact was replaced
    Stored,
    /// The ticket was stale or the coordinator unmounted; nothing changed
    Discarded,
}

/// Owns the current artifact and the export transport.
#[derive(Debug)]
pub struct ExportCoordinator<T> {
    transport: T,
    artifact: Option<ExportArtifact>,
    generation: u64,
    mounted: bool,
}

impl<T: ExportTransport> ExportCoordinator<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            artifact: None,
            generation: 0,
            mounted: true,
        }
    }

    #[must_use]
    pub const fn artifact(&self) -> Option<&ExportArtifact> {
        self.artifact.as_ref()
    }

    pub fn take_artifact(&mut self) -> Option<ExportArtifact> {
        self.artifact.take()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Drop the artifact and ignore every outstanding completion.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.artifact = None;
        self.generation += 1;
    }

    /// Start a request for `selection`. Rejects an empty selection and an
    /// unmounted coordinator.
    pub fn begin(&mut self, selection: &SelectionSet) -> Result<ExportTicket> {
        if !self.mounted {
            return Err(KometroError::export(
                "export request",
                ExportErrorKind::Unmounted,
            ));
        }
        if selection.is_empty() {
            return Err(KometroError::export(
                "export request",
                ExportErrorKind::EmptySelection,
            ));
        }

        self.generation += 1;
        Ok(ExportTicket {
            generation: self.generation,
            selection: selection.ids(),
        })
    }

    /// Apply the outcome of a request started with [`Self::begin`].
    ///
    /// A stale ticket or an unmounted coordinator discards the result,
    /// including its error.
    pub fn complete(&mut self, ticket: ExportTicket, result: Result<String>) -> Result<Completion> {
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!("Discarding export completion for generation {}", ticket.generation);
            return Ok(Completion::Discarded);
        }

        match result {
            Ok(content) => {
                tracing::info!("Export ready for {} documents", ticket.selection.len());
                self.artifact = Some(ExportArtifact::new(content, ticket.selection));
                Ok(Completion::Stored)
            }
            Err(err) => {
                tracing::warn!("Export request failed: {err}");
                Err(into_export_error(err))
            }
        }
    }

    /// Request an export for `selection` and store the result.
    pub fn request_export(&mut self, selection: &SelectionSet) -> Result<&ExportArtifact> {
        let ticket = self.begin(selection)?;
        let result = self.transport.request_export(&ticket.request());
        self.complete(ticket, result)?;

        self.artifact
            .as_ref()
            .ok_or_else(|| KometroError::export("export request", ExportErrorKind::NoArtifact))
    }
}

fn into_export_error(err: KometroError) -> KometroError {
    match err {
        KometroError::Api { context, source } => {
            KometroError::export(context, ExportErrorKind::Request(source))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeExport {
        responses: RefCell<Vec<Result<String>>>,
        calls: Cell<usize>,
    }

    impl FakeExport {
        fn with(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                calls: Cell::new(0),
            }
        }
    }

    impl ExportTransport for FakeExport {
        fn request_export(&self, _request: &ExportRequest) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            self.responses.borrow_mut().remove(0)
        }
    }

    fn server_error() -> KometroError {
        KometroError::api(
            "POST /documentos/exportar/",
            ApiErrorKind::Status {
                status: 500,
                body: String::new(),
            },
        )
    }

    #[test]
    fn test_empty_selection_never_requests() {
        let transport = FakeExport::default();
        let mut coordinator = ExportCoordinator::new(&transport);
        let err = coordinator.request_export(&SelectionSet::new()).unwrap_err();
        assert!(matches!(
            err,
            KometroError::Export {
                source: ExportErrorKind::EmptySelection,
                ..
            }
        ));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn test_failure_keeps_previous_artifact() {
        let transport = FakeExport::with(vec![Ok("a,b\n1,2".to_string()), Err(server_error())]);
        let mut coordinator = ExportCoordinator::new(&transport);
        let selection: SelectionSet = [1, 2].into_iter().collect();

        coordinator.request_export(&selection).unwrap();
        let err = coordinator.request_export(&selection).unwrap_err();
        assert!(err.is_remote());
        assert_eq!(coordinator.artifact().unwrap().content(), "a,b\n1,2");
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let transport = FakeExport::default();
        let mut coordinator = ExportCoordinator::new(&transport);
        let selection: SelectionSet = [1].into_iter().collect();

        let first = coordinator.begin(&selection).unwrap();
        let second = coordinator.begin(&selection).unwrap();
        assert_eq!(
            coordinator.complete(first, Ok("old".to_string())).unwrap(),
            Completion::Discarded
        );
        assert_eq!(
            coordinator.complete(second, Ok("new".to_string())).unwrap(),
            Completion::Stored
        );
        assert_eq!(coordinator.artifact().unwrap().content(), "new");
    }

    #[test]
    fn test_unmounted_discards_errors_too() {
        let transport = FakeExport::default();
        let mut coordinator = ExportCoordinator::new(&transport);
        let ticket = coordinator.begin(&[4].into_iter().collect()).unwrap();
        coordinator.unmount();
        assert_eq!(
            coordinator.complete(ticket, Err(server_error())).unwrap(),
            Completion::Discarded
        );
        assert!(coordinator.artifact().is_none());
    }

    #[test]
    fn test_unmounted_never_requests() {
        let transport = FakeExport::with(vec![Ok("a,b\n1,2".to_string())]);
        let mut coordinator = ExportCoordinator::new(&transport);
        coordinator.unmount();

        let err = coordinator
            .request_export(&[1].into_iter().collect())
            .unwrap_err();
        assert!(matches!(
            err,
            KometroError::Export {
                source: ExportErrorKind::Unmounted,
                ..
            }
        ));
        assert_eq!(transport.calls.get(), 0);

        coordinator.mount();
        coordinator
            .request_export(&[1].into_iter().collect())
            .unwrap();
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_save_to_uses_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact::new("a,b\n1,2", vec![1]);
        let path = artifact.save_to(dir.path(), "documentos").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("documentos_"), "{name}");
        assert!(name.ends_with(".csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a,b\n1,2");
    }

    #[test]
    fn test_export_filename_shape() {
        let name = export_filename("documentos");
        // documentos_YYYYmmdd_HHMMSS.csv
        assert_eq!(name.len(), "documentos_".len() + 15 + 4);
    }
}
