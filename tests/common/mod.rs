//! In-memory admin server shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use kometro_docs::api::{DocumentQuery, DocumentSource, DocumentStore, ExportRequest, ExportTransport};
use kometro_docs::error::{ApiErrorKind, KometroError, Result};
use kometro_docs::model::{Document, DocumentId, DocumentPage, DocumentStatus, NewDocument};
use kometro_docs::review::{CriticalAnalysisClassifier, FixedClock, StageThresholds};
use std::cell::{Cell, RefCell};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Classifier with the default thresholds, frozen at 2025-10-01.
pub fn classifier() -> CriticalAnalysisClassifier {
    CriticalAnalysisClassifier::new(StageThresholds::default(), FixedClock(date(2025, 10, 1)))
}

fn server_error(context: &str) -> KometroError {
    KometroError::api(
        context,
        ApiErrorKind::Status {
            status: 500,
            body: "internal error".to_string(),
        },
    )
}

/// Documents kept in memory, paged and filtered like the admin API.
#[derive(Default)]
pub struct FakeServer {
    pub documents: RefCell<Vec<Document>>,
    pub queries: RefCell<Vec<DocumentQuery>>,
    pub exports: RefCell<Vec<ExportRequest>>,
    pub deleted: RefCell<Vec<Vec<DocumentId>>>,
    pub created: RefCell<Vec<NewDocument>>,
    pub export_body: RefCell<String>,
    pub fail_fetch: Cell<bool>,
    pub fail_export: Cell<bool>,
    pub fail_delete: Cell<bool>,
    pub fail_create: Cell<bool>,
}

impl FakeServer {
    /// Documents with ids `1..=count`, codes `PQ-NN` and titles `documento N`.
    pub fn with_documents(count: u64) -> Self {
        let documents = (1..=count)
            .map(|id| {
                Document::new(id, DocumentStatus::Available)
                    .with_code(format!("pq-{id:02}"))
                    .with_title(format!("documento {id}"))
                    .with_creator("ana")
            })
            .collect();
        Self {
            documents: RefCell::new(documents),
            export_body: RefCell::new("codigo,titulo\nPQ-01,Manual".to_string()),
            ..Self::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }

    pub fn last_query(&self) -> Option<DocumentQuery> {
        self.queries.borrow().last().cloned()
    }
}

impl DocumentSource for FakeServer {
    fn fetch_page(&self, query: &DocumentQuery) -> Result<DocumentPage> {
        self.queries.borrow_mut().push(query.clone());
        if self.fail_fetch.get() {
            return Err(server_error("GET /documentos/"));
        }

        let code = query.filter.code.as_deref().map(str::to_lowercase);
        let matching: Vec<Document> = self
            .documents
            .borrow()
            .iter()
            .filter(|doc| query.filter.status.map_or(true, |s| doc.status == s))
            .filter(|doc| {
                code.as_deref()
                    .map_or(true, |c| doc.code_str().is_some_and(|dc| dc.contains(c)))
            })
            .cloned()
            .collect();

        let count = matching.len() as u64;
        let results = matching
            .into_iter()
            .skip(query.page * query.page_size)
            .take(query.page_size)
            .collect();
        Ok(DocumentPage::new(results, count))
    }
}

impl DocumentStore for FakeServer {
    fn delete_documents(&self, ids: &[DocumentId]) -> Result<()> {
        if self.fail_delete.get() {
            return Err(server_error("POST /documentos/excluir/"));
        }
        self.deleted.borrow_mut().push(ids.to_vec());
        self.documents.borrow_mut().retain(|doc| !ids.contains(&doc.id));
        Ok(())
    }

    fn create_document(&self, document: &NewDocument) -> Result<()> {
        if self.fail_create.get() {
            return Err(server_error("POST /documentos/"));
        }
        self.created.borrow_mut().push(document.clone());
        let id = self
            .documents
            .borrow()
            .iter()
            .map(|d| d.id)
            .max()
            .unwrap_or(0)
            + 1;
        let doc = Document::new(id, document.status.unwrap_or(DocumentStatus::Drafting))
            .with_code(document.code.clone())
            .with_title(document.title.clone());
        self.documents.borrow_mut().push(doc);
        Ok(())
    }
}

impl ExportTransport for FakeServer {
    fn request_export(&self, request: &ExportRequest) -> Result<String> {
        self.exports.borrow_mut().push(request.clone());
        if self.fail_export.get() {
            return Err(server_error("POST /documentos/exportar/"));
        }
        Ok(self.export_body.borrow().clone())
    }
}
