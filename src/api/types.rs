//! Request shapes sent to the admin API.

use crate::model::{DocumentId, DocumentStatus};
use serde::{Deserialize, Serialize};

/// Optional listing filters. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub code: Option<String>,
    pub title: Option<String>,
    pub status: Option<DocumentStatus>,
}

impl DocumentFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_blank(self.code.as_deref()).is_none()
            && non_blank(self.title.as_deref()).is_none()
            && self.status.is_none()
    }

    /// Query-string pairs for the set filters, using the server's names.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(code) = non_blank(self.code.as_deref()) {
            pairs.push(("codigo", code.to_string()));
        }
        if let Some(title) = non_blank(self.title.as_deref()) {
            pairs.push(("titulo", title.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.code().to_string()));
        }
        pairs
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    pub filter: DocumentFilter,
}

impl DocumentQuery {
    #[must_use]
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            filter: DocumentFilter::default(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: DocumentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Query-string pairs. The server counts pages from 1.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", (self.page + 1).to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        pairs.extend(self.filter.query_pairs());
        pairs
    }
}

/// Body of the export and bulk delete requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPayload {
    #[serde(rename = "documentos_selecionados")]
    pub selected: Vec<DocumentId>,
}

impl SelectionPayload {
    #[must_use]
    pub fn new(selected: Vec<DocumentId>) -> Self {
        Self { selected }
    }
}

/// An export request is a selection payload.
pub type ExportRequest = SelectionPayload;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_are_one_based() {
        let query = DocumentQuery::new(0, 10);
        assert_eq!(
            query.query_pairs(),
            vec![("page", "1".to_string()), ("page_size", "10".to_string())]
        );
    }

    #[test]
    fn test_blank_filters_are_skipped() {
        let filter = DocumentFilter {
            code: Some("  ".to_string()),
            title: Some("manual".to_string()),
            status: Some(DocumentStatus::Review),
        };
        assert!(!filter.is_empty());
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("titulo", "manual".to_string()),
                ("status", "revisao".to_string())
            ]
        );
        assert!(DocumentFilter::default().is_empty());
    }

    #[test]
    fn test_selection_payload_wire_name() {
        let json = serde_json::to_string(&SelectionPayload::new(vec![1, 2, 3])).unwrap();
        assert_eq!(json, r#"{"documentos_selecionados":[1,2,3]}"#);
    }
}
