//! Presentation rows of the documents table.

use crate::model::{Document, DocumentId, DocumentStatus, Label, LabelColor};
use crate::review::{CriticalAnalysisClassifier, CriticalAnalysisStage};
use crate::utils::{format_date, title_case};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a status is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusStyle {
    pub label: String,
    pub color: LabelColor,
}

impl StatusStyle {
    pub fn new(label: impl Into<String>, color: LabelColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Status → label/color table.
///
/// Statuses missing from the table render with their wire code and the
/// default color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct StatusTable(BTreeMap<DocumentStatus, StatusStyle>);

impl Default for StatusTable {
    fn default() -> Self {
        Self(
            [
                (DocumentStatus::Drafting, StatusStyle::new("Drafting", LabelColor::Info)),
                (DocumentStatus::Review, StatusStyle::new("In review", LabelColor::Warning)),
                (
                    DocumentStatus::Approval,
                    StatusStyle::new("Awaiting approval", LabelColor::Secondary),
                ),
                (DocumentStatus::Available, StatusStyle::new("Available", LabelColor::Success)),
                (DocumentStatus::Obsolete, StatusStyle::new("Obsolete", LabelColor::Error)),
                (DocumentStatus::Unknown, StatusStyle::new("Unknown", LabelColor::Default)),
            ]
            .into_iter()
            .collect(),
        )
    }
}

impl StatusTable {
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn get(&self, status: DocumentStatus) -> Option<&StatusStyle> {
        self.0.get(&status)
    }

    pub fn insert(&mut self, status: DocumentStatus, style: StatusStyle) {
        self.0.insert(status, style);
    }

    /// Badge for `status`.
    #[must_use]
    pub fn label(&self, status: DocumentStatus) -> Label {
        self.get(status).map_or_else(
            || Label::new(status.code(), LabelColor::Default),
            |style| Label::new(style.label.clone(), style.color),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocumentStatus, &StatusStyle)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One row of the documents table, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub id: DocumentId,
    pub selected: bool,
    /// Upper-cased document code, empty when absent
    pub code: String,
    /// Title-cased title, empty when absent
    pub title: String,
    pub status: Label,
    pub creator: String,
    /// `dd/MM/yyyy`, empty when absent
    pub validity: String,
    /// Omitted when the document has no critical-analysis date
    pub critical_analysis: Option<Label>,
    pub target: String,
}

impl DocumentRow {
    #[must_use]
    pub fn build(
        document: &Document,
        selected: bool,
        statuses: &StatusTable,
        classifier: &CriticalAnalysisClassifier,
    ) -> Self {
        Self {
            id: document.id,
            selected,
            code: document.code_str().map(str::to_uppercase).unwrap_or_default(),
            title: document.title.as_deref().map(title_case).unwrap_or_default(),
            status: statuses.label(document.status),
            creator: document.creator_name().unwrap_or_default().to_string(),
            validity: document.validity_date.map(format_date).unwrap_or_default(),
            critical_analysis: classifier
                .stage_for(document.last_critical_analysis)
                .as_ref()
                .map(CriticalAnalysisStage::label),
            target: document.navigation_target(),
        }
    }
}
