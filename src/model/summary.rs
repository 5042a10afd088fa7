//! Dashboard summary items.
//!
//! The dashboard shows two kinds of rows: revisions awaiting approval and
//! instruments with their calibration state. Each is a distinct variant with
//! its own required fields instead of one record with optional fields and a
//! flag telling them apart.

use super::dates::lenient_date;
use super::document::{document_route, DocumentId, RevisionId};
use super::instrument::{Instrument, InstrumentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document reference embedded in a pending revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionDocument {
    pub id: DocumentId,
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "analise_critica", default, with = "lenient_date")]
    pub last_critical_analysis: Option<NaiveDate>,
}

/// Customer a revision was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientRef {
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
}

/// A revision waiting for approval, as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRevision {
    pub id: RevisionId,
    #[serde(rename = "alteracao", default)]
    pub change_description: Option<String>,
    #[serde(rename = "documento", default)]
    pub document: Option<RevisionDocument>,
    #[serde(rename = "cliente", default)]
    pub client: Option<ClientRef>,
}

/// Summary of a revision awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub revision_id: RevisionId,
    pub document_id: DocumentId,
    pub document_title: String,
    pub change_description: String,
    pub client: Option<ClientRef>,
    pub last_critical_analysis: Option<NaiveDate>,
}

impl DocumentSummary {
    /// Build from a server record; `None` when the revision has no document.
    #[must_use]
    pub fn from_pending(pending: PendingRevision) -> Option<Self> {
        let document = pending.document?;
        Some(Self {
            revision_id: pending.id,
            document_id: document.id,
            document_title: document.title.unwrap_or_default(),
            change_description: pending.change_description.unwrap_or_default(),
            client: pending.client,
            last_critical_analysis: document.last_critical_analysis,
        })
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Documento: {}", self.document_title)
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.change_description
    }

    /// `"{company} - {name}"`, present only when the revision has a client.
    #[must_use]
    pub fn client_line(&self) -> Option<String> {
        self.client.as_ref().map(|c| {
            format!(
                "{} - {}",
                c.company.as_deref().unwrap_or_default(),
                c.name.as_deref().unwrap_or_default()
            )
        })
    }

    #[must_use]
    pub fn url(&self) -> String {
        document_route(self.document_id, self.revision_id)
    }
}

/// Summary of an instrument's calibration state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentSummary {
    pub id: InstrumentId,
    pub tag: String,
    pub description: String,
    pub manufacturer: String,
    pub model: String,
    pub nominal_min: String,
    pub nominal_max: String,
    pub units: Vec<String>,
    pub calibration_date: Option<NaiveDate>,
    pub is_expired: bool,
}

impl InstrumentSummary {
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - {}", self.tag, self.description)
    }

    /// `"{manufacturer} | {model} | {min} - {max} {units}"`.
    #[must_use]
    pub fn subtitle(&self) -> String {
        let range = format!(
            "{} | {} | {} - {}",
            self.manufacturer, self.model, self.nominal_min, self.nominal_max
        );
        if self.units.is_empty() {
            range
        } else {
            format!("{range} {}", self.units.join(","))
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("/dashboard/instrumento/{}", self.id)
    }
}

impl From<Instrument> for InstrumentSummary {
    fn from(inst: Instrument) -> Self {
        Self {
            id: inst.id,
            tag: inst.tag.unwrap_or_default(),
            description: inst.description.unwrap_or_default(),
            manufacturer: inst.manufacturer.unwrap_or_default(),
            model: inst.model.unwrap_or_default(),
            nominal_min: inst.nominal_min.unwrap_or_default(),
            nominal_max: inst.nominal_max.unwrap_or_default(),
            units: inst.units.into_iter().map(|u| u.symbol).collect(),
            calibration_date: inst.calibration_date,
            is_expired: inst.is_expired,
        }
    }
}

/// A dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardItem {
    Document(DocumentSummary),
    Instrument(InstrumentSummary),
}

impl DashboardItem {
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Document(doc) => doc.title(),
            Self::Instrument(inst) => inst.title(),
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> String {
        match self {
            Self::Document(doc) => doc.subtitle().to_string(),
            Self::Instrument(inst) => inst.subtitle(),
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Document(doc) => doc.url(),
            Self::Instrument(inst) => inst.url(),
        }
    }

    /// Stable key for list rendering.
    #[must_use]
    pub const fn key(&self) -> u64 {
        match self {
            Self::Document(doc) => doc.revision_id,
            Self::Instrument(inst) => inst.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;

    fn instrument() -> Instrument {
        Instrument {
            tag: Some("TERM-02".to_string()),
            description: Some("Termômetro".to_string()),
            manufacturer: Some("Incoterm".to_string()),
            model: Some("T-100".to_string()),
            nominal_min: Some("-10".to_string()),
            nominal_max: Some("110".to_string()),
            units: vec![Unit {
                symbol: "°C".to_string(),
            }],
            ..Instrument::new(4)
        }
    }

    #[test]
    fn test_instrument_summary_text() {
        let item = DashboardItem::Instrument(instrument().into());
        assert_eq!(item.title(), "TERM-02 - Termômetro");
        assert_eq!(item.subtitle(), "Incoterm | T-100 | -10 - 110 °C");
        assert_eq!(item.url(), "/dashboard/instrumento/4");
        assert_eq!(item.key(), 4);
    }

    #[test]
    fn test_instrument_without_units_has_no_suffix() {
        let mut inst = instrument();
        inst.units.clear();
        let summary = InstrumentSummary::from(inst);
        assert_eq!(summary.subtitle(), "Incoterm | T-100 | -10 - 110");
    }

    #[test]
    fn test_document_summary_from_pending() {
        let json = r#"{
            "id": 31,
            "alteracao": "Inclusão do item 4.2",
            "documento": {"id": 8, "titulo": "Manual da qualidade", "analise_critica": "2025-01-10"},
            "cliente": {"empresa": "ACME", "nome": "João"}
        }"#;
        let pending: PendingRevision = serde_json::from_str(json).unwrap();
        let summary = DocumentSummary::from_pending(pending).unwrap();
        assert_eq!(summary.title(), "Documento: Manual da qualidade");
        assert_eq!(summary.subtitle(), "Inclusão do item 4.2");
        assert_eq!(summary.client_line().as_deref(), Some("ACME - João"));
        assert_eq!(summary.url(), "/admin/documento/8/31");
    }

    #[test]
    fn test_pending_without_document_is_skipped() {
        let pending: PendingRevision = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert!(DocumentSummary::from_pending(pending).is_none());
    }

    #[test]
    fn test_dashboard_item_serializes_tagged() {
        let item = DashboardItem::Instrument(instrument().into());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "instrument");
    }
}
