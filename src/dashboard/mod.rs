//! Dashboard summary cards.
//!
//! Two cards share one shape: revisions waiting for approval, and instruments
//! with their calibration state. Each entry pairs a [`DashboardItem`] with the
//! badge shown next to it.

use crate::model::{
    DashboardItem, DocumentSummary, Instrument, InstrumentSummary, Label, LabelColor,
    PendingRevision,
};
use crate::review::{months_label, CriticalAnalysisClassifier};
use crate::utils::format_date_short;
use serde::Serialize;

/// Route of the full instruments list.
pub const INSTRUMENTS_ROUTE: &str = "/dashboard/instrumentos";

/// Which kind of item a card lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Revisions,
    Instruments,
}

impl CardKind {
    /// Message shown when the card has no entries.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Revisions => "No revisions to approve",
            Self::Instruments => "No instruments registered",
        }
    }

    /// "See all" link target; only instrument cards have one.
    #[must_use]
    pub const fn see_all_link(self) -> Option<&'static str> {
        match self {
            Self::Revisions => None,
            Self::Instruments => Some(INSTRUMENTS_ROUTE),
        }
    }
}

/// One line of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    pub item: DashboardItem,
    pub badge: Option<Label>,
}

impl CardEntry {
    #[must_use]
    pub fn title(&self) -> String {
        self.item.title()
    }

    #[must_use]
    pub fn subtitle(&self) -> String {
        self.item.subtitle()
    }

    /// Extra line under the subtitle (the client of a revision).
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match &self.item {
            DashboardItem::Document(doc) => doc.client_line(),
            DashboardItem::Instrument(_) => None,
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.item.url()
    }
}

/// A titled list of dashboard entries of one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCard {
    pub title: String,
    pub subheader: Option<String>,
    pub kind: CardKind,
    pub entries: Vec<CardEntry>,
}

impl DashboardCard {
    /// Card of revisions awaiting approval. Revisions without a document are
    /// skipped.
    pub fn revisions(
        title: impl Into<String>,
        pending: impl IntoIterator<Item = PendingRevision>,
        classifier: &CriticalAnalysisClassifier,
    ) -> Self {
        let entries = pending
            .into_iter()
            .filter_map(|revision| {
                let id = revision.id;
                let summary = DocumentSummary::from_pending(revision);
                if summary.is_none() {
                    tracing::debug!("Skipping pending revision {id} without a document");
                }
                summary
            })
            .map(|summary| CardEntry {
                badge: critical_analysis_badge(&summary, classifier),
                item: DashboardItem::Document(summary),
            })
            .collect();

        Self {
            title: title.into(),
            subheader: None,
            kind: CardKind::Revisions,
            entries,
        }
    }

    /// Card of instruments and their calibration state.
    pub fn instruments(
        title: impl Into<String>,
        instruments: impl IntoIterator<Item = Instrument>,
    ) -> Self {
        let entries = instruments
            .into_iter()
            .map(InstrumentSummary::from)
            .map(|summary| CardEntry {
                badge: Some(calibration_badge(&summary)),
                item: DashboardItem::Instrument(summary),
            })
            .collect();

        Self {
            title: title.into(),
            subheader: None,
            kind: CardKind::Instruments,
            entries,
        }
    }

    #[must_use]
    pub fn with_subheader(mut self, subheader: impl Into<String>) -> Self {
        self.subheader = Some(subheader.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty-state text, when the card has no entries.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then(|| self.kind.empty_message())
    }

    #[must_use]
    pub const fn see_all_link(&self) -> Option<&'static str> {
        self.kind.see_all_link()
    }
}

/// `"Critical analysis: N months"`, colored by stage. `None` without a date.
#[must_use]
pub fn critical_analysis_badge(
    summary: &DocumentSummary,
    classifier: &CriticalAnalysisClassifier,
) -> Option<Label> {
    classifier
        .stage_for(summary.last_critical_analysis)
        .map(|stage| {
            Label::new(
                format!("Critical analysis: {}", months_label(stage.months_elapsed)),
                stage.color,
            )
        })
}

/// Calibration badge: error and last calibration date when expired, success
/// and next calibration date otherwise.
#[must_use]
pub fn calibration_badge(summary: &InstrumentSummary) -> Label {
    let date = summary
        .calibration_date
        .map_or_else(|| "-".to_string(), format_date_short);

    if summary.is_expired {
        Label::new(format!("Last calibration {date}"), LabelColor::Error)
    } else {
        Label::new(format!("Next calibration {date}"), LabelColor::Success)
    }
}
