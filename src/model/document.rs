//! Documents, revisions and listing pages as returned by the admin API.

use super::dates::{lenient_date, lenient_text};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned document identifier.
pub type DocumentId = u64;

/// Server-assigned revision identifier.
pub type RevisionId = u64;

/// Revision id used in navigation links when a document has no revision yet.
pub const NO_REVISION: RevisionId = 0;

/// Lifecycle status of a document.
///
/// Unrecognized server codes map to [`DocumentStatus::Unknown`] so a new code
/// on the server never breaks the listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum DocumentStatus {
    /// Being written
    #[serde(rename = "elaboracao")]
    Drafting,
    /// Under review
    #[serde(rename = "revisao")]
    Review,
    /// Waiting for approval
    #[serde(rename = "aprovacao")]
    Approval,
    /// Approved and in force
    #[serde(rename = "disponivel")]
    Available,
    /// Superseded or withdrawn
    #[serde(rename = "obsoleto")]
    Obsolete,
    #[default]
    #[serde(other, rename = "desconhecido")]
    Unknown,
}

impl DocumentStatus {
    /// All known statuses, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Drafting,
        Self::Review,
        Self::Approval,
        Self::Available,
        Self::Obsolete,
        Self::Unknown,
    ];

    /// Wire code sent to and received from the server.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Drafting => "elaboracao",
            Self::Review => "revisao",
            Self::Approval => "aprovacao",
            Self::Available => "disponivel",
            Self::Obsolete => "obsoleto",
            Self::Unknown => "desconhecido",
        }
    }

    /// Parse a wire code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Document code wrapper (`{"codigo": "PQ-001"}` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentCode {
    #[serde(rename = "codigo", default, with = "lenient_text")]
    pub code: Option<String>,
}

/// Author of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub username: Option<String>,
}

/// A versioned change record attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: RevisionId,
    /// Owning document; omitted by the server when nested inside the document
    #[serde(rename = "documento", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    #[serde(rename = "alteracao", default)]
    pub change_description: Option<String>,
}

/// A controlled document.
///
/// `revisions` is ordered by creation with the current revision first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(rename = "codigo", default)]
    pub code: Option<DocumentCode>,
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(rename = "criador", default)]
    pub creator: Option<Creator>,
    #[serde(rename = "data_validade", default, with = "lenient_date")]
    pub validity_date: Option<NaiveDate>,
    #[serde(rename = "analise_critica", default, with = "lenient_date")]
    pub last_critical_analysis: Option<NaiveDate>,
    #[serde(rename = "revisoes", default)]
    pub revisions: Vec<Revision>,
}

impl Document {
    /// Create a document with only an id and status; everything else absent.
    #[must_use]
    pub const fn new(id: DocumentId, status: DocumentStatus) -> Self {
        Self {
            id,
            code: None,
            title: None,
            status,
            creator: None,
            validity_date: None,
            last_critical_analysis: None,
            revisions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(DocumentCode {
            code: Some(code.into()),
        });
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_creator(mut self, username: impl Into<String>) -> Self {
        self.creator = Some(Creator {
            username: Some(username.into()),
        });
        self
    }

    #[must_use]
    pub const fn with_validity_date(mut self, date: NaiveDate) -> Self {
        self.validity_date = Some(date);
        self
    }

    #[must_use]
    pub const fn with_last_critical_analysis(mut self, date: NaiveDate) -> Self {
        self.last_critical_analysis = Some(date);
        self
    }

    #[must_use]
    pub fn with_revision(mut self, id: RevisionId, change: impl Into<String>) -> Self {
        self.revisions.push(Revision {
            id,
            document_id: Some(self.id),
            change_description: Some(change.into()),
        });
        self
    }

    /// Document code, if the server sent one.
    #[must_use]
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(|c| c.code.as_deref())
    }

    /// Username of the creator, if known.
    #[must_use]
    pub fn creator_name(&self) -> Option<&str> {
        self.creator.as_ref().and_then(|c| c.username.as_deref())
    }

    /// The revision used for navigation (first in the list).
    #[must_use]
    pub fn current_revision(&self) -> Option<&Revision> {
        self.revisions.first()
    }

    /// Id of the current revision, or [`NO_REVISION`] when there is none yet.
    #[must_use]
    pub fn current_revision_id(&self) -> RevisionId {
        self.current_revision().map_or(NO_REVISION, |r| r.id)
    }

    /// Route opened when the row is activated.
    #[must_use]
    pub fn navigation_target(&self) -> String {
        document_route(self.id, self.current_revision_id())
    }
}

/// Admin route for a document at a given revision.
#[must_use]
pub fn document_route(document_id: DocumentId, revision_id: RevisionId) -> String {
    format!("/admin/documento/{document_id}/{revision_id}")
}

/// One page of the server-side document collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub results: Vec<Document>,
    /// Total number of documents across all pages
    #[serde(default)]
    pub count: u64,
}

impl DocumentPage {
    #[must_use]
    pub fn new(results: Vec<Document>, count: u64) -> Self {
        Self { results, count }
    }

    /// Ids of the documents on this page, in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<DocumentId> {
        self.results.iter().map(|d| d.id).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.results.iter().find(|d| d.id == id)
    }
}

/// Payload for the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<DocumentStatus>,
    #[serde(
        rename = "data_validade",
        skip_serializing_if = "Option::is_none",
        default,
        with = "lenient_date"
    )]
    pub validity_date: Option<NaiveDate>,
}

impl NewDocument {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            status: None,
            validity_date: None,
        }
    }

    /// Returns a description of each missing required field.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.code.trim().is_empty() {
            missing.push("codigo");
        }
        if self.title.trim().is_empty() {
            missing.push("titulo");
        }
        missing
    }
}
