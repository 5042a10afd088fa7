//! **Document review, selection and export core for the Kometro quality dashboard.**
//!
//! `kometro-docs` holds the logic behind the document-control pages of an
//! ISO-style quality management system: a paginated document listing with
//! multi-selection, bulk delete and CSV export, critical-analysis staging of
//! documents by months elapsed, and dashboard summary cards for revisions
//! awaiting approval and instrument calibration.
//!
//! ## Modules
//!
//! - **[`model`]**: Documents, instruments and dashboard items as the admin API
//!   sends them.
//! - **[`review`]**: [`CriticalAnalysisClassifier`] maps the months since a
//!   document's last critical analysis to a severity color.
//! - **[`selection`]**: [`SelectionSet`], the ordered set of selected document ids.
//! - **[`export`]**: [`ExportCoordinator`] requests a server-rendered CSV and
//!   keeps the resulting [`ExportArtifact`].
//! - **[`listing`]**: [`DocumentListing`], the listing view-model tying
//!   pagination, filters, selection, export and bulk actions together.
//! - **[`dashboard`]**: Summary cards.
//! - **[`api`]**: Traits the view-models use to reach the server, and
//!   [`AdminClient`], their HTTP implementation.
//!
//! ## Classifying a critical analysis
//!
//! ```
//! use chrono::NaiveDate;
//! use kometro_docs::model::LabelColor;
//! use kometro_docs::review::{CriticalAnalysisClassifier, FixedClock, StageThresholds};
//!
//! let clock = FixedClock::ymd(2025, 10, 1).unwrap();
//! let classifier = CriticalAnalysisClassifier::new(StageThresholds::default(), clock);
//!
//! let stage = classifier.stage(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! assert_eq!(stage.months_elapsed, 16);
//! assert_eq!(stage.color, LabelColor::Error);
//! ```
//!
//! ## Feature Flags
//!
//! - `http` (default): [`AdminClient`] talks to the server with `reqwest`.
//!   Without it every request fails with [`error::ApiErrorKind::Unavailable`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod listing;
pub mod model;
pub mod review;
pub mod selection;
pub mod utils;

// Re-export main types for convenience
pub use api::{AdminClient, DocumentSource, DocumentStore, ExportTransport};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use dashboard::DashboardCard;
pub use error::{ErrorContext, KometroError, Result};
pub use export::{ExportArtifact, ExportCoordinator};
pub use listing::{DocumentListing, StatusMessage};
pub use review::{CriticalAnalysisClassifier, StageThresholds};
pub use selection::{HeaderState, SelectionSet};
