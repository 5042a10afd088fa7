//! CLI command handlers.
//!
//! Handlers are invoked by `main.rs` and write to a caller-supplied writer so
//! they can be tested against in-memory transports.

mod create;
mod dashboard;
mod delete;
mod export;
mod list;
mod output;
mod stage;

pub use create::run_create;
pub use dashboard::{load_listed, run_dashboard, DashboardOptions};
pub use delete::run_delete;
pub use export::{run_export, ExportOptions};
pub use list::{run_list, ListOptions};
pub use output::{
    paint, should_use_color, write_json, write_output, Cell, OutputFormat, OutputTarget, Table,
};
pub use stage::run_stage;

use crate::api::{DocumentSource, DocumentStore, ExportTransport};
use crate::config::AppConfig;
use crate::listing::DocumentListing;
use crate::model::{parse_date, DocumentStatus};
use crate::review::{Clock, CriticalAnalysisClassifier};
use chrono::NaiveDate;

/// Listing configured from `config`, backed by `client`.
pub fn build_listing<'a, C>(
    client: &'a C,
    config: &AppConfig,
    clock: impl Clock + 'static,
) -> anyhow::Result<DocumentListing<'a>>
where
    C: DocumentSource + DocumentStore + ExportTransport,
{
    let classifier =
        CriticalAnalysisClassifier::new(config.review.critical_analysis.clone(), clock);
    let listing = DocumentListing::new(client, classifier)
        .with_statuses(config.statuses.clone())
        .with_rows_per_page(config.listing.rows_per_page)?;
    Ok(listing)
}

/// Clap value parser for dates (`YYYY-MM-DD` or RFC 3339).
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

/// Clap value parser for status codes.
pub fn parse_status_arg(raw: &str) -> Result<DocumentStatus, String> {
    DocumentStatus::from_code(raw).ok_or_else(|| {
        let codes: Vec<&str> = DocumentStatus::ALL.iter().map(|s| s.code()).collect();
        format!("unknown status '{raw}', expected one of: {}", codes.join(", "))
    })
}
