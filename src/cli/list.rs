//! `list` command: one page of documents.

use super::output::{write_json, Cell, OutputFormat, Table};
use crate::api::{DocumentFilter, DocumentSource, DocumentStore, ExportTransport};
use crate::config::AppConfig;
use crate::listing::{DocumentRow, Pagination};
use crate::review::Clock;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Arguments of the `list` command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// One-based page number
    pub page: usize,
    /// Overrides the configured rows per page
    pub rows_per_page: Option<usize>,
    pub filter: DocumentFilter,
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    pagination: &'a Pagination,
    page_count: usize,
    rows: Vec<DocumentRow>,
}

/// Run the list command
pub fn run_list<C>(
    client: &C,
    config: &AppConfig,
    clock: impl Clock + 'static,
    options: &ListOptions,
    out: &mut dyn Write,
) -> Result<()>
where
    C: DocumentSource + DocumentStore + ExportTransport,
{
    let mut listing = super::build_listing(client, config, clock)?;
    if let Some(rows) = options.rows_per_page {
        listing.set_rows_per_page(rows)?;
    }
    listing.set_filter(options.filter.clone());
    listing.set_page(options.page.saturating_sub(1));
    listing.load()?;

    let rows = listing.rows();
    let pagination = listing.pagination();

    match options.format {
        OutputFormat::Json => write_json(
            &ListOutput {
                pagination,
                page_count: pagination.page_count(),
                rows,
            },
            out,
        ),
        OutputFormat::Table => {
            if let Some(message) = listing.empty_message() {
                writeln!(out, "{message}")?;
                return Ok(());
            }

            write!(out, "{}", rows_table(&rows).render(options.color))?;
            let (first, last) = pagination.row_range(rows.len()).unwrap_or((0, 0));
            writeln!(
                out,
                "\nRows {first}-{last} of {} (page {} of {})",
                pagination.total(),
                pagination.page() + 1,
                pagination.page_count()
            )?;
            Ok(())
        }
    }
}

fn rows_table(rows: &[DocumentRow]) -> Table {
    let mut table = Table::new([
        "Id",
        "Code",
        "Title",
        "Status",
        "Creator",
        "Valid until",
        "Critical analysis",
    ]);
    for row in rows {
        table.push(vec![
            Cell::plain(row.id.to_string()),
            Cell::plain(row.code.as_str()),
            Cell::plain(row.title.as_str()),
            Cell::badge(&row.status),
            Cell::plain(row.creator.as_str()),
            Cell::plain(row.validity.as_str()),
            row.critical_analysis
                .as_ref()
                .map_or_else(|| Cell::plain(""), Cell::badge),
        ]);
    }
    table
}
