//! `export` command: request a server-rendered export of selected documents.

use super::output::{write_output, Cell, OutputTarget, Table};
use crate::api::{DocumentSource, DocumentStore, ExportTransport};
use crate::config::AppConfig;
use crate::export::{ExportArtifact, ExportCoordinator};
use crate::model::DocumentId;
use crate::review::Clock;
use crate::selection::SelectionSet;
use anyhow::{bail, Result};
use std::io::Write;
use std::path::PathBuf;

/// Arguments of the `export` command.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Explicit document ids
    pub ids: Vec<DocumentId>,
    /// Export every document on this one-based page instead of `ids`
    pub all_on_page: Option<usize>,
    /// Write the artifact to this file
    pub output: Option<PathBuf>,
    /// Save the artifact under a timestamped name in this directory
    pub dir: Option<PathBuf>,
    /// Print the parsed CSV as a table instead of the raw content
    pub preview: bool,
}

/// Run the export command
pub fn run_export<C>(
    client: &C,
    config: &AppConfig,
    clock: impl Clock + 'static,
    options: &ExportOptions,
    out: &mut dyn Write,
) -> Result<()>
where
    C: DocumentSource + DocumentStore + ExportTransport,
{
    let artifact = if let Some(page) = options.all_on_page {
        export_page(client, config, clock, page)?
    } else if options.ids.is_empty() {
        bail!("nothing selected: pass document ids or --all-on-page");
    } else {
        let selection: SelectionSet = options.ids.iter().copied().collect();
        let mut coordinator = ExportCoordinator::new(client);
        coordinator.request_export(&selection)?.clone()
    };

    deliver(&artifact, config, options, out)
}

fn export_page<C>(
    client: &C,
    config: &AppConfig,
    clock: impl Clock + 'static,
    page: usize,
) -> Result<ExportArtifact>
where
    C: DocumentSource + DocumentStore + ExportTransport,
{
    let mut listing = super::build_listing(client, config, clock)?;
    listing.set_page(page.saturating_sub(1));
    listing.load()?;
    listing.select_all(true);

    if !listing.can_export() {
        bail!("page {page} has no documents to export");
    }
    Ok(listing.export()?.clone())
}

fn deliver(
    artifact: &ExportArtifact,
    config: &AppConfig,
    options: &ExportOptions,
    out: &mut dyn Write,
) -> Result<()> {
    if options.preview {
        let preview = artifact.preview()?;
        let mut table = Table::new(preview.header.iter().map(String::as_str));
        for row in &preview.rows {
            table.push(row.iter().map(Cell::plain).collect());
        }
        write!(out, "{}", table.render(false))?;
        writeln!(out, "\n{} rows", preview.row_count())?;
        return Ok(());
    }

    if let Some(path) = &options.output {
        artifact.write_to(path)?;
        writeln!(out, "Export written to {}", path.display())?;
        return Ok(());
    }

    if let Some(dir) = options.dir.as_ref().or(config.export.output_dir.as_ref()) {
        let path = artifact.save_to(dir, &config.export.file_prefix)?;
        writeln!(out, "Export saved to {}", path.display())?;
        return Ok(());
    }

    write_output(artifact.content(), &OutputTarget::Stdout, out)
}
