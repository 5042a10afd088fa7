//! `delete` command: bulk delete documents.

use crate::api::DocumentStore;
use crate::model::DocumentId;
use crate::selection::SelectionSet;
use anyhow::{bail, Context, Result};
use std::io::Write;

/// Run the delete command
pub fn run_delete<S: DocumentStore>(
    store: &S,
    ids: &[DocumentId],
    out: &mut dyn Write,
) -> Result<()> {
    let selection: SelectionSet = ids.iter().copied().collect();
    if selection.is_empty() {
        bail!("no documents given");
    }

    let ids = selection.ids();
    store
        .delete_documents(&ids)
        .with_context(|| format!("failed to delete {} documents", ids.len()))?;

    tracing::info!("Deleted {} documents", ids.len());
    writeln!(out, "Deleted {} documents", ids.len())?;
    Ok(())
}
