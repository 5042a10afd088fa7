//! `create` command: register a new document.

use crate::api::DocumentStore;
use crate::model::NewDocument;
use anyhow::{bail, Context, Result};
use std::io::Write;

/// Run the create command
pub fn run_create<S: DocumentStore>(
    store: &S,
    document: &NewDocument,
    out: &mut dyn Write,
) -> Result<()> {
    let missing = document.missing_fields();
    if !missing.is_empty() {
        bail!("missing {}", missing.join(", "));
    }

    store
        .create_document(document)
        .with_context(|| format!("failed to create document {}", document.code))?;

    writeln!(out, "Document {} created", document.code)?;
    Ok(())
}
