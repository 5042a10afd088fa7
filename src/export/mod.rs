//! Export of selected documents.
//!
//! ```
//! use kometro_docs::export::CsvPreview;
//!
//! let preview = CsvPreview::parse("codigo,titulo\nPQ-01,Manual").unwrap();
//! assert_eq!(preview.header, vec!["codigo", "titulo"]);
//! assert_eq!(preview.row_count(), 1);
//! ```

mod coordinator;
mod preview;

pub use coordinator::{
    export_filename, Completion, ExportArtifact, ExportCoordinator, ExportTicket,
};
pub use preview::CsvPreview;
