//! Admin API access.
//!
//! The view-models talk to the server only through the traits in this module,
//! so they can be driven by in-memory fakes. [`AdminClient`] is the HTTP
//! implementation of all three.

mod client;
mod traits;
mod types;

pub use client::{AdminClient, AdminClientConfig, Endpoints};
pub use traits::{DocumentSource, DocumentStore, ExportTransport};
pub use types::{DocumentFilter, DocumentQuery, ExportRequest, SelectionPayload};
