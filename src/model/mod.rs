//! Data model for the document-control and calibration dashboard.
//!
//! Field names follow the admin API's JSON (`codigo`, `titulo`, `revisoes`, ...)
//! through serde renames; every field the server may omit or null out is an
//! explicit `Option` with a documented fallback.

mod dates;
mod document;
mod instrument;
mod label;
mod summary;

pub use dates::{lenient_date, lenient_text, parse_date, WIRE_DATE_FORMAT};
pub use document::*;
pub use instrument::*;
pub use label::*;
pub use summary::*;
