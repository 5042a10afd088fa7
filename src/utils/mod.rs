//! Shared utilities.

mod format;

pub use format::{format_date, format_date_short, title_case, DATE_LONG, DATE_SHORT};
