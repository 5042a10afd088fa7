//! Display formatting shared by the listing, dashboard and CLI.

use chrono::NaiveDate;

/// Long date, `dd/MM/yyyy`.
pub const DATE_LONG: &str = "%d/%m/%Y";

/// Short date, `dd/MM/yy`.
pub const DATE_SHORT: &str = "%d/%m/%y";

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LONG).to_string()
}

#[must_use]
pub fn format_date_short(date: NaiveDate) -> String {
    date.format(DATE_SHORT).to_string()
}

/// Capitalize the first letter of every whitespace-separated word and
/// lowercase the rest. Runs of whitespace collapse to one space.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
