//! Output helpers shared by the command handlers.

use crate::model::{Label, LabelColor};
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Where output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

/// Write `content` to the target.
pub fn write_output(content: &str, target: &OutputTarget, out: &mut dyn Write) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Written to {}", path.display());
            Ok(())
        }
    }
}

/// Pretty JSON followed by a newline.
pub fn write_json<T: serde::Serialize>(value: &T, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

const fn ansi_code(color: LabelColor) -> &'static str {
    match color {
        LabelColor::Default => "37",
        LabelColor::Primary => "34",
        LabelColor::Secondary => "35",
        LabelColor::Info => "36",
        LabelColor::Success => "32",
        LabelColor::Warning => "33",
        LabelColor::Error => "31",
    }
}

/// Badge text, colored when `color` is set.
#[must_use]
pub fn paint(label: &Label, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", ansi_code(label.color), label.text)
    } else {
        label.text.clone()
    }
}

/// A cell: plain text plus an optional badge color for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    color: Option<LabelColor>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn badge(label: &Label) -> Self {
        Self {
            text: label.text.clone(),
            color: Some(label.color),
        }
    }
}

/// Plain-text table with columns aligned by display width.
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|i| {
                let header = self.header.get(i).map_or(0, |h| h.width());
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.text.width())
                    .max()
                    .unwrap_or(0)
                    .max(header)
            })
            .collect()
    }

    /// Render with two spaces between columns and no trailing padding.
    #[must_use]
    pub fn render(&self, color: bool) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<Cell> = self.header.iter().map(Cell::plain).collect();
        for row in std::iter::once(&header).chain(self.rows.iter()) {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    line.push_str("  ");
                }
                let text = match cell.color {
                    Some(c) if color => paint(&Label::new(cell.text.clone(), c), true),
                    _ => cell.text.clone(),
                };
                line.push_str(&text);
                if i + 1 < row.len() {
                    let pad = widths[i].saturating_sub(cell.text.width());
                    line.push_str(&" ".repeat(pad));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}
