//! CSV export of a single collection.

use crate::error::LedgerError;
use crate::model::{Kind, Record};
use crate::{fs, Result};
use anyhow::Context;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const HEADERS: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// Controls how fields are quoted in exported files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ExportStyle {
    /// Default: the description is always wrapped in double quotes and nothing is escaped. A
    /// description that itself contains a double quote produces a malformed file.
    #[default]
    Compatible,
    /// Standard CSV: fields are quoted only when they need to be, and embedded quotes are doubled.
    Rfc4180,
}

serde_plain::derive_display_from_serialize!(ExportStyle);
serde_plain::derive_fromstr_from_deserialize!(ExportStyle);

/// Renders `records`, in the given order, as `Date,Description,Category,Amount` rows joined by
/// `\n` with no trailing newline, using the `Compatible` style.
///
/// # Errors
/// - `LedgerError::EmptyInput` if `records` is empty.
pub fn to_delimited_text(records: &[Record]) -> Result<String> {
    to_delimited_text_with(records, ExportStyle::Compatible)
}

/// Same as `to_delimited_text` with an explicit `style`.
pub fn to_delimited_text_with(records: &[Record], style: ExportStyle) -> Result<String> {
    if records.is_empty() {
        return Err(LedgerError::EmptyInput.into());
    }

    let mut builder = WriterBuilder::new();
    builder.terminator(Terminator::Any(b'\n'));
    if style == ExportStyle::Compatible {
        builder.quote_style(QuoteStyle::Never);
    }
    let mut writer = builder.from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for record in records {
        let description = match style {
            ExportStyle::Compatible => format!("\"{}\"", record.description()),
            ExportStyle::Rfc4180 => record.description().to_string(),
        };
        writer.write_record([
            record.date().to_string(),
            description,
            record.category().to_string(),
            record.amount().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV output: {e}"))?;
    let mut text = String::from_utf8(bytes).context("CSV output was not valid UTF-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// The file name an export of `kind` made on `date` gets, e.g. `expenses-2025-10-19.csv`.
pub fn export_file_name(kind: Kind, date: NaiveDate) -> String {
    format!("{kind}-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `records` of `kind` into `dir`, creating `dir` if needed, and returns the path written.
///
/// # Errors
/// - `LedgerError::EmptyInput` if `records` is empty. Nothing is written in that case.
/// - Any file system error.
pub fn write_export(
    dir: &Path,
    kind: Kind,
    records: &[Record],
    style: ExportStyle,
    date: NaiveDate,
) -> Result<PathBuf> {
    let text = to_delimited_text_with(records, style)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(kind, date));
    fs::write(&path, text)?;
    debug!("Wrote {} {kind} records to {}", records.len(), path.display());
    Ok(path)
}
