use crate::args::ExportArgs;
use crate::commands::{plural, Out};
use crate::export::write_export;
use crate::store::Ledger;
use crate::{Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Writes the records of one kind, newest first, to `<kind>-<today>.csv`.
///
/// The directory and quoting style come from `args` when given and from the config otherwise.
///
/// # Errors
/// - Returns an error wrapping `LedgerError::EmptyInput` when the kind has no records. No file is
///   written in that case.
/// - Returns an error if the file cannot be written.
pub fn export(
    ledger: &Ledger,
    config: &Config,
    args: &ExportArgs,
    today: NaiveDate,
) -> Result<Out<PathBuf>> {
    let kind = args.kind();
    let dir = args
        .dir()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| config.export_dir());
    let style = args.style().unwrap_or_else(|| config.export_style());
    let records = ledger.list(kind);

    let path = write_export(&dir, kind, &records, style, today)
        .with_context(|| format!("Unable to export {kind}"))?;
    let message = format!(
        "Exported {} to {}",
        plural(records.len(), "record", "records"),
        path.display()
    );
    Ok(Out::new(message, path))
}
