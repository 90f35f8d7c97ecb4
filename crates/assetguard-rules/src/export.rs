//! CSV export of scan results.
//!
//! One header row, then one row per violation: group label, category, asset
//! name, folder path. Fields are written verbatim; embedded commas are not
//! quoted.

use crate::error::GuardError;
use crate::report::Violation;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header row of the export.
pub const CSV_HEADER: &str = "ERROR NAME, ASSET TYPE, ASSET NAME, ASSET PATH";

/// Field separator.
pub const CSV_SEPARATOR: char = ',';

/// Formats one violation as a CSV row (without line terminator).
pub fn csv_row(violation: &Violation) -> String {
    [
        violation.group().label(),
        violation.category.name(),
        violation.asset_name.as_str(),
        violation.folder_path.as_str(),
    ]
    .join(&CSV_SEPARATOR.to_string())
}

/// Writes the header and one row per violation to `writer`.
pub fn write_csv<W: Write>(writer: &mut W, violations: &[Violation]) -> Result<(), GuardError> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for violation in violations {
        writeln!(writer, "{}", csv_row(violation))?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports `violations` to a CSV file at `path`, replacing any existing file.
///
/// Nothing is written when there are no violations; returns whether a file
/// was written.
pub fn export_csv(path: &Path, violations: &[Violation]) -> Result<bool, GuardError> {
    if violations.is_empty() {
        return Ok(false);
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(&mut writer, violations)?;
    tracing::info!("exported {} violation(s) to {}", violations.len(), path.display());
    Ok(true)
}
