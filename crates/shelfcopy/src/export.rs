// ABOUTME: CSV serialization of assembled records in the Goodreads export layout.
// ABOUTME: Writes a fixed header, one aligned row per record, to a date-stamped file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::ExportError;
use crate::fields::{header, Field};
use crate::record::Record;

/// File name of the export written on `date`: `goodreads_export-YYYYMMDD.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("goodreads_export-{}.csv", date.format("%Y%m%d"))
}

/// Writes the header and one row per record to `writer`.
///
/// Columns follow `fields`; absent values become empty cells, so every row has the
/// header's column count.
pub fn write_records<W: Write>(
    writer: W,
    records: &[Record],
    fields: &[Field],
) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new().flexible(false).from_writer(writer);

    csv.write_record(header(fields))?;
    for record in records {
        csv.write_record(fields.iter().map(|f| record.get(f.name).unwrap_or("")))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the dated export file into `dir`, replacing any file of the same name.
///
/// Returns the path of the written file.
pub fn export_to_dir(
    dir: &Path,
    records: &[Record],
    fields: &[Field],
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(date));
    let file = File::create(&path)?;
    write_records(file, records, fields)?;
    info!(path = %path.display(), records = records.len(), "export written");
    Ok(path)
}
