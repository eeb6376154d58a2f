//! CSV export

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Path of the CSV file for a base name (without extension) in `dir`
pub fn csv_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.csv", name))
}

/// Write rows as CSV, one row per line
///
/// Rows may have different lengths. An empty row is written as an empty line
/// rather than a quoted empty field, so runs of records between blank rows go
/// through their own csv writer and the blank lines go straight to `writer`.
pub fn write_rows<W: Write>(mut writer: W, rows: &[Vec<String>]) -> Result<(), ExportError> {
    for (i, records) in rows.split(Vec::is_empty).enumerate() {
        if i > 0 {
            writer.write_all(b"\n")?;
        }
        if records.is_empty() {
            continue;
        }

        let mut csv = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut writer);
        for record in records {
            csv.write_record(record)?;
        }
        csv.flush()?;
    }

    writer.flush()?;
    Ok(())
}

/// Write rows to `<dir>/<name>.csv`, returning the path written
pub fn export_csv(dir: &Path, name: &str, rows: &[Vec<String>]) -> Result<PathBuf, ExportError> {
    let path = csv_path(dir, name);
    let file = File::create(&path)?;
    write_rows(file, rows)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "exported csv");
    Ok(path)
}
