//! CSV and XLSX writers for extracted records.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::OutputError;
use crate::models::{OutputConfig, Record, COLUMNS};

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Files written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// The CSV file.
    pub csv: PathBuf,
    /// The XLSX file, unless disabled.
    pub xlsx: Option<PathBuf>,
}

/// Write `<stem>.csv` and (optionally) `<stem>.xlsx` into `dir`.
pub fn write_outputs(
    dir: &Path,
    stem: &str,
    records: &[Record],
    config: &OutputConfig,
) -> Result<WrittenFiles, OutputError> {
    let csv_path = dir.join(format!("{}.csv", stem));
    write_csv(&csv_path, records, config.write_csv_bom)?;

    let xlsx = if config.write_xlsx {
        let xlsx_path = dir.join(format!("{}.xlsx", stem));
        write_xlsx(&xlsx_path, records)?;
        Some(xlsx_path)
    } else {
        None
    };

    Ok(WrittenFiles { csv: csv_path, xlsx })
}

/// Write records as comma-separated values with a header row.
pub fn write_csv(path: &Path, records: &[Record], bom: bool) -> Result<(), OutputError> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }

    let mut file = File::create(path)?;
    if bom {
        file.write_all(UTF8_BOM)?;
    }

    let mut wtr = csv::Writer::from_writer(file);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Write records to a single-sheet workbook with a bold header row.
pub fn write_xlsx(path: &Path, records: &[Record]) -> Result<(), OutputError> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &record.company)?;
        worksheet.write_string(row, 1, &record.emission_code)?;
        worksheet.write_number(row, 2, record.total_shares as f64)?;
        worksheet.write_number(row, 3, record.free_float as f64)?;
        worksheet.write_number(row, 4, record.shareholders as f64)?;
    }

    workbook.save(path)?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
