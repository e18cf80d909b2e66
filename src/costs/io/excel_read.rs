use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::costs::error::{CostError, Result};
use crate::costs::io::RawTable;

/// Reads the first worksheet of a workbook. The first row is the header;
/// fully blank rows are skipped.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            CostError::InvalidWorkbook(format!("{} has no worksheets", path.display()))
        })?;
    let range = sheet_range(&mut workbook, &sheet)?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(cell_text).collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok(RawTable { headers, rows })
}

fn sheet_range<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    match workbook.worksheet_range(name) {
        Some(range) => Ok(range?),
        None => Err(CostError::InvalidWorkbook(format!(
            "worksheet '{name}' listed but not readable"
        ))),
    }
}

/// Whole numbers stored as floats come back without a fractional part, so
/// `150.0` reads as `150`.
fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
