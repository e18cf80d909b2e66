use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, instrument, warn};

use crate::costs::error::{CostError, Result};
use crate::costs::report::{ReportData, ReportValue};

/// Writes the report to `path`, creating the destination directory when it
/// does not exist. The workbook is staged in a sibling file and renamed into
/// place, so a failed write never leaves a partial report behind. Failures to
/// create the directory or to place the file are reported as
/// [`CostError::Directory`] carrying the offending path.
#[instrument(
    level = "info",
    skip_all,
    fields(path = %path.display(), sections = report.sections.len())
)]
pub fn write_report(path: &Path, report: &ReportData) -> Result<()> {
    let buffer = render(report)?;
    prepare_directory(path)?;

    let staging = staging_path(path);
    debug!(staging = %staging.display(), bytes = buffer.len(), "workbook rendered");

    if let Err(error) = fs::write(&staging, &buffer).and_then(|_| fs::rename(&staging, path)) {
        if staging.exists() {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(
                    staging = %staging.display(),
                    error = %cleanup,
                    "could not remove staging file"
                );
            }
        }
        return Err(CostError::Directory {
            path: path.to_path_buf(),
            source: error,
        });
    }
    Ok(())
}

fn prepare_directory(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }
    debug!(directory = %parent.display(), "creating output directory");
    fs::create_dir_all(parent).map_err(|source| CostError::Directory {
        path: parent.to_path_buf(),
        source,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.xlsx".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Renders the report into an in-memory XLSX document.
pub fn render(report: &ReportData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let decimal_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&report.sheet_name)?;
    worksheet.set_column_width(0, 32.0)?;
    worksheet.set_column_width(1, 14.0)?;

    for (section, start) in report.sections.iter().zip(report.section_starts()) {
        for (col_idx, header) in section.headers.iter().enumerate() {
            worksheet.write_string_with_format(start, col_idx as u16, header, &header_format)?;
        }

        for (row_idx, row) in section.rows.iter().enumerate() {
            let row_num = start + 1 + row_idx as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = col_idx as u16;
                match cell {
                    ReportValue::Text(value) => {
                        worksheet.write_string(row_num, col_num, value)?;
                    }
                    ReportValue::Integer(value) => {
                        worksheet.write_number(row_num, col_num, *value as f64)?;
                    }
                    ReportValue::Decimal(value) => {
                        worksheet.write_number_with_format(
                            row_num,
                            col_num,
                            *value,
                            &decimal_format,
                        )?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
