//! Loading of cost datasets from delimited text or workbook files.

pub mod csv_read;
pub mod excel_read;
pub mod excel_write;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, error, info, instrument};

use crate::costs::config::ColumnNormalization;
use crate::costs::error::{CostError, Result};
use crate::costs::model::{
    BATTERY_COST, CPU_COST, CostRecord, DEFECTIVE, Dataset, DatasetKind, ISN, NETWORK_CARD_COST,
    PRODUCT_TYPE, TOTAL_COST,
};

/// Header row plus cell text, as read from a source file before any typing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Source formats recognised by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,
    Workbook,
}

/// Picks the reader from the file extension. Unknown extensions are read as
/// delimited text.
pub fn detect_format(path: &Path) -> InputFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => InputFormat::Workbook,
        _ => InputFormat::Delimited,
    }
}

/// Loads and validates one dataset.
#[instrument(level = "info", skip_all, fields(path = %path.display(), kind = %kind))]
pub fn load_dataset(
    path: &Path,
    kind: DatasetKind,
    columns: &ColumnNormalization,
) -> Result<Dataset> {
    let result = read_and_build(path, kind, columns);
    if let Err(err) = &result {
        error!(path = %path.display(), %kind, error = %err, "failed to load dataset");
    }
    result
}

fn read_and_build(
    path: &Path,
    kind: DatasetKind,
    columns: &ColumnNormalization,
) -> Result<Dataset> {
    if !path.is_file() {
        return Err(CostError::MissingInput(path.to_path_buf()));
    }

    let table = match detect_format(path) {
        InputFormat::Delimited => csv_read::read_table(path)?,
        InputFormat::Workbook => excel_read::read_table(path)?,
    };
    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "raw table read"
    );

    let dataset = build_dataset(path, kind, table, columns)?;
    info!(records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Normalises headers, checks the schema and types every row.
pub fn build_dataset(
    path: &Path,
    kind: DatasetKind,
    table: RawTable,
    columns: &ColumnNormalization,
) -> Result<Dataset> {
    let headers: Vec<String> = table
        .headers
        .iter()
        .map(|raw| columns.canonical(raw))
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    for (position, name) in headers.iter().enumerate() {
        index.entry(name.as_str()).or_insert(position);
    }

    let missing: Vec<String> = kind
        .required_columns()
        .iter()
        .filter(|name| !index.contains_key(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        debug!(found = ?headers, "header row");
        return Err(CostError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }

    if table.rows.is_empty() {
        return Err(CostError::EmptyInput(path.to_path_buf()));
    }

    let reader = RowReader { path, index: &index };
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(table.rows.len());

    for (offset, cells) in table.rows.iter().enumerate() {
        // 1-based, counting the header as row 1.
        let row = offset + 2;
        let isn = reader.text(cells, row, ISN)?;
        if !seen.insert(isn.clone()) {
            return Err(CostError::DuplicateIsn {
                path: path.to_path_buf(),
                isn,
            });
        }

        let battery_cost = if kind.has_battery_cost() {
            Some(reader.integer(cells, row, BATTERY_COST)?)
        } else {
            None
        };

        records.push(CostRecord {
            product_type: reader.cell(cells, PRODUCT_TYPE).to_string(),
            isn,
            defective: reader.flag(cells, row)?,
            cpu_cost: reader.integer(cells, row, CPU_COST)?,
            network_card_cost: reader.integer(cells, row, NETWORK_CARD_COST)?,
            battery_cost,
            total_cost: reader.integer(cells, row, TOTAL_COST)?,
        });
    }

    Ok(Dataset::new(kind, path, records))
}

struct RowReader<'a> {
    path: &'a Path,
    index: &'a HashMap<&'a str, usize>,
}

impl RowReader<'_> {
    fn cell<'c>(&self, cells: &'c [String], column: &str) -> &'c str {
        self.index
            .get(column)
            .and_then(|position| cells.get(*position))
            .map(|value| value.trim())
            .unwrap_or("")
    }

    fn text(&self, cells: &[String], row: usize, column: &str) -> Result<String> {
        let value = self.cell(cells, column);
        if value.is_empty() {
            return Err(CostError::InvalidValue {
                path: self.path.to_path_buf(),
                row,
                column: column.to_string(),
            });
        }
        Ok(value.to_string())
    }

    fn integer(&self, cells: &[String], row: usize, column: &str) -> Result<i64> {
        let value = self.cell(cells, column);
        parse_integer(value).ok_or_else(|| CostError::InvalidNumber {
            path: self.path.to_path_buf(),
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    fn flag(&self, cells: &[String], row: usize) -> Result<bool> {
        let value = self.cell(cells, DEFECTIVE);
        parse_flag(value).ok_or_else(|| CostError::InvalidFlag {
            path: self.path.to_path_buf(),
            row,
            value: value.to_string(),
        })
    }
}

/// Accepts plain integers and integral decimals such as `150.0`, which is how
/// workbook cells surface whole numbers.
pub fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    let (whole, fraction) = value.split_once('.')?;
    if whole.is_empty() || fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    whole.parse::<i64>().ok()
}

/// Reads the defective flag. Accepts `true/false`, `yes/no`, `y/n` and `1/0`
/// in any case.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
