use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::costs::error::Result;
use crate::costs::io::RawTable;

/// Reads a comma-delimited file with a header row. Header text is kept
/// verbatim so column normalisation can see stray whitespace.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}
