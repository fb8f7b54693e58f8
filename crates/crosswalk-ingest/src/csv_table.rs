//! Raw CSV tables with normalized headers and cells.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A raw table: one header row followed by data rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| pad_row(row.iter().map(|v| normalize_cell(v)).collect(), width))
            .collect();
        Self { headers, rows }
    }

    /// Index of the first header equal to `name`, ignoring ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::csv(path, e))?;
    collect_table(reader, path)
}

/// Read a table from any byte source. `origin` names the source in errors.
pub fn read_csv_from_reader<R: Read>(input: R, origin: &str) -> Result<CsvTable> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    collect_table(reader, Path::new(origin))
}

fn collect_table<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<CsvTable> {
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|v| normalize_header(v)).collect();
    let width = headers.len();
    let rows = rows.map(|row| pad_row(row, width)).collect();
    Ok(CsvTable { headers, rows })
}
