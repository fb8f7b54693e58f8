//! Writing vocabularies back to CSV.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crosswalk_model::{ConceptRecord, SourceSystem};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};
use crate::layout::{CANONICAL_HEADERS, VocabularyLayout};

const TARGET_CODE_HEADER: &str = CANONICAL_HEADERS[5];
const TARGET_TERM_HEADER: &str = CANONICAL_HEADERS[6];

fn create_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    csv::Writer::from_path(path).map_err(|e| IngestError::csv(path, e))
}

/// Write `records` in the canonical layout to `path`, replacing the file.
pub fn write_vocabulary_csv(path: &Path, records: &[ConceptRecord]) -> Result<()> {
    write_records(create_writer(path)?, records, path)
}

/// Write `records` in the canonical layout to any byte sink.
pub fn write_vocabulary<W: Write>(output: W, records: &[ConceptRecord]) -> Result<()> {
    write_records(csv::Writer::from_writer(output), records, Path::new("<writer>"))
}

fn write_records<W: Write>(
    mut writer: csv::Writer<W>,
    records: &[ConceptRecord],
    path: &Path,
) -> Result<()> {
    writer
        .write_record(CANONICAL_HEADERS)
        .map_err(|e| IngestError::csv(path, e))?;
    for record in records {
        writer
            .write_record([
                record.code.as_str(),
                record.term_original.as_str(),
                record.term_english.as_str(),
                record.description.as_str(),
                record.category.as_str(),
                record.target_code.as_str(),
                record.target_term.as_str(),
            ])
            .map_err(|e| IngestError::csv(path, e))?;
    }
    finish(writer, path)
}

/// Write a raw table, header row first.
pub fn write_table_csv(path: &Path, table: &CsvTable) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(&table.headers)
        .map_err(|e| IngestError::csv(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| IngestError::csv(path, e))?;
    }
    finish(writer, path)
}

fn finish<W: Write>(mut writer: csv::Writer<W>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy the targets of `records` into the matching rows of `table`.
///
/// Rows are matched on `system`'s code column. Target columns are appended
/// under the canonical headers when the table has none. Every other cell is
/// left as read. Returns the number of rows whose targets changed.
pub fn apply_targets(
    table: &mut CsvTable,
    system: SourceSystem,
    records: &[ConceptRecord],
) -> usize {
    let columns = VocabularyLayout::for_system(system).resolve(table);
    let Some(code_column) = columns.code else {
        return 0;
    };
    let target_code = columns
        .target_code
        .unwrap_or_else(|| push_column(table, TARGET_CODE_HEADER));
    let target_term = columns
        .target_term
        .unwrap_or_else(|| push_column(table, TARGET_TERM_HEADER));

    let by_code: HashMap<&str, &ConceptRecord> = records
        .iter()
        .filter(|record| record.source_system == system)
        .map(|record| (record.code.as_str(), record))
        .collect();

    let mut updated = 0usize;
    for row in &mut table.rows {
        let Some(record) = by_code.get(row[code_column].as_str()).copied() else {
            continue;
        };
        if row[target_code] != record.target_code || row[target_term] != record.target_term {
            row[target_code].clone_from(&record.target_code);
            row[target_term].clone_from(&record.target_term);
            updated += 1;
        }
    }
    updated
}

fn push_column(table: &mut CsvTable, header: &str) -> usize {
    table.headers.push(header.to_string());
    for row in &mut table.rows {
        row.push(String::new());
    }
    table.headers.len() - 1
}

/// Rewrite the vocabulary file at `path` with the targets of `records`.
///
/// Columns outside the canonical layout and rows that did not load survive
/// unchanged. Returns the number of rows whose targets changed.
pub fn update_vocabulary_targets(
    path: &Path,
    system: SourceSystem,
    records: &[ConceptRecord],
) -> Result<usize> {
    let mut table = read_csv_table(path)?;
    let updated = apply_targets(&mut table, system, records);
    write_table_csv(path, &table)?;
    Ok(updated)
}
