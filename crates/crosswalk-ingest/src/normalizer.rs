//! Vocabulary normalization into canonical records.

use std::collections::BTreeMap;

use crosswalk_model::{ConceptRecord, SourceSystem};
use tracing::debug;

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};
use crate::layout::{CANONICAL_HEADERS, ResolvedColumns, VocabularyLayout};

/// Records normalized from one vocabulary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVocabulary {
    pub system: SourceSystem,
    pub records: Vec<ConceptRecord>,
    /// Rows dropped because `code` or `term_english` was empty.
    pub skipped_rows: usize,
    /// Rows superseded by a later row with the same code.
    pub duplicate_rows: usize,
}

impl NormalizedVocabulary {
    pub fn empty(system: SourceSystem) -> Self {
        Self {
            system,
            records: Vec::new(),
            skipped_rows: 0,
            duplicate_rows: 0,
        }
    }
}

/// Normalize a raw table laid out per `system`'s vocabulary layout.
///
/// Missing columns read as empty strings. Rows without a code or an English
/// term are skipped and counted. When a code repeats, the last row wins and
/// keeps its own position.
pub fn normalize_table(table: &CsvTable, system: SourceSystem) -> NormalizedVocabulary {
    let layout = VocabularyLayout::for_system(system);
    let columns = layout.resolve(table);
    let mut skipped_rows = 0usize;
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        match record_from_row(row, &columns, &layout) {
            Some(record) => records.push(record),
            None => skipped_rows += 1,
        }
    }

    let before = records.len();
    let records = keep_last_per_code(records);
    let duplicate_rows = before - records.len();
    debug!(
        source = %system,
        records = records.len(),
        skipped_rows,
        duplicate_rows,
        "normalized vocabulary table"
    );

    NormalizedVocabulary {
        system,
        records,
        skipped_rows,
        duplicate_rows,
    }
}

fn record_from_row(
    row: &[String],
    columns: &ResolvedColumns,
    layout: &VocabularyLayout,
) -> Option<ConceptRecord> {
    let code = ResolvedColumns::cell(row, columns.code);
    let term_english = ResolvedColumns::cell(row, columns.term_english);
    if code.is_empty() || term_english.is_empty() {
        return None;
    }
    let mut category = ResolvedColumns::cell(row, columns.category).to_string();
    if category.is_empty()
        && let Some(default) = layout.default_category
    {
        category = default.to_string();
    }
    Some(ConceptRecord {
        code: code.to_string(),
        term_original: ResolvedColumns::cell(row, columns.term_original).to_string(),
        term_english: term_english.to_string(),
        description: ResolvedColumns::cell(row, columns.description).to_string(),
        category,
        source_system: layout.system,
        target_code: ResolvedColumns::cell(row, columns.target_code).to_string(),
        target_term: ResolvedColumns::cell(row, columns.target_term).to_string(),
    })
}

fn keep_last_per_code(records: Vec<ConceptRecord>) -> Vec<ConceptRecord> {
    let mut last_index: BTreeMap<(SourceSystem, String), usize> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        last_index.insert((record.source_system, record.code.clone()), idx);
    }
    records
        .into_iter()
        .enumerate()
        .filter(|(idx, record)| {
            last_index.get(&(record.source_system, record.code.clone())) == Some(idx)
        })
        .map(|(_, record)| record)
        .collect()
}

/// Concatenate `existing` and `incoming`, keeping the last record per code.
pub fn merge_records(
    existing: Vec<ConceptRecord>,
    incoming: Vec<ConceptRecord>,
) -> Vec<ConceptRecord> {
    let mut combined = existing;
    combined.extend(incoming);
    keep_last_per_code(combined)
}

/// Merge normalized vocabularies into one corpus.
///
/// The result is ordered by vocabulary (Ayurveda, Siddha, Unani) regardless of
/// input order. Two inputs for the same vocabulary merge with last-write-wins.
pub fn merge_vocabularies(
    vocabularies: impl IntoIterator<Item = NormalizedVocabulary>,
) -> Vec<ConceptRecord> {
    let mut by_system: BTreeMap<SourceSystem, Vec<ConceptRecord>> = BTreeMap::new();
    for vocabulary in vocabularies {
        let slot = by_system.entry(vocabulary.system).or_default();
        let existing = std::mem::take(slot);
        *slot = merge_records(existing, vocabulary.records);
    }
    by_system.into_values().flatten().collect()
}

/// Check that an upload in the canonical layout has every canonical column.
pub fn validate_canonical_table(table: &CsvTable) -> Result<()> {
    let missing: Vec<String> = CANONICAL_HEADERS
        .iter()
        .filter(|header| table.column_index(header).is_none())
        .map(|header| (*header).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns { columns: missing })
    }
}
