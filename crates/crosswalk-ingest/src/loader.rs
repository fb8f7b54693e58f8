//! Loading every configured vocabulary from a resources directory.
//!
//! One vocabulary failing never stops the others: each gets its own outcome
//! and the corpus is built from whatever loaded.

use std::path::{Path, PathBuf};

use crosswalk_model::{ConceptRecord, SourceSystem};
use tracing::{info, warn};

use crate::csv_table::read_csv_table;
use crate::normalizer::{NormalizedVocabulary, merge_vocabularies, normalize_table};

/// What happened when loading one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyOutcome {
    Loaded {
        records: usize,
        skipped_rows: usize,
        duplicate_rows: usize,
    },
    /// No file for this vocabulary; it contributes zero records.
    Missing,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyLoad {
    pub system: SourceSystem,
    pub path: PathBuf,
    pub outcome: VocabularyOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub vocabularies: Vec<NormalizedVocabulary>,
    pub loads: Vec<VocabularyLoad>,
}

impl LoadReport {
    pub fn loaded_count(&self) -> usize {
        self.loads
            .iter()
            .filter(|load| matches!(load.outcome, VocabularyOutcome::Loaded { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &VocabularyLoad> {
        self.loads
            .iter()
            .filter(|load| matches!(load.outcome, VocabularyOutcome::Failed { .. }))
    }

    /// Merged corpus of every loaded vocabulary.
    pub fn corpus(&self) -> Vec<ConceptRecord> {
        merge_vocabularies(self.vocabularies.iter().cloned())
    }
}

pub fn vocabulary_path(dir: &Path, system: SourceSystem) -> PathBuf {
    dir.join(system.resource_file_name())
}

/// Load `systems` from their resource files under `dir`.
pub fn load_vocabularies(dir: &Path, systems: &[SourceSystem]) -> LoadReport {
    let mut report = LoadReport::default();
    for &system in systems {
        let path = vocabulary_path(dir, system);
        if !path.is_file() {
            info!(source = %system, path = %path.display(), "vocabulary file not found");
            report.loads.push(VocabularyLoad {
                system,
                path,
                outcome: VocabularyOutcome::Missing,
            });
            continue;
        }
        let outcome = match read_csv_table(&path) {
            Ok(table) => {
                let vocabulary = normalize_table(&table, system);
                info!(
                    source = %system,
                    records = vocabulary.records.len(),
                    skipped_rows = vocabulary.skipped_rows,
                    "loaded vocabulary"
                );
                let outcome = VocabularyOutcome::Loaded {
                    records: vocabulary.records.len(),
                    skipped_rows: vocabulary.skipped_rows,
                    duplicate_rows: vocabulary.duplicate_rows,
                };
                report.vocabularies.push(vocabulary);
                outcome
            }
            Err(error) => {
                warn!(source = %system, path = %path.display(), %error, "vocabulary load failed");
                VocabularyOutcome::Failed {
                    message: error.to_string(),
                }
            }
        };
        report.loads.push(VocabularyLoad {
            system,
            path,
            outcome,
        });
    }
    report
}
