//! Persisting auto-mapped targets to vocabulary files.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use crosswalk_ingest::{LoadReport, VocabularyOutcome, update_vocabulary_targets};
use crosswalk_model::{ConceptRecord, SourceSystem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBack {
    pub path: PathBuf,
    pub updated_rows: usize,
}

/// Write the targets of `records` into the file `system` was loaded from.
///
/// Refuses unless that file loaded successfully, so a missing or unreadable
/// vocabulary is never replaced by the (empty) corpus view of it.
pub fn write_back(
    report: &LoadReport,
    system: SourceSystem,
    records: &[ConceptRecord],
) -> Result<WriteBack> {
    let load = report
        .loads
        .iter()
        .find(|load| load.system == system)
        .with_context(|| format!("{system} was not part of the load"))?;
    match &load.outcome {
        VocabularyOutcome::Loaded { .. } => {}
        VocabularyOutcome::Missing => bail!(
            "not writing {system}: {} was not found when loading",
            load.path.display()
        ),
        VocabularyOutcome::Failed { message } => bail!(
            "not writing {system}: {} failed to load: {message}",
            load.path.display()
        ),
    }
    let updated_rows = update_vocabulary_targets(&load.path, system, records)
        .with_context(|| format!("write {}", load.path.display()))?;
    Ok(WriteBack {
        path: load.path.clone(),
        updated_rows,
    })
}
