//! The terminology engine service object.
//!
//! All corpus state lives in one immutable [`Snapshot`] behind a single lock.
//! Reloads build the new corpus and train its index before swapping it in, so
//! readers never see a corpus paired with an index trained on another one.
//! Mapping writes copy the current snapshot and keep its index.

use std::sync::{Arc, PoisonError, RwLock};

use crosswalk_index::LexicalIndex;
use crosswalk_ingest::{CsvTable, LoadReport, load_vocabularies, merge_vocabularies, normalize_table};
use crosswalk_map::{
    AutoMapOutcome, AutoMapper, ClassificationSearch, SuggestionEngine, SuggestionSet,
    apply_decisions,
};
use crosswalk_model::{
    ConceptRecord, CorpusStats, CrosswalkError, EngineOptions, InteropPayload, MappingReport,
    MappingSuggestion, Result, SourceSystem,
};
use tracing::{info, instrument, warn};

use crate::prediction::Prediction;

/// Default number of predictions returned.
pub const DEFAULT_TOP_K: usize = 3;

/// Corpus and the index trained on it.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// Incremented by every reload; zero until the first load.
    pub generation: u64,
    pub records: Vec<ConceptRecord>,
    pub index: Arc<LexicalIndex>,
}

impl Snapshot {
    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }

    pub fn records_for(&self, system: SourceSystem) -> Vec<ConceptRecord> {
        self.records
            .iter()
            .filter(|record| record.source_system == system)
            .cloned()
            .collect()
    }
}

pub struct TerminologyEngine {
    options: EngineOptions,
    suggestions: SuggestionEngine,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl TerminologyEngine {
    pub fn new(options: EngineOptions, search: Arc<dyn ClassificationSearch>) -> Self {
        let suggestions = SuggestionEngine::new(search, options.suggestion)
            .with_timeout(options.search_timeout());
        Self {
            options,
            suggestions,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Current snapshot. Later reloads do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn generation(&self) -> u64 {
        self.snapshot().generation
    }

    /// Load every vocabulary from the configured resources directory.
    #[instrument(skip(self), fields(dir = %self.options.resources_dir.display()))]
    pub fn load_vocabularies(&self) -> LoadReport {
        let report = load_vocabularies(&self.options.resources_dir, &SourceSystem::ALL);
        self.install(report.corpus());
        report
    }

    /// Load from in-memory tables, one per vocabulary. Returns the corpus size.
    pub fn load_tables(&self, tables: impl IntoIterator<Item = (SourceSystem, CsvTable)>) -> usize {
        let vocabularies = tables
            .into_iter()
            .map(|(system, table)| normalize_table(&table, system));
        let records = merge_vocabularies(vocabularies);
        let count = records.len();
        self.install(records);
        count
    }

    fn install(&self, records: Vec<ConceptRecord>) {
        let index = Arc::new(LexicalIndex::build(&records, self.options.index));
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let generation = guard.generation + 1;
        info!(generation, records = records.len(), "installed corpus snapshot");
        *guard = Arc::new(Snapshot {
            generation,
            records,
            index,
        });
    }

    /// Rank corpus records against free clinical text.
    pub fn predict(&self, text: &str, top_k: usize) -> Result<Vec<Prediction>> {
        if text.trim().is_empty() {
            return Err(CrosswalkError::validation(
                "clinical_text",
                "text must not be empty",
            ));
        }
        let snapshot = self.snapshot();
        let hits = snapshot.index.rank(text, top_k)?;
        Ok(hits
            .iter()
            .filter_map(|hit| {
                snapshot
                    .records
                    .get(hit.position)
                    .map(|record| Prediction::new(record, hit))
            })
            .collect())
    }

    /// Case-insensitive substring search over codes, terms, descriptions and
    /// categories. An empty `sources` slice searches every vocabulary.
    pub fn search(
        &self,
        query: &str,
        sources: &[SourceSystem],
        limit: Option<usize>,
    ) -> Result<Vec<ConceptRecord>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CrosswalkError::validation("query", "query must not be empty"));
        }
        let snapshot = self.snapshot();
        let matches = snapshot
            .records
            .iter()
            .filter(|record| sources.is_empty() || sources.contains(&record.source_system))
            .filter(|record| {
                [
                    &record.code,
                    &record.term_english,
                    &record.term_original,
                    &record.description,
                    &record.category,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matches)
    }

    pub fn suggest_mapping(&self, record: &ConceptRecord) -> Result<SuggestionSet> {
        self.suggestions.suggest(record)
    }

    pub fn suggest_for_term(&self, term: &str, code: &str) -> Result<SuggestionSet> {
        self.suggestions.suggest_for_term(term, code)
    }

    /// Map every unmapped record of `system` whose top suggestion clears the
    /// configured floor.
    ///
    /// Suggestions are computed without the lock held. Writes land on the
    /// snapshot current at apply time and skip records mapped in between. A
    /// reload in between discards the plan and maps nothing.
    #[instrument(skip(self), fields(source = %system))]
    pub fn auto_map(&self, system: SourceSystem) -> Result<AutoMapOutcome> {
        let before = self.snapshot();
        if !before.is_loaded() {
            return Err(CrosswalkError::NotReady);
        }
        let mapper = AutoMapper::new(&self.suggestions, self.options.auto_map_floor);
        let plan = mapper.plan(&before.records_for(system));

        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let mapped_count = if guard.generation != before.generation {
            warn!(
                planned_generation = before.generation,
                current_generation = guard.generation,
                "corpus reloaded during auto-map, discarding plan"
            );
            0
        } else {
            let mut records = guard.records.clone();
            let mapped_count = apply_decisions(&mut records, &plan.decisions);
            if mapped_count > 0 {
                *guard = Arc::new(Snapshot {
                    generation: guard.generation,
                    records,
                    index: Arc::clone(&guard.index),
                });
            }
            mapped_count
        };
        let vocabulary = guard.records_for(system);
        drop(guard);

        info!(
            evaluated = plan.evaluated,
            mapped = mapped_count,
            failed = plan.failed,
            "auto-map finished"
        );
        Ok(AutoMapOutcome {
            records: vocabulary,
            mapped_count,
            evaluated: plan.evaluated,
            failed: plan.failed,
        })
    }

    /// Record a reviewer-accepted mapping and return the hand-off payload.
    pub fn accept_mapping(
        &self,
        system: SourceSystem,
        code: &str,
        accepted: &MappingSuggestion,
    ) -> Result<InteropPayload> {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let position = guard
            .records
            .iter()
            .position(|record| record.key() == (system, code))
            .ok_or_else(|| {
                CrosswalkError::validation("code", format!("no {system} record with code {code}"))
            })?;
        let payload = InteropPayload::from_accepted(&guard.records[position], accepted)?;
        let mut records = guard.records.clone();
        records[position].target_code = accepted.target_code.clone();
        records[position].target_term = accepted.target_term.clone();
        *guard = Arc::new(Snapshot {
            generation: guard.generation,
            records,
            index: Arc::clone(&guard.index),
        });
        info!(source = %system, code, target = %accepted.target_code, "accepted mapping");
        Ok(payload)
    }

    pub fn vocabulary(&self, system: SourceSystem) -> Vec<ConceptRecord> {
        self.snapshot().records_for(system)
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats::from_records(&self.snapshot().records)
    }

    pub fn mapping_report(&self, system: SourceSystem) -> MappingReport {
        let generated_at = chrono::Utc::now().to_rfc3339();
        MappingReport::from_records(system, &self.snapshot().records, generated_at)
    }
}
