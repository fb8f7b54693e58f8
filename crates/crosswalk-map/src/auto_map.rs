//! Batch auto-mapping over one vocabulary.
//!
//! Planning and applying are separate steps so the suggestions can be
//! computed without holding any lock on the corpus.

use crosswalk_model::{ConceptRecord, MappingSuggestion, SourceSystem};
use tracing::{debug, info, warn};

use crate::engine::SuggestionEngine;

/// Top suggestions must exceed this confidence to be applied.
pub const DEFAULT_AUTO_MAP_FLOOR: u8 = 80;

/// An accepted mapping for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDecision {
    pub source_system: SourceSystem,
    pub code: String,
    pub suggestion: MappingSuggestion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoMapPlan {
    pub decisions: Vec<MappingDecision>,
    /// Unmapped records that were scored.
    pub evaluated: usize,
    /// Records whose suggestion lookup failed.
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoMapOutcome {
    pub records: Vec<ConceptRecord>,
    pub mapped_count: usize,
    pub evaluated: usize,
    pub failed: usize,
}

pub struct AutoMapper<'a> {
    engine: &'a SuggestionEngine,
    floor: u8,
}

impl<'a> AutoMapper<'a> {
    pub fn new(engine: &'a SuggestionEngine, floor: u8) -> Self {
        Self { engine, floor }
    }

    /// Decide mappings for every unmapped record in `records`.
    pub fn plan(&self, records: &[ConceptRecord]) -> AutoMapPlan {
        let mut plan = AutoMapPlan::default();
        for record in records.iter().filter(|record| !record.is_mapped()) {
            plan.evaluated += 1;
            let set = match self.engine.suggest(record) {
                Ok(set) => set,
                Err(error) => {
                    warn!(code = %record.code, %error, "auto-map skipped record");
                    plan.failed += 1;
                    continue;
                }
            };
            match set.top() {
                Some(top) if top.confidence > self.floor => {
                    debug!(
                        code = %record.code,
                        target = %top.target_code,
                        confidence = top.confidence,
                        "auto-map accepted"
                    );
                    plan.decisions.push(MappingDecision {
                        source_system: record.source_system,
                        code: record.code.clone(),
                        suggestion: top.clone(),
                    });
                }
                _ => debug!(code = %record.code, "auto-map left record unmapped"),
            }
        }
        plan
    }

    pub fn run(&self, mut records: Vec<ConceptRecord>) -> AutoMapOutcome {
        let plan = self.plan(&records);
        let mapped_count = apply_decisions(&mut records, &plan.decisions);
        info!(
            evaluated = plan.evaluated,
            mapped = mapped_count,
            failed = plan.failed,
            "auto-map finished"
        );
        AutoMapOutcome {
            records,
            mapped_count,
            evaluated: plan.evaluated,
            failed: plan.failed,
        }
    }
}

/// Write each decision into its record if that record is still unmapped.
///
/// Returns how many records changed.
pub fn apply_decisions(records: &mut [ConceptRecord], decisions: &[MappingDecision]) -> usize {
    let mut mapped = 0;
    for decision in decisions {
        let target = records.iter_mut().find(|record| {
            record.source_system == decision.source_system && record.code == decision.code
        });
        if let Some(record) = target
            && !record.is_mapped()
        {
            record.target_code = decision.suggestion.target_code.clone();
            record.target_term = decision.suggestion.target_term.clone();
            mapped += 1;
        }
    }
    mapped
}
