//! Subcommand runners.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crosswalk_cli::logging::redact_value;
use crosswalk_cli::write_back::write_back;
use crosswalk_core::TerminologyEngine;
use crosswalk_ingest::LoadReport;
use crosswalk_map::ClassificationSearch;
use crosswalk_model::EngineOptions;

use crate::cli::{AutomapArgs, PredictArgs, SearchArgs, SuggestArgs};
use crate::summary::{
    print_load_report, print_mapping_report, print_predictions, print_records, print_stats,
    print_suggestions,
};

/// An engine with its vocabularies loaded, plus output preferences.
pub struct Session {
    engine: TerminologyEngine,
    report: LoadReport,
    json: bool,
}

impl Session {
    pub fn open(
        options: EngineOptions,
        search: Arc<dyn ClassificationSearch>,
        json: bool,
    ) -> Result<Self> {
        let span = info_span!("load", dir = %options.resources_dir.display());
        let _guard = span.enter();
        let engine = TerminologyEngine::new(options, search);
        let report = engine.load_vocabularies();
        for failure in report.failures() {
            warn!(source = %failure.system, path = %failure.path.display(), "vocabulary skipped");
        }
        if report.loaded_count() == 0 {
            bail!(
                "no vocabularies found in {}",
                engine.options().resources_dir.display()
            );
        }
        info!(
            loaded = report.loaded_count(),
            records = engine.stats().total_records,
            "vocabularies ready"
        );
        Ok(Self {
            engine,
            report,
            json,
        })
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

pub fn run_stats(session: &Session) -> Result<()> {
    let stats = session.engine.stats();
    if session.json {
        return print_json(&stats);
    }
    print_load_report(&session.report);
    print_stats(&stats);
    Ok(())
}

pub fn run_predict(session: &Session, args: &PredictArgs) -> Result<()> {
    info!(text = %redact_value(&args.text), top_k = args.top_k, "predicting");
    let predictions = session
        .engine
        .predict(&args.text, args.top_k)
        .context("predict")?;
    if session.json {
        return print_json(&predictions);
    }
    print_predictions(&predictions);
    Ok(())
}

pub fn run_search(session: &Session, args: &SearchArgs) -> Result<()> {
    let records = session
        .engine
        .search(&args.query, &args.sources, args.limit)
        .context("search")?;
    if !args.suggest {
        if session.json {
            return print_json(&records);
        }
        print_records(&records);
        return Ok(());
    }

    #[derive(Serialize)]
    struct HitWithSuggestions<'a> {
        record: &'a crosswalk_model::ConceptRecord,
        suggestions: crosswalk_map::SuggestionSet,
    }

    let mut hits = Vec::with_capacity(records.len());
    for record in &records {
        let suggestions = session
            .engine
            .suggest_mapping(record)
            .with_context(|| format!("suggest mapping for {}", record.code))?;
        hits.push(HitWithSuggestions {
            record,
            suggestions,
        });
    }
    if session.json {
        return print_json(&hits);
    }
    print_records(&records);
    for hit in &hits {
        let label = format!("{} {}", hit.record.code, hit.record.term_english);
        print_suggestions(&label, &hit.suggestions);
    }
    Ok(())
}

pub fn run_suggest(
    engine: &TerminologyEngine,
    args: &SuggestArgs,
    json: bool,
) -> Result<()> {
    let set = engine
        .suggest_for_term(&args.term, &args.code)
        .context("suggest mapping")?;
    if json {
        return print_json(&set);
    }
    print_suggestions(&args.term, &set);
    Ok(())
}

pub fn run_automap(session: &Session, args: &AutomapArgs) -> Result<()> {
    let outcome = session
        .engine
        .auto_map(args.source)
        .with_context(|| format!("auto-map {}", args.source))?;
    let report = session.engine.mapping_report(args.source);
    if args.write {
        let written = write_back(&session.report, args.source, &outcome.records)?;
        info!(
            path = %written.path.display(),
            updated_rows = written.updated_rows,
            "wrote vocabulary targets"
        );
    }
    if session.json {
        return print_json(&report);
    }
    print_mapping_report(&report, outcome.mapped_count);
    if outcome.failed > 0 {
        eprintln!("{} record(s) could not be evaluated", outcome.failed);
    }
    Ok(())
}
