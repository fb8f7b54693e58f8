//! Table renderers for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crosswalk_core::Prediction;
use crosswalk_ingest::{LoadReport, VocabularyOutcome};
use crosswalk_map::SuggestionSet;
use crosswalk_model::{ConceptRecord, CorpusStats, MappingReport};

pub fn print_load_report(report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Vocabulary"),
        header_cell("Status"),
        header_cell("Records"),
        header_cell("Skipped"),
        header_cell("Duplicates"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    for column in 2..=4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for load in &report.loads {
        let path = load.path.display().to_string();
        let row = match &load.outcome {
            VocabularyOutcome::Loaded {
                records,
                skipped_rows,
                duplicate_rows,
            } => vec![
                Cell::new(load.system).add_attribute(Attribute::Bold),
                Cell::new("loaded").fg(Color::Green),
                Cell::new(records),
                count_cell(*skipped_rows, Color::Yellow),
                count_cell(*duplicate_rows, Color::Yellow),
                dim_cell(path),
            ],
            VocabularyOutcome::Missing => vec![
                Cell::new(load.system).add_attribute(Attribute::Bold),
                dim_cell("missing"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell(path),
            ],
            VocabularyOutcome::Failed { message } => vec![
                Cell::new(load.system).add_attribute(Attribute::Bold),
                Cell::new("failed").fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(message).fg(Color::Red),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_stats(stats: &CorpusStats) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Vocabulary"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (system, count) in &stats.by_system {
        table.add_row(vec![Cell::new(system), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_records).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if stats.by_category.is_empty() {
        return;
    }
    let mut categories = Table::new();
    categories.set_header(vec![header_cell("Category"), header_cell("Records")]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    for (category, count) in &stats.by_category {
        let name = if category.is_empty() {
            dim_cell("(none)")
        } else {
            Cell::new(category)
        };
        categories.add_row(vec![name, Cell::new(count)]);
    }
    println!("{categories}");
}

pub fn print_predictions(predictions: &[Prediction]) {
    if predictions.is_empty() {
        println!("No matching terms.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Term"),
        header_cell("Original"),
        header_cell("Vocabulary"),
        header_cell("ICD-11"),
        header_cell("Confidence"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for prediction in predictions {
        let target = match (&prediction.target_code, &prediction.target_term) {
            (Some(code), Some(term)) => Cell::new(format!("{code} {term}")),
            (Some(code), None) => Cell::new(code),
            _ => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&prediction.code).fg(Color::Blue),
            Cell::new(&prediction.term_english),
            Cell::new(&prediction.term_original),
            Cell::new(prediction.source_system),
            target,
            confidence_cell(prediction.confidence),
            Cell::new(&prediction.description),
        ]);
    }
    println!("{table}");
}

pub fn print_records(records: &[ConceptRecord]) {
    if records.is_empty() {
        println!("No matching records.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Term"),
        header_cell("Original"),
        header_cell("Vocabulary"),
        header_cell("Category"),
        header_cell("ICD-11"),
    ]);
    apply_table_style(&mut table);
    for record in records {
        let target = if record.is_mapped() {
            Cell::new(format!("{} {}", record.target_code, record.target_term))
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&record.code).fg(Color::Blue),
            Cell::new(&record.term_english),
            Cell::new(&record.term_original),
            Cell::new(record.source_system),
            Cell::new(&record.category),
            target,
        ]);
    }
    println!("{table}");
}

pub fn print_suggestions(label: &str, set: &SuggestionSet) {
    println!("Suggestions for {label} ({}):", set.origin);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ICD-11"),
        header_cell("Title"),
        header_cell("Registry"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for suggestion in &set.suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.target_code).fg(Color::Blue),
            Cell::new(&suggestion.target_term),
            Cell::new(suggestion.source_registry),
            confidence_cell(suggestion.confidence),
        ]);
    }
    println!("{table}");
}

pub fn print_mapping_report(report: &MappingReport, newly_mapped: usize) {
    println!("Vocabulary: {}", report.source_system);
    println!("Generated: {}", report.generated_at);
    println!("Newly mapped: {newly_mapped}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Mapped"),
        header_cell("Coverage"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(report.total_records),
        Cell::new(report.mapped_records),
        Cell::new(format!("{:.2}%", report.mapping_percentage)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: u8) -> Cell {
    let color = match confidence {
        81.. => Color::Green,
        70..=80 => Color::Yellow,
        _ => Color::DarkGrey,
    };
    Cell::new(confidence).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
