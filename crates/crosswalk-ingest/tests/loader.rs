//! Tests for loading vocabularies from a resources directory.

use std::fs;
use std::path::{Path, PathBuf};

use crosswalk_ingest::{
    VocabularyOutcome, apply_targets, load_vocabularies, read_csv_from_reader, read_csv_table,
    update_vocabulary_targets, validate_canonical_table, vocabulary_path, write_vocabulary,
    write_vocabulary_csv,
};
use crosswalk_model::{ConceptRecord, SourceSystem};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!(
        "crosswalk_ingest_{label}_{}_{stamp}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write(dir: &Path, system: SourceSystem, contents: &str) {
    fs::write(vocabulary_path(dir, system), contents).expect("write vocabulary");
}

#[test]
fn loads_present_vocabularies_and_reports_missing() {
    let dir = temp_dir("missing");
    write(
        &dir,
        SourceSystem::Ayurveda,
        "NAMC_CODE,NAMC_term,Ontology_branches\nA1,fever,General\nA2,cough,Respiratory\n,orphan,\n",
    );
    write(
        &dir,
        SourceSystem::Unani,
        "NUMC_CODE,NUMC_TERM\nU1,waram\n",
    );

    let report = load_vocabularies(&dir, &SourceSystem::ALL);
    assert_eq!(report.loaded_count(), 2);
    assert_eq!(report.loads.len(), 3);
    assert_eq!(
        report.loads[0].outcome,
        VocabularyOutcome::Loaded {
            records: 2,
            skipped_rows: 1,
            duplicate_rows: 0,
        }
    );
    assert_eq!(report.loads[1].system, SourceSystem::Siddha);
    assert_eq!(report.loads[1].outcome, VocabularyOutcome::Missing);

    let corpus = report.corpus();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus[2].source_system, SourceSystem::Unani);
    assert_eq!(corpus[2].category, "Unani");

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn malformed_vocabulary_fails_alone() {
    let dir = temp_dir("malformed");
    write(&dir, SourceSystem::Ayurveda, "NAMC_CODE,NAMC_term\nA1,fever\n");
    fs::write(
        vocabulary_path(&dir, SourceSystem::Siddha),
        [0x4e, 0x41, 0xff, 0xfe, b',', b'x', b'\n', 0xc3, b'\n'],
    )
    .expect("write malformed file");

    let report = load_vocabularies(&dir, &SourceSystem::ALL);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].system, SourceSystem::Siddha);
    assert_eq!(report.corpus().len(), 1);

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn written_vocabulary_reloads_with_targets() {
    let dir = temp_dir("roundtrip");
    let records = vec![
        ConceptRecord::new(SourceSystem::Siddha, "S1", "Suram")
            .with_original("சுரம்")
            .with_category("Fever")
            .with_target("MG40", "Fever of unknown origin"),
        ConceptRecord::new(SourceSystem::Siddha, "S2", "Vali, upper body")
            .with_description("Pain \"radiating\" outward"),
    ];
    write_vocabulary_csv(&vocabulary_path(&dir, SourceSystem::Siddha), &records)
        .expect("write vocabulary");

    let table = read_csv_table(&vocabulary_path(&dir, SourceSystem::Siddha)).expect("read back");
    validate_canonical_table(&table).expect("canonical layout");

    let report = load_vocabularies(&dir, &[SourceSystem::Siddha]);
    let mut expected = records.clone();
    expected[1].category = "Siddha".to_string();
    assert_eq!(report.corpus(), expected);

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn writer_emits_canonical_header_first() {
    let mut buffer = Vec::new();
    let records = vec![ConceptRecord::new(SourceSystem::Unani, "U1", "Waram")];
    write_vocabulary(&mut buffer, &records).expect("write");
    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("code,term_original,term_english,description,category,icd11_code,icd11_term")
    );
    assert_eq!(lines.next(), Some("U1,,Waram,,,,"));
}

#[test]
fn targets_update_existing_columns_and_keep_skipped_rows() {
    let mut table = read_csv_from_reader(
        "NUMC_CODE,NUMC_TERM,Arabic_term,icd11_code,icd11_term,Source\n\
         U1,Humma,حمى,,,book one\n\
         ,orphan term,,,,book two\n\
         U2,Waram,ورم,OLD,Old title,book three\n"
            .as_bytes(),
        "unani.csv",
    )
    .expect("table");
    let records = vec![
        ConceptRecord::new(SourceSystem::Unani, "U1", "Humma").with_target("MG40", "Fever"),
        ConceptRecord::new(SourceSystem::Unani, "U2", "Waram").with_target("OLD", "Old title"),
        ConceptRecord::new(SourceSystem::Siddha, "U2", "Other").with_target("XX00", "Wrong"),
    ];

    let updated = apply_targets(&mut table, SourceSystem::Unani, &records);
    assert_eq!(updated, 1);
    assert_eq!(table.headers.len(), 6);
    assert_eq!(table.rows[0][3], "MG40");
    assert_eq!(table.rows[0][5], "book one");
    assert_eq!(table.rows[1][1], "orphan term");
    assert_eq!(table.rows[2][3], "OLD");
}

#[test]
fn updated_file_keeps_unknown_columns() {
    let dir = temp_dir("update_targets");
    let path = vocabulary_path(&dir, SourceSystem::Siddha);
    fs::write(
        &path,
        "NAMC_CODE,NAMC_TERM,Long_definition,Tamil_term,Reference\nS1,Suram,Fever with chills,சுரம்,Text 4\n",
    )
    .expect("write vocabulary");

    let records = vec![
        ConceptRecord::new(SourceSystem::Siddha, "S1", "Suram")
            .with_target("MG40", "Fever of unknown origin"),
    ];
    let updated = update_vocabulary_targets(&path, SourceSystem::Siddha, &records).expect("update");
    assert_eq!(updated, 1);

    let table = read_csv_table(&path).expect("read back");
    assert_eq!(table.column_index("Reference"), Some(4));
    assert_eq!(table.rows[0][4], "Text 4");
    assert_eq!(table.rows[0][2], "Fever with chills");

    let corpus = load_vocabularies(&dir, &[SourceSystem::Siddha]).corpus();
    assert_eq!(corpus[0].target_code, "MG40");
    assert_eq!(corpus[0].description, "Fever with chills");

    fs::remove_dir_all(&dir).expect("cleanup");
}
