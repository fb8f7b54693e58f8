//! Tests for persisting auto-mapped targets.

use std::fs;
use std::path::PathBuf;

use crosswalk_cli::write_back::write_back;
use crosswalk_ingest::{load_vocabularies, read_csv_table, vocabulary_path};
use crosswalk_model::SourceSystem;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!(
        "crosswalk_cli_{label}_{}_{stamp}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn failed_or_missing_vocabulary_is_not_overwritten() {
    let dir = temp_dir("write_back_guard");
    fs::write(
        vocabulary_path(&dir, SourceSystem::Ayurveda),
        "NAMC_CODE,NAMC_term\nA1,fever\n",
    )
    .expect("write ayurveda");
    let siddha = vocabulary_path(&dir, SourceSystem::Siddha);
    let broken: &[u8] = b"NAMC_CODE,NAMC_TERM\nS1,Sur\xffam\n";
    fs::write(&siddha, broken).expect("write siddha");

    let report = load_vocabularies(&dir, &SourceSystem::ALL);
    assert_eq!(report.failures().count(), 1);

    let err = write_back(&report, SourceSystem::Siddha, &[]).expect_err("failed load");
    assert!(format!("{err:#}").contains("failed to load"));
    assert_eq!(fs::read(&siddha).expect("read siddha"), broken);

    let err = write_back(&report, SourceSystem::Unani, &[]).expect_err("missing file");
    assert!(format!("{err:#}").contains("not found"));
    assert!(!vocabulary_path(&dir, SourceSystem::Unani).exists());

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn loaded_vocabulary_keeps_its_extra_columns() {
    let dir = temp_dir("write_back_columns");
    let path = vocabulary_path(&dir, SourceSystem::Ayurveda);
    fs::write(
        &path,
        "NAMC_CODE,NAMC_term,Short_definition,Long_definition,Notes\n\
         A1,fever,Raised temperature,Body temperature above normal,seasonal\n\
         A2,cough,,,\n",
    )
    .expect("write ayurveda");

    let report = load_vocabularies(&dir, &[SourceSystem::Ayurveda]);
    let mut records = report.corpus();
    records[0].target_code = "MG40".to_string();
    records[0].target_term = "Fever of unknown origin".to_string();

    let written = write_back(&report, SourceSystem::Ayurveda, &records).expect("write back");
    assert_eq!(written.path, path);
    assert_eq!(written.updated_rows, 1);

    let table = read_csv_table(&path).expect("read back");
    assert_eq!(
        table.headers,
        vec![
            "NAMC_CODE",
            "NAMC_term",
            "Short_definition",
            "Long_definition",
            "Notes",
            "icd11_code",
            "icd11_term",
        ]
    );
    assert_eq!(table.rows[0][3], "Body temperature above normal");
    assert_eq!(table.rows[0][4], "seasonal");
    assert_eq!(table.rows[0][5], "MG40");
    assert_eq!(table.rows[1][5], "");

    let reloaded = load_vocabularies(&dir, &[SourceSystem::Ayurveda]).corpus();
    assert_eq!(reloaded[0].target_term, "Fever of unknown origin");
    assert_eq!(reloaded[0].description, "Raised temperature");

    fs::remove_dir_all(&dir).expect("cleanup");
}
