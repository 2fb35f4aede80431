use std::fs;
use tempfile::tempdir;
use worldpop::data::{KPIS, POPULATION_HISTORY};
use worldpop::storage::{self, ExportFormat, Table};
use worldpop::{Region, RegionFilter};

#[test]
fn save_csv_and_json() {
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("history.csv");
    storage::save_csv(&POPULATION_HISTORY, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("year,population,growth_rate,is_projection"));
    assert_eq!(csv_txt.lines().count(), 1 + POPULATION_HISTORY.len());
    assert!(csv_txt.contains("2050,9.7,0.5,true"));

    let json_path = dir.path().join("kpis.json");
    storage::save_json(&KPIS, &json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 4);
    assert_eq!(v[1]["trend"], "down");
}

#[test]
fn export_table_counts_rows() {
    let dir = tempdir().unwrap();
    let cases = [
        (Table::History, RegionFilter::All, 12),
        (Table::Continents, RegionFilter::All, 6),
        (Table::Countries, RegionFilter::All, 10),
        (Table::Countries, RegionFilter::Only(Region::Africa), 1),
    ];
    for (i, (table, region, expected)) in cases.into_iter().enumerate() {
        let path = dir.path().join(format!("t{i}.json"));
        let n = storage::export_table(table, region, ExportFormat::Json, &path).unwrap();
        assert_eq!(n, expected);
    }
}

#[test]
fn africa_label_survives_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("africa.csv");
    storage::export_table(
        Table::Countries,
        RegionFilter::Only(Region::Africa),
        ExportFormat::Csv,
        &path,
    )
    .unwrap();
    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.contains("Nigeria,224,África"));
}
