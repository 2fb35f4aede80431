use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("worldpop"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn countries_filtered_to_europe() {
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["countries", "--region", "Europa"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rusia"))
        .stdout(predicate::str::contains("India").not());
}

#[test]
fn countries_for_a_region_without_rows() {
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["countries", "--region", "Oceanía"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No hay datos para esta región"));
}

#[test]
fn check_reports_drift() {
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.arg("check");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Tables OK"))
        .stdout(predicate::str::contains("Población Mundial"))
        .stdout(predicate::str::contains("differs"));
}

#[test]
fn tooltip_for_one_year() {
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["tooltip", "--year", "2023", "--metric", "rate"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2023"))
        .stdout(predicate::str::contains("rate: 0.9%"));
}

#[test]
fn render_writes_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dash.svg");
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["render", "--region", "Asia", "--hover", "2030", "--out"])
        .arg(&out);
    cmd.assert().success();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn render_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("dash.pdf");
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["render", "--out"]).arg(&out);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported chart format"));
}

#[test]
fn export_infers_format_from_extension() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("history.json");
    let mut cmd = Command::cargo_bin("worldpop").unwrap();
    cmd.args(["export", "--table", "history", "--out"]).arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 12 rows"));
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v[0]["year"], "1950");
    assert_eq!(v[11]["is_projection"], true);
}
