mod common;

use assert_cmd::Command;
use chromagrid::io::{CalibrateConfig, CalibrationReport};
use chromagrid::{CellDivisions, ColorGrid, ColorLabel, Margins};
use predicates::prelude::*;

fn chromagrid() -> Command {
    Command::cargo_bin("chromagrid").unwrap()
}

#[test]
fn classify_prints_label_name() {
    chromagrid()
        .args(["classify", "255", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::eq("red\n"));
    chromagrid()
        .args(["classify", "0", "0", "0", "--hsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("black (h=0.0"));
}

#[test]
fn calibrate_writes_report_and_preview() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frame.png");
    let report = dir.path().join("report.json");
    let preview = dir.path().join("preview.png");
    common::paint(&common::framed_cells(), 4)
        .save(&image)
        .unwrap();

    chromagrid()
        .arg("calibrate")
        .arg("--image")
        .arg(&image)
        .args(["--x-div", "10", "--y-div", "10", "--lines"])
        .arg("--report")
        .arg(&report)
        .arg("--preview")
        .arg(&preview)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("yellow red"));

    let loaded = CalibrationReport::load_json(&report).unwrap();
    assert_eq!((loaded.width, loaded.height), (40, 40));
    assert_eq!(
        loaded.margins.map(|m| m.pixels),
        Some(Margins {
            left: 12,
            top: 16,
            right: 32,
            bottom: 28
        })
    );
    assert!(preview.exists());
}

#[test]
fn calibrate_reads_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frame.png");
    let report = dir.path().join("report.json");
    let config = dir.path().join("config.json");
    common::paint(&common::framed_cells(), 2)
        .save(&image)
        .unwrap();

    let mut cfg = CalibrateConfig::new(image.to_string_lossy());
    cfg.output_path = Some(report.to_string_lossy().into_owned());
    cfg.params.divisions = Some(CellDivisions::new(10, 10));
    cfg.write_json(&config).unwrap();

    chromagrid()
        .arg("calibrate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let loaded = CalibrationReport::load_json(&report).unwrap();
    assert_eq!(loaded.rows.map(|rows| rows.len()), Some(3));
}

#[test]
fn failed_calibration_still_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("blank.png");
    let report = dir.path().join("report.json");
    let blank = ColorGrid::filled(8, 8, ColorLabel::White).unwrap();
    common::paint(&blank, 2).save(&image).unwrap();

    chromagrid()
        .arg("calibrate")
        .arg("--image")
        .arg(&image)
        .arg("--report")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bottom"));

    let loaded = CalibrationReport::load_json(&report).unwrap();
    assert!(loaded.rows.is_none());
    assert!(loaded.error.unwrap().contains("bottom"));
}

#[test]
fn calibrate_requires_an_input() {
    chromagrid().arg("calibrate").assert().failure();
}
