use assert_cmd::Command;
use graycode::ScannerConfig;
use predicates::prelude::*;
use serde_json::Value;

fn write_config(dir: &std::path::Path, cfg: &ScannerConfig) -> std::path::PathBuf {
    let path = dir.join("scanner.json");
    cfg.write_json(&path).expect("write config");
    path
}

#[test]
fn info_lists_every_pattern() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &ScannerConfig::new(640, 640, 640, 640));

    Command::cargo_bin("graycode")
        .expect("binary")
        .args(["info", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("column bits 10 phase 192"))
        .stdout(predicate::str::contains("patterns 44"))
        .stdout(predicate::str::contains(" 43  row bit 9 (invert)"));
}

#[test]
fn generated_patterns_decode_to_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &ScannerConfig::new(40, 24, 40, 24));
    let frames = dir.path().join("frames");
    let report = dir.path().join("report.json");
    let viz = dir.path().join("columns.png");

    Command::cargo_bin("graycode")
        .expect("binary")
        .args(["generate", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&frames)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 26 patterns"));

    Command::cargo_bin("graycode")
        .expect("binary")
        .args(["decode", "--prefix", "pattern", "--sample-step", "8", "--config"])
        .arg(&config)
        .arg("--captures")
        .arg(&frames)
        .arg("--report")
        .arg(&report)
        .arg("--column-viz")
        .arg(&viz)
        .assert()
        .success();

    assert!(viz.is_file());
    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(json["decoded_pixels"], 40 * 24);
    assert_eq!(json["total_pixels"], 40 * 24);
    let samples = json["samples"].as_array().expect("samples");
    assert_eq!(samples.len(), 5 * 3);
    for s in samples {
        assert_eq!(s["column"], s["x"]);
        assert_eq!(s["row"], s["y"]);
    }
}

#[test]
fn decode_reports_missing_capture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), &ScannerConfig::new(8, 8, 8, 8));

    Command::cargo_bin("graycode")
        .expect("binary")
        .args(["decode", "--config"])
        .arg(&config)
        .arg("--captures")
        .arg(dir.path().join("nothing-here"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("capture 0 not found"));
}
