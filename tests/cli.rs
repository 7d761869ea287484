//! CLI smoke tests for the demo driver.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn streams_a_synthetic_source() {
    Command::cargo_bin("foucault")
        .unwrap()
        .args(["--samples", "5", "--interval", "1", "--mintime", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plot0: 5 rows"));
}

#[test]
fn plots_a_data_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# coordinates: 1").unwrap();
    writeln!(file, "# column 0: time (s)").unwrap();
    writeln!(file, "# column 1: signal (V)").unwrap();
    writeln!(file, "0.0 0.5").unwrap();
    writeln!(file, "1.0 0.7").unwrap();
    file.flush().unwrap();

    Command::cargo_bin("foucault")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("plot0: 2 rows"));
}

#[test]
fn fails_on_missing_data_file() {
    Command::cargo_bin("foucault")
        .unwrap()
        .arg("/nonexistent/run42.dat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run42.dat"));
}

#[test]
fn writes_a_log_file_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("foucault.log");

    Command::cargo_bin("foucault")
        .unwrap()
        .args(["--samples", "3", "--interval", "1", "--mintime", "0"])
        .arg("--log")
        .arg(&log_path)
        .assert()
        .success();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Starting Foucault"));
    // The startup line must survive everything logged after it.
    assert!(log.contains("Redraw"));
    assert!(log.lines().count() > 1);
}
