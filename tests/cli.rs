extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn missing_size_prints_usage() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("julia")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("USAGE"));
    assert!(!dir.path().join("images").exists());
}

#[test]
fn non_positive_size_is_rejected() {
    let dir = tempdir().unwrap();
    for bad in &["0", "-3", "lots"] {
        Command::cargo_bin("julia_par")
            .unwrap()
            .current_dir(dir.path())
            .arg(bad)
            .assert()
            .failure();
    }
    assert!(!dir.path().join("images").exists());
}

#[test]
fn sequential_binary_writes_image_and_report() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("julia")
        .unwrap()
        .current_dir(dir.path())
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating Julia set image of size 8x4"));

    let image = fs::read(dir.path().join("images/julia.bmp")).unwrap();
    assert_eq!(image.len(), 150);
    let csv = fs::read_to_string(dir.path().join("reports/benchmark.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Processes,Resolution,ExecutionTime");
    assert!(lines[1].starts_with("1,4,"));
}

#[test]
fn ring_binary_prints_a_timing_report_per_worker() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("julia_par")
        .unwrap()
        .current_dir(dir.path())
        .args(&["4", "--workers", "3", "--output", "out.bmp"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[Process 0] Timing Report [0-1]:")
                .and(predicate::str::contains("[Process 2] Timing Report [3-3]:")),
        );

    assert_eq!(fs::read(dir.path().join("out.bmp")).unwrap().len(), 150);
    let csv = fs::read_to_string(dir.path().join("reports/benchmark.csv")).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with("3,4,"));
}

#[test]
fn both_binaries_agree() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("julia")
        .unwrap()
        .current_dir(dir.path())
        .args(&["6", "-o", "seq.bmp"])
        .assert()
        .success();
    Command::cargo_bin("julia_par")
        .unwrap()
        .current_dir(dir.path())
        .args(&["6", "-w", "4", "-o", "par.bmp"])
        .assert()
        .success();
    assert_eq!(
        fs::read(dir.path().join("seq.bmp")).unwrap(),
        fs::read(dir.path().join("par.bmp")).unwrap()
    );
}
