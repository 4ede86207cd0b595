//! End-to-end CLI tests: input file/stdin in, report and exit status out
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn csv(old: &[f64], new: &[f64]) -> String {
    let mut content = String::new();
    for (o, n) in old.iter().zip(new.iter()) {
        content.push_str(&format!("old,{}\nnew,{}\n", o, n));
    }
    content
}

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("samples.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_regression_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        &csv(
            &[100.0, 101.0, 99.0, 100.0, 102.0],
            &[130.0, 131.0, 129.0, 130.0, 132.0],
        ),
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("--display-unit")
        .arg("ms")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("old execution time   : μ=100.40±"))
        .stdout(predicate::str::contains("new execution time   : μ=130.40±"))
        .stdout(predicate::str::contains("ERROR:execution regressed by 29.9%"))
        .stdout(predicate::str::contains("verdict: FAIL"));
}

#[test]
fn test_no_difference_exits_zero() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        &csv(
            &[100.0, 102.0, 98.0, 101.0, 99.0],
            &[99.0, 103.0, 97.0, 100.0, 101.0],
        ),
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("verdict: PASS"))
        .stdout(predicate::str::contains("ERROR:").not());
}

#[test]
fn test_improvement_exits_zero() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.write_stdin(csv(
        &[200.0, 201.0, 199.0, 200.0, 202.0],
        &[150.0, 151.0, 149.0, 150.0, 152.0],
    ))
    .assert()
    .success()
    .stdout(predicate::str::contains("execution improved by 25.0%"));
}

#[test]
fn test_reads_stdin_with_dash() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("-")
        .write_stdin(csv(&[10.0, 10.5, 10.2], &[10.1, 10.4, 10.3]))
        .assert()
        .stdout(predicate::str::contains("old execution time"));
}

#[test]
fn test_verbose_shows_debug_lines() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("-v")
        .write_stdin(csv(
            &[100.0, 102.0, 98.0, 101.0, 99.0],
            &[99.0, 103.0, 97.0, 100.0, 101.0],
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DEBUG:execution had too much variance to make conclusion",
        ));
}

#[test]
fn test_single_group_is_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.write_stdin("old,1\nold,2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly two groups"));
}

#[test]
fn test_unparsable_value_is_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.write_stdin("old,1\nnew,abc\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_file_is_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("/nonexistent/samples.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_count_mismatch_warns_but_runs() {
    let mut content = csv(
        &[100.0, 102.0, 98.0, 101.0, 99.0],
        &[99.0, 103.0, 97.0, 100.0, 101.0],
    );
    content.push_str("old,100\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.write_stdin(content)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Both groups do not have the same number of values",
        ))
        .stdout(predicate::str::contains("verdict: PASS"));
}

#[test]
fn test_invalid_histogram_buckets_rejected() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("--histogram-buckets")
        .arg("1")
        .write_stdin(csv(&[1.0, 2.0], &[1.0, 2.0]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("histogram_buckets"));
}

#[test]
fn test_config_file_and_flag_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("abstats.toml");
    fs::write(&config, "histogram_buckets = 1\n").unwrap();
    let input = write_input(
        &dir,
        &csv(
            &[100.0, 102.0, 98.0, 101.0, 99.0],
            &[99.0, 103.0, 97.0, 100.0, 101.0],
        ),
    );

    // Invalid on its own
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("--config").arg(&config).arg(&input).assert().failure();

    // A valid file combined with a flag override
    fs::write(&config, "histogram_buckets = 4\nconfidence = 0.99\n").unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("--config")
        .arg(&config)
        .arg("--histogram-buckets")
        .arg("6")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r" : [ ▁▂▃▄▅▆▇█]{6} : ").unwrap());
}

#[test]
fn test_json_output() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    let output = cmd
        .arg("--format")
        .arg("json")
        .arg("--display-unit")
        .arg("ms")
        .write_stdin(csv(
            &[100.0, 101.0, 99.0, 100.0, 102.0],
            &[130.0, 131.0, 129.0, 130.0, 132.0],
        ))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["verdict"], false);
    assert_eq!(value["unit"], "ms");
    assert_eq!(value["baseline"]["label"], "old");
    assert_eq!(value["candidate"]["label"], "new");
    assert_eq!(value["mean_shift"]["kind"], "regression");
}

#[test]
fn test_no_color_output_is_plain() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abstats");
    cmd.arg("--no-color")
        .write_stdin(csv(&[10.0, 10.5, 10.2], &[10.1, 10.4, 10.3]))
        .assert()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
