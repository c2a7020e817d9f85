use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn missing_workload_prefix_is_rejected_before_any_io() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("keystats").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
    // Nothing was read or written in the scratch directory.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_groundtruth_file_aborts_the_run() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("keystats").unwrap();
    cmd.current_dir(dir.path()).arg("workloada");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("workloada_key_stats_hotkeys.csv"));
}

#[test]
fn missing_algorithm_result_names_the_file() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("workloada_key_stats_hotkeys.csv"),
        "user1\nuser2\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("keystats").unwrap();
    cmd.current_dir(dir.path()).arg("workloada");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("workloada_hotkeys_lru.csv"));
}

#[test]
fn ycsb_coverage_reports_identification_ratios() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("key_stats_hotkeys.csv"),
        "k1\nk2\nk3\nk4\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("hotkeys_lruk.csv"), "k1\nk2\n").unwrap();
    std::fs::write(dir.path().join("hotkeys_window.csv"), "k1\nx9\n").unwrap();
    std::fs::write(dir.path().join("hotkeys_sketch.csv"), "x1\nx2\nk1\nk2\n").unwrap();

    let mut cmd = Command::cargo_bin("ycsb_coverage").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "lruk: \n - Hot keys identified ratio: 100.00%",
        ))
        .stdout(predicate::str::contains(
            "window: \n - Hot keys identified ratio: 50.00%",
        ))
        .stdout(predicate::str::contains(
            "sketch: \n - Hot keys identified ratio: 50.00%",
        ));
}

#[test]
fn ycsb_coverage_fails_without_its_fixed_inputs() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ycsb_coverage").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("key_stats_hotkeys.csv"));
}
