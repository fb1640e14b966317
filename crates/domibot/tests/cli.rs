mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn domibot() -> Command {
    Command::cargo_bin("domibot").expect("binary")
}

#[test]
fn solve_prints_joint_angles() {
    domibot()
        .args(["solve", "--x", "0.2", "--y", "0", "--yaw", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("joint1_degrees"))
        .stdout(predicate::str::contains("joint4_degrees"));
}

#[test]
fn solve_rejects_targets_out_of_reach() {
    domibot()
        .args(["solve", "--x", "1", "--y", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unreachable"));
}

#[test]
fn default_config_round_trips_through_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cfg.json");
    domibot()
        .args(["default-config", "--profile", "physical", "--out"])
        .arg(&path)
        .assert()
        .success();

    domibot()
        .args(["solve", "--x", "0.25", "--y", "-0.05", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn analyze_and_play_a_synthetic_frame() {
    let dir = tempfile::tempdir().expect("tempdir");
    let frame = dir.path().join("frame.png");
    common::table_frame().save(&frame).expect("save frame");

    domibot()
        .arg("analyze")
        .arg("--frame")
        .arg(&frame)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"open_values\""))
        .stdout(predicate::str::contains("\"hand_index\": 1"));

    let out = dir.path().join("play.json");
    domibot()
        .args(["play", "--hand-index", "1", "--frame"])
        .arg(&frame)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let json = std::fs::read_to_string(&out).expect("report");
    assert!(json.contains("\"direction\": \"right\""));
    assert!(json.contains("\"rotation_degrees\": 90.0"));
}

#[test]
fn analyze_needs_an_input() {
    domibot().arg("analyze").assert().failure();
}
