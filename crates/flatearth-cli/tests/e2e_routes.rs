//! E2E tests for covering routes and zero in-degree conversion:
//! `routes`, `route`, `convert-zero-in`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CYCLE: &str = "0 1 0 0\n0 0 1 0\n0 0 0 1\n1 0 0 0\n";
const STAR: &str = "0 1 1\n0 0 0\n0 0 0\n";

fn fe_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("flatearth"));
    cmd.current_dir(dir);
    cmd.env("FLATEARTH_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn fe_json_cmd(dir: &Path) -> Command {
    let mut cmd = fe_cmd(dir);
    cmd.env("FORMAT", "json");
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn stderr_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should not crash");
    assert!(!output.status.success(), "command unexpectedly succeeded");
    serde_json::from_slice(&output.stderr).expect("valid JSON error")
}

// ---------------------------------------------------------------------------
// routes
// ---------------------------------------------------------------------------

#[test]
fn routes_from_any_start_on_cycle() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);

    let json = stdout_json(fe_json_cmd(dir.path()).args(["routes", "-m", "ring.txt", "--list"]));
    assert_eq!(json["total"], 4);
    assert_eq!(json["position"], 1);
    assert_eq!(json["route"], json!([1, 2, 3, 4]));
    assert_eq!(json["routes"][3], json!([4, 1, 2, 3]));
}

#[test]
fn routes_text_shows_cursor_surface() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);

    fe_cmd(dir.path())
        .args(["routes", "-m", "ring.txt", "--index", "3", "--format", "text"])
        .assert()
        .success()
        .stdout("3/4 3 4 1 2\n");
}

#[test]
fn routes_index_is_clamped() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);

    let json = stdout_json(fe_json_cmd(dir.path()).args([
        "routes", "-m", "ring.txt", "--start", "2", "--index", "99",
    ]));
    assert_eq!(json["start"], 2);
    assert_eq!(json["position"], 1);
    assert_eq!(json["total"], 1);
    assert_eq!(json["route"], json!([2, 3, 4, 1]));
}

#[test]
fn routes_on_star_report_invalid_topology() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "star.txt", STAR);

    let err = stderr_json(fe_json_cmd(dir.path()).args(["routes", "-m", "star.txt"]));
    assert_eq!(err["error"]["error_code"], "invalid_topology");
    assert!(err["error"]["suggestion"].is_string());
}

#[test]
fn routes_with_start_out_of_range() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);

    let err = stderr_json(fe_json_cmd(dir.path()).args(["routes", "-m", "ring.txt", "--start", "9"]));
    assert_eq!(err["error"]["error_code"], "node_out_of_range");

    fe_cmd(dir.path())
        .args(["routes", "-m", "ring.txt", "--start", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("node numbers start at 1"));
}

#[test]
fn routes_on_empty_graph() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "empty.txt", "# nothing here\n");

    let err = stderr_json(fe_json_cmd(dir.path()).args(["routes", "-m", "empty.txt"]));
    assert_eq!(err["error"]["error_code"], "empty_graph");
}

// ---------------------------------------------------------------------------
// route
// ---------------------------------------------------------------------------

#[test]
fn single_route_from_start() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);
    write_file(dir.path(), "rooms.txt", "Hall\nKitchen\nStudy\nAttic\n");

    let json = stdout_json(fe_json_cmd(dir.path()).args([
        "route", "-m", "ring.txt", "-n", "rooms.txt", "--start", "3",
    ]));
    assert_eq!(json["route"], json!([3, 4, 1, 2]));
    assert_eq!(json["labels"][0], "3 (Study)");

    fe_cmd(dir.path())
        .args(["route", "-m", "ring.txt", "--start", "1", "--format", "pretty"])
        .assert()
        .success()
        .stdout("Route from 1: 1 → 2 → 3 → 4\n");
}

#[test]
fn single_route_budget_exhausted() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "ring.txt", CYCLE);

    fe_cmd(dir.path())
        .args(["route", "-m", "ring.txt", "--start", "1", "--budget", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "impossible to cover all nodes starting at node 1",
        ));
}

// ---------------------------------------------------------------------------
// convert-zero-in
// ---------------------------------------------------------------------------

#[test]
fn convert_then_route_on_star() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(dir.path(), "star.txt", STAR);

    let json = stdout_json(fe_json_cmd(dir.path()).args([
        "convert-zero-in", "-m", "star.txt", "--write",
    ]));
    assert_eq!(json["converted"], json!([1]));
    assert_eq!(json["edges_added"], 2);
    assert_eq!(json["written"], true);
    assert_eq!(
        std::fs::read_to_string(&path).expect("read back"),
        "0 1 1\n1 0 0\n1 0 0\n"
    );

    // Now 2 → 1 → 3 covers everything.
    let json = stdout_json(fe_json_cmd(dir.path()).args(["route", "-m", "star.txt", "--start", "2"]));
    assert_eq!(json["route"], json!([2, 1, 3]));
}

#[test]
fn convert_without_write_leaves_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(dir.path(), "star.txt", STAR);

    fe_cmd(dir.path())
        .args(["convert-zero-in", "-m", "star.txt", "--format", "text"])
        .assert()
        .success()
        .stdout("0 1 1\n1 0 0\n1 0 0\n");
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), STAR);
}

#[test]
fn convert_node_with_predecessors_is_noop() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "star.txt", STAR);

    fe_cmd(dir.path())
        .args(["convert-zero-in", "-m", "star.txt", "--node", "2", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Nothing to convert."));
}
