use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("tradeviz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tradeviz"));
}

#[test]
fn regress_prints_slope_and_intercept() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("pts.csv");
    fs::write(&csv, "x,y\n1,2\n2,4\n3,6\n").unwrap();

    let mut cmd = Command::cargo_bin("tradeviz").unwrap();
    cmd.arg("regress").arg(&csv).arg("--stats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("slope=2 intercept=0"))
        .stdout(predicate::str::contains("r=1 t=NA df=1"));
}

#[test]
fn regress_rejects_shared_x() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("pts.csv");
    fs::write(&csv, "x,y\n2,1\n2,5\n").unwrap();

    let mut cmd = Command::cargo_bin("tradeviz").unwrap();
    cmd.arg("regress").arg(&csv);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("degenerate input"));
}

#[test]
fn render_demo_to_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("faceted.svg");
    let geometry = dir.path().join("faceted.json");
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/faceted_growth.json");

    let mut cmd = Command::cargo_bin("tradeviz").unwrap();
    cmd.arg("render")
        .arg(&demo)
        .arg("--out")
        .arg(&out)
        .arg("--geometry")
        .arg(&geometry)
        .args(["--title", "Fastest-growing green exports"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote faceted chart"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Fastest-growing green exports"));
    assert!(geometry.exists());
}

#[test]
fn render_size_overrides_reach_the_svg() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bar.svg");
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/bar_china.json");

    let mut cmd = Command::cargo_bin("tradeviz").unwrap();
    cmd.arg("render")
        .arg(&demo)
        .arg("--out")
        .arg(&out)
        .args(["--width", "640", "--height", "320"]);
    cmd.assert().success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="640""#));
    assert!(svg.contains(r#"height="320""#));
}
