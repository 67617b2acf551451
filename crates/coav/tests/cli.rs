#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{ImageBuffer, Luma};
use predicates::prelude::*;
use serde_json::Value;

const WIDTH: u32 = 100;
const HEIGHT: u32 = 20;

/// 90 x 60 degree camera, millimetre samples, 18 degree slices (10 per frame).
const CONFIG: &str = r#"{
    "camera": { "hfov_deg": 90.0, "vfov_deg": 60.0, "scale": 0.001 },
    "detector": { "angle_step": 0.15707963267948966, "threshold": 2.0, "density": 0.5 },
    "simple": { "threshold": 1.5 }
}"#;

fn block_samples(columns: std::ops::Range<u32>) -> Vec<u16> {
    (0..WIDTH * HEIGHT)
        .map(|i| if columns.contains(&(i % WIDTH)) { 1000 } else { 0 })
        .collect()
}

fn write_png(dir: &Path, columns: std::ops::Range<u32>) -> PathBuf {
    let path = dir.join("depth.png");
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(WIDTH, HEIGHT, block_samples(columns)).expect("buffer");
    img.save(&path).expect("save png");
    path
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, CONFIG).expect("write config");
    path
}

fn coav() -> Command {
    Command::cargo_bin("coav").expect("coav binary")
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("json on stdout")
}

#[test]
fn detect_png_reports_one_obstacle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let depth = write_png(dir.path(), 50..60);
    let config = write_config(dir.path());

    let report = stdout_json(coav().arg("detect").arg(&depth).arg("--config").arg(&config));
    assert_eq!(report["width"], 100);
    assert_eq!(report["height"], 20);

    let obstacles = report["obstacles"].as_array().expect("obstacles array");
    assert_eq!(obstacles.len(), 1);
    assert_eq!(obstacles[0]["center"]["len"], 1.0);
    let theta = obstacles[0]["center"]["theta"].as_f64().expect("theta");
    assert!(theta < std::f64::consts::FRAC_PI_2);
}

#[test]
fn detect_raw_matches_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());
    let png = write_png(dir.path(), 45..56);
    let raw = dir.path().join("depth.raw");
    let bytes: Vec<u8> = block_samples(45..56)
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    std::fs::write(&raw, bytes).expect("write raw");

    let from_png = stdout_json(coav().arg("detect").arg(&png).arg("-c").arg(&config));
    let from_raw = stdout_json(
        coav()
            .arg("detect")
            .arg(&raw)
            .args(["--raw", "100x20", "-c"])
            .arg(&config),
    );
    assert_eq!(from_png, from_raw);
    assert_eq!(from_png["obstacles"].as_array().map(Vec::len), Some(2));
}

#[test]
fn simple_detector_and_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let depth = write_png(dir.path(), 45..56);
    let config = write_config(dir.path());
    let out = dir.path().join("report.json");

    coav()
        .arg("detect")
        .arg(&depth)
        .arg("--simple")
        .arg("-c")
        .arg(&config)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("read report")).expect("json");
    assert_eq!(report["ahead"], true);
}

#[test]
fn histogram_lists_every_slice() {
    let dir = tempfile::tempdir().expect("tempdir");
    let depth = write_png(dir.path(), 50..60);
    let config = write_config(dir.path());

    let report = stdout_json(coav().arg("histogram").arg(&depth).arg("-c").arg(&config));
    let slices = report["slices"].as_array().expect("slices");
    assert_eq!(slices.len(), 10);
    assert_eq!(report["slice_pixel_count"], 200);
    assert_eq!(report["rows"], serde_json::json!([0, 20]));
    assert_eq!(slices[5]["range"], 1.0);
    assert_eq!(slices[5]["near"], 200);
    assert_eq!(slices[0]["near"], 0);
}

#[test]
fn missing_input_fails_with_message() {
    coav()
        .args(["detect", "/nonexistent/depth.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/depth.png"));
}

#[test]
fn bad_raw_dimensions_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("depth.raw");
    std::fs::write(&raw, [0u8; 10]).expect("write raw");

    coav()
        .arg("detect")
        .arg(&raw)
        .args(["--raw", "4x4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 32"));

    coav()
        .arg("detect")
        .arg(&raw)
        .args(["--raw", "four-by-four"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WxH"));

    coav()
        .arg("detect")
        .arg(&raw)
        .args(["--raw", "99999999999x99999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}
