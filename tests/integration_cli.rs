//! Integration tests for the `image-dedup` binary.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::process::{Command, Output};

fn image_dedup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_image-dedup"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_pattern(dir: &TempDir, name: &str, step: u32) -> String {
    let child = dir.child(name);
    RgbImage::from_fn(40, 30, |x, y| {
        let v = ((x * step + y * (step + 11)) % 251) as u8;
        Rgb([v, 255 - v, v / 3])
    })
    .save(child.path())
    .unwrap();
    child.path().to_string_lossy().into_owned()
}

#[test]
fn json_output_is_a_full_report() {
    let dir = TempDir::new().unwrap();
    let a = write_pattern(&dir, "a.png", 7);
    let b = dir.child("b.png");
    std::fs::copy(&a, b.path()).unwrap();
    let b = b.path().to_string_lossy().into_owned();

    let output = image_dedup(&["scan", &a, &b, "--output", "json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_images"], 2);
    assert_eq!(report["duplicate_groups"][0]["count"], 2);
    assert_eq!(report["unique_images"], 0);
    let thumbnail = report["duplicate_groups"][0]["images"][0]["thumbnail"]
        .as_str()
        .unwrap();
    assert!(predicate::str::starts_with("data:image/png;base64,").eval(thumbnail));
}

#[test]
fn minimal_output_lists_redundant_copies() {
    let dir = TempDir::new().unwrap();
    let a = write_pattern(&dir, "keep.png", 5);
    let copy = dir.child("copy.png");
    std::fs::copy(&a, copy.path()).unwrap();
    let copy = copy.path().to_string_lossy().into_owned();

    let output = image_dedup(&["scan", &a, &copy, "--output", "minimal"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(predicate::str::contains("copy.png").eval(&stdout));
    assert!(predicate::str::contains("keep.png").not().eval(&stdout));
}

#[test]
fn html_report_is_written_to_file() {
    let dir = TempDir::new().unwrap();
    let a = write_pattern(&dir, "a.png", 3);
    let report = dir.child("report.html");

    let output = image_dedup(&[
        "scan",
        &a,
        "--output",
        "minimal",
        "--report",
        &report.path().to_string_lossy(),
    ]);

    assert!(output.status.success());
    report.assert(predicate::str::contains("<html"));
    report.assert(predicate::str::contains("a.png"));
}

#[test]
fn disallowed_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let notes = dir.child("notes.txt");
    notes.write_str("not an image").unwrap();

    let output = image_dedup(&["scan", &notes.path().to_string_lossy()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(predicate::str::contains("No valid image files selected").eval(&stderr));
}

#[test]
fn invalid_hash_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write_pattern(&dir, "a.png", 9);

    let output = image_dedup(&["scan", &a, "--hash-size", "0"]);

    assert!(!output.status.success());
}
