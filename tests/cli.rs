extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn renders_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("small.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "32x18", "--iterations", "40", "--threads", "2"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved image"));
    assert!(output.exists());
}

#[test]
fn accepts_a_negative_center() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("centered.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "16x16", "--center", "-0.75,-0.1", "--span", "1.5"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn unwritable_destination_reports_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("image.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "8x8"])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("I/O failure"));
}

#[test]
fn negative_span_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.png");
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "8x8", "--span", "-1"])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid span"));
    assert!(!output.exists());
}

#[test]
fn zero_width_is_rejected() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "0x8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid width"));
}

#[test]
fn malformed_size_is_rejected() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn oversized_image_is_rejected() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--size", "4294967295x4294967295"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid width"));
}
