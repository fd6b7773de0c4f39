//! Integration tests for polysect CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polysect"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Get the path to a file in the repo's test_assets directory.
fn asset(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from polysect-cli to crates
    path.pop(); // Go up from crates to repo root
    path.push("test_assets");
    path.push(name);
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn piece_areas(feature: &Value) -> Vec<f64> {
    feature["pieces"]
        .as_array()
        .expect("pieces array")
        .iter()
        .map(|p| p["area"].as_f64().expect("area"))
        .collect()
}

#[test]
fn clip_with_line_flag_produces_svg() {
    let output = run(&["clip", &asset("square_cut.svg"), "--line", "-10,50 110,50"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml"), "Output should be an SVG document");
    assert!(stdout.contains("viewBox=\"0 0 120 120\""), "Should keep the input viewBox");
    assert_eq!(stdout.matches("<path id=\"plot-").count(), 2, "Square should split in two");
    assert!(stdout.contains("data-role=\"cut\""), "Should draw the cut line");
}

#[test]
fn clip_uses_the_cut_line_drawn_in_the_svg() {
    let output = run(&["clip", &asset("square_cut.svg"), "-f", "json"]);
    let report = stdout_json(&output);

    assert_eq!(report["variant"], "accurate");
    let features = report["features"].as_array().expect("features array");
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["id"], "plot");
    assert_eq!(features[0]["split"], true);

    let areas = piece_areas(&features[0]);
    assert_eq!(areas.len(), 2);
    for area in areas {
        assert!((area - 5000.0).abs() < 1e-6, "Each half should be 5000, got {}", area);
    }
}

#[test]
fn clip_keeps_holes_in_their_pieces() {
    let output = run(&["clip", &asset("square_with_hole.svg"), "-l", "50,-10 50,110", "-f", "json"]);
    let report = stdout_json(&output);
    let feature = &report["features"][0];

    assert_eq!(feature["split"], true);
    let areas = piece_areas(feature);
    assert_eq!(areas.len(), 2);
    let total: f64 = areas.iter().sum();
    assert!((total - 8400.0).abs() < 1e-6, "Pieces should cover the yard minus the hole, got {}", total);
    assert!((feature["area"].as_f64().unwrap() - 8400.0).abs() < 1e-6);
}

#[test]
fn clip_that_misses_reports_the_whole_polygon() {
    let output = run(&["clip", &asset("square_cut.svg"), "-l", "200,0 200,100", "-f", "json"]);
    let report = stdout_json(&output);
    let feature = &report["features"][0];

    assert_eq!(feature["split"], false);
    let areas = piece_areas(feature);
    assert_eq!(areas.len(), 1);
    assert!((areas[0] - 10000.0).abs() < 1e-6);
}

#[test]
fn clip_without_any_cut_line_fails() {
    let output = run(&["clip", &asset("no_cut.svg")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no cut line"), "Unexpected stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn clip_rejects_a_bad_line() {
    let output = run(&["clip", &asset("square_cut.svg"), "--line", "50,-10"]);
    assert!(!output.status.success());
}

#[test]
fn clip_writes_to_output_file() {
    let out = std::env::temp_dir().join(format!("polysect-it-{}.svg", std::process::id()));
    let output = run(&["clip", &asset("square_cut.svg"), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "Nothing should go to stdout with -o");

    let written = std::fs::read_to_string(&out).expect("output file");
    assert!(written.contains("<svg"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn clip_renders_a_png_preview() {
    let png = std::env::temp_dir().join(format!("polysect-it-{}.png", std::process::id()));
    let output = run(&["clip", &asset("square_cut.svg"), "--png", png.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bytes = std::fs::read(&png).expect("PNG file should be written");
    assert!(bytes.len() > 8, "PNG should not be empty");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "Should start with the PNG signature");
    let _ = std::fs::remove_file(&png);
}

#[test]
fn inspect_lists_parts_and_cut_lines() {
    let output = run(&["inspect", &asset("square_with_hole.svg")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 polygon(s), 2 ring(s)"), "{}", stdout);
    assert!(stdout.contains("1 hole(s)"));
    assert!(stdout.contains("no cut lines"));

    let output = run(&["inspect", &asset("square_cut.svg")]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cut line 0: 2 point(s)"), "{}", stdout);
    assert!(stdout.contains("1 all-outside"));
}

#[test]
fn recipe_example_is_valid_yaml() {
    let output = run(&["recipe", "--example"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_yaml::Value = serde_yaml::from_str(&stdout).expect("example should parse");
    assert_eq!(parsed["clip"]["variant"].as_str(), Some("accurate"));
}

#[test]
fn recipe_runs_a_job_file() {
    let output = run(&["recipe", &asset("yard_job.yaml")]);
    let report = stdout_json(&output);

    assert_eq!(report["variant"], "fast");
    let feature = &report["features"][0];
    assert_eq!(feature["id"], "yard");
    assert_eq!(feature["variant_used"], "fast");
    assert_eq!(piece_areas(feature).len(), 2);
}

#[test]
fn recipe_without_job_fails() {
    let output = run(&["recipe"]);
    assert_eq!(output.status.code(), Some(1));
}
