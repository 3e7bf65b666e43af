use std::fs;
use std::path::{Path, PathBuf};

use sensorwire_core::{Config, NullSink, Protocol, Quantity, Report, analyze_capture_file};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_expected_report(dir: &str) -> Report {
    let expected_path = repo_root().join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str, input: &str, protocol: Protocol) {
    let input = repo_root().join(dir).join(input);
    let expected = load_expected_report(dir);

    let mut actual = analyze_capture_file(&input, protocol, &Config::default(), &mut NullSink)
        .expect("analyze capture");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_line() {
    run_golden("tests/golden/line", "input.log", Protocol::Line);
}

#[test]
fn golden_frame() {
    run_golden("tests/golden/frame", "input.bin", Protocol::Frame);
}

#[test]
fn strict_checksum_rejects_corrupted_frame() {
    let input = repo_root().join("tests/golden/frame/input.bin");
    let config = Config::from_toml_str("[frame]\nstrict_checksum = true\n").unwrap();

    let report = analyze_capture_file(&input, Protocol::Frame, &config, &mut NullSink).unwrap();

    let summary = report.decode_summary.expect("decode summary");
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.errors, 2);
    assert_eq!(summary.checksum_mismatches, 0);
    let kinds: Vec<&str> = summary
        .errors_by_kind
        .iter()
        .map(|count| count.kind.as_str())
        .collect();
    assert_eq!(kinds, ["checksum_mismatch", "out_of_range"]);
}

#[test]
fn sink_receives_every_accepted_value() {
    let input = repo_root().join("tests/golden/line/input.log");
    let mut published: Vec<(Quantity, f32)> = Vec::new();

    analyze_capture_file(&input, Protocol::Line, &Config::default(), &mut published).unwrap();

    assert_eq!(published.len(), 6);
    assert_eq!(published[0], (Quantity::Humidity, 70.0));
    assert_eq!(published[5], (Quantity::Temperature, 29.0));
}

#[test]
fn decoding_line_capture_as_frames_finds_nothing() {
    let input = repo_root().join("tests/golden/line/input.log");

    let report = analyze_capture_file(&input, Protocol::Frame, &Config::default(), &mut NullSink)
        .unwrap();

    let summary = report.decode_summary.expect("decode summary");
    assert_eq!(summary.valid, 0);
    assert!(summary.errors > 0);
    assert!(report.last_reading.is_none());
    assert!(report.quantities.iter().all(|q| q.mean.is_none()));
}
