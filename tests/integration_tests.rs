use std::fs;
use std::path::Path;

use tempfile::TempDir;
use uptime_aggregator::aggregate::{self, Mode};
use uptime_aggregator::report;

const HEADER: &str = "exported availability report\nwindow;half-day\nkey;availability\n---\n";

fn write_report(dir: &Path, name: &str, rows: &[(&str, &str)]) {
    let mut contents = String::from(HEADER);
    for (key, value) in rows {
        contents.push_str(&format!("{key};{value}\n"));
    }
    fs::write(dir.join(name), contents).unwrap();
}

fn output_files(dir: &Path) -> (String, String) {
    let name = dir.file_name().unwrap().to_str().unwrap();
    let partials = fs::read_to_string(dir.join("output").join(format!("{name}.partials.csv"))).unwrap();
    let summary = fs::read_to_string(dir.join("output").join(format!("{name}.output.csv"))).unwrap();
    (partials, summary)
}

fn run(dir: &Path, mode: Mode) {
    report::ensure_output_dir(dir).unwrap();
    let data = aggregate::collect(dir, mode).unwrap();
    report::write_reports(dir, &data).unwrap();
}

#[test]
fn test_period_mode_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_report(
        dir,
        "summary_2024-01-01T00:00:00-2024-01-01T12:00:00.csv",
        &[("siteX", "80.0"), ("siteY", "100.0")],
    );
    write_report(
        dir,
        "summary_2024-01-01T12:00:00-2024-01-02T00:00:00.csv",
        &[("siteX", "60.0")],
    );
    // Not pattern-shaped: skipped, contributes nothing to the period count
    write_report(dir, "random.csv", &[("siteZ", "100.0")]);

    run(dir, Mode::Period);

    let (partials, summary) = output_files(dir);
    assert_eq!(
        partials,
        "BP key: 2024-01-01_AM,2024-01-01_PM\nsiteX: 80.0,60.0\nsiteY: 100.0\n"
    );
    assert_eq!(
        summary,
        "BP key,average %,number of submissions\nsiteY,50.0,1\nsiteX,70.0,2\n"
    );
}

#[test]
fn test_simple_mode_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_report(dir, "morning.csv", &[("siteX", "80.0"), ("siteY", "100.0")]);
    write_report(dir, "evening.csv", &[("siteX", "60.0")]);

    run(dir, Mode::Simple);

    let (partials, summary) = output_files(dir);
    // Files process in sorted name order: evening.csv first
    assert_eq!(partials, "siteX: [60.0, 80.0]\nsiteY: [100.0]\n");
    assert_eq!(summary, "siteY,50.0,1\nsiteX,70.0,2\n");
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_report(
        dir,
        "summary_2024-01-01T00:00:00-2024-01-01T12:00:00.csv",
        &[("siteX", "80.0"), ("siteY", "100.0")],
    );
    write_report(
        dir,
        "summary_2024-01-02T00:00:00-2024-01-02T12:00:00.csv",
        &[("siteY", "40.0"), ("siteX", "60.0")],
    );

    run(dir, Mode::Period);
    let first = output_files(dir);
    run(dir, Mode::Period);
    let second = output_files(dir);

    assert_eq!(first, second);
}

#[test]
fn test_duplicate_key_in_one_file_keeps_last_value() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_report(
        dir,
        "summary_2024-01-01T00:00:00-2024-01-01T12:00:00.csv",
        &[("siteX", "80.0"), ("siteX", "20.0")],
    );

    run(dir, Mode::Period);

    let (partials, summary) = output_files(dir);
    assert_eq!(partials, "BP key: 2024-01-01_AM\nsiteX: 20.0\n");
    assert_eq!(summary, "BP key,average %,number of submissions\nsiteX,20.0,1\n");
}

#[test]
fn test_malformed_row_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    write_report(
        dir,
        "summary_2024-01-01T00:00:00-2024-01-01T12:00:00.csv",
        &[("siteX", "eighty")],
    );

    assert!(aggregate::collect(dir, Mode::Period).is_err());
}

#[test]
fn test_missing_directory_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent");

    assert!(aggregate::collect(&missing, Mode::Period).is_err());
}

#[test]
fn test_empty_directory_writes_empty_reports() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    run(dir, Mode::Period);

    let (partials, summary) = output_files(dir);
    assert_eq!(partials, "BP key: \n");
    assert!(summary.starts_with("BP key,average %,number of submissions\n"));
}

#[test]
fn test_two_files_same_half_day_share_a_column() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    // Both start hours are nonzero, so both files map to the PM label
    write_report(
        dir,
        "summary_2024-01-01T06:00:00-2024-01-01T12:00:00.csv",
        &[("siteX", "100.0")],
    );
    write_report(
        dir,
        "summary_2024-01-01T12:00:00-2024-01-01T18:00:00.csv",
        &[("siteX", "50.0")],
    );

    run(dir, Mode::Period);

    let (partials, summary) = output_files(dir);
    // Later file wins the shared (key, period) cell; two matched files still
    // set the averaging baseline
    assert_eq!(partials, "BP key: 2024-01-01_PM\nsiteX: 50.0\n");
    assert_eq!(summary, "BP key,average %,number of submissions\nsiteX,25.0,1\n");
}
