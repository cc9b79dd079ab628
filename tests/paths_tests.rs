// Plot output naming and logs directory checks

use std::path::Path;

use chrono::NaiveDate;
use netwatch::paths::{
    generate_output_filename, output_file_name, resolve_output_path, setup_logs_directory,
};

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 10)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap()
}

#[test]
fn file_name_carries_parameters_and_time() {
    assert_eq!(
        output_file_name("mac-mini", "HomeNet", 72, 15, now()),
        "connectivity_plot_mac-mini_HomeNet_72h_15m_20250710_140509.html"
    );
}

#[test]
fn generated_path_creates_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("charts").join("nested");
    let path = generate_output_filename("h", "n", 24, 30, &out_dir, now()).unwrap();
    assert!(out_dir.is_dir());
    assert_eq!(path.parent().unwrap(), out_dir.as_path());
    assert!(path.to_string_lossy().ends_with("connectivity_plot_h_n_24h_30m_20250710_140509.html"));
}

#[test]
fn explicit_output_wins() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("mine.html");
    let path = resolve_output_path(Some(&explicit), "h", "n", 24, 30, dir.path(), now()).unwrap();
    assert_eq!(path, explicit);
}

#[test]
fn empty_explicit_output_falls_back_to_generated() {
    let dir = tempfile::tempdir().unwrap();
    let path = resolve_output_path(Some(Path::new("")), "h", "n", 24, 30, dir.path(), now()).unwrap();
    assert_eq!(path.parent().unwrap(), dir.path());
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("connectivity_plot_h_n_"));
}

#[test]
fn logs_directory_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(setup_logs_directory(dir.path()).unwrap(), dir.path());

    let missing = dir.path().join("nope");
    let err = setup_logs_directory(&missing).unwrap_err();
    assert!(err.to_string().contains("logs directory not found"));
}
