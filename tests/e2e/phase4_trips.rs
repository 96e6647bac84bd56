//! Phase 04 trip search and upcoming-trip E2E tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .unwrap_or(manifest_dir)
        .join("tests/e2e/fixtures")
        .join(relative)
}

fn json_stdout(stdout: &[u8]) -> io::Result<serde_json::Value> {
    serde_json::from_slice(stdout).map_err(io::Error::other)
}

#[test]
fn phase4_valid_search_from_file() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--json", "trip", "validate", "--today", "2026-02-06", "--input"])
        .arg(fixture_path("trip-search.valid.json"))
        .output()?;
    assert!(output.status.success());

    let value = json_stdout(&output.stdout)?;
    assert_eq!(
        value.get("result"),
        Some(&serde_json::json!({ "lengthDays": 4, "imminent": true }))
    );
    assert_eq!(
        value.get("travelMode").and_then(serde_json::Value::as_str),
        Some("roadtrip")
    );
    Ok(())
}

#[test]
fn phase4_party_size_limit_is_enforced() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--agent", "trip", "validate", "--today", "2026-02-06", "--input"])
        .arg(fixture_path("trip-search.too-many-adults.json"))
        .env_remove("PAWTRIP_TRIP_MAX_ADULTS")
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value = json_stdout(&output.stdout)?;
    assert_eq!(value.get("type").and_then(serde_json::Value::as_str), Some("error"));
    let error = value
        .get("error")
        .ok_or_else(|| io::Error::other("missing error"))?;
    assert_eq!(
        error.get("code").and_then(serde_json::Value::as_str),
        Some("ERR_DOMAIN_INVALID_PARTY_SIZE")
    );
    assert_eq!(
        error
            .get("meta")
            .and_then(|meta| meta.get("field"))
            .and_then(serde_json::Value::as_str),
        Some("adults")
    );
    Ok(())
}

#[test]
fn phase4_request_from_stdin() -> io::Result<()> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["trip", "validate", "--stdin", "--today", "2026-02-06"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(
            br#"{"destination":"Duluth, MN","from":"2026-02-20","to":"2026-02-21","adults":1}"#,
        )?;
    }
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lengthDays: 2"));
    assert!(stdout.contains("imminent: false"));
    Ok(())
}

#[test]
fn phase4_missing_input_file_is_io_error() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["trip", "validate", "--input"])
        .arg(fixture_path("does-not-exist.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn phase4_upcoming_ndjson_stream() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--output", "ndjson", "trip", "upcoming", "--today", "2026-02-06"])
        .args(["--start", "2026-02-06", "2026-02-09", "2026-02-10"])
        .env_remove("PAWTRIP_TRIP_UPCOMING_WINDOW_DAYS")
        .output()?;
    assert!(output.status.success());

    let statuses: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| -> io::Result<String> {
            let value: serde_json::Value = serde_json::from_str(line).map_err(io::Error::other)?;
            Ok(value
                .get("status")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned())
        })
        .collect::<io::Result<_>>()?;
    assert_eq!(statuses, ["imminent", "imminent", "upcoming", "ok"]);
    Ok(())
}
