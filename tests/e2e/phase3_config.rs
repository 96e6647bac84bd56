//! Phase 03 config loading E2E tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("tests")
        .join("e2e")
        .join("fixtures")
        .join(relative)
}

fn pawtrip() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pawtrip"));
    for (key, _) in std::env::vars() {
        if key.starts_with("PAWTRIP_TRIP_") {
            command.env_remove(key);
        }
    }
    command
}

#[test]
fn phase3_toml_config_drives_the_policy() -> io::Result<()> {
    let config = fixture_path("planner.toml");

    let output = pawtrip()
        .args(["--json", "config", "show", "--path"])
        .arg(&config)
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let trip = value
        .get("effectiveConfig")
        .and_then(|config| config.get("trip"))
        .ok_or_else(|| io::Error::other("missing effectiveConfig.trip"))?;
    assert_eq!(trip.get("maxDays").and_then(serde_json::Value::as_u64), Some(10));
    assert_eq!(
        trip.get("upcomingWindowDays").and_then(serde_json::Value::as_u64),
        Some(5)
    );

    let output = pawtrip()
        .args(["dates", "check", "--today", "2026-02-06"])
        .args(["--from", "2026-02-10", "--to", "2026-02-18", "--config"])
        .arg(&config)
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("length: 9"));
    Ok(())
}

#[test]
fn phase3_invalid_overrides_are_rejected() -> io::Result<()> {
    let output = pawtrip()
        .args(["--json", "config", "validate", "--overrides-json"])
        .arg(r#"{"trip":{"maxDays":0}}"#)
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let code = value
        .get("error")
        .and_then(|error| error.get("code"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(code, Some("ERR_CONFIG_INVALID_LIMIT"));
    Ok(())
}

#[test]
fn phase3_malformed_env_is_reported() -> io::Result<()> {
    let output = pawtrip()
        .args(["config", "validate"])
        .env("PAWTRIP_TRIP_MAX_DAYS", "seven")
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("status: error"));
    Ok(())
}

#[test]
fn phase3_schema_is_json() -> io::Result<()> {
    let output = pawtrip().args(["config", "schema"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert!(value.get("properties").is_some());
    Ok(())
}
