//! Phase 01 CLI E2E smoke tests.

use std::io;
use std::process::Command;

fn run_info(format: &str) -> io::Result<String> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--output", format, "info"])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("info failed: {stderr}")));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[test]
fn phase1_info_is_deterministic() -> io::Result<()> {
    let first = run_info("json")?;
    let second = run_info("json")?;
    assert_eq!(first, second, "info output should be deterministic");

    let value: serde_json::Value = serde_json::from_str(&first).map_err(io::Error::other)?;
    assert_eq!(value.get("status").and_then(|v| v.as_str()), Some("ok"));
    assert_eq!(
        value
            .get("defaults")
            .and_then(|v| v.get("maxTripDays"))
            .and_then(serde_json::Value::as_u64),
        Some(7)
    );
    Ok(())
}

#[test]
fn phase1_agent_mode_emits_one_ndjson_line() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--agent", "info"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).map_err(io::Error::other)?;
    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("summary"));
    Ok(())
}

#[test]
fn phase1_unknown_subcommand_fails() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .arg("book-flight")
        .output()?;
    assert!(!output.status.success());
    Ok(())
}
