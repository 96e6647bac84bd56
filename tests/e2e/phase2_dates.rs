//! Phase 02 date policy E2E tests (reference day 2026-02-06, 7-day limit).

use std::io;
use std::process::{Command, Output};

const TODAY: &str = "2026-02-06";

fn dates_check(extra: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--json", "dates", "check", "--today", TODAY])
        .args(extra)
        .env_remove("PAWTRIP_TRIP_MAX_DAYS")
        .output()
}

fn result_of(output: &Output) -> io::Result<serde_json::Value> {
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    value
        .get("result")
        .cloned()
        .ok_or_else(|| io::Error::other("missing result"))
}

#[test]
fn phase2_reference_scenarios() -> io::Result<()> {
    let cases: [(&[&str], serde_json::Value); 5] = [
        (
            &["--from", "2026-02-05", "--to", "2026-02-07"],
            serde_json::json!({ "valid": false, "reason": "start-before-today" }),
        ),
        (
            &["--from", "2026-02-08", "--to", "2026-02-08"],
            serde_json::json!({ "valid": false, "reason": "end-not-after-start" }),
        ),
        (
            &["--from", "2026-02-10", "--to", "2026-02-18"],
            serde_json::json!({ "valid": false, "reason": "too-long" }),
        ),
        (
            &["--from", "2026-02-06", "--to", "2026-02-08"],
            serde_json::json!({ "valid": true, "length": 3 }),
        ),
        (
            &["--to", "2026-02-08"],
            serde_json::json!({ "valid": false, "reason": "incomplete" }),
        ),
    ];

    for (args, expected) in cases {
        let output = dates_check(args)?;
        let valid = expected.get("valid").and_then(serde_json::Value::as_bool);
        let expected_code = if valid == Some(true) { 0 } else { 4 };
        assert_eq!(output.status.code(), Some(expected_code), "args: {args:?}");
        assert_eq!(result_of(&output)?, expected, "args: {args:?}");
    }
    Ok(())
}

#[test]
fn phase2_timestamps_are_truncated_to_days() -> io::Result<()> {
    let output = dates_check(&["--from", "2026-02-06T23:30:00Z", "--to", "2026-02-08"])?;
    assert_eq!(output.status.code(), Some(2), "timestamps are not YYYY-MM-DD flags");

    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--json", "trip", "upcoming", "--today", "2026-02-06T08:00:00+02:00"])
        .args(["--start", "2026-02-06T23:59:00+02:00"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let status = value
        .get("trips")
        .and_then(|trips| trips.get(0))
        .and_then(|trip| trip.get("status"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(status, Some("imminent"));
    Ok(())
}

#[test]
fn phase2_max_days_env_override_applies() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--json", "dates", "check", "--today", TODAY])
        .args(["--from", "2026-02-10", "--to", "2026-02-18"])
        .env("PAWTRIP_TRIP_MAX_DAYS", "9")
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        result_of(&output)?,
        serde_json::json!({ "valid": true, "length": 9 })
    );
    Ok(())
}
