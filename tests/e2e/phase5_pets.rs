//! Phase 05 pet helpers E2E tests.

use std::io;
use std::path::Path;
use std::process::Command;

#[test]
fn phase5_pet_age_descriptions() -> io::Result<()> {
    let cases = [
        ("2026-02-01", "puppy/kitten"),
        ("2025-12-06", "2 months old"),
        ("2025-02-06", "1 year old"),
        ("2019-08-30", "6 years old"),
    ];
    for (born, expected) in cases {
        let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
            .args(["pet", "age", "--today", "2026-02-06", "--born", born])
            .output()?;
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(&format!("age: {expected}\n")), "{born}: {stdout}");
    }
    Ok(())
}

#[test]
fn phase5_profile_prefill_from_analysis() -> io::Result<()> {
    let analysis = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/e2e/fixtures/dog-analysis.json");
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["--json", "pet", "profile", "--name", "Scout", "--analysis"])
        .arg(analysis)
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let profile = value
        .get("profile")
        .ok_or_else(|| io::Error::other("missing profile"))?;
    let field = |name: &str| profile.get(name).and_then(serde_json::Value::as_str);
    assert_eq!(field("breed"), Some("Australian Shepherd"));
    assert_eq!(field("weight"), None);
    assert_eq!(field("rabies_vaccinated"), Some("unknown"));
    assert_eq!(field("separation_anxiety"), Some("high"));
    assert_eq!(field("daily_exercise_need"), Some("high"));
    assert_eq!(field("environment_preference"), Some("nature"));
    Ok(())
}

#[test]
fn phase5_long_names_are_rejected() -> io::Result<()> {
    let name = "N".repeat(51);
    let output = Command::new(env!("CARGO_BIN_EXE_pawtrip"))
        .args(["pet", "profile", "--name", &name])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("ERR_DOMAIN_INVALID_PET_NAME"));
    Ok(())
}
