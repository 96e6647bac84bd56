//! `pet age` and `pet profile` handlers.

use crate::commands::parse_date_flag;
use crate::error::CliError;
use crate::format::OutputMode;
use crate::{CliContext, CliOutput};
use pawtrip_api::v1::pet_age_to_api_v1;
use pawtrip_app::{PlannerDeps, pet_age, prefill_pet_profile};
use pawtrip_domain::{DogAnalysis, PetProfile, parse_calendar_date};
use pawtrip_shared::{ErrorCode, ErrorEnvelope, ResultExt};
use std::path::Path;
use std::sync::Arc;

/// Describe a pet's age.
pub fn run_pet_age(
    mode: OutputMode,
    ctx: &CliContext,
    born: &str,
    today: Option<&str>,
) -> Result<CliOutput, CliError> {
    let born = parse_calendar_date(born)
        .map_err(ErrorEnvelope::from)
        .with_error_metadata("flag", "born")?;
    let today = parse_date_flag("today", today)?;

    let deps = PlannerDeps::with_clock(Arc::clone(&ctx.clock));
    let age = pet_age_to_api_v1(born, pet_age(&deps, born, today));

    let payload = serde_json::json!({
        "status": "ok",
        "kind": "petAge",
        "result": age,
    });
    let stdout = mode.render(
        || format!("status: ok\nborn: {}\nage: {}\n", age.born, age.description),
        payload,
    )?;
    Ok(CliOutput::ok(stdout))
}

/// Build a pet profile, pre-filled from an analysis file when given.
pub fn run_pet_profile(
    mode: OutputMode,
    name: &str,
    analysis: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let analysis = analysis.map(read_analysis).transpose()?;
    let profile = prefill_pet_profile(name, analysis.as_ref())?;

    let payload = serde_json::json!({
        "status": "ok",
        "kind": "petProfile",
        "profile": profile,
    });
    let stdout = mode.render(|| format_profile_text(&profile), payload)?;
    Ok(CliOutput::ok(stdout))
}

fn read_analysis(path: &Path) -> Result<DogAnalysis, ErrorEnvelope> {
    let text = std::fs::read_to_string(path)
        .map_err(ErrorEnvelope::from)
        .with_error_metadata("path", path.display().to_string())?;
    serde_json::from_str(&text).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("api", "invalid_json"),
            format!("analysis payload is not valid JSON: {error}"),
        )
        .with_metadata("path", path.display().to_string())
    })
}

fn format_profile_text(profile: &PetProfile) -> String {
    let unknown = "unknown";
    format!(
        "status: ok\nname: {}\nbreed: {}\nage: {}\nweight: {} {}\nrabiesVaccinated: {}\nseparationAnxiety: {}\nflightComfort: {}\ndailyExerciseNeed: {}\nenvironment: {}\npersonality: {}\n",
        profile.name,
        profile.breed.as_deref().unwrap_or(unknown),
        profile.age.as_deref().unwrap_or(unknown),
        profile.weight.as_deref().unwrap_or(unknown),
        profile.weight_unit,
        profile.rabies_vaccinated,
        profile.separation_anxiety,
        profile.flight_comfort,
        profile.daily_exercise_need,
        profile.environment_preference,
        profile.personality_archetype,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use chrono::NaiveDate;
    use pawtrip_app::FixedClock;
    use pawtrip_config::PlannerEnv;

    #[test]
    fn age_text_uses_the_context_clock() -> Result<(), Box<dyn std::error::Error>> {
        let today = NaiveDate::from_ymd_opt(2026, 2, 6).ok_or("invalid test date")?;
        let ctx = CliContext {
            clock: Arc::new(FixedClock(today)),
            env: PlannerEnv::default(),
        };
        let output = run_pet_age(OutputMode::new(OutputFormat::Text), &ctx, "2025-11-20", None)?;
        assert_eq!(output.stdout, "status: ok\nborn: 2025-11-20\nage: 3 months old\n");
        Ok(())
    }

    #[test]
    fn profile_without_analysis_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_pet_profile(OutputMode::new(OutputFormat::Json), "Biscuit", None)?;
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["profile"]["name"], "Biscuit");
        assert_eq!(value["profile"]["environment_preference"], "mixed");
        assert_eq!(value["profile"]["weight_unit"], "lb");
        Ok(())
    }

    #[test]
    fn missing_analysis_file_is_an_io_error() -> Result<(), Box<dyn std::error::Error>> {
        let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("missing-analysis.json");
        let Err(error) =
            run_pet_profile(OutputMode::new(OutputFormat::Text), "Biscuit", Some(&missing))
        else {
            return Err("missing analysis file should fail".into());
        };
        assert_eq!(error.exit_code(), crate::error::ExitCode::Io);
        Ok(())
    }
}
