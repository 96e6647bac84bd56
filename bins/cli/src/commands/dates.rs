//! `dates check` handler.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliContext, CliOutput};
use pawtrip_api::v1::{
    ApiV1DateCheckRequestDto, ApiV1DateCheckResultDto, date_check_request_to_domain,
    date_range_validation_to_api_v1, validate_date_check_request,
};
use pawtrip_app::{CheckDatesInput, check_dates};
use pawtrip_domain::DateRangeValidation;
use pawtrip_shared::ErrorEnvelope;
use std::path::Path;

/// Raw `dates check` flags.
#[derive(Debug, Clone, Default)]
pub struct DatesCheckArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub today: Option<String>,
    pub max_days: Option<u32>,
}

/// Check a date range; a refusal exits with [`ExitCode::DatesRejected`].
pub fn run_dates_check(
    mode: OutputMode,
    ctx: &CliContext,
    args: &DatesCheckArgs,
    config: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let request = ApiV1DateCheckRequestDto {
        from: args.from.clone(),
        to: args.to.clone(),
        today: args.today.clone(),
        max_days: args.max_days,
    };
    validate_date_check_request(&request).map_err(ErrorEnvelope::from)?;

    let deps = ctx.planner_deps(config, None)?;
    let input = date_check_request_to_domain(&request, deps.clock.today(), deps.validator())?;
    let max_days = input.validator.max_days();
    let outcome = check_dates(
        &deps,
        CheckDatesInput {
            range: input.range,
            today: Some(input.today),
            max_days: Some(max_days),
        },
    );

    let result = date_range_validation_to_api_v1(outcome);
    let status = if outcome.is_valid() { "ok" } else { "rejected" };
    let payload = serde_json::json!({
        "status": status,
        "kind": "dates",
        "today": input.today.to_string(),
        "maxDays": max_days,
        "result": result,
    });
    let stdout = mode.render(|| format_result_text(status, outcome, &result), payload)?;

    Ok(CliOutput {
        stdout,
        exit_code: if outcome.is_valid() {
            ExitCode::Ok
        } else {
            ExitCode::DatesRejected
        },
    })
}

fn format_result_text(
    status: &str,
    outcome: DateRangeValidation,
    result: &ApiV1DateCheckResultDto,
) -> String {
    let mut out = format!("status: {status}\nvalid: {}\n", result.valid);
    match outcome {
        DateRangeValidation::Valid { length } => {
            out.push_str(&format!("length: {length}\n"));
        },
        DateRangeValidation::Invalid { reason } => {
            out.push_str(&format!("reason: {}\nmessage: {}\n", reason.as_str(), reason.message()));
        },
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use chrono::NaiveDate;
    use pawtrip_app::FixedClock;
    use pawtrip_config::PlannerEnv;
    use std::sync::Arc;

    fn context() -> Result<CliContext, Box<dyn std::error::Error>> {
        let today = NaiveDate::from_ymd_opt(2026, 2, 6).ok_or("invalid test date")?;
        Ok(CliContext {
            clock: Arc::new(FixedClock(today)),
            env: PlannerEnv::default(),
        })
    }

    fn args(from: &str, to: &str) -> DatesCheckArgs {
        DatesCheckArgs {
            from: Some(from.to_owned()),
            to: Some(to.to_owned()),
            ..DatesCheckArgs::default()
        }
    }

    #[test]
    fn json_output_carries_the_wire_result() -> Result<(), Box<dyn std::error::Error>> {
        let mode = OutputMode::new(OutputFormat::Json);
        let output = run_dates_check(mode, &context()?, &args("2026-02-10", "2026-02-18"), None)?;
        assert_eq!(output.exit_code, ExitCode::DatesRejected);

        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["today"], "2026-02-06");
        assert_eq!(value["maxDays"], 7);
        assert_eq!(
            value["result"],
            serde_json::json!({ "valid": false, "reason": "too-long" })
        );
        Ok(())
    }

    #[test]
    fn max_days_flag_relaxes_the_policy() -> Result<(), Box<dyn std::error::Error>> {
        let mode = OutputMode::new(OutputFormat::Ndjson);
        let check = DatesCheckArgs {
            max_days: Some(10),
            ..args("2026-02-10", "2026-02-18")
        };
        let output = run_dates_check(mode, &context()?, &check, None)?;
        assert_eq!(output.exit_code, ExitCode::Ok);

        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["type"], "summary");
        assert_eq!(value["result"]["length"], 9);
        Ok(())
    }

    #[test]
    fn incomplete_ranges_are_rejected_not_errors() -> Result<(), Box<dyn std::error::Error>> {
        let mode = OutputMode::new(OutputFormat::Text);
        let check = DatesCheckArgs {
            to: Some("2026-02-08".to_owned()),
            ..DatesCheckArgs::default()
        };
        let output = run_dates_check(mode, &context()?, &check, None)?;
        assert_eq!(output.exit_code, ExitCode::DatesRejected);
        assert!(output.stdout.contains("reason: incomplete"));
        Ok(())
    }
}
