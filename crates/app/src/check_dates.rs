//! Check a requested trip date range against the date policy.

use crate::deps::PlannerDeps;
use chrono::NaiveDate;
use pawtrip_domain::{DateRange, DateRangeValidation, DateRangeValidator};

/// Input payload for a date check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckDatesInput {
    /// Requested range.
    pub range: DateRange,
    /// Reference day; the clock is used when absent.
    pub today: Option<NaiveDate>,
    /// Maximum trip length; the configured policy is used when absent.
    pub max_days: Option<u32>,
}

/// Apply the date policy. Never fails: refusals are a typed outcome.
#[tracing::instrument(
    name = "app.check_dates",
    skip_all,
    fields(from = ?input.range.from, to = ?input.range.to)
)]
pub fn check_dates(deps: &PlannerDeps, input: CheckDatesInput) -> DateRangeValidation {
    let today = deps.resolve_today(input.today);
    let validator = input
        .max_days
        .map_or_else(|| deps.validator(), DateRangeValidator::new);
    let outcome = validator.validate(&input.range, today);

    match outcome {
        DateRangeValidation::Valid { length } => {
            tracing::debug!(%today, length, "trip dates accepted");
        },
        DateRangeValidation::Invalid { reason } => {
            tracing::info!(%today, reason = reason.as_str(), "trip dates rejected");
        },
    }
    outcome
}
