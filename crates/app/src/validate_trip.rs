//! Validate a trip search before it is handed to a search backend.

use crate::deps::PlannerDeps;
use chrono::NaiveDate;
use pawtrip_domain::TripSearch;
use pawtrip_shared::{ErrorEnvelope, Result};

/// Accepted trip search summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateTripOutput {
    /// Inclusive trip length in days.
    pub length_days: u32,
    /// Whether the trip starts inside the upcoming window.
    pub imminent: bool,
}

/// Run every trip search rule against the configured limits.
#[tracing::instrument(
    name = "app.validate_trip_search",
    skip_all,
    fields(mode = search.travel_mode.as_str(), adults = search.adults)
)]
pub fn validate_trip_search(
    deps: &PlannerDeps,
    search: &TripSearch,
    today: Option<NaiveDate>,
) -> Result<ValidateTripOutput> {
    let today = deps.resolve_today(today);
    let length_days = search.validate(today, &deps.trip_limits).map_err(|error| {
        tracing::info!(field = error.field(), %error, "trip search rejected");
        ErrorEnvelope::from(error)
    })?;
    let imminent = search
        .dates
        .from
        .is_some_and(|start| deps.window.is_imminent(start, today));

    tracing::debug!(length_days, imminent, "trip search accepted");
    Ok(ValidateTripOutput {
        length_days,
        imminent,
    })
}
