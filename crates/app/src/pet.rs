//! Pet profile use cases: age descriptions and profile pre-fill.

use crate::deps::PlannerDeps;
use chrono::NaiveDate;
use pawtrip_domain::{DogAnalysis, PetAge, PetName, PetProfile, describe_pet_age};
use pawtrip_shared::{ErrorEnvelope, Result};

/// Age of a pet born on `born`, as of `today` or the clock's day.
#[tracing::instrument(name = "app.pet_age", skip(deps))]
pub fn pet_age(deps: &PlannerDeps, born: NaiveDate, today: Option<NaiveDate>) -> PetAge {
    let today = deps.resolve_today(today);
    if born > today {
        tracing::warn!(%today, "date of birth is in the future");
    }
    describe_pet_age(born, today)
}

/// Build a profile for `name`, pre-filled from an analysis when one is given.
#[tracing::instrument(name = "app.prefill_pet_profile", skip_all)]
pub fn prefill_pet_profile(name: &str, analysis: Option<&DogAnalysis>) -> Result<PetProfile> {
    let name = PetName::parse(name).map_err(ErrorEnvelope::from)?;
    let profile = match analysis {
        Some(analysis) => {
            if let Some(reason) = analysis.error.as_deref() {
                tracing::info!(reason, "analysis failed, using defaults");
            }
            PetProfile::prefill_from_analysis(name, analysis)
        },
        None => PetProfile::new(name),
    };
    Ok(profile)
}
