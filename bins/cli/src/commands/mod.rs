//! CLI command handlers.

pub mod config;
pub mod dates;
pub mod info;
pub mod pet;
pub mod trip;

pub use config::{run_config_schema, run_config_show, run_config_validate};
pub use dates::{DatesCheckArgs, run_dates_check};
pub use info::run_info;
pub use pet::{run_pet_age, run_pet_profile};
pub use trip::{TripSource, run_trip_upcoming, run_trip_validate};

use chrono::NaiveDate;
use pawtrip_domain::parse_calendar_date;
use pawtrip_shared::{ErrorEnvelope, ResultExt};

/// Parse an optional `--today`-style flag.
pub fn parse_date_flag(
    flag: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ErrorEnvelope> {
    value
        .map(|raw| {
            parse_calendar_date(raw)
                .map_err(ErrorEnvelope::from)
                .with_error_metadata("flag", flag)
        })
        .transpose()
}
