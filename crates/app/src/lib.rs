//! # pawtrip-app
//!
//! Application use cases for trip planning.
//! This crate depends on `domain` and `shared`; "today" comes from the
//! [`Clock`] port unless the caller pins it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod check_dates;
pub mod clock;
pub mod deps;
pub mod pet;
pub mod upcoming_trips;
pub mod validate_trip;

pub use check_dates::{CheckDatesInput, check_dates};
pub use clock::{Clock, FixedClock, SystemClock};
pub use deps::PlannerDeps;
pub use pet::{pet_age, prefill_pet_profile};
pub use upcoming_trips::{ClassifiedTrip, UpcomingTripsInput, classify_upcoming_trips};
pub use validate_trip::{ValidateTripOutput, validate_trip_search};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
