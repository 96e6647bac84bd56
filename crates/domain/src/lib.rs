//! # pawtrip-domain
//!
//! Pure planning rules for travelling with a dog.
//!
//! - **Calendar** - day truncation, day distances, upcoming-trip window
//! - **Date range** - the trip date policy (`validate_date_range`)
//! - **Pet** - profile option lists, names, age descriptions
//! - **Trip** - trip search requests and their limits
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate and `chrono`
//! - No I/O and no clock reads: "today" is always an argument

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use pawtrip_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod calendar;
pub mod date_range;
pub mod pet;
pub mod trip;

pub use calendar::{
    CalendarDateError, DEFAULT_UPCOMING_WINDOW_DAYS, IntoCalendarDay, TripTiming, UpcomingWindow,
    days_until, parse_calendar_date,
};
pub use date_range::{
    DateRange, DateRangeRejection, DateRangeValidation, DateRangeValidator, MAX_TRIP_DAYS,
    trip_length_days, validate_date_range,
};
pub use pet::{
    DogAnalysis, Environment, Level, MAX_PET_NAME_CHARS, PetAge, PetName, PetProfile,
    PetProfileError, Personality, WeightUnit, YesNoUnknown, describe_pet_age,
};
pub use trip::{TravelMode, TripSearch, TripSearchError, TripSearchLimits};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
