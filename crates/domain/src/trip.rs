//! Trip search request and its rules.

use crate::calendar::IntoCalendarDay;
use crate::date_range::{DateRange, DateRangeRejection, MAX_TRIP_DAYS, validate_date_range};
use pawtrip_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the travellers get to the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Fly to the destination.
    #[default]
    Flight,
    /// Drive from `origin`.
    Roadtrip,
}

impl TravelMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Roadtrip => "roadtrip",
        }
    }
}

/// Policy limits applied to a trip search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSearchLimits {
    /// Longest accepted trip in days.
    pub max_days: u32,
    /// Fewest adults per search.
    pub min_adults: u32,
    /// Most adults per search.
    pub max_adults: u32,
    /// Most children per search.
    pub max_children: u32,
}

impl Default for TripSearchLimits {
    fn default() -> Self {
        Self {
            max_days: MAX_TRIP_DAYS,
            min_adults: 1,
            max_adults: 10,
            max_children: 10,
        }
    }
}

/// Rule violations for a [`TripSearch`].
#[derive(Debug, Clone, PartialEq)]
pub enum TripSearchError {
    /// Destination is empty after trimming.
    MissingDestination,
    /// Road trips need a starting point.
    MissingOrigin,
    /// Adult count outside the configured range.
    AdultsOutOfRange {
        /// Provided count.
        value: u32,
        /// Inclusive minimum.
        min: u32,
        /// Inclusive maximum.
        max: u32,
    },
    /// Child count above the configured maximum.
    TooManyChildren {
        /// Provided count.
        value: u32,
        /// Inclusive maximum.
        max: u32,
    },
    /// Budget is negative or not a finite number.
    InvalidBudget {
        /// Provided budget.
        value: f64,
    },
    /// Travel dates were refused.
    Dates(DateRangeRejection),
}

impl TripSearchError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingDestination | Self::MissingOrigin => {
                ErrorCode::new("domain", "missing_location")
            },
            Self::AdultsOutOfRange { .. } | Self::TooManyChildren { .. } => {
                ErrorCode::new("domain", "invalid_party_size")
            },
            Self::InvalidBudget { .. } => ErrorCode::new("domain", "invalid_budget"),
            Self::Dates(_) => ErrorCode::new("domain", "invalid_dates"),
        }
    }

    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingDestination => "destination",
            Self::MissingOrigin => "origin",
            Self::AdultsOutOfRange { .. } => "adults",
            Self::TooManyChildren { .. } => "children",
            Self::InvalidBudget { .. } => "budget",
            Self::Dates(_) => "dates",
        }
    }
}

impl fmt::Display for TripSearchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDestination => formatter.write_str("destination must be non-empty"),
            Self::MissingOrigin => formatter.write_str("road trips need an origin"),
            Self::AdultsOutOfRange { min, max, .. } => {
                write!(formatter, "adults must be between {min} and {max}")
            },
            Self::TooManyChildren { max, .. } => {
                write!(formatter, "children must be at most {max}")
            },
            Self::InvalidBudget { .. } => {
                formatter.write_str("budget must be a non-negative number")
            },
            Self::Dates(reason) => formatter.write_str(reason.message()),
        }
    }
}

impl std::error::Error for TripSearchError {}

impl From<TripSearchError> for ErrorEnvelope {
    fn from(error: TripSearchError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string())
            .with_metadata("field", error.field());
        match error {
            TripSearchError::MissingDestination | TripSearchError::MissingOrigin => envelope,
            TripSearchError::AdultsOutOfRange { value, min, max } => envelope
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            TripSearchError::TooManyChildren { value, max } => envelope
                .with_metadata("value", value.to_string())
                .with_metadata("max", max.to_string()),
            TripSearchError::InvalidBudget { value } => {
                envelope.with_metadata("value", value.to_string())
            },
            TripSearchError::Dates(reason) => envelope.with_metadata("reason", reason.as_str()),
        }
    }
}

/// A trip search as submitted by the planner form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSearch {
    /// Starting point; required for road trips.
    pub origin: String,
    /// Where the trip goes.
    pub destination: String,
    /// Travel dates.
    pub dates: DateRange,
    /// Adult travellers.
    pub adults: u32,
    /// Child travellers.
    pub children: u32,
    /// Flight or road trip.
    pub travel_mode: TravelMode,
    /// Whether the return leg is included.
    pub round_trip: bool,
    /// Optional total budget.
    pub budget: Option<f64>,
}

impl TripSearch {
    /// Check every rule and return the accepted trip length in days.
    ///
    /// Field rules run before the date policy, in declaration order.
    pub fn validate(
        &self,
        today: impl IntoCalendarDay,
        limits: &TripSearchLimits,
    ) -> Result<u32, TripSearchError> {
        if self.destination.trim().is_empty() {
            return Err(TripSearchError::MissingDestination);
        }
        if self.travel_mode == TravelMode::Roadtrip && self.origin.trim().is_empty() {
            return Err(TripSearchError::MissingOrigin);
        }
        if !(limits.min_adults..=limits.max_adults).contains(&self.adults) {
            return Err(TripSearchError::AdultsOutOfRange {
                value: self.adults,
                min: limits.min_adults,
                max: limits.max_adults,
            });
        }
        if self.children > limits.max_children {
            return Err(TripSearchError::TooManyChildren {
                value: self.children,
                max: limits.max_children,
            });
        }
        if let Some(budget) = self.budget.filter(|budget| !budget.is_finite() || *budget < 0.0) {
            return Err(TripSearchError::InvalidBudget { value: budget });
        }

        validate_date_range(&self.dates, today, limits.max_days)
            .into_result()
            .map_err(TripSearchError::Dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, date: u32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        NaiveDate::from_ymd_opt(year, month, date).ok_or_else(|| "invalid test date".into())
    }

    fn search() -> Result<TripSearch, Box<dyn std::error::Error>> {
        Ok(TripSearch {
            origin: String::new(),
            destination: "Asheville, NC".to_owned(),
            dates: DateRange::between(day(2026, 2, 7)?, day(2026, 2, 9)?),
            adults: 2,
            children: 0,
            travel_mode: TravelMode::Flight,
            round_trip: true,
            budget: Some(1500.0),
        })
    }

    #[test]
    fn accepts_default_form() -> Result<(), Box<dyn std::error::Error>> {
        let length = search()?.validate(day(2026, 2, 6)?, &TripSearchLimits::default())?;
        assert_eq!(length, 3);
        Ok(())
    }

    #[test]
    fn roadtrip_requires_origin() -> Result<(), Box<dyn std::error::Error>> {
        let mut trip = search()?;
        trip.travel_mode = TravelMode::Roadtrip;
        trip.origin = "  ".to_owned();
        let outcome = trip.validate(day(2026, 2, 6)?, &TripSearchLimits::default());
        assert_eq!(outcome, Err(TripSearchError::MissingOrigin));
        Ok(())
    }

    #[test]
    fn party_size_is_bounded() -> Result<(), Box<dyn std::error::Error>> {
        let today = day(2026, 2, 6)?;
        let limits = TripSearchLimits::default();

        let mut trip = search()?;
        trip.adults = 0;
        assert_eq!(
            trip.validate(today, &limits),
            Err(TripSearchError::AdultsOutOfRange {
                value: 0,
                min: 1,
                max: 10
            })
        );

        trip.adults = 2;
        trip.children = 11;
        assert_eq!(
            trip.validate(today, &limits),
            Err(TripSearchError::TooManyChildren { value: 11, max: 10 })
        );
        Ok(())
    }

    #[test]
    fn negative_budget_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut trip = search()?;
        trip.budget = Some(-1.0);
        let outcome = trip.validate(day(2026, 2, 6)?, &TripSearchLimits::default());
        assert!(matches!(outcome, Err(TripSearchError::InvalidBudget { .. })));
        Ok(())
    }

    #[test]
    fn date_rejections_surface_with_reason() -> Result<(), Box<dyn std::error::Error>> {
        let trip = search()?;
        let limits = TripSearchLimits {
            max_days: 2,
            ..TripSearchLimits::default()
        };
        let Err(error) = trip.validate(day(2026, 2, 6)?, &limits) else {
            return Err("expected a date rejection".into());
        };
        assert_eq!(error, TripSearchError::Dates(DateRangeRejection::TooLong));

        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code, ErrorCode::new("domain", "invalid_dates"));
        assert_eq!(envelope.metadata.get("reason").map(String::as_str), Some("too-long"));
        Ok(())
    }
}
