//! Trip date-range policy.
//!
//! [`validate_date_range`] classifies a candidate `(from, to)` pair against
//! today and a maximum trip length. It never fails: every input maps to a
//! [`DateRangeValidation`] variant. Checks run in a fixed order and the first
//! match wins:
//!
//! 1. either endpoint missing: [`DateRangeRejection::Incomplete`]
//! 2. start before today: [`DateRangeRejection::StartBeforeToday`]
//! 3. inclusive length of one day or less: [`DateRangeRejection::EndNotAfterStart`]
//! 4. inclusive length above `max_days`: [`DateRangeRejection::TooLong`]
//!
//! Starting today is allowed. A trip that ends on the day it starts is not.

use crate::calendar::IntoCalendarDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum trip length in days.
pub const MAX_TRIP_DAYS: u32 = 7;

/// Candidate trip dates, possibly mid-selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the trip.
    pub from: Option<NaiveDate>,
    /// Last day of the trip.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional endpoints.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Build a complete range, truncating both endpoints to their calendar day.
    pub fn between(from: impl IntoCalendarDay, to: impl IntoCalendarDay) -> Self {
        Self {
            from: Some(from.calendar_day()),
            to: Some(to.calendar_day()),
        }
    }

    /// Both endpoints, when the selection is complete.
    #[must_use]
    pub const fn endpoints(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Why a date range was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangeRejection {
    /// `from` or `to` is missing.
    Incomplete,
    /// The trip would start before today.
    StartBeforeToday,
    /// The trip ends on or before its first day.
    EndNotAfterStart,
    /// The trip is longer than the allowed number of days.
    TooLong,
}

impl DateRangeRejection {
    /// Every reason, in check order.
    pub const ALL: [Self; 4] = [
        Self::Incomplete,
        Self::StartBeforeToday,
        Self::EndNotAfterStart,
        Self::TooLong,
    ];

    /// Stable kebab-case reason code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::StartBeforeToday => "start-before-today",
            Self::EndNotAfterStart => "end-not-after-start",
            Self::TooLong => "too-long",
        }
    }

    /// Short user-facing explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Incomplete => "select both a start and an end date",
            Self::StartBeforeToday => "the trip cannot start before today",
            Self::EndNotAfterStart => "the trip must end after the day it starts",
            Self::TooLong => "the trip is longer than the allowed number of days",
        }
    }
}

impl fmt::Display for DateRangeRejection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Outcome of validating a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRangeValidation {
    /// Accepted; `length` is the inclusive day count, `2..=max_days`.
    Valid {
        /// Trip length in calendar days, both endpoints included.
        length: u32,
    },
    /// Refused for exactly one reason.
    Invalid {
        /// First failing check.
        reason: DateRangeRejection,
    },
}

impl DateRangeValidation {
    /// True for [`DateRangeValidation::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Accepted length, if any.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        match self {
            Self::Valid { length } => Some(*length),
            Self::Invalid { .. } => None,
        }
    }

    /// Rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<DateRangeRejection> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { reason } => Some(*reason),
        }
    }

    /// Convert into a `Result` carrying the length or the reason.
    pub const fn into_result(self) -> Result<u32, DateRangeRejection> {
        match self {
            Self::Valid { length } => Ok(length),
            Self::Invalid { reason } => Err(reason),
        }
    }

    const fn invalid(reason: DateRangeRejection) -> Self {
        Self::Invalid { reason }
    }
}

/// Inclusive number of calendar days from `from` to `to`.
///
/// Same day is `1`, next day is `2`; an inverted range gives zero or less.
pub fn trip_length_days(from: impl IntoCalendarDay, to: impl IntoCalendarDay) -> i64 {
    to.calendar_day()
        .signed_duration_since(from.calendar_day())
        .num_days()
        + 1
}

/// Classify `range` against `today` and a `max_days` policy.
pub fn validate_date_range(
    range: &DateRange,
    today: impl IntoCalendarDay,
    max_days: u32,
) -> DateRangeValidation {
    let Some((from, to)) = range.endpoints() else {
        return DateRangeValidation::invalid(DateRangeRejection::Incomplete);
    };

    if from.calendar_day() < today.calendar_day() {
        return DateRangeValidation::invalid(DateRangeRejection::StartBeforeToday);
    }

    let length = trip_length_days(from, to);
    if length <= 1 {
        return DateRangeValidation::invalid(DateRangeRejection::EndNotAfterStart);
    }
    if length > i64::from(max_days) {
        return DateRangeValidation::invalid(DateRangeRejection::TooLong);
    }

    // length is in 2..=max_days here, so it fits in u32.
    u32::try_from(length).map_or(
        DateRangeValidation::invalid(DateRangeRejection::TooLong),
        |length| DateRangeValidation::Valid { length },
    )
}

/// Date-range policy with a fixed maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeValidator {
    max_days: u32,
}

impl Default for DateRangeValidator {
    fn default() -> Self {
        Self::new(MAX_TRIP_DAYS)
    }
}

impl DateRangeValidator {
    /// Validator allowing trips of up to `max_days` days.
    #[must_use]
    pub const fn new(max_days: u32) -> Self {
        Self { max_days }
    }

    /// Configured maximum length.
    #[must_use]
    pub const fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Validate `range` against `today`.
    pub fn validate(&self, range: &DateRange, today: impl IntoCalendarDay) -> DateRangeValidation {
        validate_date_range(range, today, self.max_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveTime};
    use proptest::prelude::*;

    fn day(year: i32, month: u32, date: u32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        NaiveDate::from_ymd_opt(year, month, date).ok_or_else(|| "invalid test date".into())
    }

    fn rejected(reason: DateRangeRejection) -> DateRangeValidation {
        DateRangeValidation::Invalid { reason }
    }

    #[test]
    fn reference_scenarios() -> Result<(), Box<dyn std::error::Error>> {
        let today = day(2026, 2, 6)?;
        let validator = DateRangeValidator::default();

        let cases = [
            (
                DateRange::between(day(2026, 2, 5)?, day(2026, 2, 7)?),
                rejected(DateRangeRejection::StartBeforeToday),
            ),
            (
                DateRange::between(day(2026, 2, 8)?, day(2026, 2, 8)?),
                rejected(DateRangeRejection::EndNotAfterStart),
            ),
            (
                DateRange::between(day(2026, 2, 10)?, day(2026, 2, 18)?),
                rejected(DateRangeRejection::TooLong),
            ),
            (
                DateRange::between(day(2026, 2, 6)?, day(2026, 2, 8)?),
                DateRangeValidation::Valid { length: 3 },
            ),
            (
                DateRange::new(None, Some(day(2026, 2, 8)?)),
                rejected(DateRangeRejection::Incomplete),
            ),
        ];

        for (range, expected) in cases {
            assert_eq!(validator.validate(&range, today), expected, "{range:?}");
        }
        Ok(())
    }

    #[test]
    fn length_counts_both_endpoints() -> Result<(), Box<dyn std::error::Error>> {
        let start = day(2026, 2, 10)?;
        assert_eq!(trip_length_days(start, start), 1);
        assert_eq!(trip_length_days(start, day(2026, 2, 11)?), 2);
        assert_eq!(trip_length_days(start, day(2026, 2, 18)?), 9);
        assert_eq!(trip_length_days(start, day(2026, 2, 9)?), 0);
        Ok(())
    }

    #[test]
    fn time_of_day_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let today = day(2026, 2, 6)?;
        let late_today = today.and_time(NaiveTime::from_hms_opt(23, 0, 0).ok_or("bad time")?);
        let early_start = today.and_time(NaiveTime::from_hms_opt(0, 5, 0).ok_or("bad time")?);

        let range = DateRange::between(early_start, day(2026, 2, 7)?);
        assert_eq!(
            validate_date_range(&range, late_today, MAX_TRIP_DAYS),
            DateRangeValidation::Valid { length: 2 }
        );
        Ok(())
    }

    #[test]
    fn max_days_boundary_is_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let today = day(2026, 2, 6)?;
        let seven = DateRange::between(day(2026, 2, 6)?, day(2026, 2, 12)?);
        let eight = DateRange::between(day(2026, 2, 6)?, day(2026, 2, 13)?);

        assert_eq!(
            validate_date_range(&seven, today, 7),
            DateRangeValidation::Valid { length: 7 }
        );
        assert_eq!(
            validate_date_range(&eight, today, 7),
            rejected(DateRangeRejection::TooLong)
        );
        Ok(())
    }

    #[test]
    fn zero_max_days_rejects_every_future_trip() -> Result<(), Box<dyn std::error::Error>> {
        let today = day(2026, 2, 6)?;
        let range = DateRange::between(day(2026, 2, 7)?, day(2026, 2, 8)?);
        assert_eq!(
            validate_date_range(&range, today, 0),
            rejected(DateRangeRejection::TooLong)
        );
        Ok(())
    }

    #[test]
    fn accessors_split_outcomes() {
        let valid = DateRangeValidation::Valid { length: 4 };
        assert!(valid.is_valid());
        assert_eq!(valid.length(), Some(4));
        assert_eq!(valid.reason(), None);
        assert_eq!(valid.into_result(), Ok(4));

        let invalid = rejected(DateRangeRejection::TooLong);
        assert_eq!(invalid.length(), None);
        assert_eq!(invalid.into_result(), Err(DateRangeRejection::TooLong));
    }

    #[test]
    fn reason_codes_are_kebab_case() -> Result<(), serde_json::Error> {
        for reason in DateRangeRejection::ALL {
            let encoded = serde_json::to_string(&reason)?;
            assert_eq!(encoded, format!("\"{}\"", reason.as_str()));
        }
        Ok(())
    }

    fn any_day() -> impl Strategy<Value = NaiveDate> {
        (0u64..3650).prop_filter_map("date in range", |offset| {
            NaiveDate::from_ymd_opt(2020, 1, 1)?.checked_add_days(Days::new(offset))
        })
    }

    fn any_range() -> impl Strategy<Value = DateRange> {
        (
            proptest::option::of(any_day()),
            proptest::option::of(any_day()),
        )
            .prop_map(|(from, to)| DateRange::new(from, to))
    }

    proptest! {
        #[test]
        fn missing_endpoint_is_incomplete(
            known in any_day(),
            today in any_day(),
            max_days in 0u32..60,
            missing_from in any::<bool>(),
        ) {
            let range = if missing_from {
                DateRange::new(None, Some(known))
            } else {
                DateRange::new(Some(known), None)
            };
            prop_assert_eq!(
                validate_date_range(&range, today, max_days),
                rejected(DateRangeRejection::Incomplete)
            );
        }

        #[test]
        fn past_start_is_rejected_first(
            from in any_day(),
            to in any_day(),
            ahead in 1u64..400,
            max_days in 0u32..60,
        ) {
            let Some(today) = from.checked_add_days(Days::new(ahead)) else {
                return Ok(());
            };
            let range = DateRange::between(from, to);
            prop_assert_eq!(
                validate_date_range(&range, today, max_days),
                rejected(DateRangeRejection::StartBeforeToday)
            );
        }

        #[test]
        fn end_on_or_before_start_is_rejected(
            from in any_day(),
            back in 0u64..400,
            max_days in 0u32..60,
        ) {
            let Some(to) = from.checked_sub_days(Days::new(back)) else {
                return Ok(());
            };
            let range = DateRange::between(from, to);
            prop_assert_eq!(
                validate_date_range(&range, from, max_days),
                rejected(DateRangeRejection::EndNotAfterStart)
            );
        }

        #[test]
        fn accepted_length_matches_span(
            today in any_day(),
            lead in 0u64..30,
            length in 2u32..60,
            max_days in 0u32..60,
        ) {
            let Some(from) = today.checked_add_days(Days::new(lead)) else {
                return Ok(());
            };
            let Some(to) = from.checked_add_days(Days::new(u64::from(length - 1))) else {
                return Ok(());
            };
            let outcome = validate_date_range(&DateRange::between(from, to), today, max_days);
            if length > max_days {
                prop_assert_eq!(outcome, rejected(DateRangeRejection::TooLong));
            } else {
                prop_assert_eq!(outcome, DateRangeValidation::Valid { length });
            }
        }

        #[test]
        fn validation_is_deterministic(
            range in any_range(),
            today in any_day(),
            max_days in 0u32..60,
        ) {
            let first = validate_date_range(&range, today, max_days);
            let second = validate_date_range(&range, today, max_days);
            prop_assert_eq!(first, second);
            if let Some(length) = first.length() {
                prop_assert!((2..=max_days).contains(&length));
            }
        }
    }
}
