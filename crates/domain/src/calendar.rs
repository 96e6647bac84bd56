//! Calendar-day primitives.
//!
//! Every comparison in the planner happens on calendar days. Timestamps are
//! truncated to their day with [`IntoCalendarDay`] before they meet any rule,
//! so time-of-day never changes an outcome.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use pawtrip_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};

/// Truncate a date-like value to the start of its calendar day.
pub trait IntoCalendarDay {
    /// The calendar day this value falls on.
    fn calendar_day(&self) -> NaiveDate;
}

impl IntoCalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl IntoCalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Uses the local date in the timestamp's own offset.
impl<Tz: TimeZone> IntoCalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: IntoCalendarDay + ?Sized> IntoCalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Signed number of calendar days from `today` until `start`.
///
/// Negative when `start` is already in the past.
pub fn days_until(start: impl IntoCalendarDay, today: impl IntoCalendarDay) -> i64 {
    start
        .calendar_day()
        .signed_duration_since(today.calendar_day())
        .num_days()
}

/// Failures while reading a calendar date from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarDateError {
    /// Input was empty after trimming.
    #[error("calendar date must be non-empty")]
    Empty,
    /// Input is neither `YYYY-MM-DD` nor an RFC 3339 timestamp.
    #[error("`{input}` is not a YYYY-MM-DD date or RFC 3339 timestamp")]
    Malformed {
        /// Trimmed input that failed to parse.
        input: String,
    },
}

impl CalendarDateError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Empty => ErrorCode::new("domain", "empty_date"),
            Self::Malformed { .. } => ErrorCode::new("domain", "invalid_date"),
        }
    }
}

impl From<CalendarDateError> for ErrorEnvelope {
    fn from(error: CalendarDateError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            CalendarDateError::Empty => envelope,
            CalendarDateError::Malformed { input } => envelope.with_metadata("input", input),
        }
    }
}

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, CalendarDateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CalendarDateError::Empty);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.calendar_day())
        .map_err(|_| CalendarDateError::Malformed {
            input: trimmed.to_owned(),
        })
}

/// Default look-ahead for trips that need preparation reminders.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 3;

/// Where a trip start sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum TripTiming {
    /// The trip started before today.
    Past {
        /// Days since the trip started.
        days_ago: u32,
    },
    /// The trip starts within the window (today counts).
    Imminent {
        /// Days left until the start.
        days_until: u32,
    },
    /// The trip starts after the window.
    Upcoming {
        /// Days left until the start.
        days_until: u32,
    },
}

impl TripTiming {
    /// True for imminent and upcoming trips.
    #[must_use]
    pub const fn is_upcoming(self) -> bool {
        !matches!(self, Self::Past { .. })
    }
}

/// Look-ahead window that marks trips as imminent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingWindow {
    days: u32,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_UPCOMING_WINDOW_DAYS)
    }
}

impl UpcomingWindow {
    /// Window covering today plus `days` following days.
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// Window length in days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }

    /// Classify a trip start against `today`.
    pub fn classify(self, start: impl IntoCalendarDay, today: impl IntoCalendarDay) -> TripTiming {
        let delta = days_until(start, today);
        let magnitude = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        if delta < 0 {
            TripTiming::Past { days_ago: magnitude }
        } else if magnitude <= self.days {
            TripTiming::Imminent {
                days_until: magnitude,
            }
        } else {
            TripTiming::Upcoming {
                days_until: magnitude,
            }
        }
    }

    /// True when the trip starts between today and the end of the window.
    pub fn is_imminent(self, start: impl IntoCalendarDay, today: impl IntoCalendarDay) -> bool {
        matches!(self.classify(start, today), TripTiming::Imminent { .. })
    }
}
