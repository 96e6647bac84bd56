//! Clock port: where "today" comes from.

use chrono::{Local, NaiveDate};

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    /// The current local calendar day.
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
