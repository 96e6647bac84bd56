//! Dependencies shared by the planner use cases.

use crate::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use pawtrip_domain::{DateRangeValidator, TripSearchLimits, UpcomingWindow};
use std::fmt;
use std::sync::Arc;

/// Clock and policy knobs for the planner use cases.
#[derive(Clone)]
pub struct PlannerDeps {
    /// Where "today" comes from when the caller does not pin it.
    pub clock: Arc<dyn Clock>,
    /// Look-ahead for imminent trips.
    pub window: UpcomingWindow,
    /// Trip length and party size limits.
    pub trip_limits: TripSearchLimits,
}

impl PlannerDeps {
    /// Default policies on top of `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            window: UpcomingWindow::default(),
            trip_limits: TripSearchLimits::default(),
        }
    }

    /// Date policy for the configured maximum trip length.
    #[must_use]
    pub const fn validator(&self) -> DateRangeValidator {
        DateRangeValidator::new(self.trip_limits.max_days)
    }

    /// Pinned day if given, otherwise the clock's.
    pub(crate) fn resolve_today(&self, pinned: Option<NaiveDate>) -> NaiveDate {
        pinned.unwrap_or_else(|| self.clock.today())
    }
}

impl Default for PlannerDeps {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl fmt::Debug for PlannerDeps {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PlannerDeps")
            .field("window", &self.window)
            .field("trip_limits", &self.trip_limits)
            .finish_non_exhaustive()
    }
}
