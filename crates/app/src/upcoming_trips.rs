//! Classify trip starts against the upcoming window.

use crate::deps::PlannerDeps;
use chrono::NaiveDate;
use pawtrip_domain::{TripTiming, UpcomingWindow};

/// One classified trip start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedTrip {
    /// First day of the trip.
    pub start: NaiveDate,
    /// Position relative to today.
    pub timing: TripTiming,
}

/// Input payload for classifying trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingTripsInput {
    /// Trip start days, in caller order.
    pub starts: Vec<NaiveDate>,
    /// Reference day; the clock is used when absent.
    pub today: Option<NaiveDate>,
    /// Window in days; the configured window is used when absent.
    pub window_days: Option<u32>,
}

/// Classify every start, keeping caller order.
#[tracing::instrument(name = "app.upcoming_trips", skip_all, fields(trips = input.starts.len()))]
pub fn classify_upcoming_trips(deps: &PlannerDeps, input: &UpcomingTripsInput) -> Vec<ClassifiedTrip> {
    let today = deps.resolve_today(input.today);
    let window = input.window_days.map_or(deps.window, UpcomingWindow::new);

    let trips: Vec<ClassifiedTrip> = input
        .starts
        .iter()
        .map(|&start| ClassifiedTrip {
            start,
            timing: window.classify(start, today),
        })
        .collect();

    let imminent = trips
        .iter()
        .filter(|trip| matches!(trip.timing, TripTiming::Imminent { .. }))
        .count();
    tracing::debug!(%today, window = window.days(), imminent, "trips classified");
    trips
}
