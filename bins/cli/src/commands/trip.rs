//! `trip validate` and `trip upcoming` handlers.

use crate::commands::parse_date_flag;
use crate::error::CliError;
use crate::format::{OutputMode, ndjson_line, tagged};
use crate::{CliContext, CliOutput};
use pawtrip_api::v1::{
    ApiV1TripSearchRequestDto, ApiV1TripSearchResponseDto, ApiV1TripTimingDto,
    ApiV1TripTimingStatus, trip_search_request_to_domain, trip_timing_to_api_v1,
    validate_trip_search_request,
};
use pawtrip_app::{UpcomingTripsInput, classify_upcoming_trips, validate_trip_search};
use pawtrip_domain::parse_calendar_date;
use pawtrip_shared::{ErrorCode, ErrorEnvelope, ResultExt};
use std::io::Read;
use std::path::Path;

/// Where the trip search request JSON comes from.
#[derive(Debug, Clone, Copy)]
pub enum TripSource<'a> {
    File(&'a Path),
    Inline(&'a str),
    Stdin,
}

impl TripSource<'_> {
    fn read(self) -> Result<String, ErrorEnvelope> {
        match self {
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(ErrorEnvelope::from)
                .with_error_metadata("path", path.display().to_string()),
            Self::Inline(json) => Ok(json.to_owned()),
            Self::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(ErrorEnvelope::from)
                    .with_error_metadata("source", "stdin")?;
                Ok(buf)
            },
        }
    }
}

/// Validate a trip search request against the configured limits.
pub fn run_trip_validate(
    mode: OutputMode,
    ctx: &CliContext,
    source: &TripSource<'_>,
    today: Option<&str>,
    config: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let text = source.read()?;
    let request: ApiV1TripSearchRequestDto = serde_json::from_str(&text).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("api", "invalid_json"),
            format!("trip search request is not valid JSON: {error}"),
        )
    })?;
    validate_trip_search_request(&request).map_err(ErrorEnvelope::from)?;

    let today = parse_date_flag("today", today)?;
    let deps = ctx.planner_deps(config, None)?;
    let search = trip_search_request_to_domain(&request)?;
    let output = validate_trip_search(&deps, &search, today)?;

    let response = ApiV1TripSearchResponseDto {
        length_days: output.length_days,
        imminent: output.imminent,
    };
    let payload = serde_json::json!({
        "status": "ok",
        "kind": "trip",
        "destination": search.destination,
        "travelMode": search.travel_mode.as_str(),
        "result": response,
    });
    let stdout = mode.render(
        || {
            format!(
                "status: ok\ndestination: {}\nmode: {}\nlengthDays: {}\nimminent: {}\n",
                search.destination,
                search.travel_mode.as_str(),
                response.length_days,
                response.imminent
            )
        },
        payload,
    )?;
    Ok(CliOutput::ok(stdout))
}

/// Classify trip starts; NDJSON emits one line per trip plus a summary.
pub fn run_trip_upcoming(
    mode: OutputMode,
    ctx: &CliContext,
    starts: &[String],
    today: Option<&str>,
    window: Option<u32>,
    config: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let starts = starts
        .iter()
        .map(|raw| {
            parse_calendar_date(raw)
                .map_err(ErrorEnvelope::from)
                .with_error_metadata("flag", "start")
        })
        .collect::<Result<Vec<_>, _>>()?;
    let today = parse_date_flag("today", today)?;
    let deps = ctx.planner_deps(config, None)?;
    let window_days = window.unwrap_or_else(|| deps.window.days());

    let trips: Vec<ApiV1TripTimingDto> = classify_upcoming_trips(
        &deps,
        &UpcomingTripsInput {
            starts,
            today,
            window_days: Some(window_days),
        },
    )
    .into_iter()
    .map(|trip| trip_timing_to_api_v1(trip.start, trip.timing))
    .collect();
    let imminent = trips
        .iter()
        .filter(|trip| trip.status == ApiV1TripTimingStatus::Imminent)
        .count();

    let summary = serde_json::json!({
        "status": "ok",
        "kind": "upcoming",
        "window": window_days,
        "count": trips.len(),
        "imminent": imminent,
    });

    let stdout = if mode.is_ndjson() {
        let mut out = String::new();
        for trip in &trips {
            out.push_str(&ndjson_line(&tagged("trip", serde_json::to_value(trip)?))?);
        }
        out.push_str(&ndjson_line(&tagged("summary", summary))?);
        out
    } else {
        let mut payload = summary;
        payload["trips"] = serde_json::to_value(&trips)?;
        mode.render(|| format_trips_text(window_days, &trips), payload)?
    };
    Ok(CliOutput::ok(stdout))
}

fn format_trips_text(window_days: u32, trips: &[ApiV1TripTimingDto]) -> String {
    let mut out = format!("status: ok\nwindow: {window_days}\n");
    for trip in trips {
        let status = match trip.status {
            ApiV1TripTimingStatus::Past => "past",
            ApiV1TripTimingStatus::Imminent => "imminent",
            ApiV1TripTimingStatus::Upcoming => "upcoming",
        };
        out.push_str(&format!("{} {status} {:+}\n", trip.start, trip.days_until));
    }
    out
}
