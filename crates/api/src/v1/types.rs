//! API v1 DTO types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error kind exposed in API v1 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, user-facing errors (validation, bad input).
    Expected,
    /// Invariant violations that indicate a bug.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// API v1 error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_DOMAIN_INVALID_DATES`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message for the caller.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Optional metadata for debugging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
}

/// API v1 result wrapper for success or failure payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiV1Result<T> {
    /// Success response.
    Ok {
        /// Indicates success.
        ok: bool,
        /// Success payload.
        data: T,
    },
    /// Error response.
    Err {
        /// Indicates failure.
        ok: bool,
        /// Error payload.
        error: ApiV1ErrorDto,
    },
}

impl<T> ApiV1Result<T> {
    /// Build a success response wrapper.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self::Ok { ok: true, data }
    }

    /// Build an error response wrapper.
    #[must_use]
    pub const fn err(error: ApiV1ErrorDto) -> Self {
        Self::Err { ok: false, error }
    }
}

/// API v1 date check request.
///
/// Dates are `YYYY-MM-DD`. A missing `from` or `to` is allowed and yields
/// the `incomplete` reason; a missing `today` falls back to the caller clock.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    pawtrip_validate_derive::Validate,
)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(error = "crate::v1::validation::ApiV1ValidationIssue")]
pub struct ApiV1DateCheckRequestDto {
    /// First day of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(iso_date)]
    pub from: Option<String>,
    /// Last day of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(iso_date)]
    pub to: Option<String>,
    /// Reference day; defaults to the current local day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(iso_date)]
    pub today: Option<String>,
    /// Maximum trip length in days; defaults to the configured policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(field = "maxDays", range(min = 1, max = 365))]
    pub max_days: Option<u32>,
}

/// Reason codes for a refused date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ApiV1DateRejectionReason {
    /// `from` or `to` is missing.
    Incomplete,
    /// The trip would start before today.
    StartBeforeToday,
    /// The trip ends on or before its first day.
    EndNotAfterStart,
    /// The trip is longer than allowed.
    TooLong,
}

/// API v1 date check result: `{ valid: true, length }` or `{ valid: false, reason }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1DateCheckResultDto {
    /// Whether the range was accepted.
    pub valid: bool,
    /// Inclusive trip length, when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Refusal reason, when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ApiV1DateRejectionReason>,
}

/// Travel mode on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiV1TravelMode {
    /// Fly.
    #[default]
    Flight,
    /// Drive.
    Roadtrip,
}

const fn default_true() -> bool {
    true
}

/// API v1 trip search request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    JsonSchema,
    pawtrip_validate_derive::Validate,
)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(error = "crate::v1::validation::ApiV1ValidationIssue")]
pub struct ApiV1TripSearchRequestDto {
    /// Starting point; required for road trips.
    #[serde(default)]
    pub origin: String,
    /// Destination.
    #[validate(non_empty)]
    pub destination: String,
    /// First day of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(iso_date)]
    pub from: Option<String>,
    /// Last day of the trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(iso_date)]
    pub to: Option<String>,
    /// Adult travellers.
    #[validate(range(min = 0, max = 100))]
    pub adults: u32,
    /// Child travellers.
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub children: u32,
    /// Flight or road trip.
    #[serde(default)]
    pub travel_mode: ApiV1TravelMode,
    /// Whether the return leg is included.
    #[serde(default = "default_true")]
    pub round_trip: bool,
    /// Optional total budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "crate::v1::validation::validate_budget")]
    pub budget: Option<f64>,
}

/// API v1 trip search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1TripSearchResponseDto {
    /// Accepted trip length in days.
    pub length_days: u32,
    /// Whether the trip starts inside the imminent window.
    pub imminent: bool,
}

/// Trip start classification on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiV1TripTimingStatus {
    /// Already started.
    Past,
    /// Starts within the window.
    Imminent,
    /// Starts after the window.
    Upcoming,
}

/// API v1 upcoming-trip entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1TripTimingDto {
    /// Trip start (`YYYY-MM-DD`).
    pub start: String,
    /// Classification.
    pub status: ApiV1TripTimingStatus,
    /// Signed days until the start (negative when past).
    pub days_until: i64,
}

/// API v1 pet age description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1PetAgeDto {
    /// Date of birth (`YYYY-MM-DD`).
    pub born: String,
    /// Human-readable age, e.g. `3 years old`.
    pub description: String,
}
