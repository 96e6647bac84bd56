//! API v1 DTO validation helpers (shape and limit checks only).
//!
//! Policy checks (trip length, party size limits) belong to the domain; this
//! layer only rejects payloads that cannot be mapped at all.

use crate::v1::{ApiV1DateCheckRequestDto, ApiV1TripSearchRequestDto};
use pawtrip_shared::{ErrorCode, ErrorEnvelope, Validate, ValidationError};
use std::fmt;

/// Validation failure details for API v1 DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiV1ValidationIssue {
    /// Field name that failed validation.
    pub field: &'static str,
    /// Human-readable validation error message.
    pub message: Box<str>,
}

impl ApiV1ValidationIssue {
    fn new(field: &'static str, message: impl Into<Box<str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiV1ValidationIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ApiV1ValidationIssue {}

impl ValidationError for ApiV1ValidationIssue {
    fn empty(field: &'static str) -> Self {
        Self::new(field, "value must be non-empty")
    }

    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::new(field, reason)
    }

    fn out_of_range(field: &'static str, _value: String, min: String, max: String) -> Self {
        Self::new(field, format!("value must be between {min} and {max}"))
    }

    fn invalid_date(field: &'static str, value: String) -> Self {
        Self::new(field, format!("`{value}` is not a YYYY-MM-DD date"))
    }
}

impl From<ApiV1ValidationIssue> for ErrorEnvelope {
    fn from(issue: ApiV1ValidationIssue) -> Self {
        Self::expected(ErrorCode::new("api", "invalid_request"), issue.to_string())
            .with_metadata("field", issue.field)
    }
}

/// Validate a date check request DTO.
pub fn validate_date_check_request(
    dto: &ApiV1DateCheckRequestDto,
) -> Result<(), ApiV1ValidationIssue> {
    dto.validate()
}

/// Validate a trip search request DTO.
pub fn validate_trip_search_request(
    dto: &ApiV1TripSearchRequestDto,
) -> Result<(), ApiV1ValidationIssue> {
    dto.validate()
}

/// Rejects `NaN` and infinite budgets; the sign is checked by the domain.
pub fn validate_budget(budget: Option<&f64>) -> Result<(), ApiV1ValidationIssue> {
    match budget {
        Some(value) if !value.is_finite() => Err(ApiV1ValidationIssue::invalid(
            "budget",
            "budget must be a finite number",
        )),
        _ => Ok(()),
    }
}
