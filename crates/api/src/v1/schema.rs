//! JSON Schema exports for API v1 request DTOs.

use crate::v1::{ApiV1DateCheckRequestDto, ApiV1TripSearchRequestDto};
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1DateCheckRequestDto`.
#[must_use]
pub fn api_v1_date_check_request_schema() -> Schema {
    schema_for!(ApiV1DateCheckRequestDto)
}

/// JSON Schema for `ApiV1TripSearchRequestDto`.
#[must_use]
pub fn api_v1_trip_search_request_schema() -> Schema {
    schema_for!(ApiV1TripSearchRequestDto)
}
