//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;
mod validation;

pub use mappers::{
    DateCheckInput, date_check_request_to_domain, date_range_validation_to_api_v1,
    error_code_to_api_v1, error_envelope_to_api_v1_error, pet_age_to_api_v1,
    result_to_api_v1_result, trip_search_request_to_domain, trip_timing_to_api_v1,
};
pub use schema::{api_v1_date_check_request_schema, api_v1_trip_search_request_schema};
pub use types::*;
pub use validation::{
    ApiV1ValidationIssue, validate_date_check_request, validate_trip_search_request,
};
