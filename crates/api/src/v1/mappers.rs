//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1DateCheckRequestDto, ApiV1DateCheckResultDto, ApiV1DateRejectionReason, ApiV1ErrorCode,
    ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1PetAgeDto, ApiV1Result, ApiV1TravelMode,
    ApiV1TripSearchRequestDto, ApiV1TripTimingDto, ApiV1TripTimingStatus,
};
use chrono::NaiveDate;
use pawtrip_domain::{
    DateRange, DateRangeRejection, DateRangeValidation, DateRangeValidator, PetAge, TravelMode,
    TripSearch, TripTiming, parse_calendar_date,
};
use pawtrip_shared::{ErrorCode, ErrorEnvelope, ErrorKind};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
///
/// Entries in `extra_meta` win over envelope metadata with the same key.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged = envelope.metadata.clone();
    merged.extend(extra_meta.unwrap_or_default());

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta: (!merged.is_empty()).then_some(merged),
    }
}

/// Map a shared result into an API v1 result wrapper.
#[must_use]
pub fn result_to_api_v1_result<T>(
    result: Result<T, ErrorEnvelope>,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1Result<T> {
    match result {
        Ok(data) => ApiV1Result::ok(data),
        Err(error) => ApiV1Result::err(error_envelope_to_api_v1_error(&error, extra_meta)),
    }
}

/// Domain inputs for one date check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCheckInput {
    /// Requested range.
    pub range: DateRange,
    /// Reference day.
    pub today: NaiveDate,
    /// Policy to apply.
    pub validator: DateRangeValidator,
}

/// Map a date check request into domain inputs.
///
/// `default_today` and `default_validator` fill the optional request fields.
pub fn date_check_request_to_domain(
    dto: &ApiV1DateCheckRequestDto,
    default_today: NaiveDate,
    default_validator: DateRangeValidator,
) -> Result<DateCheckInput, ErrorEnvelope> {
    let range = DateRange::new(
        parse_optional_date("from", dto.from.as_deref())?,
        parse_optional_date("to", dto.to.as_deref())?,
    );
    let today = parse_optional_date("today", dto.today.as_deref())?.unwrap_or(default_today);
    let validator = dto
        .max_days
        .map_or(default_validator, DateRangeValidator::new);

    Ok(DateCheckInput {
        range,
        today,
        validator,
    })
}

/// Map a domain date range verdict into the wire result.
#[must_use]
pub const fn date_range_validation_to_api_v1(
    validation: DateRangeValidation,
) -> ApiV1DateCheckResultDto {
    match validation {
        DateRangeValidation::Valid { length } => ApiV1DateCheckResultDto {
            valid: true,
            length: Some(length),
            reason: None,
        },
        DateRangeValidation::Invalid { reason } => ApiV1DateCheckResultDto {
            valid: false,
            length: None,
            reason: Some(rejection_to_api_v1(reason)),
        },
    }
}

/// Map a trip search request into the domain search.
pub fn trip_search_request_to_domain(
    dto: &ApiV1TripSearchRequestDto,
) -> Result<TripSearch, ErrorEnvelope> {
    let dates = DateRange::new(
        parse_optional_date("from", dto.from.as_deref())?,
        parse_optional_date("to", dto.to.as_deref())?,
    );
    Ok(TripSearch {
        origin: dto.origin.trim().to_owned(),
        destination: dto.destination.trim().to_owned(),
        dates,
        adults: dto.adults,
        children: dto.children,
        travel_mode: match dto.travel_mode {
            ApiV1TravelMode::Flight => TravelMode::Flight,
            ApiV1TravelMode::Roadtrip => TravelMode::Roadtrip,
        },
        round_trip: dto.round_trip,
        budget: dto.budget,
    })
}

/// Map a trip start classification into the wire entry.
#[must_use]
pub fn trip_timing_to_api_v1(start: NaiveDate, timing: TripTiming) -> ApiV1TripTimingDto {
    let (status, days_until) = match timing {
        TripTiming::Past { days_ago } => (ApiV1TripTimingStatus::Past, -i64::from(days_ago)),
        TripTiming::Imminent { days_until } => {
            (ApiV1TripTimingStatus::Imminent, i64::from(days_until))
        },
        TripTiming::Upcoming { days_until } => {
            (ApiV1TripTimingStatus::Upcoming, i64::from(days_until))
        },
    };
    ApiV1TripTimingDto {
        start: start.format(ISO_DATE_FORMAT).to_string(),
        status,
        days_until,
    }
}

/// Map a pet age into the wire description.
#[must_use]
pub fn pet_age_to_api_v1(born: NaiveDate, age: PetAge) -> ApiV1PetAgeDto {
    ApiV1PetAgeDto {
        born: born.format(ISO_DATE_FORMAT).to_string(),
        description: age.to_string(),
    }
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ErrorEnvelope> {
    value
        .map(|raw| {
            parse_calendar_date(raw)
                .map_err(|error| ErrorEnvelope::from(error).with_metadata("field", field))
        })
        .transpose()
}

const fn rejection_to_api_v1(reason: DateRangeRejection) -> ApiV1DateRejectionReason {
    match reason {
        DateRangeRejection::Incomplete => ApiV1DateRejectionReason::Incomplete,
        DateRangeRejection::StartBeforeToday => ApiV1DateRejectionReason::StartBeforeToday,
        DateRangeRejection::EndNotAfterStart => ApiV1DateRejectionReason::EndNotAfterStart,
        DateRangeRejection::TooLong => ApiV1DateRejectionReason::TooLong,
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
