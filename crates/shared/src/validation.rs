//! Validation traits for request DTOs.

/// Trait for validation errors used by `Validate`.
pub trait ValidationError: Sized {
    /// A required field was empty.
    fn empty(field: &'static str) -> Self;

    /// A field value is invalid for a specific reason.
    fn invalid(field: &'static str, reason: &'static str) -> Self;

    /// A numeric field is outside the allowed range.
    fn out_of_range(field: &'static str, value: String, min: String, max: String) -> Self;

    /// A field is not a `YYYY-MM-DD` calendar date.
    fn invalid_date(field: &'static str, value: String) -> Self;
}

/// Validate a DTO using compile-time derived rules.
pub trait Validate {
    /// Error type returned by validation.
    type Error: ValidationError;

    /// Validate the DTO.
    fn validate(&self) -> Result<(), Self::Error>;
}

/// Returns true when `value` has the `YYYY-MM-DD` shape of a real calendar day.
///
/// Used by derived `iso_date` checks; the domain crate does the full parse.
#[must_use]
pub fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(index, byte)| matches!(index, 4 | 7) || byte.is_ascii_digit());
    if !digits_ok || bytes.get(4) != Some(&b'-') || bytes.get(7) != Some(&b'-') {
        return false;
    }

    let (Some(month), Some(day)) = (value.get(5..7), value.get(8..10)) else {
        return false;
    };
    let (Ok(month), Ok(day)) = (month.parse::<u8>(), day.parse::<u8>()) else {
        return false;
    };
    (1..=12).contains(&month) && (1..=31).contains(&day)
}
