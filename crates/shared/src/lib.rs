//! # pawtrip-shared
//!
//! Result types, error envelopes and validation traits shared by every
//! pawtrip crate.
//!
//! This crate only depends on external crates, so the domain, config, API
//! and CLI layers can all agree on one error shape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// =============================================================================
// RESULT + ERROR ENVELOPE
// =============================================================================

pub mod errors;
pub mod invariants;
pub mod result;
pub mod validation;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::{BoundedU32, BoundsError};
pub use result::{Result, ResultExt};
pub use validation::{Validate, ValidationError, is_iso_date_shape};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
