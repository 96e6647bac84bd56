//! # pawtrip-api
//!
//! API v1 wire contracts: request/response DTOs, shape validation, and the
//! mappers between DTOs and domain types.
//! This crate depends only on `domain` and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// API v1 DTOs.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
