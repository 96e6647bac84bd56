//! Planner configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - A validated config carries bounded limits so callers never re-check them.

use pawtrip_domain::{DateRangeValidator, MAX_TRIP_DAYS, TripSearchLimits, UpcomingWindow};
use pawtrip_shared::{BoundedU32, ErrorCode, ErrorEnvelope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const TRIP_MAX_DAYS_MIN: u32 = 1;
const TRIP_MAX_DAYS_MAX: u32 = 30;
const TRIP_WINDOW_DAYS_MIN: u32 = 0;
const TRIP_WINDOW_DAYS_MAX: u32 = 30;
const TRIP_ADULTS_MIN: u32 = 1;
const TRIP_ADULTS_MAX: u32 = 20;
const TRIP_CHILDREN_MIN: u32 = 0;
const TRIP_CHILDREN_MAX: u32 = 20;

/// Top-level planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PlannerConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Trip policy.
    pub trip: TripConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            trip: TripConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Validate the config and derive its bounded limits.
    pub fn validate_and_normalize(self) -> Result<ValidatedPlannerConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        let limits = PlannerLimits::new(&self.trip)?;
        Ok(ValidatedPlannerConfig { raw: self, limits })
    }
}

/// Trip policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TripConfig {
    /// Longest accepted trip, in days (both endpoints included).
    pub max_days: u32,
    /// Days after today during which a trip counts as imminent.
    pub upcoming_window_days: u32,
    /// Fewest adults per search.
    pub min_adults: u32,
    /// Most adults per search.
    pub max_adults: u32,
    /// Most children per search.
    pub max_children: u32,
}

impl Default for TripConfig {
    fn default() -> Self {
        let limits = TripSearchLimits::default();
        Self {
            max_days: MAX_TRIP_DAYS,
            upcoming_window_days: UpcomingWindow::default().days(),
            min_adults: limits.min_adults,
            max_adults: limits.max_adults,
            max_children: limits.max_children,
        }
    }
}

/// Validated config wrapper carrying bounded numeric values.
#[derive(Debug, Clone)]
pub struct ValidatedPlannerConfig {
    raw: PlannerConfig,
    limits: PlannerLimits,
}

impl ValidatedPlannerConfig {
    /// Access validated numeric bounds.
    #[must_use]
    pub const fn limits(&self) -> &PlannerLimits {
        &self.limits
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &PlannerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedPlannerConfig {
    type Target = PlannerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Validated numeric limits derived from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerLimits {
    /// Longest accepted trip.
    pub max_trip_days: BoundedU32<TRIP_MAX_DAYS_MIN, TRIP_MAX_DAYS_MAX>,
    /// Imminent-trip window.
    pub upcoming_window_days: BoundedU32<TRIP_WINDOW_DAYS_MIN, TRIP_WINDOW_DAYS_MAX>,
    /// Fewest adults.
    pub min_adults: BoundedU32<TRIP_ADULTS_MIN, TRIP_ADULTS_MAX>,
    /// Most adults.
    pub max_adults: BoundedU32<TRIP_ADULTS_MIN, TRIP_ADULTS_MAX>,
    /// Most children.
    pub max_children: BoundedU32<TRIP_CHILDREN_MIN, TRIP_CHILDREN_MAX>,
}

impl PlannerLimits {
    fn new(trip: &TripConfig) -> Result<Self, ConfigSchemaError> {
        let limits = Self {
            max_trip_days: bounded("maxDays", trip.max_days)?,
            upcoming_window_days: bounded("upcomingWindowDays", trip.upcoming_window_days)?,
            min_adults: bounded("minAdults", trip.min_adults)?,
            max_adults: bounded("maxAdults", trip.max_adults)?,
            max_children: bounded("maxChildren", trip.max_children)?,
        };
        if limits.min_adults > limits.max_adults {
            return Err(ConfigSchemaError::InvertedRange {
                section: "trip",
                min_field: "minAdults",
                max_field: "maxAdults",
                min: trip.min_adults,
                max: trip.max_adults,
            });
        }
        Ok(limits)
    }

    /// Date-range validator for the configured maximum.
    #[must_use]
    pub const fn date_range_validator(&self) -> DateRangeValidator {
        DateRangeValidator::new(self.max_trip_days.get())
    }

    /// Imminent-trip window.
    #[must_use]
    pub const fn upcoming_window(&self) -> UpcomingWindow {
        UpcomingWindow::new(self.upcoming_window_days.get())
    }

    /// Limits for trip search validation.
    #[must_use]
    pub const fn trip_search_limits(&self) -> TripSearchLimits {
        TripSearchLimits {
            max_days: self.max_trip_days.get(),
            min_adults: self.min_adults.get(),
            max_adults: self.max_adults.get(),
            max_children: self.max_children.get(),
        }
    }
}

fn bounded<const MIN: u32, const MAX: u32>(
    field: &'static str,
    value: u32,
) -> Result<BoundedU32<MIN, MAX>, ConfigSchemaError> {
    BoundedU32::try_new(value).map_err(|error| ConfigSchemaError::LimitOutOfRange {
        section: "trip",
        field,
        value: error.value,
        min: error.min,
        max: error.max,
    })
}

/// Parse a planner config from a JSON string, applying validation.
pub fn parse_planner_config_json(input: &str) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let config: PlannerConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a planner config from a TOML string, applying validation.
pub fn parse_planner_config_toml(input: &str) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let config: PlannerConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// JSON Schema for [`PlannerConfig`].
#[must_use]
pub fn planner_config_schema() -> schemars::Schema {
    schemars::schema_for!(PlannerConfig)
}

/// Config validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `trip`).
        section: &'static str,
        /// Field name in the config file (e.g. `maxDays`).
        field: &'static str,
        /// Value provided.
        value: u32,
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
    },
    /// A minimum is greater than its paired maximum.
    InvertedRange {
        /// Schema section.
        section: &'static str,
        /// Field holding the minimum.
        min_field: &'static str,
        /// Field holding the maximum.
        max_field: &'static str,
        /// Minimum provided.
        min: u32,
        /// Maximum provided.
        max: u32,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::LimitOutOfRange { .. } | Self::InvertedRange { .. } => {
                ErrorCode::new("config", "invalid_limit")
            },
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version: {found} (supported: {supported})"
            ),
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
            Self::InvertedRange {
                section,
                min_field,
                max_field,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{min_field} ({min}) must not exceed {section}.{max_field} ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::InvertedRange {
                section,
                min_field,
                max_field,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", min_field)
                .with_metadata("max_field", max_field)
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}
