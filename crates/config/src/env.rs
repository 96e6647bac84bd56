//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is set but empty or malformed fails
//! fast instead of being ignored.

use crate::schema::{PlannerConfig, ValidatedPlannerConfig};
use pawtrip_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: maximum trip length in days.
pub const ENV_TRIP_MAX_DAYS: &str = "PAWTRIP_TRIP_MAX_DAYS";
/// Env var: imminent-trip window in days.
pub const ENV_TRIP_UPCOMING_WINDOW_DAYS: &str = "PAWTRIP_TRIP_UPCOMING_WINDOW_DAYS";
/// Env var: maximum adults per search.
pub const ENV_TRIP_MAX_ADULTS: &str = "PAWTRIP_TRIP_MAX_ADULTS";
/// Env var: maximum children per search.
pub const ENV_TRIP_MAX_CHILDREN: &str = "PAWTRIP_TRIP_MAX_CHILDREN";
/// Env var: log filter directive (read by the CLI, not merged into config).
pub const ENV_LOG: &str = "PAWTRIP_LOG";

const PLANNER_ENV_VARS: [&str; 4] = [
    ENV_TRIP_MAX_DAYS,
    ENV_TRIP_UPCOMING_WINDOW_DAYS,
    ENV_TRIP_MAX_ADULTS,
    ENV_TRIP_MAX_CHILDREN,
];

/// Parsed env overrides for the planner config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerEnv {
    /// Override for `trip.maxDays`.
    pub trip_max_days: Option<u32>,
    /// Override for `trip.upcomingWindowDays`.
    pub trip_upcoming_window_days: Option<u32>,
    /// Override for `trip.maxAdults`.
    pub trip_max_adults: Option<u32>,
    /// Override for `trip.maxChildren`.
    pub trip_max_children: Option<u32>,
}

impl PlannerEnv {
    /// Parse overrides from an explicit map (tests, fixtures, embedding).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            trip_max_days: parse_optional_u32(map, ENV_TRIP_MAX_DAYS)?,
            trip_upcoming_window_days: parse_optional_u32(map, ENV_TRIP_UPCOMING_WINDOW_DAYS)?,
            trip_max_adults: parse_optional_u32(map, ENV_TRIP_MAX_ADULTS)?,
            trip_max_children: parse_optional_u32(map, ENV_TRIP_MAX_CHILDREN)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = PLANNER_ENV_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_owned(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trip_max_days.is_none()
            && self.trip_upcoming_window_days.is_none()
            && self.trip_max_adults.is_none()
            && self.trip_max_children.is_none()
    }
}

/// Apply env overrides to a config, then validate the result.
pub fn apply_env_overrides(
    base: PlannerConfig,
    env: &PlannerEnv,
) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let mut config = base;
    set_u32(&mut config.trip.max_days, env.trip_max_days);
    set_u32(
        &mut config.trip.upcoming_window_days,
        env.trip_upcoming_window_days,
    );
    set_u32(&mut config.trip.max_adults, env.trip_max_adults);
    set_u32(&mut config.trip.max_children, env.trip_max_children);

    config.validate_and_normalize().map_err(Into::into)
}

const fn set_u32(target: &mut u32, value: Option<u32>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a non-negative integer")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidInt { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}
