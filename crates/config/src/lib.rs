//! # pawtrip-config
//!
//! Planner configuration schema, validation, and loading for the CLI.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + overrides + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOG, ENV_TRIP_MAX_ADULTS, ENV_TRIP_MAX_CHILDREN, ENV_TRIP_MAX_DAYS,
    ENV_TRIP_UPCOMING_WINDOW_DAYS, EnvParseError, PlannerEnv, apply_env_overrides,
};
pub use load::{
    load_planner_config_from_path, load_planner_config_from_sources, load_planner_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, PlannerConfig, PlannerLimits, TripConfig,
    ValidatedPlannerConfig, parse_planner_config_json, parse_planner_config_toml,
    planner_config_schema,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
