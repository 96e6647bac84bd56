//! Config loading helpers (file + overrides + env).
//!
//! The loader owns the merge order and surfaces user-facing errors as typed
//! `ErrorEnvelope`s.

use crate::{PlannerConfig, PlannerEnv, ValidatedPlannerConfig, apply_env_overrides};
use pawtrip_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

/// Load the planner config from in-memory sources.
///
/// Precedence (highest wins):
/// - env overrides (`PlannerEnv`)
/// - overrides JSON (partial config)
/// - config JSON
/// - defaults (`PlannerConfig::default()`)
pub fn load_planner_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &PlannerEnv,
) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let config = match config_json {
        None => PlannerConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the planner config from an optional file path.
pub fn load_planner_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &PlannerEnv,
) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let config = match config_path {
        None => PlannerConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), format = format.as_str(), "reading planner config");
            parse_config_unvalidated(&text, format)?
        },
    };
    merge_and_validate(config, overrides_json, env)
}

/// Load the planner config from the process env and an optional file path.
pub fn load_planner_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    let env = PlannerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_planner_config_from_path(config_path, overrides_json, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &PlannerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &PlannerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn merge_and_validate(
    mut config: PlannerConfig,
    overrides_json: Option<&str>,
    env: &PlannerEnv,
) -> Result<ValidatedPlannerConfig, ErrorEnvelope> {
    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        overrides.apply(&mut config);
    }
    if !env.is_empty() {
        tracing::debug!(?env, "applying planner env overrides");
    }

    // env is applied last and also validates the merged config.
    apply_env_overrides(config, env)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<PlannerConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<PlannerConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct PlannerConfigOverrides {
    version: Option<u32>,
    trip: TripConfigOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct TripConfigOverrides {
    max_days: Option<u32>,
    upcoming_window_days: Option<u32>,
    min_adults: Option<u32>,
    max_adults: Option<u32>,
    max_children: Option<u32>,
}

impl PlannerConfigOverrides {
    fn apply(self, config: &mut PlannerConfig) {
        if let Some(version) = self.version {
            config.version = version;
        }
        let trip = &mut config.trip;
        let overrides = self.trip;
        for (target, value) in [
            (&mut trip.max_days, overrides.max_days),
            (&mut trip.upcoming_window_days, overrides.upcoming_window_days),
            (&mut trip.min_adults, overrides.min_adults),
            (&mut trip.max_adults, overrides.max_adults),
            (&mut trip.max_children, overrides.max_children),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}
