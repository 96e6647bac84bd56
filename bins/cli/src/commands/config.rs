//! `config show|validate|schema` handlers.

use crate::error::CliError;
use crate::format::{OutputMode, ndjson_line, pretty_json};
use crate::{CliContext, CliOutput};
use pawtrip_config::{
    ValidatedPlannerConfig, load_planner_config_from_path, planner_config_schema, to_pretty_toml,
};
use std::path::Path;

/// Print the effective config (TOML in text mode).
pub fn run_config_show(
    mode: OutputMode,
    ctx: &CliContext,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    let config = load(ctx, path, overrides_json)?;
    let toml = to_pretty_toml(config.as_ref())?;

    let payload = serde_json::json!({
        "status": "ok",
        "kind": "config",
        "configPath": display_path(path),
        "effectiveConfig": config.as_ref(),
    });
    let stdout = mode.render(|| format!("status: ok\nconfig:\n{toml}"), payload)?;
    Ok(CliOutput::ok(stdout))
}

/// Validate the effective config.
pub fn run_config_validate(
    mode: OutputMode,
    ctx: &CliContext,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    load(ctx, path, overrides_json)?;

    let payload = serde_json::json!({
        "status": "ok",
        "kind": "config",
        "configPath": display_path(path),
    });
    let stdout = mode.render(
        || {
            path.map_or_else(
                || "status: ok\nconfig: ok\n".to_owned(),
                |path| format!("status: ok\nconfig: ok\npath: {}\n", path.display()),
            )
        },
        payload,
    )?;
    Ok(CliOutput::ok(stdout))
}

/// Print the config JSON Schema; every mode prints JSON.
pub fn run_config_schema(mode: OutputMode) -> Result<CliOutput, CliError> {
    let schema = serde_json::to_value(planner_config_schema())?;
    let stdout = if mode.is_ndjson() {
        ndjson_line(&schema)?
    } else {
        pretty_json(&schema)?
    };
    Ok(CliOutput::ok(stdout))
}

fn load(
    ctx: &CliContext,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedPlannerConfig, CliError> {
    let config = load_planner_config_from_path(path, overrides_json, &ctx.env)?;
    tracing::debug!(max_days = config.limits().trip_search_limits().max_days, "config loaded");
    Ok(config)
}

fn display_path(path: Option<&Path>) -> Option<String> {
    path.map(|value| value.display().to_string())
}
