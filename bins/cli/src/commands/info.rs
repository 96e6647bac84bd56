//! Info command handler.

use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use pawtrip_core::{BuildInfo, build_info};
use pawtrip_domain::MAX_TRIP_DAYS;

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();
    let stdout = mode.render(|| format_info_text(&build), info_payload(&build))?;
    Ok(CliOutput::ok(stdout))
}

fn format_info_text(build: &BuildInfo) -> String {
    format!(
        "status: ok\nname: {}\nversion: {}\nrust: {}\nplatform: {}\nprofile: {}\ngit: {}{}\nmaxTripDays: {MAX_TRIP_DAYS}\n",
        build.name,
        build.version,
        build.rust_version,
        build.platform,
        build.profile.as_str(),
        build.git_hash.unwrap_or("none"),
        if build.git_dirty { " (dirty)" } else { "" }
    )
}

fn info_payload(build: &BuildInfo) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "kind": "info",
        "build": {
            "name": build.name,
            "version": build.version,
            "rustVersion": build.rust_version,
            "platform": build.platform.to_string(),
            "profile": build.profile.as_str(),
            "gitHash": build.git_hash,
            "gitDirty": build.git_dirty,
        },
        "defaults": { "maxTripDays": MAX_TRIP_DAYS },
    })
}
