//! Output format selection and rendering helpers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use clap::{Args, ValueEnum};
use pawtrip_api::v1::{ApiV1ErrorDto, error_envelope_to_api_v1_error};
use pawtrip_shared::ErrorEnvelope;
use serde_json::Value;

const FALLBACK_ERROR_JSON: &str = r#"{"status":"error","error":{"code":"ERR_CORE_INTERNAL","message":"internal error","kind":"INVARIANT"}}"#;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// Line-delimited JSON (NDJSON) output.
    Ndjson,
}

/// Output-related CLI flags.
#[derive(Debug, Default, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Emit machine-friendly defaults (NDJSON output).
    #[arg(long, global = true)]
    pub agent: bool,
    /// Emit JSON output (shorthand for `--output json`).
    #[arg(long, global = true)]
    pub json: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    pub format: OutputFormat,
}

impl OutputMode {
    /// Build output mode from CLI flags. `--output` wins, then `--json`, then `--agent`.
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        let format = match (args.output, args.json, args.agent) {
            (Some(value), _, _) => value,
            (None, true, _) => OutputFormat::Json,
            (None, false, true) => OutputFormat::Ndjson,
            (None, false, false) => OutputFormat::Text,
        };
        Self::new(format)
    }

    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns true when NDJSON output is requested.
    #[must_use]
    pub const fn is_ndjson(self) -> bool {
        matches!(self.format, OutputFormat::Ndjson)
    }

    /// Returns true for either machine-readable format.
    #[must_use]
    pub const fn is_machine(self) -> bool {
        !matches!(self.format, OutputFormat::Text)
    }

    /// Render `text`, `json` or a single NDJSON summary line depending on the mode.
    ///
    /// The NDJSON line is `json` plus `"type": "summary"`.
    pub fn render(self, text: impl FnOnce() -> String, json: Value) -> Result<String, CliError> {
        match self.format {
            OutputFormat::Text => Ok(text()),
            OutputFormat::Json => pretty_json(&json),
            OutputFormat::Ndjson => ndjson_line(&tagged("summary", json)),
        }
    }
}

/// Serialize `value` as pretty JSON with a trailing newline.
pub fn pretty_json(value: &Value) -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

/// Serialize `value` as one NDJSON line.
pub fn ndjson_line(value: &Value) -> Result<String, CliError> {
    let mut output = serde_json::to_string(value)?;
    output.push('\n');
    Ok(output)
}

/// Prefix an object payload with a `type` field.
pub fn tagged(kind: &str, payload: Value) -> Value {
    let mut object = serde_json::Map::new();
    object.insert("type".to_owned(), Value::from(kind));
    match payload {
        Value::Object(fields) => object.extend(fields),
        other => {
            object.insert("data".to_owned(), other);
        },
    }
    Value::Object(object)
}

/// Render a structured failure in the selected format.
pub fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let api_error = error_envelope_to_api_v1_error(error, None);
    let payload = serde_json::json!({
        "status": "error",
        "error": api_error,
    });

    let stdout = match mode.format {
        OutputFormat::Text => format_api_error_text(&api_error),
        OutputFormat::Json => pretty_json(&payload).unwrap_or_else(|_| fallback_error_line()),
        OutputFormat::Ndjson => {
            ndjson_line(&tagged("error", payload)).unwrap_or_else(|_| fallback_error_line())
        },
    };

    CliOutput {
        stdout,
        exit_code: ExitCode::for_envelope(error),
    }
}

fn fallback_error_line() -> String {
    format!("{FALLBACK_ERROR_JSON}\n")
}

fn format_api_error_text(error: &ApiV1ErrorDto) -> String {
    let mut out = format!(
        "status: error\ncode: {}\nmessage: {}\n",
        error.code, error.message
    );
    for (key, value) in error.meta.iter().flatten() {
        out.push_str(&format!("meta.{key}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrip_shared::ErrorCode;

    #[test]
    fn agent_mode_defaults_to_ndjson() {
        let mode = OutputMode::from_args(&OutputArgs {
            agent: true,
            ..OutputArgs::default()
        });
        assert!(mode.is_ndjson());

        let mode = OutputMode::from_args(&OutputArgs {
            output: Some(OutputFormat::Text),
            agent: true,
            json: true,
        });
        assert!(!mode.is_machine());
    }

    #[test]
    fn json_flag_beats_agent() {
        let mode = OutputMode::from_args(&OutputArgs {
            agent: true,
            json: true,
            ..OutputArgs::default()
        });
        assert_eq!(mode, OutputMode::new(OutputFormat::Json));

        let mode = OutputMode::from_args(&OutputArgs::default());
        assert_eq!(mode.format, OutputFormat::Text);
    }

    #[test]
    fn ndjson_summary_is_tagged() -> Result<(), Box<dyn std::error::Error>> {
        let mode = OutputMode::new(OutputFormat::Ndjson);
        let line = mode.render(String::new, serde_json::json!({ "status": "ok" }))?;
        let value: Value = serde_json::from_str(line.trim_end())?;
        assert_eq!(value["type"], "summary");
        assert_eq!(value["status"], "ok");
        assert_eq!(line.lines().count(), 1);
        Ok(())
    }

    #[test]
    fn text_errors_list_metadata() {
        let error = ErrorEnvelope::expected(ErrorCode::new("domain", "invalid_date"), "bad date")
            .with_metadata("field", "from");
        let output = format_error_output(OutputMode::new(OutputFormat::Text), &error);

        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        assert_eq!(
            output.stdout,
            "status: error\ncode: ERR_DOMAIN_INVALID_DATE\nmessage: bad date\nmeta.field: from\n"
        );
    }
}
