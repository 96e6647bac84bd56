//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand};
use commands::{
    DatesCheckArgs, TripSource, run_config_schema, run_config_show, run_config_validate,
    run_dates_check, run_info, run_pet_age, run_pet_profile, run_trip_upcoming,
    run_trip_validate,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode, format_error_output};
use pawtrip_app::{Clock, PlannerDeps, SystemClock};
use pawtrip_config::{PlannerEnv, load_planner_config_from_path};
use pawtrip_shared::ErrorEnvelope;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "pawtrip",
    version,
    about = "Plan trips with your dog",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show build and version details.
    Info,
    /// Trip date checks.
    Dates {
        #[command(subcommand)]
        command: DatesCommands,
    },
    /// Trip search validation and upcoming-trip classification.
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Pet profile helpers.
    Pet {
        #[command(subcommand)]
        command: PetCommands,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DatesCommands {
    /// Check a trip date range against the date policy.
    Check {
        /// First day of the trip (`YYYY-MM-DD`).
        #[arg(long)]
        from: Option<String>,
        /// Last day of the trip (`YYYY-MM-DD`).
        #[arg(long)]
        to: Option<String>,
        /// Reference day (defaults to the local date).
        #[arg(long)]
        today: Option<String>,
        /// Maximum trip length in days (defaults to the configured policy).
        #[arg(long)]
        max_days: Option<u32>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum TripCommands {
    /// Validate a trip search request (API v1 JSON).
    Validate {
        /// Path to the request JSON.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Request JSON passed inline.
        #[arg(long, conflicts_with = "input")]
        input_json: Option<String>,
        /// Read the request JSON from stdin.
        #[arg(long, conflicts_with_all = ["input", "input_json"])]
        stdin: bool,
        /// Reference day (defaults to the local date).
        #[arg(long)]
        today: Option<String>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Classify trip start dates as past, imminent or upcoming.
    Upcoming {
        /// Trip start dates (`YYYY-MM-DD`), repeatable.
        #[arg(long = "start", required = true, num_args = 1..)]
        starts: Vec<String>,
        /// Reference day (defaults to the local date).
        #[arg(long)]
        today: Option<String>,
        /// Imminent window in days (defaults to the configured window).
        #[arg(long)]
        window: Option<u32>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum PetCommands {
    /// Describe a pet's age from its date of birth.
    Age {
        /// Date of birth (`YYYY-MM-DD`).
        #[arg(long)]
        born: String,
        /// Reference day (defaults to the local date).
        #[arg(long)]
        today: Option<String>,
    },
    /// Build a pet profile, optionally pre-filled from an analysis JSON file.
    Profile {
        /// Pet name.
        #[arg(long)]
        name: String,
        /// Path to an analysis payload.
        #[arg(long)]
        analysis: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Partial config JSON applied on top of the file.
        #[arg(long)]
        overrides_json: Option<String>,
    },
    /// Validate config without printing it.
    Validate {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Partial config JSON applied on top of the file.
        #[arg(long)]
        overrides_json: Option<String>,
    },
    /// Print the config JSON Schema.
    Schema,
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

impl CliOutput {
    pub(crate) const fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: ExitCode::Ok,
        }
    }
}

/// Process-level inputs: the clock and the planner env overrides.
pub(crate) struct CliContext {
    clock: Arc<dyn Clock>,
    env: PlannerEnv,
}

impl CliContext {
    fn from_process() -> Result<Self, ErrorEnvelope> {
        Ok(Self {
            clock: Arc::new(SystemClock),
            env: PlannerEnv::from_std_env().map_err(ErrorEnvelope::from)?,
        })
    }

    /// Use cases wired from the effective config.
    pub(crate) fn planner_deps(
        &self,
        config_path: Option<&Path>,
        overrides_json: Option<&str>,
    ) -> Result<PlannerDeps, ErrorEnvelope> {
        let config = load_planner_config_from_path(config_path, overrides_json, &self.env)?;
        let limits = config.limits();
        Ok(PlannerDeps {
            clock: Arc::clone(&self.clock),
            window: limits.upcoming_window(),
            trip_limits: limits.trip_search_limits(),
        })
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    logging::init_tracing(mode);

    let output = match CliContext::from_process() {
        Ok(ctx) => run(&cli.command, mode, &ctx),
        Err(error) => Ok(format_error_output(mode, &error)),
    };
    match output {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode, ctx: &CliContext) -> Result<CliOutput, CliError> {
    let result = dispatch(command, mode, ctx);
    match result {
        Err(CliError::Envelope(error)) => {
            tracing::debug!(code = %error.code, "command failed");
            Ok(format_error_output(mode, &error))
        },
        other => other,
    }
}

fn dispatch(command: &Commands, mode: OutputMode, ctx: &CliContext) -> Result<CliOutput, CliError> {
    match command {
        Commands::Info => run_info(mode),
        Commands::Dates {
            command:
                DatesCommands::Check {
                    from,
                    to,
                    today,
                    max_days,
                    config,
                },
        } => run_dates_check(
            mode,
            ctx,
            &DatesCheckArgs {
                from: from.clone(),
                to: to.clone(),
                today: today.clone(),
                max_days: *max_days,
            },
            config.as_deref(),
        ),
        Commands::Trip { command } => match command {
            TripCommands::Validate {
                input,
                input_json,
                stdin,
                today,
                config,
            } => {
                let source = match (input, input_json, *stdin) {
                    (Some(path), _, _) => TripSource::File(path),
                    (None, Some(json), _) => TripSource::Inline(json),
                    (None, None, true) => TripSource::Stdin,
                    (None, None, false) => {
                        return Err(CliError::InvalidInput(
                            "missing --input, --input-json or --stdin".to_owned(),
                        ));
                    },
                };
                run_trip_validate(mode, ctx, &source, today.as_deref(), config.as_deref())
            },
            TripCommands::Upcoming {
                starts,
                today,
                window,
                config,
            } => run_trip_upcoming(
                mode,
                ctx,
                starts,
                today.as_deref(),
                *window,
                config.as_deref(),
            ),
        },
        Commands::Pet { command } => match command {
            PetCommands::Age { born, today } => run_pet_age(mode, ctx, born, today.as_deref()),
            PetCommands::Profile { name, analysis } => {
                run_pet_profile(mode, name, analysis.as_deref())
            },
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show {
                path,
                overrides_json,
            } => run_config_show(mode, ctx, path.as_deref(), overrides_json.as_deref()),
            ConfigCommands::Validate {
                path,
                overrides_json,
            } => run_config_validate(mode, ctx, path.as_deref(), overrides_json.as_deref()),
            ConfigCommands::Schema => run_config_schema(mode),
        },
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use chrono::NaiveDate;
    use clap::CommandFactory;
    use pawtrip_app::FixedClock;

    fn test_context() -> Result<CliContext, Box<dyn std::error::Error>> {
        let today = NaiveDate::from_ymd_opt(2026, 2, 6).ok_or("invalid test date")?;
        Ok(CliContext {
            clock: Arc::new(FixedClock(today)),
            env: PlannerEnv::default(),
        })
    }

    fn run_args(args: &[&str]) -> Result<CliOutput, Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(args)?;
        let mode = OutputMode::from_args(&cli.output);
        Ok(run(&cli.command, mode, &test_context()?)?)
    }

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["pawtrip", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dates_check_uses_the_context_clock() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_args(&[
            "pawtrip", "dates", "check", "--from", "2026-02-06", "--to", "2026-02-08",
        ])?;
        assert_eq!(output.exit_code, ExitCode::Ok);
        assert!(output.stdout.contains("length: 3"));

        let output = run_args(&[
            "pawtrip", "dates", "check", "--from", "2026-02-05", "--to", "2026-02-07",
        ])?;
        assert_eq!(output.exit_code, ExitCode::DatesRejected);
        assert!(output.stdout.contains("reason: start-before-today"));
        Ok(())
    }

    #[test]
    fn malformed_dates_are_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_args(&["pawtrip", "--json", "dates", "check", "--from", "Feb 6"])?;
        assert_eq!(output.exit_code, ExitCode::InvalidInput);

        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], "ERR_API_INVALID_REQUEST");
        assert_eq!(value["error"]["meta"]["field"], "from");
        Ok(())
    }

    #[test]
    fn missing_config_file_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
        let missing = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("missing-config.json");
        let missing = missing.to_string_lossy();
        let output = run_args(&["pawtrip", "config", "validate", "--path", &missing])?;
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        assert!(output.stdout.starts_with("status: error"));
        Ok(())
    }

    #[test]
    fn trip_validate_requires_a_source() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["pawtrip", "trip", "validate"])?;
        let mode = OutputMode::new(OutputFormat::Text);
        let Err(error) = run(&cli.command, mode, &test_context()?) else {
            return Err("a request source should be required".into());
        };
        assert_eq!(error.exit_code(), ExitCode::InvalidInput);
        Ok(())
    }

    #[test]
    fn cli_parses_upcoming_flags() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "pawtrip",
            "--agent",
            "trip",
            "upcoming",
            "--start",
            "2026-02-07",
            "2026-03-01",
            "--window",
            "5",
        ])?;
        assert!(cli.output.agent);
        match cli.command {
            Commands::Trip {
                command: TripCommands::Upcoming { starts, window, .. },
            } => {
                assert_eq!(starts, vec!["2026-02-07", "2026-03-01"]);
                assert_eq!(window, Some(5));
            },
            _ => return Err("expected trip upcoming command".into()),
        }
        Ok(())
    }
}
