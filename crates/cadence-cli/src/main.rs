use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cadence_core::{CadenceConfig, CadenceError};
use cadence_recurrence::{RecurrenceEditor, RecurrenceType};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

/// Check, summarise and normalise recurrence forms for recurring tasks.
#[derive(Debug, Parser)]
#[command(name = "cadence", version)]
struct Cli {
    /// Config file (default: $CADENCE_CONFIG or ~/.cadence/cadence.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Read the form as this recurrence type (daily, weekly, monthly, custom)
    /// instead of the one it carries.
    #[arg(long = "type", global = true)]
    recurrence_type: Option<RecurrenceType>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a recurrence form; prints "ok" or the first error.
    Validate { input: PathBuf },
    /// Print the human-readable schedule for a form, valid or not.
    Describe { input: PathBuf },
    /// Validate a form and print the request payload with inactive fields removed.
    Normalize {
        input: PathBuf,
        /// Pretty-print the JSON payload.
        #[arg(long)]
        pretty: bool,
    },
}

impl Command {
    fn input(&self) -> &Path {
        match self {
            Command::Validate { input }
            | Command::Describe { input }
            | Command::Normalize { input, .. } => input,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, load_err) = match CadenceConfig::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (CadenceConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .init();

    if let Some(e) = load_err {
        warn!("config load failed ({e}), using defaults");
    }

    match run(&cli, &config) {
        Ok(out) => {
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(CadenceError::Validation { code, message }) => {
            eprintln!("{code}: {message}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!("{}: {e}", e.code())),
    }
}

fn run(cli: &Cli, config: &CadenceConfig) -> cadence_core::Result<String> {
    let mut editor = read_form(cli.command.input())?;
    editor.fill_timezone(&config.editor.timezone);
    if let Some(recurrence_type) = cli.recurrence_type {
        editor.set_recurrence_type(recurrence_type);
    }
    debug!(recurrence_type = %editor.spec().recurrence_type, "form loaded");

    match &cli.command {
        Command::Validate { .. } => {
            editor.validate()?;
            Ok("ok".to_string())
        }
        Command::Describe { .. } => Ok(editor.describe()),
        Command::Normalize { pretty, .. } => {
            let payload = editor.submit()?;
            if *pretty {
                payload.to_json_pretty()
            } else {
                payload.to_json()
            }
        }
    }
}

/// Read a JSON form from `path`, or from stdin when `path` is `-`.
fn read_form(path: &Path) -> cadence_core::Result<RecurrenceEditor> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write `json` into a fresh temp dir; the dir is removed when dropped.
    fn write_form(json: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("form.json");
        std::fs::write(&path, json).expect("write");
        (dir, path.to_string_lossy().into_owned())
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cadence").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_normalize_with_pretty() {
        let cli = cli(&["normalize", "--pretty", "form.json"]);
        match cli.command {
            Command::Normalize { input, pretty } => {
                assert_eq!(input, PathBuf::from("form.json"));
                assert!(pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["cadence"]).is_err());
    }

    #[test]
    fn unknown_type_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["cadence", "--type", "hourly", "describe", "f.json"])
            .unwrap_err();
        assert!(err.to_string().contains("hourly"));
    }

    #[test]
    fn validate_reports_first_error_code() {
        let (_dir, input) = write_form(r#"{"recurrence_type":"monthly","day_of_month":40}"#);
        let err = run(&cli(&["validate", input.as_str()]), &CadenceConfig::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_DAY_OF_MONTH");
    }

    #[test]
    fn validate_checks_timezone_like_normalize() {
        let (_dir, input) = write_form(r#"{"recurrence_type":"daily","timezone":"Europe/ Berlin"}"#);
        let config = CadenceConfig::default();

        let validate_err = run(&cli(&["validate", input.as_str()]), &config).unwrap_err();
        let normalize_err = run(&cli(&["normalize", input.as_str()]), &config).unwrap_err();
        assert_eq!(validate_err.code(), "INVALID_TIMEZONE");
        assert_eq!(normalize_err.code(), "INVALID_TIMEZONE");
    }

    #[test]
    fn describe_invalid_form_is_best_effort() {
        let (_dir, input) = write_form(r#"{"recurrence_type":"weekly","days_of_week":[2,9]}"#);
        let out = run(&cli(&["describe", input.as_str()]), &CadenceConfig::default()).unwrap();
        assert_eq!(out, "week on Wed");
    }

    #[test]
    fn type_override_switches_active_fields() {
        let (_dir, input) = write_form(
            r#"{"recurrence_type":"weekly","days_of_week":[0],"day_of_month":15}"#,
        );
        let out = run(
            &cli(&["--type", "monthly", "describe", input.as_str()]),
            &CadenceConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "month on day 15");
    }

    #[test]
    fn normalize_applies_config_timezone_and_drops_stale_fields() {
        let (_dir, input) = write_form(
            r#"{"recurrence_type":"weekly","interval":2,"days_of_week":[0,4],"day_of_month":15}"#,
        );
        let mut config = CadenceConfig::default();
        config.editor.timezone = "Europe/Berlin".to_string();

        let out = run(&cli(&["normalize", input.as_str()]), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["timezone"], "Europe/Berlin");
        assert_eq!(value["days_of_week"], serde_json::json!([0, 4]));
        assert!(value.get("day_of_month").is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("absent.json").to_string_lossy().into_owned();
        let err = run(
            &cli(&["describe", input.as_str()]),
            &CadenceConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
