use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use serde_json::Value;

use tutor_availability::{
    availability::{compact, expand_with_report},
    session::{describe, SessionAvailability},
    storage::config::Config,
    ui::weekly_table::{calculate_layout, TableOptions},
};

pub const USAGE: &str = "Usage: tutor-availability <project|normalize|describe> [FILE]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Project(Option<PathBuf>),
    Normalize(Option<PathBuf>),
    Describe(Option<PathBuf>),
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I>(args: I) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    let Some(command) = args.next() else {
        return Err("Missing command".to_string());
    };
    let file = args.next().map(PathBuf::from);
    if let Some(extra) = args.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    match command.as_str() {
        "project" => Ok(CliMode::Project(file)),
        "normalize" => Ok(CliMode::Normalize(file)),
        "describe" => Ok(CliMode::Describe(file)),
        "--help" | "-h" | "help" => Ok(CliMode::Help),
        _ => Err(format!("Unknown command: {}", command)),
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

pub fn parse_session(input: &str) -> Result<SessionAvailability> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    match value {
        Value::Array(records) => Ok(SessionAvailability {
            available_times: Some(records),
        }),
        Value::Null => Ok(SessionAvailability::default()),
        other => serde_json::from_value(other).context("Input is not a tutoring session"),
    }
}

pub struct NormalizeOutput {
    pub json: String,
    pub warnings: Vec<String>,
}

pub fn project_text(session: &SessionAvailability, options: &TableOptions) -> String {
    calculate_layout(&session.projection(), options).render()
}

pub fn normalize_text(session: &SessionAvailability) -> Result<NormalizeOutput> {
    let expansion = expand_with_report(session.records());
    let warnings = expansion
        .skipped
        .iter()
        .map(|skipped| format!("warning: record {} skipped: {}", skipped.index, skipped.error))
        .collect();
    let json = serde_json::to_string_pretty(&compact(&expansion.grid))?;
    Ok(NormalizeOutput { json, warnings })
}

pub fn describe_text(session: &SessionAvailability) -> String {
    let lines = describe(&compact(&session.grid()));
    if lines.is_empty() {
        "No availability".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn run(mode: CliMode, config: &Config) -> Result<()> {
    match mode {
        CliMode::Help => println!("{}", USAGE),
        CliMode::Project(file) => {
            let session = parse_session(&read_input(file.as_ref())?)?;
            let options = TableOptions::from_config(&config.display)?;
            println!("{}", project_text(&session, &options));
        }
        CliMode::Normalize(file) => {
            let session = parse_session(&read_input(file.as_ref())?)?;
            let output = normalize_text(&session)?;
            for warning in &output.warnings {
                eprintln!("{}", warning);
            }
            println!("{}", output.json);
        }
        CliMode::Describe(file) => {
            let session = parse_session(&read_input(file.as_ref())?)?;
            println!("{}", describe_text(&session));
        }
    }
    Ok(())
}
