//! Bulwark CLI - runs callables through the boundary adapter and reports what crosses it.
//!
//! ```text
//! bulwark probe [--json]          run every built-in scenario, one line each
//! bulwark divide <a> <b>          wrapped integer division
//! ```
//!
//! `divide` exits with the failure's errno, so shell callers see the same
//! code a C caller would.

mod scenarios;

use anyhow::{Context, Result, bail};
use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bulwark_config::{BoundaryConfig, BulwarkConfig};
use bulwark_core::{BoundaryAdapter, apply_process_settings};

const USAGE: &str = "Usage: bulwark probe [--json]\n       bulwark divide <dividend> <divisor>";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the report; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_boundary_config() -> BoundaryConfig {
    match BulwarkConfig::load() {
        Ok(Some(config)) => config.boundary(),
        Ok(None) => BoundaryConfig::default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring unusable config: {err:#}");
            BoundaryConfig::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Probe { json: bool },
    Divide { dividend: i64, divisor: i64 },
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [command] if command == "probe" => Ok(Command::Probe { json: false }),
        [command, flag] if command == "probe" && flag == "--json" => {
            Ok(Command::Probe { json: true })
        }
        [command, dividend, divisor] if command == "divide" => Ok(Command::Divide {
            dividend: dividend
                .parse()
                .with_context(|| format!("invalid dividend {dividend:?}"))?,
            divisor: divisor
                .parse()
                .with_context(|| format!("invalid divisor {divisor:?}"))?,
        }),
        _ => bail!("unrecognized arguments: {}", args.join(" ")),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err:#}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = load_boundary_config();
    apply_process_settings(&config);
    let mut adapter = BoundaryAdapter::from_config(&config);

    match run(command, &mut adapter) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, adapter: &mut BoundaryAdapter) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Probe { json } => {
            let outcomes = scenarios::run_all(adapter);
            if json {
                for outcome in &outcomes {
                    serde_json::to_writer(&mut out, outcome).context("failed to encode outcome")?;
                    writeln!(out)?;
                }
            } else {
                writeln!(out, "{}", scenarios::render_report(&outcomes))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Divide { dividend, divisor } => {
            let quotient = adapter.invoke(|| scenarios::divide(dividend, divisor));
            if let Some(message) = adapter.last_error_message() {
                eprintln!("{message}");
                let errno = adapter.last_errno().unwrap_or(1);
                return Ok(ExitCode::from(u8::try_from(errno).unwrap_or(1)));
            }
            writeln!(out, "{quotient}")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
