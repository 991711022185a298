//! `marc`: look up MARC 21 field definitions by code or keyword.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use marc_lookup::logging::{init_logging, LogConfig, LogFormat};
use marc_lookup::{DisplayMode, Formatter, LookupConfig, LookupError, MarcLookup};
use tracing::Level;

mod cli;

use crate::cli::{Cli, ColorArg, LogFormatArg, LogLevelArg};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let formatter = Formatter::new(color_enabled(cli.color));

    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error, &formatter);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli, formatter: &Formatter) -> anyhow::Result<()> {
    let mode = if cli.verbose {
        DisplayMode::Verbose
    } else {
        DisplayMode::Brief
    };
    let config = LookupConfig::resolve(cli.data_dir.as_deref());
    let lookup = MarcLookup::open(&config, mode).context("failed to load MARC dataset")?;

    let outcome = lookup.lookup(&cli.query, mode);
    tracing::debug!(
        query = %cli.query,
        kind = %outcome.kind,
        matches = outcome.matches.len(),
        "lookup complete"
    );
    for block in outcome.render(formatter) {
        println!("{block}");
    }
    Ok(())
}

fn report(error: &anyhow::Error, formatter: &Formatter) {
    match error.downcast_ref::<LookupError>() {
        Some(lookup_error) => {
            eprintln!("{}", formatter.error(&format!("Error: {lookup_error}")));
            if let Some(hint) = lookup_error.hint() {
                eprintln!("{}", formatter.notice(hint));
            }
        },
        None => eprintln!("{}", formatter.error(&format!("Error: {error:#}"))),
    }
}

/// Resolve the color choice and apply it to `colored`'s global switch.
fn color_enabled(choice: ColorArg) -> bool {
    let enabled = match choice {
        ColorArg::Always => true,
        ColorArg::Never => false,
        ColorArg::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
    enabled
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        LogLevelArg::Error => Level::ERROR,
        LogLevelArg::Warn => Level::WARN,
        LogLevelArg::Info => Level::INFO,
        LogLevelArg::Debug => Level::DEBUG,
        LogLevelArg::Trace => Level::TRACE,
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color {
        ColorArg::Always => true,
        ColorArg::Never => false,
        ColorArg::Auto => io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_ansi(with_ansi)
}
