//! CLI argument definitions for `marc`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "marc",
    version,
    about = "Look up MARC 21 bibliographic field definitions",
    after_help = "Examples:\n  \
                  marc 020      Look up ISBN field\n  \
                  marc 245a     Look up title subfield\n  \
                  marc isbn     Search for ISBN-related fields\n  \
                  marc -v 245   Show detailed information for field 245"
)]
pub struct Cli {
    /// Field code (e.g., 020, 245a) or keyword to search for.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Show detailed field information (definition, indicators, examples).
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory containing marc.json and marc-verbose.json.
    #[arg(long = "data-dir", value_name = "DIR", env = "MARC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Control ANSI color output.
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorArg,

    /// Diagnostic log level.
    #[arg(long = "log-level", value_enum, default_value = "warn")]
    pub log_level: LogLevelArg,

    /// Diagnostic log format.
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,
}

/// CLI color choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_verbose_query() {
        let cli = Cli::try_parse_from(["marc", "-v", "245"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.query, "245");
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["marc"]).is_err());
    }
}
