//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Marshale CLI - convert untyped documents into declared record types
///
/// Record types are declared in a YAML or JSON document. Raw input is
/// converted field by field against those declarations, and failures are
/// reported with the path of the offending value.
#[derive(Parser, Debug)]
#[command(
    name = "marshale",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MARSHALE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human, or the configured format]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a raw document into a declared record type
    Convert(ConvertArgs),

    /// Load and validate record declarations, then list them
    Check(CheckArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Declaration file (YAML or JSON); falls back to `schema` in the config file
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Record type to convert the input into
    #[arg(short = 't', long = "type", value_name = "TYPE_ID")]
    pub type_id: String,

    /// Raw input file (JSON or YAML); reads JSON from stdin when omitted or `-`
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Declaration file (YAML or JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl ConvertArgs {
    /// Whether the raw input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Check(CheckArgs {
                schema: PathBuf::from("records.yaml"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "marshale",
            "-o",
            "json-pretty",
            "convert",
            "--schema",
            "s.yaml",
            "--type",
            "Foo",
            "in.json",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.schema, Some(PathBuf::from("s.yaml")));
                assert_eq!(args.type_id, "Foo");
                assert_eq!(args.input, Some(PathBuf::from("in.json")));
                assert!(!args.reads_stdin());
            }
            other => panic!("expected convert, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_reads_stdin() {
        let cli = Cli::parse_from(["marshale", "convert", "-t", "Foo", "-"]);
        match cli.command {
            Commands::Convert(args) => assert!(args.reads_stdin()),
            other => panic!("expected convert, got {:?}", other),
        }

        let cli = Cli::parse_from(["marshale", "convert", "-t", "Foo"]);
        match cli.command {
            Commands::Convert(args) => {
                assert!(args.reads_stdin());
                assert!(args.schema.is_none());
            }
            other => panic!("expected convert, got {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["marshale", "-q", "-v", "check", "s.yaml"]).is_err());
    }
}
