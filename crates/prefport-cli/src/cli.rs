//! CLI argument definitions for prefport.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "prefport",
    version,
    about = "Export and import application preferences and prompts",
    long_about = "Export application preferences and prompts to a single JSON document, \
                  and restore them from one.\n\n\
                  Imports are all-or-nothing: a rejected document leaves the current \
                  configuration untouched."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub stores: StoreArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Locations of the settings file and the two stores.
#[derive(Args)]
pub struct StoreArgs {
    /// Settings file to use instead of the platform default.
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Preference store file (overrides the settings file).
    #[arg(long = "preferences", value_name = "PATH", global = true)]
    pub preferences: Option<PathBuf>,

    /// Prompt store file (overrides the settings file).
    #[arg(long = "prompts", value_name = "PATH", global = true)]
    pub prompts: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the current configuration to a document.
    Export(ExportArgs),

    /// Replace the current configuration with a document.
    Import(ImportArgs),

    /// Validate a document and summarize it without applying it.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Destination file for the exported document.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Include API keys and other credentials.
    #[arg(long = "include-secrets", conflicts_with = "exclude_secrets")]
    pub include_secrets: bool,

    /// Omit credentials even if the settings file includes them by default.
    #[arg(long = "exclude-secrets")]
    pub exclude_secrets: bool,
}

impl ExportArgs {
    /// Resolve the secrets choice against the configured default.
    pub fn include_secrets(&self, default: bool) -> bool {
        if self.include_secrets {
            true
        } else if self.exclude_secrets {
            false
        } else {
            default
        }
    }
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Document to import.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Document to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
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
    fn test_export_secret_flags() {
        let cli = Cli::parse_from(["prefport", "export", "out.json", "--exclude-secrets"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(!args.include_secrets(true));

        let cli = Cli::parse_from(["prefport", "export", "out.json"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(args.include_secrets(true));
        assert!(!args.include_secrets(false));
    }

    #[test]
    fn test_conflicting_secret_flags_rejected() {
        let result = Cli::try_parse_from([
            "prefport",
            "export",
            "out.json",
            "--include-secrets",
            "--exclude-secrets",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_store_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "prefport",
            "import",
            "in.json",
            "--preferences",
            "p.json",
            "--prompts",
            "q.json",
        ]);
        assert_eq!(cli.stores.preferences, Some(PathBuf::from("p.json")));
        assert_eq!(cli.stores.prompts, Some(PathBuf::from("q.json")));
    }
}
