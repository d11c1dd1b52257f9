//! prefport CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use prefport_cli::commands::{run_export, run_import, run_inspect};
use prefport_cli::logging::{LogConfig, LogFormat, init_logging};
use prefport_cli::settings::load_settings;
use prefport_cli::summary::{print_export_summary, print_import_summary, print_inspect_summary};
use prefport_transfer::TransferError;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report_failure(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.stores.settings.as_deref());
    match &cli.command {
        Command::Export(args) => {
            let stores = settings
                .resolve_store_paths(cli.stores.preferences.clone(), cli.stores.prompts.clone())?;
            let include_secrets = args.include_secrets(settings.include_secrets_by_default);
            let report = run_export(&stores, &args.output, include_secrets)?;
            print_export_summary(&report, &args.output);
        }
        Command::Import(args) => {
            let stores = settings
                .resolve_store_paths(cli.stores.preferences.clone(), cli.stores.prompts.clone())?;
            let report = run_import(&stores, &args.input)?;
            print_import_summary(&report);
        }
        Command::Inspect(args) => {
            let document = run_inspect(&args.input)?;
            print_inspect_summary(&document);
        }
    }
    Ok(())
}

/// Transfer failures show one generic message per direction; the cause goes
/// to the log.
fn report_failure(error: &anyhow::Error) {
    tracing::debug!("command failed: {error:#}");
    match error.downcast_ref::<TransferError>() {
        Some(transfer) => {
            eprintln!("error: {}", transfer.user_message());
            if let Some(suggestion) = transfer.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
