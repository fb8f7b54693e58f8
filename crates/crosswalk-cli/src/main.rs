//! Terminology crosswalk CLI.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use crosswalk_cli::logging::{LogConfig, LogFormat, init_logging};
use crosswalk_cli::settings::{resolve_options, resolve_search};
use crosswalk_core::TerminologyEngine;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{Session, run_automap, run_predict, run_search, run_stats, run_suggest};

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
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let options = resolve_options(cli.config.as_deref(), cli.resources_dir.as_ref())?;
    let search = resolve_search(cli.catalog.as_deref())?;
    let open = || Session::open(options.clone(), Arc::clone(&search), cli.json);
    match &cli.command {
        Command::Stats => run_stats(&open()?),
        Command::Predict(args) => run_predict(&open()?, args),
        Command::Search(args) => run_search(&open()?, args),
        Command::Automap(args) => run_automap(&open()?, args),
        Command::Suggest(args) => {
            let engine = TerminologyEngine::new(options.clone(), Arc::clone(&search));
            run_suggest(&engine, args, cli.json)
        }
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
    config.with_timestamps = cli.log_timestamps;
    config.with_target = cli.log_target;
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
