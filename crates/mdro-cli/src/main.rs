//! MDRO surveillance CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mdro_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use mdro_cli::commands::{
    run_accuracy, run_alerts, run_class_two, run_correlate, run_level, run_organisms,
    run_preprocess, run_sentinel, run_specimens, run_susceptibility,
};
use mdro_cli::config::load_options;
use mdro_cli::logging::{LogConfig, LogFormat, init_logging};

mod summary;

use crate::summary::{
    print_accuracy, print_alerts, print_class_two, print_correlation, print_level,
    print_organisms, print_preprocess, print_sentinel, print_specimens, print_susceptibility,
};

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
    let options = load_options(cli.config.as_deref())?;
    match &cli.command {
        Command::Preprocess(args) => print_preprocess(&run_preprocess(args, &options)?),
        Command::Sentinel(args) => print_sentinel(&run_sentinel(args, &options)?),
        Command::ClassTwo(args) => print_class_two(&run_class_two(args, &options)?),
        Command::Organisms(args) => print_organisms(&run_organisms(args)?),
        Command::Specimens(args) => print_specimens(&run_specimens(args)?),
        Command::Susceptibility(args) => print_susceptibility(&run_susceptibility(args, &options)?),
        Command::Alerts(args) => print_alerts(&run_alerts(args)?),
        Command::Level(args) => print_level(&run_level(args)?),
        Command::Accuracy(args) => print_accuracy(&run_accuracy(args)?),
        Command::Correlate(args) => print_correlation(&run_correlate(args)?),
    }
    Ok(())
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
