//! ETL pipeline CLI.

use std::io::IsTerminal;

use clap::{ColorChoice, Parser};

use etl_cli::cli::{Cli, LogFormatArg};
use etl_cli::commands::{run, RunOutcome};
use etl_cli::logging::{init_logging, LogConfig, LogFormat};
use etl_cli::summary::print_outcome;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(outcome) => {
            print_outcome(&outcome, cli.preview_rows);
            match outcome {
                // "absent" is not an error, but there is nothing to show.
                RunOutcome::NoData => 1,
                _ => 0,
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        },
    }
}
