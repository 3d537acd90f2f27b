//! Shikaka CLI entry point.
//!
//! Exit codes: 0 when every format was written, 1 on any failure.

use std::process::ExitCode;

use clap::Parser;
use shikaka_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> ExitCode {
    // `--replace.<KEY>` flags have dynamic names; take them out before clap
    let (args, replacements) = match cli::extract_replacements(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => {
            ui::error(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    let args = match cli::Cli::try_parse_from(cli::join_switch_values(args)) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported as errors by clap
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    match commands::build_execute(&args, &replacements).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if !args.quiet {
                eprintln!("{:?}", error::cli_error_to_miette(err));
            } else if !err.is_reported() {
                ui::error(&err.to_string());
            }
            ExitCode::FAILURE
        }
    }
}
