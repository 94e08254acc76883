// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! cleanscript - compiles Cleanscript (.csc) files to JavaScript
//!
//! This is the main entry point for the cleanscript CLI.
//!
//! ## Features
//!
//! - Single files or whole directories, compiled in parallel with rayon
//! - Optional minify/prettify through external tools
//! - Watch mode that recompiles sources as they change

mod cli;
mod config;
mod discover;
mod driver;
mod error;
mod postprocess;
mod watch;

use clap::Parser;
use owo_colors::OwoColorize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;
use driver::Driver;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Compile(args) => {
            let driver = Driver::from_args(config, args);
            let summary = driver.build(&args.target)?;

            if !args.stdout {
                print_summary(summary.compiled, summary.failed);
            }
            Ok(if summary.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Watch(args) => {
            let driver = Driver::from_args(config, args);
            watch::watch(&driver, &args.target)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "cleanscript=debug,cleanscript_compiler=debug"
    } else {
        "cleanscript=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_summary(compiled: usize, failed: usize) {
    if failed == 0 {
        println!(
            "{} {} file(s)",
            "Compiled".green().bold(),
            compiled.to_string().yellow()
        );
    } else {
        eprintln!(
            "{} {} file(s) compiled, {} failed",
            "Error".red().bold(),
            compiled.to_string().yellow(),
            failed.to_string().red()
        );
    }
}
