//! Tensile CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use tensile::TensileError;
use tensile_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    debug!(args:?; "Parsed arguments");

    if let Err(err) = tensile_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Installs `env_logger`, falling back to `warn` on an unknown level name
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Tensile");
}

/// Renders every diagnostic of `err` through miette and logs it
fn report(err: &TensileError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            error!("{err}");
            continue;
        }
        error!("{writer}");
    }
}
