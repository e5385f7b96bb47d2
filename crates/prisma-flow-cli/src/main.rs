//! `prisma-flow` command-line entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use prisma_flow::PrismaError;
use prisma_flow_cli::{Args, error_adapter::to_reportables};

fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

fn report(err: &PrismaError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &reportable) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{reportable}"),
        }
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    info!(version = env!("CARGO_PKG_VERSION"); "Starting prisma-flow");

    if let Err(err) = prisma_flow_cli::run(&args) {
        report(&err);
        process::exit(1);
    }
}
