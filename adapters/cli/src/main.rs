#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Tilt 2048 in a terminal.
//!
//! Keys are read a line at a time from standard input; every key on the
//! line is applied in order before the board is redrawn.

mod app;
mod config;
mod keys;
mod render;

use std::io;

use anyhow::Result;
use clap::Parser;

use crate::{app::App, config::Args, config::CliConfig, render::TextBackend};

/// Entry point for the Tilt 2048 command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = CliConfig::resolve(&args)?;
    log::debug!("effective configuration: {config:?}");

    let mut app = App::new(&config);
    let mut backend = TextBackend::new(io::stdout().lock(), !args.no_color);
    app.run(io::stdin().lock(), &mut backend)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
