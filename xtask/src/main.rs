//! # pulse-build
//!
//! Packages the Pulse Node project into a native binary and a distribution
//! for the host platform.
//!
//! ## Usage
//!
//! ```bash
//! pulse-build                 # npm install, pkg, npm run dist-<os>
//! pulse-build plan --json     # show what would run
//! pulse-build env bash        # export the build identity
//! pulse-build doctor          # check package.json, npm and pkg
//! ```
//!
//! The build identity comes from `PULSE_BUILD_NUMBER` / `PULSE_BUILD_REVISION`;
//! both default to `0` when the build number is absent.

use clap::Parser;

mod app;
mod cli;
mod dispatch;
mod error;
mod identity;
mod logging;
mod plan;
mod platform;
mod runner;
mod tasks;
mod util;

fn main() {
    let cli = crate::cli::Cli::parse();
    crate::logging::init();

    if let Err(e) = crate::app::run(cli) {
        log::error!("{e:#}");
        std::process::exit(crate::error::exit_code_for(&e));
    }
}
