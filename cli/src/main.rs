// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Sweep CLI Entry Point
//!
//! 1.  **Runtime Initialization**: `#[tokio::main]` sets up the multi-threaded runtime
//!     the port scan workers run on.
//! 2.  **Global State Setup**: the `tracing` subscriber and the terminal output
//!     mode (verbosity, quiet level, banner).
//! 3.  **Command Dispatch**: routes to the matching module in `commands/`.
//! 4.  **Error Boundary**: any error bubbling out of a subcommand is logged here
//!     and turned into a non-zero `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use sweep_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, discover, scan},
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    spinner::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);

    if let Err(e) = Print::init(&cfg) {
        error!("{e}");
    }
    Print::banner();

    let result = match &commands.command {
        Commands::Discover(args) => discover::discover(args).await,
        Commands::Scan(args) => scan::scan(args).await,
    };

    let exit_code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
