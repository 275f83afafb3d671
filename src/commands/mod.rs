//! Command implementations for quay.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod init;
mod run;

use crate::cli::Command;
use quay::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Init(args) => init::cmd_init(args),
        Command::Check(args) => check::cmd_check(args),
    }
}
