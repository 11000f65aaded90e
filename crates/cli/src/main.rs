use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::{Cli, Command};
use dcomp_runtime::logging;

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(args) => commands::compare::run(args),
        Command::Dedupe(args) => commands::dedupe::run(args),
    }
}
