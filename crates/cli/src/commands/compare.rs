use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Args, ValueEnum};
use dcomp_engine::{LogObserver, TieBreak};
use dcomp_fs::Addressing;
use dcomp_session::compare_two_folders;
use log::error;

use crate::commands::CommonArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressingArg {
    /// Match files by name anywhere in the tree
    Name,
    /// Match files only at the same relative path
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Keep the smallest of an ambiguous group
    Smallest,
    /// Keep whichever copy --keep prefers
    Comparator,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Reference tree; its copies are kept when contents match
    pub a: PathBuf,

    /// Tree checked against the reference
    pub b: PathBuf,

    /// How entries are addressed when matching
    #[arg(long, value_enum, default_value_t = AddressingArg::Name)]
    pub addressing: AddressingArg,

    /// Survivor policy for ambiguous matches
    #[arg(long = "tie-break", value_enum, default_value_t = TieBreakArg::Smallest)]
    pub tie_break: TieBreakArg,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run(args: CompareArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[compare] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: CompareArgs) -> Result<ExitCode> {
    let addressing = match args.addressing {
        AddressingArg::Name => Addressing::NameOnly,
        AddressingArg::Path => Addressing::FullPath,
    };
    let tie_break = match args.tie_break {
        TieBreakArg::Smallest => TieBreak::SmallestSize,
        TieBreakArg::Comparator => TieBreak::Comparator,
    };

    let cfg = args.common.config(addressing, tie_break);
    let summary = compare_two_folders(&args.a, &args.b, &cfg, &mut LogObserver)?;

    args.common.make_printer("compare").print(&summary)?;
    Ok(ExitCode::SUCCESS)
}
