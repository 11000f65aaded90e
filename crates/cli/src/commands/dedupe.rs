use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use dcomp_engine::{LogObserver, TieBreak};
use dcomp_fs::Addressing;
use dcomp_session::compare_within_folder;
use log::error;

use crate::commands::CommonArgs;

#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// Tree to scan for same-named entries
    pub root: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run(args: DedupeArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[dedupe] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: DedupeArgs) -> Result<ExitCode> {
    // Within one tree entries are always compared by name.
    let cfg = args
        .common
        .config(Addressing::NameOnly, TieBreak::default());
    let summary = compare_within_folder(&args.root, &cfg, &mut LogObserver)?;

    args.common.make_printer("dedupe").print(&summary)?;
    Ok(ExitCode::SUCCESS)
}
