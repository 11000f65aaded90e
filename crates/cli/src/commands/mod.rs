pub mod compare;
pub mod dedupe;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dcomp_engine::{KeepPolicy, ReconcileOptions, TieBreak};
use dcomp_fs::{Addressing, ExcludePatterns, WalkOptions};
use dcomp_runtime::default_report_path;
use dcomp_session::CompareConfig;

pub use compare::CompareArgs;
pub use dedupe::DedupeArgs;

use crate::printer::{HumanPrinter, JsonPrinter, SummaryPrinter};

#[derive(Parser, Debug)]
#[command(
    name = "dcomp",
    version,
    about = "Reconcile directory trees and decide which copies to keep",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Match the contents of two trees and mark redundant copies.
    ///
    /// Example:
    ///   dcomp compare /mnt/old-backup /home/me/photos
    ///   dcomp compare --addressing path --keep older a/ b/
    Compare(CompareArgs),

    /// Find same-named entries inside one tree.
    ///
    /// Example:
    ///   dcomp dedupe ~/Downloads -o downloads.csv
    Dedupe(DedupeArgs),
}

/// Which copy survives when same-named entries differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeepArg {
    Bigger,
    Older,
}

impl From<KeepArg> for KeepPolicy {
    fn from(arg: KeepArg) -> Self {
        match arg {
            KeepArg::Bigger => KeepPolicy::Bigger,
            KeepArg::Older => KeepPolicy::Older,
        }
    }
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Where to write the CSV report [default: ./comparison.csv]
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Copy to keep when same-named entries differ
    #[arg(long, value_enum, default_value_t = KeepArg::Bigger)]
    pub keep: KeepArg,

    /// Gitignore-style pattern to skip while walking (repeatable)
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommonArgs {
    pub fn config(&self, addressing: Addressing, tie_break: TieBreak) -> CompareConfig {
        CompareConfig {
            addressing,
            keep: self.keep.into(),
            reconcile: ReconcileOptions { tie_break },
            walk: WalkOptions {
                excludes: ExcludePatterns::new(self.excludes.iter().cloned()),
            },
            report_path: self.output.clone().unwrap_or_else(default_report_path),
        }
    }

    pub fn make_printer(&self, kind: &'static str) -> Box<dyn SummaryPrinter> {
        if self.json {
            Box::new(JsonPrinter::stdout(kind))
        } else {
            Box::new(HumanPrinter::stdout(kind))
        }
    }
}
