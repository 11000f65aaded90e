use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dcomp_engine::{
    KeepPolicy, ReconcileObserver, ReconcileOptions, reconcile, reconcile_within,
};
use dcomp_fs::{Addressing, FileRecord, NameOnly, WalkOptions, walk, walk_pair};
use dcomp_report::write_report_file;
use log::info;
use serde::Serialize;

/// Settings shared by both comparison modes.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Only consulted when comparing two folders; a single folder is
    /// always compared by name.
    pub addressing: Addressing,
    pub keep: KeepPolicy,
    pub reconcile: ReconcileOptions,
    pub walk: WalkOptions,
    pub report_path: PathBuf,
}

/// What a run did, for printing after the report is written.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    /// Records produced by the walk(s).
    pub walked: usize,
    /// Records in the report.
    pub merged: usize,
    /// Records found redundant; always `walked - merged`.
    pub to_delete: usize,
    /// Records flagged for a manual keep/delete call.
    pub decisions: usize,
    /// Records whose keep flag is false in the report.
    pub discarded: usize,
    pub report: PathBuf,
}

impl Summary {
    fn new(walked: usize, merged: &[FileRecord], to_delete: usize, report: &Path) -> Self {
        Self {
            walked,
            merged: merged.len(),
            to_delete,
            decisions: merged.iter().filter(|r| r.decision).count(),
            discarded: merged.iter().filter(|r| !r.keep).count(),
            report: report.to_path_buf(),
        }
    }
}

/// Walk `a` and `b`, reconcile them and write the report.
pub fn compare_two_folders<O>(
    a: &Path,
    b: &Path,
    cfg: &CompareConfig,
    observer: &mut O,
) -> Result<Summary>
where
    O: ReconcileObserver + ?Sized,
{
    let (set_a, set_b) = walk_pair(a, b, &cfg.addressing, &cfg.walk)
        .with_context(|| format!("Failed to walk {} and {}", a.display(), b.display()))?;

    let walked = set_a.len() + set_b.len();
    info!("[compare] walked {walked} entries");

    let out = reconcile(set_a, set_b, &cfg.keep, &cfg.reconcile, observer).with_context(|| {
        format!("Failed to reconcile {} against {}", a.display(), b.display())
    })?;

    write_report_file(&cfg.report_path, &out.merged)
        .with_context(|| format!("Failed to write report to {}", cfg.report_path.display()))?;

    Ok(Summary::new(
        walked,
        &out.merged,
        out.to_delete.len(),
        &cfg.report_path,
    ))
}

/// Walk `root` by name, reconcile same-named entries and write the report.
pub fn compare_within_folder<O>(root: &Path, cfg: &CompareConfig, observer: &mut O) -> Result<Summary>
where
    O: ReconcileObserver + ?Sized,
{
    let set = walk(root, &NameOnly, &cfg.walk)
        .with_context(|| format!("Failed to walk {}", root.display()))?;

    let walked = set.len();
    info!("[dedupe] walked {walked} entries");

    let merged = reconcile_within(set, &cfg.keep, observer)
        .with_context(|| format!("Failed to reconcile {}", root.display()))?;

    write_report_file(&cfg.report_path, &merged)
        .with_context(|| format!("Failed to write report to {}", cfg.report_path.display()))?;

    Ok(Summary::new(walked, &merged, 0, &cfg.report_path))
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
