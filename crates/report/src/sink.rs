use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use chrono::DateTime;
use dcomp_fs::{Checksum, FileRecord};
use serde::Serialize;
use tempfile::NamedTempFile;

/// Report columns, in output order.
pub const COLUMNS: [&str; 11] = [
    "root", "path", "leaf", "decision", "keep", "checksum", "size", "mtime", "mode", "ctime",
    "atime",
];

/// Rendered checksum for a record that was never checksummed.
const CHECKSUM_UNSET: &str = "";
const CHECKSUM_NOT_APPLICABLE: &str = "n/a";

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    root: &'a str,
    path: &'a str,
    leaf: &'a str,
    decision: bool,
    keep: bool,
    checksum: String,
    size: u64,
    mtime: String,
    mode: &'static str,
    ctime: String,
    atime: String,
}

impl<'a> From<&'a FileRecord> for ReportRow<'a> {
    fn from(rec: &'a FileRecord) -> Self {
        let times = rec.times();
        Self {
            root: rec.root(),
            path: rec.relative_path(),
            leaf: rec.leaf(),
            decision: rec.decision,
            keep: rec.keep,
            checksum: render_checksum(rec.cached_checksum()),
            size: rec.size(),
            mtime: render_time(times.mtime_secs),
            mode: rec.mode().as_str(),
            ctime: render_time(times.ctime_secs),
            atime: render_time(times.atime_secs),
        }
    }
}

fn render_checksum(checksum: Option<Checksum>) -> String {
    match checksum {
        None => CHECKSUM_UNSET.to_owned(),
        Some(Checksum::NotApplicable) => CHECKSUM_NOT_APPLICABLE.to_owned(),
        Some(Checksum::Value(v)) => v.to_string(),
    }
}

/// RFC 3339 in UTC; empty when the value is out of chrono's range.
fn render_time(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// Write one CSV row per record, header first (also when `records` is empty).
pub fn write_report<W: Write>(writer: W, records: &[FileRecord]) -> io::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for rec in records {
        csv_writer.serialize(ReportRow::from(rec))?;
    }

    csv_writer.flush()
}

/// Write the report to `path` through a temp file in the same directory,
/// so readers never observe a half-written report.
pub fn write_report_file(path: &Path, records: &[FileRecord]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;
    write_report(BufWriter::new(tmp.as_file()), records)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
