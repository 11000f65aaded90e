use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "dcomp";
pub const PROGRAM_LOG_LEVEL: &str = "DCOMP_LOG_LEVEL";

/// Report written to the working directory when no output path is given.
pub const REPORT_FILE_NAME: &str = "comparison.csv";

/// Bytes read per chunk while checksumming. Bounds memory per file.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Starting accumulator for the content checksum. Must stay non-zero and
/// fixed, otherwise reports from different runs stop being comparable.
pub const CHECKSUM_SEED: u32 = 1;

/// Default report path, relative to the current directory.
pub fn default_report_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(REPORT_FILE_NAME)
}
