use std::{fmt, io, path::PathBuf};

use dcomp_runtime::DEFAULT_CHUNK_SIZE;
use log::debug;

use crate::checksum::checksum_file;

/// Filesystem entry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    File,
    Directory,
    /// Symlinks, devices, sockets, fifos.
    Other,
}

impl FileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::File => "FILE",
            FileMode::Directory => "DIR",
            FileMode::Other => "UNK",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checksumming a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checksum {
    Value(u32),
    /// Directories and other non-regular entries carry no content checksum.
    NotApplicable,
}

/// Timestamps snapshotted at walk time, as Unix epoch seconds.
///
/// Negative values are before the epoch; `0` also stands in for
/// timestamps the platform could not report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub mtime_secs: i64,
    pub ctime_secs: i64,
    pub atime_secs: i64,
}

/// One filesystem entry found by a walk.
///
/// Location, mode, size and timestamps are fixed at creation. Only the
/// memoized checksum and the `decision`/`keep` flags change afterwards.
#[derive(Debug)]
pub struct FileRecord {
    root: String,
    relative_path: String,
    leaf: String,
    mode: FileMode,
    size: u64,
    times: Timestamps,
    /// `None` until first requested, then never recomputed.
    checksum: Option<Checksum>,
    /// Record took part in a comparison that needs a keep/delete call.
    pub decision: bool,
    /// This copy should be retained.
    pub keep: bool,
}

impl FileRecord {
    pub fn new(
        root: impl Into<String>,
        relative_path: impl Into<String>,
        leaf: impl Into<String>,
        mode: FileMode,
        size: u64,
        times: Timestamps,
    ) -> Self {
        let size = match mode {
            FileMode::File => size,
            FileMode::Directory | FileMode::Other => 0,
        };

        Self {
            root: root.into(),
            relative_path: relative_path.into(),
            leaf: leaf.into(),
            mode,
            size,
            times,
            checksum: None,
            decision: false,
            keep: true,
        }
    }

    /// Seed the checksum with a value known ahead of time, e.g. from a
    /// previous listing. Ignored for directories and other entries.
    pub fn with_checksum(mut self, value: u32) -> Self {
        if self.mode == FileMode::File {
            self.checksum = Some(Checksum::Value(value));
        }
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn times(&self) -> Timestamps {
        self.times
    }

    /// Absolute location: `root + relative_path + leaf`.
    pub fn full_path(&self) -> String {
        let mut s =
            String::with_capacity(self.root.len() + self.relative_path.len() + self.leaf.len());
        s.push_str(&self.root);
        s.push_str(&self.relative_path);
        s.push_str(&self.leaf);
        s
    }

    pub fn full_path_buf(&self) -> PathBuf {
        PathBuf::from(self.full_path())
    }

    /// The checksum if it has already been computed.
    pub fn cached_checksum(&self) -> Option<Checksum> {
        self.checksum
    }

    /// Lazily computed checksum. Reads the file at most once per record.
    pub fn checksum(&mut self) -> io::Result<Checksum> {
        self.checksum_with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn checksum_with_chunk_size(&mut self, chunk_size: usize) -> io::Result<Checksum> {
        if let Some(checksum) = self.checksum {
            return Ok(checksum);
        }

        let checksum = match self.mode {
            FileMode::File => {
                let path = self.full_path_buf();
                debug!("[checksum] computing for {}", path.display());
                let value = checksum_file(&path, chunk_size)?;
                Checksum::Value(value)
            }
            FileMode::Directory | FileMode::Other => Checksum::NotApplicable,
        };

        self.checksum = Some(checksum);
        Ok(checksum)
    }

    /// Content checksum of a regular file. Asking for the content of a
    /// directory or other entry is a usage error.
    pub fn content_checksum(&mut self) -> io::Result<u32> {
        match self.checksum()? {
            Checksum::Value(value) => Ok(value),
            Checksum::NotApplicable => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} is a {} entry and has no content checksum",
                    self.full_path(),
                    self.mode
                ),
            )),
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
