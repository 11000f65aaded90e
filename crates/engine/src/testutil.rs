use dcomp_fs::{FileMode, FileRecord, Timestamps};

/// Regular file whose checksum is already known, so no disk read happens.
pub(crate) fn file(root: &str, leaf: &str, size: u64, checksum: u32) -> FileRecord {
    FileRecord::new(root, "/", leaf, FileMode::File, size, Timestamps::default())
        .with_checksum(checksum)
}

/// Regular file under a root that does not exist; checksumming it fails.
pub(crate) fn unread_file(root: &str, leaf: &str, size: u64) -> FileRecord {
    FileRecord::new(root, "/", leaf, FileMode::File, size, Timestamps::default())
}

pub(crate) fn dir(root: &str, leaf: &str) -> FileRecord {
    FileRecord::new(root, "/", leaf, FileMode::Directory, 0, Timestamps::default())
}

/// Symlink, socket or device node.
pub(crate) fn other(root: &str, leaf: &str) -> FileRecord {
    FileRecord::new(root, "/", leaf, FileMode::Other, 0, Timestamps::default())
}

pub(crate) fn file_at(root: &str, leaf: &str, size: u64, checksum: u32, mtime_secs: i64) -> FileRecord {
    let times = Timestamps {
        mtime_secs,
        ..Timestamps::default()
    };
    FileRecord::new(root, "/", leaf, FileMode::File, size, times).with_checksum(checksum)
}
