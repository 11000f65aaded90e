use std::{
    fs::{self, File},
    io::{self, Read},
    path::Path,
};

use crc32fast::Hasher;
use dcomp_runtime::CHECKSUM_SEED;

/// Checksum a regular file, reading it `chunk_size` bytes at a time.
///
/// The value depends only on the byte content, never on the chunk size.
/// Directories are rejected with `InvalidInput`.
pub fn checksum_file(path: &Path, chunk_size: usize) -> io::Result<u32> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cannot checksum directory {}", path.display()),
        ));
    }

    let file = File::open(path)?;
    checksum_reader(file, chunk_size)
}

/// Fold everything `reader` yields into a CRC-32 continued from the
/// fixed seed.
pub fn checksum_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<u32> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "checksum chunk size must be non-zero",
        ));
    }

    let mut buf = vec![0u8; chunk_size];
    let mut hasher = Hasher::new_with_initial(CHECKSUM_SEED);

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finalize())
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
