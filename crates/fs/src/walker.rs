use std::{
    fs::{self, FileType, Metadata, read_dir},
    io::{self, Result},
    path::Path,
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{debug, trace};

use crate::{
    excludes::{ExcludeMatcher, ExcludePatterns},
    extract::PathExtractor,
    record::{FileMode, FileRecord, Timestamps},
};

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub excludes: ExcludePatterns,
}

struct WalkCtx<'a, E: ?Sized> {
    /// Root without trailing separators; every record is reported against it.
    root: &'a str,
    extractor: &'a E,
    excludes: ExcludeMatcher,
}

/// Depth-first walk of `root`, one record per entry.
///
/// Directories are emitted after their children and entries within a
/// directory are visited in name order. Symlinks and special files are
/// recorded but never followed. Any I/O error aborts the walk.
pub fn walk<E>(root: &Path, extractor: &E, options: &WalkOptions) -> Result<Vec<FileRecord>>
where
    E: PathExtractor + ?Sized,
{
    let meta = fs::metadata(root).map_err(|e| with_path(e, root))?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", root.display()),
        ));
    }

    let root_str = trim_root(path_str(root)?);
    let root = Path::new(root_str);
    let excludes = if options.excludes.is_empty() {
        ExcludeMatcher::empty()
    } else {
        options
            .excludes
            .compile(root)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
    };

    let ctx = WalkCtx {
        root: root_str,
        extractor,
        excludes,
    };

    let mut records = Vec::new();
    walk_dir(root, &ctx, &mut records)?;

    debug!("[walk] {} entries under {}", records.len(), root_str);
    Ok(records)
}

/// Walk two independent trees concurrently, one thread each.
pub fn walk_pair<E>(
    a: &Path,
    b: &Path,
    extractor: &E,
    options: &WalkOptions,
) -> Result<(Vec<FileRecord>, Vec<FileRecord>)>
where
    E: PathExtractor + ?Sized,
{
    thread::scope(|s| {
        let left = s.spawn(|| walk(a, extractor, options));
        let right = walk(b, extractor, options);

        let left = left
            .join()
            .map_err(|_| io::Error::other("tree walker thread panicked"))?;

        Ok((left?, right?))
    })
}

fn walk_dir<E>(dir: &Path, ctx: &WalkCtx<'_, E>, out: &mut Vec<FileRecord>) -> Result<()>
where
    E: PathExtractor + ?Sized,
{
    let mut entries = read_dir(dir)
        .map_err(|e| with_path(e, dir))?
        .collect::<Result<Vec<_>>>()
        .map_err(|e| with_path(e, dir))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        // DirEntry::metadata does not follow symlinks.
        let metadata = entry.metadata().map_err(|e| with_path(e, &path))?;
        let mode = classify(&metadata.file_type());

        if ctx
            .excludes
            .is_excluded(&path, mode == FileMode::Directory)
        {
            trace!("[walk] excluded {}", path.display());
            continue;
        }

        if mode == FileMode::Directory {
            walk_dir(&path, ctx, out)?;
        }

        out.push(inspect_entry(&path, &metadata, mode, ctx)?);
    }

    Ok(())
}

fn inspect_entry<E>(
    path: &Path,
    metadata: &Metadata,
    mode: FileMode,
    ctx: &WalkCtx<'_, E>,
) -> Result<FileRecord>
where
    E: PathExtractor + ?Sized,
{
    let (leaf, relative_path) = ctx.extractor.extract(path_str(path)?, ctx.root);

    let times = Timestamps {
        mtime_secs: to_unix_secs(metadata.modified().ok()),
        ctime_secs: change_time(metadata),
        atime_secs: to_unix_secs(metadata.accessed().ok()),
    };

    Ok(FileRecord::new(
        ctx.root,
        relative_path,
        leaf,
        mode,
        metadata.len(),
        times,
    ))
}

fn classify(file_type: &FileType) -> FileMode {
    if file_type.is_file() {
        FileMode::File
    } else if file_type.is_dir() {
        FileMode::Directory
    } else {
        FileMode::Other
    }
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> i64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ctime()
}

#[cfg(not(unix))]
fn change_time(metadata: &Metadata) -> i64 {
    to_unix_secs(metadata.created().ok())
}

/// Seconds relative to the epoch; unavailable timestamps become 0.
fn to_unix_secs(t: Option<SystemTime>) -> i64 {
    match t.map(|tt| tt.duration_since(UNIX_EPOCH)) {
        Some(Ok(d)) => d.as_secs() as i64,
        Some(Err(before)) => -(before.duration().as_secs() as i64),
        None => 0,
    }
}

/// Records store their location as text, so non UTF-8 names are fatal
/// rather than silently dropped from the comparison.
fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("path is not valid UTF-8: {}", path.display()),
        )
    })
}

/// `a/` and `a` name the same tree; only `/` itself keeps its separator.
fn trim_root(root: &str) -> &str {
    let trimmed = root.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    if trimmed.is_empty() && !root.is_empty() {
        &root[..1]
    } else {
        trimmed
    }
}

fn with_path(err: io::Error, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {err}", path.display()))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
