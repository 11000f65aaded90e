use std::path::Path;

/// Splits a walked entry into `(leaf, relative_path)` relative to the
/// tree root it was found under.
///
/// Whatever ends up in `leaf` is what the matcher compares by name, so
/// the split decides whether files can match across directories.
pub trait PathExtractor: Send + Sync {
    fn extract(&self, entry: &str, root: &str) -> (String, String);
}

/// Name-only addressing: files compare by base name wherever they live.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameOnly;

/// Full-path addressing: the whole path below the root is the match key,
/// so files only match at the same relative location.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullPath;

impl PathExtractor for NameOnly {
    fn extract(&self, entry: &str, root: &str) -> (String, String) {
        let leaf = Path::new(entry)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let below_root = entry.strip_prefix(root).unwrap_or(entry);
        let relative_path = below_root.strip_suffix(leaf).unwrap_or(below_root);

        (leaf.to_owned(), relative_path.to_owned())
    }
}

impl PathExtractor for FullPath {
    fn extract(&self, entry: &str, root: &str) -> (String, String) {
        let leaf = entry.strip_prefix(root).unwrap_or(entry);
        (leaf.to_owned(), String::new())
    }
}

impl<F> PathExtractor for F
where
    F: Fn(&str, &str) -> (String, String) + Send + Sync,
{
    fn extract(&self, entry: &str, root: &str) -> (String, String) {
        self(entry, root)
    }
}

/// Runtime choice between the built-in extractors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Addressing {
    #[default]
    NameOnly,
    FullPath,
}

impl PathExtractor for Addressing {
    fn extract(&self, entry: &str, root: &str) -> (String, String) {
        match self {
            Addressing::NameOnly => NameOnly.extract(entry, root),
            Addressing::FullPath => FullPath.extract(entry, root),
        }
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
