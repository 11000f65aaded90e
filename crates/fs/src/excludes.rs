use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Gitignore-style patterns naming entries a walk should skip.
///
/// Patterns are stored unanchored and compiled per tree root, so one set
/// can be applied to both sides of a comparison.
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    patterns: Box<[String]>,
}

pub struct ExcludeMatcher {
    matcher: Gitignore,
}

impl ExcludePatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Compile the patterns against `root`.
    pub fn compile(&self, root: &Path) -> Result<ExcludeMatcher, ignore::Error> {
        let mut builder = GitignoreBuilder::new(root);
        for pat in &*self.patterns {
            builder.add_line(None, pat)?;
        }

        Ok(ExcludeMatcher {
            matcher: builder.build()?,
        })
    }
}

impl ExcludeMatcher {
    /// A matcher that excludes nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// `path` must live under the root the matcher was compiled for. Parents
    /// are not consulted: the walker never descends into excluded directories.
    #[inline]
    #[must_use]
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(path, is_dir).is_ignore()
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;
