use dcomp_fs::FileRecord;

/// Orders two records of conflicting content to decide which copy stays.
///
/// Positive means `a` is preferred and `b` loses its keep flag, negative
/// the opposite, zero leaves both flags alone. Implementations must be
/// pure and total.
///
/// Time-based closures written as `mtime(a) - mtime(b)` invert the intent
/// under this convention; negate the delta to keep the older copy.
pub trait KeepComparator {
    fn compare(&self, a: &FileRecord, b: &FileRecord) -> i64;
}

/// Keep the larger copy: `size(a) - size(b)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferBigger;

/// Keep the copy modified earlier: `mtime(b) - mtime(a)` in seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferOlder;

impl KeepComparator for PreferBigger {
    fn compare(&self, a: &FileRecord, b: &FileRecord) -> i64 {
        (a.size() as i64).saturating_sub(b.size() as i64)
    }
}

impl KeepComparator for PreferOlder {
    fn compare(&self, a: &FileRecord, b: &FileRecord) -> i64 {
        b.times().mtime_secs.saturating_sub(a.times().mtime_secs)
    }
}

impl<F> KeepComparator for F
where
    F: Fn(&FileRecord, &FileRecord) -> i64,
{
    fn compare(&self, a: &FileRecord, b: &FileRecord) -> i64 {
        self(a, b)
    }
}

/// Runtime choice between the built-in comparators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeepPolicy {
    #[default]
    Bigger,
    Older,
}

impl KeepComparator for KeepPolicy {
    fn compare(&self, a: &FileRecord, b: &FileRecord) -> i64 {
        match self {
            KeepPolicy::Bigger => PreferBigger.compare(a, b),
            KeepPolicy::Older => PreferOlder.compare(a, b),
        }
    }
}

#[cfg(test)]
#[path = "comparator_tests.rs"]
mod tests;
