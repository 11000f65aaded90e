/// How the survivor is picked among a record and its ambiguous candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Smallest size wins; equal sizes go to the earliest record, which
    /// is the probe itself.
    #[default]
    SmallestSize,
    /// The record the keep-comparator prefers over all others wins.
    Comparator,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    pub tie_break: TieBreak,
}
