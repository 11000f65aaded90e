use dcomp_fs::{FileMode, FileRecord};

use crate::{
    comparator::KeepComparator,
    error::{Error, Result},
    matcher::{Pool, Semantics, cascade},
    observer::{ReconcileEvent, ReconcileObserver},
    options::{ReconcileOptions, TieBreak},
};

/// Output of a cross-tree run.
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Every record of the first set followed by the unmatched rest of the second.
    pub merged: Vec<FileRecord>,
    /// Second-set records found redundant with a first-set record.
    pub to_delete: Vec<FileRecord>,
}

impl Reconciliation {
    /// Records flagged for a manual keep/delete call.
    pub fn decisions(&self) -> usize {
        self.merged.iter().filter(|r| r.decision).count()
    }
}

/// Reconcile `set_a` against `set_b`.
///
/// Records of `set_a` are processed in order. Each one removes at most
/// one mutually confirmed counterpart from `set_b`; ambiguous
/// correspondences are flagged and left in place.
pub fn reconcile<C, O>(
    set_a: Vec<FileRecord>,
    set_b: Vec<FileRecord>,
    comparator: &C,
    options: &ReconcileOptions,
    observer: &mut O,
) -> Result<Reconciliation>
where
    C: KeepComparator + ?Sized,
    O: ReconcileObserver + ?Sized,
{
    let root_a = single_root(&set_a)?;
    let root_b = single_root(&set_b)?;
    if let (Some(a), Some(b)) = (root_a, root_b)
        && a == b
    {
        return Err(Error::usage(format!(
            "both record sets come from {a}; compare a tree with itself via reconcile_within"
        )));
    }

    let live_b = vec![true; set_b.len()];
    let mut run = Run {
        set_a,
        set_b,
        live_b,
        deleted: Vec::new(),
        comparator,
        options,
    };

    for i in 0..run.set_a.len() {
        observer.on_event(ReconcileEvent::Probe {
            record: &run.set_a[i],
        });
        if let Some(j) = run.match_one(i, observer)? {
            run.live_b[j] = false;
            run.deleted.push(j);
        }
    }

    let out = run.finish();
    observer.on_event(ReconcileEvent::Finished {
        merged: out.merged.len(),
        to_delete: out.to_delete.len(),
    });
    Ok(out)
}

/// Every record of one set must come from the same tree.
pub(crate) fn single_root(set: &[FileRecord]) -> Result<Option<&str>> {
    let Some(first) = set.first() else {
        return Ok(None);
    };

    let root = first.root();
    if let Some(other) = set.iter().find(|r| r.root() != root) {
        return Err(Error::usage(format!(
            "record set mixes roots {root} and {}",
            other.root()
        )));
    }

    Ok(Some(root))
}

struct Run<'c, C: ?Sized> {
    set_a: Vec<FileRecord>,
    set_b: Vec<FileRecord>,
    /// `false` once a record of `set_b` has been moved to the delete list.
    live_b: Vec<bool>,
    /// Removed `set_b` indices, in removal order.
    deleted: Vec<usize>,
    comparator: &'c C,
    options: &'c ReconcileOptions,
}

/// Which record survives an ambiguous group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Survivor {
    Probe,
    Candidate(usize),
}

impl<C> Run<'_, C>
where
    C: KeepComparator + ?Sized,
{
    fn live_b_indices(&self) -> Pool {
        self.live_b
            .iter()
            .enumerate()
            .filter_map(|(j, live)| live.then_some(j))
            .collect()
    }

    /// Find the mutual counterpart of `set_a[i]` in `set_b`, if any.
    fn match_one<O>(&mut self, i: usize, observer: &mut O) -> Result<Option<usize>>
    where
        O: ReconcileObserver + ?Sized,
    {
        let mode = self.set_a[i].mode();
        let live = self.live_b_indices();

        let forward = cascade(
            &mut self.set_a[i],
            &mut self.set_b,
            live,
            mode,
            Semantics::Closest,
            observer,
        )?;
        if forward.pool.is_empty() {
            return Ok(None);
        }

        let mut reverse_pool = Pool::new();
        for &j in &forward.pool {
            let all_a = 0..self.set_a.len();
            let reverse = cascade(
                &mut self.set_b[j],
                &mut self.set_a,
                all_a,
                mode,
                Semantics::Exact,
                observer,
            )?;

            // Other entries (symlinks, devices) are never confirmed automatically.
            let confirmed = match mode {
                FileMode::Directory => true,
                FileMode::File => reverse.pool.len() == 1,
                FileMode::Other => false,
            };
            if reverse.pool.contains(&i) && confirmed {
                self.set_a[i].decision = false;
                let m = &mut self.set_b[j];
                m.decision = false;
                m.keep = false;

                observer.on_event(ReconcileEvent::Confirmed {
                    kept: &self.set_a[i],
                    discarded: &self.set_b[j],
                });
                return Ok(Some(j));
            }

            for &k in &reverse.pool {
                if !reverse_pool.contains(&k) {
                    reverse_pool.push(k);
                }
            }
        }

        self.flag_ambiguous(i, &forward.pool, &reverse_pool);
        observer.on_event(ReconcileEvent::Ambiguous {
            record: &self.set_a[i],
            candidates: forward.pool.len(),
        });
        Ok(None)
    }

    /// Flag the probe, its candidates and the reverse candidates for review,
    /// then keep exactly one of the probe and its candidates.
    fn flag_ambiguous(&mut self, i: usize, candidates: &[usize], reverse: &[usize]) {
        self.set_a[i].decision = true;
        for &k in reverse {
            self.set_a[k].decision = true;
        }
        for &j in candidates {
            self.set_b[j].decision = true;
            self.set_b[j].keep = false;
        }

        match self.pick_survivor(i, candidates) {
            Survivor::Probe => self.set_a[i].keep = true,
            Survivor::Candidate(j) => {
                self.set_a[i].keep = false;
                self.set_b[j].keep = true;
            }
        }
    }

    fn pick_survivor(&self, i: usize, candidates: &[usize]) -> Survivor {
        let mut best = Survivor::Probe;
        let mut best_rec = &self.set_a[i];

        for &j in candidates {
            let rec = &self.set_b[j];
            let better = match self.options.tie_break {
                TieBreak::SmallestSize => rec.size() < best_rec.size(),
                TieBreak::Comparator => self.comparator.compare(rec, best_rec) > 0,
            };
            if better {
                best = Survivor::Candidate(j);
                best_rec = rec;
            }
        }

        best
    }

    fn finish(self) -> Reconciliation {
        let mut slots: Vec<Option<FileRecord>> = self.set_b.into_iter().map(Some).collect();
        let to_delete: Vec<FileRecord> = self
            .deleted
            .iter()
            .filter_map(|&j| slots[j].take())
            .collect();

        let mut merged = self.set_a;
        merged.extend(slots.into_iter().flatten());

        Reconciliation { merged, to_delete }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
