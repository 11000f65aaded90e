use dcomp_fs::{FileMode, FileRecord};
use hashbrown::HashMap;
use log::trace;

use crate::{
    comparator::KeepComparator,
    error::Result,
    matcher::Pool,
    observer::{ReconcileEvent, ReconcileObserver},
    reconcile::single_root,
};

/// Reconcile records of a single tree that share a leaf name.
///
/// Same-content pairs mark the later record as a plain duplicate.
/// Divergent pairs are flagged for review and the comparator's losing
/// side gives up its keep flag. Returns the set in its original order.
pub fn reconcile_within<C, O>(
    set: Vec<FileRecord>,
    comparator: &C,
    observer: &mut O,
) -> Result<Vec<FileRecord>>
where
    C: KeepComparator + ?Sized,
    O: ReconcileObserver + ?Sized,
{
    single_root(&set)?;
    let mut set = set;

    for group in same_name_groups(&set) {
        trace!("[within] {} records share one name", group.len());
        for (x, &i) in group.iter().enumerate() {
            for &j in &group[x + 1..] {
                compare_pair(&mut set, i, j, comparator, observer)?;
            }
        }
    }

    let duplicates = set.iter().filter(|r| !r.keep).count();
    observer.on_event(ReconcileEvent::Finished {
        merged: set.len(),
        to_delete: duplicates,
    });
    Ok(set)
}

/// Index groups of records sharing a leaf, in order of first appearance.
fn same_name_groups(set: &[FileRecord]) -> Vec<Pool> {
    let mut by_leaf: HashMap<&str, Pool> = HashMap::new();
    for (i, rec) in set.iter().enumerate() {
        by_leaf.entry(rec.leaf()).or_default().push(i);
    }

    let mut groups: Vec<Pool> = by_leaf.into_values().filter(|g| g.len() > 1).collect();
    groups.sort_unstable_by_key(|g| g[0]);
    groups
}

fn compare_pair<C, O>(
    set: &mut [FileRecord],
    i: usize,
    j: usize,
    comparator: &C,
    observer: &mut O,
) -> Result<()>
where
    C: KeepComparator + ?Sized,
    O: ReconcileObserver + ?Sized,
{
    let (first, second) = pair_mut(set, i, j);

    if same_content(first, second)? {
        second.decision = false;
        second.keep = false;
        observer.on_event(ReconcileEvent::Duplicate {
            kept: first,
            discarded: second,
        });
        return Ok(());
    }

    first.decision = true;
    second.decision = true;

    let preference = comparator.compare(first, second);
    if preference > 0 {
        second.keep = false;
    } else if preference < 0 {
        first.keep = false;
    }

    observer.on_event(ReconcileEvent::Divergent {
        first,
        second,
        preference,
    });
    Ok(())
}

/// Directories are equal by type alone and files also need equal size and
/// checksum. Checksums are only read once sizes agree. Other entries never
/// compare equal.
fn same_content(a: &mut FileRecord, b: &mut FileRecord) -> Result<bool> {
    if a.mode() != b.mode() {
        return Ok(false);
    }
    match a.mode() {
        FileMode::Directory => return Ok(true),
        FileMode::Other => return Ok(false),
        FileMode::File => {}
    }
    if a.size() != b.size() {
        return Ok(false);
    }

    Ok(a.checksum()? == b.checksum()?)
}

/// Two distinct mutable records, `i < j`.
fn pair_mut(set: &mut [FileRecord], i: usize, j: usize) -> (&mut FileRecord, &mut FileRecord) {
    debug_assert!(i < j);
    let (head, tail) = set.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
#[path = "within_tests.rs"]
mod tests;
