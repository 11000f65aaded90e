use std::io;

use dcomp_fs::{FileMode, FileRecord};
use smallvec::SmallVec;

use crate::observer::{ReconcileEvent, ReconcileObserver};

/// Indices into the record set being searched.
pub type Pool = SmallVec<[usize; 4]>;

/**
States of the cascading matcher.

The four narrowing tiers run in order (`Name`, `Type`, `Size`,
`Content`); a search always ends in one of `Resolved`, `Ambiguous` or
`Unmatched`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Name,
    Type,
    Size,
    Content,
    Resolved,
    Ambiguous,
    Unmatched,
}

impl Stage {
    /// Position of a narrowing tier, `None` for terminal states.
    fn tier(self) -> Option<usize> {
        match self {
            Stage::Name => Some(0),
            Stage::Type => Some(1),
            Stage::Size => Some(2),
            Stage::Content => Some(3),
            Stage::Resolved | Stage::Ambiguous | Stage::Unmatched => None,
        }
    }

    fn next(self) -> Stage {
        match self {
            Stage::Name => Stage::Type,
            Stage::Type => Stage::Size,
            Stage::Size => Stage::Content,
            // Every tier exhausted without an early exit.
            _ => Stage::Ambiguous,
        }
    }
}

/// How eagerly a single surviving candidate is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantics {
    /// Accept as soon as one candidate is left.
    Closest,
    /// Keep narrowing through every tier; an empty tier means no match.
    Exact,
}

/// Outcome of a cascading search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    pub stage: Stage,
    pub pool: Pool,
}

impl Cascade {
    fn settle(pool: Pool) -> Self {
        let stage = match pool.len() {
            0 => Stage::Unmatched,
            1 => Stage::Resolved,
            _ => Stage::Ambiguous,
        };
        Cascade { stage, pool }
    }
}

/// Search `pool` for records corresponding to `probe`.
///
/// `live` lists the indices of `pool` still eligible. `mode` drives the
/// directory short-circuit: directories are matched by name and type
/// only. Checksums are computed only when the `Content` tier is reached.
pub fn cascade<O>(
    probe: &mut FileRecord,
    pool: &mut [FileRecord],
    live: impl IntoIterator<Item = usize>,
    mode: FileMode,
    semantics: Semantics,
    observer: &mut O,
) -> io::Result<Cascade>
where
    O: ReconcileObserver + ?Sized,
{
    let mut current: Pool = live.into_iter().collect();
    let mut stage = Stage::Name;

    while let Some(tier) = stage.tier() {
        let narrowed = narrow(stage, probe, pool, &current)?;
        let remaining = narrowed.len();
        observer.on_event(ReconcileEvent::Narrowed { stage, remaining });

        let accept_single = remaining == 1 && semantics == Semantics::Closest;
        let directory_done = mode == FileMode::Directory && tier >= 1;
        let early_miss = remaining == 0 && (tier < 2 || semantics == Semantics::Exact);

        if accept_single || directory_done || early_miss {
            return Ok(Cascade::settle(narrowed));
        }
        if remaining == 0 {
            // Content tiers found nothing: fall back to the last non-empty pool.
            break;
        }

        current = narrowed;
        stage = stage.next();
    }

    Ok(Cascade::settle(current))
}

fn narrow(
    stage: Stage,
    probe: &mut FileRecord,
    pool: &mut [FileRecord],
    current: &[usize],
) -> io::Result<Pool> {
    let mut out = Pool::new();

    match stage {
        Stage::Name => out.extend(
            current
                .iter()
                .copied()
                .filter(|&i| pool[i].leaf() == probe.leaf()),
        ),
        Stage::Type => out.extend(
            current
                .iter()
                .copied()
                .filter(|&i| pool[i].mode() == probe.mode()),
        ),
        Stage::Size => out.extend(
            current
                .iter()
                .copied()
                .filter(|&i| pool[i].size() == probe.size()),
        ),
        Stage::Content => {
            if current.is_empty() {
                return Ok(out);
            }
            let wanted = probe.checksum()?;
            for &i in current {
                if pool[i].checksum()? == wanted {
                    out.push(i);
                }
            }
        }
        Stage::Resolved | Stage::Ambiguous | Stage::Unmatched => {}
    }

    Ok(out)
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
