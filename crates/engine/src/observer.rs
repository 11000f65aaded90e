use std::fmt;

use dcomp_fs::FileRecord;
use log::{debug, info};

use crate::matcher::Stage;

/// Progress emitted while reconciling.
#[derive(Debug, Clone, Copy)]
pub enum ReconcileEvent<'a> {
    /// A record from the first set is about to be matched.
    Probe { record: &'a FileRecord },
    /// A matching tier narrowed the candidate pool.
    Narrowed { stage: Stage, remaining: usize },
    /// Mutual match: `discarded` is redundant with `kept`.
    Confirmed {
        kept: &'a FileRecord,
        discarded: &'a FileRecord,
    },
    /// No unambiguous match; `candidates` records were flagged for review.
    Ambiguous {
        record: &'a FileRecord,
        candidates: usize,
    },
    /// Same-name records with identical content in one tree.
    Duplicate {
        kept: &'a FileRecord,
        discarded: &'a FileRecord,
    },
    /// Same-name records with different content in one tree.
    Divergent {
        first: &'a FileRecord,
        second: &'a FileRecord,
        preference: i64,
    },
    Finished { merged: usize, to_delete: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Probe,
    Narrowed,
    Confirmed,
    Ambiguous,
    Duplicate,
    Divergent,
    Finished,
}

impl ReconcileEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            ReconcileEvent::Probe { .. } => EventKind::Probe,
            ReconcileEvent::Narrowed { .. } => EventKind::Narrowed,
            ReconcileEvent::Confirmed { .. } => EventKind::Confirmed,
            ReconcileEvent::Ambiguous { .. } => EventKind::Ambiguous,
            ReconcileEvent::Duplicate { .. } => EventKind::Duplicate,
            ReconcileEvent::Divergent { .. } => EventKind::Divergent,
            ReconcileEvent::Finished { .. } => EventKind::Finished,
        }
    }
}

impl fmt::Display for ReconcileEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileEvent::Probe { record } => write!(f, "probe {}", record.full_path()),
            ReconcileEvent::Narrowed { stage, remaining } => {
                write!(f, "{stage:?} tier left {remaining} candidate(s)")
            }
            ReconcileEvent::Confirmed { kept, discarded } => write!(
                f,
                "match {} <- {}",
                kept.full_path(),
                discarded.full_path()
            ),
            ReconcileEvent::Ambiguous { record, candidates } => write!(
                f,
                "decision needed for {} ({candidates} candidate(s))",
                record.full_path()
            ),
            ReconcileEvent::Duplicate { kept, discarded } => write!(
                f,
                "duplicate {} <- {}",
                kept.full_path(),
                discarded.full_path()
            ),
            ReconcileEvent::Divergent {
                first,
                second,
                preference,
            } => write!(
                f,
                "divergent {} vs {} ({preference:+})",
                first.full_path(),
                second.full_path()
            ),
            ReconcileEvent::Finished { merged, to_delete } => {
                write!(f, "finished: {merged} merged, {to_delete} to delete")
            }
        }
    }
}

/// Strategy trait receiving reconciliation progress.
pub trait ReconcileObserver {
    fn on_event(&mut self, event: ReconcileEvent<'_>);
}

/// Observer that drops every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ReconcileObserver for NoopObserver {
    #[inline]
    fn on_event(&mut self, _event: ReconcileEvent<'_>) {}
}

/// Observer forwarding events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ReconcileObserver for LogObserver {
    fn on_event(&mut self, event: ReconcileEvent<'_>) {
        match event.kind() {
            EventKind::Ambiguous | EventKind::Finished => info!("[reconcile] {event}"),
            _ => debug!("[reconcile] {event}"),
        }
    }
}

/// Observer keeping a rendered copy of every event.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Vec<(EventKind, String)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[(EventKind, String)] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl ReconcileObserver for RecordingObserver {
    fn on_event(&mut self, event: ReconcileEvent<'_>) {
        self.events.push((event.kind(), event.to_string()));
    }
}
