mod comparator;
mod error;
mod matcher;
mod observer;
mod options;
mod reconcile;
mod within;

#[cfg(test)]
mod testutil;

pub use comparator::{KeepComparator, KeepPolicy, PreferBigger, PreferOlder};
pub use error::{Error, Result};
pub use matcher::{Cascade, Pool, Semantics, Stage, cascade};
pub use observer::{
    EventKind, LogObserver, NoopObserver, ReconcileEvent, ReconcileObserver, RecordingObserver,
};
pub use options::{ReconcileOptions, TieBreak};
pub use reconcile::{Reconciliation, reconcile};
pub use within::reconcile_within;
