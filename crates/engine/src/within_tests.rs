use super::*;
use crate::comparator::{PreferBigger, PreferOlder};
use crate::error::Error;
use crate::observer::{EventKind, NoopObserver, RecordingObserver};
use crate::testutil::{dir, file, file_at, other, unread_file};

const R: &str = "/nonexistent/r";

fn run<C: KeepComparator>(set: Vec<FileRecord>, comparator: &C) -> Vec<FileRecord> {
    reconcile_within(set, comparator, &mut NoopObserver).expect("reconcile_within")
}

#[test]
fn divergent_pair_keeps_bigger_copy() {
    let out = run(
        vec![file(R, "x.txt", 10, 1), file(R, "x.txt", 20, 2)],
        &PreferBigger,
    );

    assert!(!out[0].keep, "size-10 copy should be discarded");
    assert!(out[1].keep);
    assert!(out[0].decision && out[1].decision);
}

#[test]
fn divergent_pair_respects_argument_order() {
    let out = run(
        vec![file(R, "x.txt", 20, 1), file(R, "x.txt", 10, 2)],
        &PreferBigger,
    );

    assert!(out[0].keep);
    assert!(!out[1].keep);
}

#[test]
fn divergent_pair_keeps_older_copy() {
    let out = run(
        vec![file_at(R, "x.txt", 10, 1, 500), file_at(R, "x.txt", 10, 2, 100)],
        &PreferOlder,
    );

    assert!(!out[0].keep);
    assert!(out[1].keep);
}

#[test]
fn draw_leaves_keep_flags_alone() {
    let out = run(
        vec![file(R, "x.txt", 10, 1), file(R, "x.txt", 10, 2)],
        &PreferBigger,
    );

    assert!(out.iter().all(|r| r.keep && r.decision));
}

#[test]
fn identical_copies_mark_later_one_as_duplicate() {
    let out = run(
        vec![
            file(R, "x.txt", 10, 7),
            file(R, "x.txt", 10, 7),
            file(R, "x.txt", 10, 7),
        ],
        &PreferBigger,
    );

    assert!(out[0].keep);
    assert!(!out[1].keep && !out[2].keep);
    assert!(out.iter().all(|r| !r.decision));
}

#[test]
fn same_named_directories_are_duplicates() {
    let out = run(vec![dir(R, "docs"), dir(R, "docs")], &PreferBigger);

    assert!(out[0].keep);
    assert!(!out[1].keep);
}

#[test]
fn file_and_directory_with_same_name_diverge() {
    let out = run(vec![dir(R, "x"), file(R, "x", 4, 1)], &PreferBigger);

    assert!(out.iter().all(|r| r.decision));
    assert!(!out[0].keep, "empty directory loses to the larger file");
    assert!(out[1].keep);
}

#[test]
fn unique_names_are_untouched_and_order_is_kept() {
    let out = run(
        vec![unread_file(R, "a", 1), unread_file(R, "b", 1), unread_file(R, "c", 1)],
        &PreferBigger,
    );

    let leaves: Vec<&str> = out.iter().map(|r| r.leaf()).collect();
    assert_eq!(leaves, vec!["a", "b", "c"]);
    assert!(out.iter().all(|r| r.keep && !r.decision));
    assert!(out.iter().all(|r| r.cached_checksum().is_none()));
}

#[test]
fn different_sizes_skip_checksums() {
    let out = run(
        vec![unread_file(R, "x", 1), unread_file(R, "x", 2)],
        &PreferBigger,
    );

    assert!(out.iter().all(|r| r.cached_checksum().is_none()));
    assert!(!out[0].keep);
}

#[test]
fn checksum_failures_abort() {
    let err = reconcile_within(
        vec![unread_file(R, "x", 1), unread_file(R, "x", 1)],
        &PreferBigger,
        &mut NoopObserver,
    )
    .expect_err("unreadable content");

    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn mixed_roots_are_rejected() {
    let err = reconcile_within(
        vec![file(R, "x", 1, 1), file("/other", "x", 1, 1)],
        &PreferBigger,
        &mut NoopObserver,
    )
    .expect_err("mixed roots");

    assert!(matches!(err, Error::Usage(_)));
}

#[test]
fn observer_sees_duplicates_and_divergence() {
    let mut observer = RecordingObserver::new();
    reconcile_within(
        vec![
            file(R, "same", 3, 1),
            file(R, "same", 3, 1),
            file(R, "diff", 3, 1),
            file(R, "diff", 4, 2),
        ],
        &PreferBigger,
        &mut observer,
    )
    .expect("reconcile_within");

    assert_eq!(observer.count(EventKind::Duplicate), 1);
    assert_eq!(observer.count(EventKind::Divergent), 1);
    assert_eq!(observer.count(EventKind::Finished), 1);

    let kinds: Vec<EventKind> = observer.events().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Duplicate, EventKind::Divergent, EventKind::Finished]
    );
}

#[test]
fn same_named_other_entries_diverge() {
    let out = run(vec![other(R, "link"), other(R, "link")], &PreferBigger);

    assert!(out.iter().all(|r| r.decision));
    assert!(out.iter().all(|r| r.keep), "equal sizes leave both copies");
}
