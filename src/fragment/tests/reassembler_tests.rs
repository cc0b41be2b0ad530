//! Tests for inbound reassembly ordering, deduplication, and timeouts.

use std::time::{Duration, Instant};

use crate::fragment::{
    Anomaly,
    Fragment,
    FragmentCount,
    FragmentHeader,
    FragmentIndex,
    IngestResult,
    PageId,
    Reassembler,
    TimeoutStatus,
};

fn page(id: &str) -> PageId { PageId::new(id).expect("valid page id") }

fn fragment(page_id: &str, index: u32, total: u32, payload: &str) -> Fragment {
    Fragment::new(
        FragmentHeader::new(
            page(page_id),
            FragmentIndex::new(index).expect("non-zero index"),
            FragmentCount::new(total).expect("non-zero total"),
        ),
        payload.to_owned(),
    )
}

fn count(value: u32) -> FragmentCount { FragmentCount::new(value).expect("non-zero total") }

fn reassembler() -> Reassembler { Reassembler::new(Duration::from_secs(10)) }

fn progress(stored: u32, expected: u32) -> IngestResult {
    IngestResult::Progress {
        stored,
        expected: count(expected),
    }
}

#[test]
fn single_fragment_page_completes_immediately() {
    let mut reassembler = reassembler();
    assert_eq!(
        reassembler.ingest(fragment("p1", 1, 1, "hello")),
        IngestResult::Complete("hello".to_owned())
    );
    assert_eq!(reassembler.buffered_len(), 0);
}

#[test]
fn out_of_order_arrival_completes() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 3, 3, "cc")), progress(1, 3));
    assert_eq!(reassembler.ingest(fragment("p1", 1, 3, "aa")), progress(2, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 2, 3, "bb")),
        IngestResult::Complete("aabbcc".to_owned())
    );
    assert_eq!(reassembler.buffered_len(), 0);
}

#[test]
fn duplicate_identical_fragment_is_idempotent() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 1, 3, "ab")), progress(1, 3));
    assert_eq!(reassembler.ingest(fragment("p1", 1, 3, "ab")), progress(1, 3));
    assert_eq!(
        reassembler.received_indices(&page("p1")),
        vec![FragmentIndex::first()]
    );
}

#[test]
fn conflicting_payload_keeps_first_seen_bytes() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 1, 3, "ab")), progress(1, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 1, 3, "zz")),
        IngestResult::AnomalyIgnored(Anomaly::PayloadMismatch {
            index: FragmentIndex::first()
        })
    );

    assert_eq!(reassembler.ingest(fragment("p1", 2, 3, "cd")), progress(2, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 3, 3, "ef")),
        IngestResult::Complete("abcdef".to_owned())
    );
}

#[test]
fn conflicting_total_is_kept_aside() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 1, 3, "ab")), progress(1, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 2, 4, "xx")),
        IngestResult::AnomalyIgnored(Anomaly::TotalMismatch {
            expected: count(3),
            found: count(4),
        })
    );

    // The disputed fragment never counts toward the original total.
    assert_eq!(reassembler.expected_total(&page("p1")), Some(count(3)));
    assert_eq!(reassembler.received_indices(&page("p1")).len(), 1);

    assert_eq!(reassembler.ingest(fragment("p1", 2, 3, "cd")), progress(2, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 3, 3, "ef")),
        IngestResult::Complete("abcdef".to_owned())
    );
}

#[test]
fn reset_discards_accumulation() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 1, 2, "ab")), progress(1, 2));
    reassembler.reset(&page("p1"));
    assert_eq!(reassembler.buffered_len(), 0);

    // Accumulation restarts from empty.
    assert_eq!(reassembler.ingest(fragment("p1", 2, 2, "cd")), progress(1, 2));
}

#[test]
fn reset_of_unknown_page_succeeds() {
    let mut reassembler = reassembler();
    reassembler.reset(&page("never-seen"));
    assert_eq!(reassembler.buffered_len(), 0);
}

#[test]
fn timeout_reports_missing_fragments_without_evicting() {
    let mut reassembler = reassembler();
    let started = Instant::now();
    let timeout = Duration::from_secs(10);

    assert_eq!(
        reassembler.ingest_at(fragment("p1", 1, 3, "ab"), started),
        progress(1, 3)
    );

    assert_eq!(
        reassembler.check_timeout_at(&page("p1"), started + Duration::from_secs(5), timeout),
        TimeoutStatus::Ok
    );
    assert_eq!(
        reassembler.check_timeout_at(&page("p1"), started + timeout, timeout),
        TimeoutStatus::Incomplete { missing: 2 }
    );

    // The page keeps accumulating and may still complete.
    assert_eq!(reassembler.buffered_len(), 1);
    assert_eq!(reassembler.ingest(fragment("p1", 2, 3, "cd")), progress(2, 3));
    assert_eq!(
        reassembler.ingest(fragment("p1", 3, 3, "ef")),
        IngestResult::Complete("abcdef".to_owned())
    );
}

#[test]
fn timeout_of_unknown_page_is_ok() {
    let reassembler = reassembler();
    assert_eq!(
        reassembler.check_timeout(&page("never-seen")),
        TimeoutStatus::Ok
    );
}

#[test]
fn pages_accumulate_independently() {
    let mut reassembler = reassembler();

    assert_eq!(reassembler.ingest(fragment("p1", 1, 2, "a1")), progress(1, 2));
    assert_eq!(reassembler.ingest(fragment("p2", 2, 2, "b2")), progress(1, 2));
    assert_eq!(reassembler.buffered_len(), 2);

    assert_eq!(
        reassembler.ingest(fragment("p2", 1, 2, "b1")),
        IngestResult::Complete("b1b2".to_owned())
    );
    assert_eq!(
        reassembler.ingest(fragment("p1", 2, 2, "a2")),
        IngestResult::Complete("a1a2".to_owned())
    );
    assert_eq!(reassembler.buffered_len(), 0);
}

#[test]
fn received_indices_are_sorted_ascending() {
    let mut reassembler = reassembler();

    reassembler.ingest(fragment("p1", 4, 5, "dd"));
    reassembler.ingest(fragment("p1", 1, 5, "aa"));
    reassembler.ingest(fragment("p1", 3, 5, "cc"));

    let indices: Vec<u32> = reassembler
        .received_indices(&page("p1"))
        .into_iter()
        .map(FragmentIndex::get)
        .collect();
    assert_eq!(indices, vec![1, 3, 4]);
}

#[test]
fn pending_pages_lists_open_buckets() {
    let mut reassembler = reassembler();
    reassembler.ingest(fragment("p1", 1, 2, "aa"));
    reassembler.ingest(fragment("p2", 1, 2, "bb"));

    let mut pending: Vec<&PageId> = reassembler.pending_pages().collect();
    pending.sort();
    assert_eq!(pending, vec![&page("p1"), &page("p2")]);
}
