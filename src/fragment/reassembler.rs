//! Inbound accumulator that stitches scanned fragments back into pages.
//!
//! [`Reassembler`] owns one bucket per page currently being scanned.
//! Fragments may arrive in any order and repeatedly (a barcode held in
//! frame is decoded once per poll cycle), so duplicates are idempotent and
//! contradictory fragments degrade to soft [`Anomaly`] signals instead of
//! tearing down accumulated progress. Timeouts are advisory:
//! [`check_timeout`](Reassembler::check_timeout) reports missing fragments
//! without evicting anything, and only completion or an explicit
//! [`reset`](Reassembler::reset) destroys a bucket.

use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    time::{Duration, Instant},
};

use super::{
    Anomaly,
    Fragment,
    FragmentCount,
    FragmentIndex,
    FramingConfig,
    IngestResult,
    PageId,
    TimeoutStatus,
};

#[derive(Debug)]
struct Bucket {
    total_expected: FragmentCount,
    received: BTreeMap<FragmentIndex, String>,
    disputed: BTreeMap<FragmentIndex, String>,
    first_seen_at: Instant,
}

impl Bucket {
    fn new(total_expected: FragmentCount, first_seen_at: Instant) -> Self {
        Self {
            total_expected,
            received: BTreeMap::new(),
            disputed: BTreeMap::new(),
            first_seen_at,
        }
    }

    fn stored(&self) -> u32 { u32::try_from(self.received.len()).unwrap_or(u32::MAX) }

    fn is_complete(&self) -> bool {
        // Parsing guarantees a stored index never exceeds its own total, so
        // every counted index is within `1..=total_expected` and a full set
        // is exactly that range.
        self.received.len() == self.total_expected.get() as usize
    }

    fn into_text(self) -> String {
        let capacity = self.received.values().map(String::len).sum();
        let mut text = String::with_capacity(capacity);
        for payload in self.received.into_values() {
            text.push_str(&payload);
        }
        text
    }
}

/// Stateful accumulator with one bucket per in-flight page.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use pageframe::fragment::{IngestResult, Reassembler, parse_wire};
///
/// let mut reassembler = Reassembler::new(Duration::from_secs(10));
/// let fragment = parse_wire("ID:story-7;CHUNK:1/1;hello").expect("wire text parses");
/// assert_eq!(
///     reassembler.ingest(fragment),
///     IngestResult::Complete("hello".to_owned())
/// );
/// ```
#[derive(Debug)]
pub struct Reassembler {
    timeout: Duration,
    buckets: HashMap<PageId, Bucket>,
}

impl Reassembler {
    /// Create a re-assembler whose convenience timeout check waits `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            buckets: HashMap::new(),
        }
    }

    /// Create a re-assembler from shared framing configuration.
    #[must_use]
    pub fn from_config(config: &FramingConfig) -> Self { Self::new(config.reassembly_timeout) }

    /// Process a fragment using the current time.
    ///
    /// See [`ingest_at`](Self::ingest_at) for the full contract.
    pub fn ingest(&mut self, fragment: Fragment) -> IngestResult {
        self.ingest_at(fragment, Instant::now())
    }

    /// Process a fragment using an explicit clock reading.
    ///
    /// The first fragment for an unseen page opens a bucket stamped with
    /// `now`; later fragments only mutate that page's bucket. A fragment
    /// repeating an already-stored index with the same payload is a no-op,
    /// and one contradicting stored state (a differing payload, or a total
    /// that disagrees with the page's expected total) is set aside as an
    /// [`Anomaly`] without disturbing accumulated progress. When every index
    /// from one through the expected total is present, the payloads are
    /// concatenated in index order, the bucket is destroyed, and the page
    /// text is returned.
    ///
    /// Accepting an explicit `now` keeps timeout arithmetic deterministic in
    /// tests and lets callers reuse one clock reading per poll cycle.
    pub fn ingest_at(&mut self, fragment: Fragment, now: Instant) -> IngestResult {
        let (header, payload) = fragment.into_parts();
        let index = header.index();
        let total = header.total();

        match self.buckets.entry(header.into_page_id()) {
            Entry::Vacant(vacant) => {
                if total.get() == 1 {
                    // A page that fits one fragment completes immediately;
                    // no bucket is ever opened for it.
                    return IngestResult::Complete(payload);
                }
                let mut bucket = Bucket::new(total, now);
                bucket.received.insert(index, payload);
                let progress = IngestResult::Progress {
                    stored: bucket.stored(),
                    expected: total,
                };
                vacant.insert(bucket);
                progress
            }
            Entry::Occupied(mut occupied) => {
                let expected = occupied.get().total_expected;
                if total != expected {
                    log::warn!(
                        "page {}: fragment {index}/{total} disagrees with expected total \
                         {expected}; stored for diagnostics only",
                        occupied.key()
                    );
                    occupied.get_mut().disputed.entry(index).or_insert(payload);
                    return IngestResult::AnomalyIgnored(Anomaly::TotalMismatch {
                        expected,
                        found: total,
                    });
                }

                if let Some(existing) = occupied.get().received.get(&index) {
                    if *existing == payload {
                        // Idempotent re-scan of a barcode still in frame.
                        return IngestResult::Progress {
                            stored: occupied.get().stored(),
                            expected,
                        };
                    }
                    log::warn!(
                        "page {}: conflicting payload for fragment {index}; keeping the \
                         first-seen bytes",
                        occupied.key()
                    );
                    return IngestResult::AnomalyIgnored(Anomaly::PayloadMismatch { index });
                }

                occupied.get_mut().received.insert(index, payload);
                if occupied.get().is_complete() {
                    return IngestResult::Complete(occupied.remove().into_text());
                }
                IngestResult::Progress {
                    stored: occupied.get().stored(),
                    expected,
                }
            }
        }
    }

    /// Destroy any accumulation for `page_id`.
    ///
    /// Succeeds whether or not the page was being tracked.
    pub fn reset(&mut self, page_id: &PageId) {
        if self.buckets.remove(page_id).is_some() {
            log::debug!("page {page_id}: accumulation reset");
        }
    }

    /// Report whether `page_id` is overdue using the configured timeout.
    #[must_use]
    pub fn check_timeout(&self, page_id: &PageId) -> TimeoutStatus {
        self.check_timeout_at(page_id, Instant::now(), self.timeout)
    }

    /// Report whether `page_id` is overdue against an explicit clock reading
    /// and patience window.
    ///
    /// Read-only: an overdue page keeps accumulating and may still complete;
    /// only [`reset`](Self::reset) or completion destroys the bucket. A page
    /// with no accumulation reports [`TimeoutStatus::Ok`].
    #[must_use]
    pub fn check_timeout_at(
        &self,
        page_id: &PageId,
        now: Instant,
        timeout: Duration,
    ) -> TimeoutStatus {
        let Some(bucket) = self.buckets.get(page_id) else {
            return TimeoutStatus::Ok;
        };
        if now.saturating_duration_since(bucket.first_seen_at) < timeout {
            return TimeoutStatus::Ok;
        }
        TimeoutStatus::Incomplete {
            missing: bucket.total_expected.get().saturating_sub(bucket.stored()),
        }
    }

    /// Number of pages currently accumulating.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.buckets.len() }

    /// Pages currently accumulating, in no particular order.
    pub fn pending_pages(&self) -> impl Iterator<Item = &PageId> { self.buckets.keys() }

    /// Total recorded from the first fragment of `page_id`, if tracked.
    #[must_use]
    pub fn expected_total(&self, page_id: &PageId) -> Option<FragmentCount> {
        self.buckets.get(page_id).map(|bucket| bucket.total_expected)
    }

    /// Indices stored so far for `page_id`, in ascending order.
    ///
    /// Returns an empty vector for pages with no accumulation; callers use
    /// this to render a scanned-versus-missing progress display.
    #[must_use]
    pub fn received_indices(&self, page_id: &PageId) -> Vec<FragmentIndex> {
        self.buckets
            .get(page_id)
            .map(|bucket| bucket.received.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for Reassembler {
    fn default() -> Self { Self::from_config(&FramingConfig::default()) }
}
