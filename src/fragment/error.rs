//! Error and status types emitted by the framing layer.
//!
//! Encoder failures are fatal to a single encode call and carry enough
//! detail for the caller to pick a larger budget. Decoder-side
//! irregularities surface as soft status values so a scan in progress is
//! never torn down by one bad read.

use thiserror::Error;

use super::{FragmentCount, FragmentIndex, PageId};

/// Errors produced while framing outbound text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// The input text was empty; the wire format has no empty fragments.
    #[error("cannot frame empty text")]
    EmptyText,
    /// The byte budget cannot hold even a minimal header for this page.
    #[error("byte budget {budget} cannot hold the {header}-byte header for page {page_id}")]
    BudgetTooSmall {
        /// Page whose header was measured.
        page_id: PageId,
        /// Configured budget in bytes.
        budget: usize,
        /// Minimal header size for the page.
        header: usize,
    },
    /// A single codepoint plus its header exceeds the byte budget.
    #[error(
        "codepoint {codepoint:?} needs {needed} bytes but {available} remain under budget {budget}"
    )]
    ContentTooLarge {
        /// First codepoint that failed to fit.
        codepoint: char,
        /// Encoded size of that codepoint.
        needed: usize,
        /// Payload bytes left after the header.
        available: usize,
        /// Configured budget in bytes.
        budget: usize,
    },
    /// The page would need more fragments than the wire counters can carry.
    #[error("page needs {needed} fragments but the wire format caps at {limit}")]
    CountOverflow {
        /// Fragment count the page would require.
        needed: usize,
        /// Largest count the wire counters can express.
        limit: u32,
    },
}

/// Soft signal describing a fragment that contradicts stored page state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// The fragment's total disagrees with the total the page started with.
    TotalMismatch {
        /// Total recorded from the page's first fragment.
        expected: FragmentCount,
        /// Total carried by the contradicting fragment.
        found: FragmentCount,
    },
    /// A payload differing from the one already stored at this index.
    PayloadMismatch {
        /// Index whose first-seen payload is kept.
        index: FragmentIndex,
    },
}

/// Outcome of feeding one fragment to the
/// [`Reassembler`](crate::fragment::Reassembler).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestResult {
    /// The page still expects more fragments.
    Progress {
        /// Fragments stored so far.
        stored: u32,
        /// Total the page is accumulating toward.
        expected: FragmentCount,
    },
    /// The fragment completed the page; the reconstructed text is returned.
    Complete(String),
    /// The fragment contradicted stored state and was set aside.
    AnomalyIgnored(Anomaly),
}

/// Advisory answer from
/// [`Reassembler::check_timeout`](crate::fragment::Reassembler::check_timeout).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutStatus {
    /// No overdue accumulation for this page.
    Ok,
    /// The patience window elapsed with fragments still missing.
    Incomplete {
        /// Fragments outstanding against the expected total.
        missing: u32,
    },
}
