#![doc(html_root_url = "https://docs.rs/pageframe/latest")]
//! Public API for the `pageframe` library.
//!
//! This crate implements the chunk framing protocol used to carry
//! story-page text across size-bounded 2D barcode payloads: an encoder
//! that splits UTF-8 text into self-describing fragments, a classifier
//! that sorts raw scans into payload variants, and a stateful re-assembler
//! that rebuilds pages from fragments arriving in any order.

pub mod classify;
pub mod fragment;

pub use classify::{PageRecord, ScanPayload, classify};
pub use fragment::{
    Anomaly,
    Fragment,
    FragmentBatch,
    FragmentCount,
    FragmentHeader,
    FragmentIndex,
    Fragmenter,
    FramingConfig,
    FramingError,
    IngestResult,
    InvalidPageId,
    PageId,
    Reassembler,
    TimeoutStatus,
    encode_wire,
    header_len,
    parse_wire,
    wire_len,
};
