//! Framing primitives for splitting page text across barcode payloads.
//!
//! This module collects the domain types used by the framing and
//! re-assembly layer. Each sub-module focuses on a single concept to keep
//! the code small and easy to audit while still providing a cohesive API at
//! the crate root.

pub mod config;
pub mod error;
pub mod fragmenter;
pub mod header;
pub mod id;
pub mod index;
pub mod reassembler;
pub mod wire;

pub use config::FramingConfig;
pub use error::{Anomaly, FramingError, IngestResult, TimeoutStatus};
pub use fragmenter::{FragmentBatch, Fragmenter};
pub use header::{Fragment, FragmentHeader};
pub use id::{InvalidPageId, PageId};
pub use index::{FragmentCount, FragmentIndex};
pub use reassembler::Reassembler;
pub use wire::{encode_wire, header_len, parse_wire, wire_len};

#[cfg(test)]
mod tests;
