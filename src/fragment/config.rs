//! Configuration shared by the framing encoder and decoder embeddings.

use std::{num::NonZeroUsize, time::Duration};

/// Settings that bound fragment sizes and scan-session patience.
///
/// The byte budget is a protocol parameter agreed between the encoder and
/// every compliant decoder; it must be documented alongside any generated
/// fragment set.
#[derive(Clone, Copy, Debug)]
pub struct FramingConfig {
    /// Maximum wire-encoded byte size a single barcode payload may occupy,
    /// header included.
    pub byte_budget: NonZeroUsize,
    /// How long a page may accumulate before an incomplete scan is worth
    /// reporting.
    pub reassembly_timeout: Duration,
}

impl FramingConfig {
    /// Default byte budget, sized for a comfortably scannable barcode.
    pub const DEFAULT_BYTE_BUDGET: NonZeroUsize = NonZeroUsize::new(2400).unwrap();

    /// Default patience before reporting missing fragments.
    pub const DEFAULT_REASSEMBLY_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            byte_budget: Self::DEFAULT_BYTE_BUDGET,
            reassembly_timeout: Self::DEFAULT_REASSEMBLY_TIMEOUT,
        }
    }
}
