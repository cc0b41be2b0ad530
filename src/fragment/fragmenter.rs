//! Outbound encoder that splits page text into budget-bounded fragments.
//!
//! [`Fragmenter`] packs the UTF-8 encoding of a page greedily at codepoint
//! granularity. Header size depends on the decimal width of the running
//! counters, so packing first assumes a provisional total derived from a
//! minimal-header estimate, then rewrites every header with the count that
//! packing actually produced. A rewrite that widens the counter digits can
//! push a fragment past the budget; packing re-runs with the wider total
//! until every fragment fits.

use std::num::NonZeroUsize;

use super::{
    Fragment,
    FragmentCount,
    FragmentHeader,
    FragmentIndex,
    FramingConfig,
    FramingError,
    PageId,
    wire,
};

/// Splits page text into fragments whose wire encoding fits a byte budget.
#[derive(Clone, Copy, Debug)]
pub struct Fragmenter {
    byte_budget: NonZeroUsize,
}

impl Fragmenter {
    /// Create a fragmenter that caps each fragment's wire size at
    /// `byte_budget` bytes, header included.
    #[must_use]
    pub const fn new(byte_budget: NonZeroUsize) -> Self { Self { byte_budget } }

    /// Create a fragmenter from shared framing configuration.
    #[must_use]
    pub const fn from_config(config: &FramingConfig) -> Self { Self::new(config.byte_budget) }

    /// Return the configured byte budget.
    #[must_use]
    pub const fn byte_budget(&self) -> NonZeroUsize { self.byte_budget }

    /// Split `text` into fragments for `page_id`.
    ///
    /// Fragments are returned in index order; their payloads concatenate to
    /// exactly `text`, and every fragment's wire encoding fits the budget.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::EmptyText`] for empty input,
    /// [`FramingError::BudgetTooSmall`] when the budget cannot hold a
    /// minimal header, [`FramingError::ContentTooLarge`] when a single
    /// codepoint cannot fit next to its header, and
    /// [`FramingError::CountOverflow`] when the page would need more
    /// fragments than the wire counters can express.
    pub fn encode(&self, text: &str, page_id: &PageId) -> Result<FragmentBatch, FramingError> {
        if text.is_empty() {
            return Err(FramingError::EmptyText);
        }

        let budget = self.byte_budget.get();
        let minimal_header =
            wire::header_len(page_id, FragmentIndex::first(), FragmentCount::one());
        let Some(available) = budget.checked_sub(minimal_header).filter(|space| *space > 0)
        else {
            return Err(FramingError::BudgetTooSmall {
                page_id: page_id.clone(),
                budget,
                header: minimal_header,
            });
        };

        let estimate = text.len().div_ceil(available);
        let mut assumed_total =
            FragmentCount::from_len(estimate).ok_or(FramingError::CountOverflow {
                needed: estimate,
                limit: u32::MAX,
            })?;

        loop {
            let payloads = self.pack(text, page_id, assumed_total)?;
            let actual =
                FragmentCount::from_len(payloads.len()).ok_or(FramingError::CountOverflow {
                    needed: payloads.len(),
                    limit: u32::MAX,
                })?;

            // Rewriting headers with the actual total can widen the counter
            // digits; only then can a packed fragment outgrow the budget.
            if self.fits_after_rewrite(page_id, &payloads, actual) {
                return Ok(FragmentBatch::assemble(page_id, &payloads, actual));
            }

            debug_assert!(actual.get() > assumed_total.get());
            log::debug!("re-packing page {page_id}: total {assumed_total} grew to {actual}");
            assumed_total = actual;
        }
    }

    fn pack<'t>(
        &self,
        text: &'t str,
        page_id: &PageId,
        assumed_total: FragmentCount,
    ) -> Result<Vec<&'t str>, FramingError> {
        let budget = self.byte_budget.get();
        let mut payloads = Vec::new();
        let mut remaining = text;
        let mut index = FragmentIndex::first();

        while !remaining.is_empty() {
            let header = wire::header_len(page_id, index, assumed_total);
            let capacity = budget.saturating_sub(header);
            let end = codepoint_floor(remaining, capacity);
            if end == 0 {
                let Some(codepoint) = remaining.chars().next() else {
                    break;
                };
                return Err(FramingError::ContentTooLarge {
                    codepoint,
                    needed: codepoint.len_utf8(),
                    available: capacity,
                    budget,
                });
            }
            payloads.push(&remaining[..end]);
            remaining = &remaining[end..];
            if remaining.is_empty() {
                break;
            }
            index = index
                .checked_increment()
                .ok_or(FramingError::CountOverflow {
                    needed: payloads.len().saturating_add(1),
                    limit: u32::MAX,
                })?;
        }

        Ok(payloads)
    }

    fn fits_after_rewrite(
        &self,
        page_id: &PageId,
        payloads: &[&str],
        actual: FragmentCount,
    ) -> bool {
        let budget = self.byte_budget.get();
        payloads.iter().enumerate().all(|(offset, payload)| {
            let Some(index) = u32::try_from(offset + 1).ok().and_then(FragmentIndex::new)
            else {
                return false;
            };
            wire::header_len(page_id, index, actual) + payload.len() <= budget
        })
    }
}

/// Largest prefix length of `text` that fits `capacity` bytes without
/// splitting a codepoint.
fn codepoint_floor(text: &str, capacity: usize) -> usize {
    if text.len() <= capacity {
        return text.len();
    }
    let mut end = capacity;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Ordered fragments produced for a single page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentBatch {
    page_id: PageId,
    fragments: Vec<Fragment>,
}

impl FragmentBatch {
    fn assemble(page_id: &PageId, payloads: &[&str], total: FragmentCount) -> Self {
        debug_assert!(!payloads.is_empty(), "fragment batches must not be empty");
        let mut fragments = Vec::with_capacity(payloads.len());
        let mut index = Some(FragmentIndex::first());
        for payload in payloads {
            let Some(current) = index else { break };
            fragments.push(Fragment::new(
                FragmentHeader::new(page_id.clone(), current, total),
                (*payload).to_owned(),
            ));
            index = current.checked_increment();
        }
        Self {
            page_id: page_id.clone(),
            fragments,
        }
    }

    /// Return the page identifier shared by all fragments.
    #[must_use]
    pub const fn page_id(&self) -> &PageId { &self.page_id }

    /// Return the fragments as a slice, in index order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] { self.fragments.as_slice() }

    /// Number of fragments in the batch.
    #[expect(
        clippy::len_without_is_empty,
        reason = "batches are guaranteed non-empty"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.fragments.len() }

    /// Total carried by every fragment header in the batch.
    #[must_use]
    pub fn total(&self) -> FragmentCount {
        FragmentCount::from_len(self.fragments.len()).unwrap_or(FragmentCount::one())
    }

    /// Whether the page required more than one fragment.
    #[must_use]
    pub fn is_fragmented(&self) -> bool { self.len() > 1 }

    /// Consume the batch, returning all fragments.
    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> { self.fragments }
}

impl IntoIterator for FragmentBatch {
    type Item = Fragment;
    type IntoIter = std::vec::IntoIter<Fragment>;

    fn into_iter(self) -> Self::IntoIter { self.fragments.into_iter() }
}
