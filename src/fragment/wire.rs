//! Textual wire grammar for fragments.
//!
//! A fragment travels as `ID:<pageId>;CHUNK:<index>/<total>;<payload>`.
//! The payload is everything after the delimiter closing the `CHUNK` field,
//! taken verbatim to the end of the scanned string, newlines included; it is
//! neither escaped nor length-prefixed. Header byte length varies with the
//! identifier and the decimal digit-width of the counters, so the sizing
//! arithmetic lives here next to the grammar it describes.

use super::{Fragment, FragmentCount, FragmentHeader, FragmentIndex, PageId};

const ID_PREFIX: &str = "ID:";
const CHUNK_PREFIX: &str = "CHUNK:";

/// Byte length of the wire header for the given identifier and counters.
#[must_use]
pub fn header_len(page_id: &PageId, index: FragmentIndex, total: FragmentCount) -> usize {
    ID_PREFIX.len()
        + page_id.as_str().len()
        + 1
        + CHUNK_PREFIX.len()
        + decimal_width(index.get())
        + 1
        + decimal_width(total.get())
        + 1
}

/// Number of ASCII digits in the decimal rendering of `value`.
pub(crate) fn decimal_width(value: u32) -> usize {
    let mut width = 1;
    let mut rest = value / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Render a fragment into its wire text.
#[must_use]
pub fn encode_wire(fragment: &Fragment) -> String {
    let header = fragment.header();
    format!(
        "{ID_PREFIX}{};{CHUNK_PREFIX}{}/{};{}",
        header.page_id(),
        header.index(),
        header.total(),
        fragment.payload(),
    )
}

/// Total wire-encoded byte length of a fragment, header included.
#[must_use]
pub fn wire_len(fragment: &Fragment) -> usize {
    let header = fragment.header();
    header_len(header.page_id(), header.index(), header.total()) + fragment.payload().len()
}

/// Attempt to parse a scanned string as fragment wire text.
///
/// Returns `None` whenever the input deviates from the grammar: a missing
/// or misspelt prefix, an empty identifier, counters that are not plain
/// decimal, an index past the total, or an empty payload. Callers fall
/// through to their next classification rule instead of failing.
#[must_use]
pub fn parse_wire(raw: &str) -> Option<Fragment> {
    let rest = raw.strip_prefix(ID_PREFIX)?;
    let (page_id, rest) = rest.split_once(';')?;
    let page_id = PageId::new(page_id).ok()?;
    let rest = rest.strip_prefix(CHUNK_PREFIX)?;
    let (counters, payload) = rest.split_once(';')?;
    let (index, total) = counters.split_once('/')?;
    let index = FragmentIndex::new(parse_decimal(index)?)?;
    let total = FragmentCount::new(parse_decimal(total)?)?;
    if index.get() > total.get() || payload.is_empty() {
        return None;
    }
    Some(Fragment::new(
        FragmentHeader::new(page_id, index, total),
        payload.to_owned(),
    ))
}

/// Parse an unsigned ASCII decimal, rejecting signs and non-digits.
fn parse_decimal(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
