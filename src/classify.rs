//! Priority classifier mapping scanned strings onto payload variants.
//!
//! A decoded barcode can carry one of four shapes: a self-contained page
//! record fetched straight from the backend, a bare reference to a page
//! number, one fragment of a chunked page, or plain text authored without
//! any protocol wrapper. Classification runs the matchers in that order and
//! never fails; anything unrecognized is plain text. Page records and
//! references are unambiguous and cheap to detect, while the fragment
//! grammar is denser and more false-positive-prone, so it is tried only
//! after the simpler forms are ruled out.

use serde::Deserialize;

use crate::fragment::{Fragment, wire};

/// Self-contained page record as the backend encodes it.
///
/// Only the page number and text matter here; transport extras such as
/// image or audio references are ignored during classification.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Page number the record describes.
    pub page_number: u32,
    /// Full story text for the page.
    #[serde(alias = "gaText")]
    pub text: String,
}

/// Result of classifying one decoded barcode string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanPayload {
    /// A self-contained page record; no reassembly needed.
    PageRecord(PageRecord),
    /// A bare pointer to a page, resolved externally.
    PageReference {
        /// Referenced page number.
        page_number: u32,
    },
    /// One fragment of a chunked page.
    Fragment(Fragment),
    /// Fallback: the whole scanned string is already-complete content.
    PlainText(String),
}

/// Classify a decoded barcode string.
///
/// Total and pure: every input maps to exactly one [`ScanPayload`], with
/// [`ScanPayload::PlainText`] as the catch-all.
///
/// # Examples
///
/// ```
/// use pageframe::classify::{ScanPayload, classify};
///
/// assert!(matches!(classify("page-12"), ScanPayload::PageReference { page_number: 12 }));
/// assert!(matches!(classify("ID:p1;CHUNK:1/1;hello"), ScanPayload::Fragment(_)));
/// assert!(matches!(classify("once upon a time"), ScanPayload::PlainText(_)));
/// ```
#[must_use]
pub fn classify(raw: &str) -> ScanPayload {
    if let Some(record) = parse_page_record(raw) {
        return ScanPayload::PageRecord(record);
    }
    if let Some(page_number) = parse_page_reference(raw) {
        return ScanPayload::PageReference { page_number };
    }
    if let Some(fragment) = wire::parse_wire(raw) {
        return ScanPayload::Fragment(fragment);
    }
    ScanPayload::PlainText(raw.to_owned())
}

fn parse_page_record(raw: &str) -> Option<PageRecord> {
    let record: PageRecord = serde_json::from_str(raw).ok()?;
    (record.page_number >= 1 && !record.text.is_empty()).then_some(record)
}

/// Find a page reference: the entire string is ASCII digits, or a
/// `page<digits>` / `page-<digits>` / `page_<digits>` run (case-insensitive)
/// anywhere in the string. Zero and digit runs past `u32` are not valid
/// references; scanning continues past them.
fn parse_page_reference(raw: &str) -> Option<u32> {
    if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return raw.parse().ok().filter(|number| *number >= 1);
    }

    let lower = raw.to_ascii_lowercase();
    let mut search = 0;
    while let Some(found) = lower[search..].find("page") {
        let after_keyword = search + found + "page".len();
        let mut digits_start = after_keyword;
        if matches!(lower.as_bytes().get(digits_start), Some(b'-' | b'_')) {
            digits_start += 1;
        }
        let digits_end = digits_start
            + lower[digits_start..]
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
        if digits_end > digits_start {
            if let Ok(number) = lower[digits_start..digits_end].parse::<u32>() {
                if number >= 1 {
                    return Some(number);
                }
            }
        }
        search += found + 1;
    }
    None
}
