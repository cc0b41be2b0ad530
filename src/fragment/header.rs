use super::{FragmentCount, FragmentIndex, PageId};

/// Header describing a single fragment.
///
/// `FragmentHeader` captures just enough information for a scanner to stitch
/// fragments back together: which page the fragment belongs to, where it
/// sits in that page's sequence, and how many fragments the producer packed
/// for the page.
///
/// # Examples
///
/// ```
/// use pageframe::fragment::{FragmentCount, FragmentHeader, FragmentIndex, PageId};
/// let header = FragmentHeader::new(
///     PageId::new("story-7").expect("valid id"),
///     FragmentIndex::first(),
///     FragmentCount::new(3).expect("non-zero"),
/// );
/// assert_eq!(header.index().get(), 1);
/// assert_eq!(header.total().get(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FragmentHeader {
    page_id: PageId,
    index: FragmentIndex,
    total: FragmentCount,
}

impl FragmentHeader {
    /// Create a new fragment header.
    #[must_use]
    pub fn new(page_id: PageId, index: FragmentIndex, total: FragmentCount) -> Self {
        debug_assert!(
            index.get() <= total.get(),
            "fragment index must not exceed the total"
        );
        Self {
            page_id,
            index,
            total,
        }
    }

    /// Return the page identifier.
    #[must_use]
    pub const fn page_id(&self) -> &PageId { &self.page_id }

    /// Return the fragment's position within the page.
    #[must_use]
    pub const fn index(&self) -> FragmentIndex { self.index }

    /// Return the fragment count the producer packed for the page.
    #[must_use]
    pub const fn total(&self) -> FragmentCount { self.total }

    /// Consume the header, returning the owned page identifier.
    #[must_use]
    pub fn into_page_id(self) -> PageId { self.page_id }
}

/// One wire unit: a header plus a non-empty slice of the page's text.
///
/// The payload is held as a `String`, so it can never end in the middle of
/// a codepoint; concatenating a page's payloads in index order reproduces
/// the original text exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    header: FragmentHeader,
    payload: String,
}

impl Fragment {
    /// Construct a new fragment.
    #[must_use]
    pub fn new(header: FragmentHeader, payload: String) -> Self {
        debug_assert!(!payload.is_empty(), "fragment payloads must not be empty");
        Self { header, payload }
    }

    /// Return the fragment header.
    #[must_use]
    pub const fn header(&self) -> &FragmentHeader { &self.header }

    /// Return the fragment payload text.
    #[must_use]
    pub fn payload(&self) -> &str { &self.payload }

    /// Consume the fragment, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (FragmentHeader, String) { (self.header, self.payload) }
}
