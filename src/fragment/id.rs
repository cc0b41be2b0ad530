use derive_more::Display;
use thiserror::Error;

/// Error returned when a page identifier cannot be carried on the wire.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidPageId {
    /// The identifier was empty.
    #[error("page id must not be empty")]
    Empty,
    /// The identifier contained the header delimiter `;`.
    #[error("page id must not contain ';' (found at byte {position})")]
    ReservedDelimiter {
        /// Byte offset of the offending delimiter.
        position: usize,
    },
}

/// Opaque identifier grouping fragments of the same logical page.
///
/// # Examples
///
/// ```
/// use pageframe::fragment::PageId;
/// let id = PageId::new("story-7").expect("valid id");
/// assert_eq!(id.as_str(), "story-7");
/// assert!(PageId::new("a;b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct PageId(String);

impl PageId {
    /// Create an identifier, rejecting values the wire grammar cannot carry.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageId::Empty`] for an empty identifier and
    /// [`InvalidPageId::ReservedDelimiter`] when the identifier contains the
    /// header delimiter `;`.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidPageId> {
        let value = value.into();
        if value.is_empty() {
            return Err(InvalidPageId::Empty);
        }
        if let Some(position) = value.find(';') {
            return Err(InvalidPageId::ReservedDelimiter { position });
        }
        Ok(Self(value))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<&str> for PageId {
    type Error = InvalidPageId;

    fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl TryFrom<String> for PageId {
    type Error = InvalidPageId;

    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}
