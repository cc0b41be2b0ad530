//! One-based fragment positioning within a page's fragment sequence.
//!
//! Provides [`FragmentIndex`] and [`FragmentCount`], type-safe wrappers
//! around `NonZeroU32` that keep the wire contract's `1 <= index <= total`
//! arithmetic overflow-safe.

use std::num::NonZeroU32;

use derive_more::Display;

/// One-based ordinal describing a fragment's position within its page.
///
/// # Examples
///
/// ```
/// use pageframe::fragment::FragmentIndex;
/// let index = FragmentIndex::new(3).expect("non-zero");
/// assert_eq!(index.get(), 3);
/// assert!(index.checked_increment().is_some());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct FragmentIndex(NonZeroU32);

impl FragmentIndex {
    /// Construct an index from a `u32` value, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Return the first valid fragment index.
    #[must_use]
    pub const fn first() -> Self { Self(NonZeroU32::MIN) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0.get() }

    /// Increment the index, returning `None` on overflow.
    #[must_use]
    pub fn checked_increment(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

/// Number of fragments a producer believes a page requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct FragmentCount(NonZeroU32);

impl FragmentCount {
    /// Construct a count from a `u32` value, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Return the count for a page that fits a single fragment.
    #[must_use]
    pub const fn one() -> Self { Self(NonZeroU32::MIN) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0.get() }

    /// Convert a collection length, returning `None` for zero or overflow.
    #[must_use]
    pub fn from_len(len: usize) -> Option<Self> { u32::try_from(len).ok().and_then(Self::new) }
}
