//! Locale-aware name collation.

use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

/// Orders names with the Unicode Collation Algorithm over the CLDR root
/// table, the same order a browser's default `localeCompare` gives.
///
/// Base letters compare first, so case and accents do not split the
/// alphabet (`ё` sits with `е`, `é` with `e`). Among names that differ only
/// in case, lowercase sorts first. Punctuation and spaces are not ignored.
/// Names that collate equal fall back to code point order, so the ordering
/// is total.
pub struct NameCollator {
    inner: Collator,
}

impl NameCollator {
    /// Creates a collator for the root locale.
    pub fn new() -> Self {
        Self {
            inner: Collator::new(Tailoring::Cldr(Locale::Root), false, true),
        }
    }

    /// Compares two names.
    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.inner.collate(a, b).then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameCollator").finish_non_exhaustive()
    }
}

/// Compares two names with a fresh [`NameCollator`].
///
/// Sorting many names should reuse one collator instead.
pub fn collate(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}
