// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::fmt;
use smallvec::SmallVec;

/// An immutable, orderless, deduplicated set of style labels.
///
/// Labels are stored sorted, so two sets built from the same labels in any
/// order are equal and hash identically:
///
/// ```
/// use style_set::StyleSet;
///
/// let a: StyleSet = ["BOLD", "ITALIC"].into_iter().collect();
/// let b = StyleSet::new().with("ITALIC").with("BOLD");
/// assert_eq!(a, b);
/// ```
///
/// The "mutation" operations [`with`](Self::with) and [`without`](Self::without)
/// return a new set and leave the receiver untouched. Labels are reference
/// counted, so derived sets share label storage with their ancestors.
///
/// Most character runs carry only a handful of styles, so label storage is
/// inline up to four labels.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    labels: SmallVec<[Arc<str>; 4]>,
}

impl StyleSet {
    /// Creates an empty style set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this set with `label` added.
    ///
    /// Adding a label that is already present is a no-op and returns an
    /// equal set.
    #[must_use]
    pub fn with(&self, label: impl Into<Arc<str>>) -> Self {
        let label = label.into();
        match self.position(&label) {
            Ok(_) => self.clone(),
            Err(index) => {
                let mut labels = self.labels.clone();
                labels.insert(index, label);
                Self { labels }
            }
        }
    }

    /// Returns a copy of this set with `label` removed.
    ///
    /// Removing a label that is absent is a no-op and returns an equal set.
    #[must_use]
    pub fn without(&self, label: &str) -> Self {
        match self.position(label) {
            Ok(index) => {
                let mut labels = self.labels.clone();
                labels.remove(index);
                Self { labels }
            }
            Err(_) => self.clone(),
        }
    }

    /// Returns true if `label` is a member of this set.
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_ok()
    }

    /// Returns an iterator over the labels in sorted order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.labels.iter(),
        }
    }

    /// Returns the number of labels in this set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if this set contains no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn position(&self, label: &str) -> Result<usize, usize> {
        self.labels
            .binary_search_by(|probe| probe.as_ref().cmp(label))
    }
}

impl fmt::Debug for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Into<Arc<str>>> FromIterator<T> for StyleSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut labels: SmallVec<[Arc<str>; 4]> =
            iter.into_iter().map(Into::into).collect();
        labels.sort_unstable();
        labels.dedup();
        Self { labels }
    }
}

impl<'a> IntoIterator for &'a StyleSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the labels of a [`StyleSet`] in sorted order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, Arc<str>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|label| label.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|label| label.as_ref())
    }
}
