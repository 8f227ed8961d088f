//! Key → old index lookup, scoped to the unmatched middle window.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::item::Keyed;

/// Maps each key in `old[window]` to its position in `old`.
///
/// Unkeyed items are left out, so an unkeyed new item never finds a match.
/// On duplicate keys the last position wins.
#[derive(Debug)]
pub(crate) struct KeyIndex<'a, K: ?Sized + 'a> {
    map: FxHashMap<&'a K, usize>,
}

impl<'a, K: ?Sized + Eq + std::hash::Hash + 'a> KeyIndex<'a, K> {
    /// Index the keys of `old[window]`.
    pub(crate) fn build<T>(old: &'a [T], window: Range<usize>) -> Self
    where
        T: Keyed<Key = K>,
    {
        let mut map = FxHashMap::default();
        map.reserve(window.len());
        for idx in window {
            if let Some(key) = old[idx].key() {
                map.insert(key, idx);
            }
        }
        Self { map }
    }

    /// Position of `key` in the old sequence, if it lies in the window.
    #[inline]
    pub(crate) fn get(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Number of distinct keys indexed.
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
