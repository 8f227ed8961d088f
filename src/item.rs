//! Keyed items: the identity contract between two sequences.
//!
//! The differ never looks inside an item. It only asks for the item's key,
//! and two items are "the same item" exactly when both carry a key and the
//! keys compare equal. An absent key never matches anything, not even another
//! absent key.

use std::fmt;
use std::hash::Hash;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::error::{ReconcileError, ReconcileResult};

/// Owned key type used by [`Item`].
pub type Key = CompactString;

// =============================================================================
// Keyed
// =============================================================================

/// Anything that can take part in a keyed diff.
///
/// # Example
///
/// ```
/// use tola_reconcile::Keyed;
///
/// struct Row {
///     id: u32,
///     label: String,
/// }
///
/// impl Keyed for Row {
///     type Key = u32;
///
///     fn key(&self) -> Option<&u32> {
///         Some(&self.id)
///     }
/// }
///
/// let old = [Row { id: 7, label: "seven".into() }];
/// let new = [Row { id: 7, label: "SEVEN".into() }];
/// assert_eq!(old[0].key(), new[0].key());
///
/// // Same key, new content: reconciled as an update
/// tola_reconcile::diff(&old, &new, &mut |delta: tola_reconcile::Delta<'_, Row>| {
///     let (before, after) = (delta.old_item().unwrap(), delta.new_item().unwrap());
///     assert_eq!((before.label.as_str(), after.label.as_str()), ("seven", "SEVEN"));
/// });
/// ```
pub trait Keyed {
    /// Identity type, compared by exact equality.
    type Key: ?Sized + Eq + Hash;

    /// The item's key, or `None` for an unkeyed item.
    fn key(&self) -> Option<&Self::Key>;
}

impl<T: Keyed + ?Sized> Keyed for &T {
    type Key = T::Key;

    #[inline]
    fn key(&self) -> Option<&Self::Key> {
        (**self).key()
    }
}

/// Whether two items are the same logical item.
#[inline]
pub(crate) fn same_key<T: Keyed + ?Sized>(a: &T, b: &T) -> bool {
    matches!((a.key(), b.key()), (Some(a), Some(b)) if a == b)
}

// =============================================================================
// Item
// =============================================================================

/// A ready-made keyed item: an optional string key plus opaque content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item<V> {
    /// Identity across sequences
    pub key: Option<Key>,
    /// Content, passed through untouched
    pub value: V,
}

impl<V> Item<V> {
    /// Create a keyed item.
    pub fn keyed(key: impl Into<Key>, value: V) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    /// Create an unkeyed item.
    pub fn unkeyed(value: V) -> Self {
        Self { key: None, value }
    }

    /// Check if this item carries a key.
    #[inline]
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }
}

impl<V> Keyed for Item<V> {
    type Key = str;

    #[inline]
    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Check that no two keyed items of `items` share a key.
///
/// The differ assumes unique keys and does not check them itself. Unkeyed
/// items are ignored.
///
/// # Example
///
/// ```
/// use tola_reconcile::{check_unique_keys, Item, ReconcileError};
///
/// let items = [Item::keyed("a", ()), Item::keyed("b", ()), Item::keyed("a", ())];
/// assert_eq!(
///     check_unique_keys(&items),
///     Err(ReconcileError::duplicate_key("a", 0, 2)),
/// );
/// ```
pub fn check_unique_keys<T>(items: &[T]) -> ReconcileResult<()>
where
    T: Keyed,
    T::Key: fmt::Display,
{
    let mut seen: FxHashMap<&T::Key, usize> = FxHashMap::default();
    seen.reserve(items.len());

    for (idx, item) in items.iter().enumerate() {
        let Some(key) = item.key() else { continue };
        if let Some(&first) = seen.get(key) {
            return Err(ReconcileError::duplicate_key(key, first, idx));
        }
        seen.insert(key, idx);
    }

    Ok(())
}
