//! Delta: one edit operation of a reconciliation stream.
//!
//! Deltas borrow the items they talk about. Every delta also carries the
//! positional index of each item it references, so a consumer can find its
//! own mirrored counterpart without searching by key.
//!
//! # Destination indices
//!
//! `Create::to` and `Move::to` are insertion points in the consumer's
//! *partially patched* mirror, not final indices in the new sequence. Let
//! `anchor` be the entry at position `to` before the delta is applied:
//!
//! - `Create` inserts the new item immediately before `anchor` (append when
//!   there is none).
//! - `Move` detaches the old item and re-inserts it, now described by the new
//!   item, immediately before `anchor`. When `anchor` is the moved item itself
//!   it stays where it is.
//!
//! Deltas must be applied strictly in emission order.

/// Kind of a [`Delta`].
///
/// Discriminants are single bits so kinds can be combined into masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeltaKind {
    Create = 1 << 0,
    Update = 1 << 1,
    Move = 1 << 2,
    Remove = 1 << 3,
}

impl DeltaKind {
    /// Bit value of this kind.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Check if this kind is set in `mask`.
    #[inline]
    pub const fn is_in(self, mask: u8) -> bool {
        mask & self.bits() != 0
    }
}

/// Edit operation emitted by the differ
#[derive(Debug, PartialEq, Eq)]
pub enum Delta<'a, T> {
    /// `new` has no counterpart in old; insert it at `to`
    Create {
        new: &'a T,
        new_idx: usize,
        to: usize,
    },
    /// Same key on both sides; patch `old` in place with `new`
    Update {
        old: &'a T,
        old_idx: usize,
        new: &'a T,
        new_idx: usize,
    },
    /// Same key on both sides; patch `old` with `new` and place it at `to`
    Move {
        old: &'a T,
        old_idx: usize,
        new: &'a T,
        new_idx: usize,
        to: usize,
    },
    /// `old` has no counterpart in new; discard it
    Remove { old: &'a T, old_idx: usize },
}

// Manual impls: deltas only hold references, `T` itself need not be `Copy`.
impl<T> Clone for Delta<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Delta<'_, T> {}

impl<'a, T> Delta<'a, T> {
    /// Get the kind of this delta
    pub fn kind(&self) -> DeltaKind {
        match self {
            Self::Create { .. } => DeltaKind::Create,
            Self::Update { .. } => DeltaKind::Update,
            Self::Move { .. } => DeltaKind::Move,
            Self::Remove { .. } => DeltaKind::Remove,
        }
    }

    /// Old-side item (absent for `Create`)
    pub fn old_item(&self) -> Option<&'a T> {
        match *self {
            Self::Update { old, .. } | Self::Move { old, .. } | Self::Remove { old, .. } => {
                Some(old)
            }
            Self::Create { .. } => None,
        }
    }

    /// New-side item (absent for `Remove`)
    pub fn new_item(&self) -> Option<&'a T> {
        match *self {
            Self::Create { new, .. } | Self::Update { new, .. } | Self::Move { new, .. } => {
                Some(new)
            }
            Self::Remove { .. } => None,
        }
    }

    /// Index of the old-side item in the old sequence
    pub fn old_idx(&self) -> Option<usize> {
        match *self {
            Self::Update { old_idx, .. }
            | Self::Move { old_idx, .. }
            | Self::Remove { old_idx, .. } => Some(old_idx),
            Self::Create { .. } => None,
        }
    }

    /// Index of the new-side item in the new sequence
    pub fn new_idx(&self) -> Option<usize> {
        match *self {
            Self::Create { new_idx, .. }
            | Self::Update { new_idx, .. }
            | Self::Move { new_idx, .. } => Some(new_idx),
            Self::Remove { .. } => None,
        }
    }

    /// Destination index (absent for `Remove`).
    ///
    /// For `Update` this is the new item's own index.
    pub fn dest(&self) -> Option<usize> {
        match *self {
            Self::Create { to, .. } | Self::Move { to, .. } => Some(to),
            Self::Update { new_idx, .. } => Some(new_idx),
            Self::Remove { .. } => None,
        }
    }

    /// Check if this is an Update operation
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Check if this is a Move operation
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}
