//! Children reconciliation modes.
//!
//! A parent declares how its children are shaped, and the shape decides
//! which diff runs:
//!
//! | Mode | Diff |
//! |------|------|
//! | `Empty` | replace everything (the new side is normally empty) |
//! | `TextOnly` | replace everything; text is not reconciled item by item |
//! | `Any` | positional diff, keys ignored |
//! | `Keyed` | phased keyed diff |

use crate::algo::{diff, diff_positional};
use crate::delta::Delta;
use crate::item::Keyed;
use crate::sink::Effect;

/// Shape of a parent's children.
///
/// Discriminants are single bits, matching the flags a renderer stores on
/// its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChildrenMode {
    /// No children
    Empty = 1 << 0,
    /// Text children only
    TextOnly = 1 << 1,
    /// Arbitrary unkeyed children
    #[default]
    Any = 1 << 2,
    /// Keyed children
    Keyed = 1 << 3,
}

impl ChildrenMode {
    /// Bit value of this mode.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Mode for a bit value, if it names exactly one mode.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b0001 => Some(Self::Empty),
            0b0010 => Some(Self::TextOnly),
            0b0100 => Some(Self::Any),
            0b1000 => Some(Self::Keyed),
            _ => None,
        }
    }

    /// Keyed mode if every child carries a key, `Any` otherwise.
    ///
    /// An empty list counts as keyed.
    pub fn detect<T: Keyed>(children: &[T]) -> Self {
        if children.iter().all(|child| child.key().is_some()) {
            Self::Keyed
        } else {
            Self::Any
        }
    }
}

/// Reconcile children according to `mode`.
pub fn reconcile_children<'a, T, E>(mode: ChildrenMode, old: &'a [T], new: &'a [T], effect: &mut E)
where
    T: Keyed,
    E: Effect<'a, T> + ?Sized,
{
    match mode {
        ChildrenMode::Keyed => diff(old, new, effect),
        ChildrenMode::Any => diff_positional(old, new, effect),
        ChildrenMode::Empty | ChildrenMode::TextOnly => replace_all(old, new, effect),
    }
}

/// Remove every old child in order, then create every new child in place.
fn replace_all<'a, T, E>(old: &'a [T], new: &'a [T], effect: &mut E)
where
    E: Effect<'a, T> + ?Sized,
{
    for (old_idx, old_item) in old.iter().enumerate() {
        effect.effect(Delta::Remove { old: old_item, old_idx });
    }
    for (new_idx, new_item) in new.iter().enumerate() {
        effect.effect(Delta::Create { new: new_item, new_idx, to: new_idx });
    }
}
