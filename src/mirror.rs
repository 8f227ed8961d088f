//! Mirror: applies a delta stream to an owned copy of the old sequence.
//!
//! This is the reference consumer of the destination-index contract (see
//! [`delta`](crate::delta)). A renderer patching real nodes does the same
//! thing with `insertBefore`: it looks up the node currently at `to`, then
//! places the created or moved node in front of it.
//!
//! # Example
//!
//! ```
//! use tola_reconcile::{reconcile_vec, Item};
//!
//! let old = vec![Item::keyed("a", 1), Item::keyed("b", 2), Item::keyed("c", 3)];
//! let new = vec![Item::keyed("c", 30), Item::keyed("a", 10), Item::keyed("d", 40)];
//!
//! assert_eq!(reconcile_vec(&old, &new).unwrap(), new);
//! ```

use tracing::trace;

use crate::algo::diff;
use crate::delta::Delta;
use crate::error::{ReconcileError, ReconcileResult};
use crate::item::Keyed;

/// One mirrored position.
#[derive(Debug, Clone)]
struct Slot<T> {
    /// Index in the old sequence while this slot still holds an old item
    origin: Option<usize>,
    value: T,
}

/// Owned, in-progress copy of a sequence under reconciliation.
#[derive(Debug, Clone)]
pub struct Mirror<T> {
    slots: Vec<Slot<T>>,
    old_len: usize,
}

impl<T: Clone> Mirror<T> {
    /// Mirror a copy of `old`.
    pub fn new(old: &[T]) -> Self {
        Self::from_vec(old.to_vec())
    }

    /// Mirror `old`, taking ownership.
    pub fn from_vec(old: Vec<T>) -> Self {
        let old_len = old.len();
        let slots = old
            .into_iter()
            .enumerate()
            .map(|(idx, value)| Slot {
                origin: Some(idx),
                value,
            })
            .collect();
        Self { slots, old_len }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the mirror holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current entries, in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|slot| &slot.value)
    }

    /// Number of old items no delta has consumed yet.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|slot| slot.origin.is_some()).count()
    }

    /// Current position of old item `old_idx`.
    fn position_of(&self, old_idx: usize) -> ReconcileResult<usize> {
        if old_idx >= self.old_len {
            return Err(ReconcileError::out_of_range(old_idx, self.old_len));
        }
        self.slots
            .iter()
            .position(|slot| slot.origin == Some(old_idx))
            .ok_or(ReconcileError::MissingOld { old_idx })
    }

    /// Apply a single delta.
    pub fn apply(&mut self, delta: Delta<'_, T>) -> ReconcileResult<()> {
        trace!(kind = ?delta.kind(), dest = ?delta.dest(), len = self.slots.len(), "apply");

        match delta {
            Delta::Create { new, to, .. } => {
                let at = to.min(self.slots.len());
                self.slots.insert(at, Slot::settled(new));
            }
            Delta::Update { old_idx, new, .. } => {
                let at = self.position_of(old_idx)?;
                self.slots[at] = Slot::settled(new);
            }
            Delta::Move { old_idx, new, to, .. } => {
                let from = self.position_of(old_idx)?;
                if from == to {
                    // Anchored on itself: patch in place
                    self.slots[from] = Slot::settled(new);
                    return Ok(());
                }

                let len = self.slots.len();
                self.slots.remove(from);
                if to >= len {
                    self.slots.push(Slot::settled(new));
                } else {
                    // The anchor shifted left if the moved item sat before it
                    let at = if from < to { to - 1 } else { to };
                    self.slots.insert(at, Slot::settled(new));
                }
            }
            Delta::Remove { old_idx, .. } => {
                let at = self.position_of(old_idx)?;
                self.slots.remove(at);
            }
        }

        Ok(())
    }

    /// Apply deltas in order, stopping at the first error.
    pub fn apply_all<'a, I>(&mut self, deltas: I) -> ReconcileResult<()>
    where
        T: 'a,
        I: IntoIterator<Item = Delta<'a, T>>,
    {
        deltas.into_iter().try_for_each(|delta| self.apply(delta))
    }

    /// Consume the mirror and return the reconciled sequence.
    ///
    /// Fails if any old item was never updated, moved or removed.
    pub fn finish(self) -> ReconcileResult<Vec<T>> {
        match self.pending() {
            0 => Ok(self.slots.into_iter().map(|slot| slot.value).collect()),
            count => Err(ReconcileError::Unresolved { count }),
        }
    }
}

impl<T: Clone> Slot<T> {
    fn settled(value: &T) -> Self {
        Self {
            origin: None,
            value: value.clone(),
        }
    }
}

/// Diff `old` against `new` and apply the stream to a mirror of `old`.
///
/// Returns the reconstructed sequence, which equals `new` whenever keys are
/// unique within each sequence.
pub fn reconcile_vec<T>(old: &[T], new: &[T]) -> ReconcileResult<Vec<T>>
where
    T: Keyed + Clone,
{
    let mut mirror = Mirror::new(old);
    let mut outcome = Ok(());

    diff(old, new, &mut |delta: Delta<'_, T>| {
        if outcome.is_ok() {
            outcome = mirror.apply(delta);
        }
    });

    outcome?;
    mirror.finish()
}
