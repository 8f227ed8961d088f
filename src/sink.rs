//! Effect sinks: consumers of a delta stream.
//!
//! The differ pushes every [`Delta`] into an [`Effect`] the moment it is
//! decided, synchronously and in order. Any `FnMut(Delta<'a, T>)` closure is
//! an effect; [`Capture`] and [`Tally`] cover the common cases of collecting
//! and counting.

use crate::delta::{Delta, DeltaKind};

// =============================================================================
// Effect
// =============================================================================

/// Consumer of a delta stream.
pub trait Effect<'a, T: 'a> {
    /// Called once per delta, in emission order.
    fn effect(&mut self, delta: Delta<'a, T>);
}

impl<'a, T: 'a, F> Effect<'a, T> for F
where
    F: FnMut(Delta<'a, T>),
{
    #[inline]
    fn effect(&mut self, delta: Delta<'a, T>) {
        self(delta)
    }
}

// =============================================================================
// Capture
// =============================================================================

/// Collects every delta into a `Vec`.
#[derive(Debug)]
pub struct Capture<'a, T> {
    ops: Vec<Delta<'a, T>>,
}

impl<'a, T> Capture<'a, T> {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Deltas captured so far.
    pub fn ops(&self) -> &[Delta<'a, T>] {
        &self.ops
    }

    /// Consume the capture and return its deltas.
    pub fn into_ops(self) -> Vec<Delta<'a, T>> {
        self.ops
    }
}

impl<T> Default for Capture<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: 'a> Effect<'a, T> for Capture<'a, T> {
    #[inline]
    fn effect(&mut self, delta: Delta<'a, T>) {
        self.ops.push(delta);
    }
}

// =============================================================================
// Tally
// =============================================================================

/// Statistics from a reconciliation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DiffStats {
    /// Number of items updated in place
    pub updated: usize,
    /// Number of items created
    pub created: usize,
    /// Number of items moved
    pub moved: usize,
    /// Number of items removed
    pub removed: usize,
}

impl DiffStats {
    /// Count one delta of `kind`.
    pub fn record(&mut self, kind: DeltaKind) {
        match kind {
            DeltaKind::Create => self.created += 1,
            DeltaKind::Update => self.updated += 1,
            DeltaKind::Move => self.moved += 1,
            DeltaKind::Remove => self.removed += 1,
        }
    }

    /// Total number of structural edits (not counting updates)
    pub fn edit_count(&self) -> usize {
        self.created + self.moved + self.removed
    }

    /// Total number of deltas
    pub fn total(&self) -> usize {
        self.updated + self.edit_count()
    }

    /// Check if there are no structural changes
    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

/// Forwards every delta to an inner effect while counting them.
///
/// # Example
///
/// ```
/// use tola_reconcile::{diff, Capture, Item, Tally};
///
/// let old = [Item::keyed("a", 0), Item::keyed("b", 0)];
/// let new = [Item::keyed("b", 1)];
///
/// let mut tally = Tally::new(Capture::new());
/// diff(&old, &new, &mut tally);
///
/// let (capture, stats) = tally.into_parts();
/// assert_eq!(stats.removed, 1);
/// assert_eq!(capture.ops().len(), stats.total());
/// ```
#[derive(Debug, Default)]
pub struct Tally<S> {
    inner: S,
    stats: DiffStats,
}

impl<S> Tally<S> {
    /// Wrap an effect.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stats: DiffStats::default(),
        }
    }

    /// Counts so far.
    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    /// Borrow the wrapped effect.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the effect, dropping the counts.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Unwrap into the effect and the counts.
    pub fn into_parts(self) -> (S, DiffStats) {
        (self.inner, self.stats)
    }
}

impl<'a, T: 'a, S: Effect<'a, T>> Effect<'a, T> for Tally<S> {
    #[inline]
    fn effect(&mut self, delta: Delta<'a, T>) {
        self.stats.record(delta.kind());
        self.inner.effect(delta);
    }
}
