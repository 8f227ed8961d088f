//! tola-reconcile - Keyed children reconciliation for VDOM
//!
//! ## Core Concepts
//!
//! **Keyed diff**: given the old and new children of a parent, identified by
//! key, compute an ordered stream of `Create` / `Update` / `Move` / `Remove`
//! deltas that turns the old list into the new one. The diff is a fast
//! heuristic (prefix, reversal and suffix scans, then a key-indexed pass over
//! whatever is left), not a minimal edit script.
//!
//! **Effects**: deltas are pushed into an [`Effect`] as they are decided,
//! synchronously and in order. Destination indices are relative to the
//! consumer's partially patched state, so order matters.
//!
//! ## Modules
//! - `item`: the `Keyed` trait and a ready-made `Item`
//! - `delta`: edit operations
//! - `sink`: effects, `Capture`, `Tally`
//! - `algo`: keyed and positional diff
//! - `children`: per-parent reconciliation modes
//! - `mirror`: reference consumer applying deltas to a `Vec`
//!
//! ## Usage
//!
//! ```
//! use tola_reconcile::{diff, Delta, Item};
//!
//! let old = [Item::keyed("a", "A"), Item::keyed("b", "B")];
//! let new = [Item::keyed("b", "B"), Item::keyed("c", "C")];
//!
//! diff(&old, &new, &mut |delta: Delta<'_, Item<&str>>| match delta {
//!     Delta::Create { new, to, .. } => println!("create {:?} at {to}", new.key),
//!     Delta::Update { new, .. } => println!("update {:?}", new.key),
//!     Delta::Move { new, to, .. } => println!("move {:?} to {to}", new.key),
//!     Delta::Remove { old, .. } => println!("remove {:?}", old.key),
//! });
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Keyed items and key validation
pub mod item;

/// Edit operations
pub mod delta;

/// Effect sinks
pub mod sink;

/// Algorithms: keyed diff, positional diff
pub mod algo;

/// Children reconciliation modes
pub mod children;

/// Reference consumer
pub mod mirror;

/// Parallel batch diffing
#[cfg(feature = "parallel")]
pub mod batch;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Items
pub use item::{check_unique_keys, Item, Key, Keyed};

// Deltas and sinks
pub use delta::{Delta, DeltaKind};
pub use sink::{Capture, DiffStats, Effect, Tally};

// Algorithms
pub use algo::{diff, diff_positional, diff_to_vec, diff_with_config, DiffConfig, SuffixMatch};
pub use children::{reconcile_children, ChildrenMode};

// Mirror
pub use mirror::{reconcile_vec, Mirror};

#[cfg(feature = "parallel")]
pub use batch::diff_batch;

// Error types
pub use error::{ReconcileError, ReconcileResult};

// =============================================================================
// Tests
// =============================================================================
