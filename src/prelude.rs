//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_reconcile::prelude::*;
//! ```

// Items
pub use crate::item::{check_unique_keys, Item, Key, Keyed};

// Deltas and sinks
pub use crate::delta::{Delta, DeltaKind};
pub use crate::sink::{Capture, DiffStats, Effect, Tally};

// Algorithms
pub use crate::algo::{
    diff, diff_positional, diff_to_vec, diff_with_config, DiffConfig, SuffixMatch,
};
pub use crate::children::{reconcile_children, ChildrenMode};

// Mirror
pub use crate::mirror::{reconcile_vec, Mirror};

// Error
pub use crate::error::{ReconcileError, ReconcileResult};

#[cfg(feature = "parallel")]
pub use crate::batch::diff_batch;
