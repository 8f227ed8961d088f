//! Parallel batch diffing (feature `parallel`).
//!
//! Each pair is diffed independently on the rayon pool. A single diff stays
//! sequential; only separate invocations run concurrently, and each one keeps
//! its own emission order.

use rayon::prelude::*;
use tracing::debug;

use crate::algo::diff_to_vec;
use crate::delta::Delta;
use crate::item::Keyed;

/// Diff many independent `(old, new)` pairs in parallel.
///
/// Returns one delta stream per pair, in input order.
pub fn diff_batch<'a, T>(pairs: &[(&'a [T], &'a [T])]) -> Vec<Vec<Delta<'a, T>>>
where
    T: Keyed + Sync,
{
    debug!(pairs = pairs.len(), "batch diff");
    pairs
        .par_iter()
        .map(|&(old, new)| diff_to_vec(old, new))
        .collect()
}
