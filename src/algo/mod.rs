//! Algorithm implementations for sequence reconciliation.
//!
//! - `diff`: phased keyed diff (prefix, reversals, suffix, key-indexed middle)
//! - `positional`: index-by-index diff for unkeyed children
//! - `bitset`: moved-set used by the middle pass
//! - `key_index`: key lookup scoped to the unmatched middle window

mod bitset;
mod diff;
mod key_index;
mod positional;

pub use diff::{diff, diff_to_vec, diff_with_config, DiffConfig, SuffixMatch};
pub use positional::diff_positional;
