//! Positional diff for unkeyed children.
//!
//! Items are paired by index only. Old items are visited from last to first,
//! so removals past the end of the new sequence never shift an index that is
//! still to be visited. Surplus new items are appended afterwards.

use tracing::debug;

use crate::delta::Delta;
use crate::sink::Effect;

/// Diff two sequences by position, ignoring keys.
///
/// - `old[i]` with a counterpart `new[i]` → `Update`
/// - `old[i]` past the end of `new` → `Remove`
/// - `new[i]` past the end of `old` → `Create` at `i`
pub fn diff_positional<'a, T, E>(old: &'a [T], new: &'a [T], effect: &mut E)
where
    E: Effect<'a, T> + ?Sized,
{
    debug!(old_len = old.len(), new_len = new.len(), "positional diff");

    for (old_idx, old_item) in old.iter().enumerate().rev() {
        match new.get(old_idx) {
            Some(new_item) => effect.effect(Delta::Update {
                old: old_item,
                old_idx,
                new: new_item,
                new_idx: old_idx,
            }),
            None => effect.effect(Delta::Remove {
                old: old_item,
                old_idx,
            }),
        }
    }

    for (new_idx, new_item) in new.iter().enumerate().skip(old.len()) {
        effect.effect(Delta::Create {
            new: new_item,
            new_idx,
            to: new_idx,
        });
    }
}
