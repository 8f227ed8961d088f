//! Keyed Sequence Diff
//!
//! Reconciles an old and a new sequence of keyed items into an ordered stream
//! of [`Delta`]s. This is a **pure algorithm module**: it reads both
//! sequences, pushes deltas into an [`Effect`], and keeps no state once it
//! returns.
//!
//! # Algorithm
//!
//! Two-pointer scans trim the sequences from both ends before any lookup
//! structure is built:
//!
//! 1. **Prefix**: same key at both heads → `Update`
//! 2. **Forward reversal**: old head matches new tail → `Move` to the back
//! 3. **Backward reversal**: new head matches old tail → `Move` to the front
//! 4. **Suffix**: both tails match → `Update`
//!
//! If one side is exhausted the rest of the other side is all `Create` or all
//! `Remove`. Otherwise the unmatched middle is diffed through a key index
//! built over the old window only, and removals are derived from the length
//! balance, so old items are never scanned a second time.
//!
//! The result is not a minimal edit script. It is tuned for stable
//! prefixes/suffixes, reversals, and sparse inserts, removes and reorders.
//!
//! # Complexity
//!
//! - Time: O(n + m)
//! - Space: O(u) for the key index and moved set, u = unmatched old window

use tracing::{debug, trace};

use crate::delta::Delta;
use crate::item::{Keyed, same_key};
use crate::sink::{Capture, Effect};

use super::bitset::MovedSet;
use super::key_index::KeyIndex;

// =============================================================================
// Configuration
// =============================================================================

/// When the suffix scan may pair the two tails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixMatch {
    /// Both tails carry a key and the keys are equal
    #[default]
    KeyEquality,
    /// Both tails carry a key, equal or not.
    ///
    /// Trusts the caller that the tails are aligned. Unequal tails are
    /// reported as an `Update` from one key to another.
    KeysPresent,
}

/// Configuration for the keyed diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffConfig {
    /// Pairing rule for the common-suffix scan.
    /// Default: [`SuffixMatch::KeyEquality`]
    pub suffix: SuffixMatch,
}

impl DiffConfig {
    /// Create config with a custom suffix rule.
    pub fn new(suffix: SuffixMatch) -> Self {
        Self { suffix }
    }

    /// Config that only requires both tails to be keyed in the suffix scan.
    pub fn keys_present() -> Self {
        Self::new(SuffixMatch::KeysPresent)
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Diff two keyed sequences, pushing every delta into `effect`.
///
/// Keys must be unique within each sequence. Duplicates are not detected; use
/// [`check_unique_keys`](crate::check_unique_keys) when that is not
/// guaranteed.
///
/// # Example
///
/// ```
/// use tola_reconcile::{diff, Capture, DeltaKind, Item};
///
/// let old = [Item::keyed("a", 1), Item::keyed("b", 2), Item::keyed("c", 3)];
/// let new = [Item::keyed("c", 3), Item::keyed("a", 1), Item::keyed("b", 2)];
///
/// let mut capture = Capture::new();
/// diff(&old, &new, &mut capture);
///
/// let kinds: Vec<_> = capture.ops().iter().map(|d| d.kind()).collect();
/// assert_eq!(kinds, [DeltaKind::Move, DeltaKind::Update, DeltaKind::Update]);
/// ```
pub fn diff<'a, T, E>(old: &'a [T], new: &'a [T], effect: &mut E)
where
    T: Keyed,
    E: Effect<'a, T> + ?Sized,
{
    diff_with_config(old, new, DiffConfig::default(), effect)
}

/// Diff two keyed sequences with custom configuration.
pub fn diff_with_config<'a, T, E>(old: &'a [T], new: &'a [T], config: DiffConfig, effect: &mut E)
where
    T: Keyed,
    E: Effect<'a, T> + ?Sized,
{
    debug!(old_len = old.len(), new_len = new.len(), suffix = ?config.suffix, "keyed diff");
    DiffContext::new(old, new, config, effect).run();
}

/// Diff two keyed sequences and collect the deltas.
pub fn diff_to_vec<'a, T: Keyed>(old: &'a [T], new: &'a [T]) -> Vec<Delta<'a, T>> {
    let mut capture = Capture::new();
    diff(old, new, &mut capture);
    capture.into_ops()
}

// =============================================================================
// Internal Context
// =============================================================================

/// Cursor state of one invocation.
///
/// Windows are half-open: `old[old_start..old_end]` and
/// `new[new_start..new_end]` are still unprocessed.
struct DiffContext<'a, 'e, T, E: ?Sized> {
    old: &'a [T],
    new: &'a [T],
    config: DiffConfig,
    effect: &'e mut E,
    old_start: usize,
    old_end: usize,
    new_start: usize,
    new_end: usize,
    /// Net displacement of the old window caused by the reversal scans
    moved_from_front: isize,
    /// Deltas emitted by the current phase
    emitted: usize,
}

impl<'a, 'e, T, E> DiffContext<'a, 'e, T, E>
where
    T: Keyed,
    E: Effect<'a, T> + ?Sized,
{
    fn new(old: &'a [T], new: &'a [T], config: DiffConfig, effect: &'e mut E) -> Self {
        Self {
            old,
            new,
            config,
            effect,
            old_start: 0,
            old_end: old.len(),
            new_start: 0,
            new_end: new.len(),
            moved_from_front: 0,
            emitted: 0,
        }
    }

    fn run(mut self) {
        self.common_prefix();

        // Unchanged lists are by far the most common case
        if self.old_done() && self.new_done() {
            return;
        }

        self.forward_reversal();
        self.backward_reversal();
        self.common_suffix();

        if self.old_done() {
            self.create_rest();
        } else if self.new_done() {
            self.remove_rest();
        } else {
            self.diff_middle();
        }
    }

    #[inline]
    fn old_done(&self) -> bool {
        self.old_start >= self.old_end
    }

    #[inline]
    fn new_done(&self) -> bool {
        self.new_start >= self.new_end
    }

    #[inline]
    fn in_range(&self) -> bool {
        !self.old_done() && !self.new_done()
    }

    #[inline]
    fn emit(&mut self, delta: Delta<'a, T>) {
        self.emitted += 1;
        self.effect.effect(delta);
    }

    fn end_phase(&mut self, phase: &'static str) {
        if self.emitted > 0 {
            trace!(
                phase,
                ops = self.emitted,
                old = ?(self.old_start..self.old_end),
                new = ?(self.new_start..self.new_end),
                "phase done"
            );
        }
        self.emitted = 0;
    }

    /// Same key at both heads.
    fn common_prefix(&mut self) {
        let (old, new) = (self.old, self.new);
        while self.in_range() && same_key(&old[self.old_start], &new[self.new_start]) {
            self.emit(Delta::Update {
                old: &old[self.old_start],
                old_idx: self.old_start,
                new: &new[self.new_start],
                new_idx: self.new_start,
            });
            self.old_start += 1;
            self.new_start += 1;
        }
        self.end_phase("prefix");
    }

    /// Old head relocated to the new tail.
    fn forward_reversal(&mut self) {
        let (old, new) = (self.old, self.new);
        while self.in_range() && same_key(&old[self.old_start], &new[self.new_end - 1]) {
            let to = (self.old_end as isize - self.moved_from_front) as usize;
            self.emit(Delta::Move {
                old: &old[self.old_start],
                old_idx: self.old_start,
                new: &new[self.new_end - 1],
                new_idx: self.new_end - 1,
                to,
            });
            self.old_start += 1;
            self.new_end -= 1;
            self.moved_from_front += 1;
        }
        self.end_phase("forward-reversal");
    }

    /// Old tail relocated to the new head (reverse and append).
    fn backward_reversal(&mut self) {
        let (old, new) = (self.old, self.new);
        while self.in_range() && same_key(&new[self.new_start], &old[self.old_end - 1]) {
            self.emit(Delta::Move {
                old: &old[self.old_end - 1],
                old_idx: self.old_end - 1,
                new: &new[self.new_start],
                new_idx: self.new_start,
                to: self.new_start,
            });
            self.old_end -= 1;
            self.new_start += 1;
            self.moved_from_front -= 1;
        }
        self.end_phase("backward-reversal");
    }

    fn suffix_matches(&self, old: &T, new: &T) -> bool {
        match self.config.suffix {
            SuffixMatch::KeyEquality => same_key(old, new),
            SuffixMatch::KeysPresent => old.key().is_some() && new.key().is_some(),
        }
    }

    /// Same key at both tails.
    fn common_suffix(&mut self) {
        let (old, new) = (self.old, self.new);
        while self.in_range()
            && self.suffix_matches(&old[self.old_end - 1], &new[self.new_end - 1])
        {
            self.emit(Delta::Update {
                old: &old[self.old_end - 1],
                old_idx: self.old_end - 1,
                new: &new[self.new_end - 1],
                new_idx: self.new_end - 1,
            });
            self.old_end -= 1;
            self.new_end -= 1;
        }
        self.end_phase("suffix");
    }

    /// Old window exhausted: everything left in new is created in place.
    fn create_rest(&mut self) {
        let new = self.new;
        for new_idx in self.new_start..self.new_end {
            self.emit(Delta::Create {
                new: &new[new_idx],
                new_idx,
                to: new_idx,
            });
        }
        self.new_start = self.new_end;
        self.end_phase("create-rest");
    }

    /// New window exhausted: everything left in old goes.
    fn remove_rest(&mut self) {
        let old = self.old;
        for old_idx in self.old_start..self.old_end {
            self.emit(Delta::Remove {
                old: &old[old_idx],
                old_idx,
            });
        }
        self.old_start = self.old_end;
        self.end_phase("remove-rest");
    }

    /// Both windows non-empty: key-indexed pass over the new window, then the
    /// bounded removal pass over the old window.
    fn diff_middle(&mut self) {
        let (old, new) = (self.old, self.new);
        let keys = KeyIndex::build(old, self.old_start..self.old_end);
        let mut moved = MovedSet::new(self.old_start, self.old_end - self.old_start);

        // Running insertion point for creates and moves
        let mut pivot_idx = (self.old_start as isize - self.moved_from_front) as usize;
        let mut created = 0usize;
        // New position of the old item still heading the window, if it survives
        let mut pivot_dest = None;

        for new_idx in self.new_start..self.new_end {
            let item = &new[new_idx];
            match item.key().and_then(|key| keys.get(key)) {
                None => {
                    self.emit(Delta::Create {
                        new: item,
                        new_idx,
                        to: pivot_idx,
                    });
                    pivot_idx += 1;
                    created += 1;
                }
                Some(old_idx) if old_idx != self.old_start => {
                    self.emit(Delta::Move {
                        old: &old[old_idx],
                        old_idx,
                        new: item,
                        new_idx,
                        to: pivot_idx,
                    });
                    pivot_idx += 1;
                    moved.insert(old_idx);
                }
                Some(_) => pivot_dest = Some(new_idx),
            }
        }

        // The pivot goes last: its destination only holds once every other
        // create/move of this pass has claimed its slot.
        if let Some(dest) = pivot_dest {
            moved.insert(self.old_start);
            self.emit(Delta::Move {
                old: &old[self.old_start],
                old_idx: self.old_start,
                new: &new[dest],
                new_idx: dest,
                to: dest,
            });
        }
        trace!(keys = keys.len(), created, consumed = moved.count(), "middle indexed");
        self.end_phase("middle");

        // Every create needs one more removal than the length balance alone
        let necessary = old.len() as isize - new.len() as isize + created as isize;
        let mut removals = 0isize;
        for old_idx in self.old_start..self.old_end {
            if removals >= necessary {
                break;
            }
            if !moved.contains(old_idx) {
                self.emit(Delta::Remove {
                    old: &old[old_idx],
                    old_idx,
                });
                removals += 1;
            }
        }
        self.end_phase("removals");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaKind;
    use crate::item::{Item, Key};

    /// One item per char; `_` is an unkeyed item.
    fn items(keys: &str, value: u32) -> Vec<Item<u32>> {
        keys.chars()
            .map(|c| match c {
                '_' => Item::unkeyed(value),
                c => Item::keyed(c.to_string(), value),
            })
            .collect()
    }

    /// Compact rendering of a delta stream: `U0>1`, `M2>0@0`, `C1@1`, `R3`.
    fn script(ops: &[Delta<'_, Item<u32>>]) -> Vec<String> {
        ops.iter()
            .map(|op| match *op {
                Delta::Create { new_idx, to, .. } => format!("C{new_idx}@{to}"),
                Delta::Update { old_idx, new_idx, .. } => format!("U{old_idx}>{new_idx}"),
                Delta::Move { old_idx, new_idx, to, .. } => format!("M{old_idx}>{new_idx}@{to}"),
                Delta::Remove { old_idx, .. } => format!("R{old_idx}"),
            })
            .collect()
    }

    fn run(old: &str, new: &str) -> Vec<String> {
        let old = items(old, 0);
        let new = items(new, 1);
        script(&diff_to_vec(&old, &new))
    }

    #[test]
    fn test_empty_sequences() {
        assert!(run("", "").is_empty());
    }

    #[test]
    fn test_identical_is_all_updates() {
        assert_eq!(run("abcd", "abcd"), ["U0>0", "U1>1", "U2>2", "U3>3"]);
    }

    #[test]
    fn test_remove_all() {
        assert_eq!(run("abc", ""), ["R0", "R1", "R2"]);
    }

    #[test]
    fn test_create_all() {
        assert_eq!(run("", "xy"), ["C0@0", "C1@1"]);
    }

    #[test]
    fn test_duplicate_key_matches_last_and_removes_rest() {
        // a moves to the back, then the window is `bcb` against `dbc`:
        // `b` resolves to old 3, the earlier `b` at old 1 is removed
        assert_eq!(run("abcb", "dbca"), ["M0>3@4", "C0@0", "M3>1@1", "M2>2@2", "R1"]);

        let old = items("abcb", 0);
        let new = items("dbca", 1);
        let out = crate::mirror::reconcile_vec(&old, &new).unwrap();
        assert_eq!(out, new);
    }

    #[test]
    fn test_rotate_right_uses_backward_reversal() {
        // c jumps to the front, the rest is a common suffix
        assert_eq!(run("abc", "cab"), ["M2>0@0", "U1>2", "U0>1"]);
    }

    #[test]
    fn test_rotate_left_uses_forward_reversal() {
        assert_eq!(run("abc", "bca"), ["M0>2@3", "U2>1", "U1>0"]);
    }

    #[test]
    fn test_full_reversal() {
        assert_eq!(run("abcd", "dcba"), ["M0>3@4", "M1>2@3", "M2>1@2", "M3>0@1"]);
    }

    #[test]
    fn test_prefix_then_reversal() {
        assert_eq!(run("abcde", "aedcb"), ["U0>0", "M1>4@5", "M2>3@4", "M3>2@3", "M4>1@2"]);
    }

    #[test]
    fn test_remove_one_create_one() {
        assert_eq!(run("abcd", "acde"), ["U0>0", "M2>1@1", "M3>2@2", "C3@3", "R1"]);
    }

    #[test]
    fn test_replace_head() {
        assert_eq!(run("abc", "xbc"), ["U2>2", "U1>1", "C0@0", "R0"]);
    }

    #[test]
    fn test_pivot_move_is_emitted_last() {
        // `a` heads the middle window and survives: its move comes after the others
        assert_eq!(run("abcd", "bdac"), ["M1>0@0", "M3>1@1", "M2>3@2", "M0>2@2"]);
    }

    #[test]
    fn test_middle_shuffle_with_suffix() {
        assert_eq!(
            run("abcdef", "afcdbe"),
            ["U0>0", "M5>1@1", "U4>5", "M2>2@2", "M3>3@3", "M1>4@4"]
        );
    }

    #[test]
    fn test_unkeyed_items_never_match() {
        // Two unkeyed items are not the same item
        assert_eq!(run("_", "_"), ["C0@0", "R0"]);
    }

    #[test]
    fn test_unkeyed_item_between_keyed() {
        let ops = run("a_b", "a_b");
        assert_eq!(ops.first().map(String::as_str), Some("U0>0"));
        assert!(ops.contains(&"R1".to_string()));
        assert!(ops.contains(&"C1@1".to_string()));
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn test_update_carries_new_content() {
        let old = items("ab", 0);
        let new = items("ab", 7);
        for op in diff_to_vec(&old, &new) {
            assert_eq!(op.new_item().map(|item| item.value), Some(7));
            assert_eq!(op.old_item().map(|item| item.value), Some(0));
        }
    }

    #[test]
    fn test_removal_pass_stops_at_balance() {
        // Nothing created and lengths match, so the middle pass removes nothing
        for (old, new) in [("abcd", "bdac"), ("abcdef", "afcdbe")] {
            let ops = run(old, new);
            assert!(ops.iter().all(|op| !op.starts_with('R')), "{ops:?}");
        }
    }

    #[test]
    fn test_suffix_key_equality_is_default() {
        assert_eq!(DiffConfig::default().suffix, SuffixMatch::KeyEquality);
        assert_eq!(run("ab", "cb"), ["U1>1", "C0@0", "R0"]);
    }

    #[test]
    fn test_suffix_keys_present_pairs_unequal_tails() {
        let old = items("ab", 0);
        let new = items("cb", 1);
        let mut capture = Capture::new();
        diff_with_config(&old, &new, DiffConfig::keys_present(), &mut capture);

        let ops = capture.into_ops();
        assert_eq!(script(&ops), ["U1>1", "U0>0"]);
        assert!(ops.iter().all(|op| op.kind() == DeltaKind::Update));
    }

    #[test]
    fn test_closure_effect() {
        let old = items("abc", 0);
        let new = items("ac", 0);
        let mut removed = Vec::new();
        diff(&old, &new, &mut |delta: Delta<'_, Item<u32>>| {
            if let Delta::Remove { old, .. } = delta {
                removed.push(old.key.clone());
            }
        });
        assert_eq!(removed, vec![Some(Key::from("b"))]);
    }
}
