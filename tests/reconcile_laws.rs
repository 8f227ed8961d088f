//! Property-based tests for keyed reconciliation.
//!
//! For any two sequences with unique keys per sequence:
//!
//! 1. **Reconstruction**: applying the delta stream to a mirror of `old`
//!    yields `new`, in order and content.
//! 2. **Coverage**: every old index and every new index is touched by exactly
//!    one delta.
//! 3. **No collision**: no key is both created and removed.
//! 4. **Identity**: diffing a keyed sequence against itself emits only
//!    updates, in index order.

use std::collections::HashSet;

use proptest::prelude::*;
use tola_reconcile::{
    diff, diff_to_vec, diff_with_config, reconcile_vec, Capture, Delta, DeltaKind, DiffConfig,
    Item, Mirror, Tally,
};

const POOL: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
];

// =============================================================================
// Strategies
// =============================================================================

/// Distinct keys from `POOL` in random order.
fn unique_keys() -> impl Strategy<Value = Vec<char>> {
    prop::sample::subsequence(POOL.to_vec(), 0..=POOL.len()).prop_shuffle()
}

/// Fully keyed items; `value` tags the side so content changes are visible.
fn keyed_items(value: u32) -> impl Strategy<Value = Vec<Item<u32>>> {
    unique_keys().prop_map(move |keys| {
        keys.into_iter()
            .enumerate()
            .map(|(idx, key)| Item::keyed(key.to_string(), value + idx as u32))
            .collect()
    })
}

/// Keyed items with some keys dropped.
fn mixed_items(value: u32) -> impl Strategy<Value = Vec<Item<u32>>> {
    let flags = prop::collection::vec(any::<bool>(), POOL.len());
    (unique_keys(), flags).prop_map(move |(keys, flags)| {
        keys.into_iter()
            .zip(flags)
            .enumerate()
            .map(|(idx, (key, unkeyed))| {
                let value = value + idx as u32;
                if unkeyed {
                    Item::unkeyed(value)
                } else {
                    Item::keyed(key.to_string(), value)
                }
            })
            .collect()
    })
}

fn items(keys: &str, value: u32) -> Vec<Item<u32>> {
    keys.chars().map(|c| Item::keyed(c.to_string(), value)).collect()
}

fn key_string(items: &[Item<u32>]) -> String {
    items
        .iter()
        .map(|item| item.key.as_deref().unwrap_or("_"))
        .collect()
}

fn kinds(deltas: &[Delta<'_, Item<u32>>]) -> Vec<DeltaKind> {
    deltas.iter().map(Delta::kind).collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_reconstruction(old in keyed_items(0), new in keyed_items(100)) {
        prop_assert_eq!(reconcile_vec(&old, &new), Ok(new.clone()));
    }

    #[test]
    fn prop_reconstruction_with_unkeyed(old in mixed_items(0), new in mixed_items(100)) {
        prop_assert_eq!(reconcile_vec(&old, &new), Ok(new.clone()));
    }

    #[test]
    fn prop_reconstruction_keys_present(old in keyed_items(0), new in keyed_items(100)) {
        let mut capture = Capture::new();
        diff_with_config(&old, &new, DiffConfig::keys_present(), &mut capture);

        let mut mirror = Mirror::new(&old);
        prop_assert_eq!(mirror.apply_all(capture.into_ops()), Ok(()));
        prop_assert_eq!(mirror.finish(), Ok(new.clone()));
    }

    #[test]
    fn prop_coverage(old in mixed_items(0), new in mixed_items(100)) {
        let deltas = diff_to_vec(&old, &new);

        let mut olds: Vec<usize> = deltas.iter().filter_map(Delta::old_idx).collect();
        let mut news: Vec<usize> = deltas.iter().filter_map(Delta::new_idx).collect();
        olds.sort_unstable();
        news.sort_unstable();

        prop_assert_eq!(olds, (0..old.len()).collect::<Vec<_>>());
        prop_assert_eq!(news, (0..new.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_no_create_remove_collision(old in keyed_items(0), new in keyed_items(100)) {
        let deltas = diff_to_vec(&old, &new);

        let created: HashSet<_> = deltas
            .iter()
            .filter(|delta| delta.kind() == DeltaKind::Create)
            .filter_map(|delta| delta.new_item().and_then(|item| item.key.clone()))
            .collect();
        let removed: HashSet<_> = deltas
            .iter()
            .filter(|delta| delta.kind() == DeltaKind::Remove)
            .filter_map(|delta| delta.old_item().and_then(|item| item.key.clone()))
            .collect();

        prop_assert!(created.is_disjoint(&removed), "created {:?} removed {:?}", created, removed);
    }

    #[test]
    fn prop_identity_emits_updates_in_order(seq in keyed_items(0)) {
        let deltas = diff_to_vec(&seq, &seq);

        prop_assert_eq!(deltas.len(), seq.len());
        for (idx, delta) in deltas.iter().enumerate() {
            prop_assert!(delta.is_update());
            prop_assert_eq!(delta.old_idx(), Some(idx));
            prop_assert_eq!(delta.new_idx(), Some(idx));
        }
    }

    #[test]
    fn prop_stats_balance(old in mixed_items(0), new in mixed_items(100)) {
        let mut tally = Tally::new(|_: Delta<'_, Item<u32>>| {});
        diff(&old, &new, &mut tally);
        let stats = tally.stats();

        prop_assert_eq!(stats.updated + stats.moved + stats.removed, old.len());
        prop_assert_eq!(stats.updated + stats.moved + stats.created, new.len());
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_to_empty_emits_nothing() {
    let empty: Vec<Item<u32>> = Vec::new();
    assert!(diff_to_vec(&empty, &empty).is_empty());
}

#[test]
fn test_identical_sequences_update_in_order() {
    let old = items("abcd", 0);
    let new = items("abcd", 1);
    let deltas = diff_to_vec(&old, &new);

    assert_eq!(kinds(&deltas), [DeltaKind::Update; 4]);
    for (idx, delta) in deltas.iter().enumerate() {
        assert_eq!(delta.old_idx(), Some(idx));
        assert_eq!(delta.new_idx(), Some(idx));
    }
}

#[test]
fn test_clear_removes_everything() {
    let old = items("abc", 0);
    let deltas = diff_to_vec(&old, &[]);

    assert_eq!(kinds(&deltas), [DeltaKind::Remove; 3]);
    let removed: String = deltas
        .iter()
        .filter_map(|delta| delta.old_item())
        .filter_map(|item| item.key.as_deref())
        .collect();
    assert_eq!(removed, "abc");
}

#[test]
fn test_fill_creates_at_increasing_positions() {
    let new = items("xy", 1);
    let deltas = diff_to_vec(&[], &new);

    assert_eq!(kinds(&deltas), [DeltaKind::Create; 2]);
    assert_eq!(deltas.iter().map(Delta::dest).collect::<Vec<_>>(), [Some(0), Some(1)]);
}

#[test]
fn test_rotation_reconstructs() {
    let old = items("abc", 0);
    let new = items("cab", 1);

    let out = reconcile_vec(&old, &new).unwrap();
    assert_eq!(key_string(&out), "cab");
    assert!(!kinds(&diff_to_vec(&old, &new)).contains(&DeltaKind::Create));
}

#[test]
fn test_replace_one_removes_and_creates_once() {
    let old = items("abcd", 0);
    let new = items("acde", 1);
    let deltas = diff_to_vec(&old, &new);

    let removes: Vec<_> = deltas.iter().filter(|d| d.kind() == DeltaKind::Remove).collect();
    let creates: Vec<_> = deltas.iter().filter(|d| d.kind() == DeltaKind::Create).collect();
    assert_eq!(removes.len(), 1);
    assert_eq!(creates.len(), 1);
    assert_eq!(removes[0].old_item().and_then(|i| i.key.as_deref()), Some("b"));
    assert_eq!(creates[0].new_item().and_then(|i| i.key.as_deref()), Some("e"));

    assert_eq!(key_string(&reconcile_vec(&old, &new).unwrap()), "acde");
}
