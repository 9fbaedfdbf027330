use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_set::{RBTreeSet, rbtree_set};
use simplelog::{Config, LevelFilter, TestLogger};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Routes the tree's log records into the test output. Rebalancing steps are
/// only shown when `RBTREE_TRACE` is set, since the randomized tests produce
/// millions of them.
fn init_logging() {
    let level = if std::env::var_os("RBTREE_TRACE").is_some() {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    let _ = TestLogger::init(level, Config::default());
}

/// Values in a range narrow enough that inserts and removes collide.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn contents<T: Copy>(set: &RBTreeSet<T>) -> Vec<T> {
    set.iter().copied().collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

// ─── Differential tests against BTreeSet ─────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays random operations on both sets, asserting identical results and
    /// a structurally valid tree at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => prop_assert_eq!(rb_set.insert(*v), bt_set.insert(*v), "insert({})", v),
                SetOp::Remove(v) => prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v),
                SetOp::Contains(v) => prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v),
                SetOp::First => prop_assert_eq!(rb_set.first(), bt_set.first()),
                SetOp::Last => prop_assert_eq!(rb_set.last(), bt_set.last()),
                SetOp::PopFirst => prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first()),
                SetOp::PopLast => prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last()),
            }
            prop_assert_eq!(rb_set.validate(), Ok(()), "invalid after {:?}", op);
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }

        prop_assert_eq!(contents(&rb_set), bt_set.iter().copied().collect::<Vec<_>>());
    }

    /// Iteration in both directions matches BTreeSet.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert_eq!(rb_set.iter().len(), bt_set.len());
        prop_assert!(rb_set.iter().eq(bt_set.iter()), "iter() mismatch");
        prop_assert!(rb_set.iter().rev().eq(bt_set.iter().rev()), "iter().rev() mismatch");
        prop_assert!(rb_set.clone().into_iter().eq(bt_set.clone().into_iter()), "into_iter() mismatch");
        prop_assert!(rb_set.into_iter().rev().eq(bt_set.into_iter().rev()), "into_iter().rev() mismatch");
    }

    /// Membership after inserting S and deleting D is exactly S \ D.
    #[test]
    fn membership_is_set_difference(
        inserted in proptest::collection::btree_set(value_strategy(), 0..1_000),
        deleted in proptest::collection::btree_set(value_strategy(), 0..1_000),
    ) {
        let mut set: RBTreeSet<i64> = inserted.iter().copied().collect();
        for v in &deleted {
            set.remove(v);
        }
        prop_assert_eq!(set.validate(), Ok(()));

        let expected: BTreeSet<i64> = inserted.difference(&deleted).copied().collect();
        prop_assert_eq!(set.len(), expected.len());
        for v in -2_000i64..2_000 {
            prop_assert_eq!(set.contains(&v), expected.contains(&v), "contains({})", v);
        }
    }

    /// The sequence is strictly increasing after any mix of inserts and removes.
    #[test]
    fn sequence_is_strictly_increasing(ops in proptest::collection::vec(set_op_strategy(), 0..2_000)) {
        let mut set = RBTreeSet::new();
        for op in ops {
            match op {
                SetOp::Insert(v) => { set.insert(v); }
                SetOp::Remove(v) => { set.remove(&v); }
                _ => {}
            }
        }
        let items = contents(&set);
        prop_assert!(items.windows(2).all(|w| w[0] < w[1]));
    }

    /// Height stays within the red-black bound.
    #[test]
    fn height_is_bounded(values in proptest::collection::vec(any::<i64>(), 1..TEST_SIZE)) {
        let set: RBTreeSet<i64> = values.into_iter().collect();
        let bound = 2.0 * ((set.len() + 1) as f64).log2();
        prop_assert!(set.height() as f64 <= bound, "height {} > {}", set.height(), bound);
    }

    /// `retain` agrees with BTreeSet and leaves a valid tree.
    #[test]
    fn retain_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE), modulus in 2i64..7) {
        let mut rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();

        rb_set.retain(|v| v % modulus != 0);
        bt_set.retain(|v| v % modulus != 0);

        prop_assert_eq!(rb_set.validate(), Ok(()));
        prop_assert!(rb_set.iter().eq(bt_set.iter()));
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn new_set_is_empty() {
    let set: RBTreeSet<i32> = RBTreeSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.iter().next(), None);
    assert_eq!(set.height(), 0);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn round_trip() {
    init_logging();
    let mut set = RBTreeSet::from([50, 25, 75, 10, 30, 60, 80]);
    assert_eq!(set.len(), 7);

    assert!(set.remove(&25));
    assert!(!set.contains(&25));
    assert_eq!(set.len(), 6);
    assert_eq!(contents(&set), vec![10, 30, 50, 60, 75, 80]);

    assert!(set.insert(25));
    assert_eq!(set.len(), 7);
    assert!(set.contains(&25));
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn stress_remove_multiples_of_three() {
    init_logging();
    let mut set: RBTreeSet<i32> = (1..=100).collect();
    for k in (3..=100).step_by(3) {
        assert!(set.remove(&k));
        assert_eq!(set.validate(), Ok(()));
    }

    let expected: Vec<i32> = (1..=100).filter(|k| k % 3 != 0).collect();
    let items = contents(&set);
    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(items, expected);
    assert_eq!(items, sorted);
}

#[test]
fn extremes_coexist() {
    let mut set = RBTreeSet::new();
    for v in [0, i64::MAX, i64::MIN] {
        set.insert(v);
    }
    assert_eq!(contents(&set), vec![i64::MIN, 0, i64::MAX]);
    assert!(set.contains(&i64::MIN));
    assert!(set.contains(&i64::MAX));
    assert!(set.contains(&0));

    assert!(set.remove(&i64::MIN));
    assert_eq!(contents(&set), vec![0, i64::MAX]);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn removing_root_of_three_keeps_both_children() {
    let mut set = RBTreeSet::from([10, 5, 15]);
    assert!(set.remove(&10));
    assert_eq!(set.len(), 2);
    assert!(set.contains(&5));
    assert!(set.contains(&15));
    assert_eq!(contents(&set), vec![5, 15]);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn removing_leaf_single_child_and_two_children() {
    let mut set = RBTreeSet::from([10, 5, 15, 3, 7]);
    assert!(set.remove(&3));
    assert_eq!(contents(&set), vec![5, 7, 10, 15]);

    let mut set = RBTreeSet::from([10, 5, 15, 3]);
    assert!(set.remove(&5));
    assert_eq!(contents(&set), vec![3, 10, 15]);

    let mut set = RBTreeSet::from([10, 5, 15, 3, 7, 13, 17]);
    assert!(set.remove(&5));
    assert_eq!(contents(&set), vec![3, 7, 10, 13, 15, 17]);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn duplicate_insert_is_idempotent() {
    let mut set = RBTreeSet::from([3, 1, 2]);
    let before = set.clone();
    assert!(!set.insert(2));
    assert_eq!(set.len(), 3);
    assert_eq!(set, before);
    assert_eq!(set.height(), before.height());
}

#[test]
fn removing_absent_value_is_a_no_op() {
    let mut set = RBTreeSet::from([1, 2, 3]);
    let before = set.clone();
    assert!(!set.remove(&4));
    assert_eq!(set.take(&4), None);
    assert_eq!(set, before);

    let mut empty: RBTreeSet<i32> = RBTreeSet::new();
    assert!(!empty.remove(&1));
    assert!(empty.is_empty());
}

#[test]
fn ascending_and_descending_inserts() {
    init_logging();
    let ascending: RBTreeSet<i32> = (1..=1_000).collect();
    let descending: RBTreeSet<i32> = (1..=1_000).rev().collect();
    assert_eq!(ascending, descending);
    assert_eq!(ascending.validate(), Ok(()));
    assert_eq!(descending.validate(), Ok(()));
    assert!(ascending.height() <= 20);
    assert!(descending.height() <= 20);
}

#[test]
fn drain_from_both_ends() {
    let mut set: RBTreeSet<i32> = (0..64).collect();
    let mut low = Vec::new();
    let mut high = Vec::new();
    while !set.is_empty() {
        low.extend(set.pop_first());
        high.extend(set.pop_last());
        assert_eq!(set.validate(), Ok(()));
    }
    assert_eq!(low, (0..32).collect::<Vec<_>>());
    assert_eq!(high, (32..64).rev().collect::<Vec<_>>());
}

#[test]
fn iteration_restarts_from_current_contents() {
    let mut set = RBTreeSet::from([2, 4, 6]);
    assert_eq!(contents(&set), vec![2, 4, 6]);
    assert_eq!(contents(&set), vec![2, 4, 6]);
    set.insert(5);
    assert_eq!(contents(&set), vec![2, 4, 5, 6]);
}

#[test]
fn borrowed_lookup() {
    let set: RBTreeSet<String> = ["pear", "apple", "fig"].into_iter().map(String::from).collect();
    assert!(set.contains("fig"));
    assert_eq!(set.get("apple").map(String::as_str), Some("apple"));
    assert_eq!(set.first().map(String::as_str), Some("apple"));
    assert_eq!(set.last().map(String::as_str), Some("pear"));
}

#[test]
fn owning_iterator_is_exact_and_double_ended() {
    let set = RBTreeSet::from([5, 1, 4, 2, 3]);
    let mut iter = set.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4]);

    let empty: rbtree_set::IntoIter<u8> = Default::default();
    assert_eq!(empty.len(), 0);
}

#[test]
fn extend_from_references() {
    let mut set = RBTreeSet::new();
    set.extend(&[3, 1, 2]);
    set.extend(vec![2, 5]);
    assert_eq!(contents(&set), vec![1, 2, 3, 5]);
}

#[test]
fn clear_then_reuse() {
    let mut set: RBTreeSet<i32> = (0..100).collect();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.validate(), Ok(()));
    set.insert(7);
    assert_eq!(contents(&set), vec![7]);
}

#[test]
fn removed_slots_are_reused() {
    let mut set: RBTreeSet<i32> = (0..256).collect();
    let capacity = set.capacity();
    for k in 0..128 {
        set.remove(&k);
    }
    for k in 1_000..1_128 {
        set.insert(k);
    }
    assert_eq!(set.capacity(), capacity);
    assert_eq!(set.len(), 256);
    assert_eq!(set.validate(), Ok(()));
}

#[test]
fn hash_agrees_with_eq() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(set: &RBTreeSet<i32>) -> u64 {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    }

    let a = RBTreeSet::from([1, 2, 3]);
    let b = RBTreeSet::from([3, 2, 1]);
    assert_eq!(hash_of(&a), hash_of(&b));
}
