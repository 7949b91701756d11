//! Tests for the Ordered Index
//!
//! These tests verify:
//! - Insert-or-update and exact search
//! - Custom-comparator search
//! - In-order listing (full and range-pruned)
//! - Removal of leaves, single-child and two-child nodes
//! - Skewed shape under sorted inserts, and rebalancing
//! - Deep trees do not exhaust the stack

use meteoindex::index::OrderedIndex;
use meteoindex::TemporalKey;

// =============================================================================
// Helper Functions
// =============================================================================

/// Deterministic permutation of 0..n (n must be prime)
fn scrambled(n: u32) -> Vec<u32> {
    (0..n).map(|i| (i * 37) % n).collect()
}

fn keys_of(index: &OrderedIndex<u32, String>) -> Vec<u32> {
    index.iter().map(|(k, _)| *k).collect()
}

fn build(keys: &[u32]) -> OrderedIndex<u32, String> {
    let mut index = OrderedIndex::new();
    for &k in keys {
        index.insert(k, format!("v{}", k));
    }
    index
}

// =============================================================================
// Insert / Search Tests
// =============================================================================

#[test]
fn test_new_index_is_empty() {
    let index: OrderedIndex<u32, u32> = OrderedIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.depth(), 0);
    assert!(index.root().is_none());
}

#[test]
fn test_insert_and_search() {
    let index = build(&[50, 30, 70]);

    let node = index.search(&30).unwrap();
    assert_eq!(*node.key(), 30);
    assert_eq!(node.value(), "v30");
    assert_eq!(index.len(), 3);
}

#[test]
fn test_insert_returns_node_for_key() {
    let mut index = OrderedIndex::new();
    let node = index.insert(7, "seven");
    assert_eq!(*node.key(), 7);
    assert_eq!(*node.value(), "seven");
}

#[test]
fn test_insert_overwrites_existing_value() {
    let mut index = OrderedIndex::new();
    index.insert(1, "first");
    index.insert(2, "other");
    index.insert(1, "second");

    assert_eq!(index.len(), 2);
    assert_eq!(index.get(&1), Some(&"second"));
}

#[test]
fn test_search_absent_key() {
    let index = build(&[5, 3, 8]);
    assert!(index.search(&4).is_none());
    assert!(!index.contains_key(&100));
}

#[test]
fn test_search_after_insert_holds_for_all_keys() {
    let keys = scrambled(101);
    let index = build(&keys);

    for k in keys {
        assert_eq!(index.get(&k).map(String::as_str), Some(format!("v{}", k).as_str()));
    }
}

#[test]
fn test_search_by_custom_comparator() {
    let index = build(&scrambled(101));

    // Bucketing by tens is monotone in the key order, so the descent is valid
    let node = index
        .search_by(&25, |a, b| (a / 10).cmp(&(b / 10)))
        .unwrap();
    assert_eq!(node.key() / 10, 2);
}

#[test]
fn test_value_mut_through_insert() {
    let mut index = OrderedIndex::new();
    *index.insert(3, 10).value_mut() += 5;
    assert_eq!(index.get(&3), Some(&15));
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_list_all_is_strictly_ascending() {
    let index = build(&scrambled(97));
    let listed: Vec<u32> = index.list(|_| true).iter().map(|n| *n.key()).collect();

    assert_eq!(listed.len(), 97);
    assert!(listed.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_list_with_predicate() {
    let index = build(&scrambled(31));
    let even: Vec<u32> = index.list(|k| k % 2 == 0).iter().map(|n| *n.key()).collect();

    assert_eq!(even, (0..31).filter(|k| k % 2 == 0).collect::<Vec<_>>());
}

#[test]
fn test_list_on_empty_index() {
    let index: OrderedIndex<u32, u32> = OrderedIndex::new();
    assert!(index.list(|_| true).is_empty());
}

#[test]
fn test_list_range_matches_filtered_list() {
    let index = build(&scrambled(101));

    let pruned: Vec<u32> = index
        .list_range(&20, &45, |k, b| k.cmp(b))
        .iter()
        .map(|n| *n.key())
        .collect();
    let full: Vec<u32> = index
        .list(|k| (20..=45).contains(k))
        .iter()
        .map(|n| *n.key())
        .collect();

    assert_eq!(pruned, full);
    assert_eq!(pruned, (20..=45).collect::<Vec<_>>());
}

#[test]
fn test_list_range_agrees_with_wildcard_filter_for_prefix_bounds() {
    let mut index = OrderedIndex::new();
    for day in 1..=3u8 {
        for hour in [0u8, 6, 12, 18] {
            index.insert(TemporalKey::at(2024, 1, day, hour, 0), ());
        }
    }
    index.insert(TemporalKey::at(2023, 12, 31, 23, 0), ());
    index.insert(TemporalKey::at(2025, 2, 1, 0, 0), ());

    let bounds = [
        TemporalKey::any(),
        TemporalKey::year(2023),
        TemporalKey::year(2024),
        TemporalKey::year(2024).with_month(1),
        TemporalKey::year(2024).with_month(1).with_day(2),
        TemporalKey::year(2024).with_month(1).with_day(2).with_hour(6),
        TemporalKey::at(2024, 1, 3, 12, 0),
        TemporalKey::year(2025),
    ];

    for from in &bounds {
        for to in &bounds {
            let pruned: Vec<TemporalKey> = index
                .list_range(from, to, |key, bound| key.compare(bound))
                .iter()
                .map(|n| *n.key())
                .collect();
            let filtered: Vec<TemporalKey> = index
                .list(|key| key.within(from, to))
                .iter()
                .map(|n| *n.key())
                .collect();
            assert_eq!(pruned, filtered, "from {} to {}", from, to);
        }
    }
}

#[test]
fn test_list_range_inverted_is_empty() {
    let index = build(&scrambled(31));
    assert!(index.list_range(&20, &10, |k, b| k.cmp(b)).is_empty());
}

#[test]
fn test_first_and_last() {
    let index = build(&[40, 10, 90, 55]);
    assert_eq!(index.first().map(|n| *n.key()), Some(10));
    assert_eq!(index.last().map(|n| *n.key()), Some(90));
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_leaf() {
    let mut index = build(&[50, 30, 70]);

    assert_eq!(index.remove(&30), Some((30, "v30".to_string())));
    assert!(index.search(&30).is_none());
    assert_eq!(keys_of(&index), vec![50, 70]);
}

#[test]
fn test_remove_node_with_one_child() {
    let mut index = build(&[50, 30, 20]);

    index.remove(&30);
    assert_eq!(keys_of(&index), vec![20, 50]);
    assert!(index.search(&20).is_some());
}

#[test]
fn test_remove_node_with_two_children() {
    let mut index = build(&[50, 30, 70, 60, 80, 65]);

    assert_eq!(index.remove(&50), Some((50, "v50".to_string())));
    assert_eq!(keys_of(&index), vec![30, 60, 65, 70, 80]);
    // in-order successor moved into the root position
    assert_eq!(index.root().map(|n| *n.key()), Some(60));
    assert_eq!(index.get(&65).map(String::as_str), Some("v65"));
}

#[test]
fn test_remove_with_deep_successor() {
    // successor 60 sits two left links below the right child 80
    let mut index = build(&[50, 30, 80, 70, 90, 60, 65]);

    assert_eq!(index.remove(&50), Some((50, "v50".to_string())));
    assert_eq!(index.root().map(|n| *n.key()), Some(60));
    assert_eq!(keys_of(&index), vec![30, 60, 65, 70, 80, 90]);

    // 65 was spliced up into the successor's old position
    let seventy = index.search(&70).unwrap();
    assert_eq!(seventy.left().map(|n| *n.key()), Some(65));
    assert_eq!(index.len(), 6);
}

#[test]
fn test_insert_after_remove_reuses_position() {
    let mut index = build(&[50, 30, 70]);
    index.remove(&30);
    index.insert(20, "v20".to_string());
    index.insert(30, "again".to_string());

    assert_eq!(keys_of(&index), vec![20, 30, 50, 70]);
    assert_eq!(index.get(&30).map(String::as_str), Some("again"));
}

#[test]
fn test_remove_decrements_len_by_one() {
    let mut index = build(&scrambled(53));

    for k in [0, 26, 52, 13] {
        let before = index.list(|_| true).len();
        index.remove(&k);
        assert_eq!(index.list(|_| true).len(), before - 1);
        assert!(index.search(&k).is_none());
    }
    assert_eq!(index.len(), 49);
}

#[test]
fn test_remove_absent_key_is_noop() {
    let mut index = build(&[1, 2, 3]);
    assert_eq!(index.remove(&9), None);
    assert_eq!(index.len(), 3);
    assert_eq!(keys_of(&index), vec![1, 2, 3]);
}

#[test]
fn test_remove_until_empty() {
    let keys = scrambled(41);
    let mut index = build(&keys);

    for k in &keys {
        assert!(index.remove(k).is_some());
    }
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
}

#[test]
fn test_clear() {
    let mut index = build(&scrambled(17));
    index.clear();
    assert!(index.is_empty());
    assert!(index.list(|_| true).is_empty());
}

// =============================================================================
// Shape Tests
// =============================================================================

#[test]
fn test_sorted_inserts_produce_fully_skewed_tree() {
    let n = 64;
    let mut index = OrderedIndex::new();
    for k in 1..=n {
        index.insert(k, ());
    }

    assert_eq!(index.depth(), n as usize);
    let root = index.root().unwrap();
    assert_eq!(*root.key(), 1);
    assert!(root.left().is_none());
}

#[test]
fn test_rebalance_preserves_contents_and_bounds_depth() {
    let n: u32 = 1000;
    let mut index = OrderedIndex::new();
    for k in 0..n {
        index.insert(k, k * 2);
    }
    assert_eq!(index.depth(), n as usize);

    index.rebalance();

    // ceil(log2(1001)) = 10
    assert!(index.depth() <= 10, "depth {}", index.depth());
    assert_eq!(index.len(), n as usize);
    let keys: Vec<u32> = index.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, (0..n).collect::<Vec<_>>());
    assert_eq!(index.get(&777), Some(&1554));
}

#[test]
fn test_rebalance_empty_index() {
    let mut index: OrderedIndex<u32, u32> = OrderedIndex::new();
    index.rebalance();
    assert!(index.is_empty());
}

#[test]
fn test_deep_skewed_tree_operations_and_drop() {
    let n: u32 = 10_000;
    let mut index = OrderedIndex::new();
    for k in 0..n {
        index.insert(k, ());
    }

    assert_eq!(index.depth(), n as usize);
    assert!(index.search(&(n - 1)).is_some());
    assert_eq!(index.list(|k| k % 1000 == 0).len(), 10);
    assert!(index.remove(&(n / 2)).is_some());
    drop(index);
}

#[test]
fn test_from_iterator() {
    let index: OrderedIndex<&str, u32> = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
    let pairs: Vec<(&str, u32)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, vec![("a", 1), ("b", 2), ("c", 3)]);
}
