//! Property-based tests for AvlTreeMap.
//!
//! These tests verify that AvlTreeMap satisfies the expected map laws,
//! the AVL height bound, and conformance with the standard library's
//! ordered map, using proptest.

use avlmap::{AvlTreeMap, KeyNotFoundError};
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Strategy for generating an AvlTreeMap from a vector of key-value
/// pairs. Keys are drawn from a small range so that deletions and
/// repeated insertions actually collide.
fn arbitrary_avl_map(max_size: usize) -> impl Strategy<Value = AvlTreeMap<i32, i32>> {
    prop::collection::vec((0..64i32, any::<i32>()), 0..max_size)
        .prop_map(|entries| entries.into_iter().collect::<AvlTreeMap<i32, i32>>())
}

// =============================================================================
// Search-Insert Laws
// =============================================================================

proptest! {
    /// Law: search after insert returns the inserted value.
    /// map.insert(key, value); map.search(&key) == Some(&value)
    #[test]
    fn prop_search_insert_law(
        mut map in arbitrary_avl_map(50),
        key: i32,
        value: i32
    ) {
        map.insert(key, value);
        prop_assert_eq!(map.search(&key), Some(&value));
    }

    /// Law: insert does not affect other keys.
    /// key1 != key2 => insert(key1) leaves search(&key2) unchanged
    #[test]
    fn prop_insert_other_law(
        mut map in arbitrary_avl_map(50),
        key1: i32,
        key2: i32,
        value: i32
    ) {
        prop_assume!(key1 != key2);
        let before = map.search(&key2).copied();
        map.insert(key1, value);
        prop_assert_eq!(map.search(&key2).copied(), before);
    }

    /// Law: inserting twice keeps the second value.
    #[test]
    fn prop_insert_overwrite_law(
        mut map in arbitrary_avl_map(50),
        key: i32,
        first: i32,
        second: i32
    ) {
        map.insert(key, first);
        map.insert(key, second);
        prop_assert_eq!(map.search(&key), Some(&second));
    }
}

// =============================================================================
// Delete Laws
// =============================================================================

proptest! {
    /// Law: search after delete returns None.
    #[test]
    fn prop_search_delete_law(
        mut map in arbitrary_avl_map(50),
        key in 0..64i32
    ) {
        let _ = map.delete(&key);
        prop_assert_eq!(map.search(&key), None);
    }

    /// Law: delete returns the most recently inserted value.
    #[test]
    fn prop_delete_returns_value_law(
        mut map in arbitrary_avl_map(50),
        key: i32,
        value: i32
    ) {
        map.insert(key, value);
        prop_assert_eq!(map.delete(&key), Ok(value));
    }

    /// Law: delete does not affect other keys.
    #[test]
    fn prop_delete_other_law(
        mut map in arbitrary_avl_map(50),
        key1 in 0..64i32,
        key2 in 0..64i32
    ) {
        prop_assume!(key1 != key2);
        let before = map.search(&key2).copied();
        let _ = map.delete(&key1);
        prop_assert_eq!(map.search(&key2).copied(), before);
    }

    /// Law: deleting an absent key is an error and leaves the map
    /// untouched.
    #[test]
    fn prop_delete_absent_law(
        mut map in arbitrary_avl_map(50),
        key: i32
    ) {
        prop_assume!(!map.contains_key(&key));
        let before: Vec<i32> = map.inorder().into_iter().copied().collect();

        prop_assert_eq!(map.delete(&key), Err(KeyNotFoundError));

        let after: Vec<i32> = map.inorder().into_iter().copied().collect();
        prop_assert_eq!(before, after);
    }

    /// Law: delete then insert restores searchability.
    #[test]
    fn prop_delete_insert_law(
        mut map in arbitrary_avl_map(50),
        key in 0..64i32,
        value: i32
    ) {
        let _ = map.delete(&key);
        map.insert(key, value);
        prop_assert_eq!(map.search(&key), Some(&value));
    }
}

// =============================================================================
// Length Laws
// =============================================================================

proptest! {
    /// Law: insert of a new key increases length by 1, insert of an
    /// existing key keeps it.
    #[test]
    fn prop_insert_length_law(
        mut map in arbitrary_avl_map(50),
        key: i32,
        value: i32
    ) {
        let was_present = map.contains_key(&key);
        let length_before = map.len();

        map.insert(key, value);

        let expected = if was_present { length_before } else { length_before + 1 };
        prop_assert_eq!(map.len(), expected);
    }

    /// Law: a successful delete decreases length by 1, a failed one
    /// keeps it.
    #[test]
    fn prop_delete_length_law(
        mut map in arbitrary_avl_map(50),
        key in 0..64i32
    ) {
        let length_before = map.len();

        let expected = match map.delete(&key) {
            Ok(_) => length_before - 1,
            Err(KeyNotFoundError) => length_before,
        };
        prop_assert_eq!(map.len(), expected);
    }

    /// Law: length agrees with the materialized traversals.
    #[test]
    fn prop_length_matches_traversals(map in arbitrary_avl_map(100)) {
        prop_assert_eq!(map.len(), map.inorder().len());
        prop_assert_eq!(map.len(), map.bforder().len());
        prop_assert_eq!(map.is_empty(), map.len() == 0);
    }
}

// =============================================================================
// Order and Balance Laws
// =============================================================================

proptest! {
    /// Law: inorder yields strictly ascending keys.
    #[test]
    fn prop_inorder_sorted_law(map in arbitrary_avl_map(100)) {
        let keys = map.inorder();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Law: min and max agree with the ends of the inorder sequence.
    #[test]
    fn prop_min_max_law(map in arbitrary_avl_map(100)) {
        let keys = map.inorder();
        prop_assert_eq!(map.min().map(|(key, _)| key), keys.first().copied());
        prop_assert_eq!(map.max().map(|(key, _)| key), keys.last().copied());
    }

    /// Law: the tree height never exceeds the AVL bound of
    /// 1.44 * log2(n + 2).
    #[test]
    fn prop_height_bound_law(map in arbitrary_avl_map(200)) {
        let size = map.len() as f64;
        let bound = (1.44 * (size + 2.0).log2()).ceil() as usize;
        prop_assert!(
            map.height() <= bound,
            "height {} exceeds AVL bound {} for {} entries",
            map.height(),
            bound,
            map.len()
        );
    }

    /// Law: a binary tree of height h holds at most 2^h - 1 nodes, so
    /// the height can never be smaller than log2(n + 1).
    #[test]
    fn prop_height_floor_law(map in arbitrary_avl_map(200)) {
        prop_assert!((1usize << map.height()) > map.len());
    }
}

// =============================================================================
// Traversal Laws
// =============================================================================

proptest! {
    /// Law: preorder, postorder, and breadth-first order are
    /// permutations of the sorted key sequence.
    #[test]
    fn prop_traversal_permutation_law(map in arbitrary_avl_map(100)) {
        let inorder: Vec<i32> = map.inorder().into_iter().copied().collect();

        for traversal in [map.preorder(), map.postorder(), map.bforder()] {
            let mut keys: Vec<i32> = traversal.into_iter().copied().collect();
            keys.sort_unstable();
            prop_assert_eq!(&keys, &inorder);
        }
    }

    /// Law: preorder and breadth-first order both start at the root,
    /// and postorder ends there.
    #[test]
    fn prop_traversal_root_law(map in arbitrary_avl_map(100)) {
        let preorder = map.preorder();
        let postorder = map.postorder();
        let bforder = map.bforder();

        prop_assert_eq!(preorder.first(), bforder.first());
        prop_assert_eq!(preorder.first(), postorder.last());
    }
}

// =============================================================================
// Equality and Round-Trip Laws
// =============================================================================

proptest! {
    /// Law: equality and hashing ignore construction order.
    #[test]
    fn prop_construction_order_law(
        entries in prop::collection::vec((0..64i32, any::<i32>()), 0..50)
    ) {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        // Deduplicate keys first, otherwise the two insertion orders
        // would legitimately keep different winners.
        let deduped: Vec<(i32, i32)> =
            entries.into_iter().collect::<BTreeMap<_, _>>().into_iter().collect();

        let forward: AvlTreeMap<i32, i32> = deduped.clone().into_iter().collect();
        let reversed: AvlTreeMap<i32, i32> = deduped.into_iter().rev().collect();

        prop_assert_eq!(&forward, &reversed);
        prop_assert_eq!(hash_of(&forward), hash_of(&reversed));
    }

    /// Law: consuming the map and collecting it back preserves it.
    #[test]
    fn prop_roundtrip_law(map in arbitrary_avl_map(50)) {
        let rebuilt: AvlTreeMap<i32, i32> = map.clone().into_iter().collect();
        prop_assert_eq!(map, rebuilt);
    }
}

// =============================================================================
// Model Conformance
// =============================================================================

proptest! {
    /// The map must behave exactly like the standard library's ordered
    /// map under an arbitrary interleaving of inserts and deletes.
    #[test]
    fn prop_matches_btreemap_model(
        operations in prop::collection::vec((any::<bool>(), 0..64i32, any::<i32>()), 0..200)
    ) {
        let mut map = AvlTreeMap::new();
        let mut model = BTreeMap::new();

        for (is_insert, key, value) in operations {
            if is_insert {
                prop_assert_eq!(map.insert(key, value), model.insert(key, value));
            } else {
                prop_assert_eq!(map.delete(&key).ok(), model.remove(&key));
            }

            prop_assert_eq!(map.len(), model.len());
        }

        let map_entries: Vec<(i32, i32)> =
            map.iter().map(|(key, value)| (*key, *value)).collect();
        let model_entries: Vec<(i32, i32)> = model.into_iter().collect();
        prop_assert_eq!(map_entries, model_entries);

        // Every surviving key must be reachable through search.
        for (key, value) in map.iter() {
            prop_assert_eq!(map.search(key), Some(value));
        }
    }
}
