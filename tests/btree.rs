use relstore::{BPlusTree, RowLocator};

#[test]
fn split_scenario() {
    // degree 2: max 3 keys per node, so five inserts must split
    let mut tree = BPlusTree::new();
    for k in [10i64, 20, 5, 15, 25] {
        tree.insert(k, k * 100);
    }
    assert_eq!(tree.len(), 5);
    for k in [10i64, 20, 5, 15, 25] {
        assert_eq!(tree.search(k), Some(&(k * 100)));
    }
    let keys: Vec<i64> = tree.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![5, 10, 15, 20, 25]);
}

#[test]
fn delete_causing_merge() {
    let mut tree = BPlusTree::new();
    for k in [10i64, 20, 5, 15, 25] {
        tree.insert(k, k);
    }
    assert!(tree.delete(5));
    assert!(tree.delete(10));

    assert_eq!(tree.search(5), None);
    assert_eq!(tree.search(10), None);
    for k in [15i64, 20, 25] {
        assert_eq!(tree.search(k), Some(&k));
    }
    let keys: Vec<i64> = tree.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![15, 20, 25]);
}

#[test]
fn duplicate_insert_overwrites() {
    let mut tree = BPlusTree::new();
    tree.insert(7, "old");
    tree.insert(7, "new");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.search(7), Some(&"new"));
}

#[test]
fn delete_missing_key_is_a_no_op() {
    let mut tree: BPlusTree<i64> = BPlusTree::new();
    assert!(!tree.delete(1));
    tree.insert(1, 1);
    assert!(!tree.delete(2));
    assert_eq!(tree.len(), 1);
}

#[test]
fn search_tracks_latest_value_across_churn() {
    let mut tree = BPlusTree::new();
    // insert in a scrambled but deterministic order
    for i in 0..100i64 {
        tree.insert((i * 31) % 100, i);
    }
    assert_eq!(tree.len(), 100);

    let keys: Vec<i64> = tree.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, (0..100).collect::<Vec<_>>());

    for k in (0..100i64).step_by(3) {
        assert!(tree.delete(k));
    }
    for k in 0..100i64 {
        if k % 3 == 0 {
            assert_eq!(tree.search(k), None, "key {k} should be gone");
        } else {
            assert!(tree.search(k).is_some(), "key {k} should remain");
        }
    }
    let keys: Vec<i64> = tree.iter().map(|(k, _)| k).collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(keys.len(), tree.len());
}

#[test]
fn maps_keys_to_row_locators() {
    // the intended use: primary-key values pointing at stored rows
    let mut index = BPlusTree::new();
    index.insert(
        42,
        RowLocator {
            page_id: 1,
            slot_id: 3,
        },
    );
    index.insert(
        7,
        RowLocator {
            page_id: 2,
            slot_id: 1,
        },
    );
    assert_eq!(
        index.search(42),
        Some(&RowLocator {
            page_id: 1,
            slot_id: 3
        })
    );
    assert!(index.delete(42));
    assert_eq!(index.search(42), None);
}
