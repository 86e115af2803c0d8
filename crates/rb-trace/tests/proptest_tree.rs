use std::collections::BTreeSet;

use proptest::prelude::*;
use rb_trace::{replay, Op, RbTree};

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i64..64).prop_map(Op::Insert),
        2 => (0i64..64).prop_map(Op::Remove),
        1 => (0i64..64).prop_map(Op::Find),
    ]
}

proptest! {
    #[test]
    fn find_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut tree = RbTree::new();
        let mut model = BTreeSet::new();
        for op in ops {
            let expected = match op {
                Op::Insert(k) => model.insert(k),
                Op::Remove(k) => model.remove(&k),
                Op::Find(k) => model.contains(&k),
            };
            prop_assert_eq!(op.apply(&mut tree), expected);
            prop_assert!(tree.verify().is_ok());
        }
        prop_assert_eq!(tree.len(), model.len());
        for k in 0..64 {
            prop_assert_eq!(tree.find(k).is_some(), model.contains(&k));
        }
    }

    #[test]
    fn insert_then_remove_restores_key_set(
        keys in prop::collection::btree_set(0i64..1000, 0..60),
        k in 0i64..1000,
    ) {
        prop_assume!(!keys.contains(&k));
        let mut tree = RbTree::new();
        for &key in &keys {
            tree.insert(key);
        }
        let before: Vec<i64> = tree.keys().collect();

        prop_assert!(tree.insert(k));
        prop_assert!(tree.remove(k));
        prop_assert!(tree.verify().is_ok());
        prop_assert_eq!(tree.keys().collect::<Vec<_>>(), before);
    }

    #[test]
    fn backward_replay_restores_exact_shape(
        keys in prop::collection::vec(0i64..200, 0..80),
        op in op_strategy(),
    ) {
        let mut tree = RbTree::new();
        for key in keys {
            tree.insert(key);
        }
        let before = tree.snapshot();
        op.apply(&mut tree);

        let mut undone = tree.clone();
        prop_assert!(replay::backward(&mut undone, tree.steps()).is_ok());
        prop_assert_eq!(undone.snapshot(), before);
    }
}
