use rb_trace::replay::{self, apply};
use rb_trace::{Direction, Op, RbTree, Snapshot, Step};

/// Runs `op`, then checks that its log undoes it from the new state and
/// redoes it from the old one.
fn assert_reversible(tree: &mut RbTree, op: Op) -> bool {
    let before = tree.clone();
    let ok = op.apply(tree);
    if let Err(err) = tree.verify() {
        panic!("invalid red-black tree after {op}: {err}");
    }

    let mut undone = tree.clone();
    if let Err(err) = replay::backward(&mut undone, tree.steps()) {
        panic!("backward replay of {op} failed: {err}");
    }
    assert_eq!(undone.snapshot(), before.snapshot(), "backward replay of {op}");

    let mut redone = before;
    if let Err(err) = replay::forward(&mut redone, tree.steps()) {
        panic!("forward replay of {op} failed: {err}");
    }
    assert_eq!(redone.snapshot(), tree.snapshot(), "forward replay of {op}");
    ok
}

#[test]
fn replay_ascending_ladder_matrix() {
    let mut tree = RbTree::new();
    for k in 0..=100 {
        assert!(assert_reversible(&mut tree, Op::Insert(k)));
    }
    for k in 0..=100 {
        assert!(assert_reversible(&mut tree, Op::Remove(k)));
    }
    assert!(tree.is_empty());
}

#[test]
fn replay_descending_ladder_matrix() {
    let mut tree = RbTree::new();
    for k in (0..=100).rev() {
        assert!(assert_reversible(&mut tree, Op::Insert(k)));
    }
    for k in (0..=100).rev() {
        assert!(assert_reversible(&mut tree, Op::Remove(k)));
    }
    assert!(tree.is_empty());
}

#[test]
fn replay_both_directions_matrix() {
    // Inserts alternate between the two ends, removals start in the middle.
    let mut tree = RbTree::new();
    for i in 0..50 {
        assert!(assert_reversible(&mut tree, Op::Insert(i)));
        assert!(assert_reversible(&mut tree, Op::Insert(100 - i)));
    }
    for i in 0..49 {
        assert!(assert_reversible(&mut tree, Op::Remove(51 + i)));
        assert!(assert_reversible(&mut tree, Op::Remove(49 - i)));
    }
    assert!(assert_reversible(&mut tree, Op::Remove(0)));
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec![100]);
}

#[test]
fn replay_interleaved_strides_matrix() {
    let mut tree = RbTree::new();
    for k in (0..200).step_by(3) {
        assert_reversible(&mut tree, Op::Insert(k));
    }
    for k in (0..200).step_by(2) {
        assert_reversible(&mut tree, Op::Remove(k));
        assert_reversible(&mut tree, Op::Find(k + 1));
    }
    for k in (0..200).step_by(5) {
        assert_reversible(&mut tree, Op::Insert(k));
    }
    let expected: Vec<i64> = (0..200)
        .filter(|k| (k % 3 == 0 && k % 2 != 0) || k % 5 == 0)
        .collect();
    assert_eq!(tree.keys().collect::<Vec<_>>(), expected);
}

#[test]
fn failed_operations_replay_as_no_ops() {
    let mut tree = RbTree::new();
    for k in [8, 4, 12] {
        tree.insert(k);
    }
    assert!(!assert_reversible(&mut tree, Op::Insert(4)));
    assert!(!assert_reversible(&mut tree, Op::Remove(5)));
    assert!(!assert_reversible(&mut tree, Op::Find(5)));
}

#[test]
fn recorder_playback_drives_a_mirror_tree() {
    let mut tree = RbTree::new();
    for k in [10, 5, 15, 3, 7, 12, 20, 1] {
        tree.insert(k);
    }
    let before = tree.snapshot();
    assert!(tree.remove(10));
    let after = tree.snapshot();

    let mut mirror = RbTree::from_snapshot(&before);
    let mut played = 0;
    while !tree.recorder().is_finished() {
        let cue = tree.next();
        assert_eq!(cue.direction, Direction::Forward);
        apply(&mut mirror, cue.step, cue.direction).unwrap();
        played += 1;
    }
    assert_eq!(played, tree.steps().len());
    assert_eq!(mirror.snapshot(), after);

    for _ in 0..tree.steps().len() {
        let cue = tree.previous();
        assert_eq!(cue.direction, Direction::Backward);
        apply(&mut mirror, cue.step, cue.direction).unwrap();
    }
    assert_eq!(mirror.snapshot(), before);
    assert_eq!(tree.recorder().cursor(), 0);
}

#[test]
fn skip_jumps_to_the_end_without_replaying() {
    let mut tree = RbTree::new();
    tree.insert(1);
    tree.insert(2);
    tree.skip();
    assert!(tree.recorder().is_finished());
    let last = tree.steps().last().cloned().unwrap();
    assert_eq!(tree.next().step, &last);
}

#[test]
fn empty_log_hands_out_the_idle_note() {
    let mut tree = RbTree::new();
    match tree.next().step {
        Step::Note { text } => assert_eq!(text, "No animation is playing"),
        other => panic!("unexpected step {other:?}"),
    }
    assert_eq!(tree.snapshot(), Snapshot::empty());
}

#[test]
fn steps_serialize_with_structural_identifiers() {
    let mut tree = RbTree::new();
    tree.insert(2);
    tree.insert(1);
    let json = serde_json::to_value(tree.steps()).unwrap();
    let created = json
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["kind"] == "create_node")
        .unwrap();
    assert_eq!(created["key"], 1);
    assert_eq!(created["node"]["parent"], 2);
    assert_eq!(created["node"]["relation"], "left");
}
