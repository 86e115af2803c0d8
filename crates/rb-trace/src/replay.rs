//! Applies recorded steps to a tree, forward or backward.
//!
//! This is what a renderer does with its own model of the tree: resolve every
//! [`NodeIdentification`] against the current shape (find the parent by key,
//! then take the child on the given side) and perform the step or its
//! inverse. Replaying a log backward from the state an operation left behind
//! restores the state it started from.

use log::trace;
use thiserror::Error;

use crate::step::{Direction, Step};
use crate::tree::RbTree;
use crate::types::{Colour, NodeIdentification, Relation};

/// A step that does not fit the tree it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("no node holds key {0}")]
    UnknownKey(i64),
    #[error("no node at {0}")]
    EmptySlot(NodeIdentification),
    #[error("{0} is already occupied")]
    OccupiedSlot(NodeIdentification),
    #[error("expected key {expected} at {at}, found {found}")]
    KeyMismatch {
        at: NodeIdentification,
        expected: i64,
        found: i64,
    },
    #[error("node {0} still has children")]
    NotALeaf(i64),
    #[error("cannot rotate up the root node {0}")]
    RootRotation(i64),
    #[error("malformed step: {0}")]
    Malformed(&'static str),
}

/// A resolved position: the parent node (`None` for the root position) and
/// the side under it.
#[derive(Clone, Copy, Debug)]
struct Slot {
    parent: Option<u32>,
    side: Relation,
}

fn slot(tree: &RbTree, id: &NodeIdentification) -> Result<Slot, ReplayError> {
    match (id.parent, id.relation) {
        (None, Relation::Root) => Ok(Slot {
            parent: None,
            side: Relation::Root,
        }),
        (None, _) | (Some(_), Relation::Root) => {
            Err(ReplayError::Malformed("relation does not match parent"))
        }
        (Some(key), side) => {
            let parent = tree
                .node_with_key(key)
                .ok_or(ReplayError::UnknownKey(key))?;
            Ok(Slot {
                parent: Some(parent),
                side,
            })
        }
    }
}

fn occupant(tree: &RbTree, slot: Slot) -> Option<u32> {
    match slot.parent {
        None => tree.root(),
        Some(p) => match slot.side {
            Relation::Left => tree.left(p),
            Relation::Right => tree.right(p),
            Relation::Root => None,
        },
    }
}

fn resolve(tree: &RbTree, id: &NodeIdentification) -> Result<u32, ReplayError> {
    occupant(tree, slot(tree, id)?).ok_or(ReplayError::EmptySlot(*id))
}

fn create(
    tree: &mut RbTree,
    id: &NodeIdentification,
    key: i64,
    colour: Colour,
) -> Result<(), ReplayError> {
    let at = slot(tree, id)?;
    if occupant(tree, at).is_some() {
        return Err(ReplayError::OccupiedSlot(*id));
    }
    tree.attach(at.parent, at.side, key, colour);
    Ok(())
}

fn delete(tree: &mut RbTree, id: &NodeIdentification, key: i64) -> Result<(), ReplayError> {
    let n = resolve(tree, id)?;
    let found = tree.key(n);
    if found != key {
        return Err(ReplayError::KeyMismatch {
            at: *id,
            expected: key,
            found,
        });
    }
    if tree.left(n).is_some() || tree.right(n).is_some() {
        return Err(ReplayError::NotALeaf(key));
    }
    tree.detach_leaf(n);
    Ok(())
}

/// Applies one step in `direction`.
pub fn apply(tree: &mut RbTree, step: &Step, direction: Direction) -> Result<(), ReplayError> {
    trace!("replay {direction:?} {}", step.kind());
    match step {
        Step::Note { .. } => Ok(()),
        Step::Highlight { nodes, .. } => {
            for id in nodes {
                slot(tree, id)?;
            }
            Ok(())
        }
        Step::CreateNode { node, key, .. } => match direction {
            Direction::Forward => create(tree, node, *key, Colour::Red),
            Direction::Backward => delete(tree, node, *key),
        },
        Step::DeleteNode {
            node, key, colour, ..
        } => match direction {
            Direction::Forward => delete(tree, node, *key),
            Direction::Backward => create(tree, node, *key, *colour),
        },
        Step::RecolorNodes { nodes, colours, .. } => {
            if nodes.len() != colours.len() {
                return Err(ReplayError::Malformed(
                    "recolouring lists differ in length",
                ));
            }
            let targets = nodes
                .iter()
                .map(|id| resolve(tree, id))
                .collect::<Result<Vec<_>, _>>()?;
            for (n, change) in targets.into_iter().zip(colours) {
                tree.set_colour(n, change.target(direction));
            }
            Ok(())
        }
        Step::RotateUp { nodes, .. } => {
            let id = match direction {
                Direction::Forward => &nodes[0],
                Direction::Backward => &nodes[1],
            };
            let n = resolve(tree, id)?;
            if tree.rotate_up(n) {
                Ok(())
            } else {
                Err(ReplayError::RootRotation(tree.key(n)))
            }
        }
        Step::SwapNodes { nodes, keys, .. } => {
            let a = tree
                .node_with_key(keys[0])
                .ok_or(ReplayError::UnknownKey(keys[0]))?;
            let b = tree
                .node_with_key(keys[1])
                .ok_or(ReplayError::UnknownKey(keys[1]))?;
            if direction == Direction::Forward {
                // Positions are addressed as they were before the swap.
                for (id, expected) in nodes.iter().zip([a, b]) {
                    let n = resolve(tree, id)?;
                    if n != expected {
                        return Err(ReplayError::KeyMismatch {
                            at: *id,
                            expected: tree.key(expected),
                            found: tree.key(n),
                        });
                    }
                }
            }
            tree.exchange_keys(a, b);
            Ok(())
        }
    }
}

/// Plays `steps` forward, in order.
pub fn forward(tree: &mut RbTree, steps: &[Step]) -> Result<(), ReplayError> {
    steps
        .iter()
        .try_for_each(|step| apply(tree, step, Direction::Forward))
}

/// Undoes `steps`, last one first.
pub fn backward(tree: &mut RbTree, steps: &[Step]) -> Result<(), ReplayError> {
    steps
        .iter()
        .rev()
        .try_for_each(|step| apply(tree, step, Direction::Backward))
}

/// Node currently at `id`, if any.
pub fn locate(tree: &RbTree, id: &NodeIdentification) -> Result<Option<u32>, ReplayError> {
    Ok(occupant(tree, slot(tree, id)?))
}
