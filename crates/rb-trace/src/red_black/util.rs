use thiserror::Error;

use crate::types::{Colour, NodeIdentification, Relation};
use crate::util::{child, first, get_l, get_p, last, next, relation, set_child, set_p};

use super::types::RbNodeLike;

/// Structural identifier of the position `idx` currently occupies.
pub fn identify<N: RbNodeLike>(arena: &[N], idx: u32) -> NodeIdentification {
    match get_p(arena, idx) {
        None => NodeIdentification::root(),
        Some(p) => NodeIdentification::child_of(arena[p as usize].key(), relation(arena, idx)),
    }
}

/// Identifier of the position `idx`'s parent will occupy once `idx` has been
/// rotated up: the child of `idx` on the side opposite `idx`'s own relation.
pub fn rotated_identification<N: RbNodeLike>(arena: &[N], idx: u32) -> NodeIdentification {
    NodeIdentification::child_of(arena[idx as usize].key(), !relation(arena, idx))
}

/// Promotes `n` into its parent's position.
///
/// The child of `n` on the side opposite its relation moves over to the
/// former parent, and the former parent becomes `n`'s child on that side.
/// `root` is updated when `n` ends up parentless. Returns `false`, without
/// touching the tree, when `n` is the root.
pub fn rotate_up<N: RbNodeLike>(arena: &mut [N], root: &mut Option<u32>, n: u32) -> bool {
    let Some(p) = get_p(arena, n) else {
        return false;
    };
    let g = get_p(arena, p);
    let side = relation(arena, n);
    let p_side = relation(arena, p);

    let inner = child(arena, n, !side);
    set_child(arena, p, side, inner);
    set_child(arena, n, !side, Some(p));

    match g {
        Some(g) => set_child(arena, g, p_side, Some(n)),
        None => {
            set_p(arena, n, None);
            *root = Some(n);
        }
    }
    true
}

/// Rightmost node of the left subtree, if `n` has one.
pub fn predecessor<N: RbNodeLike>(arena: &[N], n: u32) -> Option<u32> {
    last(arena, get_l(arena, n))
}

/// Black nodes on the leftmost path below and including `root`.
pub fn black_height<N: RbNodeLike>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut curr = root;
    while let Some(i) = curr {
        if arena[i as usize].is_black() {
            count += 1;
        }
        curr = get_l(arena, i);
    }
    count
}

/// A red-black or binary-search-tree property that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root {key} has a parent")]
    RootHasParent { key: i64 },
    #[error("root {key} is not black")]
    RootNotBlack { key: i64 },
    #[error("child {key} does not link back to its parent {parent}")]
    BrokenParentLink { key: i64, parent: i64 },
    #[error("red node {key} has a red child")]
    RedRed { key: i64 },
    #[error("black height mismatch below {key}: left {left}, right {right}")]
    BlackHeight { key: i64, left: usize, right: usize },
    #[error("{key} is the {relation} child of {parent}")]
    MisplacedChild {
        key: i64,
        parent: i64,
        relation: Relation,
    },
    #[error("in-order keys are not strictly increasing at {key}")]
    OrderViolated { key: i64 },
    #[error("{counted} nodes are reachable but the tree records {recorded}")]
    SizeMismatch { counted: usize, recorded: usize },
}

fn checked_black_height<N: RbNodeLike>(
    arena: &[N],
    node: Option<u32>,
) -> Result<usize, InvariantError> {
    let Some(node) = node else {
        return Ok(0);
    };
    let n = &arena[node as usize];

    for (side, c) in [(Relation::Left, n.l()), (Relation::Right, n.r())] {
        let Some(c) = c else {
            continue;
        };
        let ck = arena[c as usize].key();
        if get_p(arena, c) != Some(node) {
            return Err(InvariantError::BrokenParentLink {
                key: ck,
                parent: n.key(),
            });
        }
        let ordered = match side {
            Relation::Left => ck < n.key(),
            _ => ck > n.key(),
        };
        if !ordered {
            return Err(InvariantError::MisplacedChild {
                key: ck,
                parent: n.key(),
                relation: side,
            });
        }
        if n.colour() == Colour::Red && arena[c as usize].colour() == Colour::Red {
            return Err(InvariantError::RedRed { key: n.key() });
        }
    }

    let left = checked_black_height(arena, n.l())?;
    let right = checked_black_height(arena, n.r())?;
    if left != right {
        return Err(InvariantError::BlackHeight {
            key: n.key(),
            left,
            right,
        });
    }
    Ok(left + usize::from(n.is_black()))
}

/// Checks every red-black and ordering property of the tree under `root`.
pub fn assert_red_black_tree<N: RbNodeLike>(
    arena: &[N],
    root: Option<u32>,
) -> Result<(), InvariantError> {
    let Some(root) = root else {
        return Ok(());
    };
    let key = arena[root as usize].key();
    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent { key });
    }
    if !arena[root as usize].is_black() {
        return Err(InvariantError::RootNotBlack { key });
    }

    checked_black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev_key: Option<i64> = None;
    while let Some(i) = curr {
        let key = arena[i as usize].key();
        if prev_key.is_some_and(|prev| prev >= key) {
            return Err(InvariantError::OrderViolated { key });
        }
        prev_key = Some(key);
        curr = next(arena, i);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::RbNode;

    /// `2B(1R, 3R)` laid out in a bare arena.
    fn small() -> (Vec<RbNode>, Option<u32>) {
        let mut arena = vec![
            RbNode::with_colour(2, Colour::Black),
            RbNode::new(1),
            RbNode::new(3),
        ];
        set_child(&mut arena, 0, Relation::Left, Some(1));
        set_child(&mut arena, 0, Relation::Right, Some(2));
        (arena, Some(0))
    }

    #[test]
    fn rotate_up_right_child_promotes_it_to_root() {
        let (mut arena, mut root) = small();
        assert!(rotate_up(&mut arena, &mut root, 2));
        assert_eq!(root, Some(2));
        assert_eq!(arena[2].p, None);
        assert_eq!(arena[2].l, Some(0));
        assert_eq!(arena[0].p, Some(2));
        assert_eq!(arena[0].l, Some(1));
        assert_eq!(arena[0].r, None);
    }

    #[test]
    fn rotate_up_is_undone_by_rotating_the_former_parent() {
        let (mut arena, mut root) = small();
        let back = rotated_identification(&arena, 1);
        assert_eq!(back, NodeIdentification::child_of(1, Relation::Right));
        assert!(rotate_up(&mut arena, &mut root, 1));
        assert_eq!(identify(&arena, 0), back);
        assert!(rotate_up(&mut arena, &mut root, 0));
        assert_eq!(root, Some(0));
        assert_eq!((arena[0].l, arena[0].r), (Some(1), Some(2)));
        assert_eq!(arena[1].r, None);
    }

    #[test]
    fn rotate_up_root_is_rejected() {
        let (mut arena, mut root) = small();
        assert!(!rotate_up(&mut arena, &mut root, 0));
        assert_eq!(root, Some(0));
    }

    #[test]
    fn predecessor_walks_right_through_left_subtree() {
        let (arena, _) = small();
        assert_eq!(predecessor(&arena, 0), Some(1));
        assert_eq!(predecessor(&arena, 1), None);
    }

    #[test]
    fn verification_of_small_tree() {
        let (mut arena, root) = small();
        assert_eq!(assert_red_black_tree(&arena, root), Ok(()));
        assert_eq!(black_height(&arena, root), 1);
        arena[0].c = Colour::Red;
        assert_eq!(
            assert_red_black_tree(&arena, root),
            Err(InvariantError::RootNotBlack { key: 2 })
        );
    }
}
