//! Arena link helpers and traversal utilities.
//!
//! Everything here is generic over [`Node`], so it works for any arena node
//! layout that exposes `p` / `l` / `r` links.

use crate::types::{Node, Relation};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Side `idx` hangs on under its parent, derived from the parent's links.
pub fn relation<N: Node>(arena: &[N], idx: u32) -> Relation {
    match get_p(arena, idx) {
        None => Relation::Root,
        Some(p) if get_l(arena, p) == Some(idx) => Relation::Left,
        Some(_) => Relation::Right,
    }
}

/// Child of `idx` on the given side. The root relation has no child.
pub fn child<N: Node>(arena: &[N], idx: u32, side: Relation) -> Option<u32> {
    match side {
        Relation::Left => get_l(arena, idx),
        Relation::Right => get_r(arena, idx),
        Relation::Root => None,
    }
}

/// Attaches `child` as the `side` child of `idx`, keeping its parent link in
/// sync. Detaching (`None`) leaves the former child's parent link untouched.
pub(crate) fn set_child<N: Node>(arena: &mut [N], idx: u32, side: Relation, child: Option<u32>) {
    match side {
        Relation::Left => set_l(arena, idx, child),
        Relation::Right => set_r(arena, idx, child),
        Relation::Root => unreachable!("a parent has no root-side child"),
    }
    if let Some(c) = child {
        set_p(arena, c, Some(idx));
    }
}

/// Leftmost node.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest root-to-leaf path.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r)))
    })
}

/// Finds a node by key with an ordinary binary-search descent.
pub fn find<N, K, F>(arena: &[N], root: Option<u32>, key: &K, key_of: F) -> Option<u32>
where
    N: Node,
    K: Ord,
    F: Fn(&N) -> &K,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match key.cmp(key_of(&arena[i as usize])) {
            std::cmp::Ordering::Equal => return Some(i),
            std::cmp::Ordering::Less => get_l(arena, i),
            std::cmp::Ordering::Greater => get_r(arena, i),
        };
    }
    None
}
