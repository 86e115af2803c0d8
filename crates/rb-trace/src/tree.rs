//! Red-black tree engine.
//!
//! [`RbTree`] keeps its nodes in an arena and records one [`Step`] per
//! observable decision of every `find` / `insert` / `remove` call. The log of
//! the latest call is played through [`RbTree::next`], [`RbTree::previous`]
//! and [`RbTree::skip`]; the engine itself never renders anything.

use std::cmp::Ordering;

use log::{debug, trace};
use thiserror::Error;

use crate::recorder::{Cue, Recorder};
use crate::red_black::{
    self, assert_red_black_tree, identify, predecessor, rotated_identification, InvariantError,
    RbNode, RbNodeLike,
};
use crate::snapshot::{Snapshot, SnapshotNode};
use crate::step::{ColourChange, Step};
use crate::types::{Colour, NodeIdentification, Relation};
use crate::util::{self, child, first, next, relation, set_child};

/// Logical failure of a tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("key {0} is already in the tree")]
    DuplicateKey(i64),
    #[error("key {0} is not in the tree")]
    KeyNotFound(i64),
}

/// Outcome of the recorded descent shared by every operation.
enum Search {
    Found(u32),
    Vacant {
        parent: Option<u32>,
        relation: Relation,
    },
}

/// Red-black tree over `i64` keys with a replayable step log.
#[derive(Clone, Debug, Default)]
pub struct RbTree {
    arena: Vec<RbNode>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    recorder: Recorder,
}

impl RbTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree with exactly the given shape and colours. No red-black
    /// property is checked; use [`verify`](Self::verify) for that.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut tree = Self::new();
        if let Some(root) = &snapshot.root {
            tree.build(root, None);
        }
        tree
    }

    fn build(&mut self, node: &SnapshotNode, parent: Option<(u32, Relation)>) {
        let i = match parent {
            None => self.attach(None, Relation::Root, node.key, node.colour),
            Some((p, side)) => self.attach(Some(p), side, node.key, node.colour),
        };
        if let Some(l) = &node.left {
            self.build(l, Some((i, Relation::Left)));
        }
        if let Some(r) = &node.right {
            self.build(r, Some((i, Relation::Right)));
        }
    }

    // ── Read-only access ───────────────────────────────────────────────────

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn key(&self, idx: u32) -> i64 {
        self.arena[idx as usize].k
    }

    pub fn colour(&self, idx: u32) -> Colour {
        self.arena[idx as usize].c
    }

    pub fn left(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].l
    }

    pub fn right(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].r
    }

    pub fn parent(&self, idx: u32) -> Option<u32> {
        self.arena[idx as usize].p
    }

    /// Structural identifier of the position `idx` occupies.
    pub fn identify(&self, idx: u32) -> NodeIdentification {
        identify(&self.arena, idx)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        let mut curr = first(&self.arena, self.root);
        std::iter::from_fn(move || {
            let i = curr?;
            curr = next(&self.arena, i);
            Some(self.arena[i as usize].k)
        })
    }

    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    pub fn black_height(&self) -> usize {
        red_black::black_height(&self.arena, self.root)
    }

    /// Membership test that leaves the step log alone.
    pub fn contains(&self, key: i64) -> bool {
        util::find(&self.arena, self.root, &key, |n: &RbNode| &n.k).is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            root: self.root.map(|r| Box::new(self.snapshot_node(r))),
        }
    }

    fn snapshot_node(&self, idx: u32) -> SnapshotNode {
        let n = &self.arena[idx as usize];
        SnapshotNode {
            key: n.k,
            colour: n.c,
            left: n.l.map(|l| Box::new(self.snapshot_node(l))),
            right: n.r.map(|r| Box::new(self.snapshot_node(r))),
        }
    }

    /// Checks the red-black and ordering invariants, and that the recorded
    /// length matches the reachable nodes.
    pub fn verify(&self) -> Result<(), InvariantError> {
        assert_red_black_tree(&self.arena, self.root)?;
        let counted = util::size(&self.arena, self.root);
        if counted != self.len {
            return Err(InvariantError::SizeMismatch {
                counted,
                recorded: self.len,
            });
        }
        Ok(())
    }

    /// Indented debug dump of the whole tree.
    pub fn print(&self) -> String {
        red_black::print(&self.arena, self.root, "")
    }

    // ── Playback ───────────────────────────────────────────────────────────

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Steps recorded by the latest operation.
    pub fn steps(&self) -> &[Step] {
        self.recorder.steps()
    }

    pub fn next(&mut self) -> Cue<'_> {
        self.recorder.next()
    }

    pub fn previous(&mut self) -> Cue<'_> {
        self.recorder.previous()
    }

    pub fn skip(&mut self) {
        self.recorder.skip()
    }

    // ── Operations ─────────────────────────────────────────────────────────

    /// Looks `key` up, recording the descent.
    pub fn find(&mut self, key: i64) -> Option<u32> {
        self.recorder.reset();
        self.recorder
            .note(format!("Beginning find operation for {key}"));
        self.recorder.note("Start at the root node");

        let found = match self.search(key) {
            Search::Found(i) => {
                self.recorder.note(format!(
                    "Ending find operation for {key}, returning the corresponding node"
                ));
                Some(i)
            }
            Search::Vacant { .. } => {
                self.recorder.note(format!(
                    "Ending find operation for {key}, returning nothing as the key was not found"
                ));
                None
            }
        };
        debug!(
            "find {key}: {} ({} steps)",
            if found.is_some() { "found" } else { "missing" },
            self.recorder.len()
        );
        found
    }

    /// Inserts `key`. Returns `false` when it is already present.
    pub fn insert(&mut self, key: i64) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Removes `key`. Returns `false` when it is absent.
    pub fn remove(&mut self, key: i64) -> bool {
        self.try_remove(key).is_ok()
    }

    pub fn try_insert(&mut self, key: i64) -> Result<(), TreeError> {
        self.recorder.reset();
        self.recorder
            .note(format!("Beginning insert operation for {key}"));
        self.recorder.note("Start at the root node");

        let (parent, side) = match self.search(key) {
            Search::Found(_) => {
                self.recorder.note(format!(
                    "Ending insert operation for {key}, returning false as the key already exists"
                ));
                debug!("insert {key}: duplicate ({} steps)", self.recorder.len());
                return Err(TreeError::DuplicateKey(key));
            }
            Search::Vacant { parent, relation } => (parent, relation),
        };

        let slot = self.slot_identification(parent, side);
        self.recorder.highlight(
            vec![slot],
            "Nil node encountered. Place for insertion has been found",
        );
        self.recorder.push(Step::CreateNode {
            node: slot,
            key,
            text: format!("Create a red node for {key}"),
        });
        let n = self.attach(parent, side, key, Colour::Red);

        self.recorder.note(
            "Proceeding to balance the tree and ensure the red black properties are maintained",
        );
        self.insert_fixup(n);
        self.paint_root_black();

        self.recorder.note(format!(
            "Ending insertion operation, returning true as {key} was successfully inserted"
        ));
        debug!("insert {key}: ok ({} steps)", self.recorder.len());
        Ok(())
    }

    pub fn try_remove(&mut self, key: i64) -> Result<(), TreeError> {
        self.recorder.reset();
        self.recorder
            .note(format!("Beginning delete operation for {key}"));
        self.recorder.note("Start at the root node");

        let mut n = match self.search(key) {
            Search::Found(i) => i,
            Search::Vacant { .. } => {
                self.recorder.note(format!(
                    "Ending delete operation, returning false, as {key} did not exist in the tree"
                ));
                debug!("remove {key}: missing ({} steps)", self.recorder.len());
                return Err(TreeError::KeyNotFound(key));
            }
        };

        if self.root == Some(n) && self.left(n).is_none() && self.right(n).is_none() {
            self.recorder.push(Step::DeleteNode {
                node: NodeIdentification::root(),
                key,
                colour: self.colour(n),
                text: format!(
                    "{key} is the root node and the only node in the tree, so it is safe to delete"
                ),
            });
            self.detach_leaf(n);
            self.finish_remove(key);
            return Ok(());
        }

        if self.left(n).is_some() && self.right(n).is_some() {
            self.recorder.note(format!(
                "The node to delete has two non nil children, so find the predecessor node to {key}"
            ));
            let pred = predecessor(&self.arena, n).expect("a node with two children has a predecessor");
            let pk = self.key(pred);
            self.swap_keys(
                n,
                pred,
                format!("Found the predecessor node {pk}, so swap {key} with {pk}"),
            );
            n = pred;
            debug_assert!(self.right(n).is_none());
        }

        if let Some(c) = self.left(n).or(self.right(n)) {
            self.remove_with_single_child(n, c);
            self.finish_remove(key);
            return Ok(());
        }

        let colour = self.colour(n);
        let parent = self.parent(n).expect("a leaf other than the sole root has a parent");
        let side = relation(&self.arena, n);
        let text = match colour {
            Colour::Red => format!("{key} is a red leaf node so it is safe to delete"),
            Colour::Black => format!(
                "{key} is a black leaf node, the tree will need to be balanced after deleting it"
            ),
        };
        self.recorder.push(Step::DeleteNode {
            node: self.id(n),
            key,
            colour,
            text,
        });
        self.detach_leaf(n);

        if colour.is_black() {
            self.remove_fixup(parent, side);
            self.paint_root_black();
        }
        self.finish_remove(key);
        Ok(())
    }

    fn finish_remove(&mut self, key: i64) {
        self.recorder.note(format!(
            "Ending delete operation, returning true, as {key} has been successfully removed"
        ));
        debug!("remove {key}: ok ({} steps)", self.recorder.len());
    }

    // ── Recorded descent ───────────────────────────────────────────────────

    fn search(&mut self, key: i64) -> Search {
        let mut parent = None;
        let mut side = Relation::Root;
        let mut curr = self.root;

        while let Some(i) = curr {
            let k = self.key(i);
            let id = self.id(i);
            self.recorder.highlight(
                vec![id],
                format!("Comparing the current node, {k}, with the desired key of {key}"),
            );
            match key.cmp(&k) {
                Ordering::Less => {
                    self.recorder.note(format!(
                        "{key} < {k} so traversing to the left child of the node"
                    ));
                    side = Relation::Left;
                }
                Ordering::Greater => {
                    self.recorder.note(format!(
                        "{key} > {k} so traversing to the right child of the node"
                    ));
                    side = Relation::Right;
                }
                Ordering::Equal => {
                    self.recorder
                        .note(format!("{key} = {k} so the node has been found"));
                    return Search::Found(i);
                }
            }
            parent = Some(i);
            curr = child(&self.arena, i, side);
        }

        let slot = self.slot_identification(parent, side);
        self.recorder.highlight(
            vec![slot],
            format!("Nil node encountered, thus {key} does not exist in the tree"),
        );
        Search::Vacant {
            parent,
            relation: side,
        }
    }

    // ── Rebalancing ────────────────────────────────────────────────────────

    fn insert_fixup(&mut self, mut n: u32) {
        loop {
            let nk = self.key(n);
            let Some(mut p) = self.parent(n) else {
                self.recorder.highlight(
                    vec![NodeIdentification::root()],
                    format!("{nk} has no parent, so it is the root node of the tree"),
                );
                break;
            };
            if self.colour(p).is_black() {
                self.recorder.highlight(
                    vec![self.id(p)],
                    format!(
                        "Parent of {nk} is black, so the red black properties were not violated and the tree is still balanced"
                    ),
                );
                break;
            }

            let g = self.parent(p).expect("a red parent is never the root");
            let uncle = child(&self.arena, g, !relation(&self.arena, p));
            let (pk, gk) = (self.key(p), self.key(g));
            self.recorder.highlight(
                vec![self.id(p), self.id(g)],
                format!(
                    "Parent of {nk} is red with key {pk}, and the grandparent is black with key {gk}"
                ),
            );

            if let Some(u) = uncle.filter(|&u| self.colour(u).is_red()) {
                let uk = self.key(u);
                self.recorder.highlight(
                    vec![self.id(u)],
                    format!("Uncle of {nk} exists and is red with key {uk}"),
                );
                self.recolor(
                    &[(p, Colour::Black), (u, Colour::Black), (g, Colour::Red)],
                    "Repaint the parent, uncle and grandparent".to_string(),
                );
                self.recorder.highlight(
                    vec![self.id(g)],
                    format!("Continue balancing from the grandparent {gk}"),
                );
                n = g;
                continue;
            }

            if relation(&self.arena, n) != relation(&self.arena, p) {
                self.rotate(
                    n,
                    format!(
                        "{nk} is an inner grandchild of {gk}, so rotate it up to its parent's position"
                    ),
                );
                self.recorder.highlight(
                    vec![self.id(p)],
                    format!("Reassign the former parent {pk} to be the node being balanced"),
                );
                std::mem::swap(&mut n, &mut p);
            }

            let (nk, pk) = (self.key(n), self.key(p));
            self.rotate(
                p,
                format!(
                    "{nk} is an outer grandchild of {gk}, so rotate its parent {pk} up to the grandparent's position"
                ),
            );
            self.recolor(
                &[(p, Colour::Black), (g, Colour::Red)],
                "Swap the colours of the parent and the grandparent".to_string(),
            );
            break;
        }
    }

    /// Removes `n`, a black node whose only child `c` is a red leaf, by
    /// moving `c`'s key up and deleting `c`'s position instead.
    fn remove_with_single_child(&mut self, n: u32, c: u32) {
        let (nk, ck) = (self.key(n), self.key(c));
        let side = relation(&self.arena, c);
        debug_assert!(self.colour(n).is_black() && self.colour(c).is_red());
        debug_assert!(self.left(c).is_none() && self.right(c).is_none());

        self.recorder.highlight(
            vec![
                self.id(n),
                self.id(c),
                NodeIdentification::child_of(nk, !side),
            ],
            format!("{nk} is black, with {ck} being the red {side} child, and a nil {} child", !side),
        );
        self.swap_keys(n, c, format!("Swap {nk} with its child {ck}"));
        self.recorder.push(Step::DeleteNode {
            node: self.id(c),
            key: nk,
            colour: self.colour(c),
            text: format!("Delete {nk}"),
        });
        self.detach_leaf(c);
        self.recorder.note(
            "Only a red leaf position was removed, so no red black property is broken",
        );
    }

    /// Resolves the black-height deficiency of the (possibly empty) `side`
    /// position under `p`.
    fn remove_fixup(&mut self, mut p: u32, mut side: Relation) {
        loop {
            let s = child(&self.arena, p, !side)
                .expect("a black-height deficient position always has a sibling");
            let close = child(&self.arena, s, side);
            let distant = child(&self.arena, s, !side);
            let (pk, sk) = (self.key(p), self.key(s));
            self.recorder.note(format!(
                "Observe the close relations of the {side} child of {pk}"
            ));

            if self.colour(s).is_red() {
                let c = close.expect("a red sibling has two black children");
                let d = distant.expect("a red sibling has two black children");
                let (ck, dk) = (self.key(c), self.key(d));
                self.recorder.highlight(
                    vec![self.id(s), self.id(p), self.id(c), self.id(d)],
                    format!(
                        "The sibling {sk} is red, thus the parent {pk}, the close nephew {ck}, and the distant nephew {dk} are black"
                    ),
                );
                self.remove_red_sibling(p, s, side);
                return;
            }

            if let Some(d) = distant.filter(|&d| self.colour(d).is_red()) {
                let dk = self.key(d);
                self.recorder
                    .highlight(vec![self.id(d)], format!("The distant nephew {dk} is red"));
                self.remove_red_distant(p, s, d);
                return;
            }

            if let Some(c) = close.filter(|&c| self.colour(c).is_red()) {
                let ck = self.key(c);
                self.recorder
                    .highlight(vec![self.id(c)], format!("The close nephew {ck} is red"));
                self.remove_red_close(p, s, c);
                return;
            }

            if self.colour(p).is_red() {
                self.recolor(
                    &[(s, Colour::Red), (p, Colour::Black)],
                    format!(
                        "The parent {pk} is red and both nephews are not, so the tree can be balanced by making the sibling {sk} red, and the parent {pk} black"
                    ),
                );
                return;
            }

            self.recolor(
                &[(s, Colour::Red)],
                format!(
                    "Change the colour of the sibling {sk} to red to reduce the sibling branch's black count by 1"
                ),
            );
            let Some(g) = self.parent(p) else {
                self.recorder.highlight(
                    vec![NodeIdentification::root()],
                    format!("{pk} is the root, so the missing black node is absorbed by every path"),
                );
                return;
            };
            self.recorder.highlight(
                vec![self.id(p)],
                format!(
                    "The tree has been balanced as much as possible at the current depth. Need to move up the tree by looking at the parent node {pk}"
                ),
            );
            side = relation(&self.arena, p);
            p = g;
        }
    }

    fn remove_red_sibling(&mut self, p: u32, s: u32, side: Relation) {
        let (pk, sk) = (self.key(p), self.key(s));
        self.rotate(s, format!("Rotate up the sibling {sk}"));
        self.recolor(
            &[(s, Colour::Black), (p, Colour::Red)],
            format!(
                "Change the colours of the former parent {pk} to red, and the former sibling {sk} to black"
            ),
        );

        // The former close nephew is the new sibling.
        let s = child(&self.arena, p, !side).expect("the former close nephew is the new sibling");
        let close = child(&self.arena, s, side);
        let distant = child(&self.arena, s, !side);

        if let Some(d) = distant.filter(|&d| self.colour(d).is_red()) {
            let dk = self.key(d);
            self.recorder
                .highlight(vec![self.id(d)], format!("The distant nephew {dk} is now red"));
            self.remove_red_distant(p, s, d);
            return;
        }

        if let Some(c) = close.filter(|&c| self.colour(c).is_red()) {
            let ck = self.key(c);
            self.recorder
                .highlight(vec![self.id(c)], format!("The close nephew {ck} is now red"));
            self.remove_red_close(p, s, c);
            return;
        }

        let sk = self.key(s);
        self.recolor(
            &[(s, Colour::Red), (p, Colour::Black)],
            format!(
                "The parent {pk} is red and both nephews are not, so the tree can be balanced by making the sibling {sk} red, and the parent {pk} black"
            ),
        );
    }

    fn remove_red_close(&mut self, p: u32, s: u32, c: u32) {
        let (sk, ck) = (self.key(s), self.key(c));
        self.rotate(c, format!("Rotate up the close nephew {ck}"));
        self.recolor(
            &[(s, Colour::Red), (c, Colour::Black)],
            format!(
                "Change the colours of the former sibling {sk} to red, and the former close nephew {ck} to black"
            ),
        );
        // `c` now sits in the sibling position with the former sibling as its
        // distant child.
        self.remove_red_distant(p, c, s);
    }

    fn remove_red_distant(&mut self, p: u32, s: u32, d: u32) {
        let (pk, sk, dk) = (self.key(p), self.key(s), self.key(d));
        let pc = self.colour(p);
        self.rotate(s, format!("Rotate up the sibling {sk}"));
        self.recolor(
            &[(s, pc), (p, Colour::Black), (d, Colour::Black)],
            format!(
                "Change the colours of the former sibling {sk} to {pc}, the former parent {pk} to black, and the former distant nephew {dk} to black to finish balancing the tree"
            ),
        );
    }

    fn paint_root_black(&mut self) {
        if let Some(root) = self.root {
            self.recolor(
                &[(root, Colour::Black)],
                "Ensure that the root node is black".to_string(),
            );
        }
    }

    // ── Recorded primitives ────────────────────────────────────────────────

    fn id(&self, idx: u32) -> NodeIdentification {
        identify(&self.arena, idx)
    }

    fn slot_identification(&self, parent: Option<u32>, side: Relation) -> NodeIdentification {
        match parent {
            None => NodeIdentification::root(),
            Some(p) => NodeIdentification::child_of(self.key(p), side),
        }
    }

    fn recolor(&mut self, changes: &[(u32, Colour)], text: String) {
        let nodes = changes.iter().map(|&(i, _)| self.id(i)).collect();
        let colours = changes
            .iter()
            .map(|&(i, new)| ColourChange::new(new, self.colour(i)))
            .collect();
        self.recorder.push(Step::RecolorNodes {
            nodes,
            colours,
            text,
        });
        for &(i, c) in changes {
            trace!("recolor {} -> {c}", self.key(i));
            self.set_colour(i, c);
        }
    }

    fn rotate(&mut self, n: u32, text: String) {
        let nodes = [self.id(n), rotated_identification(&self.arena, n)];
        self.recorder.push(Step::RotateUp { nodes, text });
        trace!("rotate up {}", self.key(n));
        let rotated = self.rotate_up(n);
        assert!(rotated, "rotated node {} has no parent", self.key(n));
    }

    fn swap_keys(&mut self, a: u32, b: u32, text: String) {
        let (ka, kb) = (self.key(a), self.key(b));
        self.recorder.push(Step::SwapNodes {
            nodes: [self.id(a), self.id(b)],
            keys: [ka, kb],
            text,
        });
        trace!("swap keys {ka} <-> {kb}");
        self.exchange_keys(a, b);
    }

    // ── Unrecorded primitives, shared with replay ─────────────────────────

    fn alloc(&mut self, key: i64, colour: Colour) -> u32 {
        let node = RbNode::with_colour(key, colour);
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = node;
                i
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Creates a node in the empty `side` position under `parent`, or as the
    /// root when `parent` is `None`.
    pub(crate) fn attach(
        &mut self,
        parent: Option<u32>,
        side: Relation,
        key: i64,
        colour: Colour,
    ) -> u32 {
        let n = self.alloc(key, colour);
        match parent {
            Some(p) => set_child(&mut self.arena, p, side, Some(n)),
            None => self.root = Some(n),
        }
        self.len += 1;
        n
    }

    /// Unlinks the childless node `idx` and recycles its slot.
    pub(crate) fn detach_leaf(&mut self, idx: u32) {
        debug_assert!(self.left(idx).is_none() && self.right(idx).is_none());
        match self.parent(idx) {
            Some(p) => {
                let side = relation(&self.arena, idx);
                set_child(&mut self.arena, p, side, None);
            }
            None => self.root = None,
        }
        self.arena[idx as usize] = RbNode::new(0);
        self.free.push(idx);
        self.len -= 1;
    }

    pub(crate) fn rotate_up(&mut self, idx: u32) -> bool {
        red_black::rotate_up(&mut self.arena, &mut self.root, idx)
    }

    pub(crate) fn set_colour(&mut self, idx: u32, colour: Colour) {
        self.arena[idx as usize].set_colour(colour);
    }

    pub(crate) fn exchange_keys(&mut self, a: u32, b: u32) {
        let (ka, kb) = (self.key(a), self.key(b));
        self.arena[a as usize].set_key(kb);
        self.arena[b as usize].set_key(ka);
    }

    /// Node holding `key`. Falls back to an in-order scan because a
    /// two-children removal briefly parks a key out of search order.
    pub(crate) fn node_with_key(&self, key: i64) -> Option<u32> {
        util::find(&self.arena, self.root, &key, |n: &RbNode| &n.k).or_else(|| {
            let mut curr = first(&self.arena, self.root);
            while let Some(i) = curr {
                if self.arena[i as usize].k == key {
                    return Some(i);
                }
                curr = next(&self.arena, i);
            }
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(keys: &[i64]) -> RbTree {
        let mut t = RbTree::new();
        for &k in keys {
            assert!(t.insert(k));
        }
        t
    }

    #[test]
    fn slots_are_recycled_after_removal() {
        let mut t = tree(&[1, 2, 3]);
        assert!(t.remove(2));
        assert_eq!(t.free.len(), 1);
        assert!(t.insert(4));
        assert!(t.free.is_empty());
        assert_eq!(t.arena.len(), 3);
        assert_eq!(t.keys().collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn verify_counts_reachable_nodes() {
        let mut t = tree(&[4, 2, 6]);
        assert!(t.verify().is_ok());
        t.len = 2;
        assert_eq!(
            t.verify(),
            Err(InvariantError::SizeMismatch {
                counted: 3,
                recorded: 2,
            })
        );
    }

    #[test]
    fn node_with_key_finds_keys_parked_out_of_order() {
        let mut t = tree(&[2, 1, 3]);
        let (a, b) = (t.root().unwrap(), t.left(t.root().unwrap()).unwrap());
        t.exchange_keys(a, b);
        assert_eq!(t.node_with_key(2), Some(b));
        assert_eq!(t.node_with_key(1), Some(a));
        assert_eq!(t.node_with_key(9), None);
    }

    #[test]
    fn find_records_descent_and_outcome() {
        let mut t = tree(&[5, 3, 7]);
        assert!(t.find(3).is_some());
        let highlights = t
            .steps()
            .iter()
            .filter(|s| matches!(s, Step::Highlight { .. }))
            .count();
        assert_eq!(highlights, 2);
        assert!(t.steps().last().unwrap().description().contains("returning the corresponding node"));

        assert!(t.find(4).is_none());
        let last_highlight = t
            .steps()
            .iter()
            .rev()
            .find(|s| matches!(s, Step::Highlight { .. }))
            .unwrap();
        assert_eq!(
            last_highlight.nodes(),
            &[NodeIdentification::child_of(3, Relation::Right)]
        );
    }
}
