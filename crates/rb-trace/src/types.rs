//! Node link trait, colours and structural identifiers.
//!
//! Nodes live in a [`Vec`]-backed arena. Each "pointer" is an `Option<u32>`
//! index into that arena, so every tree-manipulation function takes the arena
//! and works with indices instead of references.
//!
//! Steps never carry arena indices: a position is addressed by a
//! [`NodeIdentification`], the key of its parent plus the side it hangs on.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Parent/child links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Node colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Black,
}

impl Colour {
    #[inline]
    pub fn is_black(self) -> bool {
        self == Colour::Black
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self == Colour::Red
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Red => f.write_str("red"),
            Colour::Black => f.write_str("black"),
        }
    }
}

/// Side a node hangs on under its parent. The root has no parent and uses
/// [`Relation::Root`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Left,
    Right,
    Root,
}

impl Not for Relation {
    type Output = Relation;

    fn not(self) -> Relation {
        match self {
            Relation::Left => Relation::Right,
            Relation::Right => Relation::Left,
            Relation::Root => Relation::Root,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Left => f.write_str("left"),
            Relation::Right => f.write_str("right"),
            Relation::Root => f.write_str("root"),
        }
    }
}

/// Address of a tree position by its parent's key and side.
///
/// The position may be empty (a `None` child), which is how steps refer to
/// the slot a node is about to be created in or was just removed from.
/// `(None, Relation::Root)` always denotes the root position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIdentification {
    pub parent: Option<i64>,
    pub relation: Relation,
}

impl NodeIdentification {
    pub fn new(parent: Option<i64>, relation: Relation) -> Self {
        Self { parent, relation }
    }

    /// The root position.
    pub fn root() -> Self {
        Self::new(None, Relation::Root)
    }

    /// The `relation` child position of the node holding `parent`.
    pub fn child_of(parent: i64, relation: Relation) -> Self {
        Self::new(Some(parent), relation)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for NodeIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            None => f.write_str("root"),
            Some(parent) => write!(f, "{} of {parent}", self.relation),
        }
    }
}
