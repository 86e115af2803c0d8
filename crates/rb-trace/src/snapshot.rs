//! Owned, index-free copy of a tree's shape, keys and colours.

use serde::{Deserialize, Serialize};

use crate::types::Colour;

/// One node of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub key: i64,
    pub colour: Colour,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub left: Option<Box<SnapshotNode>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right: Option<Box<SnapshotNode>>,
}

impl SnapshotNode {
    pub fn new(key: i64, colour: Colour) -> Self {
        Self {
            key,
            colour,
            left: None,
            right: None,
        }
    }

    pub fn red(key: i64) -> Self {
        Self::new(key, Colour::Red)
    }

    pub fn black(key: i64) -> Self {
        Self::new(key, Colour::Black)
    }

    pub fn with_left(mut self, left: SnapshotNode) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: SnapshotNode) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    fn collect_keys(&self, out: &mut Vec<i64>) {
        if let Some(l) = &self.left {
            l.collect_keys(out);
        }
        out.push(self.key);
        if let Some(r) = &self.right {
            r.collect_keys(out);
        }
    }
}

/// Two trees are equal when their snapshots are: same shape, keys and colours,
/// regardless of how their arenas are laid out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: Option<Box<SnapshotNode>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(root: SnapshotNode) -> Self {
        Self {
            root: Some(Box::new(root)),
        }
    }

    /// Keys in order.
    pub fn keys(&self) -> Vec<i64> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_keys(&mut out);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}
