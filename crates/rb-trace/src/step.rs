//! Step vocabulary of the operation log.
//!
//! Every step carries enough information to be replayed forward (reproducing
//! the mutation) and backward (undoing it). Positions are always given as
//! [`NodeIdentification`]s, never as arena indices, so a step stays meaningful
//! for any tree holding the same shape, including a renderer's own copy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Colour, NodeIdentification};

/// Which way a step is being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Colour of one node after and before a recolouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourChange {
    pub new: Colour,
    pub old: Colour,
}

impl ColourChange {
    pub fn new(new: Colour, old: Colour) -> Self {
        Self { new, old }
    }

    /// Colour to paint when playing in `direction`.
    pub fn target(self, direction: Direction) -> Colour {
        match direction {
            Direction::Forward => self.new,
            Direction::Backward => self.old,
        }
    }
}

/// One observable decision of a `find`, `insert` or `remove` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Informational text, no structural meaning.
    Note { text: String },
    /// Marks positions of interest. Plays the same both ways.
    Highlight {
        nodes: Vec<NodeIdentification>,
        text: String,
    },
    /// An empty position received a new red node holding `key`.
    CreateNode {
        node: NodeIdentification,
        key: i64,
        text: String,
    },
    /// The leaf holding `key` was removed from `node`. `colour` is the colour
    /// it had, so the backward replay recreates it faithfully.
    DeleteNode {
        node: NodeIdentification,
        key: i64,
        colour: Colour,
        text: String,
    },
    /// `nodes[i]` changed colour as described by `colours[i]`.
    RecolorNodes {
        nodes: Vec<NodeIdentification>,
        colours: Vec<ColourChange>,
        text: String,
    },
    /// `nodes[0]` was rotated up over its parent. `nodes[1]` is where that
    /// parent sits afterwards; rotating it back up undoes the step.
    RotateUp {
        nodes: [NodeIdentification; 2],
        text: String,
    },
    /// The nodes at `nodes` (addressed before the swap) exchanged their keys,
    /// `keys[0]` and `keys[1]` respectively. Self-inverse.
    SwapNodes {
        nodes: [NodeIdentification; 2],
        keys: [i64; 2],
        text: String,
    },
}

impl Step {
    pub fn note(text: impl Into<String>) -> Self {
        Step::Note { text: text.into() }
    }

    pub fn highlight(nodes: Vec<NodeIdentification>, text: impl Into<String>) -> Self {
        Step::Highlight {
            nodes,
            text: text.into(),
        }
    }

    /// Human-readable description of the step.
    pub fn description(&self) -> &str {
        match self {
            Step::Note { text }
            | Step::Highlight { text, .. }
            | Step::CreateNode { text, .. }
            | Step::DeleteNode { text, .. }
            | Step::RecolorNodes { text, .. }
            | Step::RotateUp { text, .. }
            | Step::SwapNodes { text, .. } => text,
        }
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Note { .. } => "note",
            Step::Highlight { .. } => "highlight",
            Step::CreateNode { .. } => "create",
            Step::DeleteNode { .. } => "delete",
            Step::RecolorNodes { .. } => "recolor",
            Step::RotateUp { .. } => "rotate-up",
            Step::SwapNodes { .. } => "swap",
        }
    }

    /// Every position the step refers to.
    pub fn nodes(&self) -> &[NodeIdentification] {
        match self {
            Step::Note { .. } => &[],
            Step::Highlight { nodes, .. } | Step::RecolorNodes { nodes, .. } => nodes,
            Step::CreateNode { node, .. } | Step::DeleteNode { node, .. } => {
                std::slice::from_ref(node)
            }
            Step::RotateUp { nodes, .. } | Step::SwapNodes { nodes, .. } => nodes,
        }
    }

    /// Whether replaying the step changes the tree (shape, keys or colours).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Step::Note { .. } | Step::Highlight { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9} {}", self.kind(), self.description())?;
        let nodes = self.nodes();
        if !nodes.is_empty() {
            let list: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
            write!(f, " [{}]", list.join(", "))?;
        }
        Ok(())
    }
}
