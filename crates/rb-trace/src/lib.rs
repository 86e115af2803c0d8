//! Red-black tree over `i64` keys that records a replayable log of every
//! decision its operations make.
//!
//! Each `find`, `insert` or `remove` call on [`RbTree`] resets the log and
//! appends one [`Step`] per observable event: a comparison, a node creation,
//! a recolouring, a rotation, a key swap. Steps address nodes structurally
//! ([`NodeIdentification`]: parent key plus side), so a consumer holding its
//! own copy of the tree can apply them forward or undo them backward.
//!
//! All "pointers" are `Option<u32>` indices into the tree's node arena.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] trait, [`Colour`], [`Relation`], [`NodeIdentification`] |
//! [`util`] | Arena link helpers, in-order walks, BST lookup |
//! [`red_black`] | [`RbNode`](red_black::RbNode), rotation, verification, debug print |
//! [`step`] | [`Step`] vocabulary and [`Direction`] |
//! [`recorder`] | [`Recorder`]: step log plus playback cursor |
//! [`tree`] | [`RbTree`], the recording engine |
//! [`replay`] | Applying steps to a tree forward and backward |
//! [`snapshot`] | Owned, comparable copy of a tree |
//! [`op`], [`stress`], [`fuzzer`] | Scripted and randomised drivers |
//! [`cli`] | The `rb-trace` command line |
//!
//! ```
//! use rb_trace::{replay, RbTree};
//!
//! let mut tree = RbTree::new();
//! tree.insert(5);
//! tree.insert(3);
//! let before = tree.snapshot();
//! tree.insert(1);
//!
//! let mut undone = tree.clone();
//! replay::backward(&mut undone, tree.steps()).unwrap();
//! assert_eq!(undone.snapshot(), before);
//! ```

pub mod cli;
pub mod fuzzer;
pub mod op;
pub mod recorder;
pub mod red_black;
pub mod replay;
pub mod snapshot;
pub mod step;
pub mod stress;
pub mod tree;
pub mod types;
pub mod util;

pub use op::Op;
pub use recorder::{Cue, Recorder};
pub use red_black::InvariantError;
pub use replay::ReplayError;
pub use snapshot::{Snapshot, SnapshotNode};
pub use step::{ColourChange, Direction, Step};
pub use tree::{RbTree, TreeError};
pub use types::{Colour, Node, NodeIdentification, Relation};
