//! Red-black node layout and the structural primitives the engine is built
//! from: rotation, predecessor lookup, identification and verification.

pub mod print;
pub mod types;
pub mod util;

pub use print::print;
pub use types::{RbNode, RbNodeLike};
pub use util::{
    assert_red_black_tree, black_height, identify, predecessor, rotate_up,
    rotated_identification, InvariantError,
};
