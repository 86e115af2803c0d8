use crate::types::{Colour, Node};

/// Arena node of the red-black tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RbNode {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i64,
    pub c: Colour,
}

impl RbNode {
    /// New detached node. Fresh nodes are red.
    pub fn new(k: i64) -> Self {
        Self::with_colour(k, Colour::Red)
    }

    pub fn with_colour(k: i64, c: Colour) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            c,
        }
    }
}

impl Node for RbNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

/// Red-black specific node behavior.
pub trait RbNodeLike: Node {
    fn key(&self) -> i64;
    fn set_key(&mut self, key: i64);
    fn colour(&self) -> Colour;
    fn set_colour(&mut self, colour: Colour);

    fn is_black(&self) -> bool {
        self.colour().is_black()
    }
}

impl RbNodeLike for RbNode {
    fn key(&self) -> i64 {
        self.k
    }

    fn set_key(&mut self, key: i64) {
        self.k = key;
    }

    fn colour(&self) -> Colour {
        self.c
    }

    fn set_colour(&mut self, colour: Colour) {
        self.c = colour;
    }
}
