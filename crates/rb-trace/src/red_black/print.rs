use super::types::RbNodeLike;

/// Debug dump of the subtree at `node`, one node per line with `L=` / `R=`
/// prefixes for the children and `∅` for an absent child.
pub fn print<N: RbNodeLike>(arena: &[N], node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "{} {}\n{tab}L={left}\n{tab}R={right}",
                n.key(),
                n.colour()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::RbNode;
    use crate::types::{Colour, Relation};
    use crate::util::set_child;

    #[test]
    fn prints_nested_children() {
        let mut arena = vec![RbNode::with_colour(5, Colour::Black), RbNode::new(3)];
        set_child(&mut arena, 0, Relation::Left, Some(1));
        assert_eq!(
            print(&arena, Some(0), ""),
            "5 black\nL=3 red\n  L=∅\n  R=∅\nR=∅"
        );
        assert_eq!(print(&arena, None, ""), "∅");
    }
}
