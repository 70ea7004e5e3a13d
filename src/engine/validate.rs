//! Structural checks run before annotation.
//!
//! Ownership already rules out cycles and children with a foreign parent, so
//! what is left to check is the per-node contract. Category labels are not
//! part of it: empty or blank labels are annotated through the default rule.

use crate::{InvalidTreeError, ParseNode};
use tracing::warn;

/// Deepest nesting accepted by [`validate`]. The root is at depth 0.
pub const MAX_TREE_DEPTH: usize = 4096;

/// Check that `root` can be annotated.
///
/// The depth limit is checked first; other violations are reported in
/// pre-order.
pub fn validate(root: &ParseNode) -> Result<(), InvalidTreeError> {
    check_depth(root)?;

    let mut stack: Vec<(Vec<usize>, &ParseNode)> = vec![(Vec::new(), root)];
    while let Some((path, node)) = stack.pop() {
        if node.token.is_some() && !node.children.is_empty() {
            return Err(reject(InvalidTreeError::TokenWithChildren { path }));
        }

        for (idx, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(idx);
            stack.push((child_path, child));
        }
    }

    Ok(())
}

/// Depth limit only. Applied even when full validation is switched off.
pub(crate) fn check_depth(root: &ParseNode) -> Result<(), InvalidTreeError> {
    let mut stack: Vec<(usize, &ParseNode)> = vec![(0, root)];
    while let Some((depth, node)) = stack.pop() {
        if depth > MAX_TREE_DEPTH {
            return Err(reject(InvalidTreeError::TooDeep { depth, max: MAX_TREE_DEPTH }));
        }
        stack.extend(node.children.iter().map(|child| (depth + 1, child)));
    }
    Ok(())
}

fn reject(error: InvalidTreeError) -> InvalidTreeError {
    warn!(%error, "rejecting parse tree");
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(levels: usize) -> ParseNode {
        let mut tree = ParseNode::terminal("NN", "deep");
        for _ in 0..levels {
            tree = ParseNode::new("NP", vec![tree]);
        }
        tree
    }

    #[test]
    fn accepts_well_formed_tree() {
        let tree = ParseNode::new(
            "S",
            vec![
                ParseNode::new("NP", vec![ParseNode::terminal("PRP", "it")]),
                ParseNode::new("VP", vec![ParseNode::terminal("VBZ", "works")]),
            ],
        );
        assert_eq!(validate(&tree), Ok(()));
        assert_eq!(validate(&ParseNode::terminal("NN", "word")), Ok(()));
    }

    #[test]
    fn empty_and_blank_categories_are_accepted() {
        let tree = ParseNode::new(
            "",
            vec![
                ParseNode::terminal(" ", "a"),
                ParseNode::new("=H", vec![ParseNode::terminal("", "b")]),
            ],
        );
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn token_with_children_is_rejected() {
        let mut np = ParseNode::new("NP", vec![ParseNode::terminal("NN", "x")]);
        np.token = Some("x".into());
        let tree = ParseNode::new("S", vec![np]);
        assert_eq!(validate(&tree), Err(InvalidTreeError::TokenWithChildren { path: vec![0] }));
    }

    #[test]
    fn first_violation_in_pre_order_wins() {
        let mut first = ParseNode::new("NP", vec![ParseNode::terminal("NN", "x")]);
        first.token = Some("x".into());
        let mut second = first.clone();
        second.children[0] = first.clone();
        let tree = ParseNode::new("S", vec![ParseNode::new("VP", vec![first]), second]);
        assert_eq!(validate(&tree), Err(InvalidTreeError::TokenWithChildren { path: vec![0, 0] }));
    }

    #[test]
    fn rejects_overly_deep_trees() {
        let tree = chain(MAX_TREE_DEPTH + 1);
        let expected = Err(InvalidTreeError::TooDeep { depth: MAX_TREE_DEPTH + 1, max: MAX_TREE_DEPTH });
        assert_eq!(validate(&tree), expected);
        assert_eq!(check_depth(&tree), expected);
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let tree = chain(MAX_TREE_DEPTH);
        assert_eq!(check_depth(&tree), Ok(()));
        assert_eq!(validate(&tree), Ok(()));
    }
}
