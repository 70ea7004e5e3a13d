#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;

pub use api::{
    AnnotateReport, Options, annotate, annotate_batch, annotate_verbose_with, annotate_with, load_rule_table,
};
pub use engine::{
    AnnotateFlags, AnnotateStats, Candidate, Direction, HeadChoice, HeadRule, HeadRuleTable, MAX_TREE_DEPTH,
    MatchMode, Selection, select_head, validate,
};
pub use error::{ConfigurationError, Error, InvalidTreeError};
pub use rules::Language;

use std::borrow::Cow;

// --- Parse tree ---------------------------------------------------------------

/// Legacy label decoration for head constituents (`NP=H`).
///
/// Heads are tracked through [`ParseNode::head`]; the decorated form only
/// exists for consumers that still expect it in category labels.
pub const HEAD_MARKER: &str = "=H";

/// Strip any trailing head-marker decoration from `label`.
///
/// ```
/// use headfinder::canonical_category;
///
/// assert_eq!(canonical_category("NP=H"), "NP");
/// assert_eq!(canonical_category("VP"), "VP");
/// ```
pub fn canonical_category(label: &str) -> &str {
    let mut label = label;
    while let Some(stripped) = label.strip_suffix(HEAD_MARKER) {
        label = stripped;
    }
    label
}

/// A node of a constituency parse tree.
///
/// Terminals have no children and usually carry the surface `token`. Every
/// node owns its subtree; there are no parent links.
///
/// ```text
///            S
///        ┌───┴────┐
///       NP      VP (head)
///    ┌───┴──┐     │
///   DT   NN (head) VBD (head)
///  "the" "dog"   "barked"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseNode {
    /// Phrasal or part-of-speech label, without head decoration.
    pub category: String,
    /// Surface word for terminal nodes.
    pub token: Option<String>,
    /// Ordered children; empty for terminals.
    pub children: Vec<ParseNode>,
    /// True when this node is the head child of its parent.
    pub head: bool,
}

impl ParseNode {
    /// Create an internal node (or a token-less terminal when `children` is empty).
    pub fn new(category: impl Into<String>, children: Vec<ParseNode>) -> Self {
        ParseNode { category: category.into(), token: None, children, head: false }
    }

    /// Create a terminal carrying `token`.
    pub fn terminal(category: impl Into<String>, token: impl Into<String>) -> Self {
        ParseNode { category: category.into(), token: Some(token.into()), children: Vec::new(), head: false }
    }

    /// Build a node from a possibly decorated label such as `VP=H`.
    ///
    /// The marker is removed from the category and turned into the `head` flag.
    pub fn from_decorated(label: &str, children: Vec<ParseNode>) -> Self {
        let category = canonical_category(label);
        ParseNode { category: category.to_string(), token: None, children, head: category.len() != label.len() }
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_head(&self) -> bool {
        self.head
    }

    /// Category with the legacy `=H` suffix appended when this node is a head.
    pub fn decorated_category(&self) -> Cow<'_, str> {
        let category = canonical_category(&self.category);
        if self.head { Cow::Owned(format!("{category}{HEAD_MARKER}")) } else { Cow::Borrowed(category) }
    }

    /// Index of the child marked as head, if any.
    pub fn head_index(&self) -> Option<usize> {
        self.children.iter().position(|child| child.head)
    }

    pub fn head_child(&self) -> Option<&ParseNode> {
        self.children.iter().find(|child| child.head)
    }

    /// Follow head children down to a terminal.
    ///
    /// Returns `None` when some internal node on the way has no head marked
    /// (e.g. the tree was never annotated).
    pub fn head_terminal(&self) -> Option<&ParseNode> {
        let mut node = self;
        while !node.is_terminal() {
            node = node.head_child()?;
        }
        Some(node)
    }

    /// Token of [`head_terminal`](Self::head_terminal).
    pub fn head_word(&self) -> Option<&str> {
        self.head_terminal()?.token.as_deref()
    }

    /// Remove every head marker in this subtree, including on `self`.
    pub fn clear_heads(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.head = false;
            stack.extend(node.children.iter_mut());
        }
    }

    /// Pre-order iterator over this subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}

/// Pre-order traversal returned by [`ParseNode::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a ParseNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ParseNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
