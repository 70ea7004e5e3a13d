//! Head annotation traversal.
//!
//! This module is the operational core of the engine: given a
//! [`HeadRuleTable`], it walks a tree breadth-first and marks one head child
//! under every internal node.
//!
//! ```text
//! queue: [S]
//!   S   -> rules(S)  -> head VP    mark VP, enqueue NP VP
//!   NP  -> rules(NP) -> head NN    mark NN, enqueue DT NN
//!   VP  -> unary     -> head VBD   mark VBD, enqueue VBD
//!   DT, NN, VBD: terminals, nothing to do
//! ```
//!
//! A node is dequeued only after its parent has decided whether it is a head,
//! but the rule lookup depends on the node's own category only, so the
//! visiting order never changes the outcome.
//!
//! ## Head selection for one node
//!
//! ```text
//! registered rules, in order ──▶ first rule that matches a child
//!            │ none
//!            ▼
//! default rule               ──▶ match
//!            │ none
//!            ▼
//! first child in the default rule's direction
//! ```

use super::metrics::{AnnotateStats, HeadChoice, Selection};
use super::table::HeadRuleTable;
use super::validate::{check_depth, validate};
use crate::{InvalidTreeError, ParseNode, canonical_category};
use std::collections::VecDeque;
use tracing::trace;

bitflags::bitflags! {
    /// Switches for one annotation run. [`Default`] enables all of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AnnotateFlags: u8 {
        /// Take the only child of a unary node as head without consulting the table.
        const UNARY_SHORTCUT = 1 << 0;
        /// Validate the tree before touching it. The depth limit applies
        /// even without this flag.
        const VALIDATE       = 1 << 1;
    }
}

impl Default for AnnotateFlags {
    fn default() -> Self {
        AnnotateFlags::all()
    }
}

/// Pick the head among children with categories `children` for a node of
/// `category`.
///
/// Returns `None` only when `children` is empty. Both the node category and
/// the child categories may carry `=H` decoration; it is ignored.
///
/// ```
/// use headfinder::{HeadRuleTable, select_head};
///
/// let table = HeadRuleTable::load("en").unwrap();
/// let (head, _) = select_head(&table, "PP", &["IN", "NP"]).unwrap();
/// assert_eq!(head, 0);
/// ```
pub fn select_head(table: &HeadRuleTable, category: &str, children: &[&str]) -> Option<(usize, Selection)> {
    if children.is_empty() {
        return None;
    }
    let children: Vec<&str> = children.iter().map(|c| canonical_category(c)).collect();

    if let Some(rules) = table.rules_for(category) {
        for (idx, rule) in rules.iter().enumerate() {
            if let Some(head) = rule.select(&children) {
                return Some((head, Selection::Rule(idx)));
            }
        }
    }

    let default = table.default_rule();
    if let Some(head) = default.select(&children) {
        return Some((head, Selection::DefaultRule));
    }
    default.direction().first(children.len()).map(|head| (head, Selection::DefaultPosition))
}

/// Output of one traversal.
#[derive(Debug, Default)]
pub(crate) struct Run {
    pub stats: AnnotateStats,
    pub choices: Vec<HeadChoice>,
}

/// Applies a table to trees. Cheap to construct; holds no per-tree state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Annotator<'t> {
    table: &'t HeadRuleTable,
    flags: AnnotateFlags,
    record_choices: bool,
}

impl<'t> Annotator<'t> {
    pub(crate) fn new(table: &'t HeadRuleTable, flags: AnnotateFlags) -> Self {
        Annotator { table, flags, record_choices: false }
    }

    /// Also collect a [`HeadChoice`] per internal node.
    pub(crate) fn recording(mut self) -> Self {
        self.record_choices = true;
        self
    }

    /// Validate (or only check depth when disabled), clear stale markers,
    /// then annotate `root`.
    ///
    /// On error the tree is left untouched.
    pub(crate) fn run(&self, root: &mut ParseNode) -> Result<Run, InvalidTreeError> {
        if self.flags.contains(AnnotateFlags::VALIDATE) {
            validate(root)?;
        } else {
            check_depth(root)?;
        }
        root.clear_heads();

        let mut run = Run::default();
        let mut queue: VecDeque<(Vec<usize>, &mut ParseNode)> = VecDeque::new();
        queue.push_back((Vec::new(), root));

        while let Some((path, node)) = queue.pop_front() {
            if node.children.is_empty() {
                run.stats.terminals += 1;
                continue;
            }
            run.stats.internal_nodes += 1;

            let Some((head, selection)) = self.choose(node) else {
                continue;
            };
            run.stats.record(selection);

            trace!(category = %node.category, head, ?selection, "selected head");

            if self.record_choices {
                run.choices.push(HeadChoice {
                    path: path.clone(),
                    category: canonical_category(&node.category).to_string(),
                    head_index: head,
                    head_category: canonical_category(&node.children[head].category).to_string(),
                    selection,
                });
            }

            for (idx, child) in node.children.iter_mut().enumerate() {
                child.head = idx == head;
                let child_path = if self.record_choices {
                    let mut child_path = path.clone();
                    child_path.push(idx);
                    child_path
                } else {
                    Vec::new()
                };
                queue.push_back((child_path, child));
            }
        }

        Ok(run)
    }

    fn choose(&self, node: &ParseNode) -> Option<(usize, Selection)> {
        if self.flags.contains(AnnotateFlags::UNARY_SHORTCUT) && node.children.len() == 1 {
            return Some((0, Selection::Unary));
        }
        let categories: Vec<&str> = node.children.iter().map(|child| child.category.as_str()).collect();
        select_head(self.table, &node.category, &categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_TREE_DEPTH;

    fn table(spec: &str) -> HeadRuleTable {
        HeadRuleTable::from_spec("test", spec).unwrap()
    }

    fn node(category: &str, children: &[&str]) -> ParseNode {
        ParseNode::new(category, children.iter().map(|c| ParseNode::new(*c, vec![])).collect())
    }

    fn run(table: &HeadRuleTable, tree: &mut ParseNode) -> Run {
        Annotator::new(table, AnnotateFlags::default()).recording().run(tree).unwrap()
    }

    #[test]
    fn earlier_rule_beats_later_rule() {
        let table = table("@default rtl *\nX ltr A B\nX ltr C\n");
        assert_eq!(select_head(&table, "X", &["C", "A"]), Some((1, Selection::Rule(0))));
    }

    #[test]
    fn later_rule_used_when_earlier_matches_nothing() {
        let table = table("@default rtl *\nX ltr A B\nX ltr C\n");
        assert_eq!(select_head(&table, "X", &["D", "C", "E"]), Some((1, Selection::Rule(1))));
    }

    #[test]
    fn vp_scenario_scans_right_to_left() {
        let table = table("@default ltr *\nVP rtl VP VBD VB\n");
        assert_eq!(select_head(&table, "VP", &["MD", "VP", "ADVP"]), Some((1, Selection::Rule(0))));
    }

    #[test]
    fn unregistered_category_uses_default() {
        let table = table("@default ltr *\nVP rtl VP\n");
        assert_eq!(select_head(&table, "ZZZ", &["X", "Y", "Z"]), Some((0, Selection::DefaultRule)));
    }

    #[test]
    fn exhausted_rules_fall_back_to_default_rule_then_position() {
        let table = table("@default rtl NP\nVP ltr VB\n");
        assert_eq!(select_head(&table, "VP", &["NP", "PP", "NP"]), Some((2, Selection::DefaultRule)));
        assert_eq!(select_head(&table, "VP", &["PP", "ADVP"]), Some((1, Selection::DefaultPosition)));
    }

    #[test]
    fn decorations_are_ignored_during_selection() {
        let table = table("@default ltr *\nVP rtl VP VBD\n");
        assert_eq!(select_head(&table, "VP=H", &["VBD=H", "NP"]), Some((0, Selection::Rule(0))));
        assert_eq!(select_head(&table, "VP", &[]), None);
    }

    #[test]
    fn marks_exactly_one_head_per_internal_node() {
        let table = table("@default rtl *\nS ltr VP\nNP rtl NN\n");
        let mut tree = ParseNode::new(
            "S",
            vec![node("NP", &["DT", "NN"]), ParseNode::new("VP", vec![ParseNode::terminal("VBD", "ran")])],
        );
        let out = run(&table, &mut tree);

        assert!(!tree.head);
        assert_eq!(tree.head_index(), Some(1));
        assert_eq!(tree.children[0].head_index(), Some(1));
        assert_eq!(tree.children[1].head_index(), Some(0));
        assert_eq!(out.stats.internal_nodes, 3);
        assert_eq!(out.stats.terminals, 3);
        assert_eq!(out.stats.unary_shortcuts, 1);
        assert_eq!(out.stats.rule_matches, 2);
    }

    #[test]
    fn unary_shortcut_agrees_with_table() {
        let table = table("@default rtl NN\nNP ltr DT\n");
        let mut with = node("NP", &["JJ"]);
        let mut without = with.clone();

        Annotator::new(&table, AnnotateFlags::default()).run(&mut with).unwrap();
        let out = Annotator::new(&table, AnnotateFlags::VALIDATE).recording().run(&mut without).unwrap();

        assert_eq!(with, without);
        assert_eq!(out.choices[0].selection, Selection::DefaultPosition);
    }

    #[test]
    fn stale_markers_are_cleared() {
        let table = table("@default ltr *\n");
        let mut tree = node("NP", &["DT", "NN"]);
        tree.head = true;
        tree.children[1].head = true;

        run(&table, &mut tree);

        assert!(!tree.head);
        assert!(tree.children[0].head);
        assert!(!tree.children[1].head);
    }

    #[test]
    fn invalid_tree_is_left_untouched() {
        let table = table("@default ltr *\n");
        let mut tree = ParseNode::new("S", vec![node("NP", &["DT", "NN"]), node("VP", &["VBD"])]);
        tree.children[0].children[1].head = true;
        tree.children[1].token = Some("ran".into());
        let before = tree.clone();

        let err = Annotator::new(&table, AnnotateFlags::default()).run(&mut tree).unwrap_err();

        assert_eq!(err, InvalidTreeError::TokenWithChildren { path: vec![1] });
        assert_eq!(tree, before);
    }

    #[test]
    fn unlabeled_nodes_use_the_default_rule() {
        let table = table("@default rtl *
NP rtl NN
");
        let mut tree = ParseNode::new("", vec![node("NP", &["DT", "NN"]), node(" ", &["DT", "JJ"])]);
        let out = run(&table, &mut tree);

        assert_eq!(tree.head_index(), Some(1));
        assert_eq!(tree.children[1].head_index(), Some(1));
        assert_eq!(out.choices[0].category, "");
        assert_eq!(out.choices[0].selection, Selection::DefaultRule);
        assert_eq!(out.choices[2].category, " ");
        assert_eq!(out.choices[2].selection, Selection::DefaultRule);
    }

    #[test]
    fn depth_limit_holds_without_validation() {
        let table = table("@default ltr *
");
        let mut tree = ParseNode::terminal("NN", "deep");
        for _ in 0..=MAX_TREE_DEPTH {
            tree = ParseNode::new("NP", vec![tree]);
        }
        let err = Annotator::new(&table, AnnotateFlags::UNARY_SHORTCUT).recording().run(&mut tree).unwrap_err();

        assert_eq!(err, InvalidTreeError::TooDeep { depth: MAX_TREE_DEPTH + 1, max: MAX_TREE_DEPTH });
        assert!(tree.walk().all(|n| !n.head));
    }

    #[test]
    fn records_paths_breadth_first() {
        let table = table("@default rtl *\n");
        let mut tree = ParseNode::new("S", vec![node("NP", &["DT", "NN"]), node("VP", &["VBD", "NP"])]);
        let out = run(&table, &mut tree);

        let paths: Vec<&[usize]> = out.choices.iter().map(|c| c.path.as_slice()).collect();
        let expected: [&[usize]; 3] = [&[], &[0], &[1]];
        assert_eq!(paths, expected);
        assert_eq!(out.choices[2].head_category, "NP");
        assert_eq!(out.choices[2].selection, Selection::DefaultRule);
    }
}
