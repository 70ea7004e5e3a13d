//! Annotation metrics and traces.
//!
//! - `annotate` for normal operation (no counters surfaced).
//! - `annotate_with` when the caller wants [`AnnotateStats`].
//! - `annotate_verbose_with` for a per-node [`HeadChoice`] trace, which is
//!   what you want when debugging a rule table.
//!
//! The trace allocates one entry (and one path) per internal node, so it is
//! opt-in.

use std::time::Duration;

/// How the head of one node was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The node had a single child.
    Unary,
    /// Matched the registered rule at this index of the category's rule list.
    Rule(usize),
    /// The category's rules (if any) matched nothing; the default rule did.
    DefaultRule,
    /// Nothing matched; took the first child in the default rule's direction.
    DefaultPosition,
}

/// Counters collected during one annotation run.
#[derive(Debug, Default, Clone)]
pub struct AnnotateStats {
    /// Nodes with at least one child (each received a head child).
    pub internal_nodes: usize,
    /// Childless nodes seen.
    pub terminals: usize,
    pub unary_shortcuts: usize,
    pub rule_matches: usize,
    pub default_rule_matches: usize,
    pub positional_fallbacks: usize,
    /// Wall time including validation.
    pub elapsed: Duration,
}

impl AnnotateStats {
    pub(crate) fn record(&mut self, selection: Selection) {
        match selection {
            Selection::Unary => self.unary_shortcuts += 1,
            Selection::Rule(_) => self.rule_matches += 1,
            Selection::DefaultRule => self.default_rule_matches += 1,
            Selection::DefaultPosition => self.positional_fallbacks += 1,
        }
    }
}

/// One head decision, as recorded by `annotate_verbose_with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadChoice {
    /// Child indices from the root to the annotated node.
    pub path: Vec<usize>,
    /// Canonical category of the annotated node.
    pub category: String,
    pub head_index: usize,
    pub head_category: String,
    pub selection: Selection,
}
