use crate::engine::{AnnotateFlags, AnnotateStats, Annotator, HeadChoice, HeadRuleTable};
use crate::{ConfigurationError, InvalidTreeError, ParseNode};
use std::time::Instant;
use tracing::debug;

/// Options that affect annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub flags: AnnotateFlags,
}

/// Result of [`annotate_verbose_with`].
#[derive(Debug, Clone)]
pub struct AnnotateReport {
    pub stats: AnnotateStats,
    /// One entry per internal node, in breadth-first order.
    pub choices: Vec<HeadChoice>,
}

/// Load the bundled head rule table for `code` (`"en"`, `"es"`, `"fr"`, `"it"`).
///
/// Load once and share the table by reference across trees and threads.
pub fn load_rule_table(code: &str) -> Result<HeadRuleTable, ConfigurationError> {
    HeadRuleTable::load(code)
}

/// Mark the head child of every internal node of `tree`.
///
/// Existing markers are discarded first. An invalid tree is rejected without
/// being modified.
///
/// # Example
/// ```
/// use headfinder::{ParseNode, annotate, load_rule_table};
///
/// let table = load_rule_table("en").unwrap();
/// let mut tree = ParseNode::new(
///     "VP",
///     vec![
///         ParseNode::terminal("MD", "will"),
///         ParseNode::new("VP", vec![ParseNode::terminal("VB", "go")]),
///     ],
/// );
/// annotate(&mut tree, &table).unwrap();
///
/// assert!(tree.children[0].head);
/// assert_eq!(tree.head_word(), Some("will"));
/// ```
pub fn annotate(tree: &mut ParseNode, table: &HeadRuleTable) -> Result<(), InvalidTreeError> {
    annotate_with(tree, table, &Options::default()).map(|_| ())
}

/// Like [`annotate`], with explicit `options`, returning run counters.
pub fn annotate_with(
    tree: &mut ParseNode,
    table: &HeadRuleTable,
    options: &Options,
) -> Result<AnnotateStats, InvalidTreeError> {
    let start = Instant::now();
    let mut run = Annotator::new(table, options.flags).run(tree)?;
    run.stats.elapsed = start.elapsed();
    Ok(run.stats)
}

/// Like [`annotate_with`], also returning how every head was chosen.
///
/// Useful when debugging a rule table. The default [`annotate`] path does not
/// allocate these traces.
pub fn annotate_verbose_with(
    tree: &mut ParseNode,
    table: &HeadRuleTable,
    options: &Options,
) -> Result<AnnotateReport, InvalidTreeError> {
    let start = Instant::now();
    let mut run = Annotator::new(table, options.flags).recording().run(tree)?;
    run.stats.elapsed = start.elapsed();
    Ok(AnnotateReport { stats: run.stats, choices: run.choices })
}

/// Annotate each tree independently.
///
/// A tree that fails validation gets an `Err` in its slot and is left
/// untouched; the remaining trees are still annotated.
pub fn annotate_batch(trees: &mut [ParseNode], table: &HeadRuleTable) -> Vec<Result<(), InvalidTreeError>> {
    let annotator = Annotator::new(table, AnnotateFlags::default());
    let results: Vec<Result<(), InvalidTreeError>> =
        trees.iter_mut().map(|tree| annotator.run(tree).map(|_| ())).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(language = table.language(), trees = results.len(), failed, "annotated batch");

    results
}
