//! Head rule tables.
//!
//! This module holds the *static* side of the engine: the per-language mapping
//! from phrasal category to an ordered list of [`HeadRule`]s, plus the default
//! rule used for categories the table does not know.
//!
//! A table is built once (see `spec.rs` for the text format and
//! `crate::rules` for the bundled languages) and then only read. It is
//! `Send + Sync`, so any number of traversals can share one `&HeadRuleTable`.
//!
//! ## Rule evaluation
//!
//! ```text
//! rule: rtl [VP VBD VB]          children: MD  VP  ADVP
//!                                           0   1   2
//! Priority mode:
//!   VP  ─ scan 2,1,0 ─▶ hit at 1   => head = 1
//!
//! AnyOf mode (rtl-any):
//!   scan 2,1,0, each child tested against {VP, VBD, VB}
//!   2: ADVP ✗   1: VP ✓          => head = 1
//! ```
//!
//! The two modes only differ when several candidates match different
//! children: `Priority` lets the candidate order decide, `AnyOf` lets the
//! position decide.
//!
//! ## Invariants
//!
//! - Every registered category has at least one rule.
//! - Keys are canonical categories (no `=H` decoration).

use crate::canonical_category;
use std::collections::HashMap;
use std::fmt;

/// Scan direction over a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// Child indices `0..len` in scan order.
    pub(crate) fn scan(self, len: usize) -> impl Iterator<Item = usize> {
        let (forward, backward) = match self {
            Direction::LeftToRight => (Some(0..len), None),
            Direction::RightToLeft => (None, Some((0..len).rev())),
        };
        forward.into_iter().flatten().chain(backward.into_iter().flatten())
    }

    /// The first index visited when scanning `len` children.
    pub fn first(self, len: usize) -> Option<usize> {
        match (self, len) {
            (_, 0) => None,
            (Direction::LeftToRight, _) => Some(0),
            (Direction::RightToLeft, n) => Some(n - 1),
        }
    }
}

/// How a rule combines its direction with its candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Try each candidate in order; for each, scan all children.
    #[default]
    Priority,
    /// Scan children once; stop at the first child matching any candidate.
    AnyOf,
}

/// One entry of a rule's candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// `*`: matches every child.
    Any,
    /// Matches one category exactly.
    Exact(String),
    /// `nc*`: matches every category starting with the prefix.
    Prefix(String),
}

impl Candidate {
    /// Parse a candidate as written in a rule specification.
    pub fn parse(token: &str) -> Self {
        if token == "*" {
            return Candidate::Any;
        }
        match token.strip_suffix('*') {
            Some(prefix) => Candidate::Prefix(prefix.to_string()),
            None => Candidate::Exact(token.to_string()),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Candidate::Any => true,
            Candidate::Exact(expected) => expected == category,
            Candidate::Prefix(prefix) => category.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Any => f.write_str("*"),
            Candidate::Exact(category) => f.write_str(category),
            Candidate::Prefix(prefix) => write!(f, "{prefix}*"),
        }
    }
}

/// A direction plus a prioritized candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadRule {
    direction: Direction,
    mode: MatchMode,
    candidates: Vec<Candidate>,
}

impl HeadRule {
    /// A [`MatchMode::Priority`] rule.
    pub fn new<I, S>(direction: Direction, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_mode(direction, MatchMode::Priority, candidates)
    }

    /// A [`MatchMode::AnyOf`] rule.
    pub fn any_of<I, S>(direction: Direction, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_mode(direction, MatchMode::AnyOf, candidates)
    }

    pub fn with_mode<I, S>(direction: Direction, mode: MatchMode, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = candidates.into_iter().map(|c| Candidate::parse(c.as_ref())).collect();
        HeadRule { direction, mode, candidates }
    }

    pub(crate) fn from_parts(direction: Direction, mode: MatchMode, candidates: Vec<Candidate>) -> Self {
        HeadRule { direction, mode, candidates }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Index of the child this rule selects among `categories`, if any.
    ///
    /// `categories` are the canonical categories of the children, in order.
    pub fn select(&self, categories: &[&str]) -> Option<usize> {
        let len = categories.len();
        match self.mode {
            MatchMode::Priority => self
                .candidates
                .iter()
                .find_map(|candidate| self.direction.scan(len).find(|&i| candidate.matches(categories[i]))),
            MatchMode::AnyOf => self
                .direction
                .scan(len)
                .find(|&i| self.candidates.iter().any(|candidate| candidate.matches(categories[i]))),
        }
    }
}

impl fmt::Display for HeadRule {
    /// Same syntax as a rule specification line, minus the category.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::LeftToRight => "ltr",
            Direction::RightToLeft => "rtl",
        };
        f.write_str(direction)?;
        if self.mode == MatchMode::AnyOf {
            f.write_str("-any")?;
        }
        for candidate in &self.candidates {
            write!(f, " {candidate}")?;
        }
        Ok(())
    }
}

/// Per-language head rules: category → ordered rules, plus a default rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRuleTable {
    language: String,
    entries: HashMap<String, Vec<HeadRule>>,
    default: HeadRule,
}

impl HeadRuleTable {
    pub(crate) fn from_parts(language: String, entries: HashMap<String, Vec<HeadRule>>, default: HeadRule) -> Self {
        HeadRuleTable { language, entries, default }
    }

    /// Language this table was built for (a code such as `"en"`, or the name
    /// given to [`from_spec`](Self::from_spec)).
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn default_rule(&self) -> &HeadRule {
        &self.default
    }

    /// Rules to try for `category`, falling back to the default rule.
    ///
    /// Never fails: an unregistered category yields a one-element slice with
    /// the default rule.
    pub fn lookup(&self, category: &str) -> &[HeadRule] {
        self.rules_for(category).unwrap_or(std::slice::from_ref(&self.default))
    }

    /// Rules explicitly registered for `category`.
    pub fn rules_for(&self, category: &str) -> Option<&[HeadRule]> {
        self.entries.get(canonical_category(category)).map(Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(canonical_category(category))
    }

    /// Registered categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
