//! Error types.
//!
//! Two failure kinds exist, and they surface at different times:
//!
//! - [`ConfigurationError`] when a rule table is built (once per language).
//! - [`InvalidTreeError`] when a tree breaks the structural contract. Nothing
//!   in the tree is modified in that case.
//!
//! Categories are never an error, not even empty or blank ones; whatever the
//! table does not know falls through to its default rule.

use thiserror::Error;

/// Failure to build a head rule table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported language `{0}` (expected one of: en, es, fr, it)")]
    UnsupportedLanguage(String),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("rule specification has no @default rule")]
    MissingDefault,

    #[error("line {line}: @default declared more than once")]
    DuplicateDefault { line: usize },
}

/// A tree that violates the structural contract of the annotator.
///
/// `path` is the sequence of child indices leading from the root to the
/// offending node; the root itself has an empty path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTreeError {
    #[error("node at {path:?} carries a token but also has children")]
    TokenWithChildren { path: Vec<usize> },

    #[error("tree depth {depth} exceeds maximum {max}")]
    TooDeep { depth: usize, max: usize },
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidTree(#[from] InvalidTreeError),
}
