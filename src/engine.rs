//! Head-selection engine.
//!
//! ## How the parts work together
//!
//! ```text
//! rule text (bundled or caller-supplied)
//!        │  parse_table                    (spec.rs)
//!        v
//!  HeadRuleTable  ── immutable, shared by reference   (table.rs)
//!        │
//! tree ──┼─ validate                       (validate.rs)
//!        │  clear stale markers
//!        v
//!  Annotator::run (annotator.rs)
//!    - breadth-first over internal nodes
//!    - select_head: rules → default rule → default position
//!    - mark one head child per node
//!        │
//!        v
//!  AnnotateStats / HeadChoice trace        (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `table.rs`: `HeadRule`, `HeadRuleTable` and rule evaluation over a list
//!   of child categories.
//! - `spec.rs`: the line-oriented rule specification format.
//! - `validate.rs`: the structural contract a tree must satisfy.
//! - `annotator.rs`: the traversal and per-node head selection.
//! - `metrics.rs`: optional counters and per-node trace.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events: `debug` when a table is built, `trace`
//! for every head decision and `warn` when a tree is rejected.

#[path = "engine/annotator.rs"]
mod annotator;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/spec.rs"]
mod spec;
#[path = "engine/table.rs"]
mod table;
#[path = "engine/validate.rs"]
mod validate;

pub use annotator::{AnnotateFlags, select_head};
pub(crate) use annotator::Annotator;
pub use metrics::{AnnotateStats, HeadChoice, Selection};
pub use table::{Candidate, Direction, HeadRule, HeadRuleTable, MatchMode};
pub(crate) use spec::parse_table;
pub use validate::{MAX_TREE_DEPTH, validate};
