//! Rule specification parsing.
//!
//! Head rule tables are written in a small line-oriented format:
//!
//! ```text
//! # comment (only as the first non-blank character of a line)
//! @default rtl *
//! VP   ltr      TO VBD VBN MD VBZ VB VBG VBP VP ADJP NN NNS NP
//! VP   ltr      *
//! NP   rtl-any  NN NNP NNPS NNS NX POS JJR
//! NP   ltr      NP
//! ```
//!
//! - Direction is `ltr` or `rtl`; the `-any` suffix selects
//!   [`MatchMode::AnyOf`].
//! - Candidates are categories, `*`, or prefix patterns such as `nc*`.
//! - Repeated lines for one category append rules in file order.
//! - Exactly one `@default` line is required.
//!
//! `#` is only a comment marker at the start of a line because `#` is itself a
//! Penn Treebank tag.

use super::table::{Candidate, Direction, HeadRule, HeadRuleTable, MatchMode};
use crate::{ConfigurationError, canonical_category};
use std::collections::HashMap;
use tracing::debug;

const DEFAULT_DIRECTIVE: &str = "@default";

impl HeadRuleTable {
    /// Build a table from caller-supplied rule specification text.
    ///
    /// `language` is only used to name the table.
    ///
    /// ```
    /// use headfinder::HeadRuleTable;
    ///
    /// let table = HeadRuleTable::from_spec("toy", "@default ltr *\nVP rtl VP VBD VB\n").unwrap();
    /// assert!(table.contains("VP"));
    /// ```
    pub fn from_spec(language: impl Into<String>, text: &str) -> Result<Self, ConfigurationError> {
        parse_table(&language.into(), text)
    }
}

/// Build a table named `language` from rule specification `text`.
pub(crate) fn parse_table(language: &str, text: &str) -> Result<HeadRuleTable, ConfigurationError> {
    let line_re = regex!(r"^(\S+)\s+(\S+)(?:\s+(.*))?$");

    let mut entries: HashMap<String, Vec<HeadRule>> = HashMap::new();
    let mut default: Option<HeadRule> = None;
    let mut rule_count = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let caps = line_re.captures(line).ok_or_else(|| {
            malformed(line_no, format!("expected `<CATEGORY> <direction> <candidate>...`, got `{line}`"))
        })?;
        let label = &caps[1];
        let (direction, mode) = parse_direction(&caps[2]).ok_or_else(|| {
            malformed(line_no, format!("unknown direction `{}` (expected ltr, rtl, ltr-any or rtl-any)", &caps[2]))
        })?;
        let candidates: Vec<Candidate> =
            caps.get(3).map(|m| m.as_str().split_whitespace().map(Candidate::parse).collect()).unwrap_or_default();
        if candidates.is_empty() {
            return Err(malformed(line_no, format!("`{label}` rule has no candidates")));
        }

        let rule = HeadRule::from_parts(direction, mode, candidates);

        if label == DEFAULT_DIRECTIVE {
            if default.is_some() {
                return Err(ConfigurationError::DuplicateDefault { line: line_no });
            }
            default = Some(rule);
        } else if label.starts_with('@') {
            return Err(malformed(line_no, format!("unknown directive `{label}`")));
        } else {
            let category = canonical_category(label);
            if category.is_empty() {
                return Err(malformed(line_no, format!("`{label}` is not a category")));
            }
            entries.entry(category.to_string()).or_default().push(rule);
            rule_count += 1;
        }
    }

    let default = default.ok_or(ConfigurationError::MissingDefault)?;

    debug!(language, categories = entries.len(), rules = rule_count, default = %default, "built head rule table");

    Ok(HeadRuleTable::from_parts(language.to_string(), entries, default))
}

fn parse_direction(token: &str) -> Option<(Direction, MatchMode)> {
    match token {
        "ltr" => Some((Direction::LeftToRight, MatchMode::Priority)),
        "rtl" => Some((Direction::RightToLeft, MatchMode::Priority)),
        "ltr-any" => Some((Direction::LeftToRight, MatchMode::AnyOf)),
        "rtl-any" => Some((Direction::RightToLeft, MatchMode::AnyOf)),
        _ => None,
    }
}

fn malformed(line: usize, message: String) -> ConfigurationError {
    ConfigurationError::Malformed { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_in_order() {
        let table = parse_table(
            "test",
            "
            # toy grammar
            @default ltr *
            VP rtl VP VBD VB
            VP rtl *
            NP rtl-any NN NNS
            ",
        )
        .unwrap();

        assert_eq!(table.language(), "test");
        assert_eq!(table.len(), 2);
        assert_eq!(table.default_rule(), &HeadRule::new(Direction::LeftToRight, ["*"]));

        let vp = table.rules_for("VP").unwrap();
        assert_eq!(vp.len(), 2);
        assert_eq!(vp[0], HeadRule::new(Direction::RightToLeft, ["VP", "VBD", "VB"]));
        assert_eq!(vp[1], HeadRule::new(Direction::RightToLeft, ["*"]));

        let np = table.rules_for("NP").unwrap();
        assert_eq!(np[0].mode(), MatchMode::AnyOf);
    }

    #[test]
    fn pound_sign_is_a_candidate_mid_line() {
        let table = parse_table("test", "@default rtl *\nQP ltr $ # CD\n").unwrap();
        let qp = table.rules_for("QP").unwrap();
        assert_eq!(qp[0].candidates().len(), 3);
        assert_eq!(qp[0].candidates()[1], Candidate::Exact("#".into()));
    }

    #[test]
    fn decorated_categories_are_canonicalized() {
        let table = parse_table("test", "@default rtl *\nNP=H ltr NN\n").unwrap();
        assert!(table.contains("NP"));
    }

    #[test]
    fn reports_line_of_bad_direction() {
        let err = parse_table("test", "@default rtl *\n\nVP up VB\n").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Malformed {
                line: 3,
                message: "unknown direction `up` (expected ltr, rtl, ltr-any or rtl-any)".into()
            }
        );
    }

    #[test]
    fn rejects_rules_without_candidates() {
        let err = parse_table("test", "@default rtl *\nFRAG rtl\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { line: 2, .. }));
    }

    #[test]
    fn rejects_bare_labels() {
        let err = parse_table("test", "@default rtl *\nFRAG\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { line: 2, .. }));
    }

    #[test]
    fn default_is_required_and_unique() {
        assert_eq!(parse_table("test", "VP ltr VB\n").unwrap_err(), ConfigurationError::MissingDefault);
        assert_eq!(
            parse_table("test", "@default ltr *\n@default rtl *\n").unwrap_err(),
            ConfigurationError::DuplicateDefault { line: 2 }
        );
    }

    #[test]
    fn unknown_directives_are_rejected() {
        let err = parse_table("test", "@default ltr *\n@include en\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { line: 2, .. }));
    }

    #[test]
    fn default_only_table_is_empty() {
        let table = parse_table("test", "@default ltr *").unwrap();
        assert!(table.is_empty());
    }
}
