//! Bundled head rule tables.
//!
//! Each supported language ships a rule specification (`src/rules/*.rules`)
//! embedded at compile time. Every call to [`HeadRuleTable::load`] parses it
//! into a fresh, caller-owned table; nothing is cached process-wide.
//!
//! | code | treebank scheme                    | default       |
//! |------|------------------------------------|---------------|
//! | en   | Penn Treebank, Collins (1999)      | rightmost     |
//! | es   | AnCora, EAGLES tags                | leftmost      |
//! | fr   | French Treebank, FTB-CC tags       | rightmost     |
//! | it   | TUT-Penn                           | leftmost      |

use crate::engine::parse_table;
use crate::{ConfigurationError, HeadRuleTable};
use std::fmt;
use std::str::FromStr;


/// A language with a bundled rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    French,
    Italian,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::English, Language::Spanish, Language::French, Language::Italian];

    /// Resolve a short language code such as `"en"` (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, ConfigurationError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "es" => Ok(Language::Spanish),
            "fr" => Ok(Language::French),
            "it" => Ok(Language::Italian),
            _ => Err(ConfigurationError::UnsupportedLanguage(code.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Italian => "it",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Italian => "Italian",
        }
    }

    /// The bundled rule specification text.
    pub fn rule_source(self) -> &'static str {
        match self {
            Language::English => include_str!("rules/en.rules"),
            Language::Spanish => include_str!("rules/es.rules"),
            Language::French => include_str!("rules/fr.rules"),
            Language::Italian => include_str!("rules/it.rules"),
        }
    }
}

impl FromStr for Language {
    type Err = ConfigurationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Language::from_code(code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl HeadRuleTable {
    /// Load the bundled table for a language code (`"en"`, `"es"`, `"fr"`, `"it"`).
    ///
    /// ```
    /// use headfinder::{ConfigurationError, HeadRuleTable};
    ///
    /// let table = HeadRuleTable::load("en").unwrap();
    /// assert_eq!(table.language(), "en");
    ///
    /// assert!(matches!(HeadRuleTable::load("xx"), Err(ConfigurationError::UnsupportedLanguage(_))));
    /// ```
    pub fn load(code: &str) -> Result<Self, ConfigurationError> {
        Self::for_language(Language::from_code(code)?)
    }

    pub fn for_language(language: Language) -> Result<Self, ConfigurationError> {
        parse_table(language.code(), language.rule_source())
    }
}
