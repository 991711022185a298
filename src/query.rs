//! Query classification.
//!
//! A query that starts with a decimal digit names a field or subfield code
//! (`"020"`, `"245a"`); anything else, including the empty string, is a
//! keyword searched for in descriptions.

use std::fmt;

/// How a query string is resolved against a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Prefix match on field/subfield codes.
    Code,
    /// Substring match on descriptions.
    Keyword,
}

impl QueryKind {
    /// Classify a query string.
    #[must_use]
    pub fn classify(query: &str) -> Self {
        if is_code_query(query) {
            QueryKind::Code
        } else {
            QueryKind::Keyword
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Code => f.write_str("code"),
            QueryKind::Keyword => f.write_str("keyword"),
        }
    }
}

/// True when the query's first character is an ASCII digit.
#[must_use]
pub fn is_code_query(query: &str) -> bool {
    query.chars().next().is_some_and(|c| c.is_ascii_digit())
}
