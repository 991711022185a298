//! Lookup by field or subfield code.
//!
//! A code query is matched case-insensitively as a prefix of every key.
//! Results are ordered so that a field precedes its subfields, alphabetic
//! subfield codes precede numeric ones, and keys are otherwise in
//! lexicographic order:
//!
//! ```text
//! 020   International Standard Book Number
//! 020$a International Standard Book Number
//! 020$z Canceled/invalid ISBN
//! 020$6 Linkage
//! ```

use crate::dataset::{Dataset, Entry};
use crate::record::{is_field_key, FIELD_KEY_LEN};

/// Sort group of a key: field, alphabetic subfield, numeric subfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CodeGroup {
    /// A 3-character field key.
    Field,
    /// A subfield whose code is a letter.
    AlphabeticSubfield,
    /// Any other subfield (digits in practice).
    NumericSubfield,
}

impl CodeGroup {
    /// Group a key belongs to.
    #[must_use]
    pub fn of(key: &str) -> Self {
        if is_field_key(key) {
            return CodeGroup::Field;
        }
        match key.chars().nth(FIELD_KEY_LEN) {
            Some(c) if c.is_alphabetic() => CodeGroup::AlphabeticSubfield,
            _ => CodeGroup::NumericSubfield,
        }
    }
}

/// Sort key used for code lookup results.
#[must_use]
pub fn code_order(key: &str) -> (CodeGroup, &str) {
    (CodeGroup::of(key), key)
}

/// Find all entries whose key starts with `code`, ignoring case.
///
/// An empty result is a valid outcome, not an error.
#[must_use]
pub fn search_by_code<'a>(dataset: &'a Dataset, code: &str) -> Vec<Entry<'a>> {
    let code_lower = code.to_lowercase();
    let mut matches: Vec<Entry<'a>> = dataset
        .iter()
        .filter(|(key, _)| key.to_lowercase().starts_with(&code_lower))
        .collect();

    matches.sort_by(|a, b| code_order(a.0).cmp(&code_order(b.0)));

    tracing::debug!(code, matches = matches.len(), "code search");
    matches
}
