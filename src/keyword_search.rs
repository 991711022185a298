//! Keyword search over field and subfield descriptions.
//!
//! Every record whose description contains the keyword (ignoring case) is a
//! match. Matches where the keyword is a whole word of the description rank
//! ahead of partial matches; within the same exactness, fields rank ahead of
//! subfields, shorter keys ahead of longer ones, and then keys sort
//! lexicographically.

use crate::dataset::{Dataset, Entry};
use crate::record::is_subfield_key;

/// Characters treated as word separators in addition to whitespace.
const WORD_DELIMITERS: [char; 5] = ['-', '/', ',', '(', ')'];

/// Split a lowercased description into the words used for exact matching.
pub fn description_words(description_lower: &str) -> impl Iterator<Item = &str> {
    description_lower
        .split(|c: char| c.is_whitespace() || WORD_DELIMITERS.contains(&c))
        .filter(|word| !word.is_empty())
}

/// True when `keyword_lower` is a whole word of `description_lower`.
#[must_use]
pub fn is_exact_match(description_lower: &str, keyword_lower: &str) -> bool {
    description_words(description_lower).any(|word| word == keyword_lower)
}

/// Find all entries whose description contains `keyword`, ignoring case.
///
/// An empty keyword matches nothing.
#[must_use]
pub fn search_by_keyword<'a>(dataset: &'a Dataset, keyword: &str) -> Vec<Entry<'a>> {
    if keyword.is_empty() {
        return Vec::new();
    }

    let keyword_lower = keyword.to_lowercase();
    let mut matches: Vec<(Entry<'a>, bool)> = dataset
        .iter()
        .filter_map(|entry| {
            let value_lower = entry.1.value.to_lowercase();
            if !value_lower.contains(&keyword_lower) {
                return None;
            }
            Some((entry, is_exact_match(&value_lower, &keyword_lower)))
        })
        .collect();

    matches.sort_by(|((a, _), a_exact), ((b, _), b_exact)| {
        (!a_exact, is_subfield_key(a), a.chars().count(), *a).cmp(&(
            !b_exact,
            is_subfield_key(b),
            b.chars().count(),
            *b,
        ))
    });

    tracing::debug!(keyword, matches = matches.len(), "keyword search");
    matches.into_iter().map(|(entry, _)| entry).collect()
}
