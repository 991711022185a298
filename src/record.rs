//! Field and subfield definition records.
//!
//! A dataset maps codes to [`FieldRecord`]s. Field records are keyed by a
//! 3-character tag (`"245"`); subfield records reuse the same type and are
//! keyed by the tag followed by the subfield code (`"245a"`). The relation
//! between a field and its subfields is carried only by this key prefix.
//!
//! # Examples
//!
//! ```
//! use marc_lookup::record::{split_repeatability, Repeatability};
//!
//! let (text, badge) = split_repeatability("Title statement (NR)");
//! assert_eq!(text, "Title statement");
//! assert_eq!(badge, Some(Repeatability::NonRepeatable));
//! ```

use crate::error::LookupError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a field key (a MARC tag).
pub const FIELD_KEY_LEN: usize = 3;

/// Whether a field or subfield may occur more than once in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repeatability {
    /// May occur more than once (`R`).
    #[serde(rename = "R")]
    Repeatable,
    /// May occur at most once (`NR`).
    #[serde(rename = "NR")]
    NonRepeatable,
}

impl Repeatability {
    /// The bare code, `"R"` or `"NR"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Repeatability::Repeatable => "R",
            Repeatability::NonRepeatable => "NR",
        }
    }

    /// The parenthesized badge, `"(R)"` or `"(NR)"`.
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Repeatability::Repeatable => "(R)",
            Repeatability::NonRepeatable => "(NR)",
        }
    }

    /// Parse a bare `R`/`NR` code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(Repeatability::Repeatable),
            "NR" => Some(Repeatability::NonRepeatable),
            _ => None,
        }
    }
}

impl FromStr for Repeatability {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim().to_ascii_uppercase().as_str()).ok_or_else(|| {
            LookupError::ParseError(format!("Invalid repeatability code: '{s}'"))
        })
    }
}

impl fmt::Display for Repeatability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single entry of a dataset.
///
/// Serialized with the member names used by the dataset files
/// (`Key`, `Value`, `Created`, `Details`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Field code (`"020"`) or subfield code (`"020a"`).
    #[serde(rename = "Key")]
    pub key: String,
    /// Description, usually ending in `(R)` or `(NR)`.
    #[serde(rename = "Value")]
    pub value: String,
    /// Timestamp of the scrape that produced the entry. Informational only.
    #[serde(rename = "Created", default)]
    pub created: String,
    /// Extended documentation, only present on verbose field records.
    #[serde(rename = "Details", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl FieldRecord {
    /// Create a brief record without details.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        FieldRecord {
            key: key.into(),
            value: value.into(),
            created: created.into(),
            details: None,
        }
    }

    /// Attach extended documentation.
    #[must_use]
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// True when this record describes a whole field rather than a subfield.
    #[must_use]
    pub fn is_field(&self) -> bool {
        is_field_key(&self.key)
    }

    /// Copy of this record with `Details` removed.
    #[must_use]
    pub fn to_brief(&self) -> Self {
        FieldRecord {
            details: None,
            ..self.clone()
        }
    }
}

/// Extended documentation for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    /// Free-text definition of the field. May be empty.
    #[serde(default)]
    pub definition: String,
    /// Indicator name to its value descriptions, in documentation order.
    #[serde(default)]
    pub indicators: IndexMap<String, Vec<String>>,
    /// Subfield code to its documentation.
    #[serde(default)]
    pub subfields: IndexMap<String, SubfieldDetail>,
    /// Example field contents, in documentation order.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Details {
    /// Subfields ordered alphabetic codes first, then numeric, then by code.
    #[must_use]
    pub fn sorted_subfields(&self) -> Vec<(&str, &SubfieldDetail)> {
        let mut items: Vec<(&str, &SubfieldDetail)> = self
            .subfields
            .iter()
            .map(|(code, detail)| (code.as_str(), detail))
            .collect();
        items.sort_by(|a, b| {
            (is_numeric_code(a.0), a.0).cmp(&(is_numeric_code(b.0), b.0))
        });
        items
    }
}

/// Documentation for one subfield of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubfieldDetail {
    /// Short description, e.g. `"International Standard Book Number"`.
    pub description: String,
    /// Longer explanation. Empty when the documentation has none.
    #[serde(default)]
    pub extended: String,
    /// `R` or `NR`.
    pub repeatability: Repeatability,
}

impl SubfieldDetail {
    /// Create subfield documentation.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        extended: impl Into<String>,
        repeatability: Repeatability,
    ) -> Self {
        SubfieldDetail {
            description: description.into(),
            extended: extended.into(),
            repeatability,
        }
    }
}

/// True when `key` is a field key (exactly three characters).
#[must_use]
pub fn is_field_key(key: &str) -> bool {
    key.chars().count() == FIELD_KEY_LEN
}

/// True when `key` is a subfield key (longer than a field key).
#[must_use]
pub fn is_subfield_key(key: &str) -> bool {
    key.chars().count() > FIELD_KEY_LEN
}

/// The field tag of a key (`"245a"` -> `"245"`).
///
/// Returns the whole key when it is shorter than a field key.
#[must_use]
pub fn field_part(key: &str) -> &str {
    match key.char_indices().nth(FIELD_KEY_LEN) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

/// The subfield code of a key (`"245a"` -> `"a"`). Empty for field keys.
#[must_use]
pub fn subfield_part(key: &str) -> &str {
    &key[field_part(key).len()..]
}

/// True when a subfield code sorts into the numeric group.
fn is_numeric_code(code: &str) -> bool {
    code.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Split one trailing `(R)` or `(NR)` marker off a description.
///
/// Returns the trimmed description and the marker. A description without
/// a marker is returned unchanged with `None`.
#[must_use]
pub fn split_repeatability(value: &str) -> (&str, Option<Repeatability>) {
    if let Some(rest) = value.strip_suffix("(NR)") {
        (rest.trim(), Some(Repeatability::NonRepeatable))
    } else if let Some(rest) = value.strip_suffix("(R)") {
        (rest.trim(), Some(Repeatability::Repeatable))
    } else {
        (value, None)
    }
}
