//! Loading and holding a MARC field definition dataset.
//!
//! A dataset is a flat JSON object mapping codes to [`FieldRecord`]s. Two
//! variants exist on disk: the brief file (`Key`/`Value`/`Created` only)
//! and the verbose file, whose field records also carry `Details`.
//!
//! A [`Dataset`] is immutable once loaded. At load time a read-only index
//! from each field key to its subfield keys is derived from the key prefix
//! convention.
//!
//! # Examples
//!
//! ```ignore
//! use marc_lookup::dataset::{Dataset, DatasetKind};
//!
//! let dataset = Dataset::load("marc.json", DatasetKind::Brief)?;
//! for key in dataset.subfield_keys("245") {
//!     println!("{key}");
//! }
//! # Ok::<(), marc_lookup::LookupError>(())
//! ```

use crate::code_search::code_order;
use crate::error::{LookupError, Result};
use crate::record::{field_part, is_field_key, is_subfield_key, FieldRecord, FIELD_KEY_LEN};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// A borrowed `(key, record)` pair from a [`Dataset`].
pub type Entry<'a> = (&'a str, &'a FieldRecord);

/// Which dataset file a [`Dataset`] was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// `Key`/`Value`/`Created` records only.
    Brief,
    /// Field records additionally carry `Details`.
    Verbose,
}

impl DatasetKind {
    /// Default file name for this kind of dataset.
    #[must_use]
    pub fn default_file_name(self) -> &'static str {
        match self {
            DatasetKind::Brief => "marc.json",
            DatasetKind::Verbose => "marc-verbose.json",
        }
    }

    fn remediation_hint(self, path: &Path) -> String {
        let file = path
            .file_name()
            .map_or(Cow::Borrowed(self.default_file_name()), |n| n.to_string_lossy());
        format!(
            "Generate {file} with marc_lookup::builder::write_datasets, or point --data-dir \
             (or MARC_DATA_DIR) at a directory that contains it."
        )
    }
}

/// A structural problem found by [`Dataset::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyViolation {
    /// Key shorter than a field tag.
    TooShort(String),
    /// Subfield key whose field tag has no record of its own.
    OrphanSubfield(String),
    /// `Details` attached to a subfield record.
    DetailsOnSubfield(String),
}

impl fmt::Display for KeyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyViolation::TooShort(key) => write!(f, "key '{key}' is shorter than a field tag"),
            KeyViolation::OrphanSubfield(key) => write!(
                f,
                "subfield '{key}' has no field '{}' in the dataset",
                field_part(key)
            ),
            KeyViolation::DetailsOnSubfield(key) => {
                write!(f, "subfield '{key}' carries field details")
            },
        }
    }
}

/// An immutable mapping from field/subfield codes to their definitions.
#[derive(Debug, Clone)]
pub struct Dataset {
    kind: DatasetKind,
    entries: IndexMap<String, FieldRecord>,
    subfield_index: IndexMap<String, Vec<String>>,
}

impl Dataset {
    /// Build a dataset from an already parsed mapping.
    ///
    /// Entry order is preserved as given.
    #[must_use]
    pub fn from_entries(kind: DatasetKind, entries: IndexMap<String, FieldRecord>) -> Self {
        let subfield_index = build_subfield_index(&entries);
        let dataset = Dataset {
            kind,
            entries,
            subfield_index,
        };
        for violation in dataset.validate() {
            tracing::warn!(%violation, "dataset invariant violated");
        }
        dataset
    }

    /// Build a dataset from records, keyed by each record's own `key`.
    pub fn from_records(kind: DatasetKind, records: impl IntoIterator<Item = FieldRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.key.clone(), record))
            .collect();
        Self::from_entries(kind, entries)
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Json`] if the text is not a JSON object of records.
    pub fn from_json_str(kind: DatasetKind, json: &str) -> Result<Self> {
        let entries: IndexMap<String, FieldRecord> = serde_json::from_str(json)?;
        Ok(Self::from_entries(kind, entries))
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// - [`LookupError::DatasetNotFound`] if the file does not exist
    /// - [`LookupError::CorruptDataset`] if it does not contain valid dataset JSON
    /// - [`LookupError::Io`] for any other read failure
    pub fn load(path: impl AsRef<Path>, kind: DatasetKind) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LookupError::DatasetNotFound {
                    path: path.to_path_buf(),
                    hint: kind.remediation_hint(path),
                });
            },
            Err(e) => return Err(e.into()),
        };

        let entries: IndexMap<String, FieldRecord> =
            serde_json::from_str(&text).map_err(|source| LookupError::CorruptDataset {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            ?kind,
            "loaded dataset"
        );
        Ok(Self::from_entries(kind, entries))
    }

    /// Which file variant this dataset came from.
    #[must_use]
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Number of entries (fields and subfields).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the dataset has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldRecord> {
        self.entries.get(key)
    }

    /// Iterate over all entries in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = Entry<'_>> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of field (3-character) entries.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.entries.keys().filter(|k| is_field_key(k)).count()
    }

    /// Keys of the subfields of `field`, alphabetic codes before numeric.
    ///
    /// Empty when the field has no subfields or does not exist.
    #[must_use]
    pub fn subfield_keys(&self, field: &str) -> &[String] {
        self.subfield_index.get(field).map_or(&[], Vec::as_slice)
    }

    /// Copy of this dataset with all `Details` removed.
    #[must_use]
    pub fn to_brief(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, record)| (key.clone(), record.to_brief()))
            .collect();
        Dataset {
            kind: DatasetKind::Brief,
            entries,
            subfield_index: self.subfield_index.clone(),
        }
    }

    /// Serialize as the pretty-printed JSON object used by the dataset files.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Check the key invariants and return every violation found.
    #[must_use]
    pub fn validate(&self) -> Vec<KeyViolation> {
        let mut violations = Vec::new();
        for (key, record) in &self.entries {
            if key.chars().count() < FIELD_KEY_LEN {
                violations.push(KeyViolation::TooShort(key.clone()));
                continue;
            }
            if is_subfield_key(key) {
                if !self.entries.contains_key(field_part(key)) {
                    violations.push(KeyViolation::OrphanSubfield(key.clone()));
                }
                if record.details.is_some() {
                    violations.push(KeyViolation::DetailsOnSubfield(key.clone()));
                }
            }
        }
        violations
    }

    /// Like [`validate`](Self::validate) but fails on the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidDataset`] describing the first violation.
    pub fn validate_strict(&self) -> Result<()> {
        match self.validate().into_iter().next() {
            Some(violation) => Err(LookupError::InvalidDataset(violation.to_string())),
            None => Ok(()),
        }
    }
}

fn build_subfield_index(entries: &IndexMap<String, FieldRecord>) -> IndexMap<String, Vec<String>> {
    let mut index: IndexMap<String, Vec<String>> = IndexMap::new();
    for key in entries.keys().filter(|k| is_subfield_key(k)) {
        index
            .entry(field_part(key).to_string())
            .or_default()
            .push(key.clone());
    }
    for keys in index.values_mut() {
        keys.sort_by(|a, b| code_order(a).cmp(&code_order(b)));
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(
            DatasetKind::Brief,
            vec![
                FieldRecord::new("0206", "Linkage (NR)", ""),
                FieldRecord::new("020", "International Standard Book Number (R)", ""),
                FieldRecord::new("020z", "Canceled/invalid ISBN (R)", ""),
                FieldRecord::new("020a", "International Standard Book Number (NR)", ""),
                FieldRecord::new("245", "Title Statement (NR)", ""),
            ],
        )
    }

    #[test]
    fn test_subfield_index_ordering() {
        let dataset = sample();
        assert_eq!(dataset.subfield_keys("020"), ["020a", "020z", "0206"]);
        assert!(dataset.subfield_keys("245").is_empty());
        assert!(dataset.subfield_keys("999").is_empty());
    }

    #[test]
    fn test_counts() {
        let dataset = sample();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.field_count(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_validate_clean() {
        assert!(sample().validate().is_empty());
        assert!(sample().validate_strict().is_ok());
    }

    #[test]
    fn test_validate_reports_violations() {
        let dataset = Dataset::from_records(
            DatasetKind::Verbose,
            vec![
                FieldRecord::new("24", "Too short", ""),
                FieldRecord::new("650a", "Topical term (NR)", ""),
                FieldRecord::new("245", "Title Statement (NR)", ""),
                FieldRecord::new("245a", "Title (NR)", "")
                    .with_details(crate::record::Details::default()),
            ],
        );
        let violations = dataset.validate();
        assert_eq!(
            violations,
            vec![
                KeyViolation::TooShort("24".into()),
                KeyViolation::OrphanSubfield("650a".into()),
                KeyViolation::DetailsOnSubfield("245a".into()),
            ]
        );
        assert!(matches!(
            dataset.validate_strict(),
            Err(LookupError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_from_json_str_preserves_order() {
        let json = r#"{
            "245": {"Key": "245", "Value": "Title Statement (NR)", "Created": ""},
            "020": {"Key": "020", "Value": "ISBN (R)", "Created": ""}
        }"#;
        let dataset = Dataset::from_json_str(DatasetKind::Brief, json).unwrap();
        let keys: Vec<&str> = dataset.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["245", "020"]);
    }

    #[test]
    fn test_to_brief_and_json() {
        let dataset = Dataset::from_records(
            DatasetKind::Verbose,
            vec![FieldRecord::new("245", "Title Statement (NR)", "t")
                .with_details(crate::record::Details::default())],
        );
        let brief = dataset.to_brief();
        assert_eq!(brief.kind(), DatasetKind::Brief);
        assert!(brief.get("245").unwrap().details.is_none());

        let json = brief.to_json_pretty().unwrap();
        assert!(json.contains("\"Key\": \"245\""));
        assert!(!json.contains("Details"));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(matches!(
            Dataset::from_json_str(DatasetKind::Brief, "[]"),
            Err(LookupError::Json(_))
        ));
    }

    #[test]
    fn test_remediation_hint_names_writer_and_file() {
        let hint = DatasetKind::Verbose.remediation_hint(Path::new("/data/marc-verbose.json"));
        assert!(hint.contains("marc-verbose.json"));
        assert!(hint.contains("builder::write_datasets"));
        assert!(hint.contains("MARC_DATA_DIR"));
        assert!(!hint.contains("scraper"));
    }
}
