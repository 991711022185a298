//! Offline assembly of the dataset files.
//!
//! The scraper fetches Library of Congress documentation and hands the
//! results to a [`DatasetBuilder`], which turns index listings and field
//! documentation into dataset records, merges the hand-maintained
//! [`overrides`](crate::overrides), and finally writes the verbose and brief
//! dataset files.
//!
//! Fetching is abstracted behind [`FieldSource`]; a failure to document one
//! field never aborts the build. Such a field is recorded without
//! `Details`, and its subfields are recovered from the raw concise page text
//! when possible.
//!
//! # Examples
//!
//! ```ignore
//! use marc_lookup::builder::{BuildOptions, DatasetBuilder, MemorySource, write_datasets};
//!
//! let mut builder = DatasetBuilder::new(MemorySource::default(), BuildOptions::new("2024-01-01T00:00:00+00:00"));
//! builder.add_index_text("020 - International Standard Book Number (R)");
//! let dataset = builder.build();
//! write_datasets("data", &dataset)?;
//! # Ok::<(), marc_lookup::LookupError>(())
//! ```

use crate::dataset::{Dataset, DatasetKind};
use crate::error::Result;
use crate::overrides::{is_manual_field, linking_entry_listings, MANUAL_FIELDS};
use crate::record::{Details, FieldRecord, Repeatability};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref FIELD_INDEX_RE: Regex =
        Regex::new(r"(\d{3})\s*[-–]\s*([^(]+?)\s*\(([RN]{1,2})\)").expect("valid regex");
    static ref SUBFIELD_RE: Regex =
        Regex::new(r"(?i)\$([a-z0-9])\s*[-–]\s*([^(]+?)\s*\(([RN]{1,2})\)").expect("valid regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Subfield descriptions shorter than this are treated as extraction noise.
const MIN_SUBFIELD_DESCRIPTION_LEN: usize = 3;

/// A field as listed on a field range index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldListing {
    /// Three-digit field code.
    pub code: String,
    /// Description without the repeatability marker.
    pub description: String,
    /// Field repeatability.
    pub repeatability: Repeatability,
}

impl FieldListing {
    /// Create a listing.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        repeatability: Repeatability,
    ) -> Self {
        FieldListing {
            code: code.into(),
            description: description.into(),
            repeatability,
        }
    }
}

/// A subfield recovered from raw page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfieldListing {
    /// Lowercased one-character subfield code.
    pub code: String,
    /// Description with whitespace collapsed.
    pub description: String,
    /// Subfield repeatability.
    pub repeatability: Repeatability,
}

/// Extract `NNN - Description (R|NR)` listings from index page text.
///
/// Obsolete fields are skipped.
#[must_use]
pub fn parse_field_index(text: &str) -> Vec<FieldListing> {
    FIELD_INDEX_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let description = caps[2].trim();
            if description.to_uppercase().contains("OBSOLETE") {
                return None;
            }
            let repeatability = match caps[3].parse::<Repeatability>() {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(code = &caps[1], error = %e, "skipping index listing");
                    return None;
                },
            };
            Some(FieldListing::new(&caps[1], description, repeatability))
        })
        .collect()
}

/// Extract `$c - Description (R|NR)` subfields from concise page text.
#[must_use]
pub fn parse_subfield_text(text: &str) -> Vec<SubfieldListing> {
    SUBFIELD_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let description = WHITESPACE_RE.replace_all(caps[2].trim(), " ").into_owned();
            if description.chars().count() < MIN_SUBFIELD_DESCRIPTION_LEN {
                return None;
            }
            let repeatability = caps[3].parse::<Repeatability>().ok()?;
            Some(SubfieldListing {
                code: caps[1].to_lowercase(),
                description,
                repeatability,
            })
        })
        .collect()
}

/// Where field documentation comes from.
///
/// Implemented by the network scraper; [`MemorySource`] serves
/// pre-fetched documentation.
pub trait FieldSource {
    /// Detailed documentation of a field, `Ok(None)` when it has no detail page.
    ///
    /// # Errors
    ///
    /// Any error is logged by the builder and treated as "no details".
    fn details(&mut self, code: &str) -> Result<Option<Details>>;

    /// Raw text of a field's concise page, used when details are unavailable.
    ///
    /// # Errors
    ///
    /// Any error is logged by the builder and treated as "no text".
    fn concise_text(&mut self, code: &str) -> Result<Option<String>>;
}

/// A [`FieldSource`] backed by in-memory documentation.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Detailed documentation by field code.
    pub details: HashMap<String, Details>,
    /// Raw concise page text by field code.
    pub concise_text: HashMap<String, String>,
}

impl MemorySource {
    /// Add detailed documentation for a field.
    #[must_use]
    pub fn with_details(mut self, code: impl Into<String>, details: Details) -> Self {
        self.details.insert(code.into(), details);
        self
    }

    /// Add raw concise page text for a field.
    #[must_use]
    pub fn with_concise_text(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.concise_text.insert(code.into(), text.into());
        self
    }
}

impl FieldSource for MemorySource {
    fn details(&mut self, code: &str) -> Result<Option<Details>> {
        Ok(self.details.get(code).cloned())
    }

    fn concise_text(&mut self, code: &str) -> Result<Option<String>> {
        Ok(self.concise_text.get(code).cloned())
    }
}

/// Options applied to every record built.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Value stored in every record's `Created` member.
    pub timestamp: String,
    /// Append `(ISBN)` to field 020's description so keyword search finds it.
    pub isbn_hint: bool,
}

impl BuildOptions {
    /// Options with the given timestamp and the ISBN hint enabled.
    #[must_use]
    pub fn new(timestamp: impl Into<String>) -> Self {
        BuildOptions {
            timestamp: timestamp.into(),
            isbn_hint: true,
        }
    }
}

/// Accumulates scraped fields into a dataset.
#[derive(Debug)]
pub struct DatasetBuilder<S> {
    source: S,
    options: BuildOptions,
    entries: BTreeMap<String, FieldRecord>,
    seen: HashSet<String>,
}

impl<S: FieldSource> DatasetBuilder<S> {
    /// Create an empty builder.
    pub fn new(source: S, options: BuildOptions) -> Self {
        DatasetBuilder {
            source,
            options,
            entries: BTreeMap::new(),
            seen: HashSet::new(),
        }
    }

    /// Parse an index page's text and add every listed field.
    ///
    /// Returns the number of fields added.
    pub fn add_index_text(&mut self, text: &str) -> usize {
        let listings = parse_field_index(text);
        tracing::info!(found = listings.len(), "parsed field index");
        listings
            .iter()
            .filter(|listing| self.add_listing(listing))
            .count()
    }

    /// Add one field and its subfields.
    ///
    /// Returns `false` when the field was already added or is maintained by
    /// hand.
    pub fn add_listing(&mut self, listing: &FieldListing) -> bool {
        if !self.seen.insert(listing.code.clone()) {
            return false;
        }
        if is_manual_field(&listing.code) {
            tracing::debug!(code = %listing.code, "skipping hand-maintained field");
            return false;
        }

        let value = if self.options.isbn_hint && listing.code == "020" {
            format!("{} (ISBN) ({})", listing.description, listing.repeatability)
        } else {
            format!("{} ({})", listing.description, listing.repeatability)
        };
        let details = self.fetch_details(&listing.code);
        self.insert_field(&listing.code, value, details);
        true
    }

    fn fetch_details(&mut self, code: &str) -> Option<Details> {
        match self.source.details(code) {
            Ok(Some(details)) => Some(details),
            Ok(None) => {
                tracing::info!(code, "no detail page for field");
                None
            },
            Err(e) => {
                tracing::warn!(code, error = %e, "failed to extract field details");
                None
            },
        }
    }

    fn insert_field(&mut self, code: &str, value: String, details: Option<Details>) {
        let mut record = FieldRecord::new(code, value, self.options.timestamp.clone());
        record.details = details;

        let subfields: Vec<(String, String)> = match &record.details {
            Some(details) if !details.subfields.is_empty() => details
                .subfields
                .iter()
                .map(|(sub, detail)| {
                    (
                        sub.clone(),
                        format!("{} ({})", detail.description, detail.repeatability),
                    )
                })
                .collect(),
            _ => self.fallback_subfields(code),
        };

        tracing::debug!(code, value = %record.value, subfields = subfields.len(), "added field");
        self.entries.insert(code.to_string(), record);
        for (sub, value) in subfields {
            let key = format!("{code}{sub}");
            let record = FieldRecord::new(key.clone(), value, self.options.timestamp.clone());
            self.entries.insert(key, record);
        }
    }

    fn fallback_subfields(&mut self, code: &str) -> Vec<(String, String)> {
        let text = match self.source.concise_text(code) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(code, error = %e, "failed to extract subfields");
                return Vec::new();
            },
        };
        parse_subfield_text(&text)
            .into_iter()
            .map(|sub| {
                (
                    sub.code,
                    format!("{} ({})", sub.description, sub.repeatability),
                )
            })
            .collect()
    }

    /// Merge the hand-maintained fields and return the key-sorted verbose dataset.
    pub fn build(mut self) -> Dataset {
        for field in MANUAL_FIELDS.iter() {
            self.seen.insert(field.code.to_string());
            let value = format!("{} ({})", field.description, field.repeatability);
            self.insert_field(field.code, value, Some(field.details.clone()));
        }
        for listing in linking_entry_listings() {
            self.add_listing(&listing);
        }

        let entries: IndexMap<String, FieldRecord> = self.entries.into_iter().collect();
        let dataset = Dataset::from_entries(DatasetKind::Verbose, entries);
        let fields = dataset.field_count();
        tracing::info!(
            total = dataset.len(),
            fields,
            subfields = dataset.len() - fields,
            "dataset built"
        );
        dataset
    }
}

/// Paths written by [`write_datasets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// The verbose dataset file.
    pub verbose: PathBuf,
    /// The brief dataset file.
    pub brief: PathBuf,
    /// Backups made of files that existed before writing.
    pub backups: Vec<PathBuf>,
}

/// Path a dataset file is backed up to (`marc.json` -> `marc.json.backup`).
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension("json.backup")
}

fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_path(path);
    tracing::info!(from = %path.display(), to = %backup.display(), "backing up existing file");
    std::fs::copy(path, &backup)?;
    Ok(Some(backup))
}

/// Write a verbose dataset and its brief projection into `dir`.
///
/// Existing files are copied to `*.json.backup` before being overwritten.
///
/// # Errors
///
/// Returns an error if a backup or a write fails.
pub fn write_datasets(dir: impl AsRef<Path>, dataset: &Dataset) -> Result<WrittenFiles> {
    let dir = dir.as_ref();
    let verbose = dir.join(DatasetKind::Verbose.default_file_name());
    let brief = dir.join(DatasetKind::Brief.default_file_name());

    let mut backups = Vec::new();
    for path in [&verbose, &brief] {
        backups.extend(backup_existing(path)?);
    }

    tracing::info!(entries = dataset.len(), path = %verbose.display(), "writing verbose dataset");
    std::fs::write(&verbose, dataset.to_json_pretty()?)?;

    let brief_dataset = dataset.to_brief();
    tracing::info!(entries = brief_dataset.len(), path = %brief.display(), "writing brief dataset");
    std::fs::write(&brief, brief_dataset.to_json_pretty()?)?;

    Ok(WrittenFiles {
        verbose,
        brief,
        backups,
    })
}
