#![doc = include_str!("../README.md")]

//! # marc-lookup: MARC 21 field definitions at the command line
//!
//! Look up MARC 21 bibliographic field and subfield definitions from a
//! precomputed dataset, by code or by keyword.
//!
//! ## Quick Start
//!
//! ```ignore
//! use marc_lookup::{Dataset, DatasetKind, DisplayMode, Formatter, MarcLookup};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::load("marc.json", DatasetKind::Brief)?;
//! let lookup = MarcLookup::new(dataset);
//!
//! // Field code: the field followed by its subfields
//! let outcome = lookup.lookup("020", DisplayMode::Brief);
//! assert_eq!(outcome.matches[0].0, "020");
//!
//! // Keyword: whole-word matches first
//! for block in lookup.lookup("isbn", DisplayMode::Brief).render(&Formatter::plain()) {
//!     println!("{block}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] - Field/subfield records and their documentation
//! - [`dataset`] - Loading the brief and verbose dataset files
//! - [`query`] - Classifying a query as a code or a keyword
//! - [`code_search`] - Prefix lookup by code
//! - [`keyword_search`] - Ranked keyword search over descriptions
//! - [`format`] - Brief and detailed presentation
//! - [`lookup`] - The lookup engine tying these together
//! - [`builder`] - Assembling the dataset files from scraped documentation
//! - [`overrides`] - Hand-maintained field definitions
//! - [`config`] - Data directory resolution
//! - [`logging`] - `tracing` subscriber setup
//! - [`error`] - Error types and result type

pub mod builder;
pub mod code_search;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod keyword_search;
pub mod logging;
pub mod lookup;
pub mod overrides;
pub mod query;
pub mod record;

pub use builder::{
    parse_field_index, parse_subfield_text, write_datasets, BuildOptions, DatasetBuilder,
    FieldListing, FieldSource, MemorySource,
};
pub use code_search::{search_by_code, CodeGroup};
pub use config::LookupConfig;
pub use dataset::{Dataset, DatasetKind, Entry, KeyViolation};
pub use error::{LookupError, Result};
pub use format::{BriefLine, DetailedView, DisplayMode, Formatter, View};
pub use keyword_search::search_by_keyword;
pub use lookup::{LookupOutcome, MarcLookup};
pub use query::QueryKind;
pub use record::{Details, FieldRecord, Repeatability, SubfieldDetail};
