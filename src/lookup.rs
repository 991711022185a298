//! The lookup engine.
//!
//! [`MarcLookup`] owns a loaded [`Dataset`] and resolves queries against it:
//! the query is classified, routed to the code or keyword matcher, and the
//! result is returned as a [`LookupOutcome`] that knows how to present
//! itself.
//!
//! # Examples
//!
//! ```ignore
//! use marc_lookup::{DisplayMode, Formatter, LookupConfig, MarcLookup};
//!
//! let config = LookupConfig::from_env();
//! let lookup = MarcLookup::open(&config, DisplayMode::Brief)?;
//! let outcome = lookup.lookup("isbn", DisplayMode::Brief);
//! for block in outcome.render(&Formatter::plain()) {
//!     println!("{block}");
//! }
//! # Ok::<(), marc_lookup::LookupError>(())
//! ```

use crate::code_search::search_by_code;
use crate::config::LookupConfig;
use crate::dataset::{Dataset, DatasetKind, Entry};
use crate::error::Result;
use crate::format::{DisplayMode, Formatter};
use crate::keyword_search::search_by_keyword;
use crate::query::QueryKind;

/// Notice shown when verbose output is requested for a keyword search.
pub const VERBOSE_KEYWORD_NOTICE: &str = "Note: Verbose mode is not available for keyword searches.";

/// An immutable lookup context over one dataset.
#[derive(Debug, Clone)]
pub struct MarcLookup {
    dataset: Dataset,
}

impl MarcLookup {
    /// Wrap an already loaded dataset.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        MarcLookup { dataset }
    }

    /// Load the dataset file appropriate for `mode` as configured.
    ///
    /// Verbose mode reads the verbose dataset, brief mode the brief one.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Dataset::load`].
    pub fn open(config: &LookupConfig, mode: DisplayMode) -> Result<Self> {
        let kind = match mode {
            DisplayMode::Brief => DatasetKind::Brief,
            DisplayMode::Verbose => DatasetKind::Verbose,
        };
        let dataset = Dataset::load(config.dataset_path(kind), kind)?;
        Ok(Self::new(dataset))
    }

    /// The underlying dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Resolve a query.
    ///
    /// Verbose mode is only honored for code queries; for keyword queries it
    /// is downgraded to brief output and the outcome is flagged accordingly.
    #[must_use]
    pub fn lookup(&self, query: &str, mode: DisplayMode) -> LookupOutcome<'_> {
        let kind = QueryKind::classify(query);
        let (matches, mode, downgraded) = match kind {
            QueryKind::Code => (search_by_code(&self.dataset, query), mode, false),
            QueryKind::Keyword => {
                let downgraded = mode == DisplayMode::Verbose;
                if downgraded {
                    tracing::debug!(query, "verbose mode downgraded for keyword search");
                }
                (
                    search_by_keyword(&self.dataset, query),
                    DisplayMode::Brief,
                    downgraded,
                )
            },
        };

        LookupOutcome {
            query: query.to_string(),
            kind,
            mode,
            downgraded,
            matches,
        }
    }
}

/// Result of resolving one query.
#[derive(Debug, Clone)]
pub struct LookupOutcome<'a> {
    /// The query as given.
    pub query: String,
    /// How the query was classified.
    pub kind: QueryKind,
    /// Display mode actually used.
    pub mode: DisplayMode,
    /// True when verbose output was requested but not available.
    pub downgraded: bool,
    /// Ordered matches.
    pub matches: Vec<Entry<'a>>,
}

impl LookupOutcome<'_> {
    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Message prefix used when nothing matched; the query follows it.
    #[must_use]
    pub fn no_match_message(&self) -> &'static str {
        match self.kind {
            QueryKind::Code => "No field found matching code:",
            QueryKind::Keyword => "No fields found matching keyword:",
        }
    }

    /// Match count header for keyword searches with more than one match.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        (self.kind == QueryKind::Keyword && self.matches.len() > 1)
            .then(|| format!("Found {} matches:", self.matches.len()))
    }

    /// Render the full output of this lookup, one string per printed block.
    #[must_use]
    pub fn render(&self, formatter: &Formatter) -> Vec<String> {
        let mut out = Vec::new();
        if self.downgraded {
            out.push(format!("{}\n", formatter.notice(VERBOSE_KEYWORD_NOTICE)));
        }

        if self.is_empty() {
            out.push(format!(
                "{} {}",
                formatter.notice(self.no_match_message()),
                formatter.emphasis(&self.query)
            ));
            return out;
        }

        if let Some(summary) = self.summary() {
            out.push(format!("{}\n", formatter.success(&summary)));
        }
        out.extend(formatter.render(&self.matches, self.mode));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldRecord;

    fn lookup() -> MarcLookup {
        MarcLookup::new(Dataset::from_records(
            DatasetKind::Brief,
            vec![
                FieldRecord::new("020", "International Standard Book Number (ISBN) (R)", ""),
                FieldRecord::new("020a", "International Standard Book Number (NR)", ""),
                FieldRecord::new("245", "Title Statement (NR)", ""),
                FieldRecord::new("245a", "Title (NR)", ""),
            ],
        ))
    }

    #[test]
    fn test_code_lookup_keeps_verbose() {
        let lookup = lookup();
        let outcome = lookup.lookup("245", DisplayMode::Verbose);
        assert_eq!(outcome.kind, QueryKind::Code);
        assert_eq!(outcome.mode, DisplayMode::Verbose);
        assert!(!outcome.downgraded);
        assert_eq!(outcome.matches.len(), 2);
    }

    #[test]
    fn test_keyword_lookup_downgrades_verbose() {
        let lookup = lookup();
        let outcome = lookup.lookup("title", DisplayMode::Verbose);
        assert_eq!(outcome.kind, QueryKind::Keyword);
        assert_eq!(outcome.mode, DisplayMode::Brief);
        assert!(outcome.downgraded);

        let blocks = outcome.render(&Formatter::plain());
        assert_eq!(blocks[0], format!("{VERBOSE_KEYWORD_NOTICE}\n"));
        assert_eq!(blocks[1], "Found 2 matches:\n");
        assert_eq!(blocks[2], "245    Title Statement (NR)");
        assert_eq!(blocks[3], "245$a  Title (NR)");
    }

    #[test]
    fn test_single_keyword_match_has_no_summary() {
        let lookup = lookup();
        let outcome = lookup.lookup("isbn", DisplayMode::Brief);
        assert!(outcome.summary().is_none());
        assert_eq!(
            outcome.render(&Formatter::plain()),
            vec!["020    International Standard Book Number (ISBN) (R)".to_string()]
        );
    }

    #[test]
    fn test_no_match_messages() {
        let lookup = lookup();
        let code = lookup.lookup("999", DisplayMode::Brief);
        assert_eq!(
            code.render(&Formatter::plain()),
            vec!["No field found matching code: 999".to_string()]
        );

        let keyword = lookup.lookup("zebra", DisplayMode::Brief);
        assert_eq!(
            keyword.render(&Formatter::plain()),
            vec!["No fields found matching keyword: zebra".to_string()]
        );
    }

    #[test]
    fn test_empty_query_is_keyword_without_matches() {
        let lookup = lookup();
        let outcome = lookup.lookup("", DisplayMode::Brief);
        assert_eq!(outcome.kind, QueryKind::Keyword);
        assert!(outcome.is_empty());
    }
}
