//! Presentation of lookup results.
//!
//! Rendering happens in two steps. First the data shown for each match is
//! selected into a [`BriefLine`] or [`DetailedView`]; then a [`Formatter`]
//! turns those into text, with or without ANSI styling.
//!
//! Brief output is one line per match:
//!
//! ```text
//! 245    Title Statement (NR)
//! 245$a  Title (NR)
//! ```
//!
//! Detailed output is only produced for field records. Subfield entries in
//! a verbose result set are skipped, since their documentation is already
//! part of the field's detailed view.

use crate::dataset::Entry;
use crate::record::{
    field_part, is_field_key, split_repeatability, subfield_part, FieldRecord, Repeatability,
    SubfieldDetail,
};
use colored::{ColoredString, Colorize};

/// Maximum number of examples shown in a detailed view.
pub const MAX_EXAMPLES: usize = 5;

/// Width of the rule framing a detailed view header.
const RULE_WIDTH: usize = 70;

/// Brief or detailed presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// One line per field and subfield.
    #[default]
    Brief,
    /// Full documentation per field; subfield entries are skipped.
    Verbose,
}

/// Data shown on a brief result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefLine<'a> {
    /// Field or subfield key.
    pub key: &'a str,
    /// Description with any repeatability marker removed.
    pub description: &'a str,
    /// Repeatability marker removed from the description.
    pub repeatability: Option<Repeatability>,
}

impl<'a> BriefLine<'a> {
    /// Select the brief data of an entry.
    #[must_use]
    pub fn new(key: &'a str, record: &'a FieldRecord) -> Self {
        let (description, repeatability) = split_repeatability(&record.value);
        BriefLine {
            key,
            description,
            repeatability,
        }
    }

    /// True when the line describes a field rather than a subfield.
    #[must_use]
    pub fn is_field(&self) -> bool {
        is_field_key(self.key)
    }
}

/// Data shown in a detailed view of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedView<'a> {
    /// Field key.
    pub key: &'a str,
    /// Full description, including its repeatability marker.
    pub value: &'a str,
    /// Definition, if the documentation has a non-empty one.
    pub definition: Option<&'a str>,
    /// Indicators in documentation order.
    pub indicators: Vec<(&'a str, &'a [String])>,
    /// Subfields, alphabetic codes before numeric.
    pub subfields: Vec<(&'a str, &'a SubfieldDetail)>,
    /// At most [`MAX_EXAMPLES`] examples with their 1-based numbers.
    pub examples: Vec<(usize, &'a str)>,
}

impl<'a> DetailedView<'a> {
    /// Select the detailed data of a field record.
    ///
    /// Returns `None` for subfield keys and for records without details.
    #[must_use]
    pub fn new(key: &'a str, record: &'a FieldRecord) -> Option<Self> {
        if !is_field_key(key) {
            return None;
        }
        let details = record.details.as_ref()?;

        Some(DetailedView {
            key,
            value: &record.value,
            definition: Some(details.definition.as_str()).filter(|d| !d.is_empty()),
            indicators: details
                .indicators
                .iter()
                .map(|(name, values)| (name.as_str(), values.as_slice()))
                .collect(),
            subfields: details.sorted_subfields(),
            examples: details
                .examples
                .iter()
                .take(MAX_EXAMPLES)
                .enumerate()
                .map(|(i, example)| (i + 1, example.as_str()))
                .collect(),
        })
    }
}

/// One rendered unit of output.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// A single brief line.
    Brief(BriefLine<'a>),
    /// A detailed multi-line field view.
    Detailed(DetailedView<'a>),
}

/// Select what to show for each match in the given mode.
///
/// In verbose mode subfield entries are dropped and field records without
/// details fall back to a brief line.
#[must_use]
pub fn select_views<'a>(matches: &[Entry<'a>], mode: DisplayMode) -> Vec<View<'a>> {
    match mode {
        DisplayMode::Brief => matches
            .iter()
            .map(|&(key, record)| View::Brief(BriefLine::new(key, record)))
            .collect(),
        DisplayMode::Verbose => matches
            .iter()
            .filter(|(key, _)| is_field_key(key))
            .map(|&(key, record)| {
                DetailedView::new(key, record)
                    .map_or_else(|| View::Brief(BriefLine::new(key, record)), View::Detailed)
            })
            .collect(),
    }
}

/// Turns selected views into text.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Formatter {
    /// Create a formatter; `color` enables ANSI styling.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Formatter { color }
    }

    /// A formatter producing plain text.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, style: impl FnOnce(ColoredString) -> ColoredString) -> String {
        if self.color {
            style(text.normal()).to_string()
        } else {
            text.to_string()
        }
    }

    fn badge(&self, repeatability: Repeatability) -> String {
        match repeatability {
            Repeatability::Repeatable => self.paint(repeatability.badge(), |s| s.green()),
            Repeatability::NonRepeatable => self.paint(repeatability.badge(), |s| s.yellow()),
        }
    }

    /// Render a brief line.
    #[must_use]
    pub fn brief(&self, line: &BriefLine<'_>) -> String {
        let (display_key, spacing) = if line.is_field() {
            (self.paint(line.key, |s| s.cyan().bold()), "    ")
        } else {
            let field = self.paint(field_part(line.key), |s| s.blue());
            let code = self.paint(&format!("${}", subfield_part(line.key)), |s| s.magenta());
            (format!("{field}{code}"), "  ")
        };

        match line.repeatability {
            Some(r) => format!(
                "{display_key}{spacing}{} {}",
                line.description,
                self.badge(r)
            ),
            None => format!("{display_key}{spacing}{}", line.description),
        }
    }

    /// Render a detailed field view.
    #[must_use]
    pub fn detailed(&self, view: &DetailedView<'_>) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = vec![
            String::new(),
            self.paint(&rule, |s| s.cyan().bold()),
            self.paint(&format!("{} - {}", view.key, view.value), |s| s.cyan().bold()),
            self.paint(&rule, |s| s.cyan().bold()),
            String::new(),
        ];

        if let Some(definition) = view.definition {
            out.push(self.heading("Definition:"));
            out.push(format!("  {definition}"));
            out.push(String::new());
        }

        if !view.indicators.is_empty() {
            out.push(self.heading("Indicators:"));
            for (name, values) in &view.indicators {
                out.push(format!("  {}", self.paint(name, |s| s.magenta())));
                out.extend(values.iter().map(|value| format!("    {value}")));
            }
            out.push(String::new());
        }

        if !view.subfields.is_empty() {
            out.push(self.heading("Subfields:"));
            for (code, subfield) in &view.subfields {
                out.push(format!(
                    "  {} - {} {}",
                    self.paint(&format!("${code}"), |s| s.magenta()),
                    subfield.description,
                    self.badge(subfield.repeatability)
                ));
                if !subfield.extended.is_empty() {
                    out.push(format!(
                        "      {}",
                        self.paint(&subfield.extended, |s| s.white().dimmed())
                    ));
                }
            }
            out.push(String::new());
        }

        if !view.examples.is_empty() {
            out.push(self.heading("Examples:"));
            for (number, example) in &view.examples {
                out.push(format!(
                    "  {} {example}",
                    self.paint(&format!("{number}."), |s| s.green())
                ));
            }
            out.push(String::new());
        }

        out.join("\n")
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, |s| s.yellow().bold())
    }

    /// Render one view.
    #[must_use]
    pub fn view(&self, view: &View<'_>) -> String {
        match view {
            View::Brief(line) => self.brief(line),
            View::Detailed(detail) => self.detailed(detail),
        }
    }

    /// Select and render every match; one string per printed block.
    #[must_use]
    pub fn render(&self, matches: &[Entry<'_>], mode: DisplayMode) -> Vec<String> {
        select_views(matches, mode)
            .iter()
            .map(|view| self.view(view))
            .collect()
    }

    /// Style an informational message.
    #[must_use]
    pub fn notice(&self, text: &str) -> String {
        self.paint(text, |s| s.yellow())
    }

    /// Style a success message.
    #[must_use]
    pub fn success(&self, text: &str) -> String {
        self.paint(text, |s| s.green())
    }

    /// Style an error message.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        self.paint(text, |s| s.red())
    }

    /// Style the echoed query inside a message.
    #[must_use]
    pub fn emphasis(&self, text: &str) -> String {
        self.paint(text, |s| s.white())
    }
}
