//! Hand-maintained field definitions.
//!
//! Some Library of Congress pages do not follow the structure the scraper
//! understands. Field 222 is kept here as a complete record, and the linking
//! entry fields (760-788) are kept as index listings because their index
//! page groups them in a different layout. The dataset builder merges these
//! after scraping.

use crate::builder::FieldListing;
use crate::record::{Details, Repeatability, SubfieldDetail};
use lazy_static::lazy_static;

/// Linking entry fields: code, description, repeatability.
pub const LINKING_ENTRY_FIELDS: [(&str, &str, Repeatability); 16] = [
    ("760", "Main Series Entry", Repeatability::Repeatable),
    ("762", "Subseries Entry", Repeatability::Repeatable),
    ("765", "Original Language Entry", Repeatability::Repeatable),
    ("767", "Translation Entry", Repeatability::Repeatable),
    ("770", "Supplement/Special Issue Entry", Repeatability::Repeatable),
    ("772", "Supplement Parent Entry", Repeatability::Repeatable),
    ("773", "Host Item Entry", Repeatability::Repeatable),
    ("774", "Constituent Unit Entry", Repeatability::Repeatable),
    ("775", "Other Edition Entry", Repeatability::Repeatable),
    ("776", "Additional Physical Form Entry", Repeatability::Repeatable),
    ("777", "Issued With Entry", Repeatability::Repeatable),
    ("780", "Preceding Entry", Repeatability::Repeatable),
    ("785", "Succeeding Entry", Repeatability::Repeatable),
    ("786", "Data Source Entry", Repeatability::Repeatable),
    ("787", "Other Relationship Entry", Repeatability::Repeatable),
    (
        "788",
        "Parallel Description in Another Language of Cataloging",
        Repeatability::Repeatable,
    ),
];

/// A field whose whole record is maintained by hand.
#[derive(Debug, Clone)]
pub struct ManualField {
    /// Field code.
    pub code: &'static str,
    /// Description without the repeatability marker.
    pub description: &'static str,
    /// Field repeatability.
    pub repeatability: Repeatability,
    /// Full documentation.
    pub details: Details,
}

const APPENDIX_A: &str = "See description of this subfield in Appendix A: Control Subfields.";

lazy_static! {
    /// Fields replaced wholesale by hand-maintained records.
    pub static ref MANUAL_FIELDS: Vec<ManualField> = vec![field_222()];
}

fn field_222() -> ManualField {
    let mut details = Details {
        definition: "Unique title for a continuing resource that is assigned in conjunction \
                     with an ISSN recorded in field 022 by national centers under the auspices \
                     of the ISSN Network."
            .to_string(),
        ..Details::default()
    };

    details.indicators.insert(
        "First - Undefined".to_string(),
        vec!["# - Undefined".to_string()],
    );
    details.indicators.insert(
        "Second - Nonfiling characters".to_string(),
        vec![
            "0 - No nonfiling characters".to_string(),
            "1-9 - Number of nonfiling characters".to_string(),
        ],
    );

    for (code, description, extended, repeatability) in [
        ("a", "Key title", "", Repeatability::NonRepeatable),
        (
            "b",
            "Qualifying information",
            "Parenthetical information that qualifies the title to make it unique.",
            Repeatability::NonRepeatable,
        ),
        ("6", "Linkage", APPENDIX_A, Repeatability::NonRepeatable),
        (
            "8",
            "Field link and sequence number",
            APPENDIX_A,
            Repeatability::Repeatable,
        ),
    ] {
        details.subfields.insert(
            code.to_string(),
            SubfieldDetail::new(description, extended, repeatability),
        );
    }

    details.examples = [
        "#0$aViva$b(New York)",
        "#0$aCauses of death",
        "#4$aDer Öffentliche Dienst$b(Köln)",
        "#0$aJournal of polymer science. Part B. Polymer letters",
        "#0$aEconomic education bulletin$b(Great Barrington)",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    ManualField {
        code: "222",
        description: "Key Title",
        repeatability: Repeatability::Repeatable,
        details,
    }
}

/// Linking entry fields as index listings.
#[must_use]
pub fn linking_entry_listings() -> Vec<FieldListing> {
    LINKING_ENTRY_FIELDS
        .iter()
        .map(|&(code, description, repeatability)| FieldListing::new(code, description, repeatability))
        .collect()
}

/// True when `code` is maintained by hand and must not be scraped.
#[must_use]
pub fn is_manual_field(code: &str) -> bool {
    MANUAL_FIELDS.iter().any(|field| field.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_222_table() {
        assert!(is_manual_field("222"));
        assert!(!is_manual_field("245"));
        let field = &MANUAL_FIELDS[0];
        assert_eq!(field.details.subfields.len(), 4);
        assert_eq!(field.details.examples.len(), 5);
        assert_eq!(
            field.details.subfields["8"].repeatability,
            Repeatability::Repeatable
        );
    }

    #[test]
    fn test_linking_entries_cover_760_to_788() {
        let listings = linking_entry_listings();
        assert_eq!(listings.len(), 16);
        assert_eq!(listings[0].code, "760");
        assert_eq!(listings[15].code, "788");
        assert!(listings
            .iter()
            .all(|l| l.repeatability == Repeatability::Repeatable));
    }
}
