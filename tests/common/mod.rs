//! Common test helpers and synthetic datasets shared across the test suite.

#![allow(dead_code)]

use marc_lookup::{Dataset, DatasetKind, Details, FieldRecord, Repeatability, SubfieldDetail};

pub const CREATED: &str = "2024-01-01T00:00:00+00:00";

/// Brief records used by most tests, deliberately not in key order.
pub fn brief_records() -> Vec<FieldRecord> {
    [
        ("0206", "Linkage (NR)"),
        ("245", "Title Statement (NR)"),
        ("020z", "Canceled/invalid ISBN (R)"),
        ("020", "International Standard Book Number (ISBN) (R)"),
        ("020a", "International Standard Book Number (NR)"),
        ("0208", "Field link and sequence number (R)"),
        ("022", "International Standard Serial Number (R)"),
        ("245a", "Title (NR)"),
        ("245c", "Statement of responsibility, etc. (NR)"),
        ("500", "General Note (R)"),
        ("500a", "General note (NR)"),
        ("534", "Original Version Note (R)"),
        ("534z", "International Standard Book Number (R)"),
        ("590", "Local note"),
    ]
    .iter()
    .map(|(key, value)| FieldRecord::new(*key, *value, CREATED))
    .collect()
}

/// The brief test dataset.
pub fn brief_dataset() -> Dataset {
    Dataset::from_records(DatasetKind::Brief, brief_records())
}

/// Details for field 245 with seven examples.
pub fn details_245() -> Details {
    let mut details = Details {
        definition: "Title and statement of responsibility area of the bibliographic description of a work."
            .to_string(),
        ..Details::default()
    };
    details.indicators.insert(
        "First - Title added entry".to_string(),
        vec!["0 - No added entry".to_string(), "1 - Added entry".to_string()],
    );
    details.indicators.insert(
        "Second - Nonfiling characters".to_string(),
        vec![
            "0 - No nonfiling characters".to_string(),
            "1-9 - Number of nonfiling characters".to_string(),
        ],
    );
    for (code, description, extended, repeatability) in [
        ("6", "Linkage", "See Appendix A.", Repeatability::NonRepeatable),
        ("c", "Statement of responsibility, etc.", "", Repeatability::NonRepeatable),
        ("a", "Title", "", Repeatability::NonRepeatable),
        ("8", "Field link and sequence number", "", Repeatability::Repeatable),
    ] {
        details.subfields.insert(
            code.to_string(),
            SubfieldDetail::new(description, extended, repeatability),
        );
    }
    details.examples = (1..=7).map(|i| format!("10$aExample title {i}")).collect();
    details
}

/// Verbose dataset: the brief records plus details on field 245.
pub fn verbose_dataset() -> Dataset {
    let records = brief_records().into_iter().map(|record| {
        if record.key == "245" {
            record.with_details(details_245())
        } else {
            record
        }
    });
    Dataset::from_records(DatasetKind::Verbose, records)
}

/// Keys of a match list.
pub fn keys<'a>(matches: &[(&'a str, &'a FieldRecord)]) -> Vec<&'a str> {
    matches.iter().map(|(key, _)| *key).collect()
}
