//! Property tests for lookup ordering

mod common;

use common::brief_records;
use marc_lookup::{search_by_code, search_by_keyword, Dataset, DatasetKind, FieldRecord};
use proptest::prelude::*;

fn shuffled(seed: Vec<usize>) -> Dataset {
    let mut records = brief_records();
    for (i, j) in seed.into_iter().enumerate() {
        let len = records.len();
        records.swap(i % len, j % len);
    }
    Dataset::from_records(DatasetKind::Brief, records)
}

fn owned(matches: &[(&str, &FieldRecord)]) -> Vec<String> {
    matches.iter().map(|(key, _)| (*key).to_string()).collect()
}

proptest! {
    #[test]
    fn code_results_ignore_dataset_order(seed in prop::collection::vec(0usize..32, 0..32), code in "(0|02|020|020[a-z0-9]|24|245|5)") {
        let baseline = Dataset::from_records(DatasetKind::Brief, brief_records());
        let expected = owned(&search_by_code(&baseline, &code));
        let dataset = shuffled(seed);
        prop_assert_eq!(owned(&search_by_code(&dataset, &code)), expected);
    }

    #[test]
    fn keyword_results_ignore_dataset_order(seed in prop::collection::vec(0usize..32, 0..32), keyword in "(isbn|note|number|title|standard|n|e)") {
        let baseline = Dataset::from_records(DatasetKind::Brief, brief_records());
        let expected = owned(&search_by_keyword(&baseline, &keyword));
        let dataset = shuffled(seed);
        prop_assert_eq!(owned(&search_by_keyword(&dataset, &keyword)), expected);
    }

    #[test]
    fn code_results_are_prefix_matches(code in "[0-9]{1,3}[a-z0-9]?") {
        let dataset = Dataset::from_records(DatasetKind::Brief, brief_records());
        for (key, _) in search_by_code(&dataset, &code) {
            prop_assert!(key.to_lowercase().starts_with(&code.to_lowercase()));
        }
    }

    #[test]
    fn fields_precede_their_subfields(code in "(0|02|020|2|24|245|5|53)") {
        let dataset = Dataset::from_records(DatasetKind::Brief, brief_records());
        let matches = search_by_code(&dataset, &code);
        let first_subfield = matches.iter().position(|(key, _)| key.len() > 3);
        if let Some(pos) = first_subfield {
            prop_assert!(matches[pos..].iter().all(|(key, _)| key.len() > 3));
        }
    }
}
