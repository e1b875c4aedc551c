//! Property-based testing for the matcher
//! Uses proptest to generate random records and verify invariants

use proptest::prelude::*;
use serde_json::{json, Value};
use vhdmp_detect::{LogRecord, RuleMatcher, VhdMountMatcher};

// Strategy for generating field names
fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_.]{0,30}".prop_map(|s| s.to_string())
}

// Strategy for generating field values
fn field_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(null)),
        any::<bool>().prop_map(|b| json!(b)),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-zA-Z0-9 _./\\\\-]{0,100}".prop_map(|s| json!(s)),
        prop::collection::vec("[a-zA-Z0-9]{0,20}", 0..5).prop_map(|v| json!(v)),
    ]
}

// Strategy for generating whole records
fn record_strategy() -> impl Strategy<Value = Value> {
    prop::collection::hash_map(field_name_strategy(), field_value_strategy(), 0..20)
        .prop_map(|map| json!(map))
}

// EventIDs outside the accepted set {1, 12}
fn rejected_event_id_strategy() -> impl Strategy<Value = Value> {
    any::<i64>()
        .prop_filter("outside accepted set", |i| *i != 1 && *i != 12)
        .prop_map(|i| json!(i))
}

proptest! {
    #[test]
    fn evaluation_never_panics(record in record_strategy()) {
        // Property: evaluating any record must never panic
        let _ = VhdMountMatcher::new().evaluate(&LogRecord::new(record));
    }

    #[test]
    fn matched_equals_conjunction_of_conditions(record in record_strategy()) {
        // Property: matched is exactly the AND of the two sub-conditions
        let outcome = VhdMountMatcher::new().evaluate(&LogRecord::new(record));
        prop_assert_eq!(
            outcome.matched,
            outcome.detail.event_id_match && outcome.detail.vhd_extension_match
        );
    }

    #[test]
    fn rejected_event_id_never_matches(
        event_id in rejected_event_id_strategy(),
        filename in "[a-zA-Z0-9\\\\.]{0,60}"
    ) {
        let outcome = VhdMountMatcher::new().evaluate(&LogRecord::new(json!({
            "EventID": event_id,
            "EventData": {"VhdFileName": filename}
        })));
        prop_assert!(!outcome.matched);
    }

    #[test]
    fn filename_without_suffix_never_matches(filename in "[a-zA-Z0-9\\\\ ._-]{0,80}") {
        prop_assume!(!filename.to_lowercase().ends_with(".vhd"));
        prop_assume!(!filename.to_lowercase().ends_with(".vhdx"));

        let outcome = VhdMountMatcher::new().evaluate(&LogRecord::new(json!({
            "EventID": 1,
            "EventData": {"VhdFileName": filename}
        })));
        prop_assert!(!outcome.matched);
    }

    #[test]
    fn suffix_match_survives_case_changes(
        stem in "[a-zA-Z0-9]{1,40}",
        upper_mask in prop::collection::vec(any::<bool>(), 5)
    ) {
        // Property: toggling case anywhere in ".vhdx" never changes the result
        let suffix: String = ".vhdx"
            .chars()
            .zip(upper_mask)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let outcome = VhdMountMatcher::new().evaluate(&LogRecord::new(json!({
            "EventID": 12,
            "EventData": {"VhdFileName": format!("{}{}", stem, suffix)}
        })));
        prop_assert!(outcome.matched);
    }
}
