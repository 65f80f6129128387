//! Property tests for page-size clamping and lenient reporting-path parsing.

use orgwalk_core::config::clamp_page_size;
use orgwalk_core::constants::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use orgwalk_core::Entity;
use proptest::prelude::*;
use serde_json::json;

/// Path segments as the service might send them: padded, sometimes blank.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,8}",
        " {1,3}[a-z0-9]{1,8} {0,2}",
        " {0,3}",
    ]
}

fn entity_with_path(path: serde_json::Value) -> Entity {
    serde_json::from_value(json!({ "id": "e1", "reportingPath": path })).unwrap()
}

proptest! {
    #[test]
    fn clamped_page_size_is_in_range_and_stable(requested in any::<u32>()) {
        let clamped = clamp_page_size(requested);
        prop_assert!((MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&clamped));
        prop_assert_eq!(clamp_page_size(clamped), clamped);
        if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&requested) {
            prop_assert_eq!(clamped, requested);
        }
    }

    #[test]
    fn delimited_path_keeps_only_trimmed_non_blank_ids(
        segments in prop::collection::vec(segment(), 0..12),
        slashes in prop::collection::vec(any::<bool>(), 12),
    ) {
        let mut raw = String::new();
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                raw.push(if slashes[i] { '/' } else { ',' });
            }
            raw.push_str(seg);
        }
        let expected: Vec<String> = segments
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let entity = entity_with_path(json!(raw));

        for id in &entity.reporting_path {
            prop_assert!(!id.is_empty());
            prop_assert_eq!(id.trim(), id.as_str());
            prop_assert!(!id.contains(',') && !id.contains('/'));
        }
        prop_assert_eq!(entity.reporting_path, expected);
    }

    #[test]
    fn array_path_drops_blanks_and_non_strings(
        segments in prop::collection::vec(segment(), 0..12),
        numbers in prop::collection::vec(any::<i64>(), 0..4),
    ) {
        let mut items: Vec<serde_json::Value> = segments.iter().map(|s| json!(s)).collect();
        items.extend(numbers.iter().map(|n| json!(n)));
        let expected: Vec<String> = segments
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let entity = entity_with_path(serde_json::Value::Array(items));

        prop_assert_eq!(entity.reporting_path, expected);
    }
}
