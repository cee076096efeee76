//! Custom assertions for integration tests
//!
//! Helpers for validating index files and JSON CLI output.

use serde_json::Value;

use keg::dex::{parse_dex, Dex};

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that JSON output has expected type
pub fn assert_json_type(json: &Value, expected_type: &str) {
    let actual_type = json["_type"]
        .as_str()
        .unwrap_or_else(|| panic!("JSON missing '_type' field"));
    assert_eq!(
        actual_type, expected_type,
        "Expected JSON type '{}' but got '{}'",
        expected_type, actual_type
    );
}

/// Assert that `latest.md` text parses and return it
pub fn assert_valid_latest(md: &str) -> Dex {
    parse_dex(md).unwrap_or_else(|e| panic!("latest.md does not parse: {}\n{}", e, md))
}

/// Assert `latest.md` is newest first
pub fn assert_newest_first(dex: &Dex) {
    for pair in dex.entries().windows(2) {
        assert!(
            pair[0].updated >= pair[1].updated,
            "entries out of order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert `nodes.tsv` text is in ascending id order and return the ids
pub fn assert_tsv_by_id(tsv: &str) -> Vec<u64> {
    let ids: Vec<u64> = tsv
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 3, "bad tsv line: {:?}", line);
            fields[0].parse().expect("numeric id")
        })
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted, "nodes.tsv is not in id order");
    ids
}
