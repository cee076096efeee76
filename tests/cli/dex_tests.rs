//! CLI tests for `dex`, `last`, and `updated`

use crate::common::{
    assert_json_type, assert_tsv_by_id, assert_valid_json, assert_valid_latest, TestKeg,
};

#[test]
fn test_dex_update_writes_index() {
    let keg = TestKeg::with_gaps();
    let output = keg.run_cli_success(&["dex", "update"]);
    assert!(output.is_empty());

    let dex = assert_valid_latest(&keg.latest());
    let ids: Vec<u64> = dex.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![7, 1, 3]);
    assert_eq!(assert_tsv_by_id(&keg.nodes()), vec![1, 3, 7]);
}

#[test]
fn test_dex_update_json() {
    let keg = TestKeg::with_gaps();
    let output = keg.run_cli_success(&["dex", "update", "-f", "json"]);
    let json = assert_valid_json(&output, "dex update");
    assert_json_type(&json, "dex_update");
    assert_eq!(json["nodes"], 3);
}

#[test]
fn test_dex_show_orders() {
    let keg = TestKeg::with_gaps();
    keg.run_cli_success(&["dex", "update"]);

    let latest = keg.run_cli_success(&["dex", "show"]);
    assert_eq!(latest, keg.latest());

    let tsv = keg.run_cli_success(&["dex", "show", "--by", "id", "--tsv"]);
    assert_eq!(tsv, keg.nodes());
}

#[test]
fn test_dex_show_json_is_entry_array() {
    let keg = TestKeg::with_gaps();
    keg.run_cli_success(&["dex", "update"]);

    let output = keg.run_cli_success(&["dex", "show", "--by", "id", "-f", "json"]);
    let json = assert_valid_json(&output, "dex show");
    let entries = json.as_array().expect("array of entries");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[0]["title"], "First");
    assert_eq!(entries[2]["id"], 7);
}

#[test]
fn test_dex_show_rejects_corrupt_index() {
    let keg = TestKeg::new();
    keg.write_latest("* 2021-06-02T00:00:00Z [B](../2)\nnot an entry\n");
    let (_, stderr) = keg.run_cli_failure(&["dex", "show"]);
    assert!(stderr.contains("bad line in latest.md: 2"), "stderr: {}", stderr);
}

#[test]
fn test_last_and_updated() {
    let keg = TestKeg::with_gaps();
    keg.run_cli_success(&["dex", "update"]);

    assert_eq!(keg.run_cli_success(&["last"]), "7 Seventh\n");
    assert_eq!(keg.run_cli_success(&["updated"]), "2023-11-14T22:13:20Z\n");

    let json = assert_valid_json(&keg.run_cli_success(&["updated", "-f", "json"]), "updated");
    assert_json_type(&json, "updated");
    assert_eq!(json["updated"], "2023-11-14T22:13:20Z");
}

#[test]
fn test_last_without_index_fails() {
    let keg = TestKeg::new();
    let (stdout, _) = keg.run_cli_failure(&["last"]);
    assert!(stdout.is_empty());
}

#[test]
fn test_dex_show_without_index_fails() {
    let keg = TestKeg::with_gaps();
    let (stdout, stderr) = keg.run_cli_failure(&["dex", "show"]);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error:"), "stderr: {}", stderr);
}
