//! Full rebuild from the node directories

use keg::{keg as store, make_dex, scan_dex, KegError};

use crate::common::{assert_newest_first, assert_tsv_by_id, assert_valid_latest, TestKeg};

#[test]
fn test_rebuild_writes_both_views() {
    let keg = TestKeg::with_gaps();
    make_dex(keg.path()).unwrap();

    assert_eq!(
        keg.latest(),
        "* 2023-11-14T22:13:20Z [Seventh](../7)\n\
         * 2020-09-13T12:26:40Z [First](../1)\n\
         * 2017-07-14T02:40:00Z [Third](../3)\n"
    );
    assert_eq!(
        keg.nodes(),
        "1\tFirst\t2020-09-13T12:26:40Z\n\
         3\tThird\t2017-07-14T02:40:00Z\n\
         7\tSeventh\t2023-11-14T22:13:20Z\n"
    );
}

#[test]
fn test_rebuild_is_idempotent() {
    let keg = TestKeg::with_gaps();
    keg.add_file("dex/README.md", "# Index\n");

    make_dex(keg.path()).unwrap();
    let (md1, tsv1) = (keg.latest(), keg.nodes());
    make_dex(keg.path()).unwrap();
    let (md2, tsv2) = (keg.latest(), keg.nodes());

    assert_eq!(md1, md2);
    assert_eq!(tsv1, tsv2);
}

#[test]
fn test_rebuild_discards_previous_index() {
    let keg = TestKeg::with_gaps();
    keg.write_latest("* 2030-01-01T00:00:00Z [Gone](../99)\n");
    keg.add_file("dex/nodes.tsv", "99\tGone\t2030-01-01T00:00:00Z\n");

    make_dex(keg.path()).unwrap();

    assert!(!keg.latest().contains("Gone"));
    assert_eq!(assert_tsv_by_id(&keg.nodes()), vec![1, 3, 7]);
}

#[test]
fn test_rebuild_updates_metadata_field_only() {
    let keg = TestKeg::with_gaps();
    make_dex(keg.path()).unwrap();

    let meta = keg.kegfile();
    let lines: Vec<&str> = meta.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "title: Test Keg");
    assert!(lines[1].starts_with("updated: "));
    assert_ne!(lines[1], "updated: 2000-01-01T00:00:00Z");
    keg::dex::parse_timestamp(lines[1].trim_start_matches("updated: ")).unwrap();
    assert_eq!(lines[2], "url: https://example.com/keg");
}

#[test]
fn test_rebuild_ties_break_by_id() {
    let keg = TestKeg::new();
    keg.add_node(9, "Nine", 1_600_000_000)
        .add_node(2, "Two", 1_600_000_000)
        .add_node(5, "Five", 1_600_000_000);

    let dex = scan_dex(keg.path()).unwrap();
    let ids: Vec<u64> = dex.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 5, 9]);
}

#[test]
fn test_rebuild_skips_non_nodes_and_tolerates_missing_titles() {
    let keg = TestKeg::with_gaps();
    keg.add_file("drafts/README.md", "# Not a node\n");
    keg.add_file("010/README.md", "# Not canonical\n");
    keg.add_file("12/notes.txt", "no readme here");
    keg.add_file("13/README.md", "no heading at all\n");

    let dex = make_dex(keg.path()).unwrap();
    assert_eq!(dex.len(), 5);
    assert_eq!(dex.lookup(12).unwrap().title, "");
    assert_eq!(dex.lookup(13).unwrap().title, "");
    assert!(dex.lookup(10).is_none());

    let latest = assert_valid_latest(&keg.latest());
    assert_newest_first(&latest);
    assert_eq!(assert_tsv_by_id(&keg.nodes()), vec![1, 3, 7, 12, 13]);
}

#[test]
fn test_rebuild_empty_keg() {
    let keg = TestKeg::new();
    let dex = make_dex(keg.path()).unwrap();
    assert!(dex.is_empty());
    assert_eq!(keg.latest(), "");
    assert_eq!(keg.nodes(), "");
    assert!(store::last(keg.path()).is_none());
}

#[test]
fn test_rebuild_without_metadata_file_fails_cleanly() {
    let keg = TestKeg::with_gaps();
    std::fs::remove_file(keg.path().join("keg")).unwrap();

    let err = make_dex(keg.path()).unwrap_err();
    assert!(matches!(err, KegError::Io(_)));
    assert!(!keg.path().join("dex/latest.md").exists());
    assert!(!keg.path().join("dex/nodes.tsv").exists());
}

#[cfg(unix)]
#[test]
fn test_rebuild_keeps_file_modes() {
    use std::os::unix::fs::PermissionsExt;

    let keg = TestKeg::with_gaps();
    let meta = keg.path().join("keg");
    std::fs::set_permissions(&meta, std::fs::Permissions::from_mode(0o644)).unwrap();
    make_dex(keg.path()).unwrap();

    let latest = keg.path().join("dex/latest.md");
    std::fs::set_permissions(&latest, std::fs::Permissions::from_mode(0o664)).unwrap();
    make_dex(keg.path()).unwrap();

    let mode = |p: &std::path::Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&meta), 0o644);
    assert_eq!(mode(&latest), 0o664);
    assert_eq!(mode(&keg.path().join("dex/nodes.tsv")) & 0o600, 0o600);
}
