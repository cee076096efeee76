//! Round-trip, ordering, lookup and rejection properties of the index

use chrono::{DateTime, TimeZone, Utc};

use keg::dex::{parse_dex, Dex, DexEntry};
use keg::KegError;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Deterministic pseudo-random sample: ids with gaps, repeated times
fn sample(n: u64) -> Dex {
    (0..n)
        .map(|i| {
            let id = (i * 7919) % 1000 + i * 1000;
            let secs = 1_500_000_000 + ((i * 104_729) % 17) as i64 * 3600;
            DexEntry::new(id, format!("Node {} draft {}", i, id), at(secs))
        })
        .collect()
}

#[test]
fn test_md_round_trip_preserves_entries_and_order() {
    for n in [0, 1, 2, 13, 50] {
        let dex = sample(n);
        let back = parse_dex(&dex.md()).unwrap();
        assert_eq!(back, dex, "round trip of {} entries", n);
    }
}

#[test]
fn test_round_trip_of_sorted_views() {
    let dex = sample(30);
    assert_eq!(parse_dex(&dex.by_latest().md()).unwrap(), dex.by_latest());
    assert_eq!(parse_dex(&dex.by_id().md()).unwrap(), dex.by_id());
}

#[test]
fn test_sorted_views_are_ordered_permutations() {
    let dex = sample(40);

    let by_id = dex.by_id();
    assert!(by_id.entries().windows(2).all(|w| w[0].id <= w[1].id));

    let by_latest = dex.by_latest();
    assert!(by_latest
        .entries()
        .windows(2)
        .all(|w| w[0].updated >= w[1].updated));

    for view in [&by_id, &by_latest] {
        assert_eq!(view.len(), dex.len());
        for entry in dex.iter() {
            assert!(view.iter().any(|e| e == entry));
        }
    }
}

#[test]
fn test_lookup_with_gaps_never_indexes_by_id() {
    let dex = Dex::from(vec![
        DexEntry::new(1, "one", at(1)),
        DexEntry::new(3, "three", at(3)),
        DexEntry::new(7, "seven", at(7)),
    ]);
    assert_eq!(dex.lookup(7).unwrap().title, "seven");
    assert_eq!(dex.lookup(1).unwrap().title, "one");
    assert!(dex.lookup(2).is_none());
    assert!(dex.lookup(0).is_none());
    assert!(dex.lookup(8).is_none());
}

#[test]
fn test_malformed_second_line_is_reported() {
    let good = "* 2021-05-01T00:00:00Z [Good](../1)";
    let cases = [
        format!("{}\n\n{}\n", good, good),
        format!("{}\n* 2021-05-01T00:00:00Z [No link]\n{}\n", good, good),
        format!("{}\n* 2021-05-01T00:00:00Z [Bad link](3)\n", good),
        format!("{}\n* 2021-05-01T00:00:00Z [Abs link](/3)\n{}\n{}\n", good, good, good),
    ];
    for input in &cases {
        match parse_dex(input) {
            Err(KegError::BadDexLine { line }) => assert_eq!(line, 2, "input: {:?}", input),
            other => panic!("expected bad line 2, got {:?} for {:?}", other, input),
        }
    }
}
