#![cfg(feature = "serde")]

use pgm_sorted::{PgmIndex, SortedContainer};

#[test]
fn serde_round_trip_index() {
    let keys: Vec<u64> = (0..10_000).map(|i| i * 7).collect();
    let index = PgmIndex::new(&keys, 64).unwrap();

    let json = serde_json::to_string(&index).unwrap();
    let de: PgmIndex<u64> = serde_json::from_str(&json).unwrap();

    assert_eq!(de.len(), index.len());
    assert_eq!(de.height(), index.height());
    assert_eq!(de.segments_count(), index.segments_count());

    for key in [0u64, 7, 35_000, 69_993, 100_000] {
        let a = index.approximate(key);
        let b = de.approximate(key);
        assert_eq!((a.pos, a.lo, a.hi), (b.pos, b.lo, b.hi));
    }
}

#[test]
fn serde_round_trip_container() {
    let c = SortedContainer::from_values((0..1000u64).map(|i| i % 250), false, 16).unwrap();

    let json = serde_json::to_string(&c).unwrap();
    let de: SortedContainer<u64> = serde_json::from_str(&json).unwrap();

    assert_eq!(de, c);
    assert_eq!(de.has_duplicates(), c.has_duplicates());
    assert_eq!(de.epsilon(), c.epsilon());
    for probe in 0..260 {
        assert_eq!(de.lower_bound(probe), c.lower_bound(probe));
        assert_eq!(de.upper_bound(probe), c.upper_bound(probe));
    }
}

#[test]
fn serde_round_trip_float_container() {
    let c = SortedContainer::from_values((0..500).map(|i| i as f64 / 3.0), false, 16).unwrap();

    let json = serde_json::to_string(&c).unwrap();
    let de: SortedContainer<f64> = serde_json::from_str(&json).unwrap();

    assert_eq!(de, c);
    assert_eq!(de.find_ge(50.0), c.find_ge(50.0));
}
