//! Larger randomized checks against a binary-search baseline.

use pgm_sorted::SortedContainer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn million_random_keys_match_baseline() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut keys: Vec<u64> = (0..1_000_000).map(|_| rng.gen()).collect();
    keys.sort_unstable();
    keys.dedup();

    let epsilon = 64;
    let c = SortedContainer::from_values(keys.iter().copied(), false, epsilon).unwrap();
    assert_eq!(c.len(), keys.len());
    assert!(c.height() >= 2);

    for (i, &key) in keys.iter().enumerate().step_by(997) {
        assert!(c.contains(key), "missing key {key}");
        assert_eq!(c.lower_bound(key), i);

        let ap = c.approximate(key);
        assert!(ap.lo <= i && i < ap.hi);
        assert!(ap.width() <= 2 * epsilon + 1);
    }

    for _ in 0..10_000 {
        let probe: u64 = rng.gen();
        let expected = keys.partition_point(|k| *k < probe);
        assert_eq!(c.lower_bound(probe), expected, "probe {probe}");
        assert_eq!(c.contains(probe), keys.binary_search(&probe).is_ok());
    }
}

#[test]
fn clustered_keys_with_duplicates() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<u64> = Vec::with_capacity(300_000);
    let mut base = 0u64;
    while keys.len() < 300_000 {
        base += rng.gen_range(1..1_000_000);
        let copies = rng.gen_range(1..50);
        for _ in 0..copies {
            keys.push(base);
        }
    }

    let c = SortedContainer::from_values(keys.iter().copied(), false, 32).unwrap();
    assert!(c.has_duplicates());

    for probe in keys.iter().step_by(1213) {
        let expected_lo = keys.partition_point(|k| k < probe);
        let expected_hi = keys.partition_point(|k| k <= probe);
        assert_eq!(c.lower_bound(*probe), expected_lo);
        assert_eq!(c.upper_bound(*probe), expected_hi);
        assert_eq!(c.count(*probe), expected_hi - expected_lo);
    }

    // probes falling between clusters
    for _ in 0..2_000 {
        let probe: u64 = rng.gen_range(0..keys.last().copied().unwrap_or(0));
        let expected = keys.partition_point(|k| *k < probe);
        assert_eq!(c.lower_bound(probe), expected, "probe {probe}");
    }
}
