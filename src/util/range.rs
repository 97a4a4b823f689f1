use core::ops::{Bound, RangeBounds};

/// Resolve a `RangeBounds` over keys to a half-open index pair, using the
/// container's bound searches. The end never precedes the start.
#[inline]
pub(crate) fn range_to_indices<K, R, L, U>(
    range: R,
    len: usize,
    lower_bound: L,
    upper_bound: U,
) -> (usize, usize)
where
    R: RangeBounds<K>,
    L: Fn(&K) -> usize,
    U: Fn(&K) -> usize,
{
    let start = match range.start_bound() {
        Bound::Included(key) => lower_bound(key),
        Bound::Excluded(key) => upper_bound(key),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(key) => upper_bound(key),
        Bound::Excluded(key) => lower_bound(key),
        Bound::Unbounded => len,
    };
    (start.min(len), end.min(len).max(start.min(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices<R: RangeBounds<u64>>(data: &[u64], range: R) -> (usize, usize) {
        range_to_indices(
            range,
            data.len(),
            |k| data.partition_point(|x| x < k),
            |k| data.partition_point(|x| x <= k),
        )
    }

    #[test]
    fn test_bound_combinations() {
        let data = [10u64, 20, 30, 40, 50];
        assert_eq!(indices(&data, ..), (0, 5));
        assert_eq!(indices(&data, 20..), (1, 5));
        assert_eq!(indices(&data, ..40), (0, 3));
        assert_eq!(indices(&data, ..=40), (0, 4));
        assert_eq!(indices(&data, 20..40), (1, 3));
        assert_eq!(indices(&data, (Bound::Excluded(20), Bound::Included(40))), (2, 4));
    }

    #[test]
    fn test_inverted_collapses() {
        let data = [10u64, 20, 30];
        assert_eq!(indices(&data, 30..10), (2, 2));
        assert_eq!(indices(&data, 100..200), (3, 3));
    }
}
