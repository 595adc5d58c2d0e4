use std::borrow::Borrow;

use crate::{consts::LINEAR_SEARCH_THRESHOLD, Compare};

/// Boundary search over a sorted key buffer.
///
/// The query may be any borrowed form `Q` of the key, as long as the comparator orders `Q`
/// the same way it orders `K`. Every strategy must return the same positions; they only
/// differ in how they get there.
pub trait KeySearch {
    /// first index `i` with `!cmp.less(keys[i], k)`, or `keys.len()`
    fn lower_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>;

    /// first index `i` with `cmp.less(k, keys[i])`, or `keys.len()`
    fn upper_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>;
}

/// Forward scan, stops at the first key that is not less than the query.
pub struct LinearSearch;

impl KeySearch for LinearSearch {
    #[inline]
    fn lower_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        keys.iter()
            .position(|key| !cmp.less(key.borrow(), k))
            .unwrap_or(keys.len())
    }

    #[inline]
    fn upper_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        keys.iter()
            .position(|key| cmp.less(k, key.borrow()))
            .unwrap_or(keys.len())
    }
}

/// Forward scan that tests `N` keys per step without branching inside the chunk.
///
/// A chunk size of zero is rejected when the strategy is instantiated.
///
/// ```rust
/// use flat_ordered_map::{ChunkedLinearSearch, KeySearch, Less};
///
/// let keys: &[u32] = &[1, 3, 5, 7, 9];
/// assert_eq!(ChunkedLinearSearch::<2>::lower_bound(keys, &6, &Less), 3);
/// ```
///
/// ```rust,compile_fail
/// use flat_ordered_map::{ChunkedLinearSearch, KeySearch, Less};
///
/// let keys: &[u32] = &[1, 3, 5, 7, 9];
/// ChunkedLinearSearch::<0>::lower_bound(keys, &6, &Less);
/// ```
pub struct ChunkedLinearSearch<const N: usize>;

impl<const N: usize> KeySearch for ChunkedLinearSearch<N> {
    fn lower_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        const { assert!(N > 0, "chunk size must be non-zero") };

        let off = keys
            .chunks_exact(N)
            .take_while(|key_chunk| {
                let mut all_less = true;
                key_chunk
                    .iter()
                    .for_each(|key| all_less &= cmp.less(key.borrow(), k));
                all_less
            })
            .count()
            * N;

        off + LinearSearch::lower_bound(&keys[off..], k, cmp)
    }

    fn upper_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        const { assert!(N > 0, "chunk size must be non-zero") };

        let off = keys
            .chunks_exact(N)
            .take_while(|key_chunk| {
                let mut none_greater = true;
                key_chunk
                    .iter()
                    .for_each(|key| none_greater &= !cmp.less(k, key.borrow()));
                none_greater
            })
            .count()
            * N;

        off + LinearSearch::upper_bound(&keys[off..], k, cmp)
    }
}

/// Classic bisection over the sorted buffer.
pub struct BinarySearch;

impl KeySearch for BinarySearch {
    #[inline]
    fn lower_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        keys.partition_point(|key| cmp.less(key.borrow(), k))
    }

    #[inline]
    fn upper_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        keys.partition_point(|key| !cmp.less(k, key.borrow()))
    }
}

/// Linear scan for buffers shorter than `THRESHOLD`, binary search otherwise.
///
/// This is the default strategy of `FlatMap`.
pub struct Adaptive<const THRESHOLD: usize = LINEAR_SEARCH_THRESHOLD>;

impl<const THRESHOLD: usize> KeySearch for Adaptive<THRESHOLD> {
    #[inline]
    fn lower_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        if keys.len() < THRESHOLD {
            LinearSearch::lower_bound(keys, k, cmp)
        } else {
            BinarySearch::lower_bound(keys, k, cmp)
        }
    }

    #[inline]
    fn upper_bound<K, Q, C>(keys: &[K], k: &Q, cmp: &C) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        if keys.len() < THRESHOLD {
            LinearSearch::upper_bound(keys, k, cmp)
        } else {
            BinarySearch::upper_bound(keys, k, cmp)
        }
    }
}
