use std::cmp::Ordering;

/// Strict weak order over keys.
///
/// Implementations must be irreflexive, asymmetric and transitive, and must not change
/// behavior while a map holds keys ordered by them. Two keys are equivalent when neither
/// is less than the other.
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`
    fn less(&self, a: &K, b: &K) -> bool;

    /// Two-sided equivalence test derived from `less`
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Three-way comparison derived from `less`
    #[inline]
    fn ordering(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The natural `Ord` order of the key, ascending.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Less;

impl<K: Ord + ?Sized> Compare<K> for Less {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// The natural `Ord` order of the key, descending.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

/// Any `Fn(&K, &K) -> bool` closure acts as a "less than" predicate.
impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_less_and_reverse() {
        assert!(Less.less(&1, &2));
        assert!(!Less.less(&2, &2));
        assert!(Reverse.less(&2, &1));
        assert!(!Reverse.less(&1, &2));
    }

    #[test]
    fn test_equivalent_is_two_sided() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.equivalent(&"abc", &"xyz"));
        assert!(!by_len.equivalent(&"ab", &"xyz"));
        assert_eq!(by_len.ordering(&"ab", &"xyz"), Ordering::Less);
        assert_eq!(by_len.ordering(&"abcd", &"xyz"), Ordering::Greater);
        assert_eq!(by_len.ordering(&"abc", &"xyz"), Ordering::Equal);
    }
}
