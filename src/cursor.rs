use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

use crate::{Adaptive, FlatMap, Iter, Less};

/// A position in the sorted sequence of a borrowed map.
///
/// The cursor is one offset shared by the key buffer and the value buffer, so stepping
/// moves both in lockstep. Dereferencing builds a `(&K, &V)` pair on demand; no combined
/// record is stored anywhere. Because the cursor borrows the map, the map can't be mutated
/// while the cursor is alive.
///
/// Positions range over `[begin, end]`, where `end` is one past the last entry. Moving
/// outside that range panics.
///
/// # Example
/// ```rust
/// use flat_ordered_map::FlatMap;
///
/// let map = FlatMap::from([(1, 'a'), (3, 'b'), (5, 'c'), (7, 'd')]);
///
/// let mut cursor = map.lower_bound(&4);
/// assert_eq!(cursor.get(), Some((&5, &'c')));
///
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&3));
///
/// let last = cursor + 2;
/// assert_eq!(last.value(), Some(&'d'));
/// assert_eq!(last - cursor, 2);
/// assert!(cursor < last);
/// assert_eq!(last + 1, map.end());
/// ```
pub struct Cursor<'a, K, V> {
    keys: &'a [K],
    values: &'a [V],
    index: usize,
}

impl<'a, K, V> Clone for Cursor<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Cursor<'a, K, V> {}

impl<'a, K, V> Cursor<'a, K, V> {
    #[inline]
    pub(crate) fn new(keys: &'a [K], values: &'a [V], index: usize) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        debug_assert!(index <= keys.len());
        Self {
            keys,
            values,
            index,
        }
    }

    /// Offset of the cursor from `begin`
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_begin(&self) -> bool {
        self.index == 0
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.keys.len()
    }

    /// The entry under the cursor, None at `end`
    #[inline]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        Some((self.keys.get(self.index)?, &self.values[self.index]))
    }

    #[inline]
    pub fn key(&self) -> Option<&'a K> {
        self.keys.get(self.index)
    }

    #[inline]
    pub fn value(&self) -> Option<&'a V> {
        self.values.get(self.index)
    }

    /// Step forward by one entry
    ///
    /// # Panics
    /// if the cursor is at `end`
    #[inline]
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Step back by one entry
    ///
    /// # Panics
    /// if the cursor is at `begin`
    #[inline]
    pub fn move_prev(&mut self) {
        *self -= 1;
    }

    /// Cursor `n` entries away, or None if that leaves `[begin, end]`
    #[inline]
    pub fn checked_offset(self, n: isize) -> Option<Self> {
        let index = self.index.checked_add_signed(n)?;
        (index <= self.keys.len()).then_some(Self { index, ..self })
    }

    /// Cursor `n` entries away
    ///
    /// # Panics
    /// if that leaves `[begin, end]`
    #[inline]
    pub fn offset(self, n: isize) -> Self {
        match self.checked_offset(n) {
            Some(c) => c,
            None => panic!(
                "cursor offset {n} from {} is out of bounds for length {}",
                self.index,
                self.keys.len()
            ),
        }
    }

    /// Iterate from the cursor to `end`
    #[inline]
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(&self.keys[self.index..], &self.values[self.index..])
    }

    /// Iterate from the cursor up to, not including, `end`
    ///
    /// # Panics
    /// if `end` belongs to another map or is before this cursor
    pub fn iter_to(&self, end: Cursor<'a, K, V>) -> Iter<'a, K, V> {
        assert!(self.same_buffer(&end), "cursors belong to different maps");
        assert!(self.index <= end.index, "end cursor is before start cursor");
        Iter::new(
            &self.keys[self.index..end.index],
            &self.values[self.index..end.index],
        )
    }

    #[inline]
    fn same_buffer(&self, other: &Self) -> bool {
        ptr::eq(self.keys, other.keys)
    }
}

impl<'a, K, V> Add<isize> for Cursor<'a, K, V> {
    type Output = Self;

    #[inline]
    fn add(self, n: isize) -> Self {
        self.offset(n)
    }
}

impl<'a, K, V> Sub<isize> for Cursor<'a, K, V> {
    type Output = Self;

    #[inline]
    fn sub(self, n: isize) -> Self {
        self.offset(n.checked_neg().expect("cursor offset overflows isize"))
    }
}

impl<'a, K, V> AddAssign<isize> for Cursor<'a, K, V> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        *self = *self + n;
    }
}

impl<'a, K, V> SubAssign<isize> for Cursor<'a, K, V> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        *self = *self - n;
    }
}

/// Distance in entries between two cursors of the same map
impl<'a, K, V> Sub for Cursor<'a, K, V> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_buffer(&other));
        self.index as isize - other.index as isize
    }
}

/// Cursors are equal when they are at the same position of the same map.
///
/// Maps are told apart by the address of their key buffer. Maps that have never allocated
/// (empty, or with zero-sized keys) share a dangling address, so their cursors can compare
/// equal across maps:
///
/// ```rust
/// use flat_ordered_map::FlatMap;
///
/// let a = FlatMap::<u32, u32>::new();
/// let b = FlatMap::<u32, u32>::new();
/// assert!(a.begin() == b.end());
/// ```
impl<'a, K, V> PartialEq for Cursor<'a, K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) && self.index == other.index
    }
}

impl<'a, K, V> Eq for Cursor<'a, K, V> {}

/// Cursors of different maps are not ordered
impl<'a, K, V> PartialOrd for Cursor<'a, K, V> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_buffer(other).then(|| self.index.cmp(&other.index))
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("entry", &self.get())
            .finish()
    }
}

/// A position in the sorted sequence of an exclusively borrowed map.
///
/// Gives mutable access to the value under it and can remove the entry under it. Keys are
/// only ever handed out by shared reference, so the sort order can't be broken through a
/// cursor.
///
/// # Example
/// ```rust
/// use flat_ordered_map::FlatMap;
///
/// let mut map = FlatMap::from([(1, 10), (2, 20), (3, 30)]);
///
/// let mut cursor = map.begin_mut();
/// while let Some((k, v)) = cursor.get_mut() {
///     *v += *k;
///     cursor.move_next();
/// }
/// assert_eq!(map.values(), &[11, 22, 33]);
///
/// let mut cursor = map.find_mut(&2);
/// assert_eq!(cursor.remove_current(), Some((2, 22)));
/// assert_eq!(cursor.key(), Some(&3));
/// assert_eq!(map.keys(), &[1, 3]);
/// ```
pub struct CursorMut<'a, K, V, C = Less, S = Adaptive> {
    map: &'a mut FlatMap<K, V, C, S>,
    index: usize,
}

impl<'a, K, V, C, S> CursorMut<'a, K, V, C, S> {
    #[inline]
    pub(crate) fn new(map: &'a mut FlatMap<K, V, C, S>, index: usize) -> Self {
        debug_assert!(index <= map.len());
        Self { map, index }
    }

    /// Offset of the cursor from `begin`
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_begin(&self) -> bool {
        self.index == 0
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.map.len()
    }

    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.map.keys().get(self.index)
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.map.values().get(self.index)
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.map.values_mut().get_mut(self.index)
    }

    /// The entry under the cursor, None at `end`
    #[inline]
    pub fn get(&self) -> Option<(&K, &V)> {
        self.map.get_at(self.index)
    }

    /// The entry under the cursor with its value mutable, None at `end`
    #[inline]
    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        self.map.get_at_mut(self.index)
    }

    /// Consume the cursor, keeping the borrow of the entry for the map's lifetime
    #[inline]
    pub fn into_mut(self) -> Option<(&'a K, &'a mut V)> {
        let Self { map, index } = self;
        map.get_at_mut(index)
    }

    /// Step forward by one entry
    ///
    /// # Panics
    /// if the cursor is at `end`
    #[inline]
    pub fn move_next(&mut self) {
        self.move_by(1);
    }

    /// Step back by one entry
    ///
    /// # Panics
    /// if the cursor is at `begin`
    #[inline]
    pub fn move_prev(&mut self) {
        self.move_by(-1);
    }

    /// Move `n` entries away
    ///
    /// # Panics
    /// if that leaves `[begin, end]`
    pub fn move_by(&mut self, n: isize) {
        let len = self.map.len();
        match self.index.checked_add_signed(n) {
            Some(index) if index <= len => self.index = index,
            _ => panic!(
                "cursor offset {n} from {} is out of bounds for length {len}",
                self.index
            ),
        }
    }

    /// A shared cursor at the same position
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.map.keys(), self.map.values(), self.index)
    }

    /// Remove the entry under the cursor. The cursor stays at the same index, which now
    /// holds the following entry. Returns None at `end`.
    #[inline]
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        self.map.erase_at(self.index)
    }
}

impl<'a, K: fmt::Debug, V: fmt::Debug, C, S> fmt::Debug for CursorMut<'a, K, V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("entry", &self.get())
            .finish()
    }
}
