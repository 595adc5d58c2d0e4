use std::{
    borrow::Borrow,
    cmp, fmt,
    marker::PhantomData,
    mem,
    ops::{Index, RangeBounds},
    ptr, slice,
};

use crate::{
    consts::{GROWTH_FACTOR, MIN_NON_ZERO_CAP},
    error::handle_reserve,
    raw::RawBuf,
    utils, Adaptive, Compare, Cursor, CursorMut, Error, IntoIter, Iter, IterMut, KeySearch, Less,
};

/// Sorted map backed by two parallel contiguous buffers, one for keys and one for values.
///
/// The key at index `i` always belongs to the value at index `i`. Keys are kept strictly
/// increasing under the comparator `C`, and every structural change is applied to both
/// buffers at the same offsets. Lookup is a boundary search over the key buffer using the
/// strategy `S`; insertion and removal shift the tail of both buffers, so they are O(n).
///
/// # Example
/// ```rust
/// use flat_ordered_map::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert(3, "c");
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// // a second insert of the same key does not overwrite
/// let (cursor, inserted) = map.insert(2, "z");
/// assert!(!inserted);
/// assert_eq!(cursor.get(), Some((&2, &"b")));
///
/// assert_eq!(map.keys(), &[1, 2, 3]);
/// assert_eq!(map.values(), &["a", "b", "c"]);
/// assert_eq!(map.erase(&2), 1);
/// assert_eq!(map.erase(&2), 0);
/// ```
///
/// # Example
/// Custom order
///
/// ```rust
/// use flat_ordered_map::{FlatMap, Reverse};
///
/// let mut map = FlatMap::<_, _, Reverse>::with_comparator(Reverse);
/// for i in 0..5 {
///     map.insert(i, i * 10);
/// }
/// assert_eq!(map.keys(), &[4, 3, 2, 1, 0]);
/// ```
pub struct FlatMap<K, V, C = Less, S = Adaptive> {
    keys: RawBuf<K>,
    values: RawBuf<V>,
    len: usize,
    comparator: C,
    _search: PhantomData<fn() -> S>,
}

impl<K, V> FlatMap<K, V> {
    /// Create an empty map ordered by `K: Ord`. Does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator(Less)
    }

    /// Create an empty map with room for `capacity` entries.
    ///
    /// # Panics
    /// if the buffers can't be allocated
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Less)
    }
}

impl<K, V, C, S> FlatMap<K, V, C, S> {
    /// Create an empty map ordered by `comparator`. Does not allocate.
    #[inline]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            keys: RawBuf::new(),
            values: RawBuf::new(),
            len: 0,
            comparator,
            _search: PhantomData,
        }
    }

    /// Create an empty map ordered by `comparator`, with room for `capacity` entries.
    ///
    /// # Panics
    /// if the buffers can't be allocated
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        let mut map = Self::with_comparator(comparator);
        handle_reserve(map.reallocate(capacity));
        map
    }

    /// Returns item count in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upper bound of the size type. This is not a promise that so many entries fit in memory.
    #[inline]
    pub const fn max_size(&self) -> usize {
        usize::MAX
    }

    /// Number of slots allocated in each of the two buffers
    #[inline]
    pub fn capacity(&self) -> usize {
        cmp::min(self.keys.capacity(), self.values.capacity())
    }

    /// The sorted key buffer
    #[inline]
    pub fn keys(&self) -> &[K] {
        // SAFETY: the first `len` slots are initialized
        unsafe { slice::from_raw_parts(self.keys.ptr(), self.len) }
    }

    /// The value buffer, `values()[i]` belongs to `keys()[i]`
    #[inline]
    pub fn values(&self) -> &[V] {
        // SAFETY: the first `len` slots are initialized
        unsafe { slice::from_raw_parts(self.values.ptr(), self.len) }
    }

    /// The value buffer, mutable. Keys stay read-only.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [V] {
        // SAFETY: the first `len` slots are initialized
        unsafe { slice::from_raw_parts_mut(self.values.ptr(), self.len) }
    }

    /// Both buffers at once, keys shared and values exclusive
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&[K], &mut [V]) {
        // SAFETY: the buffers are distinct allocations, both initialized up to `len`
        unsafe {
            (
                slice::from_raw_parts(self.keys.ptr(), self.len),
                slice::from_raw_parts_mut(self.values.ptr(), self.len),
            )
        }
    }

    /// Returns the entry at `index` in sort order
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys().get(index)?, &self.values()[index]))
    }

    /// Returns the entry at `index` in sort order, with the value mutable
    #[inline]
    pub fn get_at_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let (keys, values) = self.split_mut();
        Some((keys.get(index)?, &mut values[index]))
    }

    /// The entry with the smallest key
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.get_at(0)
    }

    /// The entry with the largest key
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.get_at(self.len.checked_sub(1)?)
    }

    /// Cursor at the first entry, equals `end()` for an empty map
    #[inline]
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.keys(), self.values(), 0)
    }

    /// Cursor one past the last entry
    #[inline]
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.keys(), self.values(), self.len)
    }

    /// Mutable cursor at the first entry
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C, S> {
        CursorMut::new(self, 0)
    }

    /// Mutable cursor one past the last entry
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, C, S> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// Cursor at `index`, `index == len()` gives the end cursor
    pub fn cursor_at(&self, index: usize) -> Option<Cursor<'_, K, V>> {
        (index <= self.len).then(|| Cursor::new(self.keys(), self.values(), index))
    }

    /// Mutable cursor at `index`, `index == len()` gives the end cursor
    pub fn cursor_at_mut(&mut self, index: usize) -> Option<CursorMut<'_, K, V, C, S>> {
        if index <= self.len {
            Some(CursorMut::new(self, index))
        } else {
            None
        }
    }

    /// Returns an iterator over the map, in key order.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = FlatMap::<i32, i32>::new();
    /// map.insert(2, 3);
    /// map.insert(1, 2);
    ///
    /// let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// assert_eq!(kvs, vec![(1, 2), (2, 3)]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.keys(), self.values())
    }

    /// Returns an iterator with mutable values, in key order
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let (keys, values) = self.split_mut();
        IterMut::new(keys, values)
    }

    /// Returns a copy of the comparator
    #[inline]
    pub fn key_comp(&self) -> C
    where
        C: Clone,
    {
        self.comparator.clone()
    }

    /// Returns the comparator by reference
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Exchange the buffers, sizes, capacities and comparators of two maps. No entry is
    /// moved or copied.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut a = FlatMap::from([(1, 'a')]);
    /// let mut b = FlatMap::from([(2, 'b'), (3, 'c')]);
    /// let a_keys = a.keys().as_ptr();
    ///
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 2);
    /// assert_eq!(b.get(&1), Some(&'a'));
    /// assert_eq!(b.keys().as_ptr(), a_keys);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.keys, &mut other.keys);
        mem::swap(&mut self.values, &mut other.values);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.comparator, &mut other.comparator);
    }

    /// Make sure `additional` more entries fit without reallocating.
    ///
    /// # Panics
    /// if the new capacity overflows or the buffers can't be allocated
    pub fn reserve(&mut self, additional: usize) {
        handle_reserve(self.try_reserve(additional));
    }

    /// Fallible version of `reserve`. On error the map is left unchanged.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::{Error, FlatMap};
    ///
    /// let mut map = FlatMap::<u64, u64>::new();
    /// map.try_reserve(10).unwrap();
    /// assert!(map.capacity() >= 10);
    ///
    /// assert_eq!(map.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        let cap = self.capacity();
        if required <= cap {
            return Ok(());
        }

        let new_cap = cmp::max(cap.saturating_mul(GROWTH_FACTOR), required);
        let new_cap = cmp::max(new_cap, MIN_NON_ZERO_CAP);
        self.reallocate(new_cap)
    }

    /// Release unused slots of both buffers
    ///
    /// # Panics
    /// if the smaller buffers can't be allocated
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len {
            handle_reserve(self.reallocate(self.len));
        }
    }

    /// Move both buffers into fresh allocations of `new_cap` slots.
    ///
    /// Both allocations are made before anything is copied, so a failure leaves the map
    /// as it was.
    fn reallocate(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.len);

        let keys = RawBuf::<K>::allocate(new_cap)?;
        let values = RawBuf::<V>::allocate(new_cap)?;

        #[cfg(feature = "log")]
        log::trace!(
            "flat map reallocates from {} to {} slots, {} live entries",
            self.capacity(),
            new_cap,
            self.len
        );

        // SAFETY: new buffers hold at least `len` slots and don't overlap the old ones.
        // The old buffers only free memory on drop, their items now live in the new ones.
        unsafe {
            ptr::copy_nonoverlapping(self.keys.ptr(), keys.ptr(), self.len);
            ptr::copy_nonoverlapping(self.values.ptr(), values.ptr(), self.len);
        }
        self.keys = keys;
        self.values = values;

        Ok(())
    }

    /// Remove and return the entry at `index`, closing the gap in both buffers.
    /// Returns None if `index` is out of range.
    pub fn erase_at(&mut self, index: usize) -> Option<(K, V)> {
        if index >= self.len {
            return None;
        }

        let len = self.len;
        self.len -= 1;
        // SAFETY: index < len, both buffers hold `len` initialized items
        unsafe {
            let k = utils::slice_remove(self.keys.ptr(), len, index);
            let v = utils::slice_remove(self.values.ptr(), len, index);
            Some((k, v))
        }
    }

    /// Remove every entry whose index is in `range`, returns how many were removed.
    ///
    /// # Panics
    /// if the range is decreasing or goes beyond `len()`
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = (0..10).map(|i| (i, i)).collect::<FlatMap<_, _>>();
    /// let from = map.lower_bound(&3).index();
    /// let to = map.lower_bound(&7).index();
    ///
    /// assert_eq!(map.erase_range(from..to), 4);
    /// assert_eq!(map.keys(), &[0, 1, 2, 7, 8, 9]);
    /// ```
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let range = utils::resolve_range(range, self.len);
        let removed = range.len();
        if removed == 0 {
            return 0;
        }

        let len = self.len;
        self.len = range.start;
        // SAFETY: range checked against len, and len is already lowered to range.start
        unsafe {
            utils::slice_remove_range(self.keys.ptr(), len, range.clone());
            utils::slice_remove_range(self.values.ptr(), len, range);
        }
        self.len = len - removed;

        removed
    }

    /// Drop every entry, keeping the allocated buffers
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `len` initialized items, map length already reset
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.keys.ptr(), len));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.values.ptr(), len));
        }
    }

    /// Append an entry that sorts after every key already present.
    ///
    /// # Safety
    /// `len() < capacity()`
    unsafe fn push_unchecked(&mut self, k: K, v: V) {
        debug_assert!(self.len < self.capacity());
        unsafe {
            ptr::write(self.keys.ptr().add(self.len), k);
            ptr::write(self.values.ptr().add(self.len), v);
        }
        self.len += 1;
    }

    /// Take both buffers out, leaving an empty map behind
    pub(crate) fn take_buffers(&mut self) -> (RawBuf<K>, RawBuf<V>, usize) {
        (
            mem::replace(&mut self.keys, RawBuf::new()),
            mem::replace(&mut self.values, RawBuf::new()),
            mem::replace(&mut self.len, 0),
        )
    }
}

impl<K, V, C: Compare<K>, S: KeySearch> FlatMap<K, V, C, S> {
    /// Build a map in one pass from unsorted data, sorting once instead of shifting per item.
    /// For duplicated keys the first occurrence wins, like repeated `insert`.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::{FlatMap, Less};
    ///
    /// let map = FlatMap::<_, _>::bulk_load(vec![(3, 'c'), (1, 'a'), (3, 'x'), (2, 'b')], Less);
    /// assert_eq!(map.keys(), &[1, 2, 3]);
    /// assert_eq!(map.values(), &['a', 'b', 'c']);
    /// ```
    pub fn bulk_load(mut data: Vec<(K, V)>, comparator: C) -> Self {
        // stable, so the first of equivalent keys stays in front
        data.sort_by(|a, b| comparator.ordering(&a.0, &b.0));
        data.dedup_by(|later, earlier| comparator.equivalent(&later.0, &earlier.0));

        let mut map = Self::with_capacity_and_comparator(data.len(), comparator);
        for (k, v) in data {
            // SAFETY: capacity reserved for every item, and the data is sorted and unique
            unsafe { map.push_unchecked(k, v) };
        }
        map
    }

    #[inline]
    fn lower_index<Q>(&self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        S::lower_bound(self.keys(), k, &self.comparator)
    }

    #[inline]
    fn upper_index<Q>(&self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        S::upper_bound(self.keys(), k, &self.comparator)
    }

    /// Index of the entry equivalent to `k`
    #[inline]
    fn find_index<Q>(&self, k: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.lower_index(k);
        self.is_equivalent_at(idx, k).then_some(idx)
    }

    /// True if the entry at `idx`, a lower bound of `k`, is equivalent to `k`
    #[inline]
    fn is_equivalent_at<Q>(&self, idx: usize, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.keys().get(idx) {
            Some(found) => !self.comparator.less(k, found.borrow()),
            None => false,
        }
    }

    /// Cursor at the first entry whose key is not less than `k`, or `end()`.
    ///
    /// The query may be any borrowed form of the key type, ordered the same way by the
    /// comparator.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let map = FlatMap::from([(1, ()), (3, ()), (5, ()), (7, ())]);
    /// assert_eq!(map.lower_bound(&4).key(), Some(&5));
    /// assert_eq!(map.lower_bound(&1).key(), Some(&1));
    /// assert!(map.lower_bound(&8).is_end());
    ///
    /// let names = FlatMap::from([("b".to_string(), 2), ("d".to_string(), 4)]);
    /// assert_eq!(names.lower_bound("c").value(), Some(&4));
    /// ```
    #[inline]
    pub fn lower_bound<Q>(&self, k: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        Cursor::new(self.keys(), self.values(), self.lower_index(k))
    }

    /// Mutable cursor at the first entry whose key is not less than `k`.
    #[inline]
    pub fn lower_bound_mut<Q>(&mut self, k: &Q) -> CursorMut<'_, K, V, C, S>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.lower_index(k);
        CursorMut::new(self, idx)
    }

    /// Cursor at the first entry whose key is greater than `k`, or `end()`.
    #[inline]
    pub fn upper_bound<Q>(&self, k: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        Cursor::new(self.keys(), self.values(), self.upper_index(k))
    }

    /// Mutable cursor at the first entry whose key is greater than `k`.
    #[inline]
    pub fn upper_bound_mut<Q>(&mut self, k: &Q) -> CursorMut<'_, K, V, C, S>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.upper_index(k);
        CursorMut::new(self, idx)
    }

    /// `(lower_bound(k), upper_bound(k))`, the two cursors are at most one entry apart
    pub fn equal_range<Q>(&self, k: &Q) -> (Cursor<'_, K, V>, Cursor<'_, K, V>)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.lower_index(k);
        let lower = Cursor::new(self.keys(), self.values(), idx);
        if self.is_equivalent_at(idx, k) {
            (lower, lower + 1)
        } else {
            (lower, lower)
        }
    }

    /// Cursor at the entry equivalent to `k`, or `end()`
    #[inline]
    pub fn find<Q>(&self, k: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k).unwrap_or(self.len);
        Cursor::new(self.keys(), self.values(), idx)
    }

    /// Mutable cursor at the entry equivalent to `k`, or the end cursor
    #[inline]
    pub fn find_mut<Q>(&mut self, k: &Q) -> CursorMut<'_, K, V, C, S>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k).unwrap_or(self.len);
        CursorMut::new(self, idx)
    }

    /// Returns true if an entry equivalent to `k` is present
    #[inline]
    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.find_index(k).is_some()
    }

    /// Number of entries equivalent to `k`, 0 or 1
    #[inline]
    pub fn count<Q>(&self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.contains(k) as usize
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = FlatMap::<i32, i32>::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.get(&1).unwrap(), &2);
    /// assert!(map.get(&2).is_none());
    /// ```
    #[inline]
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k)?;
        Some(&self.values()[idx])
    }

    /// Returns a mut reference to the value corresponding to the key.
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = FlatMap::<i32, i32>::new();
    /// map.insert(1, 2);
    /// *map.get_mut(&1).unwrap() += 1;
    /// assert_eq!(map.get(&1).unwrap(), &3);
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k)?;
        Some(&mut self.values_mut()[idx])
    }

    /// Returns the stored key and its value
    #[inline]
    pub fn get_key_value<Q>(&self, k: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k)?;
        self.get_at(idx)
    }

    /// Insert `(k, v)` at its sorted position.
    ///
    /// If an equivalent key is already present nothing changes and the returned flag is
    /// false; the existing value is not overwritten. The cursor points at the entry for `k`
    /// either way.
    ///
    /// # Panics
    /// if the buffers have to grow and can't be allocated
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = FlatMap::<i32, &str>::new();
    /// assert!(map.insert(1, "a").1);
    ///
    /// let (mut cursor, inserted) = map.insert(1, "b");
    /// assert!(!inserted);
    /// *cursor.value_mut().unwrap() = "c";
    /// assert_eq!(map.get(&1), Some(&"c"));
    /// ```
    pub fn insert(&mut self, k: K, v: V) -> (CursorMut<'_, K, V, C, S>, bool) {
        let idx = self.lower_index(&k);
        if self.is_equivalent_at(idx, &k) {
            return (CursorMut::new(self, idx), false);
        }

        if self.len == self.capacity() {
            handle_reserve(self.try_reserve(1));
        }
        // SAFETY: there's room for one more
        unsafe { self.insert_at(idx, k, v) };
        (CursorMut::new(self, idx), true)
    }

    /// Fallible version of `insert`. If growing fails the map is left unchanged and `(k, v)`
    /// is dropped.
    pub fn try_insert(&mut self, k: K, v: V) -> Result<(CursorMut<'_, K, V, C, S>, bool), Error> {
        let idx = self.lower_index(&k);
        if self.is_equivalent_at(idx, &k) {
            return Ok((CursorMut::new(self, idx), false));
        }

        if self.len == self.capacity() {
            self.try_reserve(1)?;
        }
        // SAFETY: there's room for one more
        unsafe { self.insert_at(idx, k, v) };
        Ok((CursorMut::new(self, idx), true))
    }

    /// Shift `[idx, len)` of both buffers right by one and write `(k, v)` into the gap.
    ///
    /// # Safety
    /// `idx <= len < capacity`
    unsafe fn insert_at(&mut self, idx: usize, k: K, v: V) {
        debug_assert!(self.len < self.capacity());
        unsafe {
            utils::slice_insert(self.keys.ptr(), self.len, idx, k);
            utils::slice_insert(self.values.ptr(), self.len, idx, v);
        }
        self.len += 1;
    }

    /// Remove the entry equivalent to `k`, returns how many entries were removed (0 or 1).
    ///
    /// # Examples
    /// ```rust
    /// use flat_ordered_map::FlatMap;
    ///
    /// let mut map = FlatMap::<i32, i32>::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.erase(&1), 1);
    /// assert_eq!(map.erase(&1), 0);
    /// assert!(map.is_empty());
    /// ```
    pub fn erase<Q>(&mut self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.remove_entry(k).is_some() as usize
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the map.
    #[inline]
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.remove_entry(k).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value
    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let idx = self.find_index(k)?;
        self.erase_at(idx)
    }

    /// Keep only the entries for which `f` returns true, in one compacting pass
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let len = self.len;
        // a panic in `f` leaks the unvisited tail
        self.len = 0;

        let keys = self.keys.ptr();
        let values = self.values.ptr();
        let mut kept = 0;
        for idx in 0..len {
            // SAFETY: idx < len, every slot in [idx, len) is still initialized and unread,
            // [0, kept) was compacted from earlier slots
            unsafe {
                if f(&*keys.add(idx), &mut *values.add(idx)) {
                    if kept != idx {
                        ptr::copy_nonoverlapping(keys.add(idx), keys.add(kept), 1);
                        ptr::copy_nonoverlapping(values.add(idx), values.add(kept), 1);
                    }
                    kept += 1;
                    self.len = kept;
                } else {
                    ptr::drop_in_place(keys.add(idx));
                    ptr::drop_in_place(values.add(idx));
                }
            }
        }
        self.len = kept;
    }
}

impl<K, V, C, S> Drop for FlatMap<K, V, C, S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, C: Default, S> Default for FlatMap<K, V, C, S> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone, S> Clone for FlatMap<K, V, C, S> {
    fn clone(&self) -> Self {
        let mut map = Self::with_capacity_and_comparator(self.len, self.comparator.clone());
        for (k, v) in self.iter() {
            // SAFETY: capacity reserved for all entries, and they are copied in order
            unsafe { map.push_unchecked(k.clone(), v.clone()) };
        }
        map
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, S> fmt::Debug for FlatMap<K, V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C, S> PartialEq for FlatMap<K, V, C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.keys() == other.keys() && self.values() == other.values()
    }
}

impl<K: Eq, V: Eq, C, S> Eq for FlatMap<K, V, C, S> {}

impl<K, V, C, S, Q> Index<&Q> for FlatMap<K, V, C, S>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<K> + Compare<Q>,
    S: KeySearch,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("key should be present in the map")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for FlatMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        Self::bulk_load(Vec::from(arr), Less)
    }
}

impl<K, V, C: Compare<K>, S: KeySearch> Extend<(K, V)> for FlatMap<K, V, C, S> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, C: Compare<K> + Default, S: KeySearch> FromIterator<(K, V)> for FlatMap<K, V, C, S> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::bulk_load(iter.into_iter().collect(), C::default())
    }
}

impl<K, V, C, S> IntoIterator for FlatMap<K, V, C, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let (keys, values, len) = self.take_buffers();
        IntoIter::new(keys, values, len)
    }
}

impl<'a, K, V, C, S> IntoIterator for &'a FlatMap<K, V, C, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C, S> IntoIterator for &'a mut FlatMap<K, V, C, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// ensure FlatMap is send and sync for send and sync parts
fn _ensure_send_sync<K: Send + Sync, V: Send + Sync>() {
    fn _assert_send_sync<T: Send + Sync>() {}
    _assert_send_sync::<FlatMap<K, V>>();
}
