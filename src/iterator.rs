use std::{iter::FusedIterator, ptr, slice};

use crate::raw::RawBuf;

/// A borrowed iterator for FlatMap
/// Walks the key buffer and the value buffer side by side.
pub struct Iter<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::Iter<'a, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a [V]) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self {
            keys: keys.iter(),
            values: values.iter(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.keys.next()?, self.values.next()?))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        Some((self.keys.nth(n)?, self.values.nth(n)?))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.keys.next_back()?, self.values.next_back()?))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// A borrowed iterator with mutable values. Keys stay shared.
pub struct IterMut<'a, K, V> {
    keys: slice::Iter<'a, K>,
    values: slice::IterMut<'a, V>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [K], values: &'a mut [V]) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self {
            keys: keys.iter(),
            values: values.iter_mut(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.keys.next()?, self.values.next()?))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.keys.next_back()?, self.values.next_back()?))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Owning iterator, takes the two buffers out of the map
pub struct IntoIter<K, V> {
    keys: RawBuf<K>,
    values: RawBuf<V>,
    /// current iterator pos
    pos: usize,
    /// the end of the iterator
    end: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(keys: RawBuf<K>, values: RawBuf<V>, len: usize) -> Self {
        Self {
            keys,
            values,
            pos: 0,
            end: len,
        }
    }

    fn remaining(&self) -> usize {
        self.end - self.pos
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.end {
            return None;
        }

        let offset = self.pos;
        self.pos += 1;
        // safety: slots in [pos, end) are initialized and each is read exactly once
        unsafe {
            Some((
                ptr::read(self.keys.ptr().add(offset)),
                ptr::read(self.values.ptr().add(offset)),
            ))
        }
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos == self.end {
            return None;
        }

        self.end -= 1;
        let offset = self.end;
        // safety: same as `next`
        unsafe {
            Some((
                ptr::read(self.keys.ptr().add(offset)),
                ptr::read(self.values.ptr().add(offset)),
            ))
        }
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        // drop all the remaining items, the buffers free themselves
        let remaining = self.remaining();
        let pos = self.pos;
        self.pos = self.end;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.keys.ptr().add(pos),
                remaining,
            ));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.values.ptr().add(pos),
                remaining,
            ));
        }
    }
}
