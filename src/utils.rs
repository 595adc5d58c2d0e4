use std::ops::{Bound, Range, RangeBounds};
use std::ptr;

/// Inserts a value into a buffer of `len` initialized elements followed by at least one
/// uninitialized slot, shifting `[idx, len)` one slot to the right as a block copy.
///
/// # Safety
/// `base` is valid for `len + 1` slots, the first `len` are initialized, and `idx <= len`.
#[inline]
pub(crate) unsafe fn slice_insert<T>(base: *mut T, len: usize, idx: usize, val: T) {
    unsafe {
        debug_assert!(idx <= len);
        let p = base.add(idx);
        if idx < len {
            ptr::copy(p, p.add(1), len - idx);
        }
        ptr::write(p, val);
    }
}

/// Removes and returns the element at `idx` of a buffer of `len` initialized elements,
/// shifting `(idx, len)` one slot to the left. The last slot is left uninitialized.
///
/// # Safety
/// The first `len` slots of `base` are initialized and `idx < len`.
#[inline]
pub(crate) unsafe fn slice_remove<T>(base: *mut T, len: usize, idx: usize) -> T {
    unsafe {
        debug_assert!(idx < len);
        let p = base.add(idx);
        let ret = ptr::read(p);
        ptr::copy(p.add(1), p, len - idx - 1);
        ret
    }
}

/// Drops the elements in `range` and closes the gap by moving the tail `[range.end, len)`
/// down to `range.start`.
///
/// # Safety
/// The first `len` slots of `base` are initialized and `range.start <= range.end <= len`.
/// The caller must have already shrunk its recorded length to at most `range.start`, so a
/// panicking destructor leaks the tail instead of dropping it twice.
pub(crate) unsafe fn slice_remove_range<T>(base: *mut T, len: usize, range: Range<usize>) {
    unsafe {
        debug_assert!(range.start <= range.end && range.end <= len);
        let start = base.add(range.start);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, range.len()));
        ptr::copy(base.add(range.end), start, len - range.end);
    }
}

/// Resolve `range` against a sequence of `len` elements.
///
/// # Panics
/// if the range is decreasing or goes beyond `len`, like slice indexing does
pub(crate) fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).expect("range start overflows usize"),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).expect("range end overflows usize"),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    assert!(start <= end, "range start {start} is greater than end {end}");
    assert!(end <= len, "range end {end} is out of bounds for length {len}");
    start..end
}

#[cfg(test)]
mod tests {
    use std::mem::MaybeUninit;

    use super::*;

    #[test]
    fn test_slice_insert_and_remove() {
        let mut buf = [MaybeUninit::<u32>::uninit(); 5];
        let base = buf.as_mut_ptr().cast::<u32>();

        unsafe {
            slice_insert(base, 0, 0, 3);
            slice_insert(base, 1, 0, 1);
            slice_insert(base, 2, 1, 2);
            slice_insert(base, 3, 3, 4);

            let items = std::slice::from_raw_parts(base, 4);
            assert_eq!(items, &[1, 2, 3, 4]);

            assert_eq!(slice_remove(base, 4, 1), 2);
            let items = std::slice::from_raw_parts(base, 3);
            assert_eq!(items, &[1, 3, 4]);

            assert_eq!(slice_remove(base, 3, 2), 4);
            let items = std::slice::from_raw_parts(base, 2);
            assert_eq!(items, &[1, 3]);
        }
    }

    #[test]
    fn test_slice_remove_range() {
        // SAFETY: An uninitialized `[MaybeUninit<_>; LEN]` is valid.
        let mut buf = unsafe { MaybeUninit::<[MaybeUninit<String>; 4]>::uninit().assume_init() };
        let base = buf.as_mut_ptr().cast::<String>();

        unsafe {
            for (i, s) in ["a", "b", "c", "d"].into_iter().enumerate() {
                slice_insert(base, i, i, s.to_string());
            }

            slice_remove_range(base, 4, 1..3);
            let items = std::slice::from_raw_parts_mut(base, 2);
            assert_eq!(items, &["a".to_string(), "d".to_string()]);

            ptr::drop_in_place(items as *mut [String]);
        }
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range(.., 5), 0..5);
        assert_eq!(resolve_range(1..=2, 5), 1..3);
        assert_eq!(resolve_range(3.., 5), 3..5);
        assert_eq!(resolve_range(..0, 5), 0..0);
    }

    #[test]
    #[should_panic]
    fn test_resolve_range_out_of_bounds() {
        resolve_range(2..6, 5);
    }
}
