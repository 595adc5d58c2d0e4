use std::{
    alloc::{alloc, dealloc, Layout},
    marker::PhantomData,
    mem,
    ptr::NonNull,
};

use crate::Error;

/// An owned, uninitialized slot buffer. It frees its memory on drop but never touches the
/// slots, the owner is responsible for dropping whatever it has written.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawBuf owns its slots exclusively, like a `Box<[T]>`.
unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a buffer with room for exactly `cap` items.
    /// Zero sized types and `cap == 0` never touch the allocator.
    pub fn allocate(cap: usize) -> Result<Self, Error> {
        if Self::IS_ZST || cap == 0 {
            return Ok(Self::new());
        }

        let layout = Layout::array::<T>(cap).map_err(|_| Error::CapacityOverflow)?;
        // SAFETY: layout has non zero size, checked above
        let ptr = unsafe { alloc(layout) }.cast::<T>();

        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self {
                ptr,
                cap,
                _marker: PhantomData,
            }),
            None => Err(Error::AllocFailed { layout }),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            self.cap
        }
    }

    #[inline]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if Self::IS_ZST || self.cap == 0 {
            return;
        }

        // SAFETY: the same layout succeeded in `allocate`
        unsafe {
            let layout = Layout::array::<T>(self.cap).unwrap_unchecked();
            dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate() {
        let buf = RawBuf::<u64>::allocate(8).unwrap();
        assert_eq!(buf.capacity(), 8);

        let empty = RawBuf::<u64>::allocate(0).unwrap();
        assert_eq!(empty.capacity(), 0);

        let zst = RawBuf::<()>::allocate(8).unwrap();
        assert_eq!(zst.capacity(), usize::MAX);
    }

    #[test]
    fn test_allocate_overflow() {
        assert_eq!(
            RawBuf::<u64>::allocate(usize::MAX).err(),
            Some(Error::CapacityOverflow)
        );
    }
}
