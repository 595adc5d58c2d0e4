use std::alloc::{handle_alloc_error, Layout};

/// Failure to grow the key and value buffers.
///
/// A map that returned this error still holds exactly the entries it held before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested slot count, or its size in bytes, does not fit in `isize`.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator refused to hand out a buffer of this layout.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed { layout: Layout },
}

/// Turn a failed growth into the same panic/abort `Vec` would raise
pub(crate) fn handle_reserve(result: Result<(), Error>) {
    match result {
        Ok(()) => {}
        Err(Error::CapacityOverflow) => capacity_overflow(),
        Err(Error::AllocFailed { layout }) => handle_alloc_error(layout),
    }
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
