/// Below this many live entries, `Adaptive` search scans the key buffer front to back; at or
/// above it, it switches to binary search.
/// Re-measure with `cargo bench --bench searcher` when the key type is large or expensive to compare.
pub const LINEAR_SEARCH_THRESHOLD: usize = 16;

/// Smallest slot count the buffers grow to on their first allocation.
pub(crate) const MIN_NON_ZERO_CAP: usize = 4;

/// Growth factor applied to the current capacity when the buffers are full.
pub(crate) const GROWTH_FACTOR: usize = 2;
