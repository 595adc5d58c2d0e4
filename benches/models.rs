use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn from_i(i: usize) -> Self {
        Point {
            x: i as f64,
            y: i as f64,
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}
impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
    }
}

/// A value wide enough that interleaving it with keys hurts key scans
#[derive(Default, Copy, Clone, Debug)]
pub struct Value {
    _data_0: [u8; 24],
    _data_1: [u8; 24],
}

/// Baseline: one sorted buffer of `(key, value)` records
#[derive(Clone)]
pub struct PairVec<K, V> {
    store: Vec<(K, V)>,
}

impl<K, V> Default for PairVec<K, V> {
    fn default() -> Self {
        Self { store: Vec::new() }
    }
}

impl<K: Ord, V> PairVec<K, V> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter().map(|kv| (&kv.0, &kv.1))
    }

    pub fn insert(&mut self, k: K, v: V) -> bool {
        match self.store.binary_search_by(|kv| kv.0.cmp(&k)) {
            Ok(_) => false,
            Err(idx) => {
                self.store.insert(idx, (k, v));
                true
            }
        }
    }

    pub fn remove(&mut self, k: &K) -> Option<V> {
        let idx = self.store.binary_search_by(|kv| kv.0.cmp(k)).ok()?;
        Some(self.store.remove(idx).1)
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        let idx = self.store.binary_search_by(|kv| kv.0.cmp(k)).ok()?;
        Some(&self.store[idx].1)
    }
}
