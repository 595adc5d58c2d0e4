mod models;
use models::*;

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flat_ordered_map::{BinarySearch, FlatMap, Less, LinearSearch};
use rand::seq::SliceRandom;

const COUNTS: [usize; 2] = [1000, 10000];

/// The operations every contender is measured on
trait BenchMap: Default + Clone {
    const NAME: &'static str;

    fn insert(&mut self, k: Point, v: Value);
    fn remove(&mut self, k: &Point) -> Option<Value>;
    fn get(&self, k: &Point) -> Option<&Value>;
    fn walk(&self) -> usize;
}

impl BenchMap for FlatMap<Point, Value> {
    const NAME: &'static str = "flat_map";

    fn insert(&mut self, k: Point, v: Value) {
        FlatMap::insert(self, k, v);
    }

    fn remove(&mut self, k: &Point) -> Option<Value> {
        FlatMap::remove(self, k)
    }

    fn get(&self, k: &Point) -> Option<&Value> {
        FlatMap::get(self, k)
    }

    fn walk(&self) -> usize {
        self.iter().count()
    }
}

impl BenchMap for FlatMap<Point, Value, Less, BinarySearch> {
    const NAME: &'static str = "flat_map_binary";

    fn insert(&mut self, k: Point, v: Value) {
        FlatMap::insert(self, k, v);
    }

    fn remove(&mut self, k: &Point) -> Option<Value> {
        FlatMap::remove(self, k)
    }

    fn get(&self, k: &Point) -> Option<&Value> {
        FlatMap::get(self, k)
    }

    fn walk(&self) -> usize {
        self.iter().count()
    }
}

impl BenchMap for BTreeMap<Point, Value> {
    const NAME: &'static str = "btree";

    fn insert(&mut self, k: Point, v: Value) {
        BTreeMap::insert(self, k, v);
    }

    fn remove(&mut self, k: &Point) -> Option<Value> {
        BTreeMap::remove(self, k)
    }

    fn get(&self, k: &Point) -> Option<&Value> {
        BTreeMap::get(self, k)
    }

    fn walk(&self) -> usize {
        self.iter().count()
    }
}

impl BenchMap for PairVec<Point, Value> {
    const NAME: &'static str = "pair_vec";

    fn insert(&mut self, k: Point, v: Value) {
        PairVec::insert(self, k, v);
    }

    fn remove(&mut self, k: &Point) -> Option<Value> {
        PairVec::remove(self, k)
    }

    fn get(&self, k: &Point) -> Option<&Value> {
        PairVec::get(self, k)
    }

    fn walk(&self) -> usize {
        self.iter().count()
    }
}

fn filled<M: BenchMap>(count: usize) -> M {
    let mut map = M::default();
    for i in 0..count {
        map.insert(Point::from_i(i), Value::default());
    }
    map
}

fn shuffled_keys(count: usize) -> Vec<Point> {
    let mut keys = (0..count).map(Point::from_i).collect::<Vec<_>>();
    keys.shuffle(&mut rand::thread_rng());
    keys
}

fn bench_contender<M: BenchMap>(c: &mut Criterion) {
    let name = M::NAME;

    for count in COUNTS {
        c.bench_function(format!("{name} ordered_insert {count}").as_str(), |b| {
            b.iter(|| filled::<M>(count));
        });

        c.bench_function(format!("{name} random_insert {count}").as_str(), |b| {
            let keys = shuffled_keys(count);
            b.iter(|| {
                let mut map = M::default();
                for k in keys.iter() {
                    map.insert(*k, Value::default());
                }
                map
            });
        });

        c.bench_function(format!("{name} ordered_remove {count}").as_str(), |b| {
            let map = filled::<M>(count);
            b.iter(|| {
                let mut map = map.clone();
                for i in 0..count {
                    black_box(map.remove(&Point::from_i(i)));
                }
            });
        });

        c.bench_function(format!("{name} random_remove {count}").as_str(), |b| {
            let map = filled::<M>(count);
            let keys = shuffled_keys(count);
            b.iter(|| {
                let mut map = map.clone();
                for k in keys.iter() {
                    black_box(map.remove(k));
                }
            });
        });

        c.bench_function(format!("{name} ordered_get {count}").as_str(), |b| {
            let map = filled::<M>(count);
            b.iter(|| {
                for i in 0..count {
                    black_box(map.get(&Point::from_i(i)));
                }
            });
        });

        c.bench_function(format!("{name} random_get {count}").as_str(), |b| {
            let map = filled::<M>(count);
            let keys = shuffled_keys(count);
            b.iter(|| {
                for k in keys.iter() {
                    black_box(map.get(k));
                }
            });
        });

        c.bench_function(format!("{name} iter {count}").as_str(), |b| {
            let map = filled::<M>(count);
            b.iter(|| black_box(map.walk()));
        });
    }
}

fn bench_flat_map(c: &mut Criterion) {
    bench_contender::<FlatMap<Point, Value>>(c);
    bench_contender::<FlatMap<Point, Value, Less, BinarySearch>>(c);
}

fn bench_btree(c: &mut Criterion) {
    bench_contender::<BTreeMap<Point, Value>>(c);
}

fn bench_pair_vec(c: &mut Criterion) {
    bench_contender::<PairVec<Point, Value>>(c);
}

/// Small maps are where the flat layout and linear search are expected to pay off
fn bench_small(c: &mut Criterion) {
    for count in [8usize, 16, 32] {
        c.bench_function(format!("flat_map_linear build_and_get {count}").as_str(), |b| {
            b.iter(|| {
                let mut map = FlatMap::<usize, usize, Less, LinearSearch>::default();
                for i in (0..count).rev() {
                    map.insert(i, i);
                }
                for i in 0..count {
                    black_box(map.get(&i));
                }
            });
        });

        c.bench_function(format!("btree build_and_get {count}").as_str(), |b| {
            b.iter(|| {
                let mut map = BTreeMap::<usize, usize>::new();
                for i in (0..count).rev() {
                    map.insert(i, i);
                }
                for i in 0..count {
                    black_box(map.get(&i));
                }
            });
        });
    }
}

/// Walk all entries through a cursor instead of the iterator
fn bench_cursor(c: &mut Criterion) {
    for count in COUNTS {
        c.bench_function(format!("flat_map cursor {count}").as_str(), |b| {
            let map = filled::<FlatMap<Point, Value>>(count);
            b.iter(|| {
                let mut cursor = map.begin();
                let end = map.end();
                let mut seen = 0;
                while cursor != end {
                    black_box(cursor.key());
                    cursor.move_next();
                    seen += 1;
                }
                assert_eq!(seen, count);
            });
        });
    }
}

criterion_group!(
    benches,
    bench_flat_map,
    bench_btree,
    bench_pair_vec,
    bench_small,
    bench_cursor
);

criterion_main!(benches);
