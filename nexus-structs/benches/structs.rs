//! Container benchmarks, with and without an attached observer.
//!
//! Run with: cargo bench

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_structs::{
    ArrayObserver, Direction, DoublyList, DoublyObserver, DynArray, HandlerResult, Observer,
    OnAdded, OnTraverse, Tree,
};

const ARRAY_LEN: usize = 1_000;
const LIST_LEN: usize = 10_000;

#[derive(Default)]
struct Counter(Cell<u64>);

impl OnAdded<DynArray<u64>, u64> for Counter {
    fn on_added(&self, _: &DynArray<u64>, _: &u64, _: usize) -> HandlerResult {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

impl OnTraverse<DoublyList<u64>> for Counter {
    fn on_traverse(&self, _: &DoublyList<u64>, _: Direction) -> HandlerResult {
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

// ============================================================================
// DynArray
// ============================================================================

fn bench_array_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_add");
    group.throughput(Throughput::Elements(ARRAY_LEN as u64));

    group.bench_function("plain", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for i in 0..ARRAY_LEN as u64 {
                array.add(i);
            }
            black_box(array)
        });
    });

    let counter = Rc::new(Counter::default());
    let observer: Rc<ArrayObserver<u64>> = Rc::new(Observer::new().on_added(counter));
    group.bench_function("observed", |b| {
        b.iter(|| {
            let mut array = DynArray::with_observer(observer.clone());
            for i in 0..ARRAY_LEN as u64 {
                array.add(i);
            }
            black_box(array)
        });
    });

    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..ARRAY_LEN as u64 {
                vec.push(i);
            }
            black_box(vec)
        });
    });

    group.finish();
}

fn bench_array_remove_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_remove_all");
    let source: DynArray<u64> = (0..ARRAY_LEN as u64).map(|i| i % 4).collect();

    group.bench_function("quarter", |b| {
        b.iter(|| {
            let mut array = source.clone();
            black_box(array.remove_all(&0))
        });
    });

    group.finish();
}

// ============================================================================
// DoublyList
// ============================================================================

fn bench_list_push_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_push_remove");
    group.throughput(Throughput::Elements(LIST_LEN as u64));

    group.bench_function("doubly", |b| {
        let mut list = DoublyList::new();
        let mut keys = Vec::with_capacity(LIST_LEN);
        b.iter(|| {
            for i in 0..LIST_LEN as u64 {
                keys.push(list.push_back(i));
            }
            for key in keys.drain(..) {
                black_box(list.remove(key).ok());
            }
        });
    });

    group.bench_function("vec_deque", |b| {
        let mut deque = VecDeque::with_capacity(LIST_LEN);
        b.iter(|| {
            for i in 0..LIST_LEN as u64 {
                deque.push_back(i);
            }
            while let Some(value) = deque.pop_front() {
                black_box(value);
            }
        });
    });

    group.finish();
}

fn bench_list_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_traverse");
    group.throughput(Throughput::Elements(LIST_LEN as u64));

    let mut plain: DoublyList<u64> = (0..LIST_LEN as u64).collect();
    group.bench_function("plain", |b| {
        b.iter(|| {
            plain.set_current(plain.head()).ok();
            while plain.traverse_next(1) {}
            black_box(plain.current());
        });
    });

    let counter = Rc::new(Counter::default());
    let observer: Rc<DoublyObserver<u64>> = Rc::new(Observer::new().on_traverse(counter));
    let mut observed = DoublyList::from_iter_with_observer(0..LIST_LEN as u64, observer);
    group.bench_function("observed", |b| {
        b.iter(|| {
            observed.set_current(observed.head()).ok();
            while observed.traverse_next(1) {}
            black_box(observed.current());
        });
    });

    group.finish();
}

// ============================================================================
// Tree
// ============================================================================

fn bench_tree_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_contains");

    // Complete binary tree, 2^12 - 1 nodes.
    let mut tree = Tree::with_capacity(4096);
    let root = tree.insert(0u32);
    let mut frontier = vec![root];
    let mut deepest = root;
    for depth in 1..12 {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for &parent in &frontier {
            for _ in 0..2 {
                if let Ok(child) = tree.push_child(parent, depth) {
                    next.push(child);
                }
            }
        }
        deepest = next[next.len() - 1];
        frontier = next;
    }

    group.bench_function("deepest_leaf", |b| {
        b.iter(|| black_box(tree.contains(root, deepest)));
    });
    group.bench_function("ancestors", |b| {
        b.iter(|| black_box(tree.ancestors(deepest)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_array_add,
    bench_array_remove_all,
    bench_list_push_remove,
    bench_list_traverse,
    bench_tree_contains,
);
criterion_main!(benches);
