use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordtrees::btree::{self, TwoThreeTree};
use ordtrees::heap::{Entry, Heap, Orientation};
use ordtrees::{avl, bst};

#[derive(Clone)]
enum TreeEnum {
    Avl(avl::Tree<i32>),
    Bst(bst::Tree<i32>),
    BTree(btree::Tree<i32, i32>),
    TwoThree(TwoThreeTree<i32, i32>),
}

impl TreeEnum {
    fn find(&self, k: &i32) -> bool {
        match self {
            Self::Avl(t) => t.search(k).is_some(),
            Self::Bst(t) => t.search(k).is_some(),
            Self::BTree(t) => t.search(k).is_some(),
            Self::TwoThree(t) => t.search(k).is_some(),
        }
    }

    fn insert(&mut self, k: i32) {
        match self {
            Self::Avl(t) => {
                t.insert(k);
            }
            Self::Bst(t) => t.insert(k),
            Self::BTree(t) => t.insert(k, k),
            Self::TwoThree(t) => t.insert(k, k),
        }
    }
}

/// Builds every kind of tree from the same keys, inserted in a scrambled order so the plain BST
/// stays reasonably shallow.
fn build_trees(num_nodes: usize) -> [(&'static str, TreeEnum); 4] {
    let keys: Vec<i32> = (0..num_nodes)
        .map(|i| ((i * 7919 + 13) % num_nodes) as i32)
        .collect();

    let mut btree = btree::Tree::new(16).expect("16 is a valid order");
    let mut two_three = TwoThreeTree::new();
    for &k in &keys {
        btree.insert(k, k);
        two_three.insert(k, k);
    }

    [
        ("avl", TreeEnum::Avl(keys.iter().copied().collect())),
        ("bst", TreeEnum::Bst(keys.iter().copied().collect())),
        ("btree-16", TreeEnum::BTree(btree)),
        ("two-three", TreeEnum::TwoThree(two_three)),
    ]
}

/// Helper to bench a function on a search tree.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of search trees before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = num_nodes - 1;

        for (name, tree) in build_trees(num_nodes) {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree as i32));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Heap construction: repeated inserts against a single bottom-up build, then a full sort.
fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap");

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let entries: Vec<_> = (0..num_nodes as i64)
            .map(|k| Entry::new((), (k * 7919 + 13) % num_nodes as i64))
            .collect();

        group.bench_with_input(BenchmarkId::new("insert", num_nodes), &entries, |b, entries| {
            b.iter(|| {
                let mut heap = Heap::new(0, Orientation::Max).expect("default capacity");
                for entry in entries {
                    heap.insert((), entry.key);
                }
                black_box(heap)
            })
        });
        group.bench_with_input(BenchmarkId::new("build", num_nodes), &entries, |b, entries| {
            b.iter(|| black_box(Heap::from_entries(entries.clone(), Orientation::Max)))
        });
        group.bench_with_input(BenchmarkId::new("sort", num_nodes), &entries, |b, entries| {
            b.iter(|| black_box(Heap::from_entries(entries.clone(), Orientation::Max).into_sorted_vec()))
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });
    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_heap(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
