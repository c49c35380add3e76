use ordtrees::heap::{Entry, Heap, Orientation};
use quickcheck_macros::quickcheck;

fn drain_keys(mut heap: Heap<()>) -> Vec<i64> {
    let mut keys = Vec::new();
    while let Some(top) = heap.extract_top() {
        keys.push(top.key);
    }
    keys
}

#[quickcheck]
fn extract_order_max(xs: Vec<i32>) -> bool {
    let mut heap = Heap::new(1, Orientation::Max).unwrap();
    for x in &xs {
        heap.insert((), i64::from(*x));
    }

    let mut expected: Vec<_> = xs.iter().map(|&x| i64::from(x)).collect();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    drain_keys(heap) == expected
}

#[quickcheck]
fn extract_order_min(xs: Vec<i32>) -> bool {
    let entries = xs.iter().map(|&x| Entry::new((), i64::from(x))).collect();
    let heap = Heap::from_entries(entries, Orientation::Min);

    let mut expected: Vec<_> = xs.iter().map(|&x| i64::from(x)).collect();
    expected.sort_unstable();
    drain_keys(heap) == expected
}

#[quickcheck]
fn heap_sort_agrees_with_extraction(xs: Vec<i32>) -> bool {
    let entries: Vec<_> = xs.iter().map(|&x| Entry::new((), i64::from(x))).collect();
    let mut heap = Heap::from_entries(entries.clone(), Orientation::Max);
    let sorted: Vec<_> = heap.heap_sort().iter().map(|e| e.key).collect();

    sorted == drain_keys(Heap::from_entries(entries, Orientation::Max))
}
