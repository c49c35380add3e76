use ordtrees::btree::{NodeRef, Tree, TwoThreeTree};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

/// Depth of every leaf under `node`.
fn leaf_depths<K, V>(node: NodeRef<'_, K, V>, depth: usize, depths: &mut HashSet<usize>) {
    if node.is_leaf() {
        depths.insert(depth);
    }
    for child in node.children() {
        assert!(child.parent() == Some(node));
        leaf_depths(child, depth + 1, depths);
    }
}

#[quickcheck]
fn contains(order: u8, xs: Vec<i16>) -> bool {
    let mut tree = Tree::new(3 + usize::from(order % 10)).unwrap();
    for x in &xs {
        tree.insert(*x, i32::from(*x) * 2);
    }

    tree.len() == xs.len() && xs.iter().all(|x| tree.search(x) == Some(&(i32::from(*x) * 2)))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = TwoThreeTree::new();
    for x in &xs {
        tree.insert(*x, ());
    }
    let added: HashSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn iteration_is_sorted(order: u8, xs: Vec<i16>) -> bool {
    let mut tree = Tree::new(2 + usize::from(order % 10)).unwrap();
    for x in &xs {
        tree.insert(*x, ());
    }

    let mut sorted = xs;
    sorted.sort_unstable();
    tree.iter().len() == sorted.len() && tree.iter().map(|(k, _)| *k).eq(sorted)
}

#[quickcheck]
fn leaves_share_one_depth(order: u8, xs: Vec<i16>) -> bool {
    let mut tree = Tree::new(2 + usize::from(order % 6)).unwrap();
    for x in &xs {
        tree.insert(*x, ());
    }

    let Some(root) = tree.root() else {
        return xs.is_empty();
    };
    let mut depths = HashSet::new();
    leaf_depths(root, 1, &mut depths);
    depths.len() == 1 && depths.contains(&tree.height())
}

#[quickcheck]
fn two_three_matches_order_three(xs: Vec<i8>) -> bool {
    let mut two_three = TwoThreeTree::new();
    let mut btree = Tree::new(3).unwrap();
    for (i, x) in xs.iter().enumerate() {
        two_three.insert(*x, i);
        btree.insert(*x, i);
    }

    format!("{:?}", two_three.root()) == format!("{:?}", btree.root())
}
