use ordtrees::bst::Tree;
use quickcheck_macros::quickcheck;

use crate::Op;

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    let mut sorted = xs;
    sorted.sort_unstable();
    tree.len() == sorted.len() && tree.inorder().into_iter().eq(sorted.iter())
}

#[quickcheck]
fn size_tracks_live_nodes(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut live = 0;
    for op in &ops {
        match op {
            Op::Insert(x) => {
                tree.insert(*x);
                live += 1;
            }
            Op::Remove(x) => {
                if tree.delete(x).is_some() {
                    live -= 1;
                }
            }
        }
    }

    tree.len() == live && tree.inorder().len() == live
}

#[quickcheck]
fn delete_all_then_search(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for x in &xs {
        tree.delete(x);
    }

    tree.is_empty() && xs.iter().all(|x| tree.search(x).is_none())
}
