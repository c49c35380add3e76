//! The 2-3 tree: a B-tree of order 3. Every node holds one or two keys, and a full node splits
//! into two one-key nodes with the middle key promoted.
//!
//! # Examples
//!
//! ```
//! use ordtrees::btree::TwoThreeTree;
//!
//! let mut tree = TwoThreeTree::new();
//! for x in [10, 20, 30] {
//!     tree.insert(x, x.to_string());
//! }
//!
//! assert_eq!(tree.root().unwrap().keys(), &[20]);
//! assert_eq!(tree.search(&30), Some(&"30".to_string()));
//! ```

use std::fmt;

use super::{Iter, NodeRef, Tree};
use crate::compare::{Compare, Natural};

/// The order of every [`TwoThreeTree`].
pub const ORDER: usize = 3;

/// A [`Tree`] fixed at order 3. It builds exactly the same shapes as `Tree::new(3)` given the
/// same inserts; it just can't be misconfigured.
#[derive(Clone)]
pub struct TwoThreeTree<K, V, C = Natural> {
    tree: Tree<K, V, C>,
}

impl<K, V> Default for TwoThreeTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TwoThreeTree<K, V> {
    /// Generates a new, empty tree ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> TwoThreeTree<K, V, C> {
    /// Generates a new, empty tree ordered by the given comparison function.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            tree: Tree::with_valid_order(ORDER, compare),
        }
    }

    /// The number of entries in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` when the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of levels in the tree.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// A read-only view of the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.tree.root()
    }

    /// Iterates over every entry in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// The underlying order-3 [`Tree`].
    pub fn as_btree(&self) -> &Tree<K, V, C> {
        &self.tree
    }

    /// Unwraps the underlying order-3 [`Tree`].
    pub fn into_btree(self) -> Tree<K, V, C> {
        self.tree
    }
}

impl<K, V, C> TwoThreeTree<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts the given key and value. See [`Tree::insert`].
    pub fn insert(&mut self, key: K, value: V) {
        self.tree.insert(key, value);
    }

    /// Potentially finds the value associated with the given key. See [`Tree::search`].
    pub fn search(&self, key: &K) -> Option<&V> {
        self.tree.search(key)
    }

    /// Like [`TwoThreeTree::search`] but the value can be modified in place.
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.search_mut(key)
    }

    /// Returns `true` if an entry with the given key is stored.
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }
}

impl<K, V, C> fmt::Debug for TwoThreeTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoThreeTree")
            .field("len", &self.tree.len())
            .field("root", &self.tree.root())
            .finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a TwoThreeTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::tests::{check_invariants, scrambled};

    #[test]
    fn nodes_hold_one_or_two_keys() {
        let mut tree = TwoThreeTree::new();
        for k in scrambled(200) {
            tree.insert(k, ());
        }
        check_invariants(tree.as_btree());

        let mut stack: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            assert!((1..=2).contains(&node.keys().len()));
            stack.extend(node.children());
        }
    }

    #[test]
    fn same_shapes_as_order_three_btree() {
        let mut two_three = TwoThreeTree::new();
        let mut btree = Tree::new(ORDER).unwrap();
        for k in scrambled(97) {
            two_three.insert(k, k);
            btree.insert(k, k);
            assert_eq!(
                format!("{:?}", two_three.root()),
                format!("{:?}", btree.root())
            );
        }
    }

    #[test]
    fn search_and_update() {
        let mut tree = TwoThreeTree::new();
        assert_eq!(tree.search(&1), None);

        for k in 0..50 {
            tree.insert(k, k * 2);
        }
        assert_eq!(tree.len(), 50);
        assert_eq!(tree.search(&21), Some(&42));

        *tree.search_mut(&21).unwrap() = 0;
        assert_eq!(tree.search(&21), Some(&0));
        assert!(!tree.contains_key(&50));

        let btree = tree.into_btree();
        assert_eq!(btree.order(), ORDER);
        assert_eq!(btree.len(), 50);
    }
}
