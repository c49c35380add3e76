//! A self-balancing BST (specifically, an AVL tree). After every insert and delete the heights
//! of the two subtrees of any node differ by at most one, which keeps searches `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use ordtrees::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! assert!(tree.insert(1));
//! assert_eq!(tree.search(&1), Some(&1));
//!
//! // Equal items are rejected and the tree is left untouched.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting an item hands it back.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.search(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::compare::{Compare, Natural};

/// A self-balancing Binary Search Tree of items ordered by a [`Compare`] function. The item is
/// its own key: searches and deletes take a probe item that compares equal to the stored one.
#[derive(Clone)]
pub struct Tree<T, C = Natural> {
    root: Link<T>,
    len: usize,
    compare: C,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for Tree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.node())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter, Natural)
    }
}

impl<T, C> Tree<T, C> {
    /// Generates a new, empty `Tree` ordered by the given comparison function.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::avl::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// for x in [1, 3, 2] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.inorder(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        Self {
            root: Link(None),
            len: 0,
            compare,
        }
    }

    /// The number of items in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// The item at the root of the tree, if any.
    pub fn root(&self) -> Option<&T> {
        self.root.node().map(|n| &n.item)
    }

    /// Drops every item in the tree.
    pub fn clear(&mut self) {
        self.root = Link(None);
        self.len = 0;
    }

    /// The items in preorder: each node before its left then right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.preorder(&mut items);
        items
    }

    /// The items in sorted order.
    pub fn inorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.inorder(&mut items);
        items
    }

    /// The items in postorder: each node after both of its subtrees.
    pub fn postorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.postorder(&mut items);
        items
    }
}

impl<T, C> Tree<T, C>
where
    C: Compare<T>,
{
    /// Builds a tree by inserting every item in iteration order.
    pub fn from_items<I>(items: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_comparator(compare);
        for item in items {
            tree.insert(item);
        }
        tree
    }

    /// Inserts the given item into the tree, rebalancing on the way back to the root. Returns
    /// `false` (and drops `item`) when an equal item is already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 4, 3, 2, 1] {
    ///     assert!(tree.insert(x));
    /// }
    ///
    /// // Descending inserts stay balanced.
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        let inserted = self.root.insert(item, &self.compare);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Potentially finds the stored item comparing equal to `probe`.
    pub fn search(&self, probe: &T) -> Option<&T> {
        if self.is_empty() {
            debug!("avl: search on an empty tree");
            return None;
        }

        let mut current = self.root.node();
        while let Some(node) = current {
            match self.compare.compare(probe, &node.item) {
                Ordering::Less => current = node.left.node(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => current = node.right.node(),
            }
        }
        None
    }

    /// Returns `true` if an item equal to `probe` is stored.
    pub fn contains(&self, probe: &T) -> bool {
        self.search(probe).is_some()
    }

    /// Deletes the item comparing equal to `probe` and returns it. If the tree holds no such
    /// item, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::avl::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.inorder(), vec![&1, &3]);
    /// ```
    pub fn delete(&mut self, probe: &T) -> Option<T> {
        let deleted = self.root.delete(probe, &self.compare);
        if deleted.is_some() {
            self.len -= 1;
        }
        deleted
    }
}

#[derive(Clone)]
struct Link<T>(Option<Box<Node<T>>>);

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    fn balance_factor(&self) -> isize {
        self.node().map_or(0, Node::balance_factor)
    }

    fn insert<C>(&mut self, item: T, compare: &C) -> bool
    where
        C: Compare<T>,
    {
        let Some(node) = self.0.as_mut() else {
            self.0 = Some(Node::new_boxed(item));
            return true;
        };

        let inserted = match compare.compare(&item, &node.item) {
            Ordering::Less => node.left.insert(item, compare),
            Ordering::Equal => false,
            Ordering::Greater => node.right.insert(item, compare),
        };

        if inserted {
            self.balance();
        }
        inserted
    }

    fn delete<C>(&mut self, probe: &T, compare: &C) -> Option<T>
    where
        C: Compare<T>,
    {
        let node = self.0.as_mut()?;
        let deleted = match compare.compare(probe, &node.item) {
            Ordering::Less => node.left.delete(probe, compare),
            Ordering::Equal => Some(self.remove_root()),
            Ordering::Greater => node.right.delete(probe, compare),
        };

        if deleted.is_some() {
            self.balance();
        }
        deleted
    }

    /// Unlinks the root of this subtree and returns its item. With two children, the root's
    /// in-order successor (the minimum of the right subtree) takes its place.
    fn remove_root(&mut self) -> T {
        let mut node = self.0.take().expect("Removing a root requires a root");
        match (node.left.0.take(), node.right.0.take()) {
            (Some(left), Some(right)) => {
                node.left = Link(Some(left));
                node.right = Link(Some(right));
                let successor = node
                    .right
                    .delete_min()
                    .expect("Two children => right subtree");
                let item = mem::replace(&mut node.item, successor);
                self.0 = Some(node);
                item
            }
            (child, None) | (None, child) => {
                self.0 = child;
                let Node { item, .. } = *node;
                item
            }
        }
    }

    /// Removes the smallest item in this subtree, rebalancing on the way back up.
    fn delete_min(&mut self) -> Option<T> {
        let node = self.0.as_mut()?;
        if node.left.0.is_some() {
            let min = node.left.delete_min();
            self.balance();
            min
        } else {
            Some(self.remove_root())
        }
    }

    /// Recomputes the root's height and rotates if the subtrees differ in height by more than
    /// one. Both the insert and the delete paths use the same thresholds.
    fn balance(&mut self) {
        let Some(root) = self.0.as_mut() else {
            return;
        };
        // See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
        root.fix_height();
        match root.balance_factor() {
            bf if bf > 1 => {
                if root.left.balance_factor() < 0 {
                    root.left.rotate_left();
                }
                self.rotate_right();
            }
            bf if bf < -1 => {
                if root.right.balance_factor() > 0 {
                    root.right.rotate_right();
                }
                self.rotate_left();
            }
            _ => {}
        }

        if cfg!(debug_assertions) {
            let Some(root) = self.node() else {
                return;
            };
            let left_height = root.left.height();
            let right_height = root.right.height();
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }

    /// Lifts the left child's box into this link and hangs the old root off its right side.
    /// The left child's right subtree (`y` below) changes parents. Both moved nodes get their
    /// heights recomputed, lowest first.
    ///
    /// Panics if this link is empty or has no left child.
    ///
    /// ```text
    ///        p                q
    ///       / \              / \
    ///      q   z     =>     x   p
    ///     / \                  / \
    ///    x   y                y   z
    /// ```
    fn rotate_right(&mut self) {
        let mut old_root = self.0.take().expect("Rotating => subtree root");
        let mut new_root = old_root.left.0.take().expect("Rotate right => left child");
        trace!("avl: rotate right, subtree height {}", old_root.height);

        old_root.left = Link(new_root.right.0.take());
        old_root.fix_height();

        new_root.right = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// The mirror image of [`Link::rotate_right`].
    fn rotate_left(&mut self) {
        let mut old_root = self.0.take().expect("Rotating => subtree root");
        let mut new_root = old_root.right.0.take().expect("Rotate left => right child");
        trace!("avl: rotate left, subtree height {}", old_root.height);

        old_root.right = Link(new_root.left.0.take());
        old_root.fix_height();

        new_root.left = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    fn preorder<'a>(&'a self, items: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            items.push(&node.item);
            node.left.preorder(items);
            node.right.preorder(items);
        }
    }

    fn inorder<'a>(&'a self, items: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            node.left.inorder(items);
            items.push(&node.item);
            node.right.inorder(items);
        }
    }

    fn postorder<'a>(&'a self, items: &mut Vec<&'a T>) {
        if let Some(node) = self.node() {
            node.left.postorder(items);
            node.right.postorder(items);
            items.push(&node.item);
        }
    }
}

#[derive(Clone)]
struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item)
            .field("height", &self.height)
            .field("left", &self.left.node())
            .field("right", &self.right.node())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            left: Link(None),
            right: Link(None),
            height: 1,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The left subtree's height minus the right subtree's height. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }
}
