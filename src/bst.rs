//! A plain, unbalanced Binary Search Tree. Each node records the height of its subtree but the
//! tree never rotates, so inserting sorted input degrades it into a linked list. It is the
//! baseline the balanced trees in this crate are compared against.
//!
//! # Examples
//!
//! ```
//! use ordtrees::bst::Tree;
//!
//! let mut tree = Tree::new();
//! for x in [1, 2, 3, 4] {
//!     tree.insert(x);
//! }
//!
//! // Sorted input is never rebalanced.
//! assert_eq!(tree.height(), 4);
//! assert_eq!(tree.inorder(), vec![&1, &2, &3, &4]);
//!
//! assert_eq!(tree.delete(&3), Some(3));
//! assert_eq!(tree.search(&3), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::debug;

use crate::compare::{Compare, Natural};

/// A Binary Search Tree with no balancing. Equal items are kept: a duplicate goes into the
/// right subtree of the item it equals.
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

impl<T, C> Drop for Tree<T, C> {
    fn drop(&mut self) {
        self.root.clear();
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
    pub fn with_comparator(compare: C) -> Self {
        Self {
            root: Link(None),
            len: 0,
            compare,
        }
    }

    /// The number of items in the tree, duplicates included.
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
        self.root.clear();
        self.len = 0;
    }

    /// The items in preorder: each node before its left then right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.walk(Order::Pre, &mut items);
        items
    }

    /// The items in sorted order.
    pub fn inorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.walk(Order::In, &mut items);
        items
    }

    /// The items in postorder: each node after both of its subtrees.
    pub fn postorder(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.len);
        self.root.walk(Order::Post, &mut items);
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

    /// Inserts the given item at the bottom of the tree.
    pub fn insert(&mut self, item: T) {
        self.root.insert(item, &self.compare);
        self.len += 1;
    }

    /// Potentially finds a stored item comparing equal to `probe`. With duplicates, the one
    /// closest to the root is returned.
    pub fn search(&self, probe: &T) -> Option<&T> {
        if self.is_empty() {
            debug!("bst: search on an empty tree");
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

    /// Deletes one item comparing equal to `probe` and returns it.
    pub fn delete(&mut self, probe: &T) -> Option<T> {
        let deleted = self.root.delete(probe, &self.compare);
        if deleted.is_some() {
            self.len -= 1;
        }
        deleted
    }
}

#[derive(Clone, Copy)]
enum Order {
    Pre,
    In,
    Post,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Nodes detached on the way down, each with the side its subtree was taken from.
type Path<T> = Vec<(Box<Node<T>>, Side)>;

// A sorted insert sequence makes this tree as deep as it is long, so nothing below recurses.
struct Link<T>(Option<Box<Node<T>>>);

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    /// Depth of the empty link `item` would be stored in, counting this link as 1.
    fn insertion_depth<C>(&self, item: &T, compare: &C) -> usize
    where
        C: Compare<T>,
    {
        let mut depth = 1;
        let mut current = self.node();
        while let Some(node) = current {
            depth += 1;
            current = if compare.less(item, &node.item) {
                node.left.node()
            } else {
                node.right.node()
            };
        }
        depth
    }

    fn insert<C>(&mut self, item: T, compare: &C)
    where
        C: Compare<T>,
    {
        // Knowing the depth up front lets heights be raised on the way down.
        let depth = self.insertion_depth(&item, compare);
        let mut link = self;
        for below in (2..=depth).rev() {
            let node = link.0.as_mut().expect("Insertion path => node");
            node.height = node.height.max(below);
            link = if compare.less(&item, &node.item) {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        link.0 = Some(Node::new_boxed(item));
    }

    fn delete<C>(&mut self, probe: &T, compare: &C) -> Option<T>
    where
        C: Compare<T>,
    {
        let mut path = Vec::new();
        let mut current = self.0.take();
        let deleted = loop {
            let Some(mut node) = current.take() else {
                break None;
            };
            match compare.compare(probe, &node.item) {
                Ordering::Less => {
                    current = node.left.0.take();
                    path.push((node, Side::Left));
                }
                Ordering::Greater => {
                    current = node.right.0.take();
                    path.push((node, Side::Right));
                }
                Ordering::Equal => {
                    let mut found = Link(Some(node));
                    let item = found.remove_root();
                    current = found.0.take();
                    break Some(item);
                }
            }
        };

        self.0 = reattach(path, current);
        deleted
    }

    /// Unlinks the root of this subtree and returns its item. With two children, the root takes
    /// the item of its in-order successor and the successor's node is removed instead.
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
                node.fix_height();
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

    fn delete_min(&mut self) -> Option<T> {
        let mut path = Vec::new();
        let mut node = self.0.take()?;
        while let Some(left) = node.left.0.take() {
            path.push((node, Side::Left));
            node = left;
        }

        let Node { item, right, .. } = *node;
        self.0 = reattach(path, right.0);
        Some(item)
    }

    /// Drops every node one at a time.
    fn clear(&mut self) {
        let mut stack: Vec<_> = self.0.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.0.take());
            stack.extend(node.right.0.take());
        }
    }

    fn walk<'a>(&'a self, order: Order, items: &mut Vec<&'a T>) {
        // `true` once a node's subtrees are already on the stack, so it is next in line.
        let mut stack: Vec<(&Node<T>, bool)> = self.node().map(|n| (n, false)).into_iter().collect();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                items.push(&node.item);
                continue;
            }

            let left = node.left.node().map(|n| (n, false));
            let right = node.right.node().map(|n| (n, false));
            // Pushed in reverse of the order they are visited in.
            match order {
                Order::Pre => stack.extend(right.into_iter().chain(left).chain([(node, true)])),
                Order::In => stack.extend(right.into_iter().chain([(node, true)]).chain(left)),
                Order::Post => stack.extend([(node, true)].into_iter().chain(right).chain(left)),
            }
        }
    }
}

/// Hangs `subtree` back under the last detached node, then that node under the one before it,
/// recomputing heights up to the top of the path. Returns the new top.
fn reattach<T>(mut path: Path<T>, mut subtree: Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
    while let Some((mut node, side)) = path.pop() {
        match side {
            Side::Left => node.left = Link(subtree),
            Side::Right => node.right = Link(subtree),
        }
        node.fix_height();
        subtree = Some(node);
    }
    subtree
}

impl<T> Clone for Link<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // Copies in postorder: a node is built once both of its subtrees are on `built`.
        let mut pending = vec![(self.node(), false)];
        let mut built = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            let Some(node) = node else {
                built.push(Link(None));
                continue;
            };
            if expanded {
                let right = built.pop().expect("Right subtree copied");
                let left = built.pop().expect("Left subtree copied");
                built.push(Link(Some(Box::new(Node {
                    item: node.item.clone(),
                    left,
                    right,
                    height: node.height,
                }))));
            } else {
                pending.push((Some(node), true));
                pending.push((node.right.node(), false));
                pending.push((node.left.node(), false));
            }
        }
        built.pop().expect("Root copied")
    }
}

struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,
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

    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }
}
