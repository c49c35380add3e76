//! A balanced multiway search tree (a B-tree) of configurable order.
//!
//! A tree of order `m` stores up to `m - 1` sorted keys per node. An internal node with `k` keys
//! has exactly `k + 1` children, and every key in child `i` sorts before key `i`, which sorts
//! before every key in child `i + 1`.
//!
//! Insertion always happens at a leaf. When a node overflows it is split around its median:
//! the lower half stays in place, the upper half moves to a new sibling and the median is
//! pushed up into the parent, which may overflow and split in turn. When the root splits, a new
//! root holding only the median is created. That is the only way the tree grows taller, so
//! every leaf is always at the same depth.
//!
//! The tree supports insertion and search only.
//!
//! # Examples
//!
//! ```
//! use ordtrees::btree::Tree;
//!
//! let mut tree = Tree::new(4)?;
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! for x in 0..10 {
//!     tree.insert(x, x * 2);
//! }
//! assert_eq!(tree.search(&7), Some(&14));
//! assert_eq!(tree.len(), 10);
//!
//! // Every leaf sits at the same depth.
//! assert_eq!(tree.height(), 2);
//! # Ok::<(), ordtrees::Error>(())
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use log::{debug, trace};

use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};

pub mod two_three;

pub use two_three::TwoThreeTree;

/// The smallest order a [`Tree`] accepts.
///
/// Order 2 is legal but degenerate: a split leaves an empty sibling behind.
pub const MIN_ORDER: usize = 2;

/// Index of a node in a tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

/// A B-tree mapping keys to values. Duplicate keys are allowed; each insert stores a new entry.
#[derive(Clone)]
pub struct Tree<K, V, C = Natural> {
    // Nodes are never removed, so a `NodeId` stays valid for the life of the tree.
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    order: usize,
    len: usize,
    height: usize,
    compare: C,
}

#[derive(Clone)]
struct Node<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
    children: Vec<NodeId>,
    is_leaf: bool,
    /// Kept current whenever `children` is rewritten. The tree's own algorithms never read it.
    parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    // Storage grows on demand: `order` is caller-chosen and may be far larger than any node
    // ever gets.
    fn new(is_leaf: bool) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
            is_leaf,
            parent: None,
        }
    }
}

/// What inserting into a subtree did to that subtree's root.
enum Insertion<K, V> {
    /// The entry fit without splitting the root.
    Absorbed,
    /// The root split. `key`/`value` is the median, to be placed in the parent with `sibling`
    /// (the upper half) as its right child.
    Split { key: K, value: V, sibling: NodeId },
}

/// Index of the first key that `key` sorts strictly before, or `keys.len()` if there is none.
/// Both search and insertion descend into the child at this index.
fn upper_bound<K, C>(keys: &[K], key: &K, compare: &C) -> usize
where
    C: Compare<K>,
{
    keys.iter()
        .position(|k| compare.less(key, k))
        .unwrap_or(keys.len())
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree` of the given order, ordered by `K`'s [`Ord`]
    /// implementation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOrder`] when `order` is less than [`MIN_ORDER`].
    pub fn new(order: usize) -> Result<Self> {
        Self::with_comparator(order, Natural)
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Generates a new, empty `Tree` of the given order, ordered by the given comparison
    /// function.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOrder`] when `order` is less than [`MIN_ORDER`].
    pub fn with_comparator(order: usize, compare: C) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder { order });
        }
        Ok(Self::with_valid_order(order, compare))
    }

    fn with_valid_order(order: usize, compare: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            order,
            len: 0,
            height: 0,
            compare,
        }
    }

    /// The maximum number of children per node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The number of entries in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.height
    }

    /// A read-only view of the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef {
            nodes: &self.nodes,
            id,
        })
    }

    /// Iterates over every entry in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.root, self.len)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Points every child of `id` back at `id`.
    fn fix_children_parent(&mut self, id: NodeId) {
        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.nodes[child.0].parent = Some(id);
        }
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts the given key and value. This always succeeds: a key equal to existing keys is
    /// stored after them.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::btree::Tree;
    ///
    /// let mut tree = Tree::new(3)?;
    /// for x in [10, 20, 30] {
    ///     tree.insert(x, ());
    /// }
    ///
    /// // The third insert split the root around its median.
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.keys(), &[20]);
    /// assert_eq!(root.child(0).unwrap().keys(), &[10]);
    /// assert_eq!(root.child(1).unwrap().keys(), &[30]);
    /// # Ok::<(), ordtrees::Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        match self.root {
            None => {
                let mut node = Node::new(true);
                node.keys.push(key);
                node.values.push(value);
                self.root = Some(self.alloc(node));
                self.height = 1;
            }
            Some(root) => {
                if let Insertion::Split {
                    key,
                    value,
                    sibling,
                } = self.insert_recursive(root, key, value)
                {
                    self.grow_root(root, key, value, sibling);
                }
            }
        }
        self.len += 1;
    }

    /// Potentially finds the value associated with the given key. With duplicate keys, the
    /// entry closest to the root is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::btree::Tree;
    ///
    /// let mut tree = Tree::new(5)?;
    /// tree.insert("b", 2);
    ///
    /// assert_eq!(tree.search(&"b"), Some(&2));
    /// assert_eq!(tree.search(&"z"), None);
    /// # Ok::<(), ordtrees::Error>(())
    /// ```
    pub fn search(&self, key: &K) -> Option<&V> {
        self.find(key).map(|(id, i)| &self.nodes[id.0].values[i])
    }

    /// Like [`Tree::search`] but the value can be modified in place.
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key)
            .map(move |(id, i)| &mut self.nodes[id.0].values[i])
    }

    /// Returns `true` if an entry with the given key is stored.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: &K) -> Option<(NodeId, usize)> {
        let Some(mut id) = self.root else {
            debug!("btree: search on an empty tree");
            return None;
        };

        loop {
            let node = &self.nodes[id.0];
            if let Some(i) = node
                .keys
                .iter()
                .position(|k| self.compare.compare(key, k).is_eq())
            {
                return Some((id, i));
            }
            if node.is_leaf {
                return None;
            }
            id = node.children[upper_bound(&node.keys, key, &self.compare)];
        }
    }

    fn insert_recursive(&mut self, id: NodeId, key: K, value: V) -> Insertion<K, V> {
        let node = &self.nodes[id.0];
        let pos = upper_bound(&node.keys, &key, &self.compare);
        if node.is_leaf {
            return self.insert_entry(id, pos, key, value, None);
        }

        let child = node.children[pos];
        match self.insert_recursive(child, key, value) {
            Insertion::Absorbed => Insertion::Absorbed,
            // The median came out of child `pos`, so it belongs at `pos` here with the new
            // sibling right after the child it was split from.
            Insertion::Split {
                key,
                value,
                sibling,
            } => self.insert_entry(id, pos, key, value, Some(sibling)),
        }
    }

    /// Places an entry at `pos` in node `id`, with `child` as the entry's right child when `id`
    /// is internal. Splits the node if that overflows it.
    fn insert_entry(
        &mut self,
        id: NodeId,
        pos: usize,
        key: K,
        value: V,
        child: Option<NodeId>,
    ) -> Insertion<K, V> {
        let node = &mut self.nodes[id.0];
        node.keys.insert(pos, key);
        node.values.insert(pos, value);
        if let Some(child) = child {
            node.children.insert(pos + 1, child);
        }

        if node.keys.len() < self.order {
            self.fix_children_parent(id);
            Insertion::Absorbed
        } else {
            self.split(id)
        }
    }

    /// Splits node `id`, which holds `order` keys, around the key at `order / 2`. The lower
    /// half stays in `id` and the upper half moves to a new sibling of the same kind.
    fn split(&mut self, id: NodeId) -> Insertion<K, V> {
        let mid = self.order / 2;
        let mut sibling = Node::new(self.nodes[id.0].is_leaf);

        let node = &mut self.nodes[id.0];
        debug_assert_eq!(node.keys.len(), self.order);
        sibling.keys.extend(node.keys.drain(mid + 1..));
        sibling.values.extend(node.values.drain(mid + 1..));
        if !node.is_leaf {
            sibling.children.extend(node.children.drain(mid + 1..));
        }
        sibling.parent = node.parent;

        let key = node.keys.pop().expect("Splitting => median key");
        let value = node.values.pop().expect("Splitting => median value");
        trace!(
            "btree: split node {} into {} + 1 + {} keys",
            id.0,
            node.keys.len(),
            sibling.keys.len()
        );

        let sibling = self.alloc(sibling);
        self.fix_children_parent(id);
        self.fix_children_parent(sibling);
        Insertion::Split {
            key,
            value,
            sibling,
        }
    }

    /// Replaces the root with a new node holding only the median of the old root's split.
    fn grow_root(&mut self, old_root: NodeId, key: K, value: V, sibling: NodeId) {
        let mut node = Node::new(false);
        node.keys.push(key);
        node.values.push(value);
        node.children.push(old_root);
        node.children.push(sibling);

        let new_root = self.alloc(node);
        self.fix_children_parent(new_root);
        self.root = Some(new_root);
        self.height += 1;
        debug!("btree: root split, height is now {}", self.height);
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("order", &self.order)
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A read-only view of one node of a [`Tree`].
pub struct NodeRef<'a, K, V> {
    nodes: &'a [Node<K, V>],
    id: NodeId,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

/// Two views are equal when they point at the same node of the same tree.
impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    fn node(&self) -> &'a Node<K, V> {
        &self.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Self {
        Self {
            nodes: self.nodes,
            id,
        }
    }

    /// The node's keys, in order.
    pub fn keys(&self) -> &'a [K] {
        &self.node().keys
    }

    /// The node's values; `values()[i]` belongs to `keys()[i]`.
    pub fn values(&self) -> &'a [V] {
        &self.node().values
    }

    /// Returns `true` for leaves. Internal nodes have one more child than they have keys.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf
    }

    /// The `index`th child, if any.
    pub fn child(&self, index: usize) -> Option<Self> {
        self.node().children.get(index).map(|&id| self.at(id))
    }

    /// The node's children, in order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, K, V>> + 'a {
        let this = *self;
        this.node().children.iter().map(move |&id| this.at(id))
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| self.at(id))
    }
}

impl<K, V> fmt::Debug for NodeRef<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("keys", &self.keys()).field("values", &self.values());
        if !self.is_leaf() {
            s.field("children", &self.children().collect::<Vec<_>>());
        }
        s.finish()
    }
}

/// An in-order iterator over the entries of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    /// The path from the root to the next entry: each node and the index of its next key.
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(nodes: &'a [Node<K, V>], root: Option<NodeId>, len: usize) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Pushes the path from `id` down to its leftmost leaf.
    fn descend(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            let node = &self.nodes[id.0];
            if node.is_leaf {
                return;
            }
            id = node.children[0];
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            let frame = self.stack.last_mut()?;
            let node = &nodes[frame.0 .0];
            let index = frame.1;
            if index == node.keys.len() {
                self.stack.pop();
                continue;
            }

            frame.1 += 1;
            if !node.is_leaf {
                self.descend(node.children[index + 1]);
            }
            self.remaining -= 1;
            return Some((&node.keys[index], &node.values[index]));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
