//! An array-backed binary heap that is either a max-heap or a min-heap.
//!
//! Elements are stored in complete-binary-tree order: the children of index `i` live at
//! `2i + 1` and `2i + 2`. Every parent's key dominates its children's keys (`>=` for a max-heap,
//! `<=` for a min-heap), so the dominant element is always at index 0.
//!
//! # Examples
//!
//! ```
//! use ordtrees::heap::{Heap, Orientation};
//!
//! let mut heap = Heap::new(4, Orientation::Min)?;
//! for (item, key) in [("c", 3), ("a", 1), ("b", 2)] {
//!     heap.insert(item, key);
//! }
//!
//! assert_eq!(heap.peek().map(|e| e.item), Some("a"));
//! assert_eq!(heap.extract_top().map(|e| e.key), Some(1));
//! assert_eq!(heap.len(), 2);
//! # Ok::<(), ordtrees::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::error::{Error, Result};

/// The capacity a heap starts with when asked for a capacity of 0.
pub const DEFAULT_CAPACITY: usize = 32;

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

/// Which end of the key range a [`Heap`] keeps on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The largest key is on top.
    #[default]
    Max,
    /// The smallest key is on top.
    Min,
}

impl Orientation {
    /// Parses `"max"` or `"min"`. Anything else logs a warning and falls back to
    /// [`Orientation::Max`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::heap::Orientation;
    ///
    /// assert_eq!(Orientation::from_name_lossy("min"), Orientation::Min);
    /// assert_eq!(Orientation::from_name_lossy("biggest"), Orientation::Max);
    /// ```
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!("heap: unknown heap type {name:?}, defaulting to a max-heap");
            Orientation::Max
        })
    }

    /// The name [`FromStr`] accepts for this orientation.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Max => "max",
            Orientation::Min => "min",
        }
    }

    /// Returns `true` when key `a` belongs strictly above key `b`.
    fn dominates(self, a: i64, b: i64) -> bool {
        match self {
            Orientation::Max => a > b,
            Orientation::Min => a < b,
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max" => Ok(Orientation::Max),
            "min" => Ok(Orientation::Min),
            other => Err(Error::UnknownOrientation(other.to_owned())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element of a [`Heap`]: a caller payload and the priority it is ordered by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<T> {
    /// The priority.
    pub key: i64,
    /// The payload.
    pub item: T,
}

impl<T> Entry<T> {
    /// Pairs an item with its priority.
    pub fn new(item: T, key: i64) -> Self {
        Self { key, item }
    }
}

/// A binary heap of [`Entry`]s. The orientation is fixed when the heap is built.
#[derive(Clone)]
pub struct Heap<T> {
    entries: Vec<Entry<T>>,
    /// Tracked separately from `entries.capacity()` so growth is always by doubling.
    capacity: usize,
    orientation: Orientation,
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            orientation: Orientation::Max,
        }
    }
}

impl<T> fmt::Debug for Heap<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("orientation", &self.orientation)
            .field("capacity", &self.capacity)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<T> Heap<T> {
    /// Generates a new, empty heap with room for `capacity` elements. A capacity of 0 means
    /// [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] when the storage can't be reserved. Nothing is allocated in that
    /// case.
    pub fn new(capacity: usize, orientation: Orientation) -> Result<Self> {
        let capacity = if capacity > 0 {
            capacity
        } else {
            DEFAULT_CAPACITY
        };
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation { capacity })?;
        Ok(Self {
            entries,
            capacity,
            orientation,
        })
    }

    /// Like [`Heap::new`] but the orientation is given by name; see
    /// [`Orientation::from_name_lossy`].
    ///
    /// # Errors
    ///
    /// See [`Heap::new`].
    pub fn with_kind(capacity: usize, kind: &str) -> Result<Self> {
        Self::new(capacity, Orientation::from_name_lossy(kind))
    }

    /// Builds a heap holding `entries`, with a capacity of exactly `entries.len()` (or
    /// [`DEFAULT_CAPACITY`] if there are none). See [`Heap::build_from_array`].
    pub fn from_entries(entries: Vec<Entry<T>>, orientation: Orientation) -> Self {
        let capacity = if entries.is_empty() {
            DEFAULT_CAPACITY
        } else {
            entries.len()
        };
        let mut heap = Self {
            entries: Vec::new(),
            capacity,
            orientation,
        };
        heap.build_from_array(entries);
        heap
    }

    /// The number of elements in the heap.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many elements fit before the heap has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this is a max-heap or a min-heap.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The elements in storage order.
    pub fn as_slice(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// The dominant element, without removing it.
    pub fn peek(&self) -> Option<&Entry<T>> {
        let top = self.entries.first();
        if top.is_none() {
            debug!("heap: peek on an empty heap");
        }
        top
    }

    /// Adds an element and sifts it up to its place in `O(lg N)`. The capacity doubles when
    /// the heap is full.
    pub fn insert(&mut self, item: T, key: i64) {
        if self.entries.len() >= self.capacity {
            self.grow_to(self.capacity.saturating_mul(2));
        }
        self.entries.push(Entry::new(item, key));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the dominant element. The last element takes its place and is
    /// sifted down in `O(lg N)`.
    pub fn extract_top(&mut self) -> Option<Entry<T>> {
        if self.entries.is_empty() {
            debug!("heap: extract on an empty heap");
            return None;
        }
        let top = self.entries.swap_remove(0);
        self.sift_down(0, self.entries.len());
        Some(top)
    }

    /// Replaces the contents of the heap with `entries` and restores heap order bottom-up in
    /// `O(N)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::heap::{Entry, Heap, Orientation};
    ///
    /// let mut heap = Heap::new(2, Orientation::Max)?;
    /// heap.build_from_array([3, 1, 4, 1, 5].map(|k| Entry::new((), k)).to_vec());
    ///
    /// assert_eq!(heap.peek().map(|e| e.key), Some(5));
    /// assert_eq!(heap.capacity(), 10);
    /// # Ok::<(), ordtrees::Error>(())
    /// ```
    pub fn build_from_array(&mut self, entries: Vec<Entry<T>>) {
        if entries.len() > self.capacity {
            self.grow_to(entries.len().saturating_mul(2));
        }
        self.entries.clear();
        self.entries.extend(entries);

        let len = self.entries.len();
        for i in (0..len / 2).rev() {
            self.sift_down(i, len);
        }
    }

    /// Sorts the elements in place, dominant first: descending keys for a max-heap, ascending
    /// for a min-heap. Nothing is removed, and a list sorted that way is still a valid heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtrees::heap::{Entry, Heap, Orientation};
    ///
    /// let entries = [3, 1, 4, 1, 5, 9, 2, 6].map(|k| Entry::new((), k)).to_vec();
    /// let mut heap = Heap::from_entries(entries, Orientation::Max);
    ///
    /// let keys: Vec<_> = heap.heap_sort().iter().map(|e| e.key).collect();
    /// assert_eq!(keys, [9, 6, 5, 4, 3, 2, 1, 1]);
    /// assert_eq!(heap.len(), 8);
    /// ```
    pub fn heap_sort(&mut self) -> &[Entry<T>] {
        // Classic heap sort leaves the dominant keys at the back.
        for end in (1..self.entries.len()).rev() {
            self.entries.swap(0, end);
            self.sift_down(0, end);
        }
        self.entries.reverse();
        &self.entries
    }

    /// Drains the heap by repeated [`Heap::extract_top`], dominant first.
    pub fn into_sorted_vec(mut self) -> Vec<Entry<T>> {
        let mut sorted = Vec::with_capacity(self.entries.len());
        while let Some(top) = self.extract_top() {
            sorted.push(top);
        }
        sorted
    }

    fn grow_to(&mut self, capacity: usize) {
        trace!("heap: growing from {} to {capacity}", self.capacity);
        let additional = capacity.saturating_sub(self.entries.len());
        if self.entries.try_reserve_exact(additional).is_err() {
            // Storage keeps growing one push at a time instead.
            warn!("heap: cannot reserve room for {capacity} elements");
        }
        self.capacity = capacity;
    }

    fn dominates(&self, a: usize, b: usize) -> bool {
        self.orientation
            .dominates(self.entries[a].key, self.entries[b].key)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && self.dominates(index, parent(index)) {
            self.entries.swap(index, parent(index));
            index = parent(index);
        }
    }

    /// Sifts the element at `index` down within the first `len` elements.
    fn sift_down(&mut self, mut index: usize, len: usize) {
        loop {
            let mut top = index;
            if left(index) < len && self.dominates(left(index), top) {
                top = left(index);
            }
            if right(index) < len && self.dominates(right(index), top) {
                top = right(index);
            }
            if top == index {
                return;
            }
            self.entries.swap(index, top);
            index = top;
        }
    }
}
