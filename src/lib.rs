//! This crate exposes a family of ordered containers, mostly for educational purposes.
//!
//! ## Search trees
//!
//! A search tree stores records in an order decided by a comparison function. Every tree in
//! this crate can be built with the natural [`Ord`] ordering or with any caller-supplied
//! three-way comparison (see [`compare::Compare`]).
//!
//! - [`btree`]: a balanced multiway tree of configurable order `m`, including the
//!   [`2-3 tree`][btree::two_three::TwoThreeTree] specialization. Nodes hold up to `m - 1` keys
//!   and split around their median when they overflow, so every leaf stays at the same depth.
//! - [`avl`]: a self-balancing binary search tree. Rotations keep the heights of every node's
//!   subtrees within one of each other after every insert and delete.
//! - [`bst`]: a plain binary search tree with no balancing at all. It is the baseline the
//!   balanced trees are measured against.
//!
//! The important invariant of a binary search tree is that, for every node, all the nodes in
//! its left subtree compare less than it and all the nodes in its right subtree do not. The
//! benefit is that searching takes `O(height)`. With clever construction the height can be
//! limited to `O(lg N)` where `N` is the number of nodes in the tree.
//!
//! ## Priority queues
//!
//! - [`heap`]: an array-backed binary heap that is either a max-heap or a min-heap, with
//!   bottom-up construction and in-place heap sort.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod btree;
pub mod compare;
pub mod error;
pub mod heap;

pub use compare::{Compare, Natural};
pub use error::{Error, Result};
