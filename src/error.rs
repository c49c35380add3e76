//! Errors reported while configuring containers.

use thiserror::Error;

/// Result type alias using [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing a container.
///
/// Queries never fail: looking for a missing key or popping an empty heap is an expected
/// outcome and is reported with `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A multiway tree needs room for at least two children per node.
    #[error("invalid B-tree order {order}: a node must allow at least 2 children")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },

    /// The up-front storage for a container could not be reserved.
    #[error("cannot reserve room for {capacity} elements")]
    Allocation {
        /// The requested capacity.
        capacity: usize,
    },

    /// A heap orientation other than `"max"` or `"min"`.
    #[error("unknown heap orientation {0:?}: expected \"max\" or \"min\"")]
    UnknownOrientation(String),
}
