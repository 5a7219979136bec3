//! Error types for container operations.

use thiserror::Error;

/// Failure raised by a container operation.
///
/// Every variant is raised before the container changes state or notifies
/// its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An index was outside the valid range of a [`DynArray`](crate::DynArray).
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The index that was requested.
        index: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },

    /// A node key does not name a live node in the container's arena.
    #[error("no node for key {0}")]
    InvalidKey(usize),

    /// Linking `child` under `parent` would make a node its own ancestor.
    #[error("adding node {child} under {parent} would create a cycle")]
    Cycle {
        /// Node that would receive the child.
        parent: usize,
        /// Node that would be added.
        child: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
