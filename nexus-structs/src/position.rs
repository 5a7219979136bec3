//! Cursor position for the linked lists.

use crate::Key;

/// Where a list cursor currently points.
///
/// A cursor is always in one of two states and never dangles: it either
/// names a live node or sits past the end of the chain, holding no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Positioned on the node with this key.
    At(usize),
    /// Past the end of the chain; there is no current value.
    PastEnd,
}

impl Default for Position {
    fn default() -> Self {
        Position::PastEnd
    }
}

impl Position {
    /// Converts a sentinel-encoded key into a position.
    #[inline]
    pub fn from_key(key: usize) -> Self {
        match key.into_option() {
            Some(key) => Position::At(key),
            None => Position::PastEnd,
        }
    }

    /// Returns the key of the current node, if any.
    #[inline]
    pub fn key(self) -> Option<usize> {
        match self {
            Position::At(key) => Some(key),
            Position::PastEnd => None,
        }
    }

    /// Returns `true` if the cursor holds no node.
    #[inline]
    pub fn is_past_end(self) -> bool {
        matches!(self, Position::PastEnd)
    }
}

impl From<Option<usize>> for Position {
    fn from(key: Option<usize>) -> Self {
        match key {
            Some(key) => Position::At(key),
            None => Position::PastEnd,
        }
    }
}
