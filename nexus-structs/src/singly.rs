//! Forward-only linked list with a movable cursor.
//!
//! Nodes live in a `slab::Slab` owned by the list and link to each other by
//! key. The arena holds exactly the nodes of the list's one chain: nodes
//! leave it only through [`SinglyList::remove`], [`SinglyList::split_after`]
//! or [`SinglyList::clear`], so a key either names a node of this chain or
//! is rejected with [`Error::InvalidKey`].
//!
//! # Cursor
//!
//! The cursor is a [`Position`]: on a node, or past the end. Length is
//! measured from the cursor forward, so a list whose cursor has run off the
//! end has `length() == 0` even though its chain is still intact (see
//! [`SinglyList::len`]).
//!
//! # Example
//!
//! ```
//! use nexus_structs::SinglyList;
//!
//! let mut list: SinglyList<u32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(list.current(), Some(&1));
//! assert_eq!(list.length(), 3);
//!
//! assert!(list.traverse_next(2));
//! assert_eq!(list.current(), Some(&3));
//! assert_eq!(list.length(), 1);
//!
//! // Walking past the tail leaves the cursor holding nothing.
//! assert!(!list.traverse_next(1));
//! assert_eq!(list.current(), None);
//! assert_eq!(list.len(), 3);
//! ```

use std::fmt;
use std::mem;
use std::rc::Rc;

use slab::Slab;

use crate::observer::{Direction, Observer};
use crate::{Error, Key, Position, Result};

/// Observer registry for a [`SinglyList<T>`].
pub type SinglyObserver<T> = Observer<SinglyList<T>, T>;

/// A one-directional link cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglyNode<T> {
    value: T,
    next: usize,
}

impl<T> SinglyNode<T> {
    #[inline]
    fn new(value: T) -> Self {
        Self {
            value,
            next: usize::NONE,
        }
    }

    /// Returns the node's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the key of the following node, or `None` at the end.
    #[inline]
    pub fn next(&self) -> Option<usize> {
        self.next.into_option()
    }
}

/// A singly-linked chain plus one forward-moving cursor.
pub struct SinglyList<T> {
    nodes: Slab<SinglyNode<T>>,
    head: usize,
    cursor: Position,
    observer: Option<Rc<SinglyObserver<T>>>,
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SinglyList<T> {
    /// Creates an empty list with the cursor past the end.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head: usize::NONE,
            cursor: Position::PastEnd,
            observer: None,
        }
    }

    /// Creates an empty list attached to `observer`.
    pub fn with_observer(observer: Rc<SinglyObserver<T>>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new()
        }
    }

    /// Builds a chain from `iter` with the cursor on its head, then attaches
    /// `observer`. No events fire.
    pub fn from_iter_with_observer<I>(iter: I, observer: Rc<SinglyObserver<T>>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list: Self = iter.into_iter().collect();
        list.observer = Some(observer);
        list
    }

    /// Returns the attached observer.
    #[inline]
    pub fn observer(&self) -> Option<&Rc<SinglyObserver<T>>> {
        self.observer.as_ref()
    }

    /// Attaches `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: Rc<SinglyObserver<T>>) {
        self.observer = Some(observer);
    }

    /// Detaches and returns the current observer.
    pub fn clear_observer(&mut self) -> Option<Rc<SinglyObserver<T>>> {
        self.observer.take()
    }

    /// Returns the number of nodes in the whole chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes from the cursor to the end of the chain,
    /// counting the cursor's node. Zero when the cursor is past the end.
    ///
    /// Pushing onto a non-empty list never moves the cursor, so once the
    /// cursor is past the end `length()` stays at zero across `push_back`
    /// until the cursor is set again. [`len`](Self::len) always grows by
    /// one per push.
    pub fn length(&self) -> usize {
        let mut count = 0;
        let mut key = self.cursor.key().unwrap_or(usize::NONE);
        while key.is_some() {
            count += 1;
            key = self.nodes[key].next;
        }
        count
    }

    /// Returns the key of the first node.
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head.into_option()
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Returns the node with the given key.
    #[inline]
    pub fn node(&self, key: usize) -> Result<&SinglyNode<T>> {
        self.nodes.get(key).ok_or(Error::InvalidKey(key))
    }

    /// Returns the value of the node with the given key.
    #[inline]
    pub fn value(&self, key: usize) -> Result<&T> {
        self.node(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node's value. Fires nothing.
    #[inline]
    pub fn value_mut(&mut self, key: usize) -> Result<&mut T> {
        self.node_mut(key).map(|node| &mut node.value)
    }

    /// Replaces a node's value, returning the old one. Fires nothing.
    pub fn set_value(&mut self, key: usize, value: T) -> Result<T> {
        Ok(mem::replace(&mut self.node_mut(key)?.value, value))
    }

    /// Returns the key following `key`, or `None` at the end.
    #[inline]
    pub fn next(&self, key: usize) -> Result<Option<usize>> {
        self.node(key).map(SinglyNode::next)
    }

    #[inline]
    fn node_mut(&mut self, key: usize) -> Result<&mut SinglyNode<T>> {
        self.nodes.get_mut(key).ok_or(Error::InvalidKey(key))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Links a new node in front of the head and returns its key.
    ///
    /// Pushing into an empty list also places the cursor on the new node,
    /// without an event.
    pub fn push_front(&mut self, value: T) -> usize {
        let was_empty = self.is_empty();
        let mut node = SinglyNode::new(value);
        node.next = self.head;
        let key = self.nodes.insert(node);
        self.head = key;

        if was_empty {
            self.cursor = Position::At(key);
        }
        key
    }

    /// Links a new node after the last node and returns its key.
    ///
    /// Walks the chain to find the tail. Pushing into an empty list also
    /// places the cursor on the new node, without an event. A cursor past
    /// the end of a non-empty list stays there, see [`length`](Self::length).
    pub fn push_back(&mut self, value: T) -> usize {
        let tail = self.tail();
        if tail.is_none() {
            return self.push_front(value);
        }

        let key = self.nodes.insert(SinglyNode::new(value));
        self.nodes[tail].next = key;
        key
    }

    /// Links a new node directly after `after` and returns its key.
    pub fn insert_after(&mut self, after: usize, value: T) -> Result<usize> {
        let next = self.node(after)?.next;

        let mut node = SinglyNode::new(value);
        node.next = next;
        let key = self.nodes.insert(node);
        self.nodes[after].next = key;
        Ok(key)
    }

    /// Unlinks and returns the value of the node with key `key`.
    ///
    /// The predecessor is found by walking from the head. If the cursor was
    /// on the removed node it moves to the removed node's successor (past
    /// the end if there is none) through the cursor-set path.
    pub fn remove(&mut self, key: usize) -> Result<T> {
        let next = self.node(key)?.next;

        if self.head == key {
            self.head = next;
        } else {
            let mut prev = self.head;
            while prev.is_some() {
                let node = &mut self.nodes[prev];
                if node.next == key {
                    node.next = next;
                    break;
                }
                prev = node.next;
            }
        }

        let node = self.nodes.remove(key);
        if self.cursor == Position::At(key) {
            self.move_cursor(Position::from_key(next));
        }
        Ok(node.value)
    }

    /// Detaches every node after `key` into a new list.
    ///
    /// Ownership of the remainder moves to the returned list, whose nodes
    /// get fresh keys and no observer. Its cursor follows this list's cursor
    /// if that was in the remainder, otherwise it starts on its head. When
    /// the cursor leaves, this list's cursor is set past the end through the
    /// cursor-set path.
    pub fn split_after(&mut self, key: usize) -> Result<Self> {
        let mut current = mem::replace(&mut self.node_mut(key)?.next, usize::NONE);

        let mut rest = Self::new();
        let mut last = usize::NONE;
        let mut cursor_moved = false;

        while current.is_some() {
            let node = self.nodes.remove(current);
            let moved = rest.nodes.insert(SinglyNode::new(node.value));

            if last.is_some() {
                rest.nodes[last].next = moved;
            } else {
                rest.head = moved;
            }
            if self.cursor == Position::At(current) {
                rest.cursor = Position::At(moved);
                cursor_moved = true;
            }

            last = moved;
            current = node.next;
        }

        if !cursor_moved {
            rest.cursor = Position::from_key(rest.head);
        } else {
            self.move_cursor(Position::PastEnd);
        }
        Ok(rest)
    }

    /// Drops every node and puts the cursor past the end. Fires nothing.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = usize::NONE;
        self.cursor = Position::PastEnd;
    }

    fn tail(&self) -> usize {
        let mut key = self.head;
        while key.is_some() {
            let next = self.nodes[key].next;
            if next.is_none() {
                break;
            }
            key = next;
        }
        key
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Returns the cursor position.
    #[inline]
    pub fn position(&self) -> Position {
        self.cursor
    }

    /// Returns the key of the cursor's node.
    #[inline]
    pub fn current_key(&self) -> Option<usize> {
        self.cursor.key()
    }

    /// Returns the value under the cursor, or `None` past the end.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        // Cursor keys always name live nodes.
        self.cursor.key().map(|key| &self.nodes[key].value)
    }

    /// Places the cursor on `key`, or past the end for `None`.
    ///
    /// Always fires the cursor `Set` event.
    pub fn set_current(&mut self, key: Option<usize>) -> Result<()> {
        if let Some(key) = key {
            self.node(key)?;
        }
        self.move_cursor(Position::from(key));
        Ok(())
    }

    /// Advances the cursor `amount` nodes.
    ///
    /// If the chain ends before `amount` steps, the cursor is set past the
    /// end (firing the cursor `Set` event), `NullTraverse` fires and `false`
    /// is returned. Otherwise the cursor moves once to its destination,
    /// `Traverse(Next)` fires and `true` is returned. `amount == 0` counts
    /// as a completed traversal.
    pub fn traverse_next(&mut self, amount: usize) -> bool {
        let mut position = self.cursor;
        for _ in 0..amount {
            position = match position {
                Position::At(key) => Position::from_key(self.nodes[key].next),
                Position::PastEnd => Position::PastEnd,
            };

            if position.is_past_end() {
                tracing::trace!(amount, "traversal ran off the end of the chain");
                self.move_cursor(Position::PastEnd);
                self.notify(|observer| observer.null_traverse(self));
                return false;
            }
        }

        self.cursor = position;
        self.notify(|observer| observer.traverse(self, Direction::Next));
        true
    }

    /// Traverses [`length()`](Self::length) nodes, which always runs off the
    /// end of a non-empty remainder.
    pub fn traverse_to_end(&mut self) -> bool {
        self.traverse_next(self.length())
    }

    fn move_cursor(&mut self, position: Position) {
        self.cursor = position;
        self.notify(|observer| observer.cursor_set(self));
    }

    #[inline]
    fn notify(&self, dispatch: impl FnOnce(&SinglyObserver<T>)) {
        if let Some(observer) = &self.observer {
            dispatch(observer);
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterates the whole chain from the head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
        }
    }

    /// Iterates from `key` to the end of the chain.
    pub fn iter_from(&self, key: usize) -> Result<Iter<'_, T>> {
        self.node(key)?;
        Ok(Iter {
            nodes: &self.nodes,
            next: key,
        })
    }

    /// Iterates from the cursor to the end of the chain.
    pub fn iter_from_cursor(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.cursor.key().unwrap_or(usize::NONE),
        }
    }
}

impl<T> FromIterator<T> for SinglyList<T> {
    /// Builds a chain in iteration order with the cursor on the head.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut last = usize::NONE;
        for value in iter {
            let key = list.nodes.insert(SinglyNode::new(value));
            if last.is_some() {
                list.nodes[last].next = key;
            } else {
                list.head = key;
            }
            last = key;
        }
        list.cursor = Position::from_key(list.head);
        list
    }
}

/// Iterator over values along a [`SinglyList`] chain.
pub struct Iter<'a, T> {
    nodes: &'a Slab<SinglyNode<T>>,
    next: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.next.is_none() {
            return None;
        }
        let node = &self.nodes[self.next];
        self.next = node.next;
        Some(&node.value)
    }
}

/// Deep copy: same keys, same cursor, same observer.
impl<T: Clone> Clone for SinglyList<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            cursor: self.cursor,
            observer: self.observer.clone(),
        }
    }
}

/// Equal when the values from each cursor to the end of each chain are
/// equal. A list whose cursor is past the end equals only another such list.
impl<T: PartialEq> PartialEq for SinglyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cursor.is_past_end() == other.cursor.is_past_end()
            && self.iter_from_cursor().eq(other.iter_from_cursor())
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglyList")
            .field("values", &self.iter().collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("observer", &self.observer)
            .finish()
    }
}

/// `(a) -> (b) -> (c)` from the cursor, or `{}` past the end.
impl<T: fmt::Display> fmt::Display for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cursor.is_past_end() {
            return f.write_str("{}");
        }
        for (i, value) in self.iter_from_cursor().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({value})")?;
        }
        Ok(())
    }
}
