//! Bidirectional linked list with a movable cursor.
//!
//! Nodes live in a `slab::Slab` owned by the list and link to each other by
//! key in both directions. Every relink keeps the chain symmetric: if
//! `next(a) == Some(b)` then `prev(b) == Some(a)`, and the head has no
//! predecessor and the tail no successor.
//!
//! Unlike [`SinglyList`](crate::SinglyList), [`DoublyList::length`] counts
//! the whole chain and does not depend on the cursor.
//!
//! # Traversal events
//!
//! | Call | Outcome | Events, in order |
//! |------|---------|------------------|
//! | `traverse_next(n)` | completes | cursor Set, Traverse(Next) |
//! | `traverse_next(n)` | runs off the tail | NullTraverse, cursor Set (cursor past the end) |
//! | `traverse_prev(n)` | completes | cursor Set, Traverse(Prev) |
//! | `traverse_prev(n)` | runs off the head | NullTraverse (cursor unchanged) |
//!
//! # Example
//!
//! ```
//! use nexus_structs::DoublyList;
//!
//! let mut list: DoublyList<char> = "abcd".chars().collect();
//! assert!(list.traverse_next(3));
//! assert_eq!(list.current(), Some(&'d'));
//!
//! assert!(list.traverse_prev(2));
//! assert_eq!(list.current(), Some(&'b'));
//!
//! // Running off the front leaves the cursor where it was.
//! assert!(!list.traverse_prev(5));
//! assert_eq!(list.current(), Some(&'b'));
//! assert_eq!(list.length(), 4);
//! ```

use std::fmt;
use std::mem;
use std::rc::Rc;

use slab::Slab;

use crate::observer::{Direction, Observer};
use crate::{Error, Key, Position, Result};

/// Observer registry for a [`DoublyList<T>`].
pub type DoublyObserver<T> = Observer<DoublyList<T>, T>;

/// A bidirectional link cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoublyNode<T> {
    value: T,
    prev: usize,
    next: usize,
}

impl<T> DoublyNode<T> {
    #[inline]
    fn new(value: T) -> Self {
        Self {
            value,
            prev: usize::NONE,
            next: usize::NONE,
        }
    }

    /// Returns the node's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the key of the following node, or `None` at the tail.
    #[inline]
    pub fn next(&self) -> Option<usize> {
        self.next.into_option()
    }

    /// Returns the key of the preceding node, or `None` at the head.
    #[inline]
    pub fn prev(&self) -> Option<usize> {
        self.prev.into_option()
    }
}

/// A doubly-linked chain plus one cursor that moves both ways.
pub struct DoublyList<T> {
    nodes: Slab<DoublyNode<T>>,
    head: usize,
    tail: usize,
    cursor: Position,
    observer: Option<Rc<DoublyObserver<T>>>,
}

impl<T> Default for DoublyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyList<T> {
    /// Creates an empty list with the cursor past the end.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            head: usize::NONE,
            tail: usize::NONE,
            cursor: Position::PastEnd,
            observer: None,
        }
    }

    /// Creates an empty list attached to `observer`.
    pub fn with_observer(observer: Rc<DoublyObserver<T>>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new()
        }
    }

    /// Builds a chain from `iter` with the cursor on its head, then attaches
    /// `observer`. No events fire.
    pub fn from_iter_with_observer<I>(iter: I, observer: Rc<DoublyObserver<T>>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list: Self = iter.into_iter().collect();
        list.observer = Some(observer);
        list
    }

    /// Returns the attached observer.
    #[inline]
    pub fn observer(&self) -> Option<&Rc<DoublyObserver<T>>> {
        self.observer.as_ref()
    }

    /// Attaches `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: Rc<DoublyObserver<T>>) {
        self.observer = Some(observer);
    }

    /// Detaches and returns the current observer.
    pub fn clear_observer(&mut self) -> Option<Rc<DoublyObserver<T>>> {
        self.observer.take()
    }

    /// Returns the number of nodes in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the chain has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes in the whole chain, wherever the cursor is.
    ///
    /// The arena holds exactly the chain's nodes, so this equals
    /// [`len`](Self::len).
    #[inline]
    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the key of the first node.
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head.into_option()
    }

    /// Returns the key of the last node.
    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.tail.into_option()
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Returns the node with the given key.
    #[inline]
    pub fn node(&self, key: usize) -> Result<&DoublyNode<T>> {
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
        self.nodes
            .get_mut(key)
            .map(|node| &mut node.value)
            .ok_or(Error::InvalidKey(key))
    }

    /// Replaces a node's value, returning the old one. Fires nothing.
    pub fn set_value(&mut self, key: usize, value: T) -> Result<T> {
        Ok(mem::replace(self.value_mut(key)?, value))
    }

    /// Returns the key following `key`, or `None` at the tail.
    #[inline]
    pub fn next(&self, key: usize) -> Result<Option<usize>> {
        self.node(key).map(DoublyNode::next)
    }

    /// Returns the key preceding `key`, or `None` at the head.
    #[inline]
    pub fn prev(&self, key: usize) -> Result<Option<usize>> {
        self.node(key).map(DoublyNode::prev)
    }

    /// Walks `prev` links from `key` to the first node of its chain.
    pub fn start_of(&self, key: usize) -> Result<usize> {
        let mut key = key;
        loop {
            match self.node(key)?.prev() {
                Some(prev) => key = prev,
                None => return Ok(key),
            }
        }
    }

    /// Walks `next` links from `key` to the last node of its chain.
    pub fn end_of(&self, key: usize) -> Result<usize> {
        let mut key = key;
        loop {
            match self.node(key)?.next() {
                Some(next) => key = next,
                None => return Ok(key),
            }
        }
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Links a new node before the head and returns its key.
    ///
    /// Pushing into an empty list also places the cursor on the new node,
    /// without an event.
    pub fn push_front(&mut self, value: T) -> usize {
        let mut node = DoublyNode::new(value);
        node.next = self.head;
        let key = self.nodes.insert(node);

        if self.head.is_some() {
            self.nodes[self.head].prev = key;
        } else {
            self.tail = key;
            self.cursor = Position::At(key);
        }
        self.head = key;
        key
    }

    /// Links a new node after the tail and returns its key.
    ///
    /// Pushing into an empty list also places the cursor on the new node,
    /// without an event.
    pub fn push_back(&mut self, value: T) -> usize {
        let mut node = DoublyNode::new(value);
        node.prev = self.tail;
        let key = self.nodes.insert(node);

        if self.tail.is_some() {
            self.nodes[self.tail].next = key;
        } else {
            self.head = key;
            self.cursor = Position::At(key);
        }
        self.tail = key;
        key
    }

    /// Links a new node directly after `after` and returns its key.
    pub fn insert_after(&mut self, after: usize, value: T) -> Result<usize> {
        let next = self.node(after)?.next;

        let mut node = DoublyNode::new(value);
        node.prev = after;
        node.next = next;
        let key = self.nodes.insert(node);

        self.nodes[after].next = key;
        if next.is_some() {
            self.nodes[next].prev = key;
        } else {
            self.tail = key;
        }
        Ok(key)
    }

    /// Links a new node directly before `before` and returns its key.
    pub fn insert_before(&mut self, before: usize, value: T) -> Result<usize> {
        let prev = self.node(before)?.prev;

        let mut node = DoublyNode::new(value);
        node.prev = prev;
        node.next = before;
        let key = self.nodes.insert(node);

        self.nodes[before].prev = key;
        if prev.is_some() {
            self.nodes[prev].next = key;
        } else {
            self.head = key;
        }
        Ok(key)
    }

    /// Unlinks and returns the value of the node with key `key`.
    ///
    /// If the cursor was on the removed node it moves, through the
    /// cursor-set path, to the successor, else the predecessor, else past
    /// the end.
    pub fn remove(&mut self, key: usize) -> Result<T> {
        let (prev, next) = {
            let node = self.node(key)?;
            (node.prev, node.next)
        };

        if prev.is_some() {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next.is_some() {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        let node = self.nodes.remove(key);
        if self.cursor == Position::At(key) {
            let target = if next.is_some() { next } else { prev };
            self.move_cursor(Position::from_key(target));
        }
        Ok(node.value)
    }

    /// Drops every node and puts the cursor past the end. Fires nothing.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = usize::NONE;
        self.tail = usize::NONE;
        self.cursor = Position::PastEnd;
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

    /// Moves the cursor `amount` nodes towards the tail.
    ///
    /// Running off the tail fires `NullTraverse`, then sets the cursor past
    /// the end, and returns `false`.
    pub fn traverse_next(&mut self, amount: usize) -> bool {
        match self.walk(amount, Direction::Next) {
            Some(position) => {
                self.move_cursor(position);
                self.notify(|observer| observer.traverse(self, Direction::Next));
                true
            }
            None => {
                tracing::trace!(amount, "traversal ran off the tail");
                self.notify(|observer| observer.null_traverse(self));
                self.move_cursor(Position::PastEnd);
                false
            }
        }
    }

    /// Moves the cursor `amount` nodes towards the head.
    ///
    /// Running off the head fires `NullTraverse`, leaves the cursor where it
    /// was, and returns `false`.
    pub fn traverse_prev(&mut self, amount: usize) -> bool {
        match self.walk(amount, Direction::Prev) {
            Some(position) => {
                self.move_cursor(position);
                self.notify(|observer| observer.traverse(self, Direction::Prev));
                true
            }
            None => {
                tracing::trace!(amount, "traversal ran off the head");
                self.notify(|observer| observer.null_traverse(self));
                false
            }
        }
    }

    /// Returns where `amount` steps from the cursor lead, or `None` if the
    /// chain ends first. Any step from past the end fails.
    fn walk(&self, amount: usize, direction: Direction) -> Option<Position> {
        let mut position = self.cursor;
        for _ in 0..amount {
            let key = position.key()?;
            let node = &self.nodes[key];
            let step = match direction {
                Direction::Next => node.next,
                Direction::Prev => node.prev,
            };
            position = Position::At(step.into_option()?);
        }
        Some(position)
    }

    fn move_cursor(&mut self, position: Position) {
        self.cursor = position;
        self.notify(|observer| observer.cursor_set(self));
    }

    #[inline]
    fn notify(&self, dispatch: impl FnOnce(&DoublyObserver<T>)) {
        if let Some(observer) = &self.observer {
            dispatch(observer);
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterates the whole chain, head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }
}

impl<T> FromIterator<T> for DoublyList<T> {
    /// Builds a chain in iteration order with the cursor on the head.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// Double-ended iterator over the values of a [`DoublyList`].
pub struct Iter<'a, T> {
    nodes: &'a Slab<DoublyNode<T>>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Deep copy: same keys, same cursor, same observer.
impl<T: Clone> Clone for DoublyList<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
            cursor: self.cursor,
            observer: self.observer.clone(),
        }
    }
}

/// Equal when the values under both cursors are equal and the whole chains
/// hold equal values in order.
impl<T: PartialEq> PartialEq for DoublyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current() && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoublyList")
            .field("values", &self.iter().collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("observer", &self.observer)
            .finish()
    }
}

/// `{a} <-> {b} <-> {c}` over the whole chain, or `{}` when empty.
impl<T: fmt::Display> fmt::Display for DoublyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            write!(f, "{{{value}}}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{HandlerResult, OnCursorSet, OnNullTraverse, OnTraverse};
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Seen {
        Traverse(Direction, Option<char>),
        NullTraverse(Option<char>),
        CursorSet(Option<char>),
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Seen>>);

    impl Recorder {
        fn take(&self) -> Vec<Seen> {
            self.0.take()
        }
    }

    impl OnTraverse<DoublyList<char>> for Recorder {
        fn on_traverse(&self, list: &DoublyList<char>, direction: Direction) -> HandlerResult {
            self.0
                .borrow_mut()
                .push(Seen::Traverse(direction, list.current().copied()));
            Ok(())
        }
    }

    impl OnNullTraverse<DoublyList<char>> for Recorder {
        fn on_null_traverse(&self, list: &DoublyList<char>) -> HandlerResult {
            self.0
                .borrow_mut()
                .push(Seen::NullTraverse(list.current().copied()));
            Ok(())
        }
    }

    impl OnCursorSet<DoublyList<char>> for Recorder {
        fn on_cursor_set(&self, list: &DoublyList<char>) -> HandlerResult {
            self.0
                .borrow_mut()
                .push(Seen::CursorSet(list.current().copied()));
            Ok(())
        }
    }

    fn observed(values: &str) -> (DoublyList<char>, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        let observer: DoublyObserver<char> = Observer::new()
            .on_traverse(recorder.clone())
            .on_null_traverse(recorder.clone())
            .on_cursor_set(recorder.clone());
        let list = DoublyList::from_iter_with_observer(values.chars(), Rc::new(observer));
        (list, recorder)
    }

    fn values(list: &DoublyList<char>) -> String {
        list.iter().collect()
    }

    /// Checks link symmetry and head/tail boundaries.
    fn assert_linked<T>(list: &DoublyList<T>) {
        let mut count = 0;
        let mut prev = None;
        let mut key = list.head();
        while let Some(k) = key {
            assert_eq!(list.prev(k).unwrap(), prev);
            prev = Some(k);
            key = list.next(k).unwrap();
            count += 1;
        }
        assert_eq!(list.tail(), prev);
        assert_eq!(count, list.len());
    }

    fn keys(list: &DoublyList<char>) -> Vec<usize> {
        let mut keys = Vec::new();
        let mut key = list.head();
        while let Some(k) = key {
            keys.push(k);
            key = list.next(k).unwrap();
        }
        keys
    }

    #[test]
    fn new_list_is_empty() {
        let list: DoublyList<char> = DoublyList::new();
        assert!(list.is_empty());
        assert_eq!(list.length(), 0);
        assert_eq!(list.current(), None);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert_eq!(list.to_string(), "{}");
    }

    #[test]
    fn push_both_ends() {
        let mut list = DoublyList::new();
        list.push_back('b');
        list.push_back('c');
        list.push_front('a');

        assert_eq!(values(&list), "abc");
        assert_eq!(list.current(), Some(&'b'));
        assert_linked(&list);
    }

    #[test]
    fn insert_keeps_symmetry() {
        let mut list: DoublyList<char> = "ad".chars().collect();
        let k = keys(&list);
        let (a, d) = (k[0], k[1]);

        let b = list.insert_after(a, 'b').unwrap();
        list.insert_before(d, 'c').unwrap();
        list.insert_before(a, '<').unwrap();
        list.insert_after(d, '>').unwrap();

        assert_eq!(values(&list), "<abcd>");
        assert_eq!(list.prev(b), Ok(Some(a)));
        assert_eq!(list.next(a), Ok(Some(b)));
        assert_linked(&list);
    }

    #[test]
    fn insert_with_stale_key() {
        let mut list: DoublyList<char> = "a".chars().collect();
        assert_eq!(list.insert_after(7, 'x'), Err(Error::InvalidKey(7)));
        assert_eq!(list.insert_before(7, 'x'), Err(Error::InvalidKey(7)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_relinks_neighbours() {
        let mut list: DoublyList<char> = "abcde".chars().collect();
        let k = keys(&list);

        assert_eq!(list.remove(k[2]), Ok('c'));
        assert_linked(&list);
        assert_eq!(list.remove(k[0]), Ok('a'));
        assert_linked(&list);
        assert_eq!(list.remove(k[4]), Ok('e'));
        assert_linked(&list);

        assert_eq!(values(&list), "bd");
        assert_eq!(list.head(), Some(k[1]));
        assert_eq!(list.tail(), Some(k[3]));
        assert_eq!(list.remove(k[4]), Err(Error::InvalidKey(k[4])));
    }

    #[test]
    fn remove_under_cursor() {
        let (mut list, recorder) = observed("abc");
        let k = keys(&list);
        list.set_current(Some(k[2])).unwrap();
        recorder.take();

        list.remove(k[2]).unwrap();
        assert_eq!(list.current(), Some(&'b'));

        list.remove(k[1]).unwrap();
        assert_eq!(list.current(), Some(&'a'));

        list.remove(k[0]).unwrap();
        assert_eq!(list.current(), None);

        assert_eq!(
            recorder.take(),
            vec![
                Seen::CursorSet(Some('b')),
                Seen::CursorSet(Some('a')),
                Seen::CursorSet(None)
            ]
        );
    }

    #[test]
    fn start_and_end_of() {
        let list: DoublyList<char> = "abcd".chars().collect();
        let k = keys(&list);

        assert_eq!(list.start_of(k[2]), Ok(k[0]));
        assert_eq!(list.end_of(k[1]), Ok(k[3]));
        assert_eq!(list.start_of(k[0]), Ok(k[0]));
        assert_eq!(list.end_of(k[3]), Ok(k[3]));
        assert!(list.start_of(usize::NONE).is_err());
    }

    #[test]
    fn length_ignores_cursor() {
        let mut list: DoublyList<char> = "abcd".chars().collect();
        list.traverse_next(3);
        assert_eq!(list.length(), 4);

        list.traverse_next(1);
        assert_eq!(list.current(), None);
        assert_eq!(list.length(), 4);
    }

    #[test]
    fn traverse_next_events() {
        let (mut list, recorder) = observed("abc");

        assert!(list.traverse_next(2));

        assert_eq!(list.current(), Some(&'c'));
        assert_eq!(
            recorder.take(),
            vec![
                Seen::CursorSet(Some('c')),
                Seen::Traverse(Direction::Next, Some('c'))
            ]
        );
    }

    #[test]
    fn traverse_next_off_the_tail() {
        let (mut list, recorder) = observed("abc");

        assert!(!list.traverse_next(3));

        assert_eq!(list.position(), Position::PastEnd);
        assert_eq!(
            recorder.take(),
            vec![Seen::NullTraverse(Some('a')), Seen::CursorSet(None)]
        );
    }

    #[test]
    fn traverse_prev_events() {
        let (mut list, recorder) = observed("abc");
        list.traverse_next(2);
        recorder.take();

        assert!(list.traverse_prev(1));

        assert_eq!(list.current(), Some(&'b'));
        assert_eq!(
            recorder.take(),
            vec![
                Seen::CursorSet(Some('b')),
                Seen::Traverse(Direction::Prev, Some('b'))
            ]
        );
    }

    #[test]
    fn traverse_prev_off_the_head_keeps_cursor() {
        let (mut list, recorder) = observed("abc");
        list.traverse_next(1);
        recorder.take();

        assert!(!list.traverse_prev(2));

        assert_eq!(list.current(), Some(&'b'));
        assert_eq!(recorder.take(), vec![Seen::NullTraverse(Some('b'))]);
    }

    #[test]
    fn traverse_from_past_end_fails_both_ways() {
        let (mut list, recorder) = observed("ab");
        list.set_current(None).unwrap();
        recorder.take();

        assert!(!list.traverse_prev(1));
        assert!(!list.traverse_next(1));
        assert_eq!(
            recorder.take(),
            vec![
                Seen::NullTraverse(None),
                Seen::NullTraverse(None),
                Seen::CursorSet(None)
            ]
        );
    }

    #[test]
    fn set_current_coerces_none_to_past_end() {
        let (mut list, recorder) = observed("ab");

        list.set_current(None).unwrap();

        assert_eq!(list.position(), Position::PastEnd);
        assert_eq!(recorder.take(), vec![Seen::CursorSet(None)]);
        assert_eq!(list.set_current(Some(99)), Err(Error::InvalidKey(99)));
    }

    #[test]
    fn iter_both_directions() {
        let list: DoublyList<char> = "abcd".chars().collect();

        assert_eq!(list.iter().rev().collect::<String>(), "dcba");
        assert_eq!(list.iter().len(), 4);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&'a'));
        assert_eq!(iter.next_back(), Some(&'d'));
        assert_eq!(iter.next(), Some(&'b'));
        assert_eq!(iter.next_back(), Some(&'c'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn equality_compares_cursor_value_and_chain() {
        let mut a: DoublyList<char> = "abc".chars().collect();
        let mut b: DoublyList<char> = "abc".chars().collect();
        assert_eq!(a, b);

        a.traverse_next(1);
        assert_ne!(a, b);

        b.traverse_next(1);
        assert_eq!(a, b);

        let c: DoublyList<char> = "abd".chars().collect();
        let d: DoublyList<char> = "abc".chars().collect();
        assert_ne!(c, d);
    }

    #[test]
    fn clone_is_independent() {
        let (original, _recorder) = observed("abc");
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert!(Rc::ptr_eq(
            original.observer().unwrap(),
            copy.observer().unwrap()
        ));

        let head = copy.head().unwrap();
        copy.remove(head).unwrap();
        copy.push_back('z');

        assert_eq!(values(&original), "abc");
        assert_eq!(original.length(), 3);
        assert_eq!(original.current(), Some(&'a'));
        assert_eq!(values(&copy), "bcz");
    }

    #[test]
    fn display_whole_chain() {
        let mut list: DoublyList<char> = "xyz".chars().collect();
        list.traverse_next(2);
        assert_eq!(list.to_string(), "{x} <-> {y} <-> {z}");
    }

    #[test]
    fn node_values() {
        let mut list: DoublyList<char> = "ab".chars().collect();
        let head = list.head().unwrap();

        assert_eq!(list.value(head), Ok(&'a'));
        assert_eq!(list.set_value(head, 'A'), Ok('a'));
        assert_eq!(list.node(head).unwrap().value(), &'A');
        assert_eq!(list.node(head).unwrap().prev(), None);
        assert_eq!(list.node(head).unwrap().next(), list.tail());
    }

    #[test]
    fn clear_resets() {
        let mut list: DoublyList<char> = "ab".chars().collect();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
        assert_linked(&list);
    }
}
