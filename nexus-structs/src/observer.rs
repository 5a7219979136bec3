//! Typed change notification for containers.
//!
//! Every container can hold one [`Observer`]: a registry with one optional
//! handler slot per event kind. A handler is any type implementing the
//! matching capability trait, so an observer implements exactly the subset
//! of events it cares about and the container calls those slots directly.
//!
//! ```text
//! OnAdded<C, T>        (container, item, index)   DynArray
//! OnRemoved<C, T>      (container, item, index)   DynArray
//! OnSet<C, T>          (container, item, index)   DynArray
//! OnInvalidIndex<C>    (container)                DynArray
//! OnTraverse<C>        (container, direction)     SinglyList, DoublyList
//! OnNullTraverse<C>    (container)                SinglyList, DoublyList
//! OnCursorSet<C>       (container)                SinglyList, DoublyList
//! ```
//!
//! Handlers run synchronously inside the mutating call and only see `&C`,
//! so they cannot mutate the container that is notifying them. A handler
//! that returns an error does not abort the mutation: the error is wrapped
//! in an [`ObserverFailure`] and handed to the observer's [`Reporter`]
//! ([`TracingReporter`] unless another one is injected).
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use nexus_structs::{DynArray, HandlerResult, OnAdded, Observer};
//!
//! #[derive(Default)]
//! struct Log(RefCell<Vec<(u32, usize)>>);
//!
//! impl OnAdded<DynArray<u32>, u32> for Log {
//!     fn on_added(&self, _: &DynArray<u32>, item: &u32, index: usize) -> HandlerResult {
//!         self.0.borrow_mut().push((*item, index));
//!         Ok(())
//!     }
//! }
//!
//! let log = Rc::new(Log::default());
//! let observer = Rc::new(Observer::new().on_added(log.clone()));
//! let mut array: DynArray<u32> = DynArray::with_observer(observer);
//!
//! array.add(10);
//! array.add(20);
//! assert_eq!(*log.0.borrow(), vec![(10, 0), (20, 1)]);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

/// Error type returned by a failing handler.
pub type HandlerError = Box<dyn StdError + 'static>;

/// Return type of every handler.
pub type HandlerResult = Result<(), HandlerError>;

/// The closed set of structural-change categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An element was added to a [`DynArray`](crate::DynArray).
    Added,
    /// An element was removed from a [`DynArray`](crate::DynArray).
    Removed,
    /// An element was overwritten, or a list cursor was repositioned.
    Set,
    /// Removal was requested from an empty [`DynArray`](crate::DynArray).
    InvalidIndex,
    /// A list traversal completed.
    Traverse,
    /// A list traversal ran off the end of its chain.
    NullTraverse,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Added => "added",
            EventKind::Removed => "removed",
            EventKind::Set => "set",
            EventKind::InvalidIndex => "invalid index",
            EventKind::Traverse => "traverse",
            EventKind::NullTraverse => "null traverse",
        };
        f.write_str(name)
    }
}

/// Direction of a completed traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the chain.
    Next,
    /// Towards the start of the chain.
    Prev,
}

/// Called after an element is added at `index`.
pub trait OnAdded<C: ?Sized, T: ?Sized> {
    /// Handles the event.
    fn on_added(&self, container: &C, item: &T, index: usize) -> HandlerResult;
}

/// Called after the element `item` is removed from `index`.
pub trait OnRemoved<C: ?Sized, T: ?Sized> {
    /// Handles the event.
    fn on_removed(&self, container: &C, item: &T, index: usize) -> HandlerResult;
}

/// Called before `item` is stored at `index`; `container` still holds the
/// old value.
pub trait OnSet<C: ?Sized, T: ?Sized> {
    /// Handles the event.
    fn on_set(&self, container: &C, item: &T, index: usize) -> HandlerResult;
}

/// Called when removal is requested from an empty container.
pub trait OnInvalidIndex<C: ?Sized> {
    /// Handles the event.
    fn on_invalid_index(&self, container: &C) -> HandlerResult;
}

/// Called after a traversal completes without running off the chain.
pub trait OnTraverse<C: ?Sized> {
    /// Handles the event.
    fn on_traverse(&self, container: &C, direction: Direction) -> HandlerResult;
}

/// Called when a traversal runs off the chain.
pub trait OnNullTraverse<C: ?Sized> {
    /// Handles the event.
    fn on_null_traverse(&self, container: &C) -> HandlerResult;
}

/// Called whenever a list cursor is assigned.
pub trait OnCursorSet<C: ?Sized> {
    /// Handles the event.
    fn on_cursor_set(&self, container: &C) -> HandlerResult;
}

/// A handler error caught at the dispatch site.
#[derive(Debug)]
pub struct ObserverFailure {
    /// Event whose handler failed.
    pub event: EventKind,
    /// Error returned by the handler.
    pub source: HandlerError,
}

impl fmt::Display for ObserverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} handler failed: {}", self.event, self.source)
    }
}

impl StdError for ObserverFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Receives handler failures that dispatch swallowed.
pub trait Reporter {
    /// Reports one failure.
    fn report(&self, failure: ObserverFailure);
}

/// Default [`Reporter`]: logs each failure at `WARN` through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, failure: ObserverFailure) {
        tracing::warn!(
            event = %failure.event,
            error = %failure.source,
            "observer handler failed"
        );
    }
}

/// Handler registry attached to a container of type `C` holding `T`.
///
/// Built once and shared through an `Rc`; containers compare observers by
/// identity and clones keep the same registry.
pub struct Observer<C: ?Sized, T: ?Sized = ()> {
    added: Option<Rc<dyn OnAdded<C, T>>>,
    removed: Option<Rc<dyn OnRemoved<C, T>>>,
    set: Option<Rc<dyn OnSet<C, T>>>,
    invalid_index: Option<Rc<dyn OnInvalidIndex<C>>>,
    traverse: Option<Rc<dyn OnTraverse<C>>>,
    null_traverse: Option<Rc<dyn OnNullTraverse<C>>>,
    cursor_set: Option<Rc<dyn OnCursorSet<C>>>,
    reporter: Rc<dyn Reporter>,
}

impl<C: ?Sized, T: ?Sized> Default for Observer<C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized, T: ?Sized> Observer<C, T> {
    /// Creates an observer with no handlers and a [`TracingReporter`].
    pub fn new() -> Self {
        Self {
            added: None,
            removed: None,
            set: None,
            invalid_index: None,
            traverse: None,
            null_traverse: None,
            cursor_set: None,
            reporter: Rc::new(TracingReporter),
        }
    }

    /// Registers the [`EventKind::Added`] handler.
    pub fn on_added<H: OnAdded<C, T> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.added = Some(handler);
        self
    }

    /// Registers the [`EventKind::Removed`] handler.
    pub fn on_removed<H: OnRemoved<C, T> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.removed = Some(handler);
        self
    }

    /// Registers the payload-carrying [`EventKind::Set`] handler.
    pub fn on_set<H: OnSet<C, T> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.set = Some(handler);
        self
    }

    /// Registers the [`EventKind::InvalidIndex`] handler.
    pub fn on_invalid_index<H: OnInvalidIndex<C> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.invalid_index = Some(handler);
        self
    }

    /// Registers the [`EventKind::Traverse`] handler.
    pub fn on_traverse<H: OnTraverse<C> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.traverse = Some(handler);
        self
    }

    /// Registers the [`EventKind::NullTraverse`] handler.
    pub fn on_null_traverse<H: OnNullTraverse<C> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.null_traverse = Some(handler);
        self
    }

    /// Registers the cursor [`EventKind::Set`] handler.
    pub fn on_cursor_set<H: OnCursorSet<C> + 'static>(mut self, handler: Rc<H>) -> Self {
        self.cursor_set = Some(handler);
        self
    }

    /// Replaces the failure reporter.
    pub fn with_reporter<R: Reporter + 'static>(mut self, reporter: Rc<R>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns `true` if a handler is registered for `event`.
    ///
    /// For [`EventKind::Set`] either the payload or the cursor handler counts.
    pub fn handles(&self, event: EventKind) -> bool {
        match event {
            EventKind::Added => self.added.is_some(),
            EventKind::Removed => self.removed.is_some(),
            EventKind::Set => self.set.is_some() || self.cursor_set.is_some(),
            EventKind::InvalidIndex => self.invalid_index.is_some(),
            EventKind::Traverse => self.traverse.is_some(),
            EventKind::NullTraverse => self.null_traverse.is_some(),
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    pub(crate) fn added(&self, container: &C, item: &T, index: usize) {
        if let Some(handler) = &self.added {
            self.check(EventKind::Added, handler.on_added(container, item, index));
        }
    }

    pub(crate) fn removed(&self, container: &C, item: &T, index: usize) {
        if let Some(handler) = &self.removed {
            self.check(EventKind::Removed, handler.on_removed(container, item, index));
        }
    }

    pub(crate) fn set(&self, container: &C, item: &T, index: usize) {
        if let Some(handler) = &self.set {
            self.check(EventKind::Set, handler.on_set(container, item, index));
        }
    }

    pub(crate) fn invalid_index(&self, container: &C) {
        if let Some(handler) = &self.invalid_index {
            self.check(EventKind::InvalidIndex, handler.on_invalid_index(container));
        }
    }

    pub(crate) fn traverse(&self, container: &C, direction: Direction) {
        if let Some(handler) = &self.traverse {
            self.check(EventKind::Traverse, handler.on_traverse(container, direction));
        }
    }

    pub(crate) fn null_traverse(&self, container: &C) {
        if let Some(handler) = &self.null_traverse {
            self.check(EventKind::NullTraverse, handler.on_null_traverse(container));
        }
    }

    pub(crate) fn cursor_set(&self, container: &C) {
        if let Some(handler) = &self.cursor_set {
            self.check(EventKind::Set, handler.on_cursor_set(container));
        }
    }

    #[inline]
    fn check(&self, event: EventKind, result: HandlerResult) {
        if let Err(source) = result {
            self.reporter.report(ObserverFailure { event, source });
        }
    }
}

impl<C: ?Sized, T: ?Sized> fmt::Debug for Observer<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("added", &self.added.is_some())
            .field("removed", &self.removed.is_some())
            .field("set", &self.set.is_some())
            .field("invalid_index", &self.invalid_index.is_some())
            .field("traverse", &self.traverse.is_some())
            .field("null_traverse", &self.null_traverse.is_some())
            .field("cursor_set", &self.cursor_set.is_some())
            .finish_non_exhaustive()
    }
}

/// Compares two optional observers by identity.
pub(crate) fn same_observer<C: ?Sized, T: ?Sized>(
    a: &Option<Rc<Observer<C, T>>>,
    b: &Option<Rc<Observer<C, T>>>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
