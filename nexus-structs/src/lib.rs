//! Observable containers with arena-backed links.
//!
//! Four containers, each owning its elements:
//!
//! | Container | Shape | Addressing |
//! |-----------|-------|------------|
//! | [`DynArray`] | exact-fit array, reallocates on every size change | index |
//! | [`SinglyList`] | forward chain plus one cursor | stable `usize` key |
//! | [`DoublyList`] | bidirectional chain plus one cursor | stable `usize` key |
//! | [`Tree`] | rooted nodes with parent link and child list | stable `usize` key |
//!
//! Linked nodes live in a `slab::Slab` owned by the container and point at
//! each other by key. A key stays valid until its node is removed; links use
//! [`Key::NONE`] as the "no node" sentinel.
//!
//! # Observers
//!
//! Arrays and lists can carry an [`Observer`]: a registry holding at most
//! one handler per event kind, shared through an `Rc`. Handlers implement
//! one capability trait per event ([`OnAdded`], [`OnRemoved`], [`OnSet`],
//! [`OnInvalidIndex`], [`OnTraverse`], [`OnNullTraverse`], [`OnCursorSet`])
//! and are registered with builder methods:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use nexus_structs::{Direction, HandlerResult, Observer, OnTraverse, SinglyList};
//!
//! #[derive(Default)]
//! struct Steps(Cell<usize>);
//!
//! impl OnTraverse<SinglyList<u8>> for Steps {
//!     fn on_traverse(&self, _: &SinglyList<u8>, _: Direction) -> HandlerResult {
//!         self.0.set(self.0.get() + 1);
//!         Ok(())
//!     }
//! }
//!
//! let steps = Rc::new(Steps::default());
//! let observer = Rc::new(Observer::new().on_traverse(steps.clone()));
//! let mut list = SinglyList::from_iter_with_observer([1u8, 2, 3], observer);
//!
//! list.traverse_next(1);
//! list.traverse_next(1);
//! assert_eq!(steps.0.get(), 2);
//! ```
//!
//! Handlers see the container by shared reference only, so they cannot
//! mutate it mid-operation. A handler that returns `Err` does not abort the
//! operation: the failure goes to the observer's [`Reporter`], which logs
//! through `tracing` unless replaced with [`Observer::with_reporter`].
//!
//! # Errors
//!
//! Index and key misuse returns [`Error`]. Checks run before any state
//! change or event.

#![warn(missing_docs)]

pub mod array;
pub mod doubly;
pub mod error;
pub mod key;
pub mod observer;
pub mod position;
pub mod singly;
pub mod tree;

pub use array::{ArrayObserver, DynArray};
pub use doubly::{DoublyList, DoublyNode, DoublyObserver};
pub use error::{Error, Result};
pub use key::Key;
pub use observer::{
    Direction, EventKind, HandlerError, HandlerResult, Observer, ObserverFailure, OnAdded,
    OnCursorSet, OnInvalidIndex, OnNullTraverse, OnRemoved, OnSet, OnTraverse, Reporter,
    TracingReporter,
};
pub use position::Position;
pub use singly::{SinglyList, SinglyNode, SinglyObserver};
pub use tree::{NodeType, Tree, TreeNode};
