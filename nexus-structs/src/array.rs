//! Index-addressable sequence with exact-length storage.
//!
//! [`DynArray`] keeps its elements in a boxed slice whose length is always
//! the logical element count. Every structural mutation rebuilds the slice
//! at its new exact length; there is no spare capacity.
//!
//! # Events
//!
//! | Operation | Event | Payload |
//! |-----------|-------|---------|
//! | `add` | Added | item, previous length |
//! | `insert` | Added | item, index |
//! | `remove`, `remove_all` | Removed | item, index |
//! | `remove_last` | Removed / InvalidIndex | item, last index |
//! | `set` | Set (before the store changes) | new item, index |
//! | `clear` | - | - |
//!
//! # Example
//!
//! ```
//! use nexus_structs::DynArray;
//!
//! let mut array: DynArray<u32> = [10, 20, 30].into_iter().collect();
//!
//! assert_eq!(array.remove(1), Ok(20));
//! assert_eq!(array.as_slice(), &[10, 30]);
//!
//! array.insert(1, 15).unwrap();
//! assert_eq!(array.as_slice(), &[10, 15, 30]);
//! assert!(array.get(3).is_err());
//! ```

use std::fmt;
use std::mem;
use std::ops::Index;
use std::rc::Rc;

use crate::observer::{Observer, same_observer};
use crate::{Error, Result};

/// Observer registry for a [`DynArray<T>`].
pub type ArrayObserver<T> = Observer<DynArray<T>, T>;

/// A resizable flat sequence that notifies an optional observer.
///
/// Elements that may be absent are modelled as `DynArray<Option<U>>`;
/// [`get`](Self::get) then yields `&None` for an absent element, while an
/// index past the end is an [`Error::IndexOutOfBounds`].
pub struct DynArray<T> {
    store: Box<[T]>,
    observer: Option<Rc<ArrayObserver<T>>>,
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynArray<T> {
    /// Creates an empty array with no observer.
    pub fn new() -> Self {
        Self {
            store: Box::default(),
            observer: None,
        }
    }

    /// Creates an empty array attached to `observer`.
    pub fn with_observer(observer: Rc<ArrayObserver<T>>) -> Self {
        Self {
            store: Box::default(),
            observer: Some(observer),
        }
    }

    /// Collects `iter` and then attaches `observer`.
    ///
    /// No events fire for the initial elements.
    pub fn from_iter_with_observer<I>(iter: I, observer: Rc<ArrayObserver<T>>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            store: iter.into_iter().collect(),
            observer: Some(observer),
        }
    }

    /// Returns the attached observer.
    #[inline]
    pub fn observer(&self) -> Option<&Rc<ArrayObserver<T>>> {
        self.observer.as_ref()
    }

    /// Attaches `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: Rc<ArrayObserver<T>>) {
        self.observer = Some(observer);
    }

    /// Detaches and returns the current observer.
    pub fn clear_observer(&mut self) -> Option<Rc<ArrayObserver<T>>> {
        self.observer.take()
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.iter()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends `item`.
    ///
    /// Fires `Added(item, previous length)`.
    pub fn add(&mut self, item: T) {
        let index = self.len();
        let mut store = mem::take(&mut self.store).into_vec();
        store.reserve_exact(1);
        store.push(item);
        self.store = store.into_boxed_slice();

        self.notify(|observer| observer.added(self, &self.store[index], index));
    }

    /// Inserts `item` at `index`, shifting every later element one place back.
    ///
    /// `index == len()` appends. Fires `Added(item, index)`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index > len()`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        let mut store = mem::take(&mut self.store).into_vec();
        store.reserve_exact(1);
        store.insert(index, item);
        self.store = store.into_boxed_slice();

        self.notify(|observer| observer.added(self, &self.store[index], index));
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// On an empty array nothing changes, `InvalidIndex` fires and `None`
    /// is returned. Removing the only element goes through [`clear`] and
    /// fires nothing; otherwise `Removed(item, len - 1)` fires.
    ///
    /// [`clear`]: Self::clear
    pub fn remove_last(&mut self) -> Option<T> {
        match self.len() {
            0 => {
                tracing::trace!("remove_last on empty array");
                self.notify(|observer| observer.invalid_index(self));
                None
            }
            1 => {
                let item = mem::take(&mut self.store).into_vec().pop();
                self.clear();
                item
            }
            len => {
                let mut store = mem::take(&mut self.store).into_vec();
                let item = store.pop();
                self.store = store.into_boxed_slice();

                if let Some(item) = &item {
                    self.notify(|observer| observer.removed(self, item, len - 1));
                }
                item
            }
        }
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// one place forward.
    ///
    /// Fires `Removed(item, index)`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        let mut store = mem::take(&mut self.store).into_vec();
        let item = store.remove(index);
        self.store = store.into_boxed_slice();

        self.notify(|observer| observer.removed(self, &item, index));
        Ok(item)
    }

    /// Overwrites the element at `index`, returning the old value.
    ///
    /// `Set(item, index)` fires before the store changes, so the handler
    /// still sees the old element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        self.notify(|observer| observer.set(self, &item, index));
        Ok(mem::replace(&mut self.store[index], item))
    }

    /// Removes every element. Fires nothing.
    pub fn clear(&mut self) {
        self.store = Box::default();
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.store
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Writing through the reference fires no event.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.store
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    #[inline]
    fn notify(&self, dispatch: impl FnOnce(&ArrayObserver<T>)) {
        if let Some(observer) = &self.observer {
            dispatch(observer);
        }
    }
}

impl<T: PartialEq> DynArray<T> {
    /// Returns `true` if any element equals `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.store.iter().any(|x| x == item)
    }

    /// Counts the elements equal to `item`.
    pub fn occurrences_of(&self, item: &T) -> usize {
        self.store.iter().filter(|x| *x == item).count()
    }

    /// Returns the indices of every element equal to `item`, ascending.
    pub fn indexes_of(&self, item: &T) -> Vec<usize> {
        let mut indexes = Vec::with_capacity(self.occurrences_of(item));
        for (index, x) in self.store.iter().enumerate() {
            if x == item {
                indexes.push(index);
            }
        }
        indexes
    }

    /// Removes every element equal to `item`, keeping the order of the rest.
    ///
    /// Fires one `Removed` per occurrence, with the index the element had
    /// at the moment it was removed. Returns the number removed.
    pub fn remove_all(&mut self, item: &T) -> usize {
        let indexes = self.indexes_of(item);
        for (offset, index) in indexes.iter().enumerate() {
            let removed = self.remove(index - offset);
            debug_assert!(removed.is_ok());
        }
        indexes.len()
    }
}

impl<T: Clone> DynArray<T> {
    /// Creates an array holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Self {
        Self {
            store: items.into(),
            observer: None,
        }
    }

    /// Copies the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.store.to_vec()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.store[index]
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            store: iter.into_iter().collect(),
            observer: None,
        }
    }
}

impl<T> Extend<T> for DynArray<T> {
    /// Adds each item in turn; one `Added` fires per item.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_vec().into_iter()
    }
}

/// Copies the store; the clone shares the same observer.
impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            observer: self.observer.clone(),
        }
    }
}

/// Equal when the elements are equal and both arrays hold the same observer
/// (by identity), or neither holds one.
impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && same_observer(&self.observer, &other.observer)
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("store", &self.store)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.store.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}
