//! Pyramidal heap facade
//!
//! [`PyramidalHeap`] wraps any [`Heap`] engine and forwards every call to it.
//! The only thing it adds is error labelling: failures come back as a
//! [`PyramidError`] naming the operation that failed, with the engine's
//! [`HeapError`] kept intact as the source.
//!
//! # Example
//!
//! ```rust
//! use rust_tree_heaps::{HeapError, Operation, PyramidalHeap};
//!
//! let mut heap: PyramidalHeap<i32> = PyramidalHeap::bounded(1);
//! heap.insert(10).unwrap();
//!
//! let err = heap.insert(20).unwrap_err();
//! assert_eq!(err.operation(), Operation::Insert);
//! assert_eq!(err.kind(), &HeapError::CapacityExceeded { capacity: 1 });
//! assert_eq!(
//!     err.to_string(),
//!     "pyramidal heap cannot insert: heap is full (capacity 1)"
//! );
//! ```

use crate::render::Drawing;
use crate::traits::{Heap, HeapError, Layout};
use crate::tree::TreeHeap;
use std::fmt;
use thiserror::Error;

/// The facade operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Remove,
    Change,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Insert => "insert",
            Operation::Remove => "remove",
            Operation::Change => "change",
        })
    }
}

/// Error returned by [`PyramidalHeap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pyramidal heap cannot {operation}: {source}")]
pub struct PyramidError {
    operation: Operation,
    #[source]
    source: HeapError,
}

impl PyramidError {
    /// The operation that failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The engine failure, unchanged
    pub fn kind(&self) -> &HeapError {
        &self.source
    }
}

/// Facade over a heap engine, [`TreeHeap`] by default
///
/// # Type Parameters
/// - `T`: The value type
/// - `H`: The engine (e.g., `TreeHeap<T>` or `ArrayHeap<T>`)
pub struct PyramidalHeap<T: Ord, H: Heap<T> = TreeHeap<T>> {
    heap: H,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Ord, H: Heap<T>> PyramidalHeap<T, H> {
    /// Creates a new, empty, unbounded heap
    pub fn new() -> Self {
        Self::from_engine(H::new())
    }

    /// Creates a new, empty heap holding at most `capacity` values
    pub fn bounded(capacity: usize) -> Self {
        Self::from_engine(H::bounded(capacity))
    }

    /// Wraps an existing engine
    pub fn from_engine(heap: H) -> Self {
        Self {
            heap,
            _phantom: std::marker::PhantomData,
        }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &H {
        &self.heap
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if another insert would fail
    pub fn is_full(&self) -> bool {
        self.heap.is_full()
    }

    /// Inserts a value
    pub fn insert(&mut self, value: T) -> Result<(), PyramidError> {
        self.heap.insert(value).map_err(|source| PyramidError {
            operation: Operation::Insert,
            source,
        })
    }

    /// Removes and returns the maximum
    pub fn remove(&mut self) -> Result<T, PyramidError> {
        self.heap.remove().map_err(|source| PyramidError {
            operation: Operation::Remove,
            source,
        })
    }

    /// Overwrites the value at position `index`, returning the old value
    pub fn change(&mut self, index: usize, value: T) -> Result<T, PyramidError> {
        self.heap.change(index, value).map_err(|source| PyramidError {
            operation: Operation::Change,
            source,
        })
    }

    /// Returns the maximum without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Returns the value at position `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.heap.get(index)
    }

    /// Consumes the facade, returning the engine
    pub fn into_engine(self) -> H {
        self.heap
    }
}

impl<T: Ord, H: Heap<T> + Layout<T>> PyramidalHeap<T, H> {
    /// Renders the heap; `None` means it is empty and nothing was drawn.
    pub fn draw(&self) -> Option<Drawing>
    where
        T: fmt::Display,
    {
        self.heap.render()
    }

    /// In-order traversal; `None` means the heap is empty.
    pub fn in_order(&self) -> Option<H::InOrder<'_>> {
        (!self.heap.is_empty()).then(|| self.heap.in_order())
    }
}

impl<T: Ord, H: Heap<T>> Default for PyramidalHeap<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, H: Heap<T> + fmt::Debug> fmt::Debug for PyramidalHeap<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PyramidalHeap").field(&self.heap).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayHeap;
    use std::error::Error;

    #[test]
    fn test_forwards_operations() {
        let mut heap: PyramidalHeap<i32> = PyramidalHeap::new();
        assert!(heap.is_empty());
        for v in [70, 40, 50, 20, 60, 100, 80, 30, 10, 90, 53] {
            heap.insert(v).unwrap();
        }
        assert_eq!(heap.len(), 11);
        assert!(!heap.is_full());
        assert_eq!(heap.peek(), Some(&100));
        assert_eq!(heap.get(10), Some(&53));
        assert_eq!(heap.change(10, 99), Ok(53));
        assert_eq!(heap.remove(), Ok(100));
        assert_eq!(heap.remove(), Ok(99));
        assert!(heap.engine().verify_internal_structure());
    }

    #[test]
    fn test_remove_error_keeps_kind() {
        let mut heap: PyramidalHeap<i32> = PyramidalHeap::new();
        let err = heap.remove().unwrap_err();
        assert_eq!(err.operation(), Operation::Remove);
        assert_eq!(err.kind(), &HeapError::EmptyContainer);
        assert_eq!(err.to_string(), "pyramidal heap cannot remove: heap is empty");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("heap is empty".to_string())
        );
    }

    #[test]
    fn test_change_errors() {
        let mut heap: PyramidalHeap<i32> = PyramidalHeap::new();
        assert_eq!(
            heap.change(0, 5).unwrap_err().kind(),
            &HeapError::EmptyContainer
        );
        heap.insert(1).unwrap();
        let err = heap.change(5, 9).unwrap_err();
        assert_eq!(err.operation(), Operation::Change);
        assert_eq!(err.kind(), &HeapError::InvalidIndex { index: 5, len: 1 });
    }

    #[test]
    fn test_draw_and_in_order() {
        let mut heap: PyramidalHeap<i32> = PyramidalHeap::new();
        assert!(heap.draw().is_none());
        assert!(heap.in_order().is_none());

        for v in [3, 1, 2] {
            heap.insert(v).unwrap();
        }
        assert_eq!(
            heap.draw().unwrap().to_string(),
            "      3\n   1    2"
        );
        assert_eq!(
            heap.in_order().unwrap().copied().collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn test_array_engine() {
        let mut heap: PyramidalHeap<i32, ArrayHeap<i32>> = PyramidalHeap::bounded(2);
        heap.insert(1).unwrap();
        heap.insert(2).unwrap();
        assert!(heap.is_full());
        assert_eq!(
            heap.insert(3).unwrap_err().kind(),
            &HeapError::CapacityExceeded { capacity: 2 }
        );
        assert_eq!(heap.draw().unwrap().lines(), ["      2", "   1"]);
        assert_eq!(
            heap.in_order().unwrap().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(heap.into_engine().into_sorted_vec(), vec![2, 1]);
    }

    #[test]
    fn test_engines_agree_through_facade() {
        let mut tree: PyramidalHeap<i32> = PyramidalHeap::new();
        let mut array: PyramidalHeap<i32, ArrayHeap<i32>> = PyramidalHeap::new();
        assert!(array.draw().is_none());
        assert!(array.in_order().is_none());

        for v in [70, 40, 50, 20, 60, 100, 80, 30, 10, 90, 53] {
            tree.insert(v).unwrap();
            array.insert(v).unwrap();
        }
        assert_eq!(tree.change(8, 120), array.change(8, 120));
        assert_eq!(tree.draw(), array.draw());
        assert_eq!(
            tree.in_order().unwrap().collect::<Vec<_>>(),
            array.in_order().unwrap().collect::<Vec<_>>()
        );
    }
}
