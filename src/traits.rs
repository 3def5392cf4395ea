//! Common traits for max-heap containers
//!
//! [`Heap`] is the contract shared by the linked [`TreeHeap`](crate::tree::TreeHeap)
//! and the flat [`ArrayHeap`](crate::array::ArrayHeap). Both address elements by
//! *position*: index `i` is the `i`-th slot of the complete binary tree in level
//! order, not the `i`-th largest value.
//!
//! Every fallible operation checks its preconditions before touching the
//! structure, so an `Err` never leaves a half-finished mutation behind.

use crate::render::Drawing;
use std::fmt;
use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// Insertion attempted while the heap holds `capacity` elements
    #[error("heap is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    /// Removal or update attempted on an empty heap
    #[error("heap is empty")]
    EmptyContainer,
    /// Update attempted at a position outside `0..len`
    #[error("index {index} is out of bounds for heap of length {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Base trait for bounded or unbounded max-heaps with positional update
///
/// # Example
///
/// ```rust
/// use rust_tree_heaps::{Heap, HeapError};
/// use rust_tree_heaps::tree::TreeHeap;
///
/// let mut heap = TreeHeap::bounded(2);
/// heap.insert(3).unwrap();
/// heap.insert(7).unwrap();
/// assert_eq!(heap.insert(5), Err(HeapError::CapacityExceeded { capacity: 2 }));
///
/// assert_eq!(heap.peek(), Some(&7));
/// assert_eq!(heap.remove(), Ok(7));
/// ```
pub trait Heap<T: Ord> {
    /// Creates a new, empty, unbounded heap
    fn new() -> Self;

    /// Creates a new, empty heap holding at most `capacity` elements
    fn bounded(capacity: usize) -> Self;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns the element ceiling, or `None` when unbounded
    fn capacity(&self) -> Option<usize>;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if another insert would fail
    fn is_full(&self) -> bool {
        self.capacity() == Some(self.len())
    }

    /// Inserts a value
    ///
    /// # Errors
    /// [`HeapError::CapacityExceeded`] if the heap is full.
    ///
    /// # Time Complexity
    /// O(log n)
    fn insert(&mut self, value: T) -> Result<(), HeapError>;

    /// Removes and returns the maximum
    ///
    /// # Errors
    /// [`HeapError::EmptyContainer`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n)
    fn remove(&mut self) -> Result<T, HeapError>;

    /// Overwrites the value at position `index`, returning the previous value
    ///
    /// The heap property is restored upward if the value grew and downward
    /// otherwise. The shape never changes.
    ///
    /// # Errors
    /// [`HeapError::EmptyContainer`] if the heap is empty,
    /// [`HeapError::InvalidIndex`] if `index >= len`.
    ///
    /// # Time Complexity
    /// O(log n)
    fn change(&mut self, index: usize, value: T) -> Result<T, HeapError>;

    /// Returns the maximum without removing it
    fn peek(&self) -> Option<&T>;

    /// Returns the value at position `index`
    fn get(&self, index: usize) -> Option<&T>;

    /// Removes every element, keeping the capacity
    fn clear(&mut self);
}

/// Read-only views of a heap's tree shape
///
/// Both views follow positions, not value order: the in-order walk visits the
/// left subtree, the node, then the right subtree, and the drawing places
/// each level on its own line.
pub trait Layout<T> {
    /// Iterator returned by [`Layout::in_order`]
    type InOrder<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// In-order (left, node, right) traversal; empty for an empty heap
    fn in_order(&self) -> Self::InOrder<'_>;

    /// Renders the heap level by level; `None` if empty
    fn render(&self) -> Option<Drawing>
    where
        T: fmt::Display;
}

/// Shared precondition check for [`Heap::change`].
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), HeapError> {
    if len == 0 {
        Err(HeapError::EmptyContainer)
    } else if index >= len {
        Err(HeapError::InvalidIndex { index, len })
    } else {
        Ok(())
    }
}
