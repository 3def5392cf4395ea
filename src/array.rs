//! Array Heap implementation
//!
//! A binary max-heap over a flat `Vec`, with the same contract as
//! [`TreeHeap`](crate::tree::TreeHeap). Positions are vector indices, so the
//! parent of `i` is `(i - 1) / 2` and its children are `2i + 1` and `2i + 2`;
//! no paths need to be walked.
//!
//! Both heaps apply identical sift rules, so the same sequence of operations
//! leaves them with the same positional layout.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert`  | O(log n)   |
//! | `remove`  | O(log n)   |
//! | `change`  | O(log n)   |
//! | `peek`    | O(1)       |
//! | `get`     | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use rust_tree_heaps::Heap;
//! use rust_tree_heaps::array::ArrayHeap;
//!
//! let mut heap = ArrayHeap::new();
//! heap.insert(3).unwrap();
//! heap.insert(1).unwrap();
//! heap.insert(2).unwrap();
//!
//! assert_eq!(heap.peek(), Some(&3));
//! assert_eq!(heap.remove(), Ok(3));
//! assert_eq!(heap.remove(), Ok(2));
//! assert_eq!(heap.remove(), Ok(1));
//! assert!(heap.remove().is_err());
//! ```

use crate::path::depth_of;
use crate::render::{Canvas, Drawing, Span};
use crate::traits::{check_index, Heap, HeapError, Layout};
use std::fmt;
use tracing::{debug, trace};

/// A binary max-heap stored in a vector
#[derive(Clone)]
pub struct ArrayHeap<T> {
    /// Values in positional (level) order
    data: Vec<T>,
    capacity: Option<usize>,
}

impl<T: Ord> Heap<T> for ArrayHeap<T> {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: None,
        }
    }

    fn bounded(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn insert(&mut self, value: T) -> Result<(), HeapError> {
        if let Some(capacity) = self.capacity {
            if self.data.len() == capacity {
                debug!(capacity, "insert rejected: heap is full");
                return Err(HeapError::CapacityExceeded { capacity });
            }
        }
        self.data.push(value);
        let swaps = self.sift_up(self.data.len() - 1);
        trace!(len = self.data.len(), swaps, "inserted");
        Ok(())
    }

    fn remove(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            debug!("remove rejected: heap is empty");
            return Err(HeapError::EmptyContainer);
        }

        let max = self.data.swap_remove(0);
        let swaps = if self.data.is_empty() {
            0
        } else {
            self.sift_down(0)
        };
        trace!(len = self.data.len(), swaps, "removed");
        Ok(max)
    }

    fn change(&mut self, index: usize, value: T) -> Result<T, HeapError> {
        if let Err(err) = check_index(index, self.data.len()) {
            debug!(index, len = self.data.len(), %err, "change rejected");
            return Err(err);
        }

        let grew = value > self.data[index];
        let old = std::mem::replace(&mut self.data[index], value);
        let swaps = if grew {
            self.sift_up(index)
        } else {
            self.sift_down(index)
        };
        trace!(index, grew, swaps, "changed");
        Ok(old)
    }

    fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Ord> ArrayHeap<T> {
    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) -> usize {
        let mut swaps = 0;
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] > self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
                swaps += 1;
            } else {
                break;
            }
        }
        swaps
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.data.len();
        let mut swaps = 0;
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let larger = if right < len && self.data[right] > self.data[left] {
                right
            } else {
                left
            };
            if self.data[larger] <= self.data[index] {
                break;
            }
            self.data.swap(index, larger);
            index = larger;
            swaps += 1;
        }
        swaps
    }

    /// Consumes the heap, returning its values largest first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(value) = self.remove() {
            sorted.push(value);
        }
        sorted
    }

    /// Inserts every value, stopping at the first one that does not fit.
    ///
    /// Values already inserted stay in the heap.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), HeapError> {
        for value in iter {
            self.insert(value)?;
        }
        Ok(())
    }
}

impl<T> ArrayHeap<T> {
    /// Values in positional order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// In-order (left, node, right) traversal over child indices
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder {
            data: &self.data,
            stack: Vec::new(),
            cursor: (!self.data.is_empty()).then_some(0),
        }
    }

    /// Renders the heap level by level; `None` if empty.
    ///
    /// Produces the same drawing as [`TreeHeap::render`](crate::tree::TreeHeap::render)
    /// for the same layout.
    pub fn render(&self) -> Option<Drawing>
    where
        T: fmt::Display,
    {
        if self.data.is_empty() {
            return None;
        }
        let mut canvas = Canvas::for_len(self.data.len());
        // Level order is index order, so spans can be computed in one pass.
        let mut spans: Vec<Span> = Vec::with_capacity(self.data.len());
        for (i, value) in self.data.iter().enumerate() {
            let span = if i == 0 {
                canvas.root_span()
            } else if i % 2 == 1 {
                spans[(i - 1) / 2].left()
            } else {
                spans[(i - 1) / 2].right()
            };
            canvas.place(depth_of(i + 1) as usize, span, value.to_string());
            spans.push(span);
        }
        Some(canvas.finish())
    }
}

impl<T> Layout<T> for ArrayHeap<T> {
    type InOrder<'a> = InOrder<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn in_order(&self) -> InOrder<'_, T> {
        ArrayHeap::in_order(self)
    }

    fn render(&self) -> Option<Drawing>
    where
        T: fmt::Display,
    {
        ArrayHeap::render(self)
    }
}

/// In-order iterator returned by [`ArrayHeap::in_order`].
pub struct InOrder<'a, T> {
    data: &'a [T],
    stack: Vec<usize>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let len = self.data.len();
        while let Some(i) = self.cursor {
            self.stack.push(i);
            self.cursor = Some(2 * i + 1).filter(|&c| c < len);
        }
        let i = self.stack.pop()?;
        self.cursor = Some(2 * i + 2).filter(|&c| c < len);
        Some(&self.data[i])
    }
}

impl<T: Ord> Default for ArrayHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for ArrayHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for ArrayHeap<T> {
    /// # Panics
    /// Panics if the heap is bounded and runs out of room; use
    /// [`ArrayHeap::try_extend`] for bounded heaps.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            panic!("extend past capacity: {err}");
        }
    }
}
