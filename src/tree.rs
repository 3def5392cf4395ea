//! Tree Heap implementation
//!
//! A max-heap stored as an explicit binary tree of linked nodes instead of a
//! flat array:
//! - O(log n) insert, remove and positional change
//! - O(1) peek
//! - O(n) in-order traversal and rendering
//!
//! # Algorithm Overview
//!
//! The tree is always *complete*: every level is full except possibly the
//! last, which fills left to right. Completeness gives every position `i` a
//! unique location, reached by the [`Path`] derived from `i + 1`. Nodes never
//! store their own position.
//!
//! **Key Operations**:
//! - **Insert**: walk the path of `len + 1`, attach a leaf at the one missing
//!   slot, then sift up
//! - **Remove**: walk the path of `len`, detach that leaf, move its value into
//!   the root, then sift down
//! - **Change**: walk the path of `index + 1`, overwrite, then sift up if the
//!   value grew and down otherwise
//!
//! Sifting swaps *values* between nodes; links are only rewired when a leaf
//! is attached or detached.
//!
//! **Memory Model**: each node owns its children. The parent link is a
//! non-owning back-reference used for sift-up and detach.
//!
//! # Example
//!
//! ```rust
//! use rust_tree_heaps::Heap;
//! use rust_tree_heaps::tree::TreeHeap;
//!
//! let mut heap = TreeHeap::new();
//! for v in [70, 40, 50, 20, 60] {
//!     heap.insert(v).unwrap();
//! }
//! assert_eq!(heap.peek(), Some(&70));
//!
//! heap.change(4, 99).unwrap();
//! assert_eq!(heap.remove(), Ok(99));
//! assert_eq!(heap.remove(), Ok(70));
//! ```

use crate::path::{Branch, Path};
use crate::render::{Canvas, Drawing, Span};
use crate::traits::{check_index, Heap, HeapError, Layout};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use tracing::{debug, trace};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    parent: Link<T>, // Non-owning; None for the root
}

impl<T> Node<T> {
    fn alloc(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            value,
            left: None,
            right: None,
            parent: None,
        });
        NonNull::from(Box::leak(node))
    }
}

/// Tree Heap
///
/// A max-heap over linked nodes, optionally bounded by a capacity.
///
/// # Example
///
/// ```rust
/// use rust_tree_heaps::{Heap, HeapError};
/// use rust_tree_heaps::tree::TreeHeap;
///
/// let mut heap: TreeHeap<i32> = TreeHeap::new();
/// assert_eq!(heap.remove(), Err(HeapError::EmptyContainer));
/// assert_eq!(heap.change(0, 5), Err(HeapError::EmptyContainer));
///
/// heap.insert(1).unwrap();
/// assert_eq!(heap.change(5, 9), Err(HeapError::InvalidIndex { index: 5, len: 1 }));
/// ```
pub struct TreeHeap<T> {
    root: Link<T>,
    len: usize,
    capacity: Option<usize>,
    _phantom: PhantomData<Box<Node<T>>>,
}

// The heap owns every node exclusively; nothing is shared across instances.
unsafe impl<T: Send> Send for TreeHeap<T> {}
unsafe impl<T: Sync> Sync for TreeHeap<T> {}

impl<T> Drop for TreeHeap<T> {
    fn drop(&mut self) {
        self.free_all();
    }
}

impl<T: Ord> Heap<T> for TreeHeap<T> {
    fn new() -> Self {
        Self {
            root: None,
            len: 0,
            capacity: None,
            _phantom: PhantomData,
        }
    }

    fn bounded(capacity: usize) -> Self {
        let mut heap = Self::new();
        heap.capacity = Some(capacity);
        heap
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn insert(&mut self, value: T) -> Result<(), HeapError> {
        if let Some(capacity) = self.capacity {
            if self.len == capacity {
                debug!(capacity, "insert rejected: heap is full");
                return Err(HeapError::CapacityExceeded { capacity });
            }
        }

        let node = Node::alloc(value);
        unsafe { self.attach(node) };
        // `len` must match the linked nodes before any comparison can panic.
        self.len += 1;
        let swaps = unsafe { Self::sift_up(node) };
        trace!(len = self.len, swaps, "inserted");
        Ok(())
    }

    fn remove(&mut self) -> Result<T, HeapError> {
        let Some(root) = self.root else {
            debug!("remove rejected: heap is empty");
            return Err(HeapError::EmptyContainer);
        };

        if self.len == 1 {
            self.root = None;
            self.len = 0;
            let node = unsafe { Box::from_raw(root.as_ptr()) };
            trace!(len = 0, "removed root");
            return Ok(node.value);
        }

        unsafe {
            let last = self.detach_last();
            let max = mem::replace(&mut (*root.as_ptr()).value, last);
            self.len -= 1;
            let swaps = Self::sift_down(root);
            trace!(len = self.len, swaps, "removed");
            Ok(max)
        }
    }

    fn change(&mut self, index: usize, value: T) -> Result<T, HeapError> {
        if let Err(err) = check_index(index, self.len) {
            debug!(index, len = self.len, %err, "change rejected");
            return Err(err);
        }

        let node = self
            .walk(Path::to_index(index))
            .expect("shape invariant violated: indexed node missing");
        unsafe {
            let slot = &mut (*node.as_ptr()).value;
            let grew = value > *slot;
            let old = mem::replace(slot, value);
            let swaps = if grew {
                Self::sift_up(node)
            } else {
                Self::sift_down(node)
            };
            trace!(index, grew, swaps, "changed");
            Ok(old)
        }
    }

    fn peek(&self) -> Option<&T> {
        self.root.map(|root| unsafe { &(*root.as_ptr()).value })
    }

    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.walk(Path::to_index(index))
            .map(|node| unsafe { &(*node.as_ptr()).value })
    }

    fn clear(&mut self) {
        self.free_all();
    }
}

impl<T> TreeHeap<T> {
    /// Follows `path` from the root, returning `None` on a missing child.
    fn walk(&self, path: Path) -> Link<T> {
        let mut cursor = self.root?;
        for step in path {
            cursor = unsafe { Self::child(cursor, step) }?;
        }
        Some(cursor)
    }

    /// # Safety
    /// `node` must be a live node of this heap.
    #[inline]
    unsafe fn child(node: NonNull<Node<T>>, branch: Branch) -> Link<T> {
        let node = node.as_ptr();
        match branch {
            Branch::Left => (*node).left,
            Branch::Right => (*node).right,
        }
    }

    /// Mutable child link of `node` on the `branch` side.
    ///
    /// # Safety
    /// `node` must be a live node of this heap, and no other reference to the
    /// returned link may be held.
    #[inline]
    unsafe fn slot<'a>(node: NonNull<Node<T>>, branch: Branch) -> &'a mut Link<T> {
        match branch {
            Branch::Left => &mut (*node.as_ptr()).left,
            Branch::Right => &mut (*node.as_ptr()).right,
        }
    }

    /// Links a fresh leaf into the next free slot, position `len + 1`.
    ///
    /// # Safety
    /// `node` must be freshly allocated and not yet linked.
    unsafe fn attach(&mut self, node: NonNull<Node<T>>) {
        let Some(mut cursor) = self.root else {
            self.root = Some(node);
            return;
        };

        let mut steps = Path::new(self.len + 1);
        loop {
            let step = steps
                .next()
                .expect("shape invariant violated: no free slot on insert path");
            let slot = Self::slot(cursor, step);
            match *slot {
                Some(child) => cursor = child,
                None => {
                    assert_eq!(
                        steps.len(),
                        0,
                        "shape invariant violated: hole in the middle of the insert path"
                    );
                    *slot = Some(node);
                    (*node.as_ptr()).parent = Some(cursor);
                    return;
                }
            }
        }
    }

    /// Unlinks the node at position `len` and returns its value.
    ///
    /// # Safety
    /// The heap must hold at least two nodes.
    unsafe fn detach_last(&mut self) -> T {
        let last = self
            .walk(Path::new(self.len))
            .expect("shape invariant violated: last slot missing");
        let node = last.as_ptr();
        debug_assert!((*node).left.is_none() && (*node).right.is_none());

        let parent = (*node)
            .parent
            .expect("shape invariant violated: non-root node without parent")
            .as_ptr();
        if (*parent).left == Some(last) {
            (*parent).left = None;
        } else {
            debug_assert_eq!((*parent).right, Some(last));
            (*parent).right = None;
        }

        let node = Box::from_raw(node);
        node.value
    }

    /// Frees every node and resets the length.
    fn free_all(&mut self) {
        let mut stack: Vec<NonNull<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            stack.extend(node.left);
            stack.extend(node.right);
        }
        self.len = 0;
    }

    /// Iterates values in positional (level) order: index 0, 1, 2, ...
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self.root.into_iter().collect(),
            _phantom: PhantomData,
        }
    }

    /// In-order (left, node, right) traversal
    ///
    /// The order follows the tree's shape, not value magnitude. Each call
    /// starts a fresh walk; an empty heap yields nothing.
    ///
    /// ```rust
    /// use rust_tree_heaps::tree::TreeHeap;
    ///
    /// let heap: TreeHeap<i32> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(heap.in_order().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder {
            stack: Vec::new(),
            cursor: self.root,
            remaining: self.len,
            _phantom: PhantomData,
        }
    }

    /// Renders the tree level by level; `None` if the heap is empty.
    ///
    /// See [`render`](crate::render) for the layout rules.
    pub fn render(&self) -> Option<Drawing>
    where
        T: fmt::Display,
    {
        let root = self.root?;
        let mut canvas = Canvas::for_len(self.len);
        let mut queue: VecDeque<(usize, NonNull<Node<T>>, Span)> = VecDeque::new();
        queue.push_back((0, root, canvas.root_span()));

        while let Some((depth, node, span)) = queue.pop_front() {
            let node = unsafe { &*node.as_ptr() };
            canvas.place(depth, span, node.value.to_string());
            if let Some(left) = node.left {
                queue.push_back((depth + 1, left, span.left()));
            }
            if let Some(right) = node.right {
                queue.push_back((depth + 1, right, span.right()));
            }
        }

        Some(canvas.finish())
    }

    /// Checks the heap, shape and back-reference invariants of the whole tree.
    ///
    /// Returns false if any parent is smaller than a child, if the nodes do
    /// not fill positions `1..=len` exactly, or if a child's parent link does
    /// not point back at the node that owns it.
    pub fn verify_internal_structure(&self) -> bool
    where
        T: Ord,
    {
        let Some(root) = self.root else {
            return self.len == 0;
        };
        if unsafe { (*root.as_ptr()).parent.is_some() } {
            return false;
        }

        // (node, 1-based position)
        let mut stack = vec![(root, 1usize)];
        let mut seen = 0usize;
        while let Some((node, position)) = stack.pop() {
            seen += 1;
            if position > self.len {
                return false;
            }
            let n = unsafe { &*node.as_ptr() };
            for (child, child_position) in [(n.left, 2 * position), (n.right, 2 * position + 1)] {
                let Some(child) = child else { continue };
                let c = unsafe { &*child.as_ptr() };
                if c.parent != Some(node) || c.value > n.value {
                    return false;
                }
                stack.push((child, child_position));
            }
        }
        seen == self.len
    }

    /// Consumes the heap, returning its values largest first.
    pub fn into_sorted_vec(mut self) -> Vec<T>
    where
        T: Ord,
    {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(value) = self.remove() {
            sorted.push(value);
        }
        sorted
    }

    /// Inserts every value, stopping at the first one that does not fit.
    ///
    /// Values already inserted stay in the heap.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), HeapError>
    where
        T: Ord,
    {
        for value in iter {
            self.insert(value)?;
        }
        Ok(())
    }

    /// Sift-up by value swaps; returns the number of swaps.
    ///
    /// # Safety
    /// `node` must be a live node of this heap.
    unsafe fn sift_up(mut node: NonNull<Node<T>>) -> usize
    where
        T: Ord,
    {
        let mut swaps = 0;
        while let Some(parent) = (*node.as_ptr()).parent {
            if (*node.as_ptr()).value <= (*parent.as_ptr()).value {
                break;
            }
            mem::swap(&mut (*node.as_ptr()).value, &mut (*parent.as_ptr()).value);
            node = parent;
            swaps += 1;
        }
        swaps
    }

    /// Sift-down by value swaps; returns the number of swaps.
    ///
    /// The right child is preferred only when strictly larger than the left.
    ///
    /// # Safety
    /// `node` must be a live node of this heap.
    unsafe fn sift_down(mut node: NonNull<Node<T>>) -> usize
    where
        T: Ord,
    {
        let mut swaps = 0;
        loop {
            let n = node.as_ptr();
            let larger = match ((*n).left, (*n).right) {
                (Some(left), Some(right)) => {
                    if (*right.as_ptr()).value > (*left.as_ptr()).value {
                        right
                    } else {
                        left
                    }
                }
                (Some(child), None) | (None, Some(child)) => child,
                (None, None) => break,
            };
            if (*larger.as_ptr()).value <= (*n).value {
                break;
            }
            mem::swap(&mut (*n).value, &mut (*larger.as_ptr()).value);
            node = larger;
            swaps += 1;
        }
        swaps
    }
}

impl<T> Layout<T> for TreeHeap<T> {
    type InOrder<'a> = InOrder<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn in_order(&self) -> InOrder<'_, T> {
        TreeHeap::in_order(self)
    }

    fn render(&self) -> Option<Drawing>
    where
        T: fmt::Display,
    {
        TreeHeap::render(self)
    }
}

impl<T: Ord> Default for TreeHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Clone for TreeHeap<T> {
    fn clone(&self) -> Self {
        // Attaching in positional order reproduces the layout; no sifting needed.
        let mut heap = Self::new();
        heap.capacity = self.capacity;
        for value in self.iter() {
            let node = Node::alloc(value.clone());
            unsafe { heap.attach(node) };
            heap.len += 1;
        }
        heap
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for TreeHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for TreeHeap<T> {
    /// # Panics
    /// Panics if the heap is bounded and runs out of room; use
    /// [`TreeHeap::try_extend`] for bounded heaps.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            panic!("extend past capacity: {err}");
        }
    }
}

/// Level-order iterator returned by [`TreeHeap::iter`].
pub struct Iter<'a, T> {
    queue: VecDeque<NonNull<Node<T>>>,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = unsafe { &*self.queue.pop_front()?.as_ptr() };
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.value)
    }
}

/// In-order iterator returned by [`TreeHeap::in_order`].
pub struct InOrder<'a, T> {
    stack: Vec<NonNull<Node<T>>>,
    cursor: Link<T>,
    remaining: usize,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(node) = self.cursor {
            self.stack.push(node);
            self.cursor = unsafe { (*node.as_ptr()).left };
        }
        let node = unsafe { &*self.stack.pop()?.as_ptr() };
        self.cursor = node.right;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}
