//! Tree-Shaped Max-Heaps for Rust
//!
//! This crate provides a max-heap stored as an explicit binary tree of linked
//! nodes, addressed by *positional paths*, alongside a conventional
//! array-backed heap with the same contract.
//!
//! # Features
//!
//! - **Tree Heap**: linked nodes with owning child links and non-owning parent
//!   links; O(log n) insert, remove and positional change
//! - **Array Heap**: the same operations over a flat vector
//! - **Positional update**: overwrite the value at any position and have the
//!   heap property restored in whichever direction it broke
//! - **Capacity limits**: every heap may be bounded; inserts past the bound
//!   fail with [`HeapError::CapacityExceeded`]
//! - **Rendering**: level-by-level text drawings for inspection
//! - **Pyramidal facade**: a wrapper that labels failures with the operation
//!   that caused them without hiding the underlying [`HeapError`]
//!
//! # Example
//!
//! ```rust
//! use rust_tree_heaps::tree::TreeHeap;
//! use rust_tree_heaps::Heap;
//!
//! let mut heap = TreeHeap::new();
//! for v in [70, 40, 50, 20, 60, 100, 80, 30, 10, 90, 53] {
//!     heap.insert(v).unwrap();
//! }
//! heap.change(10, 99).unwrap();
//! assert_eq!(heap.remove(), Ok(100));
//! assert_eq!(heap.remove(), Ok(99));
//! ```

pub mod array;
pub mod path;
pub mod pyramid;
pub mod render;
pub mod traits;
pub mod tree;

// Re-export the main types for convenience
pub use pyramid::{Operation, PyramidError, PyramidalHeap};
pub use traits::{Heap, HeapError, Layout};
