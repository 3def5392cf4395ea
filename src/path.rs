//! Positional paths through a complete binary tree.
//!
//! In a complete binary tree every position has a unique location, and that
//! location can be recovered from the position number alone. Number the
//! positions from 1 (the root) in level order; then the binary digits of `n`
//! after the leading one spell out the walk from the root to `n`, most
//! significant first: `0` means left, `1` means right.
//!
//! ```text
//!          1              n = 6 = 0b110
//!        /   \            drop leading 1 -> "10"
//!       2     3           1 -> Right (to 3)
//!      / \   / \          0 -> Left  (to 6)
//!     4   5 6   7
//! ```
//!
//! The tree heap uses this to find the next free slot (`len + 1`), the last
//! occupied slot (`len`), or an arbitrary element (`index + 1`) in
//! O(log n) without storing positions in the nodes.
//!
//! # Example
//!
//! ```rust
//! use rust_tree_heaps::path::{Branch, Path};
//!
//! let steps: Vec<Branch> = Path::new(6).collect();
//! assert_eq!(steps, vec![Branch::Right, Branch::Left]);
//! assert_eq!(Path::new(1).len(), 0);
//! ```

/// One step of a walk from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Left,
    Right,
}

/// Depth of a 1-based position: `floor(log2(n))`.
///
/// # Panics
///
/// Panics if `n == 0`; positions start at 1.
#[inline]
pub fn depth_of(n: usize) -> u32 {
    assert!(n > 0, "positions are 1-based; got 0");
    usize::BITS - 1 - n.leading_zeros()
}

/// Iterator over the branch decisions leading from the root to a position.
///
/// Yields exactly [`depth_of(n)`](depth_of) items, most significant first.
#[derive(Debug, Clone)]
pub struct Path {
    position: usize,
    /// Bits still to be read, counted from the least significant end.
    remaining: u32,
}

impl Path {
    /// Path to the 1-based position `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn new(n: usize) -> Self {
        Self {
            position: n,
            remaining: depth_of(n),
        }
    }

    /// Path to the 0-based heap index `index`.
    #[inline]
    pub fn to_index(index: usize) -> Self {
        Self::new(index + 1)
    }
}

impl Iterator for Path {
    type Item = Branch;

    fn next(&mut self) -> Option<Branch> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if (self.position >> self.remaining) & 1 == 1 {
            Some(Branch::Right)
        } else {
            Some(Branch::Left)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Path {}

impl std::iter::FusedIterator for Path {}
