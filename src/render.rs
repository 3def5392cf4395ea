//! Level-by-level text layout of a heap
//!
//! Each level of the tree becomes one line of `width` cells, where `width` is
//! `2^(depth + 1)` for a tree whose deepest level is `depth`. Columns come from
//! recursive bisection: the root takes the midpoint of `[0, width)`, a left
//! child the midpoint of its parent's lower half, a right child the midpoint
//! of the upper half. Empty cells are two spaces and cells are joined by a
//! single space, so wide values shift the rest of their line to the right.
//!
//! ```rust
//! use rust_tree_heaps::tree::TreeHeap;
//!
//! let heap: TreeHeap<i32> = [3, 1, 2].into_iter().collect();
//! let drawing = heap.render().unwrap();
//! assert_eq!(drawing.lines(), ["      3", "   1    2"]);
//! ```

use std::fmt;

use crate::path::depth_of;

const EMPTY_CELL: &str = "  ";

/// Half-open column interval `[lo, hi)` owned by a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    lo: usize,
    hi: usize,
}

impl Span {
    /// Column of the subtree's root
    #[inline]
    pub fn mid(self) -> usize {
        (self.lo + self.hi) / 2
    }

    /// Interval handed to the left child
    #[inline]
    pub fn left(self) -> Span {
        Span {
            lo: self.lo,
            hi: self.mid(),
        }
    }

    /// Interval handed to the right child
    #[inline]
    pub fn right(self) -> Span {
        Span {
            lo: self.mid() + 1,
            hi: self.hi,
        }
    }
}

/// Grid that nodes are placed on during a breadth-first walk.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    /// Occupied cells per level, in column order.
    levels: Vec<Vec<(usize, String)>>,
}

impl Canvas {
    /// Canvas wide enough for a complete tree of `len` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`, or if the width does not fit in a `usize`.
    pub fn for_len(len: usize) -> Self {
        let depth = depth_of(len);
        let width = 1usize
            .checked_shl(depth + 1)
            .expect("heap too deep to render");
        Self {
            width,
            levels: Vec::with_capacity(depth as usize + 1),
        }
    }

    /// Number of cells per line
    pub fn width(&self) -> usize {
        self.width
    }

    /// Interval assigned to the root
    pub fn root_span(&self) -> Span {
        Span {
            lo: 0,
            hi: self.width,
        }
    }

    /// Writes `text` at the midpoint of `span` on level `depth`.
    ///
    /// Placements on one level must arrive left to right, which a
    /// breadth-first walk guarantees.
    pub fn place(&mut self, depth: usize, span: Span, text: String) {
        while self.levels.len() <= depth {
            self.levels.push(Vec::new());
        }
        let column = span.mid();
        debug_assert!(column < self.width, "column {column} outside canvas");
        let level = &mut self.levels[depth];
        debug_assert!(
            level.last().map_or(true, |(c, _)| *c < column),
            "placements must move left to right"
        );
        level.push((column, text));
    }

    /// Turns the placed cells into lines.
    pub fn finish(self) -> Drawing {
        let width = self.width;
        let lines = self
            .levels
            .into_iter()
            .map(|cells| {
                let mut line = String::new();
                let mut cells = cells.into_iter().peekable();
                for column in 0..width {
                    if column > 0 {
                        line.push(' ');
                    }
                    match cells.next_if(|(c, _)| *c == column) {
                        Some((_, text)) => line.push_str(&text),
                        None => line.push_str(EMPTY_CELL),
                    }
                }
                line.truncate(line.trim_end().len());
                line
            })
            .collect();
        Drawing { lines }
    }
}

/// A rendered heap, one line per tree level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    lines: Vec<String>,
}

impl Drawing {
    /// The rendered lines, root level first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the drawing, returning its lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
