// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A dense, row-major two-dimensional buffer.  Both the grid of
//! complex samples and the grid of escape counts are one of these, so
//! that row (y) and column (x) always mean the same thing on either
//! side of the escape-time stage.

use std::slice::Chunks;

/// A `height` x `width` buffer stored row after row.  Element (x, y)
/// lives at offset `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer.  Returns None if the buffer
    /// is not exactly `width * height` long.
    pub fn from_raw(width: usize, height: usize, cells: Vec<T>) -> Option<Grid<T>> {
        if cells.len() != width * height {
            return None;
        }
        Some(Grid {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid by calling `cell(x, y)` for every cell, row by row.
    pub fn from_fn<F>(width: usize, height: usize, mut cell: F) -> Grid<T>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(cell(x, y));
            }
        }
        Grid {
            width,
            height,
            cells,
        }
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Describes that the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at column x, row y, if it is inside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    /// Row y as a slice of `width` cells.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> Chunks<T> {
        // chunks() panics on zero; an empty grid yields no rows anyway.
        self.cells.chunks(self.width.max(1))
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Gives up the grid, returning the row-major buffer.
    pub fn into_raw(self) -> Vec<T> {
        self.cells
    }
}

impl<T: Clone> Grid<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Grid<T> {
        Grid {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Overwrites row y with `values`.  The caller guarantees that y is
    /// in range and that `values` is exactly one row long.
    pub(crate) fn put_row(&mut self, y: usize, values: &[T]) {
        let start = y * self.width;
        self.cells[start..start + self.width].clone_from_slice(values);
    }
}
