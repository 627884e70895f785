use crate::coord::Coord2;
use crate::grid::{Cell, Grid};

/// Row-major traversal position that does not borrow the grid.
///
/// Each step reads the grid it is handed, so writes made between steps are
/// visible to the cells yielded afterwards. A cursor remembers the shape of
/// the grid it was created for and is exhausted once its row reaches that
/// height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridCursor {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl GridCursor {
    #[inline]
    pub(crate) const fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Coordinate of the cell the next step will yield.
    #[inline]
    pub const fn position(&self) -> Coord2 {
        Coord2::new(self.x, self.y)
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.width == 0 || self.y >= self.height
    }

    fn check_shape<T>(&self, grid: &Grid<T>) {
        assert!(
            grid.width() == self.width && grid.height() == self.height,
            "cursor for a {}x{} grid stepped over a {}x{} grid",
            self.width,
            self.height,
            grid.width(),
            grid.height()
        );
    }

    /// Index of the current cell, moving the cursor past it.
    fn step(&mut self) -> Option<(u32, u32, usize)> {
        if self.is_exhausted() {
            return None;
        }
        let (x, y) = (self.x, self.y);
        let index = y as usize * self.width as usize + x as usize;
        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        Some((x, y, index))
    }

    /// Yields the current cell of `grid` and advances.
    ///
    /// # Panics
    ///
    /// Panics if `grid` does not have the shape this cursor was created for.
    pub fn next<'g, T>(&mut self, grid: &'g Grid<T>) -> Option<Cell<&'g T>> {
        self.check_shape(grid);
        let (x, y, index) = self.step()?;
        Some(Cell {
            x,
            y,
            value: &grid.cells()[index],
        })
    }

    /// Mutable counterpart of [`GridCursor::next`], with the same panics.
    pub fn next_mut<'g, T>(&mut self, grid: &'g mut Grid<T>) -> Option<Cell<&'g mut T>> {
        self.check_shape(grid);
        let (x, y, index) = self.step()?;
        Some(Cell {
            x,
            y,
            value: &mut grid.cells_mut()[index],
        })
    }
}
