use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::config::RenderConfig;
use crate::coord::Coord2;
use crate::cursor::GridCursor;
use crate::error::GridError;

/// Dense 2D grid backed by a flat row-major Vec.
///
/// Cell `(x, y)` lives at index `y * width + x`. Every coordinate access is
/// bounds-checked and reports [`GridError::OutOfRange`] instead of touching
/// a neighbouring row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<T>"))]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

/// One visited cell: its coordinate and the value (or reference) stored there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell<V> {
    pub x: u32,
    pub y: u32,
    pub value: V,
}

impl<V> Cell<V> {
    #[inline]
    pub const fn coord(&self) -> Coord2 {
        Coord2::new(self.x, self.y)
    }
}

#[inline]
fn checked_cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)
}

fn cell_count(width: u32, height: u32) -> Result<usize, GridError> {
    checked_cell_count(width as usize, height as usize)
        .ok_or(GridError::DimensionsOverflow { width, height })
}

/// Cell count for the infallible constructors.
///
/// # Panics
///
/// Panics when `width * height` overflows `usize`, as `Vec` does on
/// capacity overflow.
fn cell_capacity(width: u32, height: u32) -> usize {
    match cell_count(width, height) {
        Ok(len) => len,
        Err(err) => panic!("{err}"),
    }
}

impl<T> Grid<T> {
    /// Builds a grid by calling `init(x, y)` once per cell, rows first.
    ///
    /// # Panics
    ///
    /// Panics when `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32, mut init: impl FnMut(u32, u32) -> T) -> Self {
        let mut cells = Vec::with_capacity(cell_capacity(width, height));
        for y in 0..height {
            for x in 0..width {
                cells.push(init(x, y));
            }
        }
        tracing::trace!(width, height, "grid constructed");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Like [`Grid::new`], but stops at the first initializer error and returns it.
    pub fn try_new<E>(
        width: u32,
        height: u32,
        mut init: impl FnMut(u32, u32) -> Result<T, E>,
    ) -> Result<Self, E> {
        let mut cells = Vec::with_capacity(cell_capacity(width, height));
        for y in 0..height {
            for x in 0..width {
                cells.push(init(x, y)?);
            }
        }
        tracing::trace!(width, height, "grid constructed");
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Result<Self, GridError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub const fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, GridError> {
        Coord2::new(x, y)
            .to_index(self.width, self.height)
            .ok_or(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    pub fn get(&self, x: u32, y: u32) -> Result<&T, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Result<&mut T, GridError> {
        let index = self.index_of(x, y)?;
        Ok(&mut self.cells[index])
    }

    /// Overwrites a single cell. Out-of-range writes leave the grid untouched.
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<(), GridError> {
        let index = self.index_of(x, y)?;
        self.cells[index] = value;
        Ok(())
    }

    fn row_range(&self, y: u32) -> Result<core::ops::Range<usize>, GridError> {
        if y >= self.height {
            return Err(GridError::OutOfRange {
                x: 0,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let start = y as usize * self.width as usize;
        Ok(start..start + self.width as usize)
    }

    pub fn row(&self, y: u32) -> Result<&[T], GridError> {
        let range = self.row_range(y)?;
        Ok(&self.cells[range])
    }

    pub fn row_mut(&mut self, y: u32) -> Result<&mut [T], GridError> {
        let range = self.row_range(y)?;
        Ok(&mut self.cells[range])
    }

    /// Raw storage in row-major order.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// New grid of the same size with `f(x, y, &cell)` applied to every cell.
    pub fn map<U>(&self, mut f: impl FnMut(u32, u32, &T) -> U) -> Grid<U> {
        let width = self.width;
        Grid {
            width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    let c = Coord2::from_index(index, width);
                    f(c.x, c.y, cell)
                })
                .collect(),
        }
    }

    /// Row-major traversal over shared references.
    ///
    /// The borrow keeps the grid frozen for the lifetime of the iterator. Use
    /// [`Grid::cursor`] to interleave traversal with writes.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cells: self.cells.iter(),
            width: self.width,
            index: 0,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            cells: self.cells.iter_mut(),
            width: self.width,
            index: 0,
        }
    }

    /// A detached cursor positioned at `(0, 0)` and bound to this grid's shape.
    #[inline]
    pub fn cursor(&self) -> GridCursor {
        GridCursor::new(self.width, self.height)
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(width: u32, height: u32, fill: T) -> Self {
        tracing::trace!(width, height, "grid constructed");
        Self {
            width,
            height,
            cells: alloc::vec![fill; cell_capacity(width, height)],
        }
    }
}

impl<T: Default> Grid<T> {
    pub fn new_default(width: u32, height: u32) -> Self {
        Self::new(width, height, |_, _| T::default())
    }
}

impl<T> Grid<Option<T>> {
    /// Grid in which every cell holds no value.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::new(width, height, |_, _| None)
    }
}

impl<T: fmt::Display> Grid<T> {
    fn write_rows(&self, out: &mut impl fmt::Write, cell_sep: &str, row_sep: &str) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                out.write_str(row_sep)?;
            }
            let start = y as usize * self.width as usize;
            let row = &self.cells[start..start + self.width as usize];
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    out.write_str(cell_sep)?;
                }
                write!(out, "{cell}")?;
            }
        }
        Ok(())
    }

    /// Adapter that formats the grid with the separators in `config`.
    pub fn display_with<'a>(&'a self, config: &'a RenderConfig) -> Rendered<'a, T> {
        Rendered { grid: self, config }
    }

    pub fn render(&self, config: &RenderConfig) -> String {
        self.display_with(config).to_string()
    }
}

/// Display adapter returned by [`Grid::display_with`].
#[derive(Debug)]
pub struct Rendered<'a, T> {
    grid: &'a Grid<T>,
    config: &'a RenderConfig,
}

impl<T: fmt::Display> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid
            .write_rows(f, &self.config.cell_separator, &self.config.row_separator)
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RenderConfig::default();
        self.write_rows(f, &config.cell_separator, &config.row_separator)
    }
}

/// Borrowing row-major iterator, see [`Grid::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    cells: core::slice::Iter<'a, T>,
    width: u32,
    index: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = Cell<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cells.next()?;
        let c = Coord2::from_index(self.index, self.width);
        self.index += 1;
        Some(Cell {
            x: c.x,
            y: c.y,
            value,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

#[derive(Debug)]
pub struct IterMut<'a, T> {
    cells: core::slice::IterMut<'a, T>,
    width: u32,
    index: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = Cell<&'a mut T>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cells.next()?;
        let c = Coord2::from_index(self.index, self.width);
        self.index += 1;
        Some(Cell {
            x: c.x,
            y: c.y,
            value,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    cells: alloc::vec::IntoIter<T>,
    width: u32,
    index: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = Cell<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.cells.next()?;
        let c = Coord2::from_index(self.index, self.width);
        self.index += 1;
        Some(Cell {
            x: c.x,
            y: c.y,
            value,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = Cell<&'a T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Grid<T> {
    type Item = Cell<&'a mut T>;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Grid<T> {
    type Item = Cell<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            cells: self.cells.into_iter(),
            width: self.width,
            index: 0,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        Grid::from_vec(raw.width, raw.height, raw.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use expect_test::expect;

    #[test]
    fn grid_new_calls_init_row_major() {
        let mut calls = Vec::new();
        let g = Grid::new(3, 2, |x, y| {
            calls.push((x, y));
            x + y * 10
        });
        assert_eq!(calls, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(g.cells(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn grid_get_matches_init() {
        let g = Grid::new(4, 3, |x, y| (x, y));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(g.get(x, y), Ok(&(x, y)));
            }
        }
    }

    #[test]
    fn grid_set_get() {
        let mut g = Grid::new_filled(3, 3, 0u8);
        g.set(1, 2, 7).unwrap();
        assert_eq!(g.get(1, 2), Ok(&7));
        let others = g.iter().filter(|c| (c.x, c.y) != (1, 2));
        assert!(others.map(|c| *c.value).all(|v| v == 0));
    }

    #[test]
    fn grid_get_out_of_range() {
        let g = Grid::new_filled(2, 2, 0u8);
        assert_eq!(
            g.get(2, 0),
            Err(GridError::OutOfRange {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(g.get(0, 2).is_err());
    }

    #[test]
    fn grid_set_out_of_range_does_not_mutate() {
        let mut g = Grid::new(2, 2, |x, y| x + y * 2);
        let before = g.clone();
        // (2, 0) would alias (0, 1) under the raw index mapping.
        assert!(g.set(2, 0, 99).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn grid_empty_holds_no_values() {
        let g: Grid<Option<&str>> = Grid::empty(3, 1);
        assert_eq!(g.len(), 3);
        assert!(g.iter().all(|c| c.value.is_none()));
    }

    #[test]
    fn grid_new_default() {
        let g: Grid<u16> = Grid::new_default(2, 3);
        assert_eq!(g.cells(), &[0; 6]);
    }

    #[test]
    fn grid_zero_sized() {
        let g = Grid::new(0, 0, |_, _| 1u8);
        assert!(g.is_empty());
        assert_eq!(g.iter().count(), 0);

        let wide = Grid::new(5, 0, |_, _| 1u8);
        assert_eq!(wide.iter().next(), None);
        let tall = Grid::new(0, 5, |_, _| 1u8);
        assert_eq!(tall.iter().next(), None);
        assert_eq!(tall.row(4), Ok(&[][..]));
    }

    #[test]
    fn grid_try_new_propagates_error() {
        let result: Result<Grid<u32>, &str> =
            Grid::try_new(3, 3, |x, y| if (x, y) == (1, 1) { Err("boom") } else { Ok(x) });
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn grid_try_new_stops_at_first_error() {
        let mut calls = 0;
        let result: Result<Grid<u32>, u32> = Grid::try_new(3, 3, |x, y| {
            calls += 1;
            if y == 1 {
                Err(x)
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err(0));
        assert_eq!(calls, 4);
    }

    #[test]
    fn grid_from_vec_size_mismatch() {
        assert_eq!(
            Grid::from_vec(3, 2, vec![0u8; 5]),
            Err(GridError::SizeMismatch {
                expected: 6,
                got: 5
            })
        );
        assert!(Grid::from_vec(3, 2, vec![0u8; 6]).is_ok());
    }

    #[test]
    fn checked_cell_count_overflow() {
        assert_eq!(checked_cell_count(usize::MAX, 2), None);
        assert_eq!(checked_cell_count(usize::MAX, 1), Some(usize::MAX));
        assert_eq!(checked_cell_count(0, usize::MAX), Some(0));
    }

    #[test]
    fn cell_count_reports_overflow() {
        // u32 dimensions only overflow a 32-bit usize.
        let result = cell_count(65536, 65537);
        if usize::BITS == 32 {
            assert_eq!(
                result,
                Err(GridError::DimensionsOverflow {
                    width: 65536,
                    height: 65537
                })
            );
        } else {
            assert_eq!(result, Ok((65536u64 * 65537) as usize));
        }
    }

    #[test]
    fn grid_from_vec_rejects_wrapped_len() {
        let result = Grid::from_vec(65536, 65537, vec![0u8; 65536]);
        assert!(result.is_err());
    }

    #[test]
    fn grid_cells_mut_is_row_major() {
        let mut g = Grid::new_filled(3, 2, 0u8);
        g.cells_mut()[4] = 1;
        assert_eq!(g.get(1, 1), Ok(&1));
    }

    #[test]
    fn grid_into_vec_round_trips_from_vec() {
        let g = Grid::new(2, 3, |x, y| x + y * 2);
        let cells = g.clone().into_vec();
        assert_eq!(cells, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(Grid::from_vec(2, 3, cells), Ok(g));
    }

    #[test]
    fn grid_row_slice() {
        let mut g = Grid::new(4, 3, |x, y| x + y * 10);
        assert_eq!(g.row(1), Ok(&[10, 11, 12, 13][..]));
        g.row_mut(2).unwrap().fill(0);
        assert_eq!(g.row(2), Ok(&[0, 0, 0, 0][..]));
        assert!(g.row(3).is_err());
    }

    #[test]
    fn grid_map_keeps_shape() {
        let g = Grid::new(3, 2, |x, y| x * y);
        let m = g.map(|x, y, v| format!("{x}{y}:{v}"));
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert_eq!(m.get(2, 1).unwrap(), "21:2");
    }

    #[test]
    fn grid_iter_row_major() {
        let g = Grid::new(2, 2, |x, y| format!("value {x},{y}"));
        let cells: Vec<(u32, u32, &str)> = g.iter().map(|c| (c.x, c.y, c.value.as_str())).collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, "value 0,0"),
                (1, 0, "value 1,0"),
                (0, 1, "value 0,1"),
                (1, 1, "value 1,1"),
            ]
        );
    }

    #[test]
    fn grid_iter_restartable() {
        let g = Grid::new(3, 4, |x, y| x ^ y);
        let first: Vec<_> = g.iter().collect();
        let second: Vec<_> = (&g).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_eq!(g.iter().len(), 12);
    }

    #[test]
    fn grid_iter_visits_each_coord_once() {
        let g = Grid::new(5, 3, |_, _| ());
        let coords: Vec<Coord2> = g.iter().map(|c| c.coord()).collect();
        let mut sorted = coords.clone();
        sorted.sort_by_key(|c| (c.y, c.x));
        sorted.dedup();
        assert_eq!(coords, sorted);
        assert_eq!(coords.len(), 15);
    }

    #[test]
    fn grid_iter_mut_writes() {
        let mut g = Grid::new_filled(3, 2, 0u32);
        for cell in &mut g {
            *cell.value = cell.x + cell.y * 3;
        }
        assert_eq!(g.cells(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn grid_into_iter_owned() {
        let g = Grid::new(2, 1, |x, _| x.to_string());
        let owned: Vec<Cell<String>> = g.into_iter().collect();
        assert_eq!(owned[1].coord(), Coord2::new(1, 0));
        assert_eq!(owned[1].value, "1");
    }

    #[test]
    fn grid_render_default() {
        let g = Grid::new(3, 2, |x, y| x + y * 3);
        expect![[r#"
            0 1 2
            3 4 5"#]]
        .assert_eq(&g.to_string());
    }

    #[test]
    fn grid_render_custom_separators() {
        let g = Grid::new(2, 2, |x, y| if x == y { '#' } else { '.' });
        let config = RenderConfig::new("", "|");
        expect!["#.|.#"].assert_eq(&g.render(&config));
        assert_eq!(format!("{}", g.display_with(&config)), "#.|.#");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn grid_serde_round_trip() {
        let g = Grid::new(2, 2, |x, y| x + y * 2);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"width":2,"height":2,"cells":[0,1,2,3]}"#);
        let back: Grid<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn grid_serde_rejects_bad_length() {
        let result: Result<Grid<u32>, _> =
            serde_json::from_str(r#"{"width":2,"height":2,"cells":[0,1,2]}"#);
        assert!(result.is_err());
    }
}
