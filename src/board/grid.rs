//! Flat row-major cell storage
//!
//! `None` marks an empty slot. Empty slots only exist while a cascade is
//! being resolved; a board at rest is always full.

use thiserror::Error;

use super::cell::{Cell, Pos, VeggieKind};

/// Symbol for an empty slot in text layouts
pub const EMPTY_SYMBOL: char = '.';
/// Symbol for a rainbow gem in text layouts
pub const RAINBOW_SYMBOL: char = '*';

/// Errors from parsing a text layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown symbol {symbol:?} at row {row}, col {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}

/// Fixed-size 2D grid of optional cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Parse a grid from one string per row.
    ///
    /// Veggies use their [`VeggieKind::symbol`], `*` is a rainbow gem and
    /// `.` is an empty slot. Whitespace is ignored.
    pub fn from_layout(layout: &[&str]) -> Result<Self, LayoutError> {
        let parsed: Vec<Vec<char>> = layout
            .iter()
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let cols = parsed.first().map(Vec::len).ok_or(LayoutError::Empty)?;

        let mut grid = Self::new(parsed.len(), cols);
        for (row, symbols) in parsed.iter().enumerate() {
            if symbols.len() != cols {
                return Err(LayoutError::Ragged {
                    row,
                    found: symbols.len(),
                    expected: cols,
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell = match symbol {
                    EMPTY_SYMBOL => None,
                    RAINBOW_SYMBOL => Some(Cell::rainbow()),
                    other => Some(Cell::plain(VeggieKind::from_symbol(other).ok_or(
                        LayoutError::UnknownSymbol {
                            row,
                            col,
                            symbol: other,
                        },
                    )?)),
                };
                grid.set(Pos::new(row, col), cell);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    /// Cell at `pos`; None when empty or out of bounds
    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Overwrite a slot. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Pos, cell: Option<Cell>) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Empty a slot, returning what was there
    pub fn take(&mut self, pos: Pos) -> Option<Cell> {
        self.index(pos).and_then(|i| self.cells[i].take())
    }

    /// Exchange two slots. No-op if either is out of bounds.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        if let (Some(i), Some(j)) = (self.index(a), self.index(b)) {
            self.cells.swap(i, j);
        }
    }

    /// All coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Pos::new(i / cols, i % cols))
    }

    /// Present cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|c| (Pos::new(i / self.cols, i % self.cols), c)))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Deep copy as nested rows
    pub fn snapshot(&self) -> Vec<Vec<Option<Cell>>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[_]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = Grid::from_layout(&["tc", "eb"]).unwrap();
        assert!(grid.get(Pos::new(0, 2)).is_none());
        assert!(grid.get(Pos::new(2, 0)).is_none());
        assert_eq!(grid.get(Pos::new(1, 1)), Some(&Cell::plain(VeggieKind::Broccoli)));
    }

    #[test]
    fn test_layout_symbols() {
        let grid = Grid::from_layout(&["t * .", "o h c"]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(Pos::new(0, 1)), Some(&Cell::rainbow()));
        assert!(grid.get(Pos::new(0, 2)).is_none());
        assert_eq!(grid.empty_count(), 1);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(Grid::from_layout(&[]), Err(LayoutError::Empty));
        assert_eq!(
            Grid::from_layout(&["tc", "e"]),
            Err(LayoutError::Ragged {
                row: 1,
                found: 1,
                expected: 2
            })
        );
        assert_eq!(
            Grid::from_layout(&["tx"]),
            Err(LayoutError::UnknownSymbol {
                row: 0,
                col: 1,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_swap_and_take() {
        let mut grid = Grid::from_layout(&["tc"]).unwrap();
        grid.swap(Pos::new(0, 0), Pos::new(0, 1));
        assert_eq!(grid.get(Pos::new(0, 0)), Some(&Cell::plain(VeggieKind::Carrot)));

        // Out-of-bounds swap leaves the grid alone
        let before = grid.clone();
        grid.swap(Pos::new(0, 0), Pos::new(0, 5));
        assert_eq!(grid, before);

        assert_eq!(grid.take(Pos::new(0, 1)), Some(Cell::plain(VeggieKind::Tomato)));
        assert!(grid.get(Pos::new(0, 1)).is_none());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut grid = Grid::from_layout(&["tc", "eb"]).unwrap();
        let snap = grid.snapshot();
        grid.take(Pos::new(0, 0));
        assert_eq!(snap[0][0], Some(Cell::plain(VeggieKind::Tomato)));
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[1].len(), 2);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(2, 3);
        let positions: Vec<Pos> = grid.positions().collect();
        assert_eq!(positions[0], Pos::new(0, 0));
        assert_eq!(positions[2], Pos::new(0, 2));
        assert_eq!(positions[3], Pos::new(1, 0));
        assert_eq!(positions.len(), 6);
    }
}
