//! Gravity and refill

use rand::Rng;
use serde::Serialize;

use super::cell::{Cell, Pos, VeggieKind};
use super::grid::Grid;

/// A cell that dropped to a lower row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fall {
    pub from: Pos,
    pub to: Pos,
}

/// A freshly spawned cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spawn {
    pub pos: Pos,
    pub cell: Cell,
    /// Row above the board the cell appears to fall from (negative)
    pub entry_row: isize,
}

/// Draw a plain veggie uniformly from `kinds`
pub fn random_kind<R: Rng + ?Sized>(kinds: &[VeggieKind], rng: &mut R) -> VeggieKind {
    kinds[rng.random_range(0..kinds.len())]
}

/// Compact every column downward, keeping the order of surviving cells
pub fn apply_gravity(grid: &mut Grid) -> Vec<Fall> {
    let mut falls = Vec::new();
    for col in 0..grid.cols() {
        let mut write_row = grid.rows();
        for row in (0..grid.rows()).rev() {
            let from = Pos::new(row, col);
            if grid.get(from).is_none() {
                continue;
            }
            write_row -= 1;
            if row != write_row {
                let to = Pos::new(write_row, col);
                grid.swap(from, to);
                falls.push(Fall { from, to });
            }
        }
    }
    falls
}

/// Fill every empty slot with a random plain veggie, column by column from the top
pub fn fill_empty<R: Rng + ?Sized>(grid: &mut Grid, kinds: &[VeggieKind], rng: &mut R) -> Vec<Spawn> {
    let mut spawns = Vec::new();
    for col in 0..grid.cols() {
        let empty = (0..grid.rows())
            .filter(|&row| grid.get(Pos::new(row, col)).is_none())
            .count();
        let mut filled = 0;
        for row in 0..grid.rows() {
            let pos = Pos::new(row, col);
            if grid.get(pos).is_some() {
                continue;
            }
            let cell = Cell::plain(random_kind(kinds, rng));
            grid.set(pos, Some(cell));
            spawns.push(Spawn {
                pos,
                cell,
                entry_row: -((empty - filled) as isize),
            });
            filled += 1;
        }
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_gravity_compacts_column() {
        let mut grid = Grid::from_layout(&["t", ".", "c", "."]).unwrap();
        let falls = apply_gravity(&mut grid);

        assert_eq!(grid.get(Pos::new(0, 0)), None);
        assert_eq!(grid.get(Pos::new(1, 0)), None);
        assert_eq!(grid.get(Pos::new(2, 0)), Some(&Cell::plain(VeggieKind::Tomato)));
        assert_eq!(grid.get(Pos::new(3, 0)), Some(&Cell::plain(VeggieKind::Carrot)));

        assert_eq!(falls.len(), 2);
        assert!(falls.contains(&Fall {
            from: Pos::new(0, 0),
            to: Pos::new(2, 0)
        }));
        assert!(falls.contains(&Fall {
            from: Pos::new(2, 0),
            to: Pos::new(3, 0)
        }));
    }

    #[test]
    fn test_gravity_on_full_column_is_noop() {
        let mut grid = Grid::from_layout(&["tc", "ce", "bo"]).unwrap();
        let before = grid.clone();
        assert!(apply_gravity(&mut grid).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fill_empty_entry_rows() {
        let mut grid = Grid::from_layout(&[".t", ".c", "eb"]).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let spawns = fill_empty(&mut grid, &[VeggieKind::Corn], &mut rng);

        assert!(grid.is_full());
        assert_eq!(spawns.len(), 2);
        assert_eq!(spawns[0].pos, Pos::new(0, 0));
        assert_eq!(spawns[0].entry_row, -2);
        assert_eq!(spawns[1].pos, Pos::new(1, 0));
        assert_eq!(spawns[1].entry_row, -1);
        assert!(spawns.iter().all(|s| s.cell == Cell::plain(VeggieKind::Corn)));
    }

    #[test]
    fn test_fill_draws_from_allowed_kinds() {
        let mut grid = Grid::new(4, 4);
        let kinds = [VeggieKind::Tomato, VeggieKind::Chili];
        let mut rng = Pcg32::seed_from_u64(3);
        fill_empty(&mut grid, &kinds, &mut rng);
        assert!(grid.iter().all(|(_, c)| kinds.contains(&c.veggie().unwrap())));
    }
}
