//! Valid-move search and solvable shuffling

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::cell::{Cell, Move, Pos, SpecialKind};
use super::grid::Grid;
use super::matcher::find_matches;
use crate::consts::SHUFFLE_ATTEMPTS;

/// How a shuffle request was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShuffleOutcome {
    /// Plain cells were permuted; specials kept their place
    Shuffled,
    /// No acceptable permutation was found and the grid was rebuilt
    Regenerated,
}

fn swap_makes_match(grid: &mut Grid, a: Pos, b: Pos) -> bool {
    if grid.get(b).is_none() {
        return false;
    }
    grid.swap(a, b);
    let found = !find_matches(grid).is_empty();
    grid.swap(a, b);
    found
}

/// First swap that yields a match, scanning row-major and trying right then down.
///
/// A rainbow gem pairs with any present neighbour (right, down, left, up).
/// The grid is left exactly as it was found.
pub fn find_valid_move(grid: &mut Grid) -> Option<Move> {
    for pos in grid.positions() {
        let Some(cell) = grid.get(pos).copied() else {
            continue;
        };

        let right = Pos::new(pos.row, pos.col + 1);
        if swap_makes_match(grid, pos, right) {
            return Some(Move::new(pos, right));
        }
        let down = Pos::new(pos.row + 1, pos.col);
        if swap_makes_match(grid, pos, down) {
            return Some(Move::new(pos, down));
        }

        if cell.special() == SpecialKind::Rainbow {
            let mut neighbours = vec![right, down];
            if pos.col > 0 {
                neighbours.push(Pos::new(pos.row, pos.col - 1));
            }
            if pos.row > 0 {
                neighbours.push(Pos::new(pos.row - 1, pos.col));
            }
            if let Some(other) = neighbours.into_iter().find(|n| grid.get(*n).is_some()) {
                return Some(Move::new(pos, other));
            }
        }
    }
    None
}

/// Permute the kinds of plain cells until the grid has no match and at least
/// one valid move. Returns false when the attempt budget runs out, leaving
/// the last permutation in place.
pub fn try_shuffle<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> bool {
    let (positions, mut kinds): (Vec<Pos>, Vec<_>) = grid
        .iter()
        .filter(|(_, cell)| !cell.is_special())
        .filter_map(|(pos, cell)| Some((pos, cell.veggie()?)))
        .unzip();

    for attempt in 0..SHUFFLE_ATTEMPTS {
        kinds.shuffle(rng);
        for (&pos, &kind) in positions.iter().zip(&kinds) {
            grid.set(pos, Some(Cell::plain(kind)));
        }
        if find_matches(grid).is_empty() && find_valid_move(grid).is_some() {
            log::debug!("Shuffle settled after {} attempt(s)", attempt + 1);
            return true;
        }
    }
    false
}
