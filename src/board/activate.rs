//! Special gem activation: row, column, and type-wide clears

use serde::{Deserialize, Serialize};

use super::cascade::{RemovedCell, ScoreEvent};
use super::cell::{CellKind, Pos, SpecialKind};
use super::grid::Grid;

/// Cells cleared by one special gem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub removed: Vec<RemovedCell>,
    pub score_event: Option<ScoreEvent>,
}

/// A swap that involves a rainbow gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainbowSwap {
    /// Where the rainbow sits before the swap
    pub rainbow: Pos,
    /// Kind of the cell it was swapped with
    pub target: CellKind,
}

/// Activate the special gem sitting at `pos`.
///
/// Empty or plain cells do nothing. `target` only matters for rainbows.
pub fn activate_special(grid: &mut Grid, pos: Pos, target: Option<CellKind>) -> Activation {
    match grid.get(pos).map(|cell| cell.special()) {
        Some(special) => fire_special(grid, pos, special, target),
        None => Activation::default(),
    }
}

/// Apply the effect of `special` from `origin`, whether or not the gem is
/// still on the board. Stripes consumed inside a normal match are already
/// cleared by the time their line blast runs.
pub fn fire_special(
    grid: &mut Grid,
    origin: Pos,
    special: SpecialKind,
    target: Option<CellKind>,
) -> Activation {
    if !grid.contains(origin) {
        return Activation::default();
    }

    match special {
        SpecialKind::None => Activation::default(),
        SpecialKind::StripeH => {
            let line = (0..grid.cols()).map(|col| Pos::new(origin.row, col));
            Activation {
                removed: clear(grid, line.collect()),
                score_event: Some(ScoreEvent::StripeActivate),
            }
        }
        SpecialKind::StripeV => {
            let line = (0..grid.rows()).map(|row| Pos::new(row, origin.col));
            Activation {
                removed: clear(grid, line.collect()),
                score_event: Some(ScoreEvent::StripeActivate),
            }
        }
        SpecialKind::Rainbow => {
            let mut removed = clear(grid, vec![origin]);
            if let Some(CellKind::Veggie(kind)) = target {
                let same_kind: Vec<Pos> = grid
                    .iter()
                    .filter(|(_, cell)| cell.kind() == CellKind::Veggie(kind))
                    .map(|(pos, _)| pos)
                    .collect();
                removed.extend(clear(grid, same_kind));
            }
            Activation {
                removed,
                score_event: Some(ScoreEvent::RainbowActivate),
            }
        }
    }
}

/// Report a rainbow gem in a swap; the first cell is checked first
pub fn check_special_swap(grid: &Grid, a: Pos, b: Pos) -> Option<RainbowSwap> {
    let (first, second) = (grid.get(a)?, grid.get(b)?);
    if first.special() == SpecialKind::Rainbow {
        Some(RainbowSwap {
            rainbow: a,
            target: second.kind(),
        })
    } else if second.special() == SpecialKind::Rainbow {
        Some(RainbowSwap {
            rainbow: b,
            target: first.kind(),
        })
    } else {
        None
    }
}

fn clear(grid: &mut Grid, positions: Vec<Pos>) -> Vec<RemovedCell> {
    positions
        .into_iter()
        .filter_map(|pos| grid.take(pos).map(|cell| RemovedCell { pos, cell }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::cell::{Cell, VeggieKind};

    fn grid(layout: &[&str]) -> Grid {
        Grid::from_layout(layout).unwrap()
    }

    #[test]
    fn test_stripe_h_clears_row() {
        let mut g = grid(&["tce", "bot", "hce"]);
        g.set(Pos::new(1, 1), Some(Cell::stripe_h(VeggieKind::Corn)));
        let result = activate_special(&mut g, Pos::new(1, 1), None);
        assert_eq!(result.score_event, Some(ScoreEvent::StripeActivate));
        assert_eq!(result.removed.len(), 3);
        assert!((0..3).all(|col| g.get(Pos::new(1, col)).is_none()));
        assert_eq!(g.empty_count(), 3);
    }

    #[test]
    fn test_stripe_v_clears_column_around_gaps() {
        let mut g = grid(&["tce", "b.t", "hce"]);
        g.set(Pos::new(0, 1), Some(Cell::stripe_v(VeggieKind::Carrot)));
        let result = activate_special(&mut g, Pos::new(0, 1), None);
        assert_eq!(result.removed.len(), 2);
        assert!((0..3).all(|row| g.get(Pos::new(row, 1)).is_none()));
    }

    #[test]
    fn test_rainbow_clears_target_kind() {
        let mut g = grid(&["t*t", "ctc", "ebt"]);
        let result = activate_special(&mut g, Pos::new(0, 1), Some(CellKind::Veggie(VeggieKind::Tomato)));
        assert_eq!(result.score_event, Some(ScoreEvent::RainbowActivate));
        // Rainbow itself plus four tomatoes
        assert_eq!(result.removed.len(), 5);
        assert_eq!(result.removed[0].cell, Cell::rainbow());
        assert!(g.iter().all(|(_, c)| c.veggie() != Some(VeggieKind::Tomato)));
    }

    #[test]
    fn test_rainbow_with_rainbow_target_clears_only_itself() {
        let mut g = grid(&["**t"]);
        let result = activate_special(&mut g, Pos::new(0, 0), Some(CellKind::Rainbow));
        assert_eq!(result.removed.len(), 1);
        assert_eq!(g.get(Pos::new(0, 1)), Some(&Cell::rainbow()));
    }

    #[test]
    fn test_plain_or_empty_cell_is_noop() {
        let mut g = grid(&["t.c"]);
        assert_eq!(activate_special(&mut g, Pos::new(0, 0), None), Activation::default());
        assert_eq!(activate_special(&mut g, Pos::new(0, 1), None), Activation::default());
        assert_eq!(activate_special(&mut g, Pos::new(4, 4), None), Activation::default());
        assert_eq!(g.empty_count(), 1);
    }

    #[test]
    fn test_fire_special_from_cleared_origin() {
        let mut g = grid(&["t.c", "bot"]);
        let result = fire_special(&mut g, Pos::new(0, 1), SpecialKind::StripeH, None);
        assert_eq!(result.removed.len(), 2);
        assert_eq!(g.empty_count(), 3);
    }

    #[test]
    fn test_check_special_swap() {
        let g = grid(&["*t", "cb"]);
        let swap = check_special_swap(&g, Pos::new(0, 1), Pos::new(0, 0)).unwrap();
        assert_eq!(swap.rainbow, Pos::new(0, 0));
        assert_eq!(swap.target, CellKind::Veggie(VeggieKind::Tomato));
        assert!(check_special_swap(&g, Pos::new(1, 0), Pos::new(1, 1)).is_none());
    }
}
