//! Special gem creation rules
//!
//! - 5+ cells (any shape) -> rainbow
//! - L/T shapes under 5 cells -> score bonus only
//! - 4 in a row -> stripe along the match direction
//! - 3 in a row -> nothing

use serde::Serialize;

use super::cell::{Cell, Pos};
use super::matcher::{Match, MatchShape};

/// A special gem to place after a match is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialSpawn {
    pub pos: Pos,
    pub cell: Cell,
}

/// Decide which special gem (if any) a match creates.
///
/// The gem lands on `swap_pos` when the player's moved cell is part of the
/// match, otherwise on the middle entry of the match's cell list.
pub fn determine_special(m: &Match, swap_pos: Option<Pos>) -> Option<SpecialSpawn> {
    let cell = match (m.len(), m.shape) {
        (5.., _) => Cell::rainbow(),
        (_, MatchShape::L | MatchShape::T) => return None,
        (4, MatchShape::Horizontal) => Cell::stripe_h(m.kind),
        (4, MatchShape::Vertical) => Cell::stripe_v(m.kind),
        _ => return None,
    };
    Some(SpecialSpawn {
        pos: special_position(m, swap_pos)?,
        cell,
    })
}

fn special_position(m: &Match, swap_pos: Option<Pos>) -> Option<Pos> {
    swap_pos
        .filter(|pos| m.contains(*pos))
        .or_else(|| m.cells.get(m.len() / 2).copied())
}
