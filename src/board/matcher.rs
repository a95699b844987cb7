//! Match detection
//!
//! Scans rows then columns for maximal runs of three or more cells of the
//! same veggie, then merges a horizontal and a vertical run of the same kind
//! that share a cell into a single L or T shape.

use serde::Serialize;

use super::cell::{CellKind, Pos, VeggieKind};
use super::grid::Grid;
use crate::consts::MIN_RUN;

/// Geometry of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchShape {
    Horizontal,
    Vertical,
    /// Two runs meeting at an end of both
    L,
    /// Two runs where the shared cell is inside at least one of them
    T,
}

/// A set of same-kind cells to clear
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Unique cells; for merged shapes the horizontal run comes first
    pub cells: Vec<Pos>,
    pub kind: VeggieKind,
    pub shape: MatchShape,
}

impl Match {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// L and T shapes
    pub fn is_corner(&self) -> bool {
        matches!(self.shape, MatchShape::L | MatchShape::T)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

/// A maximal straight run, before merging
struct Run {
    cells: Vec<Pos>,
    kind: VeggieKind,
}

impl Run {
    fn is_end(&self, pos: Pos) -> bool {
        self.cells.first() == Some(&pos) || self.cells.last() == Some(&pos)
    }

    fn shared_cell(&self, other: &Run) -> Option<Pos> {
        self.cells.iter().copied().find(|p| other.cells.contains(p))
    }
}

/// Veggie kind at `pos`; rainbow gems and empty slots never match
fn matchable(grid: &Grid, pos: Pos) -> Option<VeggieKind> {
    match grid.get(pos)?.kind() {
        CellKind::Veggie(kind) => Some(kind),
        CellKind::Rainbow => None,
    }
}

/// Collect runs along `lines` lines of `len` cells each; `at(line, i)` maps to a grid position
fn scan_runs(grid: &Grid, lines: usize, len: usize, at: impl Fn(usize, usize) -> Pos) -> Vec<Run> {
    let mut runs = Vec::new();
    for line in 0..lines {
        let mut i = 0;
        while i < len {
            let Some(kind) = matchable(grid, at(line, i)) else {
                i += 1;
                continue;
            };
            let mut end = i + 1;
            while end < len && matchable(grid, at(line, end)) == Some(kind) {
                end += 1;
            }
            if end - i >= MIN_RUN {
                runs.push(Run {
                    cells: (i..end).map(|j| at(line, j)).collect(),
                    kind,
                });
            }
            i = end;
        }
    }
    runs
}

/// Find every match on the grid.
///
/// Order: merged L/T shapes, then remaining horizontal runs, then remaining
/// vertical runs. Calling twice on an unchanged grid gives equal results.
pub fn find_matches(grid: &Grid) -> Vec<Match> {
    let horizontal = scan_runs(grid, grid.rows(), grid.cols(), Pos::new);
    let vertical = scan_runs(grid, grid.cols(), grid.rows(), |col, row| Pos::new(row, col));

    let mut used_h = vec![false; horizontal.len()];
    let mut used_v = vec![false; vertical.len()];
    let mut matches = Vec::new();

    for (hi, h) in horizontal.iter().enumerate() {
        for (vi, v) in vertical.iter().enumerate() {
            if used_h[hi] || used_v[vi] || h.kind != v.kind {
                continue;
            }
            let Some(shared) = h.shared_cell(v) else {
                continue;
            };

            let mut cells = h.cells.clone();
            cells.extend(v.cells.iter().copied().filter(|p| *p != shared));
            let shape = if h.is_end(shared) && v.is_end(shared) {
                MatchShape::L
            } else {
                MatchShape::T
            };
            matches.push(Match {
                cells,
                kind: h.kind,
                shape,
            });
            used_h[hi] = true;
            used_v[vi] = true;
        }
    }

    let straight = |runs: Vec<Run>, used: Vec<bool>, shape: MatchShape| {
        runs.into_iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(move |(run, _)| Match {
                cells: run.cells,
                kind: run.kind,
                shape,
            })
    };
    matches.extend(straight(horizontal, used_h, MatchShape::Horizontal));
    matches.extend(straight(vertical, used_v, MatchShape::Vertical));

    matches
}
