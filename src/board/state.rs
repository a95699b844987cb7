//! The board: grid, allowed veggie kinds, and the random source

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::activate::{self, Activation, RainbowSwap};
use super::cascade::{self, MatchOutcome};
use super::cell::{Cell, CellKind, Move, Pos, SpecialKind, VeggieKind};
use super::gravity::{self, Fall, Spawn};
use super::grid::{Grid, LayoutError};
use super::matcher::{self, Match};
use super::solver::{self, ShuffleOutcome};
use crate::consts::*;
use crate::level::LevelConfig;

/// A match-3 board for one level attempt.
///
/// All mutation goes through methods; the grid itself is only lent out
/// read-only. The random source is generic so tests can seed or replace it.
#[derive(Debug, Clone)]
pub struct Board<R = Pcg32> {
    grid: Grid,
    kinds: Vec<VeggieKind>,
    rng: R,
}

impl Board<Pcg32> {
    /// Generate a playable board from a seed
    pub fn new(rows: usize, cols: usize, kinds: &[VeggieKind], seed: u64) -> Self {
        Self::with_rng(rows, cols, kinds, Pcg32::seed_from_u64(seed))
    }

    /// Generate a playable board for a level
    pub fn for_level(level: &LevelConfig, seed: u64) -> Self {
        Self::new(level.rows, level.cols, &level.veggies, seed)
    }
}

impl<R: Rng> Board<R> {
    /// Generate a playable board using `rng`
    pub fn with_rng(rows: usize, cols: usize, kinds: &[VeggieKind], rng: R) -> Self {
        let mut board = Self {
            grid: Grid::new(rows, cols),
            kinds: allowed_kinds(kinds),
            rng,
        };
        board.init_grid();
        board
    }

    /// Build a board from a text layout without generating anything.
    ///
    /// See [`Grid::from_layout`] for the symbols. Refills draw from `kinds`.
    pub fn from_layout(layout: &[&str], kinds: &[VeggieKind], rng: R) -> Result<Self, LayoutError> {
        Ok(Self {
            grid: Grid::from_layout(layout)?,
            kinds: allowed_kinds(kinds),
            rng,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn kinds(&self) -> &[VeggieKind] {
        &self.kinds
    }

    /// Read-only view of the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `pos`; None when empty or out of bounds
    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.grid.get(pos)
    }

    /// Overwrite one slot (scenario setup and tooling)
    pub fn set_cell(&mut self, pos: Pos, cell: Option<Cell>) {
        self.grid.set(pos, cell);
    }

    pub fn is_adjacent(&self, a: Pos, b: Pos) -> bool {
        a.is_adjacent(b)
    }

    /// Exchange two cells unconditionally; legality is the caller's call
    pub fn swap(&mut self, a: Pos, b: Pos) {
        self.grid.swap(a, b);
    }

    pub fn find_matches(&self) -> Vec<Match> {
        matcher::find_matches(&self.grid)
    }

    pub fn process_matches(&mut self, matches: &[Match], swap_pos: Option<Pos>) -> MatchOutcome {
        cascade::process_matches(&mut self.grid, matches, swap_pos)
    }

    pub fn activate_special(&mut self, pos: Pos, target: Option<CellKind>) -> Activation {
        activate::activate_special(&mut self.grid, pos, target)
    }

    /// Run a special's effect from `origin` even if the gem was already removed
    pub fn fire_special(&mut self, origin: Pos, special: SpecialKind, target: Option<CellKind>) -> Activation {
        activate::fire_special(&mut self.grid, origin, special, target)
    }

    pub fn check_special_swap(&self, a: Pos, b: Pos) -> Option<RainbowSwap> {
        activate::check_special_swap(&self.grid, a, b)
    }

    pub fn apply_gravity(&mut self) -> Vec<Fall> {
        gravity::apply_gravity(&mut self.grid)
    }

    pub fn fill_empty(&mut self) -> Vec<Spawn> {
        gravity::fill_empty(&mut self.grid, &self.kinds, &mut self.rng)
    }

    /// First swap that produces a match (the hint and dead-board check)
    pub fn find_valid_move(&mut self) -> Option<Move> {
        solver::find_valid_move(&mut self.grid)
    }

    /// Rearrange plain cells into a match-free, solvable layout, rebuilding
    /// the grid when the shuffle budget runs out
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        if solver::try_shuffle(&mut self.grid, &mut self.rng) {
            return ShuffleOutcome::Shuffled;
        }
        log::info!(
            "No solvable shuffle in {} attempts, regenerating board",
            SHUFFLE_ATTEMPTS
        );
        self.init_grid();
        ShuffleOutcome::Regenerated
    }

    /// Refill the whole grid without starting matches, then make sure a
    /// valid move exists
    pub fn init_grid(&mut self) {
        for _ in 0..MAX_REGENERATIONS {
            self.fill_without_matches();
            if self.find_valid_move().is_some() || solver::try_shuffle(&mut self.grid, &mut self.rng) {
                return;
            }
            log::debug!("Generated a dead {}x{} board, starting over", self.rows(), self.cols());
        }
        log::warn!(
            "No solvable {}x{} board with {} kinds after {} regenerations",
            self.rows(),
            self.cols(),
            self.kinds.len(),
            MAX_REGENERATIONS
        );
    }

    /// Deep copy of every row
    pub fn snapshot(&self) -> Vec<Vec<Option<Cell>>> {
        self.grid.snapshot()
    }

    fn fill_without_matches(&mut self) {
        self.grid = Grid::new(self.rows(), self.cols());
        for pos in self.grid.positions() {
            let kind = self.kind_without_match(pos);
            self.grid.set(pos, Some(Cell::plain(kind)));
        }
    }

    /// Random kind that does not complete a run with the two cells to the
    /// left or the two cells above
    fn kind_without_match(&mut self, pos: Pos) -> VeggieKind {
        let grid = &self.grid;
        let same = |kind: VeggieKind, a: Option<Pos>, b: Option<Pos>| {
            let is_kind = |p: Option<Pos>| p.and_then(|p| grid.get(p)).and_then(Cell::veggie) == Some(kind);
            is_kind(a) && is_kind(b)
        };
        let left = |n: usize| pos.col.checked_sub(n).map(|col| Pos::new(pos.row, col));
        let up = |n: usize| pos.row.checked_sub(n).map(|row| Pos::new(row, pos.col));

        for _ in 0..FILL_ATTEMPTS {
            let kind = gravity::random_kind(&self.kinds, &mut self.rng);
            if !same(kind, left(1), left(2)) && !same(kind, up(1), up(2)) {
                return kind;
            }
        }
        log::debug!("Fill fallback at ({}, {})", pos.row, pos.col);
        self.kinds[0]
    }
}

fn allowed_kinds(kinds: &[VeggieKind]) -> Vec<VeggieKind> {
    if kinds.is_empty() {
        log::warn!("Board created without veggie kinds, using all {}", VeggieKind::ALL.len());
        return VeggieKind::ALL.to_vec();
    }
    kinds.to_vec()
}
