//! Game session state
//!
//! Everything a level attempt needs lives in one owned `GameSession`.
//! Mutation only happens through its transition methods: `try_swap` starts a
//! turn, `step` advances the cascade, `retry` starts over.

use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cascade::Stage;
use crate::board::{Board, Move, Pos, RemovedCell, SpecialKind, VeggieKind};
use crate::consts::LOW_MOVES_WARNING;
use crate::level::LevelConfig;

/// Current phase of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player's swap
    Playing,
    /// A cascade is in progress; pull steps until the turn ends
    Resolving,
    /// Targets met and score reached
    Complete { stars: u8 },
    /// Out of moves
    Failed,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Complete { .. } | GamePhase::Failed)
    }
}

/// Things the presentation layer may want to react to (sounds, popups)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A swap was accepted and a move spent
    Swapped,
    /// A swap produced no match and was undone
    InvalidSwap,
    /// Moves dropped to the warning threshold
    LowMoves { moves_left: u32 },
    /// Matches cleared; `longest` is the largest match in the batch
    Matched { longest: usize, cascade: u32 },
    /// A match happened at cascade level 1 or deeper
    Combo { cascade: u32 },
    SpecialCreated { pos: Pos, special: SpecialKind },
    SpecialActivated { pos: Pos, special: SpecialKind },
    /// Cells fell or spawned
    Fell,
    /// The board had no valid move and was shuffled
    Shuffled,
    /// The star rating went up mid-level
    StarEarned { stars: u8 },
    LevelComplete { stars: u8 },
    LevelFailed,
}

/// Why a swap was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwapError {
    #[error("the session is not waiting for a move ({0:?})")]
    NotPlaying(GamePhase),
    #[error("({}, {}) is off the board", .0.row, .0.col)]
    OutOfBounds(Pos),
    #[error("({}, {}) is empty", .0.row, .0.col)]
    EmptyCell(Pos),
    #[error("cells are not adjacent")]
    NotAdjacent,
    #[error("swap makes no match")]
    NoMatch,
}

/// One attempt at one level
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    pub(super) level: LevelConfig,
    pub(super) board: Board<R>,
    pub(super) score: u64,
    pub(super) moves_left: u32,
    pub(super) eliminated: BTreeMap<VeggieKind, u32>,
    pub(super) phase: GamePhase,
    /// Star rating already announced this attempt
    pub(super) stars_shown: u8,
    pub(super) low_moves_warned: bool,
    /// Pending cascade work; None when no turn is being resolved
    pub(super) stage: Option<Stage>,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession<Pcg32> {
    /// Start a level with a freshly generated board
    pub fn new(level: LevelConfig, seed: u64) -> Self {
        let board = Board::for_level(&level, seed);
        Self::with_board(level, board)
    }
}

impl<R: Rng> GameSession<R> {
    /// Start a level on a prepared board
    pub fn with_board(level: LevelConfig, board: Board<R>) -> Self {
        log::info!(
            "Level {} start: {}x{}, {} moves, target {}",
            level.number,
            board.rows(),
            board.cols(),
            level.max_moves,
            level.target_score
        );
        if let Err(e) = level.validate() {
            log::warn!("Level {} failed validation: {}", level.number, e);
        }
        let mut session = Self {
            moves_left: level.max_moves,
            eliminated: BTreeMap::new(),
            level,
            board,
            score: 0,
            phase: GamePhase::Playing,
            stars_shown: 0,
            low_moves_warned: false,
            stage: None,
            events: Vec::new(),
        };
        session.reset_counters();
        session
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Eliminated count for each target veggie
    pub fn eliminated(&self) -> &BTreeMap<VeggieKind, u32> {
        &self.eliminated
    }

    pub fn targets_met(&self) -> bool {
        self.level
            .targets
            .iter()
            .all(|t| self.eliminated.get(&t.veggie).copied().unwrap_or(0) >= t.count)
    }

    /// Stars the current score is worth
    pub fn stars(&self) -> u8 {
        self.level.stars.rating(self.score)
    }

    /// Take the queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// A swap that would make a match, for the idle hint
    pub fn hint(&mut self) -> Option<Move> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.board.find_valid_move()
    }

    /// Start the level over on a regenerated board
    pub fn retry(&mut self) {
        log::info!("Level {} retry", self.level.number);
        self.board.init_grid();
        self.reset_counters();
    }

    /// Try the player's swap of `a` and `b`.
    ///
    /// On success a move is spent and the session enters `Resolving`; pull
    /// the cascade with [`GameSession::step`] or [`GameSession::resolve`].
    /// A swap that makes no match is undone and costs nothing.
    pub fn try_swap(&mut self, a: Pos, b: Pos) -> Result<(), SwapError> {
        if self.phase != GamePhase::Playing {
            return Err(SwapError::NotPlaying(self.phase));
        }
        for pos in [a, b] {
            if !self.board.grid().contains(pos) {
                return Err(SwapError::OutOfBounds(pos));
            }
            if self.board.cell(pos).is_none() {
                return Err(SwapError::EmptyCell(pos));
            }
        }
        if !self.board.is_adjacent(a, b) {
            return Err(SwapError::NotAdjacent);
        }

        if let Some(rainbow) = self.board.check_special_swap(a, b) {
            // The rainbow ends up on the other cell's position
            let pos = if rainbow.rainbow == a { b } else { a };
            self.board.swap(a, b);
            self.begin_turn(Stage::Rainbow {
                pos,
                target: rainbow.target,
            });
            return Ok(());
        }

        self.board.swap(a, b);
        if self.board.find_matches().is_empty() {
            self.board.swap(a, b);
            self.events.push(GameEvent::InvalidSwap);
            return Err(SwapError::NoMatch);
        }
        self.begin_turn(Stage::Match {
            cascade: 0,
            swap_pos: Some(b),
        });
        Ok(())
    }

    fn begin_turn(&mut self, stage: Stage) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.events.push(GameEvent::Swapped);
        if self.moves_left <= LOW_MOVES_WARNING && !self.low_moves_warned {
            self.low_moves_warned = true;
            self.events.push(GameEvent::LowMoves {
                moves_left: self.moves_left,
            });
        }
        self.phase = GamePhase::Resolving;
        self.stage = Some(stage);
    }

    /// Count removed target veggies
    pub(super) fn record_eliminations(&mut self, removed: &[RemovedCell]) {
        for r in removed {
            if let Some(count) = r.cell.veggie().and_then(|v| self.eliminated.get_mut(&v)) {
                *count += 1;
            }
        }
    }

    fn reset_counters(&mut self) {
        self.score = 0;
        self.moves_left = self.level.max_moves;
        self.phase = GamePhase::Playing;
        self.stars_shown = 0;
        self.low_moves_warned = false;
        self.stage = None;
        self.events.clear();
        self.eliminated = self.level.targets.iter().map(|t| (t.veggie, 0)).collect();
    }
}
