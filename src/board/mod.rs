//! Match-3 board engine
//!
//! Pure and synchronous. Every operation runs to completion; the caller
//! decides how to pace a cascade (match -> remove -> gravity -> refill ->
//! re-match). Randomness comes only from the board's injected RNG.

pub mod activate;
pub mod cascade;
pub mod cell;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod solver;
pub mod special;
pub mod state;

pub use activate::{Activation, RainbowSwap, activate_special, check_special_swap, fire_special};
pub use cascade::{MatchOutcome, RemovedCell, ScoreEvent, process_matches};
pub use cell::{Cell, CellKind, Move, Pos, SpecialKind, VeggieKind};
pub use gravity::{Fall, Spawn, apply_gravity, fill_empty};
pub use grid::{Grid, LayoutError};
pub use matcher::{Match, MatchShape, find_matches};
pub use solver::{ShuffleOutcome, find_valid_move, try_shuffle};
pub use special::{SpecialSpawn, determine_special};
pub use state::Board;
