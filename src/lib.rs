//! Veggie Match - a match-3 garden puzzle
//!
//! Core modules:
//! - `board`: Deterministic board engine (matching, specials, gravity, shuffling)
//! - `game`: Turn controller state machine and cascade steps
//! - `level`: Data-driven level configuration
//! - `progress`: Best stars per level and level unlocking
//! - `web`: Browser binding (wasm32 only)

pub mod board;
pub mod game;
pub mod level;
pub mod progress;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::{Board, Cell, CellKind, Move, Pos, SpecialKind, VeggieKind};
pub use game::{Cascade, CascadeStep, GameEvent, GamePhase, GameSession, SwapError};
pub use level::{LevelConfig, LevelError};
pub use progress::Progress;

/// Game configuration constants
pub mod consts {
    /// Shortest run that counts as a match
    pub const MIN_RUN: usize = 3;
    /// Fewest distinct veggie kinds a level may use; with fewer, a board
    /// free of matches cannot be filled
    pub const MIN_VEGGIE_KINDS: usize = 3;

    /// Random draws per cell before the initial fill accepts the first kind
    pub const FILL_ATTEMPTS: usize = 100;
    /// Permutations tried before a shuffle gives up and regenerates
    pub const SHUFFLE_ATTEMPTS: usize = 50;
    /// Full regenerations before accepting a dead board
    pub const MAX_REGENERATIONS: usize = 20;

    /// Points per score event
    pub const SCORE_MATCH_3: u64 = 50;
    pub const SCORE_MATCH_4: u64 = 120;
    pub const SCORE_MATCH_5: u64 = 300;
    pub const SCORE_MATCH_L_T: u64 = 200;
    pub const SCORE_STRIPE_ACTIVATE: u64 = 150;
    pub const SCORE_RAINBOW_ACTIVATE: u64 = 500;

    /// Cascade multiplier: base + step * cascade level, capped
    pub const COMBO_BASE: f64 = 1.0;
    pub const COMBO_STEP: f64 = 0.5;
    pub const COMBO_MAX: f64 = 5.0;

    /// Moves left at which the low-moves warning fires
    pub const LOW_MOVES_WARNING: u32 = 3;
    /// Idle time before the UI should show a hint (ms)
    pub const HINT_DELAY_MS: u32 = 5000;
}

/// Score multiplier for a cascade level (0 = the player's own match)
#[inline]
pub fn combo_multiplier(cascade: u32) -> f64 {
    use consts::*;
    (COMBO_BASE + COMBO_STEP * cascade as f64).min(COMBO_MAX)
}
