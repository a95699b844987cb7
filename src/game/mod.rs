//! Turn controller
//!
//! `GameSession` owns the board and the level's counters. A turn starts with
//! `try_swap` and is resolved by pulling `CascadeStep`s until `TurnEnded`.

mod cascade;
mod state;

pub use cascade::{Cascade, CascadeStep};
pub use state::{GameEvent, GamePhase, GameSession, SwapError};
