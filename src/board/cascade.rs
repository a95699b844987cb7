//! Match removal and special gem placement

use std::collections::HashSet;

use serde::Serialize;

use super::cell::{Cell, Pos};
use super::grid::Grid;
use super::matcher::Match;
use super::special::{SpecialSpawn, determine_special};
use crate::consts::*;

/// Scoring tag for something that happened on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreEvent {
    #[serde(rename = "match_3")]
    Match3,
    #[serde(rename = "match_4")]
    Match4,
    #[serde(rename = "match_5")]
    Match5,
    #[serde(rename = "match_L_T")]
    MatchLT,
    #[serde(rename = "special_stripe_activate")]
    StripeActivate,
    #[serde(rename = "special_rainbow_activate")]
    RainbowActivate,
}

impl ScoreEvent {
    /// Classify a match (corner shapes take priority over length)
    pub fn for_match(m: &Match) -> Self {
        if m.is_corner() {
            ScoreEvent::MatchLT
        } else if m.len() >= 5 {
            ScoreEvent::Match5
        } else if m.len() == 4 {
            ScoreEvent::Match4
        } else {
            ScoreEvent::Match3
        }
    }

    /// Base points before any cascade multiplier
    pub fn points(&self) -> u64 {
        match self {
            ScoreEvent::Match3 => SCORE_MATCH_3,
            ScoreEvent::Match4 => SCORE_MATCH_4,
            ScoreEvent::Match5 => SCORE_MATCH_5,
            ScoreEvent::MatchLT => SCORE_MATCH_L_T,
            ScoreEvent::StripeActivate => SCORE_STRIPE_ACTIVATE,
            ScoreEvent::RainbowActivate => SCORE_RAINBOW_ACTIVATE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreEvent::Match3 => "match_3",
            ScoreEvent::Match4 => "match_4",
            ScoreEvent::Match5 => "match_5",
            ScoreEvent::MatchLT => "match_L_T",
            ScoreEvent::StripeActivate => "special_stripe_activate",
            ScoreEvent::RainbowActivate => "special_rainbow_activate",
        }
    }
}

/// A cell taken off the board, as it was before removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemovedCell {
    pub pos: Pos,
    pub cell: Cell,
}

/// Result of clearing a batch of matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub removed: Vec<RemovedCell>,
    pub specials: Vec<SpecialSpawn>,
    pub score_events: Vec<ScoreEvent>,
}

/// Clear `matches` from the grid and place any special gems they create.
///
/// A position is removed at most once even when matches overlap. Positions
/// that receive a new special are overwritten instead of removed.
pub fn process_matches(grid: &mut Grid, matches: &[Match], swap_pos: Option<Pos>) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    let mut hosts = HashSet::new();

    for m in matches {
        outcome.score_events.push(ScoreEvent::for_match(m));
        if let Some(spawn) = determine_special(m, swap_pos) {
            // First special claiming a position wins
            if hosts.insert(spawn.pos) {
                outcome.specials.push(spawn);
            }
        }
    }

    let mut seen = HashSet::new();
    for pos in matches.iter().flat_map(|m| m.cells.iter().copied()) {
        if hosts.contains(&pos) || !seen.insert(pos) {
            continue;
        }
        if let Some(&cell) = grid.get(pos) {
            outcome.removed.push(RemovedCell { pos, cell });
        }
    }

    for removed in &outcome.removed {
        grid.set(removed.pos, None);
    }
    for spawn in &outcome.specials {
        grid.set(spawn.pos, Some(spawn.cell));
    }

    outcome
}
