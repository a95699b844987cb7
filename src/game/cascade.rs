//! Pull-based cascade resolution
//!
//! A turn is resolved one observable step at a time so a presentation layer
//! can animate between steps. The pending work is stored on the session as a
//! `Stage`; each call to `step` runs exactly one stage transition that the
//! caller can see.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{GameEvent, GamePhase, GameSession};
use crate::board::{
    Activation, CellKind, Fall, Match, MatchOutcome, Pos, RemovedCell, ScoreEvent, ShuffleOutcome, Spawn,
    SpecialKind,
};
use crate::combo_multiplier;

/// One observable step of a turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CascadeStep {
    /// A swapped rainbow cleared itself and every cell of the target kind
    RainbowBlast {
        origin: Pos,
        activation: Activation,
        points: u64,
    },
    /// A batch of matches was cleared at `cascade` depth
    Matched {
        cascade: u32,
        multiplier: f64,
        outcome: MatchOutcome,
        points: u64,
    },
    /// A stripe gem consumed by a match cleared its line
    LineBlast {
        origin: Pos,
        special: SpecialKind,
        activation: Activation,
        points: u64,
    },
    /// Cells fell into gaps and new cells spawned
    Settled { falls: Vec<Fall>, spawns: Vec<Spawn> },
    /// The board is at rest; `phase` is where the session ended up
    TurnEnded {
        phase: GamePhase,
        shuffled: Option<ShuffleOutcome>,
    },
}

/// Work left in the current turn
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Stage {
    Rainbow { pos: Pos, target: CellKind },
    Match { cascade: u32, swap_pos: Option<Pos> },
    Fire { cascade: u32, pending: VecDeque<RemovedCell> },
    Settle { cascade: u32 },
    Finish,
}

/// Iterator over the remaining steps of the current turn
pub struct Cascade<'a, R = Pcg32> {
    session: &'a mut GameSession<R>,
}

impl<R: Rng> Iterator for Cascade<'_, R> {
    type Item = CascadeStep;

    fn next(&mut self) -> Option<CascadeStep> {
        self.session.step()
    }
}

impl<R: Rng> FusedIterator for Cascade<'_, R> {}

impl<R: Rng> GameSession<R> {
    /// Advance the current turn by one step; None when no turn is pending
    pub fn step(&mut self) -> Option<CascadeStep> {
        loop {
            match self.stage.take()? {
                Stage::Rainbow { pos, target } => return Some(self.rainbow_blast(pos, target)),
                Stage::Match { cascade, swap_pos } => {
                    let matches = self.board.find_matches();
                    if !matches.is_empty() {
                        return Some(self.clear_matches(&matches, cascade, swap_pos));
                    }
                    // Nothing to clear; settle any gaps left by a blast, then
                    // look again at the same depth
                    match self.settle() {
                        Some(step) => {
                            self.stage = Some(Stage::Match { cascade, swap_pos: None });
                            return Some(step);
                        }
                        None => self.stage = Some(Stage::Finish),
                    }
                }
                Stage::Fire { cascade, mut pending } => match pending.pop_front() {
                    Some(stripe) => {
                        self.stage = Some(Stage::Fire { cascade, pending });
                        return Some(self.line_blast(stripe));
                    }
                    None => self.stage = Some(Stage::Settle { cascade }),
                },
                Stage::Settle { cascade } => {
                    self.stage = Some(Stage::Match {
                        cascade: cascade + 1,
                        swap_pos: None,
                    });
                    if let Some(step) = self.settle() {
                        return Some(step);
                    }
                }
                Stage::Finish => return Some(self.finish_turn()),
            }
        }
    }

    /// Pull the rest of the current turn as an iterator
    pub fn resolve(&mut self) -> Cascade<'_, R> {
        Cascade { session: self }
    }

    fn rainbow_blast(&mut self, pos: Pos, target: CellKind) -> CascadeStep {
        let activation = self.board.activate_special(pos, Some(target));
        let points = flat_points(&activation);
        log::debug!(
            "Rainbow at ({}, {}) cleared {} cells for {}",
            pos.row,
            pos.col,
            activation.removed.len(),
            points
        );
        self.score += points;
        self.record_eliminations(&activation.removed);
        self.events.push(GameEvent::SpecialActivated {
            pos,
            special: SpecialKind::Rainbow,
        });
        self.stage = Some(Stage::Match {
            cascade: 0,
            swap_pos: None,
        });
        CascadeStep::RainbowBlast {
            origin: pos,
            activation,
            points,
        }
    }

    fn clear_matches(&mut self, matches: &[Match], cascade: u32, swap_pos: Option<Pos>) -> CascadeStep {
        let longest = matches.iter().map(Match::len).max().unwrap_or(0);
        let outcome = self.board.process_matches(matches, swap_pos);
        let multiplier = combo_multiplier(cascade);
        let points = match_points(&outcome.score_events, multiplier);
        log::debug!(
            "Cascade {}: {} matches, {} cells, {} points (x{})",
            cascade,
            matches.len(),
            outcome.removed.len(),
            points,
            multiplier
        );

        self.score += points;
        self.record_eliminations(&outcome.removed);
        self.events.push(GameEvent::Matched { longest, cascade });
        if cascade >= 1 {
            self.events.push(GameEvent::Combo { cascade });
        }
        for spawn in &outcome.specials {
            self.events.push(GameEvent::SpecialCreated {
                pos: spawn.pos,
                special: spawn.cell.special(),
            });
        }

        // Stripes consumed by the match fire after it, one at a time
        let pending = outcome
            .removed
            .iter()
            .filter(|r| matches!(r.cell.special(), SpecialKind::StripeH | SpecialKind::StripeV))
            .copied()
            .collect();
        self.stage = Some(Stage::Fire { cascade, pending });

        CascadeStep::Matched {
            cascade,
            multiplier,
            outcome,
            points,
        }
    }

    fn line_blast(&mut self, stripe: RemovedCell) -> CascadeStep {
        let special = stripe.cell.special();
        let activation = self.board.fire_special(stripe.pos, special, None);
        let points = flat_points(&activation);
        self.score += points;
        self.record_eliminations(&activation.removed);
        self.events.push(GameEvent::SpecialActivated {
            pos: stripe.pos,
            special,
        });
        CascadeStep::LineBlast {
            origin: stripe.pos,
            special,
            activation,
            points,
        }
    }

    /// Gravity then refill; None when nothing moved
    fn settle(&mut self) -> Option<CascadeStep> {
        let falls = self.board.apply_gravity();
        let spawns = self.board.fill_empty();
        if falls.is_empty() && spawns.is_empty() {
            return None;
        }
        self.events.push(GameEvent::Fell);
        Some(CascadeStep::Settled { falls, spawns })
    }

    fn finish_turn(&mut self) -> CascadeStep {
        let stars = self.stars();
        let mut shuffled = None;

        self.phase = if self.targets_met() && self.score >= self.level.target_score {
            log::info!(
                "Level {} complete: {} points, {} stars",
                self.level.number,
                self.score,
                stars
            );
            self.events.push(GameEvent::LevelComplete { stars });
            GamePhase::Complete { stars }
        } else if self.moves_left == 0 {
            log::info!("Level {} failed with {} points", self.level.number, self.score);
            self.events.push(GameEvent::LevelFailed);
            GamePhase::Failed
        } else {
            if self.board.find_valid_move().is_none() {
                let outcome = self.board.shuffle();
                log::info!("Dead board after turn: {:?}", outcome);
                self.events.push(GameEvent::Shuffled);
                shuffled = Some(outcome);
            }
            if stars > self.stars_shown {
                self.events.push(GameEvent::StarEarned { stars });
            }
            GamePhase::Playing
        };
        self.stars_shown = self.stars_shown.max(stars);

        CascadeStep::TurnEnded {
            phase: self.phase,
            shuffled,
        }
    }
}

/// Match points at a multiplier, floored per event
fn match_points(events: &[ScoreEvent], multiplier: f64) -> u64 {
    events
        .iter()
        .map(|e| (e.points() as f64 * multiplier).floor() as u64)
        .sum()
}

fn flat_points(activation: &Activation) -> u64 {
    activation.score_event.map_or(0, |e| e.points())
}
