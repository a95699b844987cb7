//! Level configuration
//!
//! Levels are plain data: grid size, the veggies in play, the move budget,
//! score and elimination targets, and star thresholds. The built-in table
//! covers the five shipped levels; custom levels load from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::VeggieKind;
use crate::consts::{MIN_RUN, MIN_VEGGIE_KINDS};

/// Number of built-in levels
pub const LEVEL_COUNT: u32 = 5;

/// Errors from loading or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid {rows}x{cols} is smaller than {min}x{min}")]
    TooSmall { rows: usize, cols: usize, min: usize },
    #[error("level uses {found} veggie kinds, needs at least {min}")]
    TooFewVeggies { found: usize, min: usize },
    #[error("veggie {0:?} is listed more than once")]
    DuplicateVeggie(VeggieKind),
    #[error("target {0:?} is not one of the level's veggies")]
    UnknownTarget(VeggieKind),
    #[error("star thresholds must be ascending ({one} <= {two} <= {three})")]
    StarOrder { one: u64, two: u64, three: u64 },
}

/// Eliminate `count` cells of `veggie`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub veggie: VeggieKind,
    pub count: u32,
}

/// Scores needed for one, two and three stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    pub one: u64,
    pub two: u64,
    pub three: u64,
}

impl StarThresholds {
    /// Stars earned by `score` (0-3)
    pub fn rating(&self, score: u64) -> u8 {
        if score >= self.three {
            3
        } else if score >= self.two {
            2
        } else if score >= self.one {
            1
        } else {
            0
        }
    }
}

/// One playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub number: u32,
    #[serde(default)]
    pub description: String,
    pub rows: usize,
    pub cols: usize,
    pub veggies: Vec<VeggieKind>,
    pub max_moves: u32,
    pub target_score: u64,
    #[serde(default)]
    pub targets: Vec<Target>,
    pub stars: StarThresholds,
}

impl LevelConfig {
    /// Built-in level by number (1-based)
    pub fn builtin(number: u32) -> Option<Self> {
        use VeggieKind::*;

        let target = |veggie, count| Target { veggie, count };
        let stars = |one, two, three| StarThresholds { one, two, three };

        let (description, size, veggies, max_moves, target_score, targets, stars) = match number {
            1 => (
                "Intro - Welcome to the garden",
                6,
                vec![Tomato, Carrot, Eggplant, Broccoli],
                25,
                1000,
                vec![target(Tomato, 10), target(Carrot, 10)],
                stars(1000, 2000, 3000),
            ),
            2 => (
                "Advanced - Harvest season",
                7,
                vec![Tomato, Carrot, Eggplant, Broccoli, Corn],
                22,
                2000,
                vec![target(Tomato, 15), target(Broccoli, 15), target(Corn, 10)],
                stars(2000, 4000, 6000),
            ),
            3 => (
                "Intermediate - Veggie convention",
                8,
                vec![Tomato, Carrot, Eggplant, Broccoli, Corn],
                20,
                3500,
                vec![target(Eggplant, 20), target(Corn, 20), target(Carrot, 15)],
                stars(3500, 6000, 9000),
            ),
            4 => (
                "Challenge - Here come the chilies",
                8,
                VeggieKind::ALL.to_vec(),
                18,
                5000,
                vec![
                    target(Chili, 15),
                    target(Tomato, 20),
                    target(Broccoli, 20),
                    target(Eggplant, 15),
                ],
                stars(5000, 8000, 12000),
            ),
            5 => (
                "Finale - The great garden harvest",
                9,
                VeggieKind::ALL.to_vec(),
                15,
                7000,
                vec![
                    target(Tomato, 25),
                    target(Carrot, 25),
                    target(Eggplant, 20),
                    target(Broccoli, 20),
                    target(Corn, 15),
                    target(Chili, 15),
                ],
                stars(7000, 11000, 16000),
            ),
            _ => return None,
        };

        Some(Self {
            number,
            description: description.to_string(),
            rows: size,
            cols: size,
            veggies,
            max_moves,
            target_score,
            targets,
            stars,
        })
    }

    /// Every built-in level in order
    pub fn all() -> Vec<Self> {
        (1..=LEVEL_COUNT).filter_map(Self::builtin).collect()
    }

    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.rows < MIN_RUN || self.cols < MIN_RUN {
            return Err(LevelError::TooSmall {
                rows: self.rows,
                cols: self.cols,
                min: MIN_RUN,
            });
        }
        for (i, veggie) in self.veggies.iter().enumerate() {
            if self.veggies[..i].contains(veggie) {
                return Err(LevelError::DuplicateVeggie(*veggie));
            }
        }
        if self.veggies.len() < MIN_VEGGIE_KINDS {
            return Err(LevelError::TooFewVeggies {
                found: self.veggies.len(),
                min: MIN_VEGGIE_KINDS,
            });
        }
        if let Some(t) = self.targets.iter().find(|t| !self.veggies.contains(&t.veggie)) {
            return Err(LevelError::UnknownTarget(t.veggie));
        }
        let StarThresholds { one, two, three } = self.stars;
        if one > two || two > three {
            return Err(LevelError::StarOrder { one, two, three });
        }
        Ok(())
    }
}
