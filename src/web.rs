//! Browser binding
//!
//! The page drives the game through `WebGame`: it forwards swaps, pulls
//! cascade steps one at a time to animate them, and reads JSON snapshots.

use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board::{Cell, Pos, VeggieKind};
use crate::game::{CascadeStep, GameEvent, GamePhase, GameSession};
use crate::level::LevelConfig;
use crate::progress::Progress;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails if a logger is already installed, e.g. after a hot reload
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
    }
    log::info!("Veggie Match loaded");
}

#[derive(Serialize)]
struct View<'a> {
    level: u32,
    grid: Vec<Vec<Option<Cell>>>,
    score: u64,
    moves_left: u32,
    stars: u8,
    phase: GamePhase,
    eliminated: &'a BTreeMap<VeggieKind, u32>,
}

/// One level attempt plus the saved progress
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    progress: Progress,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a built-in level
    #[wasm_bindgen(constructor)]
    pub fn new(level: u32) -> Result<WebGame, JsError> {
        let config = LevelConfig::builtin(level).ok_or_else(|| JsError::new(&format!("no level {level}")))?;
        Ok(Self::start_level(config))
    }

    /// Start a custom level from JSON
    pub fn from_level_json(json: &str) -> Result<WebGame, JsError> {
        Ok(Self::start_level(LevelConfig::from_json(json)?))
    }

    pub fn try_swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<(), JsError> {
        self.session.try_swap(Pos::new(r1, c1), Pos::new(r2, c2))?;
        Ok(())
    }

    /// Next cascade step as JSON, or None when the turn is over
    pub fn step(&mut self) -> Result<Option<String>, JsError> {
        let Some(step) = self.session.step() else {
            return Ok(None);
        };
        if let CascadeStep::TurnEnded {
            phase: GamePhase::Complete { stars },
            ..
        } = step
        {
            if self.progress.record(self.session.level().number, stars) {
                self.progress.save();
            }
        }
        Ok(Some(serde_json::to_string(&step)?))
    }

    /// Board and counters as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        let view = View {
            level: self.session.level().number,
            grid: self.session.board().snapshot(),
            score: self.session.score(),
            moves_left: self.session.moves_left(),
            stars: self.session.stars(),
            phase: self.session.phase(),
            eliminated: self.session.eliminated(),
        };
        Ok(serde_json::to_string(&view)?)
    }

    /// Queued sound/UI events as JSON
    pub fn events(&mut self) -> Result<String, JsError> {
        let events: Vec<GameEvent> = self.session.drain_events();
        Ok(serde_json::to_string(&events)?)
    }

    /// Suggested move as JSON
    pub fn hint(&mut self) -> Result<Option<String>, JsError> {
        match self.session.hint() {
            Some(mv) => Ok(Some(serde_json::to_string(&mv)?)),
            None => Ok(None),
        }
    }

    pub fn retry(&mut self) {
        self.session.retry();
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn moves_left(&self) -> u32 {
        self.session.moves_left()
    }

    pub fn best_stars(&self, level: u32) -> u8 {
        self.progress.best(level)
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.progress.is_unlocked(level)
    }

    pub fn hint_delay_ms() -> u32 {
        crate::consts::HINT_DELAY_MS
    }
}

impl WebGame {
    fn start_level(config: LevelConfig) -> WebGame {
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let seed = js_sys::Date::now() as u64 ^ (noise << 32);
        log::info!("Level {} seeded with {}", config.number, seed);
        WebGame {
            session: GameSession::new(config, seed),
            progress: Progress::load(),
        }
    }
}
