use chrono::prelude::*;
use gridsweep_core as game;

/// One game as the player sees it: the engine plus a wall-clock timer that
/// stops once the game is decided.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    pub fn new(engine: game::PlayEngine, now: DateTime<Utc>) -> Self {
        Self {
            engine,
            started_at: now,
            ended_at: None,
            move_count: 0,
        }
    }

    pub fn start(seed: Option<u64>, now: DateTime<Utc>) -> game::Result<Self> {
        let engine = game::PlayEngine::initialize(game::GameConfig::default(), seed)?;
        Ok(Self::new(engine, now))
    }

    /// Throws the current board away and deals a new one.
    pub fn restart(&mut self, seed: Option<u64>, now: DateTime<Utc>) -> game::Result<()> {
        *self = Self::start(seed, now)?;
        Ok(())
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    pub fn click(&mut self, coords: game::Coord2, now: DateTime<Utc>) -> game::Result<bool> {
        let report = self.engine.interact(coords)?;
        Ok(self.after_move(report.outcome.has_update(), now))
    }

    pub fn flag(&mut self, coords: game::Coord2, now: DateTime<Utc>) -> game::Result<bool> {
        let report = self.engine.toggle_flag(coords)?;
        Ok(self.after_move(report.outcome.has_update(), now))
    }

    pub fn open(&mut self, coords: game::Coord2, now: DateTime<Utc>) -> game::Result<bool> {
        let report = self.engine.reveal(coords)?;
        Ok(self.after_move(report.outcome.has_update(), now))
    }

    /// Status line, only once the game is over.
    pub fn banner(&self, now: DateTime<Utc>) -> Option<String> {
        let verdict = match self.engine.state() {
            game::EngineState::InProgress => return None,
            game::EngineState::Won => "YOU WIN",
            game::EngineState::Lost => "YOU LOSE",
        };
        Some(format!("{verdict} ({}s)", self.elapsed_secs(now)))
    }

    pub fn flag_counter(&self) -> String {
        format!("🚩 {}", self.engine.remaining_flags())
    }

    pub fn timer_text(&self, now: DateTime<Utc>) -> String {
        format!("⏱ {}s", self.elapsed_secs(now))
    }

    fn after_move(&mut self, updated: bool, now: DateTime<Utc>) -> bool {
        if !updated {
            return false;
        }

        self.move_count = self.move_count.saturating_add(1);
        if self.engine.is_finished() && self.ended_at.is_none() {
            log::debug!("Finished after {} moves", self.move_count);
            self.ended_at = Some(now);
        }
        true
    }
}
