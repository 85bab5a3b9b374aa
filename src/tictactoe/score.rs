//! Cumulative score across rounds

use serde::{Deserialize, Serialize};

use super::{GameOutcome, Player};

/// Win and draw counters, persisted as `{"X": n, "O": n, "D": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
    #[serde(rename = "D")]
    pub draws: u32,
}

impl Score {
    pub fn new(x: u32, o: u32, draws: u32) -> Self {
        Self { x, o, draws }
    }

    /// Wins recorded for a player
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Total number of finished rounds, saturating at `u32::MAX`
    pub fn rounds(&self) -> u32 {
        self.x.saturating_add(self.o).saturating_add(self.draws)
    }

    /// Count a finished round
    pub fn record(&mut self, outcome: GameOutcome) {
        let counter = match outcome {
            GameOutcome::Win(Player::X) => &mut self.x,
            GameOutcome::Win(Player::O) => &mut self.o,
            GameOutcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    /// Parse a stored score. Anything that is not an object with three
    /// non-negative integer counters yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Serialize for storage
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
