//! Game engine: the round in progress plus the persisted score

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{GameOutcome, GameState, MoveOutcome, Score, Status};
use crate::{Result, ports::KeyValueStore};

/// Storage key under which the score is kept
pub const SCORE_KEY: &str = "ttt-score-v1";

/// Owns the round state, the score, and the store the score lives in.
///
/// Every call runs to completion before returning; there is one caller at a
/// time.
///
/// # Examples
///
/// ```
/// use noughts::adapters::InMemoryKeyValueStore;
/// use noughts::tictactoe::{Engine, MoveOutcome, Player};
///
/// let mut engine = Engine::new(InMemoryKeyValueStore::new());
/// for index in [0, 4, 1, 3] {
///     engine.apply_move(index);
/// }
/// let outcome = engine.apply_move(2);
/// assert_eq!(outcome, MoveOutcome::Win { winner: Player::X, line: [0, 1, 2] });
/// assert_eq!(engine.score().x, 1);
/// ```
pub struct Engine {
    state: GameState,
    score: Score,
    store: Arc<dyn KeyValueStore + Send + Sync>,
    score_key: String,
}

impl Engine {
    /// Create an engine on `store` and load any previously saved score.
    pub fn new<S: KeyValueStore + Send + Sync + 'static>(store: S) -> Self {
        Self::with_store(Arc::new(store), SCORE_KEY)
    }

    /// Create an engine on a shared store under a custom key and load any
    /// previously saved score.
    pub fn with_store(store: Arc<dyn KeyValueStore + Send + Sync>, score_key: &str) -> Self {
        let mut engine = Self {
            state: GameState::new(),
            score: Score::default(),
            store,
            score_key: score_key.to_string(),
        };
        engine.load_score();
        engine
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    /// Offer a move at `index`; a finished round is counted and saved.
    ///
    /// A failed save is logged and the round still counts in memory.
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        let outcome = self.state.apply_move(index);
        let result = match outcome {
            MoveOutcome::Rejected(reason) => {
                debug!(index, ?reason, "move ignored");
                return outcome;
            }
            MoveOutcome::Continue { next } => {
                debug!(index, %next, "move accepted");
                return outcome;
            }
            MoveOutcome::Win { winner, .. } => GameOutcome::Win(winner),
            MoveOutcome::Draw => GameOutcome::Draw,
        };

        self.score.record(result);
        info!(index, ?result, score = ?self.score, "round finished");
        if let Err(e) = self.save_score() {
            warn!(key = %self.score_key, error = %e, "failed to save score");
        }
        outcome
    }

    /// Start a new round; the score is kept.
    pub fn reset_round(&mut self) {
        self.state.reset();
        debug!("round reset");
    }

    /// Start a new round and zero the score.
    ///
    /// # Errors
    ///
    /// Returns the store error if the zeroed score could not be saved. The
    /// in-memory score is zeroed either way.
    pub fn reset_score(&mut self) -> Result<()> {
        self.reset_round();
        self.score = Score::default();
        info!("score reset");
        self.save_score()
    }

    /// Replace the in-memory score with the stored one.
    ///
    /// A missing, unreadable or malformed stored value leaves the current score
    /// in place.
    pub fn load_score(&mut self) {
        let raw = match self.store.get(&self.score_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.score_key, "no stored score");
                return;
            }
            Err(e) => {
                debug!(key = %self.score_key, error = %e, "stored score unreadable");
                return;
            }
        };

        match Score::from_json(&raw) {
            Some(score) => self.score = score,
            None => debug!(key = %self.score_key, "stored score malformed, ignoring"),
        }
    }

    /// Write the current score to the store.
    pub fn save_score(&self) -> Result<()> {
        let json = self.score.to_json()?;
        self.store.set(&self.score_key, &json)
    }
}
