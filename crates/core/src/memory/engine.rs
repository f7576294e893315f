use chrono::{DateTime, Utc};
use rand::Rng;

use crate::deferred::{Deferred, Generation, GenerationCounter};
use crate::model::CardId;

use super::game::{FlipOutcome, MemoryEvent, MemoryGame, MemoryTick};
use super::settings::MemorySettings;
use super::{DEFAULT_SYMBOLS, MemoryError};

/// Owns the current deal. A new deal or a reset invalidates pending unflips.
#[derive(Debug, Default)]
pub struct MemoryMatchEngine {
    generations: GenerationCounter,
    game: Option<MemoryGame>,
}

impl MemoryMatchEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `MemoryError::InsufficientSymbols` if `pool` is too small. The
    /// current deal is kept in that case.
    pub fn deal<S, R>(
        &mut self,
        pool: &[S],
        settings: MemorySettings,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<&MemoryGame, MemoryError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut generations = self.generations.clone();
        let generation = generations.advance();
        let game = MemoryGame::deal(pool, settings, generation, now, rng)?;
        self.generations = generations;
        Ok(self.game.insert(game))
    }

    /// Deal from the built-in symbol set.
    ///
    /// # Errors
    ///
    /// Fails only if `settings` asks for more pairs than there are symbols.
    pub fn deal_default<R>(
        &mut self,
        settings: MemorySettings,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<&MemoryGame, MemoryError>
    where
        R: Rng + ?Sized,
    {
        self.deal(&DEFAULT_SYMBOLS, settings, now, rng)
    }

    #[must_use]
    pub fn game(&self) -> Option<&MemoryGame> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    pub fn flip(&mut self, id: CardId, now: DateTime<Utc>) -> FlipOutcome {
        match self.game.as_mut() {
            Some(game) => game.flip(id, now),
            None => FlipOutcome::Ignored,
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> MemoryTick {
        match self.game.as_mut() {
            Some(game) => game.tick(now),
            None => MemoryTick::Idle,
        }
    }

    pub fn apply(&mut self, deferred: &Deferred<MemoryEvent>, now: DateTime<Utc>) -> MemoryTick {
        match self.game.as_mut() {
            Some(game) => game.apply(deferred, now),
            None => MemoryTick::Idle,
        }
    }

    pub fn reset(&mut self) -> Generation {
        self.game = None;
        self.generations.advance()
    }
}
