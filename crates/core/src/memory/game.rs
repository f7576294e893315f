use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::deferred::{Deferred, Generation};
use crate::model::CardId;
use crate::shuffle::{sample, shuffle};
use crate::time::non_negative;

use super::MemoryError;
use super::score::memory_score;
use super::settings::MemorySettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCard {
    pub id: CardId,
    pub value: String,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl MemoryCard {
    fn face_down(id: CardId, value: &str) -> Self {
        Self {
            id,
            value: value.to_string(),
            is_flipped: false,
            is_matched: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEvent {
    /// Turn a mismatched pair face down again.
    Unflip { first: CardId, second: CardId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    Flipped(CardId),
    Matched { completed: bool },
    Mismatched(Deferred<MemoryEvent>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTick {
    Idle,
    Unflipped { first: CardId, second: CardId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    Playing,
    /// A mismatched pair is showing; input is locked until `unflip_at`.
    Resolving { unflip_at: DateTime<Utc> },
    Completed { completed_at: DateTime<Utc> },
}

/// One deal of the memory game.
#[derive(Clone)]
pub struct MemoryGame {
    generation: Generation,
    settings: MemorySettings,
    deck: Vec<MemoryCard>,
    pending: Vec<CardId>,
    matched_pairs: usize,
    moves: u32,
    elapsed_secs: u64,
    dealt_at: DateTime<Utc>,
    phase: MemoryPhase,
    final_score: Option<u32>,
}

impl MemoryGame {
    /// Deal a shuffled deck of `pair_count` pairs drawn from `pool`.
    ///
    /// Duplicates in `pool` are ignored. Symbol `i` of the draw yields cards
    /// with ids `i` and `i + pair_count`.
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::InsufficientSymbols` when the pool has fewer
    /// distinct symbols than the settings require.
    pub fn deal<S, R>(
        pool: &[S],
        settings: MemorySettings,
        generation: Generation,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, MemoryError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let pair_count = settings.pair_count();
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = pool
            .iter()
            .map(|symbol| symbol.as_ref())
            .filter(|symbol| seen.insert(*symbol))
            .collect();
        if distinct.len() < pair_count {
            return Err(MemoryError::InsufficientSymbols {
                available: distinct.len(),
                required: pair_count,
            });
        }

        let symbols = sample(distinct, pair_count, rng);
        let offset = u32::try_from(pair_count).map_err(|_| MemoryError::InvalidPairCount)?;
        let mut deck = Vec::with_capacity(pair_count * 2);
        for (index, symbol) in (0_u32..).zip(symbols.iter()) {
            deck.push(MemoryCard::face_down(CardId::new(index), symbol));
            deck.push(MemoryCard::face_down(CardId::new(index + offset), symbol));
        }
        shuffle(&mut deck, rng);

        Ok(Self {
            generation,
            settings,
            deck,
            pending: Vec::with_capacity(2),
            matched_pairs: 0,
            moves: 0,
            elapsed_secs: 0,
            dealt_at: now,
            phase: MemoryPhase::Playing,
            final_score: None,
        })
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn cards(&self) -> &[MemoryCard] {
        &self.deck
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&MemoryCard> {
        self.deck.iter().find(|card| card.id == id)
    }

    #[must_use]
    pub fn pending_flips(&self) -> &[CardId] {
        &self.pending
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.settings.pair_count()
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn dealt_at(&self) -> DateTime<Utc> {
        self.dealt_at
    }

    #[must_use]
    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, MemoryPhase::Resolving { .. })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, MemoryPhase::Completed { .. })
    }

    /// Set once every pair is matched.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Score as it would stand if the game ended now.
    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.final_score
            .unwrap_or_else(|| memory_score(self.moves, self.elapsed_secs))
    }

    /// Turn a card face up.
    ///
    /// Ignored while a mismatch is showing, after completion, for unknown ids
    /// and for cards already face up or matched.
    pub fn flip(&mut self, id: CardId, now: DateTime<Utc>) -> FlipOutcome {
        if self.phase != MemoryPhase::Playing || self.pending.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.deck.iter_mut().find(|card| card.id == id) else {
            return FlipOutcome::Ignored;
        };
        if card.is_flipped || card.is_matched {
            return FlipOutcome::Ignored;
        }

        card.is_flipped = true;
        self.pending.push(id);
        self.refresh_elapsed(now);

        let &[first, second] = self.pending.as_slice() else {
            return FlipOutcome::Flipped(id);
        };
        self.moves = self.moves.saturating_add(1);

        let is_match = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.value == b.value,
            _ => false,
        };

        if is_match {
            for card in self.deck.iter_mut().filter(|c| c.id == first || c.id == second) {
                card.is_matched = true;
            }
            self.pending.clear();
            self.matched_pairs += 1;

            let completed = self.matched_pairs == self.pair_count();
            if completed {
                self.phase = MemoryPhase::Completed { completed_at: now };
                self.final_score = Some(memory_score(self.moves, self.elapsed_secs));
            }
            FlipOutcome::Matched { completed }
        } else {
            let unflip_at = now + self.settings.mismatch_delay();
            self.phase = MemoryPhase::Resolving { unflip_at };
            FlipOutcome::Mismatched(Deferred::new(
                self.generation,
                unflip_at,
                MemoryEvent::Unflip { first, second },
            ))
        }
    }

    /// Update the elapsed seconds and apply an unflip that has come due.
    pub fn tick(&mut self, now: DateTime<Utc>) -> MemoryTick {
        match self.phase {
            MemoryPhase::Completed { .. } => MemoryTick::Idle,
            MemoryPhase::Playing => {
                self.refresh_elapsed(now);
                MemoryTick::Idle
            }
            MemoryPhase::Resolving { unflip_at } => {
                self.refresh_elapsed(now);
                if now >= unflip_at {
                    self.unflip_pending()
                } else {
                    MemoryTick::Idle
                }
            }
        }
    }

    /// Apply a deferred unflip. Events from another deal, or for a pair that
    /// is no longer showing, are dropped.
    pub fn apply(&mut self, deferred: &Deferred<MemoryEvent>, now: DateTime<Utc>) -> MemoryTick {
        if deferred.generation() != self.generation || !self.is_locked() {
            return MemoryTick::Idle;
        }
        let MemoryEvent::Unflip { first, second } = *deferred.event();
        if self.pending[..] != [first, second] {
            return MemoryTick::Idle;
        }
        self.refresh_elapsed(now);
        self.unflip_pending()
    }

    fn unflip_pending(&mut self) -> MemoryTick {
        let &[first, second] = self.pending.as_slice() else {
            self.phase = MemoryPhase::Playing;
            return MemoryTick::Idle;
        };
        for card in self.deck.iter_mut().filter(|c| c.id == first || c.id == second) {
            card.is_flipped = false;
        }
        self.pending.clear();
        self.phase = MemoryPhase::Playing;
        MemoryTick::Unflipped { first, second }
    }

    fn refresh_elapsed(&mut self, now: DateTime<Utc>) {
        if self.is_completed() {
            return;
        }
        let seconds = non_negative(now - self.dealt_at).num_seconds();
        self.elapsed_secs = u64::try_from(seconds).unwrap_or(0);
    }
}

impl fmt::Debug for MemoryGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGame")
            .field("generation", &self.generation)
            .field("cards_len", &self.deck.len())
            .field("pending", &self.pending)
            .field("matched_pairs", &self.matched_pairs)
            .field("moves", &self.moves)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
