//! Memory-matching mini-game: deal, flip, match or mismatch, score.

mod engine;
mod game;
mod score;
mod settings;

use thiserror::Error;

pub use engine::MemoryMatchEngine;
pub use game::{FlipOutcome, MemoryCard, MemoryEvent, MemoryGame, MemoryPhase, MemoryTick};
pub use score::{MIN_MEMORY_SCORE, memory_score};
pub use settings::{DEFAULT_MISMATCH_DELAY_MS, DEFAULT_PAIR_COUNT, MemorySettings};

/// Symbols dealt when the caller does not bring its own pool.
pub const DEFAULT_SYMBOLS: [&str; 16] = [
    "🚀", "🌟", "🌈", "🎮", "🎯", "🎨", "🎭", "🎧", "🏆", "🎪", "🎡", "🎢", "🍕", "🍦", "🌮", "🍿",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemoryError {
    #[error("need {required} distinct symbols, only {available} available")]
    InsufficientSymbols { available: usize, required: usize },

    #[error("pair count must be > 0")]
    InvalidPairCount,

    #[error("mismatch delay cannot be negative")]
    InvalidMismatchDelay,
}
