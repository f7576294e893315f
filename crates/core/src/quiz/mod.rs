//! Timed multiple-choice quiz flow.

mod engine;
mod plan;
mod session;
mod settings;

use thiserror::Error;

use crate::model::QuizFilter;

pub use engine::QuizEngine;
pub use plan::select_questions;
pub use session::{
    QuizEvent, QuizPhase, QuizProgress, QuizResolved, QuizSession, QuizTick, Resolution,
};
pub use settings::{
    DEFAULT_QUESTION_COUNT, DEFAULT_REVEAL_DELAY_MS, DEFAULT_TIME_LIMIT_SECS, QuizSettings,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions match {filter}")]
    EmptyCatalog { filter: QuizFilter },

    #[error("time limit per question must be > 0")]
    InvalidTimeLimit,

    #[error("reveal delay cannot be negative")]
    InvalidRevealDelay,
}
