mod catalog;
mod filter;
mod ids;
mod preferences;
mod question;

pub use catalog::{CatalogError, QuestionCatalog};
pub use filter::{CategoryFilter, DifficultyFilter, QuizFilter, UnknownFilterValue};
pub use ids::{CardId, ParseIdError, QuestionId};
pub use preferences::{Language, PreferenceKey, PreferenceParseError, Preferences, Theme};
pub use question::{
    Category, Difficulty, OPTIONS_PER_QUESTION, Question, QuestionDraft, QuestionError,
};

#[cfg(test)]
pub(crate) use catalog::test_support;
