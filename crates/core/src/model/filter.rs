use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::question::{Category, Difficulty, Question};

/// A category or difficulty string that matches no known value.
///
/// Callers are expected to fall back to the "all" filter rather than reject the
/// session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} filter value: {raw:?}")]
pub struct UnknownFilterValue {
    kind: &'static str,
    raw: String,
}

impl UnknownFilterValue {
    #[must_use]
    pub fn new(kind: &'static str, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Name shown on result cards; "Mixed" for the unfiltered quiz.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CategoryFilter::All => "Mixed",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyFilter {
    All,
    Only(Difficulty),
}

impl Default for DifficultyFilter {
    fn default() -> Self {
        DifficultyFilter::Only(Difficulty::Easy)
    }
}

impl DifficultyFilter {
    #[must_use]
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == difficulty,
        }
    }

    /// Points per correct answer for a session played at this selection.
    ///
    /// Scoring follows the selected difficulty, not the question's own; the
    /// "all" selection scores like hard.
    #[must_use]
    pub fn point_value(self) -> u32 {
        match self {
            DifficultyFilter::Only(difficulty) => difficulty.point_value(),
            DifficultyFilter::All => Difficulty::Hard.point_value(),
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("all"),
            DifficultyFilter::Only(difficulty) => difficulty.fmt(f),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

/// Difficulty and category selection used to pick questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuizFilter {
    pub category: CategoryFilter,
    pub difficulty: DifficultyFilter,
}

impl QuizFilter {
    #[must_use]
    pub fn new(category: CategoryFilter, difficulty: DifficultyFilter) -> Self {
        Self {
            category,
            difficulty,
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self::new(CategoryFilter::All, DifficultyFilter::All)
    }

    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        self.category.matches(question.category())
            && self.difficulty.matches(question.difficulty())
    }
}

impl fmt::Display for QuizFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category={} difficulty={}", self.category, self.difficulty)
    }
}
