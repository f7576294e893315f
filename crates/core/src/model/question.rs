use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::filter::UnknownFilterValue;
use crate::model::ids::QuestionId;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── CATEGORY / DIFFICULTY ─────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Technical,
    Programming,
    General,
    NonTechnical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technical,
        Category::Programming,
        Category::General,
        Category::NonTechnical,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Programming => "programming",
            Category::General => "general",
            Category::NonTechnical => "non-technical",
        }
    }

    /// Human-facing name used in result and share texts.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Programming => "Programming",
            Category::General => "General Knowledge",
            Category::NonTechnical => "Non-Technical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(Category::Technical),
            "programming" => Ok(Category::Programming),
            "general" => Ok(Category::General),
            "non-technical" | "non_technical" | "nontechnical" => Ok(Category::NonTechnical),
            _ => Err(UnknownFilterValue::new("category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Intermediate, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        }
    }

    /// Points awarded for a correct answer at this difficulty.
    #[must_use]
    pub fn point_value(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "intermediate" | "medium" => Ok(Difficulty::Intermediate),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownFilterValue::new("difficulty", s)),
        }
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in catalog files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_option: String,
    pub category: Category,
    pub difficulty: Difficulty,
}

impl QuestionDraft {
    /// Check the draft and turn it into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the option list is not
    /// exactly four unique non-empty strings, or the correct option is missing.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self.id;
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }

        let options: Vec<String> = self
            .options
            .into_iter()
            .map(|option| option.trim().to_string())
            .collect();
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                id,
                found: options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(OPTIONS_PER_QUESTION);
        for option in &options {
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { id });
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }

        let correct = self.correct_option.trim();
        let correct_index = options
            .iter()
            .position(|option| option == correct)
            .ok_or(QuestionError::CorrectOptionMissing { id })?;

        Ok(Question {
            id,
            prompt,
            options,
            correct_index,
            category: self.category,
            difficulty: self.difficulty,
        })
    }
}

/// Immutable catalog question with exactly four unique options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    category: Category,
    difficulty: Difficulty,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Exact comparison against the correct option.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_option()
    }

    /// Option at a zero-based position (A = 0).
    #[must_use]
    pub fn option_at(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Convert back into the serialized shape.
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            id: self.id,
            prompt: self.prompt.clone(),
            options: self.options.clone(),
            correct_option: self.correct_option().to_string(),
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id}: prompt cannot be empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id}: expected 4 options, found {found}")]
    OptionCount { id: QuestionId, found: usize },

    #[error("question {id}: options cannot be empty")]
    EmptyOption { id: QuestionId },

    #[error("question {id}: duplicate option {option:?}")]
    DuplicateOption { id: QuestionId, option: String },

    #[error("question {id}: correct answer is not one of the options")]
    CorrectOptionMissing { id: QuestionId },
}
