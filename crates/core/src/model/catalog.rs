use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::model::filter::QuizFilter;
use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("duplicate question id {id}")]
    DuplicateId { id: QuestionId },
}

/// Immutable, validated set of questions. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Arc<[Question]>,
}

impl QuestionCatalog {
    /// Validate drafts into a catalog, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for the first invalid draft or repeated id.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut questions = Vec::new();
        for draft in drafts {
            let question = draft.validate()?;
            if !seen.insert(question.id()) {
                return Err(CatalogError::DuplicateId { id: question.id() });
            }
            questions.push(question);
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Questions matching the filter, in catalog order.
    #[must_use]
    pub fn matching(&self, filter: &QuizFilter) -> Vec<&Question> {
        self.questions.iter().filter(|q| filter.matches(q)).collect()
    }

    #[must_use]
    pub fn count_matching(&self, filter: &QuizFilter) -> usize {
        self.questions.iter().filter(|q| filter.matches(q)).count()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::model::question::{Category, Difficulty};

    pub(crate) fn question_draft(
        id: u32,
        category: Category,
        difficulty: Difficulty,
    ) -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: format!("Question {id}?"),
            options: (0..4).map(|n| format!("q{id}-option-{n}")).collect(),
            correct_option: format!("q{id}-option-0"),
            category,
            difficulty,
        }
    }

    /// Four easy general, three hard programming, two intermediate technical.
    pub(crate) fn sample_catalog() -> QuestionCatalog {
        let mut drafts = Vec::new();
        for id in 1..=4 {
            drafts.push(question_draft(id, Category::General, Difficulty::Easy));
        }
        for id in 5..=7 {
            drafts.push(question_draft(id, Category::Programming, Difficulty::Hard));
        }
        for id in 8..=9 {
            drafts.push(question_draft(id, Category::Technical, Difficulty::Intermediate));
        }
        QuestionCatalog::from_drafts(drafts).unwrap()
    }
}
