use serde::Serialize;
use std::fmt;

use quiz_core::model::CategoryFilter;

/// Badge awarded for the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultTier {
    QuizMaster,
    QuizExpert,
    KnowledgeBuff,
    QuizApprentice,
    QuizBeginner,
}

impl ResultTier {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            ResultTier::QuizMaster
        } else if percentage >= 80.0 {
            ResultTier::QuizExpert
        } else if percentage >= 60.0 {
            ResultTier::KnowledgeBuff
        } else if percentage >= 40.0 {
            ResultTier::QuizApprentice
        } else {
            ResultTier::QuizBeginner
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResultTier::QuizMaster => "Quiz Master",
            ResultTier::QuizExpert => "Quiz Expert",
            ResultTier::KnowledgeBuff => "Knowledge Buff",
            ResultTier::QuizApprentice => "Quiz Apprentice",
            ResultTier::QuizBeginner => "Quiz Beginner",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ResultTier::QuizMaster => "Perfect Score! You're amazing! 🎉",
            ResultTier::QuizExpert => "Excellent work! Nearly perfect! 🌟",
            ResultTier::KnowledgeBuff => "Good job! You know your stuff! 👍",
            ResultTier::QuizApprentice => "Not bad! Keep learning! 📚",
            ResultTier::QuizBeginner => "Keep practicing! You'll get better! 💪",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            ResultTier::QuizMaster => "🏆",
            ResultTier::QuizExpert => "🌟",
            ResultTier::KnowledgeBuff => "👍",
            ResultTier::QuizApprentice => "📚",
            ResultTier::QuizBeginner => "💪",
        }
    }
}

impl fmt::Display for ResultTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    HalfwayHero,
    PerfectScore,
    QuizParticipant,
}

/// Everything the result screen shows once a quiz completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub score: u32,
    pub max_score: u32,
    pub total_questions: usize,
    pub memory_bonus: u32,
    pub category: &'static str,
    /// Quiz score over the best attainable quiz score, capped at 100.
    pub percentage: f64,
    pub tier: ResultTier,
}

impl ResultSummary {
    #[must_use]
    pub fn new(
        score: u32,
        max_score: u32,
        total_questions: usize,
        memory_bonus: u32,
        category: CategoryFilter,
    ) -> Self {
        let percentage = if max_score == 0 {
            0.0
        } else {
            (f64::from(score) * 100.0 / f64::from(max_score)).min(100.0)
        };
        Self {
            score,
            max_score,
            total_questions,
            memory_bonus,
            category: category.display_name(),
            percentage,
            tier: ResultTier::for_percentage(percentage),
        }
    }

    /// Quiz score plus the memory-game bonus.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.score.saturating_add(self.memory_bonus)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }

    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        if self.score == 0 {
            return unlocked;
        }
        if self.percentage >= 50.0 {
            unlocked.push(Achievement::HalfwayHero);
        }
        if self.tier == ResultTier::QuizMaster {
            unlocked.push(Achievement::PerfectScore);
        }
        unlocked.push(Achievement::QuizParticipant);
        unlocked
    }

    #[must_use]
    pub fn share_text(&self) -> String {
        format!(
            "I scored {}/{} ({}%) on the {} Quiz! Think you can beat my score?",
            self.score,
            self.max_score,
            self.rounded_percentage(),
            self.category
        )
    }
}
