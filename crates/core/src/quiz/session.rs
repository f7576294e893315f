use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::fmt;

use crate::deferred::{Deferred, Generation};
use crate::model::{Question, QuestionCatalog, QuestionId, QuizFilter};
use crate::time::non_negative;

use super::QuizError;
use super::plan::select_questions;
use super::settings::QuizSettings;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Delayed follow-up produced by a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// Leave the reveal of question `index` and move on.
    Advance { index: usize },
}

/// Final outcome of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub question_id: QuestionId,
    /// `None` when the countdown ran out.
    pub chosen: Option<String>,
    pub is_correct: bool,
    pub correct_option: String,
    pub points_awarded: u32,
    pub resolved_at: DateTime<Utc>,
}

impl Resolution {
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.chosen.is_none()
    }
}

/// Emitted when a question resolves: feedback for the UI plus the advance to
/// schedule after the reveal delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResolved {
    pub resolution: Resolution,
    pub advance: Deferred<QuizEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizTick {
    Idle,
    TimedOut(QuizResolved),
    Advanced { index: usize },
    Completed { score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Answering { question_started_at: DateTime<Utc> },
    Revealing { advance_at: DateTime<Utc> },
    Completed { completed_at: DateTime<Utc> },
}

/// Aggregated view of quiz progress, useful for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the question on screen.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    pub score: u32,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a shuffled, filtered subset of the catalog.
///
/// Transitions are driven from outside: answers and ticks carry the current
/// instant, and the reveal pause ends either on a tick past its deadline or
/// when the scheduled `QuizEvent::Advance` is handed back through `apply`.
#[derive(Clone)]
pub struct QuizSession {
    generation: Generation,
    filter: QuizFilter,
    settings: QuizSettings,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    time_remaining: Duration,
    phase: QuizPhase,
    resolutions: Vec<Resolution>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Select questions and start the countdown for the first one at `now`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyCatalog` if no question matches `filter`.
    pub fn start<R>(
        catalog: &QuestionCatalog,
        filter: QuizFilter,
        settings: QuizSettings,
        generation: Generation,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, QuizError>
    where
        R: Rng + ?Sized,
    {
        let questions = select_questions(catalog, &filter, settings.question_count(), rng)?;
        Ok(Self {
            generation,
            filter,
            settings,
            questions,
            current: 0,
            score: 0,
            time_remaining: settings.time_limit(),
            phase: QuizPhase::Answering {
                question_started_at: now,
            },
            resolutions: Vec::new(),
            started_at: now,
        })
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn filter(&self) -> QuizFilter {
        self.filter
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question on screen; `None` once the session is completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_completed() {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points per correct answer, tied to the selected difficulty.
    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.filter.difficulty.point_value()
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        let count = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        self.point_value().saturating_mul(count)
    }

    /// Countdown as of the last tick or answer.
    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        self.time_remaining
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_remaining_secs(&self) -> f64 {
        self.time_remaining.num_milliseconds() as f64 / 1000.0
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, QuizPhase::Completed { .. })
    }

    #[must_use]
    pub fn is_revealing(&self) -> bool {
        matches!(self.phase, QuizPhase::Revealing { .. })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            QuizPhase::Completed { completed_at } => Some(completed_at),
            _ => None,
        }
    }

    #[must_use]
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    #[must_use]
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.resolutions.last()
    }

    /// The advance waiting for the reveal delay, if any.
    #[must_use]
    pub fn pending_advance(&self) -> Option<Deferred<QuizEvent>> {
        match self.phase {
            QuizPhase::Revealing { advance_at } => Some(Deferred::new(
                self.generation,
                advance_at,
                QuizEvent::Advance {
                    index: self.current,
                },
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            current: (self.current + 1).min(self.questions.len()),
            total: self.questions.len(),
            answered: self.resolutions.len(),
            score: self.score,
            is_complete: self.is_completed(),
        }
    }

    /// Answer the current question.
    ///
    /// Returns `None` without touching the score while a resolution is already
    /// being revealed or after completion. An answer arriving after the
    /// countdown expired resolves as a timeout.
    pub fn submit_answer(&mut self, option: &str, now: DateTime<Utc>) -> Option<QuizResolved> {
        let QuizPhase::Answering {
            question_started_at,
        } = self.phase
        else {
            return None;
        };

        self.refresh_countdown(question_started_at, now);
        if self.time_remaining.is_zero() {
            return self.resolve(None, now);
        }
        self.resolve(Some(option), now)
    }

    /// Advance the countdown or end a reveal whose deadline has passed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> QuizTick {
        match self.phase {
            QuizPhase::Answering {
                question_started_at,
            } => {
                self.refresh_countdown(question_started_at, now);
                if self.time_remaining.is_zero() {
                    if let Some(resolved) = self.resolve(None, now) {
                        return QuizTick::TimedOut(resolved);
                    }
                }
                QuizTick::Idle
            }
            QuizPhase::Revealing { advance_at } if now >= advance_at => self.advance(now),
            QuizPhase::Revealing { .. } | QuizPhase::Completed { .. } => QuizTick::Idle,
        }
    }

    /// Apply a deferred event produced by this session.
    ///
    /// Events from another generation, or for a question that is no longer
    /// being revealed, are dropped.
    pub fn apply(&mut self, deferred: &Deferred<QuizEvent>, now: DateTime<Utc>) -> QuizTick {
        if deferred.generation() != self.generation {
            return QuizTick::Idle;
        }
        match (*deferred.event(), self.phase) {
            (QuizEvent::Advance { index }, QuizPhase::Revealing { .. }) if index == self.current => {
                self.advance(now)
            }
            _ => QuizTick::Idle,
        }
    }

    fn refresh_countdown(&mut self, question_started_at: DateTime<Utc>, now: DateTime<Utc>) {
        let elapsed = non_negative(now - question_started_at);
        self.time_remaining = non_negative(self.settings.time_limit() - elapsed);
    }

    fn resolve(&mut self, chosen: Option<&str>, now: DateTime<Utc>) -> Option<QuizResolved> {
        let question = self.questions.get(self.current)?;
        let is_correct = chosen.is_some_and(|option| question.is_correct(option));
        let points_awarded = if is_correct { self.point_value() } else { 0 };

        let resolution = Resolution {
            question_id: question.id(),
            chosen: chosen.map(str::to_string),
            is_correct,
            correct_option: question.correct_option().to_string(),
            points_awarded,
            resolved_at: now,
        };

        self.score = self.score.saturating_add(points_awarded);
        self.resolutions.push(resolution.clone());

        let advance_at = now + self.settings.reveal_delay();
        self.phase = QuizPhase::Revealing { advance_at };

        Some(QuizResolved {
            resolution,
            advance: Deferred::new(
                self.generation,
                advance_at,
                QuizEvent::Advance {
                    index: self.current,
                },
            ),
        })
    }

    fn advance(&mut self, now: DateTime<Utc>) -> QuizTick {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.time_remaining = self.settings.time_limit();
            self.phase = QuizPhase::Answering {
                question_started_at: now,
            };
            QuizTick::Advanced {
                index: self.current,
            }
        } else {
            self.time_remaining = Duration::zero();
            self.phase = QuizPhase::Completed { completed_at: now };
            QuizTick::Completed { score: self.score }
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("generation", &self.generation)
            .field("filter", &self.filter)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
