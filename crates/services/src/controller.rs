use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use quiz_core::memory::{FlipOutcome, MemoryEvent, MemoryGame, MemoryMatchEngine, MemoryTick};
use quiz_core::model::{
    CardId, CategoryFilter, DifficultyFilter, QuestionCatalog, QuizFilter, UnknownFilterValue,
};
use quiz_core::quiz::{
    DEFAULT_QUESTION_COUNT, DEFAULT_TIME_LIMIT_SECS, QuizEngine, QuizError, QuizEvent,
    QuizResolved, QuizSession, QuizTick, Resolution,
};
use chrono::{DateTime, Utc};
use quiz_core::{Clock, Deferred};

use crate::error::SessionError;
use crate::notify::{Notification, NotificationSink};
use crate::results::ResultSummary;
use crate::timings::EngineTimings;

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Plain quiz, or the memory game followed by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Quiz,
    Memory,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Quiz => f.write_str("quiz"),
            Mode::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(Mode::Quiz),
            "memory" => Ok(Mode::Memory),
            _ => Err(UnknownFilterValue::new("mode", s)),
        }
    }
}

/// What the player picked on the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mode: Mode,
    pub filter: QuizFilter,
    pub question_count: usize,
    pub time_limit_secs: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            mode: Mode::Quiz,
            filter: QuizFilter::default(),
            question_count: DEFAULT_QUESTION_COUNT,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Configuring,
    Memory,
    Quiz,
    Finished,
}

/// Deferred events of either engine, as handed to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    Quiz(QuizEvent),
    Memory(MemoryEvent),
    /// Leave the completed memory board for the first quiz question.
    BeginQuiz,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one player's run: configuration, optional memory game, quiz, result.
///
/// Every action reads the injected clock once and forwards `now` to the
/// engines. Actions that start a timer return the `Deferred` the caller should
/// schedule and later pass to [`SessionController::apply_deferred`].
pub struct SessionController {
    clock: Clock,
    catalog: QuestionCatalog,
    timings: EngineTimings,
    selection: Selection,
    phase: ControllerPhase,
    quiz: QuizEngine,
    memory: MemoryMatchEngine,
    memory_bonus: u32,
    quiz_starts_at: Option<DateTime<Utc>>,
    rng: StdRng,
    notifier: Arc<dyn NotificationSink>,
}

impl SessionController {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: QuestionCatalog,
        timings: EngineTimings,
        rng: StdRng,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            clock,
            catalog,
            timings,
            selection: Selection::default(),
            phase: ControllerPhase::Configuring,
            quiz: QuizEngine::new(),
            memory: MemoryMatchEngine::new(),
            memory_bonus: 0,
            quiz_starts_at: None,
            rng,
            notifier,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn timings(&self) -> &EngineTimings {
        &self.timings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Fixed clocks can be moved forward here when replaying or testing.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn quiz_session(&self) -> Option<&QuizSession> {
        self.quiz.session()
    }

    #[must_use]
    pub fn memory_game(&self) -> Option<&MemoryGame> {
        self.memory.game()
    }

    #[must_use]
    pub fn memory_bonus(&self) -> u32 {
        self.memory_bonus
    }

    /// Quiz score plus memory bonus, as displayed while playing.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        let quiz = self.quiz.session().map_or(0, QuizSession::score);
        quiz.saturating_add(self.memory_bonus)
    }

    // ─── configuration ─────────────────────────────────────────────────────

    /// Unknown names fall back to every category.
    pub fn select_category(&mut self, raw: &str) -> CategoryFilter {
        let category = raw.parse().unwrap_or_else(|err: UnknownFilterValue| {
            tracing::warn!(%err, "falling back to all categories");
            CategoryFilter::All
        });
        self.selection.filter.category = category;
        category
    }

    /// Unknown names fall back to every difficulty.
    pub fn select_difficulty(&mut self, raw: &str) -> DifficultyFilter {
        let difficulty = raw.parse().unwrap_or_else(|err: UnknownFilterValue| {
            tracing::warn!(%err, "falling back to all difficulties");
            DifficultyFilter::All
        });
        self.selection.filter.difficulty = difficulty;
        difficulty
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionCount` for zero.
    pub fn select_question_count(&mut self, count: usize) -> Result<(), SessionError> {
        if count == 0 {
            return Err(SessionError::InvalidQuestionCount);
        }
        self.selection.question_count = count;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTimeLimit` for zero seconds.
    pub fn select_time_limit(&mut self, secs: u32) -> Result<(), SessionError> {
        if secs == 0 {
            return Err(SessionError::InvalidTimeLimit);
        }
        self.selection.time_limit_secs = secs;
        Ok(())
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.selection.mode = mode;
    }

    // ─── actions ───────────────────────────────────────────────────────────

    /// Start the selected mode.
    ///
    /// In memory mode the quiz selection is checked up front so the player is
    /// never sent from a finished memory game into an empty quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyRunning` while a game is in progress and
    /// `SessionError::Quiz(EmptyCatalog)` if nothing matches the selection.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if matches!(self.phase, ControllerPhase::Memory | ControllerPhase::Quiz) {
            return Err(SessionError::AlreadyRunning);
        }
        self.memory_bonus = 0;
        self.quiz_starts_at = None;

        match self.selection.mode {
            Mode::Quiz => self.start_quiz(),
            Mode::Memory => {
                let filter = self.selection.filter;
                if self.catalog.count_matching(&filter) == 0 {
                    return Err(QuizError::EmptyCatalog { filter }.into());
                }
                let settings = self.timings.memory_settings()?;
                let now = self.clock.now();
                let game = self.memory.deal_default(settings, now, &mut self.rng)?;
                tracing::info!(
                    generation = %game.generation(),
                    pairs = game.pair_count(),
                    "memory game dealt"
                );
                self.phase = ControllerPhase::Memory;
                Ok(())
            }
        }
    }

    /// Answer the current quiz question. `None` when ignored.
    pub fn submit_answer(&mut self, option: &str) -> Option<Deferred<ControllerEvent>> {
        if self.phase != ControllerPhase::Quiz {
            return None;
        }
        let now = self.clock.now();
        let resolved = self.quiz.submit_answer(option, now)?;
        Some(self.announce(resolved))
    }

    /// Flip a memory card. Returns the unflip to schedule after a mismatch, or
    /// the quiz start to schedule once the last pair is matched.
    pub fn flip(&mut self, id: CardId) -> Option<Deferred<ControllerEvent>> {
        if self.phase != ControllerPhase::Memory {
            return None;
        }
        let now = self.clock.now();
        match self.memory.flip(id, now) {
            FlipOutcome::Ignored | FlipOutcome::Flipped(_) => None,
            FlipOutcome::Matched { completed: true } => Some(self.finish_memory(now)),
            FlipOutcome::Matched { completed: false } => None,
            FlipOutcome::Mismatched(unflip) => Some(unflip.map(ControllerEvent::Memory)),
        }
    }

    /// Advance countdowns and overdue delays. Returns a new timer to schedule
    /// when a question timed out.
    pub fn tick(&mut self) -> Option<Deferred<ControllerEvent>> {
        let now = self.clock.now();
        match self.phase {
            ControllerPhase::Quiz => match self.quiz.tick(now) {
                QuizTick::TimedOut(resolved) => Some(self.announce(resolved)),
                QuizTick::Completed { .. } => {
                    self.finish_quiz();
                    None
                }
                QuizTick::Advanced { .. } | QuizTick::Idle => None,
            },
            ControllerPhase::Memory => {
                self.memory.tick(now);
                if self.quiz_starts_at.is_some_and(|at| now >= at) {
                    self.begin_quiz();
                }
                None
            }
            ControllerPhase::Configuring | ControllerPhase::Finished => None,
        }
    }

    /// Apply a timer that fired. Returns whether anything changed.
    pub fn apply_deferred(&mut self, deferred: &Deferred<ControllerEvent>) -> bool {
        let now = self.clock.now();
        let generation = deferred.generation();
        let due_at = deferred.due_at();

        let applied = match (*deferred.event(), self.phase) {
            (ControllerEvent::Quiz(event), ControllerPhase::Quiz) => {
                match self.quiz.apply(&Deferred::new(generation, due_at, event), now) {
                    QuizTick::Idle => false,
                    QuizTick::Completed { .. } => {
                        self.finish_quiz();
                        true
                    }
                    QuizTick::Advanced { .. } | QuizTick::TimedOut(_) => true,
                }
            }
            (ControllerEvent::Memory(event), ControllerPhase::Memory) => {
                let unflip = Deferred::new(generation, due_at, event);
                matches!(self.memory.apply(&unflip, now), MemoryTick::Unflipped { .. })
            }
            (ControllerEvent::BeginQuiz, ControllerPhase::Memory)
                if generation == self.memory.generation() && self.quiz_starts_at.is_some() =>
            {
                self.begin_quiz();
                true
            }
            _ => false,
        };

        if !applied {
            tracing::debug!(%generation, event = ?deferred.event(), "dropping stale event");
        }
        applied
    }

    /// Back to configuration. Pending timers of both engines become stale.
    pub fn restart(&mut self) {
        let quiz_generation = self.quiz.reset();
        let memory_generation = self.memory.reset();
        self.memory_bonus = 0;
        self.quiz_starts_at = None;
        self.phase = ControllerPhase::Configuring;
        tracing::info!(%quiz_generation, %memory_generation, "session restarted");
    }

    /// Result card data once the quiz has finished.
    #[must_use]
    pub fn result(&self) -> Option<ResultSummary> {
        if self.phase != ControllerPhase::Finished {
            return None;
        }
        let session = self.quiz.session()?;
        Some(ResultSummary::new(
            session.score(),
            session.max_score(),
            session.question_count(),
            self.memory_bonus,
            session.filter().category,
        ))
    }

    fn start_quiz(&mut self) -> Result<(), SessionError> {
        let settings = self
            .timings
            .quiz_settings(self.selection.question_count, self.selection.time_limit_secs)?;
        let now = self.clock.now();
        let session =
            self.quiz
                .start_session(&self.catalog, self.selection.filter, settings, now, &mut self.rng)?;
        tracing::info!(
            generation = %session.generation(),
            filter = %session.filter(),
            questions = session.question_count(),
            "quiz session started"
        );
        self.phase = ControllerPhase::Quiz;
        Ok(())
    }

    /// Record the bonus and keep the finished board on screen for
    /// `EngineTimings::completion_delay` before the quiz starts.
    fn finish_memory(&mut self, now: DateTime<Utc>) -> Deferred<ControllerEvent> {
        let bonus = self.memory.game().and_then(MemoryGame::final_score).unwrap_or(0);
        self.memory_bonus = bonus;
        self.notifier.notify(Notification::success(format!(
            "Memory Game Bonus: +{bonus} points!"
        )));
        tracing::info!(bonus, "memory game completed");

        let starts_at = now + self.timings.completion_delay;
        self.quiz_starts_at = Some(starts_at);
        Deferred::new(self.memory.generation(), starts_at, ControllerEvent::BeginQuiz)
    }

    fn begin_quiz(&mut self) {
        self.quiz_starts_at = None;
        if let Err(err) = self.start_quiz() {
            tracing::warn!(%err, "could not start quiz after memory game");
            self.notifier.notify(Notification::error(err.to_string()));
            self.phase = ControllerPhase::Configuring;
        }
    }

    fn finish_quiz(&mut self) {
        self.phase = ControllerPhase::Finished;
        if let Some(result) = self.result() {
            tracing::info!(
                score = result.score,
                max_score = result.max_score,
                bonus = result.memory_bonus,
                tier = %result.tier,
                "quiz completed"
            );
        }
    }

    fn announce(&self, resolved: QuizResolved) -> Deferred<ControllerEvent> {
        self.notifier.notify(resolution_notification(&resolved.resolution));
        tracing::debug!(
            question = %resolved.resolution.question_id,
            correct = resolved.resolution.is_correct,
            timed_out = resolved.resolution.timed_out(),
            "question resolved"
        );
        resolved.advance.map(ControllerEvent::Quiz)
    }
}

fn resolution_notification(resolution: &Resolution) -> Notification {
    if resolution.is_correct {
        let points = resolution.points_awarded;
        let plural = if points > 1 { "s" } else { "" };
        Notification::success(format!("Correct answer! +{points} point{plural}"))
    } else {
        Notification::error(format!(
            "Incorrect answer. The correct answer was: {}",
            resolution.correct_option
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Memory".parse::<Mode>().unwrap(), Mode::Memory);
        assert_eq!(" quiz ".parse::<Mode>().unwrap(), Mode::Quiz);
        assert!("arcade".parse::<Mode>().is_err());
    }

    #[test]
    fn notification_pluralizes_points() {
        let mut resolution = Resolution {
            question_id: quiz_core::model::QuestionId::new(1),
            chosen: Some("Paris".into()),
            is_correct: true,
            correct_option: "Paris".into(),
            points_awarded: 1,
            resolved_at: quiz_core::time::fixed_now(),
        };
        assert_eq!(
            resolution_notification(&resolution).message,
            "Correct answer! +1 point"
        );

        resolution.points_awarded = 3;
        assert_eq!(
            resolution_notification(&resolution).message,
            "Correct answer! +3 points"
        );

        resolution.is_correct = false;
        resolution.chosen = None;
        assert_eq!(
            resolution_notification(&resolution).message,
            "Incorrect answer. The correct answer was: Paris"
        );
    }
}
