use chrono::{DateTime, Utc};
use rand::Rng;

use crate::deferred::{Deferred, Generation, GenerationCounter};
use crate::model::{QuestionCatalog, QuizFilter};

use super::QuizError;
use super::session::{QuizEvent, QuizResolved, QuizSession, QuizTick};
use super::settings::QuizSettings;

/// Owns the active quiz session and the generation counter behind it.
///
/// Starting or resetting a session bumps the generation, so any deferred
/// advance still in flight from a previous session is dropped on `apply`.
#[derive(Debug, Default)]
pub struct QuizEngine {
    generations: GenerationCounter,
    session: Option<QuizSession>,
}

impl QuizEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running session with a fresh one.
    ///
    /// On error the previous session and generation are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyCatalog` if nothing matches `filter`.
    pub fn start_session<R>(
        &mut self,
        catalog: &QuestionCatalog,
        filter: QuizFilter,
        settings: QuizSettings,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<&QuizSession, QuizError>
    where
        R: Rng + ?Sized,
    {
        let mut generations = self.generations.clone();
        let generation = generations.advance();
        let session = QuizSession::start(catalog, filter, settings, generation, now, rng)?;
        self.generations = generations;
        Ok(self.session.insert(session))
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    pub fn submit_answer(&mut self, option: &str, now: DateTime<Utc>) -> Option<QuizResolved> {
        self.session.as_mut()?.submit_answer(option, now)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> QuizTick {
        match self.session.as_mut() {
            Some(session) => session.tick(now),
            None => QuizTick::Idle,
        }
    }

    pub fn apply(&mut self, deferred: &Deferred<QuizEvent>, now: DateTime<Utc>) -> QuizTick {
        match self.session.as_mut() {
            Some(session) => session.apply(deferred, now),
            None => QuizTick::Idle,
        }
    }

    /// Drop the session and invalidate its pending events.
    pub fn reset(&mut self) -> Generation {
        self.session = None;
        self.generations.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::sample_catalog;
    use crate::model::{Category, CategoryFilter, DifficultyFilter};
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn answer_current(engine: &mut QuizEngine) -> QuizResolved {
        let option = engine
            .session()
            .and_then(QuizSession::current_question)
            .map(|q| q.correct_option().to_string())
            .unwrap();
        engine.submit_answer(&option, fixed_now()).unwrap()
    }

    #[test]
    fn restart_drops_advance_from_previous_session() {
        let catalog = sample_catalog();
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(3);

        engine
            .start_session(&catalog, QuizFilter::all(), QuizSettings::default(), fixed_now(), &mut rng)
            .unwrap();
        let stale = answer_current(&mut engine).advance;

        engine
            .start_session(&catalog, QuizFilter::all(), QuizSettings::default(), fixed_now(), &mut rng)
            .unwrap();
        let fresh = answer_current(&mut engine);

        assert!(fresh.advance.generation() > stale.generation());
        assert_eq!(engine.apply(&stale, stale.due_at()), QuizTick::Idle);
        assert!(engine.session().unwrap().is_revealing());

        assert_eq!(
            engine.apply(&fresh.advance, fresh.advance.due_at()),
            QuizTick::Advanced { index: 1 }
        );
    }

    #[test]
    fn failed_start_keeps_previous_session() {
        let catalog = sample_catalog();
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(3);

        engine
            .start_session(&catalog, QuizFilter::all(), QuizSettings::default(), fixed_now(), &mut rng)
            .unwrap();
        let before = engine.generation();

        let empty = QuizFilter::new(
            CategoryFilter::Only(Category::NonTechnical),
            DifficultyFilter::All,
        );
        let err = engine
            .start_session(&catalog, empty, QuizSettings::default(), fixed_now(), &mut rng)
            .unwrap_err();

        assert!(matches!(err, QuizError::EmptyCatalog { .. }));
        assert_eq!(engine.generation(), before);
        assert!(engine.session().is_some());
    }

    #[test]
    fn reset_clears_session_and_ignores_input() {
        let catalog = sample_catalog();
        let mut engine = QuizEngine::new();
        let mut rng = StdRng::seed_from_u64(3);

        engine
            .start_session(&catalog, QuizFilter::all(), QuizSettings::default(), fixed_now(), &mut rng)
            .unwrap();
        let pending = answer_current(&mut engine).advance;
        engine.reset();

        assert!(engine.session().is_none());
        assert!(engine.submit_answer("anything", fixed_now()).is_none());
        assert_eq!(engine.tick(fixed_now()), QuizTick::Idle);
        assert_eq!(engine.apply(&pending, pending.due_at()), QuizTick::Idle);
    }
}
