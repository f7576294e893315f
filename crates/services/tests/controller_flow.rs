use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{CardId, CategoryFilter, DifficultyFilter};
use quiz_core::quiz::QuizError;
use quiz_core::Deferred;
use quiz_core::time::fixed_clock;
use services::{
    ControllerEvent, ControllerPhase, EngineTimings, Mode, NotificationKind, RecordingSink, ResultTier,
    SessionController, SessionError,
};
use storage::catalog::builtin_catalog;

fn controller(sink: &RecordingSink) -> SessionController {
    SessionController::new(
        fixed_clock(),
        builtin_catalog().unwrap(),
        EngineTimings::default(),
        StdRng::seed_from_u64(42),
        Arc::new(sink.clone()),
    )
}

fn correct_option(controller: &SessionController) -> String {
    controller
        .quiz_session()
        .and_then(|session| session.current_question())
        .map(|question| question.correct_option().to_string())
        .unwrap()
}

fn wrong_option(controller: &SessionController) -> String {
    let question = controller
        .quiz_session()
        .and_then(|session| session.current_question())
        .unwrap();
    question
        .options()
        .iter()
        .find(|option| !question.is_correct(option))
        .cloned()
        .unwrap()
}

/// Card ids grouped by face value.
fn pairs(controller: &SessionController) -> Vec<(CardId, CardId)> {
    let mut by_value: HashMap<String, Vec<CardId>> = HashMap::new();
    for card in controller.memory_game().unwrap().cards() {
        by_value.entry(card.value.clone()).or_default().push(card.id);
    }
    by_value
        .into_values()
        .map(|ids| (ids[0], ids[1]))
        .collect()
}

/// Match every pair; returns the deferred quiz start.
fn complete_memory_game(controller: &mut SessionController) -> Deferred<ControllerEvent> {
    let pairs = pairs(controller);
    let last = pairs.len() - 1;
    let mut begin = None;
    for (i, (first, second)) in pairs.into_iter().enumerate() {
        assert!(controller.flip(first).is_none());
        let outcome = controller.flip(second);
        assert_eq!(outcome.is_some(), i == last);
        begin = outcome;
    }
    begin.unwrap()
}

#[test]
fn perfect_quiz_reaches_result_screen() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_category("general");
    controller.start().unwrap();
    assert_eq!(controller.phase(), ControllerPhase::Quiz);

    for _ in 0..5 {
        let option = correct_option(&controller);
        let advance = controller.submit_answer(&option).unwrap();
        controller.clock_mut().advance_millis(1500);
        assert!(controller.apply_deferred(&advance));
    }

    assert_eq!(controller.phase(), ControllerPhase::Finished);
    let result = controller.result().unwrap();
    assert_eq!(result.score, 5);
    assert_eq!(result.max_score, 5);
    assert_eq!(result.tier, ResultTier::QuizMaster);
    assert_eq!(result.category, "General Knowledge");

    let notes = sink.snapshot();
    assert_eq!(notes.len(), 5);
    assert!(notes.iter().all(|n| n.kind == NotificationKind::Success));
    assert_eq!(notes[0].message, "Correct answer! +1 point");
}

#[test]
fn wrong_answer_and_timeout_reveal_correct_option() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.start().unwrap();

    let expected = correct_option(&controller);
    let wrong = wrong_option(&controller);
    let advance = controller.submit_answer(&wrong).unwrap();
    // Answers during the reveal are ignored.
    assert!(controller.submit_answer(&expected).is_none());

    controller.clock_mut().advance_millis(1500);
    assert!(controller.apply_deferred(&advance));

    let second_correct = correct_option(&controller);
    controller.clock_mut().advance_millis(20_000);
    let timeout_advance = controller.tick().unwrap();

    let session = controller.quiz_session().unwrap();
    assert!(session.last_resolution().unwrap().timed_out());
    assert_eq!(session.score(), 0);
    assert!(timeout_advance.due_at() > controller.clock().now());

    assert_eq!(
        sink.messages(),
        vec![
            format!("Incorrect answer. The correct answer was: {expected}"),
            format!("Incorrect answer. The correct answer was: {second_correct}"),
        ]
    );
    assert!(
        sink.snapshot()
            .iter()
            .all(|n| n.kind == NotificationKind::Error)
    );
}

#[test]
fn memory_game_bonus_carries_into_quiz() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_mode(Mode::Memory);
    controller.start().unwrap();
    assert_eq!(controller.phase(), ControllerPhase::Memory);

    let begin = complete_memory_game(&mut controller);

    // Eight clean moves with no time passing.
    assert_eq!(controller.memory_bonus(), 920);
    assert_eq!(sink.messages(), vec!["Memory Game Bonus: +920 points!"]);

    // The finished board stays up until the quiz start fires.
    assert_eq!(controller.phase(), ControllerPhase::Memory);
    assert!(controller.quiz_session().is_none());
    assert_eq!(begin.due_at(), controller.clock().now() + Duration::milliseconds(1500));
    controller.clock_mut().advance_millis(1500);
    assert!(controller.apply_deferred(&begin));
    assert!(!controller.apply_deferred(&begin));

    assert_eq!(controller.phase(), ControllerPhase::Quiz);
    assert_eq!(controller.total_score(), 920);
    assert_eq!(
        controller.quiz_session().unwrap().started_at(),
        controller.clock().now()
    );

    for _ in 0..5 {
        let option = correct_option(&controller);
        let advance = controller.submit_answer(&option).unwrap();
        controller.clock_mut().advance_millis(1500);
        controller.apply_deferred(&advance);
    }
    let result = controller.result().unwrap();
    assert_eq!(result.memory_bonus, 920);
    assert_eq!(result.total(), 925);
}

#[test]
fn mismatch_locks_board_until_unflip() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_mode(Mode::Memory);
    controller.start().unwrap();

    let pairs = pairs(&controller);
    let (a, _) = pairs[0];
    let (b, _) = pairs[1];
    let (c, _) = pairs[2];

    assert!(controller.flip(a).is_none());
    let unflip = controller.flip(b).unwrap();
    assert!(controller.flip(c).is_none());
    assert!(controller.memory_game().unwrap().is_locked());

    controller.clock_mut().advance_millis(1000);
    assert!(controller.apply_deferred(&unflip));
    assert!(!controller.apply_deferred(&unflip));

    let game = controller.memory_game().unwrap();
    assert!(!game.is_locked());
    assert_eq!(game.moves(), 1);
    assert!(game.cards().iter().all(|card| !card.is_flipped));
}

#[test]
fn restart_drops_pending_timers() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.start().unwrap();

    let option = correct_option(&controller);
    let stale = controller.submit_answer(&option).unwrap();

    controller.restart();
    assert_eq!(controller.phase(), ControllerPhase::Configuring);
    controller.start().unwrap();

    controller.clock_mut().advance_millis(1500);
    assert!(!controller.apply_deferred(&stale));
    let session = controller.quiz_session().unwrap();
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
}

#[test]
fn start_is_rejected_while_running() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.start().unwrap();
    assert_eq!(controller.start(), Err(SessionError::AlreadyRunning));
}

#[test]
fn unknown_filters_fall_back_to_all() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);

    assert_eq!(controller.select_category("history"), CategoryFilter::All);
    assert_eq!(controller.select_difficulty("nightmare"), DifficultyFilter::All);
    controller.select_question_count(30).unwrap();
    controller.start().unwrap();

    let session = controller.quiz_session().unwrap();
    assert_eq!(session.question_count(), 30);
    assert_eq!(session.point_value(), 3);
}

#[test]
fn invalid_configuration_is_rejected() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);

    assert_eq!(
        controller.select_question_count(0),
        Err(SessionError::InvalidQuestionCount)
    );
    assert_eq!(
        controller.select_time_limit(0),
        Err(SessionError::InvalidTimeLimit)
    );
    assert_eq!(controller.selection().question_count, 5);
    assert_eq!(controller.selection().time_limit_secs, 20);
}

#[test]
fn memory_mode_checks_quiz_selection_first() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_mode(Mode::Memory);
    controller.select_category("general");
    controller.select_difficulty("hard");

    let err = controller.start().unwrap_err();
    assert!(matches!(err, SessionError::Quiz(QuizError::EmptyCatalog { .. })));
    assert_eq!(controller.phase(), ControllerPhase::Configuring);
    assert!(controller.memory_game().is_none());
}

#[test]
fn tick_starts_quiz_once_completion_delay_passed() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_mode(Mode::Memory);
    controller.start().unwrap();
    complete_memory_game(&mut controller);

    controller.clock_mut().advance_millis(1000);
    assert!(controller.tick().is_none());
    assert_eq!(controller.phase(), ControllerPhase::Memory);

    controller.clock_mut().advance_millis(500);
    controller.tick();
    assert_eq!(controller.phase(), ControllerPhase::Quiz);
}

#[test]
fn restart_drops_pending_quiz_start() {
    let sink = RecordingSink::new();
    let mut controller = controller(&sink);
    controller.select_mode(Mode::Memory);
    controller.start().unwrap();
    let begin = complete_memory_game(&mut controller);

    controller.restart();
    controller.start().unwrap();
    controller.clock_mut().advance_millis(1500);

    assert!(!controller.apply_deferred(&begin));
    assert_eq!(controller.phase(), ControllerPhase::Memory);
    assert_eq!(controller.memory_bonus(), 0);
    assert!(!controller.memory_game().unwrap().is_completed());
}
