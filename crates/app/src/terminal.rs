//! Line-oriented terminal front end for one controller run.

use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::MissedTickBehavior;

use quiz_core::Deferred;
use quiz_core::memory::MemoryGame;
use quiz_core::model::Language;
use quiz_core::quiz::QuizSession;
use services::{
    Achievement, ControllerEvent, ControllerPhase, DeferredScheduler, NotificationKind,
    RecordingSink, ResultSummary, SessionController, SessionError, TextKey, text,
};

const BOARD_COLUMNS: usize = 4;
/// Remaining seconds at which the countdown is announced.
const COUNTDOWN_MARKS: [u64; 5] = [10, 5, 3, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Pick(usize),
    Quit,
}

/// `q` quits; a positive number picks an option or a card (1-based).
#[must_use]
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if matches!(line.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return Some(Input::Quit);
    }
    match line.parse::<usize>() {
        Ok(n) if n > 0 => Some(Input::Pick(n)),
        _ => None,
    }
}

/// What the player sees; redraw whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewKey {
    phase: ControllerPhase,
    question: Option<(usize, bool)>,
    board: Option<(u32, usize, usize)>,
}

impl ViewKey {
    fn of(controller: &SessionController) -> Self {
        Self {
            phase: controller.phase(),
            question: controller
                .quiz_session()
                .map(|s| (s.current_index(), s.is_revealing())),
            board: controller
                .memory_game()
                .map(|g| (g.moves(), g.matched_pairs(), g.pending_flips().len())),
        }
    }
}

/// `y`/`yes` (any case) starts another round.
#[must_use]
pub fn parse_play_again(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Whole seconds left on the current question, rounded up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn remaining_secs(session: &QuizSession) -> u64 {
    session.time_remaining_secs().ceil() as u64
}

/// Ask whether to play again. End of input counts as no.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub async fn ask_play_again<R>(lines: &mut Lines<R>, language: Language) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    println!("{} (y/n)", text(TextKey::TryAgain, language));
    Ok(lines
        .next_line()
        .await?
        .is_some_and(|line| parse_play_again(&line)))
}

/// Back to a fresh round with the same selection.
///
/// # Errors
///
/// Returns `SessionError` if the selection no longer starts.
pub fn play_again(controller: &mut SessionController) -> Result<(), SessionError> {
    controller.restart();
    controller.start()
}

/// Play until the quiz finishes. Returns `None` if the player quit.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub async fn run_session<R>(
    controller: &mut SessionController,
    lines: &mut Lines<R>,
    sink: &RecordingSink,
    language: Language,
    tick_interval: Duration,
) -> anyhow::Result<Option<ResultSummary>>
where
    R: AsyncBufRead + Unpin,
{
    let (mut scheduler, mut due) = DeferredScheduler::new();
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut shown = ViewKey::of(controller);
    let mut announced = None;
    print!("{}", render(controller, language));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    scheduler.cancel_all();
                    return Ok(None);
                };
                match parse_input(&line) {
                    Some(Input::Quit) => {
                        scheduler.cancel_all();
                        return Ok(None);
                    }
                    Some(Input::Pick(n)) => {
                        if let Some(deferred) = act(controller, n) {
                            scheduler.schedule(deferred, controller.clock().now());
                        }
                    }
                    None => println!("{}", hint(controller.phase())),
                }
            }
            _ = ticker.tick() => {
                if let Some(deferred) = controller.tick() {
                    scheduler.schedule(deferred, controller.clock().now());
                }
            }
            Some(deferred) = due.recv() => {
                controller.apply_deferred(&deferred);
            }
        }

        for notification in sink.drain() {
            let marker = match notification.kind {
                NotificationKind::Success => "✅",
                NotificationKind::Error => "❌",
                NotificationKind::Info => "ℹ️",
            };
            println!("{marker} {}", notification.message);
        }

        let now_showing = ViewKey::of(controller);
        if now_showing != shown {
            shown = now_showing;
            print!("{}", render(controller, language));
        }

        let left = controller
            .quiz_session()
            .filter(|session| {
                controller.phase() == ControllerPhase::Quiz && !session.is_revealing()
            })
            .map(remaining_secs);
        if left != announced {
            announced = left;
            if let Some(secs) = left.filter(|secs| COUNTDOWN_MARKS.contains(secs)) {
                println!("⏱ {secs}s");
            }
        }

        if controller.phase() == ControllerPhase::Finished {
            scheduler.cancel_all();
            return Ok(controller.result());
        }
    }
}

/// Forward a numbered pick to whichever game is running.
pub fn act(controller: &mut SessionController, n: usize) -> Option<Deferred<ControllerEvent>> {
    let index = n.checked_sub(1)?;
    match controller.phase() {
        ControllerPhase::Quiz => {
            let option = controller
                .quiz_session()
                .and_then(QuizSession::current_question)
                .and_then(|question| question.option_at(index))
                .map(str::to_string)?;
            controller.submit_answer(&option)
        }
        ControllerPhase::Memory => {
            let id = controller.memory_game()?.cards().get(index)?.id;
            controller.flip(id)
        }
        ControllerPhase::Configuring | ControllerPhase::Finished => None,
    }
}

fn hint(phase: ControllerPhase) -> &'static str {
    match phase {
        ControllerPhase::Quiz => "type an option number, or q to quit",
        ControllerPhase::Memory => "type a card number, or q to quit",
        ControllerPhase::Configuring | ControllerPhase::Finished => "type q to quit",
    }
}

#[must_use]
pub fn render(controller: &SessionController, language: Language) -> String {
    match controller.phase() {
        ControllerPhase::Memory => controller
            .memory_game()
            .map(|game| render_board(game, language))
            .unwrap_or_default(),
        ControllerPhase::Quiz => controller
            .quiz_session()
            .filter(|session| !session.is_revealing())
            .map(|session| render_question(session, controller.total_score(), language))
            .unwrap_or_default(),
        ControllerPhase::Configuring | ControllerPhase::Finished => String::new(),
    }
}

fn render_question(session: &QuizSession, total_score: u32, language: Language) -> String {
    let Some(question) = session.current_question() else {
        return String::new();
    };
    let progress = session.progress();
    let mut lines = vec![
        String::new(),
        format!(
            "{} {}/{} · {}s · {}: {}",
            text(TextKey::TabQuiz, language),
            progress.current,
            progress.total,
            remaining_secs(session),
            text(TextKey::YourScore, language),
            total_score,
        ),
        question.prompt().to_string(),
    ];
    for (i, option) in question.options().iter().enumerate() {
        lines.push(format!("  {}) {option}", i + 1));
    }
    lines.join("\n") + "\n"
}

fn render_board(game: &MemoryGame, language: Language) -> String {
    let mut lines = vec![
        String::new(),
        format!(
            "{} · {}: {} · {}: {}/{} · {}: {}s",
            text(TextKey::MemoryTitle, language),
            text(TextKey::Moves, language),
            game.moves(),
            text(TextKey::Pairs, language),
            game.matched_pairs(),
            game.pair_count(),
            text(TextKey::Time, language),
            game.elapsed_secs(),
        ),
    ];
    if game.is_completed() {
        lines.push(format!(
            "{} {}: {}",
            text(TextKey::GameCompleted, language),
            text(TextKey::MemoryScore, language),
            game.current_score()
        ));
    }
    for (row, cards) in game.cards().chunks(BOARD_COLUMNS).enumerate() {
        let cells: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(col, card)| {
                let face = if card.is_flipped || card.is_matched {
                    card.value.as_str()
                } else {
                    "❓"
                };
                format!("{:>2}:{face}", row * BOARD_COLUMNS + col + 1)
            })
            .collect();
        lines.push(cells.join("  "));
    }
    lines.join("\n") + "\n"
}

#[must_use]
pub fn render_result(summary: &ResultSummary, language: Language) -> String {
    let mut lines = vec![
        String::new(),
        text(TextKey::QuizComplete, language).to_string(),
        format!("{} {}", summary.tier.emoji(), summary.tier.label()),
        summary.tier.message().to_string(),
        format!(
            "{}: {} {} {} ({}%)",
            text(TextKey::YourScore, language),
            summary.score,
            text(TextKey::OutOf, language),
            summary.max_score,
            summary.rounded_percentage(),
        ),
    ];
    if summary.memory_bonus > 0 {
        lines.push(format!(
            "{}: +{} → {}",
            text(TextKey::MemoryScore, language),
            summary.memory_bonus,
            summary.total()
        ));
    }

    let achievements = summary.achievements();
    if !achievements.is_empty() {
        let names: Vec<&str> = achievements
            .iter()
            .map(|achievement| match achievement {
                Achievement::HalfwayHero => text(TextKey::HalfwayHero, language),
                Achievement::PerfectScore => text(TextKey::PerfectScore, language),
                Achievement::QuizParticipant => text(TextKey::QuizParticipant, language),
            })
            .collect();
        lines.push(format!(
            "{}: {}",
            text(TextKey::AchievementsUnlocked, language),
            names.join(", ")
        ));
    }
    lines.push(format!(
        "{}: {}",
        text(TextKey::ShareResult, language),
        summary.share_text()
    ));
    lines.join("\n") + "\n"
}
