use chrono::Duration;

use super::QuizError;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 20;
pub const DEFAULT_REVEAL_DELAY_MS: i64 = 1_500;

/// Per-session quiz configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_count: usize,
    time_limit: Duration,
    reveal_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            time_limit: Duration::seconds(i64::from(DEFAULT_TIME_LIMIT_SECS)),
            reveal_delay: Duration::milliseconds(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

impl QuizSettings {
    /// Creates settings with the default reveal delay.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTimeLimit` if `time_limit_secs` is zero.
    pub fn new(question_count: usize, time_limit_secs: u32) -> Result<Self, QuizError> {
        if time_limit_secs == 0 {
            return Err(QuizError::InvalidTimeLimit);
        }
        Ok(Self {
            question_count,
            time_limit: Duration::seconds(i64::from(time_limit_secs)),
            ..Self::default()
        })
    }

    /// Overrides the pause between a resolution and the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidRevealDelay` for negative delays.
    pub fn with_reveal_delay(mut self, delay: Duration) -> Result<Self, QuizError> {
        if delay < Duration::zero() {
            return Err(QuizError::InvalidRevealDelay);
        }
        self.reveal_delay = delay;
        Ok(self)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }
}
