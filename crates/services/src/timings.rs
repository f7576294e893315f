use chrono::Duration;

use quiz_core::memory::{DEFAULT_MISMATCH_DELAY_MS, DEFAULT_PAIR_COUNT, MemoryError, MemorySettings};
use quiz_core::quiz::{DEFAULT_REVEAL_DELAY_MS, QuizError, QuizSettings};

pub const DEFAULT_COMPLETION_DELAY_MS: i64 = 1_500;

/// Timing constants shared by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimings {
    pub reveal_delay: Duration,
    pub mismatch_delay: Duration,
    /// Pause on the finished memory board before the quiz starts.
    pub completion_delay: Duration,
    pub pair_count: usize,
    /// How often the presentation layer should tick the engines.
    pub tick_interval: std::time::Duration,
}

impl Default for EngineTimings {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::milliseconds(DEFAULT_REVEAL_DELAY_MS),
            mismatch_delay: Duration::milliseconds(DEFAULT_MISMATCH_DELAY_MS),
            completion_delay: Duration::milliseconds(DEFAULT_COMPLETION_DELAY_MS),
            pair_count: DEFAULT_PAIR_COUNT,
            tick_interval: std::time::Duration::from_millis(100),
        }
    }
}

impl EngineTimings {
    /// # Errors
    ///
    /// Returns `QuizError` if the count or limit is rejected by the engine.
    pub fn quiz_settings(
        &self,
        question_count: usize,
        time_limit_secs: u32,
    ) -> Result<QuizSettings, QuizError> {
        QuizSettings::new(question_count, time_limit_secs)?.with_reveal_delay(self.reveal_delay)
    }

    /// # Errors
    ///
    /// Returns `MemoryError` for a zero pair count or negative delay.
    pub fn memory_settings(&self) -> Result<MemorySettings, MemoryError> {
        MemorySettings::new(self.pair_count, self.mismatch_delay)
    }
}
