use chrono::Duration;

use super::MemoryError;

pub const DEFAULT_PAIR_COUNT: usize = 8;
pub const DEFAULT_MISMATCH_DELAY_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySettings {
    pair_count: usize,
    mismatch_delay: Duration,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            mismatch_delay: Duration::milliseconds(DEFAULT_MISMATCH_DELAY_MS),
        }
    }
}

impl MemorySettings {
    /// # Errors
    ///
    /// Returns `MemoryError::InvalidPairCount` for zero pairs and
    /// `MemoryError::InvalidMismatchDelay` for a negative delay.
    pub fn new(pair_count: usize, mismatch_delay: Duration) -> Result<Self, MemoryError> {
        if pair_count == 0 {
            return Err(MemoryError::InvalidPairCount);
        }
        if mismatch_delay < Duration::zero() {
            return Err(MemoryError::InvalidMismatchDelay);
        }
        Ok(Self {
            pair_count,
            mismatch_delay,
        })
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// How long a mismatched pair stays face up.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deal_eight_pairs() {
        let settings = MemorySettings::default();
        assert_eq!(settings.pair_count(), 8);
        assert_eq!(settings.mismatch_delay(), Duration::seconds(1));
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            MemorySettings::new(0, Duration::seconds(1)).unwrap_err(),
            MemoryError::InvalidPairCount
        );
        assert_eq!(
            MemorySettings::new(4, Duration::milliseconds(-5)).unwrap_err(),
            MemoryError::InvalidMismatchDelay
        );
    }
}
